use shared::Page;
use yew_router::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Home,
    #[at("/students")]
    Students,
    #[at("/sessions")]
    Sessions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// The page a route renders; unknown paths have none
    pub fn page(self) -> Option<Page> {
        match self {
            Route::Login => Some(Page::Login),
            Route::Home => Some(Page::Home),
            Route::Students => Some(Page::Students),
            Route::Sessions => Some(Page::Sessions),
            Route::NotFound => None,
        }
    }
}
