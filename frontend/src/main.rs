use shared::{Access, Page};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod pages;
mod route;
mod services;

use components::navigation::Navigation;
use pages::home::HomePage;
use pages::login::LoginPage;
use pages::sessions::SessionsPage;
use pages::students::StudentsPage;
use route::Route;
use services::storage::CredentialStore;

/// Render a route behind the token gate.
///
/// The store is read on every route change, so logging in or out takes
/// effect on the next navigation.
fn switch(route: Route) -> Html {
    let Some(page) = route.page() else {
        return html! { <Redirect<Route> to={Route::Home} /> };
    };

    match Access::resolve(page, CredentialStore::default().has_token()) {
        Access::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        Access::Render(Page::Login) => html! { <LoginPage /> },
        Access::Render(page) => html! {
            <>
                <Navigation />
                <main class="content">
                    { match page {
                        Page::Students => html! { <StudentsPage /> },
                        Page::Sessions => html! { <SessionsPage /> },
                        Page::Home | Page::Login => html! { <HomePage /> },
                    } }
                </main>
            </>
        },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="app" dir="rtl">
                <header class="app-header">
                    <h1>{"نظام متابعة حلقات القرآن"}</h1>
                    <p>{"متابعة تقدم الطلاب"}</p>
                </header>
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
