use yew::prelude::*;
use yew_router::prelude::*;

use crate::route::Route;
use crate::services::logging::Logger;
use crate::services::storage::CredentialStore;

const COMPONENT: &str = "navigation";

#[function_component(Navigation)]
pub fn navigation() -> Html {
    let current = use_route::<Route>();

    let link = |route: Route, label: &'static str| {
        let active = current == Some(route);
        html! {
            <Link<Route> to={route} classes={classes!("nav-link", active.then_some("active"))}>
                {label}
            </Link<Route>>
        }
    };

    // Full reload so no view keeps state fetched with the old token
    let on_logout = Callback::from(|_: MouseEvent| {
        CredentialStore::default().clear();
        Logger::info_with_component(COMPONENT, "Logged out");
        if let Err(e) = gloo::utils::window().location().set_href("/") {
            Logger::error_with_component(COMPONENT, &format!("Failed to reload: {:?}", e));
        }
    });

    html! {
        <nav class="navigation">
            <div class="nav-links">
                {link(Route::Home, "الرئيسية")}
                {link(Route::Students, "الطلاب")}
                {link(Route::Sessions, "الجلسات")}
            </div>
            <button class="btn btn-logout" onclick={on_logout}>{"تسجيل الخروج"}</button>
        </nav>
    }
}
