use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::input_value;
use crate::route::Route;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage::CredentialStore;

const COMPONENT: &str = "login";
const LOGIN_FAILED: &str = "بيانات الدخول غير صحيحة";

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<&'static str>::None);
    let navigator = use_navigator();

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| email.set(input_value(e)))
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| password.set(input_value(e)))
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = LoginRequest {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let error = error.clone();
            let navigator = navigator.clone();

            // Logging in never sends a stale token
            let api_client = ApiClient::new().with_token(None);
            spawn_local(async move {
                match api_client.login(&request).await {
                    Ok(response) => {
                        CredentialStore::default().save(&response.token);
                        Logger::info_with_component(COMPONENT, "Logged in");
                        match navigator {
                            Some(navigator) => navigator.push(&Route::Home),
                            None => Logger::error_with_component(COMPONENT, "No router in scope"),
                        }
                    }
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Login failed: {}", e));
                        error.set(Some(LOGIN_FAILED));
                    }
                }
            });
        })
    };

    html! {
        <div class="page login-page">
            <div class="card login-card">
                <div class="login-header">
                    <h1>{"مرحباً بك 👋"}</h1>
                    <p>{"سجل دخولك للمتابعة"}</p>
                </div>

                if let Some(message) = *error {
                    <div class="login-error">
                        <p class="title">{"خطأ"}</p>
                        <p>{message}</p>
                    </div>
                }

                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"البريد الإلكتروني"}</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="admin@iqra.com"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email}
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">{"كلمة المرور"}</label>
                        <input
                            id="password"
                            type="password"
                            placeholder="••••••••"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary btn-block">{"تسجيل الدخول"}</button>
                </form>
            </div>
        </div>
    }
}
