use yew::prelude::*;

const DEFAULT_MESSAGE: &str = "جاري التحميل...";

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or_default]
    pub message: Option<AttrValue>,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    let message = props
        .message
        .clone()
        .unwrap_or_else(|| AttrValue::from(DEFAULT_MESSAGE));

    html! {
        <div class="loading-spinner">
            <div class="spinner"></div>
            <p>{message}</p>
        </div>
    }
}
