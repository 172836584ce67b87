use shared::Level;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LevelSelectProps {
    pub value: Level,
    pub on_change: Callback<Level>,
    #[prop_or_default]
    pub id: Option<AttrValue>,
}

/// Select over the fixed grade scale
#[function_component(LevelSelect)]
pub fn level_select(props: &LevelSelectProps) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Level>() {
                Ok(level) => on_change.emit(level),
                Err(e) => Logger::warn_with_component("level-select", &e.to_string()),
            }
        })
    };

    html! {
        <select id={props.id.clone()} class="form-select" onchange={on_change}>
            { for Level::ALL.iter().map(|level| html! {
                <option value={level.label()} selected={*level == props.value}>
                    {level.label()}
                </option>
            }) }
        </select>
    }
}
