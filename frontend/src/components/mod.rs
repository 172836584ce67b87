pub mod level_select;
pub mod loading_spinner;
pub mod navigation;
pub mod report_controls;
pub mod session_form;
pub mod student_details_modal;
pub mod student_report_controls;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Current value of the input an event fired on
pub(crate) fn input_value<E: TargetCast>(e: E) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}
