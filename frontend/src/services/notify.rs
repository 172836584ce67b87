//! Blocking user prompts.
//!
//! Every failed request is handled the same way whatever went wrong: log
//! the cause for diagnostics and show one generic, localized alert.

use std::fmt::Display;

use crate::services::logging::Logger;

pub fn report_failure(component: &str, context: &str, error: impl Display, user_message: &str) {
    Logger::error_with_component(component, &format!("{}: {}", context, error));
    gloo::dialogs::alert(user_message);
}

pub fn confirm(question: &str) -> bool {
    gloo::dialogs::confirm(question)
}
