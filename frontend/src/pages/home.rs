use yew::prelude::*;

use crate::components::report_controls::ReportControls;
use crate::components::session_form::SessionForm;
use crate::components::student_report_controls::StudentReportControls;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="page home-page">
            <SessionForm />
            <ReportControls />
            <StudentReportControls />
        </div>
    }
}
