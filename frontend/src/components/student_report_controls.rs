use shared::{ReportKind, Student};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_api_client::use_api_client;
use crate::hooks::use_report_downloads::use_report_downloads;
use crate::services::logging::Logger;

const COMPONENT: &str = "student-report-controls";

/// One report button per student, each with its own busy flag
#[function_component(StudentReportControls)]
pub fn student_report_controls() -> Html {
    let api_client = use_api_client();
    let reports = use_report_downloads(&api_client);
    let students = use_state(Vec::<Student>::new);
    let start_date = use_state(String::new);

    {
        let api_client = api_client.clone();
        let students = students.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.list_students().await {
                    Ok(list) => students.set(list),
                    Err(e) => Logger::error_with_component(
                        COMPONENT,
                        &format!("Failed to fetch students: {}", e),
                    ),
                }
            });
            || ()
        });
    }

    let on_start_date = {
        let start_date = start_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            start_date.set(input.value());
        })
    };

    let button = |student: &Student| {
        let kind = ReportKind::Student {
            name: student.name.clone(),
            start_date: Some((*start_date).clone()),
        };
        let pending = reports.is_pending(&kind);
        let onclick = {
            let download = reports.download.clone();
            Callback::from(move |_: MouseEvent| download.emit(kind.clone()))
        };
        html! {
            <button key={student.id.clone()} class="btn btn-report-student" disabled={pending} {onclick}>
                { if pending { "جاري الإصدار...".to_string() } else { format!("تقرير {}", student.name) } }
            </button>
        }
    };

    html! {
        <div class="card student-report-controls">
            <h3>{"تقارير الطلاب الفردية"}</h3>
            <div class="inline-row">
                <label for="student-start-date">{"من تاريخ"}</label>
                <input
                    id="student-start-date"
                    type="date"
                    value={(*start_date).clone()}
                    onchange={on_start_date}
                />
            </div>
            <div class="report-grid">
                { for students.iter().map(button) }
            </div>
        </div>
    }
}
