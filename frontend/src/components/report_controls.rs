use shared::ReportKind;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_api_client::use_api_client;
use crate::hooks::use_report_downloads::use_report_downloads;

/// Daily and monthly report buttons
#[function_component(ReportControls)]
pub fn report_controls() -> Html {
    let api_client = use_api_client();
    let reports = use_report_downloads(&api_client);
    let start_date = use_state(String::new);

    let today = ReportKind::Today;
    let month = ReportKind::Month {
        start_date: Some((*start_date).clone()),
    };

    let on_start_date = {
        let start_date = start_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            start_date.set(input.value());
        })
    };

    let on_today = {
        let download = reports.download.clone();
        let kind = today.clone();
        Callback::from(move |_: MouseEvent| download.emit(kind.clone()))
    };

    let on_month = {
        let download = reports.download.clone();
        let kind = month.clone();
        Callback::from(move |_: MouseEvent| download.emit(kind.clone()))
    };

    let today_pending = reports.is_pending(&today);
    let month_pending = reports.is_pending(&month);

    html! {
        <div class="report-controls">
            <button class="btn btn-report-today" disabled={today_pending} onclick={on_today}>
                { if today_pending { "جاري الإصدار..." } else { "إصدار التقرير اليومي" } }
            </button>
            <div class="inline-row">
                <label for="month-start-date">{"من تاريخ"}</label>
                <input
                    id="month-start-date"
                    type="date"
                    value={(*start_date).clone()}
                    onchange={on_start_date}
                />
                <button class="btn btn-report-month" disabled={month_pending} onclick={on_month}>
                    { if month_pending { "جاري الإصدار..." } else { "إصدار التقرير الشهري" } }
                </button>
            </div>
        </div>
    }
}
