use shared::dates::display_date;
use shared::{EditableRow, ReportKind, Session, SessionDraft, SessionEditBuffer, SessionField, Student};
use yew::prelude::*;

use crate::components::input_value;
use crate::components::level_select::LevelSelect;
use crate::components::loading_spinner::LoadingSpinner;
use crate::hooks::use_api_client::use_api_client;
use crate::hooks::use_editable_table::use_editable_table;
use crate::hooks::use_report_downloads::use_report_downloads;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::report_failure;

const COMPONENT: &str = "student-details";
const UPDATE_FAILED: &str = "خطأ في تحديث الجلسة";
const DELETE_FAILED: &str = "خطأ في حذف الجلسة";
const ADD_FAILED: &str = "خطأ في حفظ الجلسة.";
const DELETE_QUESTION: &str = "هل أنت متأكد من حذف هذه الجلسة؟";
const COLUMNS: usize = 7;

#[derive(Properties, PartialEq)]
pub struct StudentDetailsModalProps {
    pub student: Student,
    pub on_close: Callback<()>,
}

/// One student's session log.
///
/// Mounted only while open, so closing drops the log, any edit in progress
/// and the add form; reopening fetches again.
#[function_component(StudentDetailsModal)]
pub fn student_details_modal(props: &StudentDetailsModalProps) -> Html {
    let api_client = use_api_client();
    let name = props.student.name.clone();

    let log = use_editable_table(
        COMPONENT,
        (api_client.clone(), name.clone()),
        |(api_client, name): (ApiClient, String)| async move {
            api_client.student_sessions(&name).await
        },
    );
    let reports = use_report_downloads(&api_client);
    let show_add = use_state(|| false);
    let draft = use_state(|| SessionDraft::for_student(&name));

    let on_field: Callback<SessionField> = {
        let log = log.clone();
        Callback::from(move |field| log.modify(move |buffer: &mut SessionEditBuffer| buffer.set(field)))
    };

    let on_draft_field: Callback<SessionField> = {
        let draft = draft.clone();
        Callback::from(move |field| {
            let mut next = (*draft).clone();
            next.set(field);
            draft.set(next);
        })
    };

    let on_save = {
        let log = log.clone();
        let api_client = api_client.clone();
        Callback::from(move |_: MouseEvent| {
            let api_client = api_client.clone();
            log.save(UPDATE_FAILED, move |id, payload| async move {
                api_client.update_session(&id, &payload).await
            });
        })
    };

    let on_cancel = {
        let log = log.clone();
        Callback::from(move |_: MouseEvent| log.cancel_edit())
    };

    let toggle_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: MouseEvent| show_add.set(!*show_add))
    };

    let on_add = {
        let log = log.clone();
        let api_client = api_client.clone();
        let draft = draft.clone();
        let show_add = show_add.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = match draft.to_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    report_failure(COMPONENT, "Incomplete session", e, ADD_FAILED);
                    return;
                }
            };
            let api_client = api_client.clone();
            let draft = draft.clone();
            let show_add = show_add.clone();
            log.mutate_then(
                ADD_FAILED,
                async move { api_client.create_session(&payload).await },
                move || {
                    Logger::debug_with_component(COMPONENT, "Session added from the log");
                    draft.set(SessionDraft::for_student(&draft.student_name));
                    show_add.set(false);
                },
            );
        })
    };

    let report_button = |kind: ReportKind, label: &'static str, class: &'static str| {
        let pending = reports.is_pending(&kind);
        let onclick = {
            let download = reports.download.clone();
            Callback::from(move |_: MouseEvent| download.emit(kind.clone()))
        };
        html! {
            <button class={classes!("btn", class)} disabled={pending} {onclick}>
                { if pending { "جاري الإصدار..." } else { label } }
            </button>
        }
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let row = |session: &Session| -> Html {
        let id = session.row_id().to_string();
        let date = session
            .date_hijri
            .clone()
            .unwrap_or_else(|| display_date(&session.date_gregorian));

        if let Some(editing) = log.table.editing().filter(|editing| editing.row_id == id) {
            let buffer = &editing.buffer;
            return html! {
                <tr key={id} class="editing">
                    <td>
                        <input
                            type="date"
                            value={buffer.date_gregorian.clone()}
                            oninput={on_field.reform(|e: InputEvent| SessionField::Date(input_value(e)))}
                        />
                    </td>
                    <td>
                        <input
                            type="text"
                            value={buffer.new_lesson.clone()}
                            oninput={on_field.reform(|e: InputEvent| SessionField::NewLesson(input_value(e)))}
                        />
                    </td>
                    <td><LevelSelect value={buffer.level} on_change={on_field.reform(SessionField::Level)} /></td>
                    <td>
                        <input
                            type="text"
                            value={buffer.review.clone()}
                            oninput={on_field.reform(|e: InputEvent| SessionField::Review(input_value(e)))}
                        />
                    </td>
                    <td><LevelSelect value={buffer.review_level} on_change={on_field.reform(SessionField::ReviewLevel)} /></td>
                    <td>{ if buffer.is_paid { "✔" } else { "✘" } }</td>
                    <td class="actions">
                        <button class="btn btn-save" onclick={on_save.clone()}>{"حفظ"}</button>
                        <button class="btn btn-cancel" onclick={on_cancel.clone()}>{"إلغاء"}</button>
                    </td>
                </tr>
            };
        }

        let on_edit = {
            let log = log.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| log.begin_edit(id.clone()))
        };
        let on_delete = {
            let log = log.clone();
            let api_client = api_client.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| {
                let api_client = api_client.clone();
                log.delete(&id, DELETE_QUESTION, DELETE_FAILED, move |target| async move {
                    api_client.delete_session(&target).await
                });
            })
        };
        let on_toggle_paid = {
            let log = log.clone();
            let api_client = api_client.clone();
            let id = id.clone();
            let payload = session.paid_toggled();
            Callback::from(move |_: MouseEvent| {
                let api_client = api_client.clone();
                let id = id.clone();
                let payload = payload.clone();
                log.mutate(UPDATE_FAILED, async move {
                    api_client.update_session(&id, &payload).await
                });
            })
        };
        let review_level = session
            .review_level
            .map(|level| level.label())
            .unwrap_or("-");

        html! {
            <tr key={id}>
                <td>{date}</td>
                <td>{session.new_lesson.clone()}</td>
                <td>{session.level.label()}</td>
                <td>{session.review.clone()}</td>
                <td>{review_level}</td>
                <td>
                    <button
                        class={classes!("btn", "btn-paid", session.is_paid.then_some("paid"))}
                        onclick={on_toggle_paid}
                    >
                        { if session.is_paid { "مدفوع" } else { "غير مدفوع" } }
                    </button>
                </td>
                <td class="actions">
                    <button class="btn btn-edit" onclick={on_edit}>{"تعديل"}</button>
                    <button class="btn btn-delete" onclick={on_delete}>{"حذف"}</button>
                </td>
            </tr>
        }
    };

    let body = if log.table.is_loading() {
        html! {
            <tr><td colspan={COLUMNS.to_string()}><LoadingSpinner /></td></tr>
        }
    } else if log.table.rows().is_empty() {
        html! {
            <tr><td colspan={COLUMNS.to_string()} class="empty">{"لا توجد حصص مسجلة لهذا الطالب"}</td></tr>
        }
    } else {
        html! { <>{ for log.table.rows().iter().map(row) }</> }
    };

    let add_form = if *show_add {
        html! {
            <form class="add-session" onsubmit={on_add}>
                <input
                    type="text"
                    placeholder="درس جديد"
                    required=true
                    value={draft.new_lesson.clone()}
                    oninput={on_draft_field.reform(|e: InputEvent| SessionField::NewLesson(input_value(e)))}
                />
                <LevelSelect value={draft.level} on_change={on_draft_field.reform(SessionField::Level)} />
                <input
                    type="text"
                    placeholder="مراجعة"
                    required=true
                    value={draft.review.clone()}
                    oninput={on_draft_field.reform(|e: InputEvent| SessionField::Review(input_value(e)))}
                />
                <LevelSelect value={draft.review_level} on_change={on_draft_field.reform(SessionField::ReviewLevel)} />
                <button type="submit" class="btn btn-primary">{"حفظ"}</button>
            </form>
        }
    } else {
        html! {}
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal student-details" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3>{format!("سجل حصص {}", props.student.name)}</h3>
                    <div class="modal-actions">
                        <button class="btn btn-secondary" onclick={toggle_add}>
                            { if *show_add { "إلغاء" } else { "إضافة حصة" } }
                        </button>
                        {report_button(ReportKind::Unpaid { name: name.clone() }, "تقرير غير المدفوع", "btn-report-unpaid")}
                        {report_button(ReportKind::LastSeven { name: name.clone() }, "تقرير آخر 7 حصص", "btn-report-last7")}
                    </div>
                </div>
                {add_form}
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"التاريخ"}</th>
                            <th>{"درس جديد"}</th>
                            <th>{"المستوى"}</th>
                            <th>{"مراجعة"}</th>
                            <th>{"المستوى"}</th>
                            <th>{"الدفع"}</th>
                            <th>{"الإجراءات"}</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
                <div class="modal-footer">
                    <button class="btn btn-close" onclick={on_close_button}>{"إغلاق"}</button>
                </div>
            </div>
        </div>
    }
}
