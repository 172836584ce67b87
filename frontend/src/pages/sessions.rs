use shared::dates::display_date;
use shared::{EditableRow, Session, SessionEditBuffer, SessionField, Student};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::input_value;
use crate::components::level_select::LevelSelect;
use crate::components::loading_spinner::LoadingSpinner;
use crate::hooks::use_api_client::use_api_client;
use crate::hooks::use_editable_table::use_editable_table;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "sessions-page";
const UPDATE_FAILED: &str = "خطأ في تحديث الجلسة";
const DELETE_FAILED: &str = "خطأ في حذف الجلسة";
const DELETE_QUESTION: &str = "هل أنت متأكد من حذف هذه الجلسة؟";
const COLUMNS: usize = 8;

/// Every session across all students
#[function_component(SessionsPage)]
pub fn sessions_page() -> Html {
    let api_client = use_api_client();
    let sessions = use_editable_table(
        COMPONENT,
        api_client.clone(),
        |api_client: ApiClient| async move { api_client.list_sessions().await },
    );
    // Choices for reassigning a session while editing
    let students = use_state(Vec::<Student>::new);

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

    let on_field: Callback<SessionField> = {
        let sessions = sessions.clone();
        Callback::from(move |field| {
            sessions.modify(move |buffer: &mut SessionEditBuffer| buffer.set(field))
        })
    };

    let on_save = {
        let sessions = sessions.clone();
        let api_client = api_client.clone();
        Callback::from(move |_: MouseEvent| {
            let api_client = api_client.clone();
            sessions.save(UPDATE_FAILED, move |id, payload| async move {
                api_client.update_session(&id, &payload).await
            });
        })
    };

    let on_cancel = {
        let sessions = sessions.clone();
        Callback::from(move |_: MouseEvent| sessions.cancel_edit())
    };

    let row = |session: &Session| -> Html {
        let id = session.row_id().to_string();
        let hijri = session.date_hijri.clone().unwrap_or_else(|| "-".to_string());

        if let Some(editing) = sessions.table.editing().filter(|editing| editing.row_id == id) {
            let buffer = &editing.buffer;
            let on_student = on_field.reform(|e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                SessionField::StudentName(select.value())
            });
            // A session may point at a name no longer in the list
            let orphaned = !students.iter().any(|s| s.name == buffer.student_name);
            return html! {
                <tr key={id} class="editing">
                    <td>{hijri}</td>
                    <td>
                        <input
                            type="date"
                            value={buffer.date_gregorian.clone()}
                            oninput={on_field.reform(|e: InputEvent| SessionField::Date(input_value(e)))}
                        />
                    </td>
                    <td>
                        <select class="form-select" onchange={on_student}>
                            if orphaned {
                                <option value={buffer.student_name.clone()} selected=true>
                                    {buffer.student_name.clone()}
                                </option>
                            }
                            { for students.iter().map(|student| html! {
                                <option
                                    key={student.id.clone()}
                                    value={student.name.clone()}
                                    selected={student.name == buffer.student_name}
                                >
                                    {student.name.clone()}
                                </option>
                            }) }
                        </select>
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
                    <td class="actions">
                        <button class="btn btn-save" onclick={on_save.clone()}>{"حفظ"}</button>
                        <button class="btn btn-cancel" onclick={on_cancel.clone()}>{"إلغاء"}</button>
                    </td>
                </tr>
            };
        }

        let on_edit = {
            let sessions = sessions.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| sessions.begin_edit(id.clone()))
        };
        let on_delete = {
            let sessions = sessions.clone();
            let api_client = api_client.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| {
                let api_client = api_client.clone();
                sessions.delete(&id, DELETE_QUESTION, DELETE_FAILED, move |target| async move {
                    api_client.delete_session(&target).await
                });
            })
        };
        let review_level = session
            .review_level
            .map(|level| level.label())
            .unwrap_or("-");

        html! {
            <tr key={id}>
                <td>{hijri}</td>
                <td>{display_date(&session.date_gregorian)}</td>
                <td>{session.student_name.clone()}</td>
                <td>{session.new_lesson.clone()}</td>
                <td>{session.level.label()}</td>
                <td>{session.review.clone()}</td>
                <td>{review_level}</td>
                <td class="actions">
                    <button class="btn btn-edit" onclick={on_edit}>{"تعديل"}</button>
                    <button class="btn btn-delete" onclick={on_delete}>{"حذف"}</button>
                </td>
            </tr>
        }
    };

    let body = if sessions.table.is_loading() {
        html! {
            <tr><td colspan={COLUMNS.to_string()}><LoadingSpinner /></td></tr>
        }
    } else {
        html! { <>{ for sessions.table.rows().iter().map(row) }</> }
    };

    html! {
        <div class="page sessions-page">
            <div class="card">
                <h2>{"سجل الجلسات"}</h2>
                <div class="table-wrapper">
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"التاريخ الهجري"}</th>
                                <th>{"التاريخ الميلادي"}</th>
                                <th>{"الطالب"}</th>
                                <th>{"درس جديد"}</th>
                                <th>{"المستوى"}</th>
                                <th>{"مراجعة"}</th>
                                <th>{"المستوى"}</th>
                                <th>{"الإجراءات"}</th>
                            </tr>
                        </thead>
                        <tbody>{body}</tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
