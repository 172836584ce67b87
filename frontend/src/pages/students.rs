use shared::{EditableRow, Student, StudentEditBuffer, StudentField};
use yew::prelude::*;

use crate::components::input_value;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::student_details_modal::StudentDetailsModal;
use crate::hooks::use_api_client::use_api_client;
use crate::hooks::use_editable_table::use_editable_table;
use crate::services::api::ApiClient;

const COMPONENT: &str = "students-page";
const UPDATE_FAILED: &str = "خطأ في تحديث الطالب";
const DELETE_FAILED: &str = "خطأ في حذف الطالب";
const DELETE_QUESTION: &str = "هل أنت متأكد من حذف هذا الطالب؟ سيتم حذف جميع الجلسات المرتبطة به.";
const COLUMNS: usize = 4;

#[function_component(StudentsPage)]
pub fn students_page() -> Html {
    let api_client = use_api_client();
    let students = use_editable_table(
        COMPONENT,
        api_client.clone(),
        |api_client: ApiClient| async move { api_client.list_students().await },
    );
    let selected = use_state(|| Option::<Student>::None);

    let on_field: Callback<StudentField> = {
        let students = students.clone();
        Callback::from(move |field| {
            students.modify(move |buffer: &mut StudentEditBuffer| buffer.set(field))
        })
    };

    let on_save = {
        let students = students.clone();
        let api_client = api_client.clone();
        Callback::from(move |_: MouseEvent| {
            let api_client = api_client.clone();
            students.save(UPDATE_FAILED, move |id, request| async move {
                api_client.update_student(&id, &request).await
            });
        })
    };

    let on_cancel = {
        let students = students.clone();
        Callback::from(move |_: MouseEvent| students.cancel_edit())
    };

    let on_close_details = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };

    let row = |student: &Student| -> Html {
        let id = student.row_id().to_string();

        if let Some(editing) = students.table.editing().filter(|editing| editing.row_id == id) {
            let buffer = &editing.buffer;
            return html! {
                <tr key={id} class="editing">
                    <td>
                        <input
                            type="text"
                            value={buffer.name.clone()}
                            oninput={on_field.reform(|e: InputEvent| StudentField::Name(input_value(e)))}
                        />
                    </td>
                    <td>
                        <input
                            type="number"
                            value={buffer.age.clone()}
                            oninput={on_field.reform(|e: InputEvent| StudentField::Age(input_value(e)))}
                        />
                    </td>
                    <td>{student.session_count}</td>
                    <td class="actions">
                        <button class="btn btn-save" onclick={on_save.clone()}>{"حفظ"}</button>
                        <button class="btn btn-cancel" onclick={on_cancel.clone()}>{"إلغاء"}</button>
                    </td>
                </tr>
            };
        }

        let on_edit = {
            let students = students.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| students.begin_edit(id.clone()))
        };
        let on_delete = {
            let students = students.clone();
            let api_client = api_client.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| {
                let api_client = api_client.clone();
                students.delete(&id, DELETE_QUESTION, DELETE_FAILED, move |target| async move {
                    api_client.delete_student(&target).await
                });
            })
        };
        let on_details = {
            let selected = selected.clone();
            let student = student.clone();
            Callback::from(move |_: MouseEvent| selected.set(Some(student.clone())))
        };
        let age = student
            .age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "-".to_string());

        html! {
            <tr key={id}>
                <td>{student.name.clone()}</td>
                <td>{age}</td>
                <td>
                    {student.session_count}
                    if student.unpaid_session_count > 0 {
                        <span class="badge badge-unpaid" title="حصص غير مدفوعة">
                            {student.unpaid_session_count}
                        </span>
                    }
                </td>
                <td class="actions">
                    <button class="btn btn-details" onclick={on_details}>{"التفاصيل"}</button>
                    <button class="btn btn-edit" onclick={on_edit}>{"تعديل"}</button>
                    <button class="btn btn-delete" onclick={on_delete}>{"حذف"}</button>
                </td>
            </tr>
        }
    };

    let body = if students.table.is_loading() {
        html! {
            <tr><td colspan={COLUMNS.to_string()}><LoadingSpinner /></td></tr>
        }
    } else {
        html! { <>{ for students.table.rows().iter().map(row) }</> }
    };

    html! {
        <div class="page students-page">
            <div class="card">
                <h2>{"قائمة الطلاب"}</h2>
                <div class="table-wrapper">
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"الاسم"}</th>
                                <th>{"العمر"}</th>
                                <th>{"عدد الجلسات"}</th>
                                <th>{"الإجراءات"}</th>
                            </tr>
                        </thead>
                        <tbody>{body}</tbody>
                    </table>
                </div>
            </div>
            if let Some(student) = (*selected).clone() {
                <StudentDetailsModal {student} on_close={on_close_details} />
            }
        </div>
    }
}
