use shared::{adopt_new_student, Level, SessionDraft, SessionField, Student, StudentDraft};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::level_select::LevelSelect;
use crate::hooks::use_api_client::use_api_client;
use crate::services::logging::Logger;

const COMPONENT: &str = "session-form";

#[derive(Clone, PartialEq)]
enum FormMessage {
    Success(&'static str),
    Error(&'static str),
}

/// Form that records a new session, with a quick-add sub-form for students.
///
/// The selected student survives a successful submit so several sessions
/// for the same student can be logged in a row.
#[function_component(SessionForm)]
pub fn session_form() -> Html {
    let api_client = use_api_client();
    let students = use_state(Vec::<Student>::new);
    let draft = use_state(SessionDraft::default);
    let student_draft = use_state(StudentDraft::default);
    let show_add_student = use_state(|| false);
    let message = use_state(|| Option::<FormMessage>::None);

    // Load students once and preselect the first one
    {
        let api_client = api_client.clone();
        let students = students.clone();
        let draft = draft.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.list_students().await {
                    Ok(list) => {
                        let mut next = (*draft).clone();
                        next.select_default_student(&list);
                        draft.set(next);
                        students.set(list);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to fetch students: {}", e),
                        );
                    }
                }
            });
            || ()
        });
    }

    let on_text = |make: fn(String) -> SessionField| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.set(make(input.value()));
            draft.set(next);
        })
    };

    let on_level = |make: fn(Level) -> SessionField| {
        let draft = draft.clone();
        Callback::from(move |level| {
            let mut next = (*draft).clone();
            next.set(make(level));
            draft.set(next);
        })
    };

    let on_student_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.set(SessionField::StudentName(select.value()));
            draft.set(next);
        })
    };

    let on_submit = {
        let api_client = api_client.clone();
        let draft = draft.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            message.set(None);

            let payload = match draft.to_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    Logger::warn_with_component(COMPONENT, &format!("Incomplete session: {}", e));
                    message.set(Some(FormMessage::Error("خطأ في حفظ الجلسة.")));
                    return;
                }
            };

            let api_client = api_client.clone();
            let draft = draft.clone();
            let message = message.clone();
            spawn_local(async move {
                match api_client.create_session(&payload).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("Session saved for {}", payload.student_name),
                        );
                        let mut next = (*draft).clone();
                        next.reset_keeping_student();
                        draft.set(next);
                        message.set(Some(FormMessage::Success("تم حفظ الجلسة بنجاح!")));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to save session: {}", e),
                        );
                        message.set(Some(FormMessage::Error("خطأ في حفظ الجلسة.")));
                    }
                }
            });
        })
    };

    let toggle_add_student = {
        let show_add_student = show_add_student.clone();
        Callback::from(move |_: MouseEvent| show_add_student.set(!*show_add_student))
    };

    let on_new_name = {
        let student_draft = student_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            student_draft.set(StudentDraft {
                name: input.value(),
                ..(*student_draft).clone()
            });
        })
    };

    let on_new_age = {
        let student_draft = student_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            student_draft.set(StudentDraft {
                age: input.value(),
                ..(*student_draft).clone()
            });
        })
    };

    let on_add_student = {
        let api_client = api_client.clone();
        let students = students.clone();
        let draft = draft.clone();
        let student_draft = student_draft.clone();
        let show_add_student = show_add_student.clone();
        let message = message.clone();
        Callback::from(move |_: MouseEvent| {
            let request = match student_draft.to_request() {
                Ok(Some(request)) => request,
                Ok(None) => return,
                Err(e) => {
                    Logger::warn_with_component(COMPONENT, &format!("Invalid student: {}", e));
                    message.set(Some(FormMessage::Error("خطأ في إضافة الطالب.")));
                    return;
                }
            };

            let api_client = api_client.clone();
            let students = students.clone();
            let draft = draft.clone();
            let student_draft = student_draft.clone();
            let show_add_student = show_add_student.clone();
            let message = message.clone();
            spawn_local(async move {
                match api_client.create_student(&request).await {
                    Ok(created) => {
                        let mut list = (*students).clone();
                        let mut next = (*draft).clone();
                        adopt_new_student(&mut list, &mut next, created);
                        students.set(list);
                        draft.set(next);
                        student_draft.set(StudentDraft::default());
                        show_add_student.set(false);
                        message.set(Some(FormMessage::Success("تم إضافة الطالب بنجاح!")));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to add student: {}", e),
                        );
                        message.set(Some(FormMessage::Error("خطأ في إضافة الطالب.")));
                    }
                }
            });
        })
    };

    let message_html = match &*message {
        Some(FormMessage::Success(text)) => html! { <p class="form-message success">{*text}</p> },
        Some(FormMessage::Error(text)) => html! { <p class="form-message error">{*text}</p> },
        None => html! {},
    };

    html! {
        <div class="card session-form">
            <h2>{"تسجيل جلسة قرآن"}</h2>
            {message_html}
            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label for="student-name">{"اسم الطالب"}</label>
                    <div class="inline-row">
                        <select id="student-name" class="form-select" onchange={on_student_change}>
                            { for students.iter().map(|student| html! {
                                <option
                                    key={student.id.clone()}
                                    value={student.name.clone()}
                                    selected={student.name == draft.student_name}
                                >
                                    {student.name.clone()}
                                </option>
                            }) }
                        </select>
                        <button type="button" class="btn btn-secondary" title="إضافة طالب جديد" onclick={toggle_add_student}>
                            {"+"}
                        </button>
                    </div>
                </div>

                if *show_add_student {
                    <div class="add-student">
                        <label for="new-student-name">{"اسم الطالب الجديد"}</label>
                        <input
                            id="new-student-name"
                            type="text"
                            placeholder="أدخل الاسم"
                            value={student_draft.name.clone()}
                            oninput={on_new_name}
                        />
                        <label for="new-student-age">{"العمر"}</label>
                        <div class="inline-row">
                            <input
                                id="new-student-age"
                                type="number"
                                placeholder="أدخل العمر (اختياري)"
                                value={student_draft.age.clone()}
                                oninput={on_new_age}
                            />
                            <button type="button" class="btn btn-primary" onclick={on_add_student}>
                                {"إضافة"}
                            </button>
                        </div>
                    </div>
                }

                <div class="form-group">
                    <label for="new-lesson">{"درس جديد"}</label>
                    <input
                        id="new-lesson"
                        type="text"
                        placeholder="مثال: القلم 1:42"
                        required=true
                        value={draft.new_lesson.clone()}
                        oninput={on_text(SessionField::NewLesson)}
                    />
                </div>
                <div class="form-group">
                    <label for="level">{"المستوى"}</label>
                    <LevelSelect id="level" value={draft.level} on_change={on_level(SessionField::Level)} />
                </div>
                <div class="form-group">
                    <label for="review">{"مراجعة"}</label>
                    <input
                        id="review"
                        type="text"
                        placeholder="مثال: الملك"
                        required=true
                        value={draft.review.clone()}
                        oninput={on_text(SessionField::Review)}
                    />
                </div>
                <div class="form-group">
                    <label for="review-level">{"المستوى"}</label>
                    <LevelSelect
                        id="review-level"
                        value={draft.review_level}
                        on_change={on_level(SessionField::ReviewLevel)}
                    />
                </div>
                <button type="submit" class="btn btn-primary btn-block">{"حفظ الجلسة"}</button>
            </form>
        </div>
    }
}
