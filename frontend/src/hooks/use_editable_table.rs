use std::future::Future;
use std::ops::Deref;
use std::rc::Rc;

use shared::{EditBuffer, EditError, EditableRow, EditableTable, TableAction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiError;
use crate::services::logging::Logger;
use crate::services::notify::{confirm, report_failure};

const LOAD_FAILED_MESSAGE: &str = "تعذر تحميل البيانات";

/// Reducer state wrapping the pure table state machine
pub struct TableStore<R: EditableRow>(EditableTable<R>);

impl<R: EditableRow> Default for TableStore<R> {
    fn default() -> Self {
        Self(EditableTable::new())
    }
}

impl<R: EditableRow> PartialEq for TableStore<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: EditableRow> Deref for TableStore<R> {
    type Target = EditableTable<R>;

    fn deref(&self) -> &EditableTable<R> {
        &self.0
    }
}

impl<R: EditableRow + 'static> Reducible for TableStore<R> {
    type Action = TableAction<R>;

    fn reduce(self: Rc<Self>, action: TableAction<R>) -> Rc<Self> {
        let mut table = self.0.clone();
        table.apply(action);
        Rc::new(Self(table))
    }
}

/// A fetched, editable table plus the calls that drive it.
///
/// Every mutation goes through [`UseEditableTable::mutate`], which re-fetches
/// the whole list on success. Nothing is patched locally.
pub struct UseEditableTable<R: EditableRow + 'static> {
    pub table: UseReducerHandle<TableStore<R>>,
    pub refresh: Callback<()>,
    component: &'static str,
}

impl<R: EditableRow + 'static> Clone for UseEditableTable<R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            refresh: self.refresh.clone(),
            component: self.component,
        }
    }
}

impl<R: EditableRow + 'static> UseEditableTable<R> {
    pub fn begin_edit(&self, row_id: String) {
        self.table.dispatch(TableAction::BeginEdit(row_id));
    }

    pub fn cancel_edit(&self) {
        self.table.dispatch(TableAction::CancelEdit);
    }

    pub fn modify(&self, change: impl FnOnce(&mut R::Buffer) + 'static) {
        self.table.dispatch(TableAction::ModifyBuffer(Box::new(change)));
    }

    /// Send the buffered edit. The row stays in edit state if anything fails.
    pub fn save<Fut>(
        &self,
        failure_message: &'static str,
        send: impl FnOnce(String, <R::Buffer as EditBuffer>::Request) -> Fut,
    ) where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let (row_id, request) = match self.table.pending_save() {
            Ok(pending) => pending,
            Err(EditError::NotEditing) => return,
            Err(e @ EditError::Invalid(_)) => {
                report_failure(self.component, "Rejected edit", e, failure_message);
                return;
            }
        };

        let dispatcher = self.table.dispatcher();
        let refresh = self.refresh.clone();
        let component = self.component;
        let request = send(row_id.clone(), request);
        spawn_local(async move {
            match request.await {
                Ok(()) => {
                    dispatcher.dispatch(TableAction::SaveSucceeded(row_id));
                    refresh.emit(());
                }
                Err(e) => {
                    dispatcher.dispatch(TableAction::SaveFailed);
                    report_failure(component, "Failed to save row", e, failure_message);
                }
            }
        });
    }

    /// Ask `question`, then delete. Rows in edit state and declined prompts
    /// send nothing.
    pub fn delete<Fut>(
        &self,
        row_id: &str,
        question: &str,
        failure_message: &'static str,
        send: impl FnOnce(String) -> Fut,
    ) where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        if let Some(target) = self.table.delete_target(row_id, || confirm(question)) {
            self.mutate(failure_message, send(target));
        }
    }

    /// Run any other mutation, re-fetching on success
    pub fn mutate<Fut>(&self, failure_message: &'static str, request: Fut)
    where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        self.mutate_then(failure_message, request, || ());
    }

    /// Like [`Self::mutate`], running `on_success` before the re-fetch
    pub fn mutate_then<Fut>(
        &self,
        failure_message: &'static str,
        request: Fut,
        on_success: impl FnOnce() + 'static,
    ) where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let refresh = self.refresh.clone();
        let component = self.component;
        spawn_local(async move {
            match request.await {
                Ok(()) => {
                    on_success();
                    refresh.emit(());
                }
                Err(e) => report_failure(component, "Request failed", e, failure_message),
            }
        });
    }
}

/// Keep a table of `R` fetched with `fetch`.
///
/// The table loads on mount and again whenever `deps` change. The loading
/// flag is raised on every fetch, re-fetches included.
#[hook]
pub fn use_editable_table<R, D, F, Fut>(
    component: &'static str,
    deps: D,
    fetch: F,
) -> UseEditableTable<R>
where
    R: EditableRow + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<R>, ApiError>> + 'static,
{
    let table = use_reducer(TableStore::<R>::default);

    let refresh = {
        let dispatcher = table.dispatcher();
        use_callback(deps.clone(), move |_: (), deps: &D| {
            let dispatcher = dispatcher.clone();
            let request = fetch(deps.clone());
            dispatcher.dispatch(TableAction::FetchStarted);
            spawn_local(async move {
                match request.await {
                    Ok(rows) => {
                        Logger::debug_with_component(
                            component,
                            &format!("Loaded {} rows", rows.len()),
                        );
                        dispatcher.dispatch(TableAction::Loaded(rows));
                    }
                    Err(e) => {
                        dispatcher.dispatch(TableAction::LoadFailed);
                        report_failure(component, "Failed to fetch rows", e, LOAD_FAILED_MESSAGE);
                    }
                }
            });
        })
    };

    use_effect_with(deps, {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    UseEditableTable {
        table,
        refresh,
        component,
    }
}
