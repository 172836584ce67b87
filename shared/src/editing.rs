//! # Editable table state
//!
//! Every resource table in the app (students, sessions, one student's
//! session log) follows the same row lifecycle:
//!
//! - each row is either displayed or being edited
//! - at most one row per table is being edited; starting an edit on another
//!   row silently drops the previous buffer
//! - cancel discards the buffer without touching the network
//! - save sends the buffer; on success the editing id is cleared and the
//!   table re-fetches, on failure the buffer stays as it was
//! - delete is only offered from display state and needs a confirmation
//!
//! `EditableTable` holds that state and nothing else. Views drive it with
//! [`TableAction`]s and perform the requests themselves.

use std::fmt::Debug;

use thiserror::Error;

use crate::forms::FormError;

/// A row that can be edited in place.
pub trait EditableRow: Clone + PartialEq + Debug {
    type Buffer: EditBuffer + Clone + PartialEq + Debug;

    /// Server-assigned identity
    fn row_id(&self) -> &str;

    /// Snapshot of the row's current values for the edit buffer
    fn edit_buffer(&self) -> Self::Buffer;
}

/// Edit buffer that can be turned into a full-record update request.
pub trait EditBuffer {
    type Request;

    fn to_request(&self) -> Result<Self::Request, FormError>;
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("no row is being edited")]
    NotEditing,
    #[error(transparent)]
    Invalid(#[from] FormError),
}

/// Row currently in edit state
#[derive(Debug, Clone, PartialEq)]
pub struct Editing<B> {
    pub row_id: String,
    pub buffer: B,
}

pub enum TableAction<R: EditableRow> {
    /// A fetch of the whole collection was issued
    FetchStarted,
    /// The fetch resolved with the current collection
    Loaded(Vec<R>),
    /// The fetch failed; rows stay as they were
    LoadFailed,
    BeginEdit(String),
    ModifyBuffer(Box<dyn FnOnce(&mut R::Buffer)>),
    CancelEdit,
    /// The update for this row id was accepted
    SaveSucceeded(String),
    /// The update request failed; the buffer is kept for another attempt
    SaveFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditableTable<R: EditableRow> {
    rows: Vec<R>,
    loading: bool,
    editing: Option<Editing<R::Buffer>>,
}

impl<R: EditableRow> Default for EditableTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EditableRow> EditableTable<R> {
    /// A table that has not fetched yet. It starts in loading state because
    /// every view fetches on mount.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            loading: true,
            editing: None,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editing(&self) -> Option<&Editing<R::Buffer>> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, row_id: &str) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|editing| editing.row_id == row_id)
    }

    pub fn row(&self, row_id: &str) -> Option<&R> {
        self.rows.iter().find(|row| row.row_id() == row_id)
    }

    pub fn apply(&mut self, action: TableAction<R>) {
        match action {
            TableAction::FetchStarted => {
                self.loading = true;
            }
            TableAction::Loaded(rows) => {
                self.rows = rows;
                self.loading = false;
                // A row deleted elsewhere cannot stay in edit state
                if let Some(editing) = &self.editing {
                    if self.row(&editing.row_id).is_none() {
                        self.editing = None;
                    }
                }
            }
            TableAction::LoadFailed => {
                self.loading = false;
            }
            TableAction::BeginEdit(row_id) => {
                let buffer = self.row(&row_id).map(EditableRow::edit_buffer);
                if let Some(buffer) = buffer {
                    self.editing = Some(Editing { row_id, buffer });
                }
            }
            TableAction::ModifyBuffer(modify) => {
                if let Some(editing) = self.editing.as_mut() {
                    modify(&mut editing.buffer);
                }
            }
            TableAction::CancelEdit => {
                self.editing = None;
            }
            TableAction::SaveSucceeded(row_id) => {
                // A late reply must not drop an edit started on another row
                if self.is_editing(&row_id) {
                    self.editing = None;
                }
            }
            TableAction::SaveFailed => {}
        }
    }

    /// The update request for the row in edit state.
    ///
    /// Nothing changes here: the caller sends the request and then applies
    /// `SaveSucceeded` or `SaveFailed`.
    pub fn pending_save(
        &self,
    ) -> Result<(String, <R::Buffer as EditBuffer>::Request), EditError> {
        let editing = self.editing.as_ref().ok_or(EditError::NotEditing)?;
        let request = editing.buffer.to_request()?;
        Ok((editing.row_id.clone(), request))
    }

    /// Id to delete, if the row is in display state and `confirm` agrees.
    ///
    /// `confirm` is only asked for rows that may be deleted.
    pub fn delete_target(&self, row_id: &str, confirm: impl FnOnce() -> bool) -> Option<String> {
        if self.is_editing(row_id) || self.row(row_id).is_none() {
            return None;
        }
        confirm().then(|| row_id.to_string())
    }
}
