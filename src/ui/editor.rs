//! Note editor form.
//!
//! ```text
//! Closed ──open_create/open_edit──▶ Open ──save──▶ Saving ──ok──▶ Closed
//!                                    ▲  │                 └─err──▶ Open
//!                                    │  └─delete (confirmed)──▶ Deleting ──ok──▶ Closed
//!                                    └──────────────────────────────err──┘
//! ```
//!
//! A blank title keeps the form open and never reaches the backend. While a
//! save or delete is in flight every input is disabled. Failures restore the
//! form with the user's input intact.

use std::fmt::Display;

use crate::database::{Note, NoteId};
use crate::ui::backend::NotesBackend;

pub const CONFIRM_DELETE_PROMPT: &str = "Are you sure you want to delete this note?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(Note),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Closed,
    Open,
    Saving,
    Deleting,
}

/// What a validated save asks the backend to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create {
        title: String,
        content: String,
    },
    Update {
        id: NoteId,
        title: String,
        content: String,
    },
}

/// Result of a save: the notice to show and, on success, the saved note's id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub notice: Notice,
    pub id: Option<NoteId>,
}

impl SaveOutcome {
    fn rejected(notice: Notice) -> Self {
        Self { notice, id: None }
    }

    pub fn is_success(&self) -> bool {
        self.notice.is_success()
    }
}

#[derive(Debug, Clone)]
pub struct NoteEditor {
    phase: EditorPhase,
    mode: EditorMode,
    title: String,
    content: String,
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self {
            phase: EditorPhase::Closed,
            mode: EditorMode::Create,
            title: String::new(),
            content: String::new(),
        }
    }
}

impl NoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_open(&self) -> bool {
        self.phase != EditorPhase::Closed
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, EditorPhase::Saving | EditorPhase::Deleting)
    }

    pub fn inputs_enabled(&self) -> bool {
        self.phase == EditorPhase::Open
    }

    pub fn editing_id(&self) -> Option<NoteId> {
        match &self.mode {
            EditorMode::Edit(note) => Some(note.id),
            EditorMode::Create => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Create New Note",
            EditorMode::Edit(_) => "Edit Note",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add a new note to your collection",
            EditorMode::Edit(_) => "Update your note details",
        }
    }

    pub fn save_label(&self) -> &'static str {
        if self.is_busy() {
            "Saving..."
        } else {
            "Save"
        }
    }

    /// Open with an empty form. Refused while busy.
    pub fn open_create(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.mode = EditorMode::Create;
        self.title.clear();
        self.content.clear();
        self.phase = EditorPhase::Open;
        true
    }

    /// Open pre-filled from `note`. Refused while busy.
    pub fn open_edit(&mut self, note: Note) -> bool {
        if self.is_busy() {
            return false;
        }
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.mode = EditorMode::Edit(note);
        self.phase = EditorPhase::Open;
        true
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        if !self.inputs_enabled() {
            return false;
        }
        self.title = title.into();
        true
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        if !self.inputs_enabled() {
            return false;
        }
        self.content = content.into();
        true
    }

    /// Cancel. Refused while busy.
    pub fn close(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = EditorPhase::Closed;
        true
    }

    /// Validate and move to `Saving`. A blank title leaves the form open.
    pub fn begin_save(&mut self) -> Result<SaveRequest, Notice> {
        if self.phase != EditorPhase::Open {
            return Err(Notice::error("Nothing to save"));
        }

        let title = self.title.trim();
        if title.is_empty() {
            return Err(Notice::error("Please enter a title"));
        }

        let title = title.to_string();
        let content = self.content.trim().to_string();
        let request = match &self.mode {
            EditorMode::Create => SaveRequest::Create { title, content },
            EditorMode::Edit(note) => SaveRequest::Update {
                id: note.id,
                title,
                content,
            },
        };

        self.phase = EditorPhase::Saving;
        Ok(request)
    }

    /// Settle a save with the id the backend returned
    pub fn finish_save<E: Display>(&mut self, outcome: Result<NoteId, E>) -> SaveOutcome {
        if self.phase != EditorPhase::Saving {
            return SaveOutcome::rejected(Notice::error("No save in progress"));
        }

        let creating = self.mode == EditorMode::Create;
        match outcome {
            Ok(id) => {
                self.phase = EditorPhase::Closed;
                SaveOutcome {
                    notice: Notice::success(if creating {
                        "Note created successfully"
                    } else {
                        "Note updated successfully"
                    }),
                    id: Some(id),
                }
            }
            Err(e) => {
                tracing::warn!("Saving note failed: {}", e);
                self.phase = EditorPhase::Open;
                SaveOutcome::rejected(Notice::error(if creating {
                    "Failed to create note"
                } else {
                    "Failed to update note"
                }))
            }
        }
    }

    /// Move to `Deleting` if editing an existing note and the user confirmed.
    pub fn begin_delete(&mut self, confirmed: bool) -> Option<NoteId> {
        if self.phase != EditorPhase::Open || !confirmed {
            return None;
        }
        let id = self.editing_id()?;
        self.phase = EditorPhase::Deleting;
        Some(id)
    }

    pub fn finish_delete<E: Display>(&mut self, outcome: Result<(), E>) -> Notice {
        if self.phase != EditorPhase::Deleting {
            return Notice::error("No delete in progress");
        }

        match outcome {
            Ok(()) => {
                self.phase = EditorPhase::Closed;
                Notice::success("Note deleted successfully")
            }
            Err(e) => {
                tracing::warn!("Deleting note failed: {}", e);
                self.phase = EditorPhase::Open;
                Notice::error("Failed to delete note")
            }
        }
    }

    /// Validate, then create or update through `backend`
    pub async fn save<B: NotesBackend>(&mut self, backend: &B) -> SaveOutcome {
        let request = match self.begin_save() {
            Ok(request) => request,
            Err(notice) => return SaveOutcome::rejected(notice),
        };

        let outcome = match request {
            SaveRequest::Create { title, content } => backend.create_note(&title, &content).await,
            SaveRequest::Update { id, title, content } => {
                backend.update_note(id, &title, &content).await
            }
        };
        self.finish_save(outcome)
    }

    /// Ask `confirm` first; `None` when there was nothing to do.
    pub async fn delete<B, F>(&mut self, backend: &B, confirm: F) -> Option<Notice>
    where
        B: NotesBackend,
        F: FnOnce(&str) -> bool,
    {
        if self.phase != EditorPhase::Open || self.editing_id().is_none() {
            return None;
        }

        let id = self.begin_delete(confirm(CONFIRM_DELETE_PROMPT))?;
        let outcome = backend.delete_note(id).await.map(|_| ());
        Some(self.finish_delete(outcome))
    }
}
