//! Per-user note operations.
//!
//! Every operation takes the caller explicitly. `None` fails with
//! `Unauthenticated` before the store is touched. Update and delete refuse
//! notes the caller does not own with the same error they use for missing
//! notes, so callers cannot probe for other users' records.

use std::sync::Arc;

use thiserror::Error;

use crate::auth::Identity;
use crate::clock::{Clock, SystemClock};
use crate::database::{NewNote, Note, NoteId, NotePatch, NoteStore, StoreError};

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Note {0} not found")]
    NotFoundOrForbidden(NoteId),

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Trimmed, validated title and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn parse(title: &str, content: &str) -> Result<Self, NoteError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NoteError::Validation {
                field: "title",
                message: "Title is required".to_string(),
            });
        }

        Ok(Self {
            title: title.to_string(),
            content: content.trim().to_string(),
        })
    }
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    clock: Arc<dyn Clock>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn NoteStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    /// All of the caller's notes, most recently created first
    pub async fn list(&self, caller: Option<&Identity>) -> Result<Vec<Note>, NoteError> {
        let caller = require_identity(caller)?;
        Ok(self.store.list_by_owner(caller.subject()).await?)
    }

    pub async fn create(
        &self,
        caller: Option<&Identity>,
        title: &str,
        content: &str,
    ) -> Result<NoteId, NoteError> {
        let caller = require_identity(caller)?;
        let input = NoteInput::parse(title, content)?;

        let id = self
            .store
            .insert(NewNote {
                owner_id: caller.subject().to_string(),
                title: input.title,
                content: input.content,
                created_at: self.clock.now_millis(),
            })
            .await?;

        tracing::info!(owner = caller.subject(), note = %id, "Created note");
        Ok(id)
    }

    /// Replace title and content. `updated_at` always moves forward, even
    /// when the clock has not.
    pub async fn update(
        &self,
        caller: Option<&Identity>,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<NoteId, NoteError> {
        let caller = require_identity(caller)?;
        let input = NoteInput::parse(title, content)?;
        let existing = self.owned_note(caller, id).await?;

        let updated_at = self.clock.now_millis().max(existing.updated_at + 1);
        let patched = self
            .store
            .patch(
                id,
                NotePatch {
                    title: input.title,
                    content: input.content,
                    updated_at,
                },
            )
            .await?;

        // Deleted between lookup and patch
        if !patched {
            return Err(NoteError::NotFoundOrForbidden(id));
        }

        tracing::info!(owner = caller.subject(), note = %id, "Updated note");
        Ok(id)
    }

    pub async fn delete(&self, caller: Option<&Identity>, id: NoteId) -> Result<bool, NoteError> {
        let caller = require_identity(caller)?;
        self.owned_note(caller, id).await?;

        if !self.store.delete(id).await? {
            return Err(NoteError::NotFoundOrForbidden(id));
        }

        tracing::info!(owner = caller.subject(), note = %id, "Deleted note");
        Ok(true)
    }

    async fn owned_note(&self, caller: &Identity, id: NoteId) -> Result<Note, NoteError> {
        match self.store.get(id).await? {
            Some(note) if note.is_owned_by(caller.subject()) => Ok(note),
            _ => {
                tracing::debug!(owner = caller.subject(), note = %id, "Note missing or not owned");
                Err(NoteError::NotFoundOrForbidden(id))
            }
        }
    }
}

fn require_identity(caller: Option<&Identity>) -> Result<&Identity, NoteError> {
    caller.ok_or(NoteError::Unauthenticated)
}
