use async_trait::async_trait;

use crate::auth::Identity;
use crate::database::{Note, NoteId};
use crate::services::{NoteError, NoteService};

/// The four note operations as seen from the UI.
///
/// The caller's identity is fixed by the implementation: a bearer token for
/// the HTTP client, an explicit `Identity` for the in-process adapter.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_notes(&self) -> Result<Vec<Note>, Self::Error>;

    async fn create_note(&self, title: &str, content: &str) -> Result<NoteId, Self::Error>;

    async fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<NoteId, Self::Error>;

    async fn delete_note(&self, id: NoteId) -> Result<bool, Self::Error>;
}

/// Drives a `NoteService` directly on behalf of one caller
#[derive(Clone)]
pub struct ServiceBackend {
    service: NoteService,
    caller: Option<Identity>,
}

impl ServiceBackend {
    pub fn new(service: NoteService, caller: Option<Identity>) -> Self {
        Self { service, caller }
    }
}

#[async_trait]
impl NotesBackend for ServiceBackend {
    type Error = NoteError;

    async fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        self.service.list(self.caller.as_ref()).await
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<NoteId, NoteError> {
        self.service.create(self.caller.as_ref(), title, content).await
    }

    async fn update_note(&self, id: NoteId, title: &str, content: &str) -> Result<NoteId, NoteError> {
        self.service
            .update(self.caller.as_ref(), id, title, content)
            .await
    }

    async fn delete_note(&self, id: NoteId) -> Result<bool, NoteError> {
        self.service.delete(self.caller.as_ref(), id).await
    }
}
