use async_trait::async_trait;

use crate::database::manager::StoreError;
use crate::database::models::{NewNote, Note, NoteId, NotePatch};

/// Collection name shared by every backend.
pub const NOTES_COLLECTION: &str = "notes";

/// Persistence contract for the `notes` collection.
///
/// Each call is a single record-level read or write. Ownership checks are the
/// service's job; stores never filter by caller except in `list_by_owner`.
#[async_trait]
pub trait NoteStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// Insert a note with `updated_at = created_at` and return its new id.
    async fn insert(&self, note: NewNote) -> Result<NoteId, StoreError>;

    async fn get(&self, id: NoteId) -> Result<Option<Note>, StoreError>;

    /// Apply `patch`. Returns false when no record with `id` exists.
    async fn patch(&self, id: NoteId, patch: NotePatch) -> Result<bool, StoreError>;

    /// Returns false when no record with `id` exists.
    async fn delete(&self, id: NoteId) -> Result<bool, StoreError>;

    /// All notes owned by `owner_id`, most recently inserted first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
