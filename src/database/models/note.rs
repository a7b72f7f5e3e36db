use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub type NoteId = Uuid;

/// A persisted note as exposed to its owner.
///
/// Timestamps are milliseconds since the Unix epoch. `updated_at` is never
/// behind `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields of a note about to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
}

/// Replacement values applied by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub title: String,
    pub content: String,
    pub updated_at: i64,
}

impl Note {
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}
