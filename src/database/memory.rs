use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::database::models::{NewNote, Note, NoteId, NotePatch};
use crate::database::store::NoteStore;

struct StoredNote {
    seq: u64,
    note: Note,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    notes: HashMap<NoteId, StoredNote>,
}

/// Process-local store used in development and tests.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: RwLock<Inner>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, note: NewNote) -> Result<NoteId, StoreError> {
        let mut inner = self.inner.write().await;
        let id = Uuid::new_v4();
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.notes.insert(
            id,
            StoredNote {
                seq,
                note: Note {
                    id,
                    owner_id: note.owner_id,
                    title: note.title,
                    content: note.content,
                    created_at: note.created_at,
                    updated_at: note.created_at,
                },
            },
        );
        Ok(id)
    }

    async fn get(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self.inner.read().await.notes.get(&id).map(|s| s.note.clone()))
    }

    async fn patch(&self, id: NoteId, patch: NotePatch) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.notes.get_mut(&id) {
            Some(stored) => {
                stored.note.title = patch.title;
                stored.note.content = patch.content;
                stored.note.updated_at = patch.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: NoteId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.notes.remove(&id).is_some())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.read().await;
        let mut owned: Vec<&StoredNote> = inner
            .notes
            .values()
            .filter(|s| s.note.owner_id == owner_id)
            .collect();
        owned.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(owned.into_iter().map(|s| s.note.clone()).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
