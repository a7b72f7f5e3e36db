pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseManager, StoreError};
pub use memory::MemoryNoteStore;
pub use models::{NewNote, Note, NoteId, NotePatch};
pub use postgres::PgNoteStore;
pub use store::{NoteStore, NOTES_COLLECTION};
