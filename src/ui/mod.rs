//! Terminal-facing notes UI: list view model, editor form, and the page that
//! binds them to a backend.

pub mod backend;
pub mod editor;
pub mod list;
pub mod page;

pub use backend::{NotesBackend, ServiceBackend};
pub use editor::{
    EditorMode, EditorPhase, NoteEditor, Notice, NoticeLevel, SaveOutcome, SaveRequest,
};
pub use list::{CardAction, NoteCard, NotesListView};
pub use page::{NotesPage, SaveReport};
