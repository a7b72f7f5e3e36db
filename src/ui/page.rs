use crate::database::{Note, NoteId};
use crate::ui::backend::NotesBackend;
use crate::ui::editor::{NoteEditor, Notice};
use crate::ui::list::{CardAction, NotesListView};

/// Notices from a page save, plus the id the backend returned for the note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub notices: Vec<Notice>,
    pub id: Option<NoteId>,
}

/// Notes list plus editor, bound to one backend.
///
/// There is no live subscription: after every successful mutation the page
/// re-issues the list call itself.
pub struct NotesPage<B: NotesBackend> {
    backend: B,
    notes: Option<Vec<Note>>,
    view: NotesListView,
    editor: NoteEditor,
}

impl<B: NotesBackend> NotesPage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            notes: None,
            view: NotesListView::Loading,
            editor: NoteEditor::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn view(&self) -> &NotesListView {
        &self.view
    }

    pub fn notes(&self) -> Option<&[Note]> {
        self.notes.as_deref()
    }

    pub fn editor(&self) -> &NoteEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut NoteEditor {
        &mut self.editor
    }

    /// Fetch the list again. On failure the previous view stays.
    pub async fn refresh(&mut self) -> Result<(), Notice> {
        match self.backend.list_notes().await {
            Ok(notes) => {
                self.view = NotesListView::from_result(Some(&notes));
                self.notes = Some(notes);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Loading notes failed: {}", e);
                Err(Notice::error("Failed to load notes"))
            }
        }
    }

    pub fn open_create(&mut self) -> bool {
        self.editor.open_create()
    }

    /// Open the editor on a note from the loaded list
    pub fn open_edit(&mut self, id: NoteId) -> Result<(), Notice> {
        let note = self
            .notes
            .as_deref()
            .and_then(|notes| notes.iter().find(|n| n.id == id))
            .cloned()
            .ok_or_else(|| Notice::error("Note not found"))?;

        if self.editor.open_edit(note) {
            Ok(())
        } else {
            Err(Notice::error("Editor is busy"))
        }
    }

    /// Both card actions open the editor on the note; deleting happens from there
    pub fn open_card(&mut self, id: NoteId, action: CardAction) -> Result<(), Notice> {
        match action {
            CardAction::Edit | CardAction::Delete => self.open_edit(id),
        }
    }

    pub fn close_editor(&mut self) -> bool {
        self.editor.close()
    }

    /// Save the editor, then refresh on success. The mutation notice comes
    /// first. `id` is what the backend returned, not a guess from the list.
    pub async fn save(&mut self) -> SaveReport {
        let outcome = self.editor.save(&self.backend).await;
        let notices = self.after_mutation(Some(outcome.notice)).await;
        SaveReport {
            notices,
            id: outcome.id,
        }
    }

    pub async fn delete<F>(&mut self, confirm: F) -> Vec<Notice>
    where
        F: FnOnce(&str) -> bool,
    {
        let notice = self.editor.delete(&self.backend, confirm).await;
        self.after_mutation(notice).await
    }

    async fn after_mutation(&mut self, notice: Option<Notice>) -> Vec<Notice> {
        let Some(notice) = notice else {
            return Vec::new();
        };

        let succeeded = notice.is_success();
        let mut notices = vec![notice];
        if succeeded {
            if let Err(refresh_failed) = self.refresh().await {
                notices.push(refresh_failed);
            }
        }
        notices
    }
}
