//! Notes list view model.
//!
//! Three states, driven purely by the latest list result: `Loading` before any
//! result, `Empty` for zero notes, `Populated` otherwise.

use chrono::{TimeZone, Utc};

use crate::database::{Note, NoteId};

pub const SKELETON_ROWS: usize = 3;
pub const PREVIEW_MAX_LINES: usize = 2;
pub const PREVIEW_MAX_CHARS: usize = 140;
pub const EMPTY_MESSAGE: &str = "No notes yet. Create your first note to get started!";

const SKELETON_ROW: &str = "░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
}

impl CardAction {
    pub const ALL: [CardAction; 2] = [CardAction::Edit, CardAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Edit => "Edit",
            CardAction::Delete => "Delete",
        }
    }
}

/// Summary of one note as shown in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    pub preview: String,
    pub created_on: String,
}

impl NoteCard {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            preview: preview(&note.content),
            created_on: format_created(note.created_at),
        }
    }

    pub fn actions(&self) -> [CardAction; 2] {
        CardAction::ALL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesListView {
    Loading,
    Empty,
    Populated(Vec<NoteCard>),
}

impl NotesListView {
    /// `None` means the list result has not arrived yet
    pub fn from_result(notes: Option<&[Note]>) -> Self {
        match notes {
            None => NotesListView::Loading,
            Some([]) => NotesListView::Empty,
            Some(notes) => NotesListView::Populated(notes.iter().map(NoteCard::from_note).collect()),
        }
    }

    pub fn cards(&self) -> &[NoteCard] {
        match self {
            NotesListView::Populated(cards) => cards,
            _ => &[],
        }
    }

    pub fn render(&self) -> String {
        match self {
            NotesListView::Loading => vec![SKELETON_ROW; SKELETON_ROWS].join("\n"),
            NotesListView::Empty => EMPTY_MESSAGE.to_string(),
            NotesListView::Populated(cards) => cards
                .iter()
                .map(render_card)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

fn render_card(card: &NoteCard) -> String {
    let mut out = card.title.clone();
    for line in card.preview.lines() {
        out.push_str("\n  ");
        out.push_str(line);
    }
    let actions: Vec<&str> = card.actions().iter().map(CardAction::label).collect();
    out.push_str(&format!(
        "\n  {}  [{}]  {}",
        card.created_on,
        actions.join(" | "),
        card.id
    ));
    out
}

/// First lines of `content`, clamped in both lines and characters
pub fn preview(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut truncated = lines.len() > PREVIEW_MAX_LINES;
    let clamped = lines
        .into_iter()
        .take(PREVIEW_MAX_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut text: String = if clamped.chars().count() > PREVIEW_MAX_CHARS {
        truncated = true;
        clamped.chars().take(PREVIEW_MAX_CHARS).collect()
    } else {
        clamped
    };

    if truncated {
        text.truncate(text.trim_end().len());
        text.push(ELLIPSIS);
    }
    text
}

/// Creation date as `YYYY-MM-DD` (UTC)
pub fn format_created(created_at_ms: i64) -> String {
    match Utc.timestamp_millis_opt(created_at_ms).single() {
        Some(at) => at.format("%Y-%m-%d").to_string(),
        None => "unknown date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn note(title: &str, content: &str, created_at: i64) -> Note {
        Note {
            id: Uuid::new_v4(),
            owner_id: "user_a".into(),
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn no_result_is_loading_with_skeletons() {
        let view = NotesListView::from_result(None);
        assert_eq!(view, NotesListView::Loading);
        assert_eq!(view.render().lines().count(), SKELETON_ROWS);
        assert!(view.cards().is_empty());
    }

    #[test]
    fn empty_result_shows_call_to_action() {
        let view = NotesListView::from_result(Some(&[]));
        assert_eq!(view, NotesListView::Empty);
        assert_eq!(view.render(), EMPTY_MESSAGE);
    }

    #[test]
    fn populated_keeps_list_order() {
        let notes = vec![note("C", "", 3), note("B", "", 2), note("A", "", 1)];
        let view = NotesListView::from_result(Some(&notes));
        let titles: Vec<&str> = view.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn card_shows_creation_date_and_actions() {
        // 2024-03-05T12:00:00Z
        let card = NoteCard::from_note(&note("Trip", "pack bags", 1_709_640_000_000));
        assert_eq!(card.created_on, "2024-03-05");
        assert_eq!(card.actions(), [CardAction::Edit, CardAction::Delete]);

        let rendered = render_card(&card);
        assert!(rendered.starts_with("Trip\n  pack bags\n  2024-03-05"));
        assert!(rendered.contains("[Edit | Delete]"));
    }

    #[test]
    fn preview_keeps_short_content() {
        assert_eq!(preview("one\ntwo"), "one\ntwo");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn preview_clamps_lines() {
        assert_eq!(preview("one\ntwo\nthree"), "one\ntwo…");
    }

    #[test]
    fn preview_clamps_characters() {
        let long = "x".repeat(PREVIEW_MAX_CHARS + 20);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_MAX_CHARS + 1);
        assert!(p.ends_with('…'));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let long = "é".repeat(PREVIEW_MAX_CHARS);
        assert_eq!(preview(&long), long);
    }
}
