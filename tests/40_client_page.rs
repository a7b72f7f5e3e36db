mod common;

use anyhow::Result;
use reqwest::StatusCode;

use notes_api::client::ClientError;
use notes_api::database::NoteStore;
use notes_api::ui::{CardAction, EditorPhase, NotesListView, NotesPage, Notice};

use common::TestServer;

#[tokio::test]
async fn page_drives_full_lifecycle_over_http() -> Result<()> {
    let server = TestServer::start().await?;
    let mut page = NotesPage::new(server.client_for(Some("alice")));

    assert_eq!(page.view(), &NotesListView::Loading);
    page.refresh().await.map_err(|n| anyhow::anyhow!(n.message))?;
    assert_eq!(page.view(), &NotesListView::Empty);

    page.open_create();
    page.editor_mut().set_title("Remote");
    page.editor_mut().set_content("over the wire");
    let created = page.save().await;
    assert_eq!(
        created.notices,
        vec![Notice::success("Note created successfully")]
    );
    assert_eq!(page.editor().phase(), EditorPhase::Closed);

    let card = page.view().cards()[0].clone();
    assert_eq!(created.id, Some(card.id));
    assert_eq!(card.title, "Remote");
    assert_eq!(card.preview, "over the wire");

    page.open_card(card.id, CardAction::Edit).map_err(|n| anyhow::anyhow!(n.message))?;
    assert_eq!(page.editor().title(), "Remote");
    page.editor_mut().set_title("Renamed");
    assert_eq!(
        page.save().await.notices,
        vec![Notice::success("Note updated successfully")]
    );
    assert_eq!(page.view().cards()[0].title, "Renamed");

    page.open_card(card.id, CardAction::Delete).map_err(|n| anyhow::anyhow!(n.message))?;
    assert_eq!(
        page.delete(|_| true).await,
        vec![Notice::success("Note deleted successfully")]
    );
    assert_eq!(page.view(), &NotesListView::Empty);
    Ok(())
}

#[tokio::test]
async fn pages_of_different_users_stay_apart() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = NotesPage::new(server.client_for(Some("alice")));
    let mut bob = NotesPage::new(server.client_for(Some("bob")));

    alice.open_create();
    alice.editor_mut().set_title("alice only");
    alice.save().await;

    bob.refresh().await.map_err(|n| anyhow::anyhow!(n.message))?;
    assert_eq!(bob.view(), &NotesListView::Empty);

    // Bob cannot open a note his list never contained
    let alice_id = alice.view().cards()[0].id;
    assert!(bob.open_edit(alice_id).is_err());
    Ok(())
}

#[tokio::test]
async fn blank_title_never_reaches_server() -> Result<()> {
    let server = TestServer::start().await?;
    let mut page = NotesPage::new(server.client_for(Some("alice")));

    page.open_create();
    page.editor_mut().set_title("   ");
    assert_eq!(page.save().await.notices, vec![Notice::error("Please enter a title")]);
    assert!(page.editor().is_open());

    assert!(server.state.notes.store().list_by_owner("alice").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn client_maps_error_responses() -> Result<()> {
    let server = TestServer::start().await?;

    let anonymous = server.client_for(None);
    assert!(matches!(
        anonymous.list().await,
        Err(ClientError::Unauthenticated)
    ));

    let alice = server.client_for(Some("alice"));
    match alice.delete(uuid::Uuid::new_v4()).await {
        Err(ClientError::Api { status, code, message }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(code, "NOT_FOUND");
            assert_eq!(message, "Note not found");
        }
        other => panic!("expected not found, got {:?}", other),
    }

    match alice.create("  ", "body").await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, StatusCode::BAD_REQUEST),
        other => panic!("expected validation error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn anonymous_page_keeps_loading_view() -> Result<()> {
    let server = TestServer::start().await?;
    let mut page = NotesPage::new(server.client_for(None));

    assert_eq!(
        page.refresh().await,
        Err(Notice::error("Failed to load notes"))
    );
    assert_eq!(page.view(), &NotesListView::Loading);
    Ok(())
}
