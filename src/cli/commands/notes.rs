use std::io::{self, BufRead, Write};

use serde_json::json;
use uuid::Uuid;

use crate::cli::commands::Target;
use crate::cli::utils::{output_message, output_notes, output_notices};
use crate::cli::OutputFormat;
use crate::client::NotesClient;
use crate::ui::{NotesPage, Notice};

pub async fn list(target: &Target, output_format: OutputFormat) -> anyhow::Result<()> {
    let page = loaded_page(target).await?;
    output_notes(
        &output_format,
        page.view(),
        page.notes().unwrap_or_default(),
    )
}

pub async fn create(
    target: &Target,
    title: &str,
    content: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = NotesPage::new(authenticated_client(target)?);
    page.open_create();
    page.editor_mut().set_title(title);
    page.editor_mut().set_content(content);

    let report = page.save().await;
    output_notices(&output_format, report.notices, json!({ "id": report.id }))
}

pub async fn edit(
    target: &Target,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = loaded_page(target).await?;
    let id = parse_id(id)?;
    page.open_edit(id).map_err(into_error)?;

    if let Some(title) = title {
        page.editor_mut().set_title(title);
    }
    if let Some(content) = content {
        page.editor_mut().set_content(content);
    }

    let report = page.save().await;
    output_notices(&output_format, report.notices, json!({ "id": report.id }))
}

pub async fn delete(
    target: &Target,
    id: &str,
    yes: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = loaded_page(target).await?;
    let id = parse_id(id)?;
    page.open_edit(id).map_err(into_error)?;

    let notices = page.delete(|prompt| yes || confirm(prompt)).await;
    if notices.is_empty() {
        return output_message(&output_format, "Delete cancelled", json!({ "deleted": false }));
    }
    output_notices(&output_format, notices, json!({ "id": id, "deleted": true }))
}

async fn loaded_page(target: &Target) -> anyhow::Result<NotesPage<NotesClient>> {
    let mut page = NotesPage::new(authenticated_client(target)?);
    page.refresh().await.map_err(into_error)?;
    Ok(page)
}

fn authenticated_client(target: &Target) -> anyhow::Result<NotesClient> {
    let client = target.client()?;
    if !client.has_token() {
        anyhow::bail!("No token set (pass --token or set NOTES_TOKEN)");
    }
    Ok(client)
}

/// Unknown and malformed ids read the same to the user
fn parse_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| anyhow::anyhow!("Note not found"))
}

fn into_error(notice: Notice) -> anyhow::Error {
    anyhow::anyhow!(notice.message)
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    if io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_reads_as_not_found() {
        let err = parse_id("nope").unwrap_err();
        assert_eq!(err.to_string(), "Note not found");
        assert!(parse_id(" 67e55044-10b1-426f-9247-bb680e5fe0c8 ").is_ok());
    }

    #[test]
    fn missing_token_is_rejected_before_any_request() {
        let target = Target {
            server: "http://127.0.0.1:9".into(),
            token: None,
        };
        let err = authenticated_client(&target).unwrap_err();
        assert!(err.to_string().contains("No token set"));
    }
}
