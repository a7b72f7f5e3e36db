use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;
use crate::client::ClientError;
use crate::database::{Note, NOTES_COLLECTION};
use crate::ui::{NotesListView, Notice};

/// Print a successful result. In JSON mode `data` fields sit beside `message`.
pub fn output_message(output_format: &OutputFormat, message: &str, data: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut body = Map::new();
            body.insert("success".into(), Value::Bool(true));
            body.insert("message".into(), Value::String(message.to_string()));
            if let Value::Object(fields) = data {
                body.extend(fields);
            }
            println!("{}", serde_json::to_string_pretty(&Value::Object(body))?);
        }
        OutputFormat::Text => println!("✓ {}", message),
    }
    Ok(())
}

/// Report the notices of one page mutation.
///
/// The first notice is the mutation itself; an error there fails the
/// command. Any later notice means the follow-up refresh failed, which is
/// logged but does not undo the mutation.
pub fn output_notices(
    output_format: &OutputFormat,
    notices: Vec<Notice>,
    data: Value,
) -> anyhow::Result<()> {
    let mut notices = notices.into_iter();
    let outcome = notices
        .next()
        .ok_or_else(|| anyhow::anyhow!("Nothing to save"))?;
    if !outcome.is_success() {
        anyhow::bail!(outcome.message);
    }

    for later in notices {
        tracing::warn!("{}", later.message);
    }
    output_message(output_format, &outcome.message, data)
}

/// Print the notes list: rendered cards in text mode, raw notes in JSON mode
pub fn output_notes(
    output_format: &OutputFormat,
    view: &NotesListView,
    notes: &[Note],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ NOTES_COLLECTION: notes }))?
            );
        }
        OutputFormat::Text => println!("{}", view.render()),
    }
    Ok(())
}

/// Print a failed command. API errors keep the server's error code.
pub fn output_error(output_format: &OutputFormat, error: &anyhow::Error) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut body = json!({
                "success": false,
                "error": error.to_string(),
            });
            if let Some(code) = error_code(error) {
                body["error_code"] = json!(code);
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => eprintln!("Error: {}", error),
    }
    Ok(())
}

fn error_code(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<ClientError>()? {
        ClientError::Unauthenticated => Some("UNAUTHORIZED".to_string()),
        ClientError::Api { code, .. } => Some(code.clone()),
        ClientError::Decode(_) | ClientError::Http(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn failed_mutation_fails_the_command() {
        let err = output_notices(
            &OutputFormat::Text,
            vec![Notice::error("Failed to update note")],
            json!({}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update note");
    }

    #[test]
    fn failed_refresh_after_success_is_not_fatal() {
        let notices = vec![
            Notice::success("Note created successfully"),
            Notice::error("Failed to load notes"),
        ];
        assert!(output_notices(&OutputFormat::Text, notices, json!({})).is_ok());
    }

    #[test]
    fn no_notices_is_an_error() {
        assert!(output_notices(&OutputFormat::Json, Vec::new(), json!({})).is_err());
    }

    #[test]
    fn error_codes_come_from_client_errors() {
        let api: anyhow::Error = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND".into(),
            message: "Note not found".into(),
        }
        .into();
        assert_eq!(error_code(&api).as_deref(), Some("NOT_FOUND"));

        let unauthenticated: anyhow::Error = ClientError::Unauthenticated.into();
        assert_eq!(error_code(&unauthenticated).as_deref(), Some("UNAUTHORIZED"));

        assert_eq!(error_code(&anyhow::anyhow!("Note not found")), None);
    }
}
