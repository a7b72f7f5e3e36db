//! HTTP client for the notes API.
//!
//! Unwraps the `{"success": true, "data": ...}` envelope and maps error bodies
//! back to `ClientError`. Implements `NotesBackend`, so a `NotesPage` can run
//! against a remote server exactly as it does in-process.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::database::{Note, NoteId};
use crate::handlers::protected::notes::{DeletedResponse, NoteBody, NoteIdResponse};
use crate::ui::NotesBackend;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not authenticated (missing or invalid token)")]
    Unauthenticated,

    #[error("{message} ({status} {code})")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthenticated => Some(StatusCode::UNAUTHORIZED),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Decode(_) => None,
            ClientError::Http(e) => e.status(),
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    code: String,
}

#[derive(Debug, Clone)]
pub struct NotesClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// GET /health. Returns the `data` object of the health body.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let response = self.request(Method::GET, "/health").send().await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Err(ClientError::Api {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "SERVICE_UNAVAILABLE".to_string(),
                message: "Server reports a degraded store".to_string(),
            });
        }
        decode(response).await
    }

    pub async fn list(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.request(Method::GET, "/api/notes").send().await?;
        decode(response).await
    }

    pub async fn create(&self, title: &str, content: &str) -> Result<NoteId, ClientError> {
        let response = self
            .request(Method::POST, "/api/notes")
            .json(&body(title, content))
            .send()
            .await?;
        let created: NoteIdResponse = decode(response).await?;
        Ok(created.id)
    }

    pub async fn update(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<NoteId, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/api/notes/{}", id))
            .json(&body(title, content))
            .send()
            .await?;
        let updated: NoteIdResponse = decode(response).await?;
        Ok(updated.id)
    }

    pub async fn delete(&self, id: NoteId) -> Result<bool, ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/api/notes/{}", id))
            .send()
            .await?;
        let deleted: DeletedResponse = decode(response).await?;
        Ok(deleted.deleted)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn body(title: &str, content: &str) -> NoteBody {
    NoteBody {
        title: title.to_string(),
        content: content.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let text = response.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthenticated);
    }
    if !status.is_success() {
        return Err(match serde_json::from_str::<ErrorBody>(&text) {
            Ok(err) => ClientError::Api {
                status,
                code: err.code,
                message: err.message,
            },
            Err(_) => ClientError::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: text,
            },
        });
    }

    serde_json::from_str::<Envelope<T>>(&text)
        .map(|envelope| envelope.data)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl NotesBackend for NotesClient {
    type Error = ClientError;

    async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        self.list().await
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<NoteId, ClientError> {
        self.create(title, content).await
    }

    async fn update_note(&self, id: NoteId, title: &str, content: &str) -> Result<NoteId, ClientError> {
        self.update(id, title, content).await
    }

    async fn delete_note(&self, id: NoteId) -> Result<bool, ClientError> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let client = NotesClient::new("http://localhost:3000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn blank_token_counts_as_none() {
        let client = NotesClient::new("http://localhost:3000", Some("  ".into())).unwrap();
        assert!(!client.has_token());
    }

    #[test]
    fn error_status_is_exposed() {
        assert_eq!(
            ClientError::Unauthenticated.status(),
            Some(StatusCode::UNAUTHORIZED)
        );
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND".into(),
            message: "Note not found".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "Note not found (404 Not Found NOT_FOUND)");
    }
}
