// handlers/protected/notes.rs - /api/notes handlers

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::{Note, NoteId};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentIdentity};
use crate::services::NoteError;

/// Body of POST /api/notes and PUT /api/notes/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteBody {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteIdResponse {
    pub id: NoteId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// GET /api/notes - the caller's notes, newest first
pub async fn list_notes(
    State(state): State<AppState>,
    caller: CurrentIdentity,
) -> ApiResult<Vec<Note>> {
    let notes = state.notes.list(caller.identity()).await?;
    Ok(ApiResponse::success(notes))
}

/// POST /api/notes - create a note owned by the caller
pub async fn create_note(
    State(state): State<AppState>,
    caller: CurrentIdentity,
    payload: Result<Json<NoteBody>, JsonRejection>,
) -> ApiResult<NoteIdResponse> {
    let body = parse_body(&caller, payload)?;
    let id = state
        .notes
        .create(caller.identity(), &body.title, &body.content)
        .await?;
    Ok(ApiResponse::created(NoteIdResponse { id }))
}

/// PUT /api/notes/:id - replace title and content of an owned note
pub async fn update_note(
    State(state): State<AppState>,
    caller: CurrentIdentity,
    Path(raw_id): Path<String>,
    payload: Result<Json<NoteBody>, JsonRejection>,
) -> ApiResult<NoteIdResponse> {
    let id = parse_note_id(&caller, &raw_id)?;
    let body = parse_body(&caller, payload)?;
    let id = state
        .notes
        .update(caller.identity(), id, &body.title, &body.content)
        .await?;
    Ok(ApiResponse::success(NoteIdResponse { id }))
}

/// DELETE /api/notes/:id - permanently remove an owned note
pub async fn delete_note(
    State(state): State<AppState>,
    caller: CurrentIdentity,
    Path(raw_id): Path<String>,
) -> ApiResult<DeletedResponse> {
    let id = parse_note_id(&caller, &raw_id)?;
    let deleted = state.notes.delete(caller.identity(), id).await?;
    Ok(ApiResponse::success(DeletedResponse { deleted }))
}

// Anonymous callers always get 401, whatever else is wrong with the request.
fn reject_anonymous(caller: &CurrentIdentity) -> Result<(), ApiError> {
    match caller.identity() {
        Some(_) => Ok(()),
        None => Err(NoteError::Unauthenticated.into()),
    }
}

/// An unparsable id cannot name an owned note, so it gets the same 404
fn parse_note_id(caller: &CurrentIdentity, raw: &str) -> Result<NoteId, ApiError> {
    Uuid::parse_str(raw).or_else(|_| {
        reject_anonymous(caller)?;
        Err(ApiError::note_not_found())
    })
}

fn parse_body(
    caller: &CurrentIdentity,
    payload: Result<Json<NoteBody>, JsonRejection>,
) -> Result<NoteBody, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            reject_anonymous(caller)?;
            Err(ApiError::invalid_json(rejection.body_text()))
        }
    }
}
