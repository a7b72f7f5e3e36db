use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AuthKeys, JwtError};
use crate::config::{AppConfig, SecurityConfig, StoreBackend};
use crate::database::{MemoryNoteStore, NoteStore, PgNoteStore};
use crate::handlers;
use crate::middleware::resolve_identity_middleware;
use crate::services::NoteService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub auth: AuthKeys,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn NoteStore>) -> Result<Self, JwtError> {
        let auth = AuthKeys::from_config(&config.security)?;
        Ok(Self {
            notes: NoteService::new(store),
            auth,
            config: Arc::new(config),
        })
    }

    pub fn with_service(config: AppConfig, notes: NoteService) -> Result<Self, JwtError> {
        let auth = AuthKeys::from_config(&config.security)?;
        Ok(Self {
            notes,
            auth,
            config: Arc::new(config),
        })
    }

    pub fn in_memory(config: AppConfig) -> Result<Self, JwtError> {
        Self::new(config, Arc::new(MemoryNoteStore::new()))
    }

    /// Build state with the store selected by `database.backend`
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn NoteStore> = match config.database.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory note store; notes are lost on restart");
                Arc::new(MemoryNoteStore::new())
            }
            StoreBackend::Postgres => Arc::new(PgNoteStore::connect(&config.database).await?),
        };
        Ok(Self::new(config, store)?)
    }
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Notes (identity required by the service)
        .merge(note_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors_layer(&config.security) {
        app = app.layer(cors);
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn note_routes() -> Router<AppState> {
    use handlers::protected::notes;

    Router::new()
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/api/notes/:id",
            put(notes::update_note).delete(notes::delete_note),
        )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_requires_secret() {
        assert!(AppState::in_memory(AppConfig::production()).is_err());
        assert!(AppState::in_memory(AppConfig::development()).is_ok());
    }

    #[test]
    fn cors_disabled_yields_no_layer() {
        let mut security = AppConfig::development().security;
        security.enable_cors = false;
        assert!(cors_layer(&security).is_none());
        security.enable_cors = true;
        assert!(cors_layer(&security).is_some());
    }
}
