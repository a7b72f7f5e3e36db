use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::Identity;

/// Identity resolved for the current request, if any.
///
/// Handlers hand this to the notes service as-is; a `None` is turned into an
/// unauthenticated failure by the service itself.
#[derive(Clone, Debug, Default)]
pub struct CurrentIdentity(pub Option<Identity>);

impl CurrentIdentity {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Resolves the bearer token into an identity and injects it into the request.
/// Never rejects: a missing or invalid token simply yields no identity.
pub async fn resolve_identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match extract_jwt_from_headers(request.headers()) {
        Ok(Some(token)) => match state.auth.verify(&token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                None
            }
        },
        Ok(None) => None,
        Err(msg) => {
            tracing::debug!("Ignoring Authorization header: {}", msg);
            None
        }
    };

    request.extensions_mut().insert(CurrentIdentity(identity));
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        let token = token.trim();
        if token.is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
