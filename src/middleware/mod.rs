pub mod auth;
pub mod response;

pub use auth::{resolve_identity_middleware, CurrentIdentity};
pub use response::{ApiResponse, ApiResult};
