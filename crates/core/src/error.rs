//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Domain errors produced below the HTTP layer.
///
/// The api crate maps each variant onto an HTTP status code and a stable
/// error code string.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An invariant was broken; details are logged, not surfaced.
    #[error("Internal error: {0}")]
    Internal(String),
}
