//! Bank link model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use balance_core::types::{DbId, Timestamp};

/// A bank link row from the `banks` table.
///
/// Associates a user with an authenticated bank session: the access token
/// returned by the bank API and the storage key of the client certificate
/// used to obtain it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bank {
    pub id: DbId,
    pub user_id: DbId,
    /// Institution code this link belongs to (e.g. `"260"`).
    pub code: String,
    /// Access token returned by certificate authentication.
    pub token: String,
    /// Object storage key of the client certificate (`certificate_{user_id}.p12`).
    pub certificate_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new bank link.
pub struct CreateBank {
    pub user_id: DbId,
    pub code: String,
    pub token: String,
    pub certificate_url: String,
}
