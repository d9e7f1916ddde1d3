//! In-memory store for pending certificate exchanges.
//!
//! A session is opened when a verification code is requested for a user and
//! stays in place across link flows (a re-link reuses it). Sessions hold the
//! bank credentials needed for both the exchange and the token request, so
//! they never leave process memory.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use balance_core::types::DbId;

/// Credentials and device identity for a pending certificate exchange.
#[derive(Debug, Clone)]
pub struct ExchangeSession {
    /// Bank login (e.g. the national taxpayer id).
    pub login: String,
    pub password: String,
    /// Device identifier presented to the bank API.
    pub device_id: String,
    /// Unique token generated when the session is opened. Sent with the
    /// code request; the link flow itself does not consume it.
    pub encrypted_code: String,
}

impl ExchangeSession {
    /// Create a session with a freshly generated `encrypted_code`.
    pub fn new(login: String, password: String, device_id: String) -> Self {
        Self {
            login,
            password,
            device_id,
            encrypted_code: Uuid::new_v4().to_string(),
        }
    }
}

/// Shared map of user id to pending exchange session.
///
/// Cheaply cloneable; all clones share the same underlying map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<DbId, ExchangeSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending session for a user, replacing any existing one.
    pub async fn insert(&self, user_id: DbId, session: ExchangeSession) {
        self.inner.write().await.insert(user_id, session);
    }

    /// Look up the pending session for a user.
    pub async fn get(&self, user_id: DbId) -> Option<ExchangeSession> {
        self.inner.read().await.get(&user_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
