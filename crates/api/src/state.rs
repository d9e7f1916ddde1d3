use std::sync::Arc;

use balance_bank::{BankAuthenticator, CertificateExchange, SessionStore};
use balance_cloud::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: balance_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage backend for certificate bundles.
    pub object_store: Arc<dyn ObjectStore>,
    /// Bank certificate issuance endpoints.
    pub certificate_exchange: Arc<dyn CertificateExchange>,
    /// Bank token endpoint (certificate-based authentication).
    pub bank_auth: Arc<dyn BankAuthenticator>,
    /// Pending certificate exchange sessions, keyed by user id.
    pub sessions: SessionStore,
}
