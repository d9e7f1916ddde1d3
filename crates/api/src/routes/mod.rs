pub mod bank;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /banks/certificate/code    request a certificate verification code (POST)
/// /banks/certificate         exchange the code, store the certificate,
///                            authenticate, and persist the bank link (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/banks", bank::router())
}
