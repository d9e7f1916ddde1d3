//! Route definitions for the `/banks` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::bank_link;
use crate::state::AppState;

/// Routes mounted at `/banks`.
///
/// ```text
/// POST /certificate/code  -> request_code
/// POST /certificate       -> generate_certificate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/certificate/code", post(bank_link::request_code))
        .route("/certificate", post(bank_link::generate_certificate))
}
