//! Handlers for the `/banks/certificate` resource.
//!
//! Linking a bank account is a two-step flow:
//!
//! 1. `request_code` opens an exchange session with the user's bank
//!    credentials and asks the bank to email a verification code.
//! 2. `generate_certificate` exchanges the emailed code for a PKCS#12 client
//!    certificate, stores it locally and in object storage, authenticates
//!    with it, and persists the resulting bank link.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use balance_bank::ExchangeSession;
use balance_core::naming::certificate_filename;
use balance_core::types::DbId;
use balance_db::models::bank::{Bank, CreateBank};
use balance_db::repositories::BankRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Message returned when the link flow runs before a code was requested.
const MISSING_CODE_MESSAGE: &str = "Generate the code of certificate first";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /banks/certificate/code`.
#[derive(Debug, Deserialize)]
pub struct RequestCodeBody {
    pub user_id: DbId,
    /// Bank login (e.g. the national taxpayer id).
    pub login: String,
    pub password: String,
    pub device_id: String,
}

/// Response payload for `POST /banks/certificate/code`.
#[derive(Debug, Serialize)]
pub struct CodeRequested {
    pub sent: bool,
}

/// Reference to the bank being linked.
#[derive(Debug, Deserialize)]
pub struct BankRef {
    /// Institution code (e.g. `"260"`), stored on the link entity.
    pub code: String,
    /// The verification code the user received by email.
    pub code_id: String,
}

/// Request body for `POST /banks/certificate`.
#[derive(Debug, Deserialize)]
pub struct GenerateCertificateBody {
    pub user_id: DbId,
    pub bank: BankRef,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/banks/certificate/code
///
/// Open an exchange session and ask the bank to email a verification code.
pub async fn request_code(
    State(state): State<AppState>,
    Json(input): Json<RequestCodeBody>,
) -> AppResult<Json<DataResponse<CodeRequested>>> {
    let session = ExchangeSession::new(input.login, input.password, input.device_id);

    state.certificate_exchange.request_code(&session).await?;
    state.sessions.insert(input.user_id, session).await;

    tracing::info!(user_id = input.user_id, "Certificate verification code requested");

    Ok(Json(DataResponse {
        data: CodeRequested { sent: true },
    }))
}

/// POST /api/v1/banks/certificate
///
/// The certificate link flow, in order: exchange the emailed code for the
/// client certificate, write it to the local certificate directory, upload
/// it to object storage unless it is already there, authenticate against
/// the bank with it, and persist the bank link.
///
/// No retries and no rollback: any failure after the session check
/// propagates as-is.
pub async fn generate_certificate(
    State(state): State<AppState>,
    Json(input): Json<GenerateCertificateBody>,
) -> AppResult<(StatusCode, Json<DataResponse<Bank>>)> {
    // 1. The session only exists after a verification code was requested.
    //    Fail before touching any external system.
    let session = state
        .sessions
        .get(input.user_id)
        .await
        .ok_or_else(|| AppError::BadRequest(MISSING_CODE_MESSAGE.into()))?;

    let filename = certificate_filename(input.user_id);

    // 2. Exchange the emailed code for the PKCS#12 bundle.
    let certificate = state
        .certificate_exchange
        .exchange(&session, &input.bank.code_id)
        .await?;

    // 3. Write the bundle to the local certificate directory. The file is
    //    intentionally left in place after the flow completes.
    let local_path = state.config.certificate_dir.join(&filename);
    tokio::fs::write(&local_path, certificate.as_der())
        .await
        .map_err(|e| {
            AppError::InternalError(format!(
                "Failed to write certificate file {}: {e}",
                local_path.display()
            ))
        })?;

    // 4. Upload to object storage, skipping when the object already exists.
    let bucket = &state.config.bucket_certificates;
    let already_stored = state.object_store.exists(bucket, &filename).await?;
    if already_stored {
        tracing::debug!(bucket = %bucket, key = %filename, "Certificate already in object storage, skipping upload");
    } else {
        state
            .object_store
            .upload(bucket, &filename, certificate.as_der().to_vec())
            .await?;
    }

    // 5. Authenticate against the bank with the certificate identity.
    let token = state
        .bank_auth
        .authenticate(&session.login, &session.password, &certificate)
        .await?;

    // 6. Persist the link.
    let bank = BankRepo::create(
        &state.pool,
        &CreateBank {
            user_id: input.user_id,
            code: input.bank.code,
            token,
            certificate_url: filename,
        },
    )
    .await?;

    tracing::info!(
        user_id = input.user_id,
        bank_id = bank.id,
        code = %bank.code,
        "Bank link created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: bank })))
}
