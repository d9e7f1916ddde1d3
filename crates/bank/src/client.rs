//! HTTP client for the bank's certificate and token endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::BankAuthenticator;
use crate::certificate::{Certificate, CertificateExchange};
use crate::session::ExchangeSession;

/// HTTP request timeout for a single bank API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for bank API failures.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// The underlying HTTP request failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The bank returned a non-2xx status code.
    #[error("Bank API returned HTTP {0}")]
    HttpStatus(u16),

    /// The certificate bundle could not be used as a TLS client identity.
    #[error("Invalid client certificate: {0}")]
    Certificate(String),
}

// ---------------------------------------------------------------------------
// HttpBankClient
// ---------------------------------------------------------------------------

/// Reqwest-backed client for the bank API.
///
/// Implements both [`CertificateExchange`] (plain HTTPS) and
/// [`BankAuthenticator`] (HTTPS with the issued PKCS#12 identity).
pub struct HttpBankClient {
    base_url: String,
    client: reqwest::Client,
}

/// Token endpoint response body.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl HttpBankClient {
    /// Create a client for a bank API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Bank API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ensure_success(status: reqwest::StatusCode) -> Result<(), BankError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(BankError::HttpStatus(status.as_u16()))
        }
    }
}

#[async_trait]
impl CertificateExchange for HttpBankClient {
    async fn request_code(&self, session: &ExchangeSession) -> Result<(), BankError> {
        let payload = serde_json::json!({
            "login": session.login,
            "password": session.password,
            "device_id": session.device_id,
            "encrypted_code": session.encrypted_code,
        });

        let response = self
            .client
            .post(format!("{}/api/certificate/code", self.base_url))
            .json(&payload)
            .send()
            .await?;

        Self::ensure_success(response.status())?;
        tracing::info!(device_id = %session.device_id, "Requested certificate verification code");
        Ok(())
    }

    async fn exchange(
        &self,
        session: &ExchangeSession,
        code_id: &str,
    ) -> Result<Certificate, BankError> {
        let payload = serde_json::json!({
            "login": session.login,
            "password": session.password,
            "device_id": session.device_id,
            "code": code_id,
        });

        let response = self
            .client
            .post(format!("{}/api/certificate", self.base_url))
            .json(&payload)
            .send()
            .await?;

        Self::ensure_success(response.status())?;

        // The bank returns the PKCS#12 bundle directly in the response body.
        let der = response.bytes().await?.to_vec();
        if der.is_empty() {
            return Err(BankError::Certificate(
                "Bank returned an empty certificate bundle".into(),
            ));
        }

        tracing::info!(size = der.len(), "Exchanged code for client certificate");
        Ok(Certificate::new(der))
    }
}

#[async_trait]
impl BankAuthenticator for HttpBankClient {
    async fn authenticate(
        &self,
        login: &str,
        password: &str,
        certificate: &Certificate,
    ) -> Result<String, BankError> {
        // The token endpoint requires the issued certificate as the TLS
        // client identity, so a dedicated client is built per call.
        let identity = reqwest::Identity::from_pkcs12_der(certificate.as_der(), "")
            .map_err(|e| BankError::Certificate(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .use_native_tls()
            .identity(identity)
            .build()?;

        let payload = serde_json::json!({
            "grant_type": "password",
            "login": login,
            "password": password,
        });

        let response = client
            .post(format!("{}/api/token", self.base_url))
            .json(&payload)
            .send()
            .await?;

        Self::ensure_success(response.status())?;

        let token: TokenResponse = response.json().await?;
        tracing::info!("Authenticated with client certificate");
        Ok(token.access_token)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
