//! Certificate-based authentication seam.

use async_trait::async_trait;

use crate::certificate::Certificate;
use crate::client::BankError;

/// Authenticates against the bank API with a client certificate.
#[async_trait]
pub trait BankAuthenticator: Send + Sync {
    /// Request an access token using the login, password, and the PKCS#12
    /// certificate as the TLS client identity.
    async fn authenticate(
        &self,
        login: &str,
        password: &str,
        certificate: &Certificate,
    ) -> Result<String, BankError>;
}
