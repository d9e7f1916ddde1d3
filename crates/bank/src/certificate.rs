//! Certificate types and the code-exchange seam.

use async_trait::async_trait;

use crate::client::BankError;
use crate::session::ExchangeSession;

/// An opaque PKCS#12 client certificate bundle issued by the bank.
#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    pub fn new(der: Vec<u8>) -> Self {
        Self { der }
    }

    /// Raw DER bytes of the bundle, as written to disk and object storage.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

impl std::fmt::Debug for Certificate {
    // Key material stays out of logs; only the size is shown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Certificate")
            .field("der_len", &self.der.len())
            .finish()
    }
}

/// The bank's certificate issuance endpoints.
#[async_trait]
pub trait CertificateExchange: Send + Sync {
    /// Ask the bank to email a verification code for this session.
    async fn request_code(&self, session: &ExchangeSession) -> Result<(), BankError>;

    /// Exchange an emailed verification code for the client certificate.
    async fn exchange(
        &self,
        session: &ExchangeSession,
        code_id: &str,
    ) -> Result<Certificate, BankError>;
}
