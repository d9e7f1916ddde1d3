//! Bank API integration: certificate exchange and certificate-based
//! authentication.
//!
//! The bank's linking flow is two-step. First the user requests a
//! verification code, which opens an [`session::ExchangeSession`]. Then the
//! emailed code is exchanged for a PKCS#12 client certificate, and that
//! certificate authenticates the token request. [`client::HttpBankClient`]
//! implements both steps over HTTPS; the traits exist so handlers can be
//! tested without a live bank.

pub mod auth;
pub mod certificate;
pub mod client;
pub mod session;

pub use auth::BankAuthenticator;
pub use certificate::{Certificate, CertificateExchange};
pub use client::{BankError, HttpBankClient};
pub use session::{ExchangeSession, SessionStore};
