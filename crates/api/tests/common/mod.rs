//! Shared test harness: mock collaborators and router construction.
//!
//! The bank API and object storage are mocked behind the same traits the
//! production clients implement, with call counters so tests can assert
//! which external systems a request touched.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use balance_api::config::ServerConfig;
use balance_api::routes;
use balance_api::state::AppState;
use balance_bank::{
    BankAuthenticator, BankError, Certificate, CertificateExchange, ExchangeSession, SessionStore,
};
use balance_cloud::{ObjectStore, ObjectStoreError};

/// Bucket name used by the test configuration.
pub const TEST_BUCKET: &str = "certificates-test";

// ---------------------------------------------------------------------------
// Mock bank API
// ---------------------------------------------------------------------------

/// Mock implementation of both bank API traits with call counters.
pub struct MockBankApi {
    pub code_request_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
    pub auth_calls: AtomicUsize,
    /// PKCS#12 bytes returned by `exchange`.
    pub certificate_der: Vec<u8>,
    /// Token returned by `authenticate`.
    pub token: String,
}

impl MockBankApi {
    pub fn new() -> Self {
        Self {
            code_request_calls: AtomicUsize::new(0),
            exchange_calls: AtomicUsize::new(0),
            auth_calls: AtomicUsize::new(0),
            certificate_der: b"mock-p12-bundle".to_vec(),
            token: "tok_mock_token".to_string(),
        }
    }
}

#[async_trait]
impl CertificateExchange for MockBankApi {
    async fn request_code(&self, _session: &ExchangeSession) -> Result<(), BankError> {
        self.code_request_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn exchange(
        &self,
        _session: &ExchangeSession,
        _code_id: &str,
    ) -> Result<Certificate, BankError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Certificate::new(self.certificate_der.clone()))
    }
}

#[async_trait]
impl BankAuthenticator for MockBankApi {
    async fn authenticate(
        &self,
        _login: &str,
        _password: &str,
        _certificate: &Certificate,
    ) -> Result<String, BankError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }
}

// ---------------------------------------------------------------------------
// Mock object store
// ---------------------------------------------------------------------------

/// In-memory [`ObjectStore`] recording uploads and existence checks.
pub struct MockObjectStore {
    /// Pre-existing objects, as `bucket/key`.
    pub objects: Mutex<HashSet<String>>,
    /// Every `(bucket, key)` pair that was uploaded.
    pub uploads: Mutex<Vec<(String, String)>>,
    pub exists_calls: AtomicUsize,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashSet::new()),
            uploads: Mutex::new(Vec::new()),
            exists_calls: AtomicUsize::new(0),
        }
    }

    /// Pre-populate the store with an object.
    pub fn preload(&self, bucket: &str, key: &str) {
        self.objects.lock().unwrap().insert(format!("{bucket}/{key}"));
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectStoreError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains(&format!("{bucket}/{key}")))
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        _bytes: Vec<u8>,
    ) -> Result<(), ObjectStoreError> {
        self.objects.lock().unwrap().insert(format!("{bucket}/{key}"));
        self.uploads
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config and router construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` writing certificates into `certificate_dir`.
pub fn test_config(certificate_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        bucket_certificates: TEST_BUCKET.to_string(),
        certificate_dir,
        bank_api_url: "https://localhost:9090".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and mock collaborators.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(
    pool: PgPool,
    bank: Arc<MockBankApi>,
    store: Arc<MockObjectStore>,
    certificate_dir: PathBuf,
) -> Router {
    let config = test_config(certificate_dir);

    let state = AppState {
        pool,
        config: Arc::new(config),
        object_store: store,
        certificate_exchange: bank.clone(),
        bank_auth: bank,
        sessions: SessionStore::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
