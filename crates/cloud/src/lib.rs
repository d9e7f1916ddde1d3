//! Object storage provider for certificate bundles.
//!
//! [`ObjectStore`] is the seam between handlers and the storage backend;
//! [`S3ObjectStore`] is the production AWS S3 implementation.

pub mod storage;

pub use storage::{ObjectStore, ObjectStoreError, S3ObjectStore};
