//! S3-backed object storage.

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    /// A HEAD request failed for a reason other than the object being absent.
    #[error("Failed to stat s3://{bucket}/{key}: {message}")]
    Stat {
        bucket: String,
        key: String,
        message: String,
    },

    /// A PUT request failed.
    #[error("Failed to upload s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// ObjectStore trait
// ---------------------------------------------------------------------------

/// Storage backend for certificate bundles.
///
/// Implementations must be cheap to share behind an `Arc` across handlers.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether an object exists at `key` in `bucket`.
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectStoreError>;

    /// Upload `bytes` to `key` in `bucket`, overwriting any existing object.
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>)
        -> Result<(), ObjectStoreError>;
}

// ---------------------------------------------------------------------------
// S3 implementation
// ---------------------------------------------------------------------------

/// AWS S3 implementation of [`ObjectStore`].
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Build a store from the ambient AWS configuration (environment
    /// variables, shared config file, or instance metadata).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectStoreError> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => Ok(false),
            Err(e) => Err(ObjectStoreError::Stat {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ObjectStoreError> {
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(bucket, key, size, "Uploaded object to S3");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
