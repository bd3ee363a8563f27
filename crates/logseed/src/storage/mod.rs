//! Object-store publishing
//!
//! [`Publisher`] is the seam the pipeline talks to; [`S3Publisher`] is the
//! production implementation backed by `aws-sdk-s3`. Publishing never
//! retries: SDK retries are disabled and a failure is returned as-is.

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{retry::RetryConfig, Credentials, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::put_object::PutObjectError,
    primitives::ByteStream,
    Client,
};
use logseed_common::checksum::checksum_bytes;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub mod config;

pub use config::StorageConfig;

/// Failure to place an artifact in the object store
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("could not read local artifact: {0}")]
    ReadArtifact(#[from] std::io::Error),

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("credentials rejected: {0}")]
    AuthRejected(String),

    #[error("bucket '{0}' does not exist")]
    BucketNotFound(String),

    #[error("upload did not finish within {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub bucket: String,
    pub key: String,
    pub checksum: String,
    pub size: u64,
}

/// Transfers a local file to remote storage under a key
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Destination bucket, for reporting
    fn bucket(&self) -> &str;

    /// Create or overwrite `key` with the exact bytes of `local_path`
    async fn publish(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<UploadResult, PublishError>;
}

#[async_trait]
impl<T: Publisher + ?Sized> Publisher for &T {
    fn bucket(&self) -> &str {
        (**self).bucket()
    }

    async fn publish(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<UploadResult, PublishError> {
        (**self).publish(local_path, key, content_type).await
    }
}

#[derive(Clone)]
pub struct S3Publisher {
    client: Client,
    bucket: String,
    upload_timeout: Option<Duration>,
}

impl S3Publisher {
    pub fn new(config: StorageConfig) -> Self {
        debug!("Initializing storage with config: {:?}", config);

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "logseed-storage",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style)
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = &config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        info!("Storage client initialized for bucket: {}", config.bucket);

        Self {
            client,
            bucket: config.bucket,
            upload_timeout: config.upload_timeout,
        }
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), PublishError> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send();

        let response = match self.upload_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| PublishError::Timeout(limit))?,
            None => request.await,
        };

        response
            .map(|_| ())
            .map_err(|err| classify_put_error(&self.bucket, err))
    }
}

#[async_trait]
impl Publisher for S3Publisher {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn publish(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<UploadResult, PublishError> {
        let data = tokio::fs::read(local_path).await?;
        let checksum = checksum_bytes(&data);
        let size = data.len() as u64;

        debug!("Uploading {} bytes to s3://{}/{}", size, self.bucket, key);

        self.put(key, data, content_type).await?;

        info!("Successfully uploaded to s3://{}/{}", self.bucket, key);

        Ok(UploadResult {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            checksum,
            size,
        })
    }
}

fn classify_put_error(bucket: &str, err: SdkError<PutObjectError>) -> PublishError {
    let detail = DisplayErrorContext(&err).to_string();

    if matches!(err, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) {
        return PublishError::Unreachable(detail);
    }

    let status = match &err {
        SdkError::ServiceError(ctx) => Some(ctx.raw().status().as_u16()),
        _ => None,
    };

    match (err.code(), status) {
        (Some("InvalidAccessKeyId" | "SignatureDoesNotMatch" | "AccessDenied"), _)
        | (None, Some(401 | 403)) => PublishError::AuthRejected(detail),
        (Some("NoSuchBucket"), _) | (None, Some(404)) => {
            PublishError::BucketNotFound(bucket.to_string())
        },
        _ => PublishError::Transport(detail),
    }
}
