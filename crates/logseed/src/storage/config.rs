use logseed_common::LogseedError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Region used when none is given; MinIO accepts any value
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub endpoint: Option<String>,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub path_style: bool,
    pub upload_timeout: Option<Duration>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("path_style", &self.path_style)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}

impl StorageConfig {
    /// Custom endpoint with path-style addressing, as MinIO expects
    pub fn for_minio(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            region: DEFAULT_REGION.to_string(),
            bucket: bucket.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            path_style: true,
            upload_timeout: None,
        }
    }

    /// Read the same variables the CLI falls back to
    ///
    /// `MINIO_ENDPOINT` is required; bucket and credentials default to the
    /// MinIO development values.
    pub fn from_env() -> Result<Self, LogseedError> {
        let endpoint = env::var("MINIO_ENDPOINT")
            .map_err(|_| LogseedError::config("MINIO_ENDPOINT is not set"))?;

        let mut config = Self::for_minio(
            endpoint,
            env::var("MINIO_BUCKET").unwrap_or_else(|_| "logseed".to_string()),
            env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string()),
            env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string()),
        );

        if let Ok(region) = env::var("S3_REGION") {
            config.region = region;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Reject values the S3 client would only fail on at upload time
    pub fn validate(&self) -> Result<(), LogseedError> {
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(LogseedError::config(format!(
                    "endpoint '{}' must start with http:// or https://",
                    endpoint
                )));
            }
        }

        if self.bucket.trim().is_empty() {
            return Err(LogseedError::config("bucket name must not be empty"));
        }

        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(LogseedError::config("access key and secret key are required"));
        }

        if self.upload_timeout == Some(Duration::ZERO) {
            return Err(LogseedError::config("upload timeout must be greater than zero"));
        }

        Ok(())
    }
}
