//! Error types for a logseed run
//!
//! Every fatal error names the stage it came from so the message printed on
//! exit says where the run stopped.

use logseed_common::LogseedError;
use std::path::PathBuf;
use thiserror::Error;

use crate::serializer::SerializeError;
use crate::storage::PublishError;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline stage at which a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Serialization,
    Publish,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Configuration => write!(f, "configuration"),
            Stage::Serialization => write!(f, "serialization"),
            Stage::Publish => write!(f, "publish"),
        }
    }
}

/// Fatal error for a single run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid command-line or environment input, caught before generation
    #[error("Configuration error: {0}. Run 'logseed --help' for usage.")]
    Config(String),

    /// Writing the local artifact failed
    #[error("Serialization failed writing '{}': {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: SerializeError,
    },

    /// Uploading the artifact failed
    #[error("Publish to s3://{bucket}/{key} failed: {source}")]
    Publish {
        bucket: String,
        key: String,
        #[source]
        source: PublishError,
    },
}

impl PipelineError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Config(_) => Stage::Configuration,
            PipelineError::Serialization { .. } => Stage::Serialization,
            PipelineError::Publish { .. } => Stage::Publish,
        }
    }

    /// Process exit status: 2 for usage problems, 1 for everything else
    pub fn exit_code(&self) -> i32 {
        match self.stage() {
            Stage::Configuration => 2,
            Stage::Serialization | Stage::Publish => 1,
        }
    }
}

impl From<LogseedError> for PipelineError {
    fn from(err: LogseedError) -> Self {
        match err {
            LogseedError::Config(msg) | LogseedError::Parse(msg) => Self::Config(msg),
            LogseedError::Io(e) => Self::Config(e.to_string()),
        }
    }
}
