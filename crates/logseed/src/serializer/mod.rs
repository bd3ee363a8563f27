//! Serialization of batches to local artifacts
//!
//! Three encodings share one entry point, [`serialize`]:
//!
//! - **Csv**: header row plus one quoted-as-needed row per record
//! - **JsonLines**: one compact JSON object per line, LF-terminated
//! - **Parquet**: a single Arrow record batch written as one Parquet file
//!
//! Serializers only read the batch. A failed write may leave a partial file
//! behind; removing it is the pipeline's job.

mod columnar;
mod delimited;
mod json_lines;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::record::Batch;

pub use columnar::arrow_schema;

/// Errors raised while writing an artifact
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Record {row} does not match the {schema} schema")]
    Nonconforming { row: usize, schema: String },
}

/// On-disk encoding of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Csv,
    JsonLines,
    Parquet,
}

impl Format {
    /// File extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::JsonLines => "json",
            Format::Parquet => "parquet",
        }
    }

    /// MIME type sent with the upload
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::JsonLines => "application/x-ndjson",
            Format::Parquet => "application/vnd.apache.parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Csv => write!(f, "csv"),
            Format::JsonLines => write!(f, "json-lines"),
            Format::Parquet => write!(f, "parquet"),
        }
    }
}

/// Write `batch` to `path` in `format`, creating or truncating the file
pub fn serialize(batch: &Batch, format: Format, path: &Path) -> Result<(), SerializeError> {
    debug!(
        format = %format,
        records = batch.len(),
        path = %path.display(),
        "Serializing batch"
    );

    match format {
        Format::Csv => delimited::write(batch, path),
        Format::JsonLines => json_lines::write(batch, path),
        Format::Parquet => columnar::write(batch, path),
    }
}
