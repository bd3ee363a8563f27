//! Logseed Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Generates synthetic log records, writes them to a local file in one of
//! three formats and publishes that file to an S3-compatible object store.
//!
//! # Variants
//!
//! - **csv**: application activity logs, delimited text with a header row
//! - **json**: web access logs, one JSON object per line
//! - **parquet**: system event logs, a single Parquet table
//!
//! # Example
//!
//! ```no_run
//! use logseed::pipeline::{Pipeline, RunConfig, Variant};
//! use logseed::storage::{S3Publisher, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = StorageConfig::for_minio("http://localhost:9000", "logs", "minioadmin", "minioadmin");
//!     let publisher = S3Publisher::new(storage);
//!
//!     let report = Pipeline::new(RunConfig::new(Variant::Csv), publisher).run().await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod generator;
pub mod naming;
pub mod pipeline;
pub mod provider;
pub mod record;
pub mod schema;
pub mod serializer;
pub mod storage;

// Re-export commonly used types
pub use cli::{Cli, Commands, Invocation};
pub use error::{PipelineError, Result, Stage};
pub use pipeline::{Pipeline, RunConfig, RunReport, Variant};

use storage::S3Publisher;

/// Run one validated invocation against the configured object store
pub async fn execute(invocation: Invocation) -> Result<RunReport> {
    let publisher = S3Publisher::new(invocation.storage);
    Pipeline::new(invocation.run, publisher).run().await
}
