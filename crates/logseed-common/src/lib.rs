//! Logseed Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities and error handling for the logseed workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`LogseedError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup driven by CLI flags and environment
//! - **Checksums**: SHA-256 digests of generated artifacts
//!
//! # Example
//!
//! ```
//! use logseed_common::checksum::checksum_bytes;
//!
//! let checksum = checksum_bytes(b"timestamp,log_level\r\n");
//! assert_eq!(checksum.len(), 64);
//! ```

pub mod checksum;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{LogseedError, Result};
