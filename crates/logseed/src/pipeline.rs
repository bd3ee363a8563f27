//! Generate → serialize → publish → clean up
//!
//! One [`Pipeline`] run walks
//! `Start → Generated → Serialized → Published | PublishFailed → CleanedUp`.
//! Once a local artifact path has been handed to the serializer it is owned
//! by an [`ArtifactGuard`], which removes the file on every exit path.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::error::{PipelineError, Result};
use crate::generator::Generator;
use crate::naming::{destination_key, ArtifactName};
use crate::schema::SchemaId;
use crate::serializer::{serialize, Format};
use crate::storage::{Publisher, UploadResult};

// ============================================================================
// Variants
// ============================================================================

/// Largest record count accepted from the command line
pub const MAX_RECORD_COUNT: i64 = 10_000_000;

/// One of the three generator configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Csv,
    Json,
    Parquet,
}

/// Everything that distinguishes one variant from another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub schema: SchemaId,
    pub format: Format,
    pub basename: &'static str,
    pub default_prefix: &'static str,
    pub default_count: usize,
    pub label: &'static str,
}

impl Variant {
    pub fn spec(self) -> VariantSpec {
        match self {
            Variant::Csv => VariantSpec {
                schema: SchemaId::AppLog,
                format: Format::Csv,
                basename: "app_log",
                default_prefix: "csv",
                default_count: 100,
                label: "CSV LOGS",
            },
            Variant::Json => VariantSpec {
                schema: SchemaId::WebLog,
                format: Format::JsonLines,
                basename: "web_log",
                default_prefix: "json",
                default_count: 50,
                label: "JSON LOGS",
            },
            Variant::Parquet => VariantSpec {
                schema: SchemaId::SysLog,
                format: Format::Parquet,
                basename: "sys_log",
                default_prefix: "parquet",
                default_count: 200,
                label: "PARQUET LOGS",
            },
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Csv => write!(f, "csv"),
            Variant::Json => write!(f, "json"),
            Variant::Parquet => write!(f, "parquet"),
        }
    }
}

// ============================================================================
// Run Configuration
// ============================================================================

/// Inputs for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub variant: Variant,
    pub count: usize,
    pub prefix: String,
    pub work_dir: PathBuf,
    pub seed: Option<u64>,
    pub unique_suffix: bool,
}

impl RunConfig {
    /// Variant defaults, writing into the current directory
    pub fn new(variant: Variant) -> Self {
        let spec = variant.spec();
        Self {
            variant,
            count: spec.default_count,
            prefix: spec.default_prefix.to_string(),
            work_dir: PathBuf::from("."),
            seed: None,
            unique_suffix: false,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_unique_suffix(mut self, unique: bool) -> Self {
        self.unique_suffix = unique;
        self
    }
}

/// Check a user-supplied record count
pub fn validate_count(count: i64) -> Result<usize> {
    if count < 0 {
        return Err(PipelineError::config(format!(
            "record count must not be negative (got {})",
            count
        )));
    }
    if count > MAX_RECORD_COUNT {
        return Err(PipelineError::config(format!(
            "record count {} exceeds the maximum of {}",
            count, MAX_RECORD_COUNT
        )));
    }
    usize::try_from(count).map_err(|e| PipelineError::config(e.to_string()))
}

// ============================================================================
// Local Artifact Ownership
// ============================================================================

/// Result of removing the local artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    AlreadyAbsent,
    Failed(String),
}

/// Sole owner of the local artifact path
///
/// Call [`ArtifactGuard::cleanup`] to remove the file and learn the outcome;
/// if the guard is dropped first, the file is removed silently.
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
    armed: bool,
}

impl ArtifactGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cleanup(mut self) -> CleanupOutcome {
        self.armed = false;
        match std::fs::remove_file(&self.path) {
            Ok(()) => CleanupOutcome::Removed,
            Err(e) if e.kind() == ErrorKind::NotFound => CleanupOutcome::AlreadyAbsent,
            Err(e) => CleanupOutcome::Failed(e.to_string()),
        }
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Position in the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Generated,
    Serialized,
    Published,
    PublishFailed,
    CleanedUp,
}

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub variant: Variant,
    pub records: usize,
    pub filename: String,
    pub upload: UploadResult,
    pub cleanup: CleanupOutcome,
    pub state: RunState,
}

impl RunReport {
    /// The line printed once the run has finished
    ///
    /// Only claims the local file is gone when cleanup actually removed it.
    pub fn summary(&self) -> String {
        let label = self.variant.spec().label;
        match &self.cleanup {
            CleanupOutcome::Removed | CleanupOutcome::AlreadyAbsent => format!(
                "[{}] Successfully generated & uploaded {} to MinIO, then removed local file.",
                label, self.filename
            ),
            CleanupOutcome::Failed(reason) => format!(
                "[{}] Successfully generated & uploaded {} to MinIO; local file {} could not be removed: {}",
                label, self.filename, self.filename, reason
            ),
        }
    }
}

pub struct Pipeline<P> {
    config: RunConfig,
    publisher: P,
}

impl<P: Publisher> Pipeline<P> {
    pub fn new(config: RunConfig, publisher: P) -> Self {
        Self { config, publisher }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run with artifact names stamped from the local wall clock
    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(Local::now().naive_local()).await
    }

    /// Run with artifact names stamped from `now`
    #[instrument(skip(self), fields(variant = %self.config.variant, count = self.config.count))]
    pub async fn run_at(&self, now: NaiveDateTime) -> Result<RunReport> {
        let start_time = Instant::now();
        let spec = self.config.variant.spec();
        let mut state = RunState::Start;

        let batch = Generator::new(self.config.seed).generate(self.config.count, spec.schema);
        advance(&mut state, RunState::Generated);

        let mut name = ArtifactName::new(spec.basename, spec.format.extension(), now);
        if self.config.unique_suffix {
            name = name.with_unique_suffix();
        }
        let filename = name.file_name();
        let key = destination_key(&self.config.prefix, &filename);
        let bucket = self.publisher.bucket().to_string();

        let artifact = ArtifactGuard::new(self.config.work_dir.join(&filename));

        if let Err(source) = serialize(&batch, spec.format, artifact.path()) {
            let path = artifact.path().to_path_buf();
            report_cleanup(&path, &artifact.cleanup());
            return Err(PipelineError::Serialization { path, source });
        }
        drop(batch);
        advance(&mut state, RunState::Serialized);

        println!("Uploading {} to s3://{}/{}", filename, bucket, key);

        let published = self
            .publisher
            .publish(artifact.path(), &key, spec.format.content_type())
            .await;
        advance(
            &mut state,
            if published.is_ok() {
                RunState::Published
            } else {
                RunState::PublishFailed
            },
        );

        let path = artifact.path().to_path_buf();
        let cleanup = artifact.cleanup();
        report_cleanup(&path, &cleanup);
        advance(&mut state, RunState::CleanedUp);

        let upload = published.map_err(|source| PipelineError::Publish {
            bucket,
            key,
            source,
        })?;

        info!(
            key = %upload.key,
            bytes = upload.size,
            checksum = %upload.checksum,
            "Run complete in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(RunReport {
            variant: self.config.variant,
            records: self.config.count,
            filename,
            upload,
            cleanup,
            state,
        })
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!(from = ?*state, to = ?next, "Pipeline state change");
    *state = next;
}

fn report_cleanup(path: &Path, outcome: &CleanupOutcome) {
    match outcome {
        CleanupOutcome::Removed => debug!(path = %path.display(), "Removed local artifact"),
        CleanupOutcome::AlreadyAbsent => debug!(path = %path.display(), "No local artifact to remove"),
        CleanupOutcome::Failed(reason) => {
            warn!(path = %path.display(), reason = %reason, "Failed to remove local artifact")
        },
    }
}
