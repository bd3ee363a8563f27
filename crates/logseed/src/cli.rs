//! Command-line surface
//!
//! One subcommand per variant. Connection flags fall back to `MINIO_*`
//! environment variables (a `.env` file is loaded first by the binary).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::pipeline::{validate_count, RunConfig, Variant};
use crate::storage::config::{StorageConfig, DEFAULT_REGION};

/// logseed - synthetic log generator for S3-compatible storage
#[derive(Parser, Debug)]
#[command(name = "logseed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log variant to generate
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the command reference as Markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,

    /// Object-store region
    #[arg(long, env = "S3_REGION", default_value = DEFAULT_REGION, global = true)]
    pub region: String,

    /// Directory for the temporary local file
    #[arg(long, default_value = ".", global = true)]
    pub work_dir: PathBuf,

    /// Seed for reproducible record values
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Abort the upload after this many seconds
    #[arg(long, global = true)]
    pub upload_timeout_secs: Option<u64>,

    /// Append a random suffix to the file name so runs in the same second never collide
    #[arg(long, global = true)]
    pub unique_suffix: bool,
}

/// Available log variants
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Application logs as CSV (default prefix "csv", 100 rows)
    Csv(TargetArgs),

    /// Web access logs as JSON lines (default prefix "json", 50 entries)
    Json(TargetArgs),

    /// System logs as Parquet (default prefix "parquet", 200 entries)
    Parquet(TargetArgs),
}

impl Commands {
    pub fn variant(&self) -> Variant {
        match self {
            Commands::Csv(_) => Variant::Csv,
            Commands::Json(_) => Variant::Json,
            Commands::Parquet(_) => Variant::Parquet,
        }
    }

    pub fn target(&self) -> &TargetArgs {
        match self {
            Commands::Csv(args) | Commands::Json(args) | Commands::Parquet(args) => args,
        }
    }
}

/// Destination and size of the generated file
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Object-store endpoint, e.g. http://localhost:9000
    #[arg(long, env = "MINIO_ENDPOINT")]
    pub minio_endpoint: String,

    /// Object-store access key
    #[arg(long, env = "MINIO_ACCESS_KEY")]
    pub minio_access_key: String,

    /// Object-store secret key
    #[arg(long, env = "MINIO_SECRET_KEY", hide_env_values = true)]
    pub minio_secret_key: String,

    /// Destination bucket
    #[arg(long, env = "MINIO_BUCKET")]
    pub bucket: String,

    /// Key prefix ("folder") in the bucket [default: the variant name]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Number of records to generate [default: depends on the variant]
    #[arg(
        long = "num-records",
        visible_aliases = ["num-rows", "num-logs"],
        allow_negative_numbers = true
    )]
    pub num_records: Option<i64>,
}

/// Validated inputs for one run
#[derive(Debug, Clone)]
pub struct Invocation {
    pub run: RunConfig,
    pub storage: StorageConfig,
}

impl Cli {
    /// Validate flags for `command` into run and storage settings
    pub fn invocation(&self, command: &Commands) -> Result<Invocation> {
        let target = command.target();
        let mut run = RunConfig::new(command.variant())
            .with_work_dir(&self.work_dir)
            .with_seed(self.seed)
            .with_unique_suffix(self.unique_suffix);

        if let Some(count) = target.num_records {
            run = run.with_count(validate_count(count)?);
        }

        if let Some(prefix) = &target.prefix {
            run = run.with_prefix(prefix.clone());
        }

        let storage = StorageConfig::for_minio(
            target.minio_endpoint.clone(),
            target.bucket.clone(),
            target.minio_access_key.clone(),
            target.minio_secret_key.clone(),
        )
        .with_region(self.region.clone())
        .with_upload_timeout(self.upload_timeout_secs.map(Duration::from_secs));
        storage.validate()?;

        Ok(Invocation { run, storage })
    }
}
