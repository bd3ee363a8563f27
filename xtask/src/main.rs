//! Build automation tasks for logseed
//!
//! Currently generates the Markdown command reference from the clap
//! definitions in `logseed::cli`.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for logseed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<logseed::Cli>();

    let content = format!(
        r#"# logseed CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

logseed generates synthetic log records, writes them to a local file and
uploads that file to an S3-compatible object store such as MinIO. The local
file is removed afterwards whether or not the upload succeeded.

| Command   | Records            | Default count | Default prefix |
|-----------|--------------------|---------------|----------------|
| `csv`     | application events | 100           | `csv`          |
| `json`    | web access entries | 50            | `json`         |
| `parquet` | system events      | 200           | `parquet`      |

## Quick Start

```bash
export MINIO_ENDPOINT=http://localhost:9000
export MINIO_ACCESS_KEY=minioadmin
export MINIO_SECRET_KEY=minioadmin
export MINIO_BUCKET=logs

logseed csv --num-rows 1000
logseed json --prefix raw/web
logseed parquet --num-logs 500 --seed 42
```

## Commands

{}

## Environment Variables

- `MINIO_ENDPOINT`, `MINIO_ACCESS_KEY`, `MINIO_SECRET_KEY`, `MINIO_BUCKET` - connection defaults
- `S3_REGION` - signing region (default: `us-east-1`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_FILTER`, `RUST_LOG` - diagnostic logging on stderr

A `.env` file in the working directory is loaded before arguments are parsed.

## Exit Status

- `0` - file generated, uploaded and removed
- `1` - serialization or upload failed
- `2` - invalid arguments

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("CLI.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
