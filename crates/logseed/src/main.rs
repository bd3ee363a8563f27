//! Logseed CLI - Main entry point

use clap::Parser;
use colored::Colorize;
use logseed::pipeline::CleanupOutcome;
use logseed::{Cli, PipelineError};
use logseed_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::debug;

#[tokio::main]
async fn main() {
    // A missing .env file is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = cli.command.as_ref() else {
        eprintln!("Error: A subcommand is required (csv, json or parquet)");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("logseed")
        .build();

    // Environment variables take precedence over the flags
    let log_config = LogConfig::from_env_over(log_config.clone()).unwrap_or(log_config);

    // The CLI still works without logging
    let _ = init_logging(&log_config);

    let result = match cli.invocation(command) {
        Ok(invocation) => logseed::execute(invocation).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            if matches!(report.cleanup, CleanupOutcome::Failed(_)) {
                println!("{}", report.summary().yellow());
            } else {
                println!("{}", report.summary());
            }
        },
        Err(e) => fail(e),
    }
}

fn fail(e: PipelineError) -> ! {
    debug!(stage = %e.stage(), error = %e, "Run failed");
    eprintln!("{} {}", "Error:".red(), e);
    process::exit(e.exit_code());
}
