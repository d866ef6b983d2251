//! `lifeline` command-line entry point.
//!
//! # Responsibility
//! - Check JSON files against the `LifeEvent` record surface.
//! - Expose track labels and core version for quick sanity checks.
//!
//! # Invariants
//! - Exit code is 0 only when every record in every file conforms.
//! - File logging starts only when a log directory is configured.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lifeline_core::{
    check_document, default_log_level, init_logging, normalize_log_level, DocumentReport, Track,
};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod render;

/// Check life event documents.
#[derive(Parser, Debug)]
#[command(name = "lifeline", version, long_about = None)]
struct Cli {
    /// Log level (trace|debug|info|warn|error); defaults by build mode.
    /// Validated always, applied only together with --log-dir
    #[arg(
        long,
        global = true,
        env = "LIFELINE_LOG_LEVEL",
        value_name = "LEVEL",
        value_parser = parse_log_level
    )]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "LIFELINE_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Check that JSON files hold conforming life events
    Check {
        /// JSON files holding one event object or an array of events
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the valid track labels
    Tracks,
    /// Print the core library version
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    match cli.command {
        Command::Check { files, format } => check_files(&files, format),
        Command::Tracks => {
            print!("{}", track_listing());
            Ok(ExitCode::SUCCESS)
        }
        Command::Version => {
            println!("lifeline_core {}", lifeline_core::core_version());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_log_level(value: &str) -> std::result::Result<String, String> {
    normalize_log_level(value)
        .map(str::to_string)
        .map_err(|err| err.to_string())
}

fn track_listing() -> String {
    Track::ALL
        .iter()
        .map(|track| format!("{track}\n"))
        .collect()
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let Some(dir) = &cli.log_dir else {
        return Ok(());
    };
    let dir = std::path::absolute(dir)
        .with_context(|| format!("failed to resolve log directory {}", dir.display()))?;
    let dir = dir
        .to_str()
        .with_context(|| format!("log directory {} is not valid UTF-8", dir.display()))?;
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());

    init_logging(level, dir).context("failed to initialize logging")?;
    Ok(())
}

fn check_files(files: &[PathBuf], format: OutputFormat) -> Result<ExitCode> {
    let reports = check_all(files)?;

    match format {
        OutputFormat::Text => {
            for (path, report) in &reports {
                print!("{}", render::render_text(path, report));
            }
        }
        OutputFormat::Json => println!("{}", render::render_json(&reports)?),
    }

    let conforming = files_conform(&reports);
    info!(
        "event=cli_check module=cli status=ok files={} conforming={}",
        reports.len(),
        conforming
    );
    Ok(if conforming {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check_all(files: &[PathBuf]) -> Result<Vec<(PathBuf, DocumentReport)>> {
    files
        .iter()
        .map(|path| -> Result<(PathBuf, DocumentReport)> { Ok((path.clone(), check_file(path)?)) })
        .collect()
}

/// True when every record in every checked file conforms.
fn files_conform(reports: &[(PathBuf, DocumentReport)]) -> bool {
    reports.iter().all(|(_, report)| report.is_conforming())
}

fn check_file(path: &Path) -> Result<DocumentReport> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    check_document(&input).with_context(|| format!("failed to check {}", path.display()))
}
