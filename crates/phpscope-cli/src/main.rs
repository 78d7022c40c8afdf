//! phpscope CLI - structural analysis of PHP source files
//!
//! Reports the classes, traits, interfaces, methods and functions declared
//! in each file, with line ranges, cyclomatic complexity and line-of-code
//! counters.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use phpscope_analyze::{logging, Analyzer, FileAnalysis};
use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use config::Config;
use output::{OutputFormat, Reporter};

#[derive(Parser)]
#[command(name = "phpscope")]
#[command(version)]
#[command(about = "Structural analysis of PHP source files")]
struct Cli {
    /// Files or directories to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format: text, json
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Path to config file (default: auto-detect .phpscope.toml)
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Write a debug log of the analysis to PATH
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_path) = &cli.debug_log {
        logging::init_logger(Some(log_path))
            .with_context(|| format!("Failed to open debug log {}", log_path.display()))?;
    }

    // Load config file
    let (config, config_path) = if cli.no_config {
        (Config::default(), None)
    } else if let Some(config_path) = &cli.config {
        (Config::load_path(config_path)?, Some(config_path.clone()))
    } else {
        match Config::load()? {
            Some((cfg, path)) => (cfg, Some(path)),
            None => (Config::default(), None),
        }
    };

    // Determine output format: flags, then config, then text
    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        match cli.format.as_deref().or(config.output.format.as_deref()) {
            Some(format) => OutputFormat::from_str(format).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid output format '{}'. Valid options: text, json",
                    format
                )
            })?,
            None => OutputFormat::Text,
        }
    };

    if cli.verbose && output_format == OutputFormat::Text {
        if let Some(path) = &config_path {
            println!("{}: {}", "Using config".bold(), path.display());
        }
        if let Some(log_path) = &cli.debug_log {
            println!("{}: {}", "Debug log".bold(), log_path.display());
        }
    }

    if let Some(path) = &config_path {
        logging::section("CONFIGURATION");
        logging::log(&format!("Loaded config from: {}", path.display()));
        logging::log(&format!("Exclude patterns: {}", config.paths.exclude.len()));
    }

    let analyzer = Analyzer::new().with_excludes(&config.paths.exclude)?;

    let mut reporter = Reporter::new(output_format, cli.verbose);

    // Report missing paths
    let mut existing: Vec<&Path> = Vec::new();
    for path in &cli.paths {
        if path.exists() {
            existing.push(path.as_path());
        } else if output_format == OutputFormat::Text {
            eprintln!(
                "{}: Path does not exist: {}",
                "Warning".yellow(),
                path.display()
            );
        }
    }

    let report = analyzer.analyze_paths(&existing);

    // Merge successes and failures back into path order
    let mut entries: Vec<(PathBuf, Result<FileAnalysis, String>)> = report
        .files
        .into_iter()
        .map(|(path, analysis)| (path, Ok(analysis)))
        .collect();
    for error in report.errors {
        let path = error.path().map(Path::to_path_buf).unwrap_or_default();
        let message = error
            .source()
            .map(|source| source.to_string())
            .unwrap_or_else(|| error.to_string());
        entries.push((path, Err(message)));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, entry) in entries {
        match entry {
            Ok(analysis) => reporter.report_file(&path, analysis),
            Err(message) => reporter.report_error(&path, &message),
        }
    }

    let exit_code = if reporter.summary().errors > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    };

    reporter.finish()?;

    Ok(exit_code)
}
