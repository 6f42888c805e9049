use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod error;
mod git;
mod output;

use analysis::AnnualReport;
use crate::config::Config;
use git::stats::OffHours;
use git::{CommitCollector, DateWindow};
use output::{OutputFormat, Reporter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Your git repository path, defaults to the current working directory
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Year for the commit report, defaults to last year
    #[arg(long)]
    year: Option<i32>,

    /// Report type (console, html, json), defaults to console
    #[arg(long = "rt")]
    report_type: Option<String>,

    /// Output file for the html report
    #[arg(long, env = "ANNUAL_COMMITS_OUTPUT_FILE")]
    output_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout for the report itself
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let format: OutputFormat = cli
        .report_type
        .as_deref()
        .unwrap_or(&config.output.default_format)
        .parse()?;
    let output_file = cli
        .output_file
        .as_deref()
        .unwrap_or(&config.output.html_file);
    let year = cli.year.unwrap_or_else(|| Local::now().year() - 1);
    let hours = OffHours {
        late_start: config.analysis.late_start_hour,
        early_end: config.analysis.early_end_hour,
    };

    let reporter = Reporter::new(
        format,
        output_file,
        config.output.template.as_deref().map(Path::new),
        config.output.top_developers,
    )?;

    let window = DateWindow::for_year(year)?;
    info!("Building {:?} report for {} in {}", format, year, cli.path.display());

    let report = {
        let collector = CommitCollector::open(&cli.path)?;
        let commits = collector
            .collect(&window)
            .with_context(|| format!("Failed to collect commits for {}", year))?;
        let remote_url = collector.remote_url();
        AnnualReport::build(
            collector.repository_name(),
            remote_url.as_deref(),
            year,
            &commits,
            &hours,
        )
    };

    reporter.generate_report(&report)?;

    Ok(())
}
