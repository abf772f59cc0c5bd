//! # infragate
//!
//! Merge gate for infrastructure changes. Reads a security scan report and
//! one to three cost estimate reports, evaluates the configured policy, prints
//! the verdict and exits:
//!
//! - `0` pass, or pass with warnings
//! - `1` blocked
//! - `2` configuration error, or a report failure in strict mode

use std::fs::OpenOptions;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use infragate_analysis::loader::ReportSource;
use infragate_analysis::pipeline::{run_gate_with_config, GateInputs, GateRun};
use infragate_analysis::reporters::console::ConsoleReporter;
use infragate_analysis::reporters::markdown::MarkdownReporter;
use infragate_analysis::reporters::{create_reporter, Reporter};
use infragate_core::config::{AcquisitionMode, CliOverrides, InfragateConfig, ThresholdConfig};
use infragate_core::constants::EXIT_CONFIG_ERROR;
use infragate_core::errors::{GateError, InfragateErrorCode};

/// Block merges that add severe findings or too much monthly cost.
#[derive(Parser, Debug)]
#[command(name = "infragate", version, about, long_about = None)]
struct Cli {
    /// Security scan report (failed checks).
    #[arg(long, value_name = "FILE")]
    security: Option<PathBuf>,

    /// Cost diff report (baseline vs. proposed).
    #[arg(long, value_name = "FILE")]
    diff: Option<PathBuf>,

    /// Baseline cost snapshot.
    #[arg(long, value_name = "FILE")]
    base: Option<PathBuf>,

    /// Proposed cost snapshot.
    #[arg(long, value_name = "FILE")]
    proposed: Option<PathBuf>,

    /// Configuration file (default: ./infragate.toml if present).
    #[arg(short, long, env = "INFRAGATE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report acquisition: `lenient` assumes missing or malformed reports
    /// empty, `strict` fails on them.
    #[arg(long, value_name = "MODE", value_parser = AcquisitionMode::from_str)]
    mode: Option<AcquisitionMode>,

    /// Output format: console, json, markdown.
    #[arg(short, long)]
    format: Option<String>,

    /// Currency label used in output.
    #[arg(long)]
    currency: Option<String>,

    #[arg(long, value_name = "N")]
    max_critical: Option<u64>,

    #[arg(long, value_name = "N")]
    max_high: Option<u64>,

    #[arg(long, value_name = "N")]
    max_medium: Option<u64>,

    #[arg(long, value_name = "N")]
    max_low: Option<u64>,

    /// Maximum monthly cost increase.
    #[arg(long, value_name = "AMOUNT")]
    max_cost_delta: Option<f64>,

    /// Maximum monthly cost increase relative to the baseline, in percent.
    #[arg(long, value_name = "PERCENT")]
    max_cost_increase_percent: Option<f64>,

    /// Cost delta at which the gate warns (tiered policy).
    #[arg(long, value_name = "AMOUNT")]
    cost_warn: Option<f64>,

    /// Cost delta at which the gate blocks (tiered policy).
    #[arg(long, value_name = "AMOUNT")]
    cost_block: Option<f64>,

    /// Append a markdown summary to this file.
    #[arg(long, env = "GITHUB_STEP_SUMMARY", value_name = "FILE")]
    summary_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mode: self.mode,
            format: self.format.clone(),
            currency: self.currency.clone(),
            thresholds: ThresholdConfig {
                max_critical: self.max_critical,
                max_high: self.max_high,
                max_medium: self.max_medium,
                max_low: self.max_low,
                max_cost_delta: self.max_cost_delta,
                max_cost_increase_percent: self.max_cost_increase_percent,
                cost_warn: self.cost_warn,
                cost_block: self.cost_block,
            },
        }
    }

    fn inputs(&self) -> GateInputs {
        let source = |p: &Option<PathBuf>| p.clone().map(ReportSource::path);
        GateInputs {
            security: source(&self.security),
            cost_diff: source(&self.diff),
            cost_base: source(&self.base),
            cost_proposed: source(&self.proposed),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    infragate_core::tracing::init_tracing();
    tracing::debug!(version = infragate_core::constants::VERSION, "infragate starting");

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("infragate: {e:#}");
            EXIT_CONFIG_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let root = std::env::current_dir().context("cannot determine working directory")?;
    let config = InfragateConfig::load(&root, cli.config.as_deref(), Some(&cli.overrides()))
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;

    let run = run_gate_with_config(&cli.inputs(), &config).map_err(coded)?;
    for sub in &run.substitutions {
        warn!(
            source = %sub.source_name,
            kind = %sub.kind,
            cause = %sub.cause,
            "report {} assumed empty", sub.cause
        );
    }

    let currency = config.report.effective_currency();
    let output = render(&run, config.report.effective_format(), currency)?;
    print!("{output}");

    if let Some(path) = &cli.summary_file {
        if let Err(e) = append_summary(path, &run, currency) {
            warn!(path = %path.display(), error = %e, "could not write step summary");
        }
    }

    info!(status = %run.verdict.status(), "gate finished");
    Ok(run.verdict.exit_code())
}

fn render(run: &GateRun, format: &str, currency: &str) -> Result<String> {
    let reporter: Box<dyn Reporter> = match format {
        "console" => Box::new(ConsoleReporter::new(currency, std::io::stdout().is_terminal())),
        other => create_reporter(other, currency)
            .ok_or_else(|| coded(GateError::UnknownFormat(other.to_string())))?,
    };
    reporter.generate(&run.verdict).map_err(coded)
}

fn append_summary(path: &Path, run: &GateRun, currency: &str) -> Result<()> {
    let markdown = MarkdownReporter::new(currency)
        .generate(&run.verdict)
        .map_err(coded)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    writeln!(file, "{markdown}")?;
    Ok(())
}

fn coded(e: GateError) -> anyhow::Error {
    anyhow::anyhow!(e.coded_string())
}
