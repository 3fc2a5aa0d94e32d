//! EdgeLab CLI — run the expectancy pipeline and present the verdict.
//!
//! Commands:
//! - `analyze` — load a CSV of daily bars, run the pipeline, print the report
//! - `demo` — same pipeline on a deterministic synthetic series
//!
//! All user-facing output lives here; the engine only returns structured
//! values.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use edgelab_core::domain::PriceSeries;
use edgelab_runner::{analyze, load_csv, AnalysisConfig, AnalysisReport, Verdict};

#[derive(Parser)]
#[command(
    name = "edgelab",
    about = "EdgeLab CLI — event-conditioned return expectancy"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV of daily bars (date,open,high,low,close).
    Analyze {
        /// Path to the CSV file.
        #[arg(long)]
        csv: PathBuf,

        /// Symbol label for the report. Defaults to the file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// TOML config file with horizon/trend_windows/divergence_horizon.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Forward-return horizon override, in bars.
        #[arg(long)]
        horizon: Option<usize>,

        /// Divergence forward-return horizon override, in bars.
        #[arg(long)]
        divergence_horizon: Option<usize>,

        /// Only analyze bars on or after this date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Only analyze bars on or before this date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,

        /// Write the JSON report here as well.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the pipeline on a synthetic random-walk series.
    Demo {
        /// Number of synthetic bars.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// RNG seed; the same seed reproduces the same series.
        #[arg(long, default_value_t = 7)]
        seed: u64,

        /// Write the JSON report here as well.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            csv,
            symbol,
            config,
            horizon,
            divergence_horizon,
            start,
            end,
            output,
        } => run_analyze(
            csv,
            symbol,
            config,
            horizon,
            divergence_horizon,
            start,
            end,
            output,
        ),
        Commands::Demo { bars, seed, output } => run_demo(bars, seed, output),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    csv: PathBuf,
    symbol: Option<String>,
    config_path: Option<PathBuf>,
    horizon: Option<usize>,
    divergence_horizon: Option<usize>,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(h) = horizon {
        config.horizon = h;
    }
    if let Some(m) = divergence_horizon {
        config.divergence_horizon = m;
    }

    let symbol = symbol.unwrap_or_else(|| {
        csv.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string())
    });

    let series =
        load_csv(&csv, &symbol).with_context(|| format!("loading {}", csv.display()))?;
    let series = clip_to_range(series, start.as_deref(), end.as_deref())?;
    let report = analyze(&series, &config)?;

    print_report(&report);
    if let Some(path) = output {
        save_report(&report, &path)?;
    }
    Ok(())
}

fn run_demo(bars: usize, seed: u64, output: Option<PathBuf>) -> Result<()> {
    let series = edgelab_runner::synthetic::random_walk("DEMO", bars, seed);
    let report = analyze(&series, &AnalysisConfig::default())?;

    print_report(&report);
    if let Some(path) = output {
        save_report(&report, &path)?;
    }
    Ok(())
}

/// Restrict the series to [start, end]. Bars keep their original order, so
/// the clipped series re-validates trivially.
fn clip_to_range(
    series: PriceSeries,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<PriceSeries> {
    if start.is_none() && end.is_none() {
        return Ok(series);
    }

    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
    };
    let start = start.map(parse).transpose()?;
    let end = end.map(parse).transpose()?;

    let bars: Vec<_> = series
        .bars()
        .iter()
        .filter(|b| start.map_or(true, |d| b.date >= d) && end.map_or(true, |d| b.date <= d))
        .copied()
        .collect();

    Ok(PriceSeries::new(series.symbol(), bars)?)
}

fn save_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("Report saved to: {}", path.display());
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

fn print_report(report: &AnalysisReport) {
    println!();
    println!("=== Expectancy Report ===");
    println!("Symbol:         {}", report.symbol);
    println!("Bars:           {}", report.bar_count);
    println!("Config:         {}", &report.config_id[..12.min(report.config_id.len())]);
    println!();
    println!(
        "{:<20} {:<7} {:>7} {:>7} {:>8} {:>8} {:>8} {:>8}",
        "Signal", "Active", "Samples", "Win%", "Mean", "Median", "Max", "Min"
    );
    println!("{}", "-".repeat(80));
    for signal in &report.signals {
        println!(
            "{:<20} {:<7} {:>7} {:>7.1} {:>8} {:>8} {:>8} {:>8}",
            signal.kind.to_string(),
            if signal.active { "yes" } else { "no" },
            signal.stats.sample_count,
            signal.stats.positive_probability,
            fmt_opt(signal.stats.mean),
            fmt_opt(signal.stats.median),
            fmt_opt(signal.stats.max),
            fmt_opt(signal.stats.min),
        );
    }
    println!();
    println!("Expectation:    {:+.3}%", report.decision.expectation);
    println!(
        "Verdict:        {}",
        match report.decision.verdict {
            Verdict::Buy => "BUY",
            Verdict::NoBuy => "NO BUY",
        }
    );
    println!();
}
