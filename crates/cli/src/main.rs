//! weather-prep CLI — inspect a station log and export its feature matrix.
//!
//! Commands:
//! - `summary` — one-line diagnostic of a loaded station
//! - `stats` — target statistics and date range as JSON
//! - `features` — build the lag/rolling/seasonal feature matrix and write CSV
//! - `stream` — print `date,target` rows in date order without deduplication

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use weather_core::{Config, TempStats, DATE_FORMAT};
use weather_features::{stream_days, FeatureBuilder};
use weather_ingestion::{read_csv_path, WeatherStation};

#[derive(Parser)]
#[command(
    name = "weather-prep",
    about = "Validate a daily weather station log and derive forecasting features"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a one-line summary of the loaded station.
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print target statistics and the date range as JSON.
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Build the feature matrix and write it as CSV.
    Features {
        #[command(flatten)]
        input: InputArgs,

        /// Lags in days, comma separated (default 1,2,3,7).
        #[arg(long, value_delimiter = ',')]
        lags: Option<Vec<usize>>,

        /// Rolling windows in days, comma separated (default 3,7,14).
        #[arg(long, value_delimiter = ',')]
        windows: Option<Vec<usize>>,

        /// Output file. Defaults to stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the raw rows in date order (no cleaning, no deduplication).
    Stream {
        #[command(flatten)]
        input: InputArgs,

        /// Stop after this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args, Clone)]
struct InputArgs {
    /// Station CSV file.
    csv: PathBuf,

    /// TOML config file with [loader] and [features] sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Station label used in diagnostics.
    #[arg(long)]
    station_name: Option<String>,

    /// Date column name.
    #[arg(long)]
    date_col: Option<String>,

    /// Target column name.
    #[arg(long)]
    target_col: Option<String>,
}

impl InputArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(name) = &self.station_name {
            config.loader.station_name = name.clone();
        }
        if let Some(col) = &self.date_col {
            config.loader.date_col = col.clone();
        }
        if let Some(col) = &self.target_col {
            config.loader.target_col = col.clone();
        }
        config.features.date_col = config.loader.date_col.clone();
        config.features.target_col = config.loader.target_col.clone();
        Ok(config)
    }

    fn load(&self, config: &Config) -> Result<WeatherStation> {
        WeatherStation::load(&self.csv, &config.loader)
            .with_context(|| format!("loading station {}", self.csv.display()))
    }
}

#[derive(Serialize)]
struct StatsReport<'a> {
    station: &'a str,
    rows: usize,
    first_day: NaiveDate,
    last_day: NaiveDate,
    stats: TempStats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Summary { input } => cmd_summary(&input, &mut out),
        Commands::Stats { input } => cmd_stats(&input, &mut out),
        Commands::Features {
            input,
            lags,
            windows,
            output,
        } => cmd_features(&input, lags, windows, output.as_deref(), &mut out),
        Commands::Stream { input, limit } => cmd_stream(&input, limit, &mut out),
    }
}

fn cmd_summary<W: Write>(input: &InputArgs, out: &mut W) -> Result<()> {
    let config = input.resolve()?;
    let station = input.load(&config)?;
    writeln!(out, "{station}")?;
    Ok(())
}

fn cmd_stats<W: Write>(input: &InputArgs, out: &mut W) -> Result<()> {
    let config = input.resolve()?;
    let station = input.load(&config)?;
    let (first_day, last_day) = station.date_range()?;
    let report = StatsReport {
        station: station.name(),
        rows: station.series().len(),
        first_day,
        last_day,
        stats: station.temp_stats()?,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn cmd_features<W: Write>(
    input: &InputArgs,
    lags: Option<Vec<usize>>,
    windows: Option<Vec<usize>>,
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let mut config = input.resolve()?;
    if let Some(lags) = lags {
        config.features.lags = lags;
    }
    if let Some(windows) = windows {
        config.features.windows = windows;
    }

    let station = input.load(&config)?;
    let builder = FeatureBuilder::new(config.features)?;
    let matrix = builder.build_series(station.series())?;
    info!(
        rows = matrix.len(),
        columns = matrix.columns().len(),
        "built feature matrix"
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            matrix.write_csv(BufWriter::new(file))?;
        }
        None => matrix.write_csv(&mut *out)?,
    }
    Ok(())
}

fn cmd_stream<W: Write>(input: &InputArgs, limit: Option<usize>, out: &mut W) -> Result<()> {
    let config = input.resolve()?;
    let table = read_csv_path(&input.csv)?;
    let target_col = config.loader.target_col.as_str();

    writeln!(out, "{},{}", config.loader.date_col, target_col)?;
    let days = stream_days(&table, &config.loader.date_col)?;
    for (date, record) in days.take(limit.unwrap_or(usize::MAX)) {
        writeln!(
            out,
            "{},{}",
            date.format(DATE_FORMAT),
            record.get(target_col).unwrap_or("")
        )?;
    }
    Ok(())
}
