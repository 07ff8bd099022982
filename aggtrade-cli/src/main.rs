//! aggtrade CLI: aggregate, simulate and bench commands.
//!
//! Commands:
//! - `aggregate`: bucket a trade file into aggregated ticks
//! - `simulate`: replay a trade file through the account simulator
//! - `bench`: time scalar against vectorized/batch on synthetic data

mod bench;

use aggtrade_core::data::{batch_from_dataframe, TradeSchema};
use aggtrade_core::{
    aggregate, AggregatedTick, ColumnarBatch, ProcessingMode, RunConfig, SimulationEngine,
    TradeData,
};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "aggtrade",
    about = "aggtrade CLI: trade bucketing and account simulation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate raw trades into fixed-interval ticks.
    Aggregate {
        /// Trade file (.csv or .parquet) with timestamp, price, qty, side columns.
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML run config ([engine] / [aggregation] sections).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bucket width in milliseconds. Overrides the config file.
        #[arg(long)]
        bucket_ms: Option<i64>,

        /// Tick size. Overrides the config file.
        #[arg(long)]
        tick_size: Option<f64>,

        /// Processing mode: scalar or vectorized (batch).
        #[arg(long, default_value = "vectorized")]
        mode: ProcessingMode,

        /// Write aggregated ticks to this CSV file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay trades through the account simulator and print the final state.
    Simulate {
        /// Trade file (.csv or .parquet).
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML run config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Starting cash. Overrides the config file.
        #[arg(long)]
        initial_cash: Option<f64>,

        /// Tick size. Overrides the config file.
        #[arg(long)]
        tick_size: Option<f64>,

        /// Processing mode: scalar or batch.
        #[arg(long, default_value = "batch")]
        mode: ProcessingMode,
    },
    /// Benchmark scalar vs vectorized/batch variants on synthetic trades.
    Bench {
        /// Number of synthetic trades.
        #[arg(long, default_value_t = 1_000_000)]
        ticks: usize,

        /// RNG seed for the synthetic stream.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Bucket width in milliseconds.
        #[arg(long, default_value_t = 50)]
        bucket_ms: i64,

        /// Tick size.
        #[arg(long, default_value_t = 10.0)]
        tick_size: f64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            input,
            config,
            bucket_ms,
            tick_size,
            mode,
            output,
        } => {
            let mut run_config = load_run_config(config.as_deref())?;
            if let Some(bucket_ms) = bucket_ms {
                run_config.aggregation.bucket_ms = bucket_ms;
            }
            if let Some(tick_size) = tick_size {
                run_config.aggregation.tick_size = tick_size;
            }
            run_aggregate(&input, &run_config, mode, output.as_deref())
        }
        Commands::Simulate {
            input,
            config,
            initial_cash,
            tick_size,
            mode,
        } => {
            let mut run_config = load_run_config(config.as_deref())?;
            if let Some(initial_cash) = initial_cash {
                run_config.engine.initial_cash = initial_cash;
            }
            if let Some(tick_size) = tick_size {
                run_config.engine.tick_size = tick_size;
            }
            run_simulate(&input, &run_config, mode)
        }
        Commands::Bench {
            ticks,
            seed,
            bucket_ms,
            tick_size,
        } => bench::run_bench(ticks, seed, bucket_ms, tick_size),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aggtrade=info,aggtrade_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_run_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

/// Read a trade file into a batch. Rows keep file order.
fn load_trades(path: &Path) -> Result<ColumnarBatch> {
    let frame = match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(path, Default::default())?,
        Some("csv") => LazyCsvReader::new(path).with_has_header(true).finish()?,
        _ => bail!(
            "unsupported input '{}': expected .csv or .parquet",
            path.display()
        ),
    };
    let df = TradeSchema::normalize(frame)
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let batch = batch_from_dataframe(&df)?;
    tracing::info!(rows = batch.len(), path = %path.display(), "trades loaded");
    Ok(batch)
}

fn run_aggregate(
    input: &Path,
    config: &RunConfig,
    mode: ProcessingMode,
    output: Option<&Path>,
) -> Result<()> {
    config.aggregation.validate()?;
    let batch = load_trades(input)?;

    let start = Instant::now();
    let ticks = aggregate(TradeData::Columnar(&batch), mode, &config.aggregation)?;
    let elapsed = start.elapsed();

    print_aggregate_summary(&batch, &ticks, mode, elapsed.as_secs_f64());

    if let Some(path) = output {
        write_ticks_csv(path, &ticks)?;
        println!("Ticks written to: {}", path.display());
    }
    Ok(())
}

fn print_aggregate_summary(
    batch: &ColumnarBatch,
    ticks: &[AggregatedTick],
    mode: ProcessingMode,
    secs: f64,
) {
    println!("Mode:          {mode}");
    println!("Input trades:  {}", batch.len());
    println!("Output ticks:  {}", ticks.len());
    println!("Elapsed:       {secs:.3}s");
    if secs > 0.0 {
        println!("Throughput:    {}", bench::format_throughput(batch.len() as f64 / secs));
    }
    if let (Some(first), Some(last)) = (ticks.first(), ticks.last()) {
        println!("First bucket:  {}", format_ms(first.bucket_start_ms));
        println!("Last bucket:   {}", format_ms(last.bucket_start_ms));
    }
}

fn format_ms(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn write_ticks_csv(path: &Path, ticks: &[AggregatedTick]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for tick in ticks {
        writer.serialize(tick)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_simulate(input: &Path, config: &RunConfig, mode: ProcessingMode) -> Result<()> {
    let mut engine = SimulationEngine::new(config.engine.clone())?;
    let batch = load_trades(input)?;

    let start = Instant::now();
    let snapshot = engine.run(TradeData::Columnar(&batch), mode)?;
    let secs = start.elapsed().as_secs_f64();

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    tracing::info!(rows = batch.len(), %mode, elapsed_s = secs, "simulation done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("aggtrade-cli-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn format_ms_renders_utc() {
        assert_eq!(format_ms(1_609_459_200_050), "2021-01-01 00:00:00.050");
    }

    #[test]
    fn load_csv_and_aggregate_to_file() {
        let input = write_csv(
            "trades.csv",
            "timestamp,price,qty,side\n99,100.0,1.0,0\n100,105.0,2.0,1\n101,110.0,1.0,0\n",
        );
        let batch = load_trades(&input).unwrap();
        assert_eq!(batch.len(), 3);

        let output = input.with_extension("out.csv");
        let mut config = RunConfig::default();
        config.aggregation.bucket_ms = 100;
        run_aggregate(&input, &config, ProcessingMode::Scalar, Some(&output)).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        // header plus buckets 0 and 100
        assert_eq!(written.lines().count(), 3);
        std::fs::remove_file(input).ok();
        std::fs::remove_file(output).ok();
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_trades(Path::new("trades.json")).unwrap_err();
        assert!(err.to_string().contains("unsupported input"));
    }

    #[test]
    fn cli_parses_mode_aliases() {
        let cli = Cli::try_parse_from([
            "aggtrade", "aggregate", "--input", "t.csv", "--mode", "scalar",
        ])
        .unwrap();
        match cli.command {
            Commands::Aggregate { mode, .. } => assert_eq!(mode, ProcessingMode::Scalar),
            _ => panic!("expected aggregate"),
        }
        let cli = Cli::try_parse_from(["aggtrade", "simulate", "--input", "t.csv"]).unwrap();
        match cli.command {
            Commands::Simulate { mode, .. } => assert_eq!(mode, ProcessingMode::Vectorized),
            _ => panic!("expected simulate"),
        }
    }
}
