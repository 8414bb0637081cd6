//! lbsim — run the rust_lb load-balancer simulation from the command line.
//!
//! A pool of servers drains a queue of requests one processing cycle per
//! tick.  The pool grows by one server whenever the queue backs up and
//! shrinks by one idle server whenever the queue is empty.
//!
//! # Usage
//!
//! ```text
//! lbsim --servers 10 --ticks 10000 --seed 42
//! lbsim --config demos/basic/config.json --output ./output --quiet
//! RUST_LOG=debug lbsim --quiet        # per-request lines at debug level
//! ```

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use lb_core::{SimConfig, coerce_pool_size};
use lb_output::{ConsoleReporter, CsvWriter, SimOutputObserver};
use lb_sim::{EngineBuilder, FinalReport};
use lb_traffic::ArrivalModel;

#[derive(Parser)]
#[command(name = "lbsim", about = "Load-balancer queueing simulation")]
struct Cli {
    /// Initial number of servers.  Values below 1 are raised to 1.
    #[arg(long, allow_negative_numbers = true)]
    servers: Option<i64>,

    /// Number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u64>,

    /// RNG seed.  Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with `sim` and `traffic` sections.  Flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for events.csv, snapshots.csv, and final_report.csv.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only narrate scaling, snapshots, and the summary.
    #[arg(long)]
    quiet: bool,
}

/// Shape of the `--config` file.  Missing sections take their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunFile {
    sim:     SimConfig,
    traffic: ArrivalModel,
}

fn load_run_file(path: &Path) -> Result<RunFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // 1. Config: file first, then flags on top.
    let RunFile { sim: mut config, traffic } = match &cli.config {
        Some(path) => load_run_file(path)?,
        None => RunFile::default(),
    };
    if let Some(servers) = cli.servers {
        config.initial_pool_size = coerce_pool_size(servers);
    }
    if let Some(ticks) = cli.ticks {
        config.total_ticks = ticks;
    }
    config.seed = cli.seed.unwrap_or_else(clock_seed);
    let seed = config.seed;

    // 2. Engine.
    let mut engine = EngineBuilder::seeded(config).traffic(traffic).build()?;

    let mut console = if cli.quiet { ConsoleReporter::quiet() } else { ConsoleReporter::new() };

    // 3. Run, with CSV export when asked for.
    let t0 = Instant::now();
    let report = match &cli.output {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output dir {}", dir.display()))?;
            let writer = CsvWriter::new(dir)?;
            let mut obs = (console, SimOutputObserver::new(writer));
            let report = engine.run(&mut obs);
            if let Some(e) = obs.1.take_error() {
                return Err(e).context("writing CSV output");
            }
            info!(dir = %dir.display(), rows = obs.1.events_written(), "CSV output written");
            report
        }
        None => engine.run(&mut console),
    };
    let elapsed = t0.elapsed();

    summarize(&report, seed, elapsed.as_secs_f64());
    Ok(())
}

fn summarize(report: &FinalReport, seed: u64, secs: f64) {
    println!();
    println!("=== lbsim summary (seed {seed}) ===");
    println!("{report}");
    println!("wall time:              {secs:.3}s");
}
