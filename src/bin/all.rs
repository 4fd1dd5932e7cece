//! Command line driver for the accuracy experiment.
//!
//! Usage:
//!   ip-accuracy                              # Full run with the default grid
//!   ip-accuracy --list                       # List kernels in log order
//!   ip-accuracy --length 100000 --spreads 10,100 --seed 42
//!   RUST_LOG=debug ip-accuracy ...           # Chunk plans and reference growth

use anyhow::Context;
use clap::Parser;
use inner_product_accuracy::experiment::{init_thread_pool, Experiment, ExperimentConfig};
use inner_product_accuracy::random::dataset::ConditioningProfile;
use inner_product_accuracy::registry::build_registry;
use inner_product_accuracy::tui;
use inner_product_accuracy::utils::TimingConfig;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ip-accuracy")]
#[command(version)]
#[command(about = "Accuracy and speed of inner product kernels on ill-conditioned data", long_about = None)]
struct Cli {
    /// Elements per generated vector
    #[arg(short = 'n', long, default_value_t = 20_000_000)]
    length: usize,

    /// Elements per task in the chunked kernels
    #[arg(short, long, default_value_t = inner_product_accuracy::math::inner_product::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Exponent spreads to test, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "10,30,50,100,300,500")]
    spreads: Vec<u32>,

    /// Conditioning profiles to test, comma separated (default: all)
    #[arg(short, long, value_delimiter = ',')]
    profiles: Vec<ConditioningProfile>,

    /// Random seed for reproducible runs (default: time-based)
    #[arg(long)]
    seed: Option<u64>,

    /// Result log, appended to
    #[arg(long, default_value = "inner_results.txt")]
    log: PathBuf,

    /// Measured runs per kernel; the median is reported
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Unmeasured runs per kernel before timing
    #[arg(short, long, default_value_t = 0)]
    warmup: usize,

    /// Worker threads for the parallel kernels (default: one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// List the kernels and exit
    #[arg(short, long, default_value_t = false)]
    list: bool,
}

impl Cli {
    fn config(&self) -> ExperimentConfig {
        ExperimentConfig {
            vector_length: self.length,
            chunk_size: self.chunk_size,
            exponent_spreads: self.spreads.clone(),
            profiles: if self.profiles.is_empty() {
                ConditioningProfile::ALL.to_vec()
            } else {
                self.profiles.clone()
            },
            seed: self.seed,
            log_path: self.log.clone(),
            timing: TimingConfig {
                runs_per_kernel: self.runs,
                warmup_iterations: self.warmup,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config().with_resolved_seed();
    config.validate()?;

    let registry = build_registry(config.chunk_size);
    if cli.list {
        tui::print_available_kernels(&registry);
        return Ok(());
    }

    if let Some(threads) = cli.threads {
        init_thread_pool(threads).context("configuring the rayon thread pool")?;
    }

    tui::print_header();
    tui::print_config_box(&config, rayon::current_num_threads());

    let records = Experiment::new(&config, &registry)
        .run_with(tui::print_trial_table)
        .with_context(|| format!("experiment aborted, log at {}", config.log_path.display()))?;

    info!(
        "{} trials appended to {}",
        records.len(),
        config.log_path.display()
    );
    Ok(())
}
