//! Wall-clock timing of kernel runs.
//!
//! A kernel is run `warmup_iterations` times unmeasured, then
//! `runs_per_kernel` times measured. The reported time is the median of the
//! measured runs; the value kept is the one from the last run.

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Configuration for timing measurements
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Number of measured runs per kernel (default: 1)
    pub runs_per_kernel: usize,
    /// Number of unmeasured runs before measurement (default: 0)
    pub warmup_iterations: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_kernel: 1,
            warmup_iterations: 0,
        }
    }
}

/// Value of the last run and the median over all measured runs
#[derive(Clone, Debug)]
pub struct Measured<T> {
    pub value: T,
    pub median_time: Duration,
    pub runs: usize,
}

/// Time a fallible computation.
///
/// At least one measured run always happens, even when `runs_per_kernel` is
/// zero. The first error aborts the measurement.
pub fn measure<T, E, F>(config: &TimingConfig, mut run: F) -> Result<Measured<T>, E>
where
    F: FnMut() -> Result<T, E>,
{
    for _ in 0..config.warmup_iterations {
        black_box(run()?);
    }

    let runs = config.runs_per_kernel.max(1);
    let start = Instant::now();
    let mut value = black_box(run()?);
    let mut times = Vec::with_capacity(runs);
    times.push(start.elapsed());
    for _ in 1..runs {
        let start = Instant::now();
        value = black_box(run()?);
        times.push(start.elapsed());
    }

    Ok(Measured {
        value,
        median_time: calculate_median(&times),
        runs,
    })
}

/// Calculate median from a slice of durations.
pub fn calculate_median(times: &[Duration]) -> Duration {
    if times.is_empty() {
        return Duration::ZERO;
    }
    let mut sorted: Vec<_> = times.to_vec();
    sorted.sort();
    sorted[sorted.len() / 2]
}
