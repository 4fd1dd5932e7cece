//! # Accuracy Experiment
//!
//! For every conditioning profile and every exponent spread: generate one
//! vector pair, compute the extended-precision reference, run every other
//! registered kernel on the same pair, and append one record to the result
//! log before moving on. A failure in any trial aborts the whole run; records
//! already written stay in the log.

#[cfg(test)]
mod test;

use crate::error::{Error, Result};
use crate::math::inner_product::DEFAULT_CHUNK_SIZE;
use crate::random::dataset::{ConditioningProfile, DataGenerator, VectorPair};
use crate::registry::{InnerProductKernel, KernelRegistry};
use crate::utils::bench::{time_seed, to_millis};
use crate::utils::report::ResultLog;
use crate::utils::timer::{measure, TimingConfig};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime parameters of an experiment run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentConfig {
    pub vector_length: usize,
    pub chunk_size: usize,
    pub exponent_spreads: Vec<u32>,
    pub profiles: Vec<ConditioningProfile>,
    /// `None` draws a seed from the clock and logs it.
    pub seed: Option<u64>,
    pub log_path: PathBuf,
    pub timing: TimingConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            vector_length: 20_000_000,
            chunk_size: DEFAULT_CHUNK_SIZE,
            exponent_spreads: vec![10, 30, 50, 100, 300, 500],
            profiles: ConditioningProfile::ALL.to_vec(),
            seed: None,
            log_path: PathBuf::from("inner_results.txt"),
            timing: TimingConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vector_length == 0 {
            return Err(Error::InvalidConfig("vector length must be positive".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk size must be positive".into()));
        }
        if self.exponent_spreads.is_empty() {
            return Err(Error::InvalidConfig("no exponent spreads given".into()));
        }
        if self.profiles.is_empty() {
            return Err(Error::InvalidConfig("no profiles given".into()));
        }
        Ok(())
    }

    /// Number of (profile, spread) combinations.
    pub fn trial_count(&self) -> usize {
        self.profiles.len() * self.exponent_spreads.len()
    }

    /// Fix the seed now, drawing one from the clock when none was given, so
    /// whatever is shown before the run is the seed the run uses.
    pub fn with_resolved_seed(mut self) -> Self {
        self.seed = Some(self.seed.unwrap_or_else(time_seed));
        self
    }
}

/// Size the global rayon pool used by the parallel kernels.
///
/// Fails if the pool is already initialized.
pub fn init_thread_pool(threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;
    debug!("global pool sized to {} threads", rayon::current_num_threads());
    Ok(())
}

/// One kernel's result on one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelOutcome {
    pub kernel: &'static str,
    pub value: f64,
    pub abs_error: f64,
    /// Median over the measured runs.
    pub elapsed: Duration,
}

impl KernelOutcome {
    pub fn elapsed_ms(&self) -> f64 {
        to_millis(self.elapsed)
    }
}

/// Everything measured for one (profile, spread) combination.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRecord {
    pub profile: ConditioningProfile,
    pub exponent_spread: u32,
    pub length: usize,
    /// Value the errors are measured against.
    pub baseline: f64,
    /// In registry order.
    pub outcomes: Vec<KernelOutcome>,
}

impl TrialRecord {
    pub fn errors(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.abs_error).collect()
    }

    pub fn times_ms(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.elapsed_ms()).collect()
    }

    pub fn outcome(&self, kernel: &str) -> Option<&KernelOutcome> {
        self.outcomes.iter().find(|o| o.kernel == kernel)
    }
}

/// Drives a run over a registry.
pub struct Experiment<'a> {
    config: &'a ExperimentConfig,
    registry: &'a KernelRegistry,
}

impl<'a> Experiment<'a> {
    pub fn new(config: &'a ExperimentConfig, registry: &'a KernelRegistry) -> Self {
        Self { config, registry }
    }

    /// Run every trial, appending to the result log as each one completes.
    pub fn run(&self) -> Result<Vec<TrialRecord>> {
        self.run_with(|_| {})
    }

    /// Like [`Experiment::run`], calling `on_trial` after each record is logged.
    pub fn run_with<F: FnMut(&TrialRecord)>(&self, mut on_trial: F) -> Result<Vec<TrialRecord>> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(time_seed);
        info!(
            "seed {}, {} trials of length {}, chunk size {}",
            seed,
            self.config.trial_count(),
            self.config.vector_length,
            self.config.chunk_size
        );

        let log = ResultLog::new(&self.config.log_path);
        let mut generator = DataGenerator::seeded(seed);
        let mut records = Vec::with_capacity(self.config.trial_count());

        for &profile in &self.config.profiles {
            for &spread in &self.config.exponent_spreads {
                let pair = generator.pair(profile, self.config.vector_length, spread)?;
                let record = self.run_trial(profile, spread, &pair)?;
                log.append(&record)?;
                on_trial(&record);
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Reference first, then every other kernel in registry order.
    pub fn run_trial(
        &self,
        profile: ConditioningProfile,
        spread: u32,
        pair: &VectorPair,
    ) -> Result<TrialRecord> {
        let reference_kernel = self
            .registry
            .reference()
            .ok_or_else(|| Error::InvalidConfig("registry has no reference kernel".into()))?;

        let (v, w) = (pair.v.as_slice(), pair.w.as_slice());
        let reference = self.time_kernel(reference_kernel, v, w)?;
        let baseline = profile
            .known_inner_product(pair.len())
            .unwrap_or(reference.0);
        debug!(
            "{profile} spread {spread}: reference {:e} in {:.3} ms",
            reference.0,
            to_millis(reference.1)
        );

        let mut outcomes = Vec::with_capacity(self.registry.all().len());
        for kernel in self.registry.all() {
            let (value, elapsed) = if kernel.is_reference() {
                reference
            } else {
                self.time_kernel(kernel.as_ref(), v, w)?
            };
            outcomes.push(KernelOutcome {
                kernel: kernel.name(),
                value,
                abs_error: (value - baseline).abs(),
                elapsed,
            });
        }

        let record = TrialRecord {
            profile,
            exponent_spread: spread,
            length: pair.len(),
            baseline,
            outcomes,
        };
        info!(
            "{profile} spread {spread}: naive error {:e}, reference {:e}",
            record.outcome("naive").map_or(f64::NAN, |o| o.abs_error),
            reference.0
        );
        Ok(record)
    }

    fn time_kernel(
        &self,
        kernel: &dyn InnerProductKernel,
        v: &[f64],
        w: &[f64],
    ) -> Result<(f64, Duration)> {
        let measured = measure(&self.config.timing, || kernel.compute(v, w))?;
        Ok((measured.value, measured.median_time))
    }
}
