//! Crate-wide error type.
//!
//! Programming errors inside the pure kernels (a zero chunk size handed to
//! [`ChunkPlan`](crate::math::inner_product::ChunkPlan)) still panic. Everything
//! that can go wrong with valid code and bad input ends up here.

use thiserror::Error;

/// Errors raised by the generators, the reference computation, the chunk
/// coordinator and the experiment driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A value that cannot be represented exactly (NaN or infinity) reached
    /// the extended-precision reference.
    #[error("non-finite value {value} at index {index} cannot enter the exact reference")]
    NonFinite {
        /// Index of the offending element pair
        index: usize,
        /// The non-finite operand or product
        value: f64,
    },

    /// The exact inner product is too large to be rounded to an `f64`.
    #[error("exact inner product overflows the f64 range")]
    ReferenceOverflow,

    /// A chunk task panicked; the whole coordinated sum is abandoned.
    #[error("chunk task {chunk} failed: {message}")]
    ChunkTaskFailed {
        /// Slot index of the failed chunk
        chunk: usize,
        /// Panic payload, when it was a string
        message: String,
    },

    /// Exponent spread outside the range that keeps generated doubles normal.
    #[error("exponent spread {0} is out of range (0..={max})", max = crate::random::dataset::MAX_EXPONENT_SPREAD)]
    InvalidExponentSpread(u32),

    /// Uniform sampling range is empty or not finite.
    #[error("invalid sampling magnitude {0}")]
    InvalidMagnitude(f64),

    /// Unknown conditioning profile name.
    #[error("unknown conditioning profile '{0}'")]
    UnknownProfile(String),

    /// Experiment configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A kernel disagreed with the reference beyond tolerance.
    #[error("kernel '{kernel}' failed verification: expected {expected}, got {got}")]
    Verification {
        kernel: &'static str,
        expected: f64,
        got: f64,
    },

    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
