//! # Inner Product Accuracy
//!
//! Accuracy and speed of floating-point inner product kernels on data built
//! to make summation fail: naive, parallel, sorted, compensated and chunked
//! kernels measured against an exact extended-precision reference.

pub mod error;
pub mod experiment;
pub mod math;
pub mod random;
pub mod registry;
pub mod utils;

pub use error::{Error, Result};

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::experiment::{Experiment, ExperimentConfig, KernelOutcome, TrialRecord};
    pub use crate::math::inner_product;
    pub use crate::random::dataset::{ConditioningProfile, DataGenerator, VectorPair};
    pub use crate::registry::{build_registry, InnerProductKernel, KernelRegistry};
}
