//! Parallel transform-reduce.
//!
//! Elementwise products reduced by rayon's work-stealing tree. The reduction
//! order depends on how the pool splits the work, so this kernel buys
//! throughput only: it is not more accurate than the naive pass and its
//! result is not guaranteed to be bit-identical between runs.

use rayon::prelude::*;

/// Inner product reduced in parallel, in an unspecified order.
pub fn inner_product_transform_reduce(v: &[f64], w: &[f64]) -> f64 {
    v.par_iter().zip(w.par_iter()).map(|(a, b)| a * b).sum()
}
