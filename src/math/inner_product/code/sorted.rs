//! Sort-then-accumulate.
//!
//! Adding the smallest magnitudes first keeps each partial sum close in size
//! to the next term, which minimises the relative rounding error per step.
//! The products and the sort run in parallel; the accumulation that follows
//! must stay serial, since any parallel reduction would undo the ordering.

use super::naive::sum_naive;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Ascending magnitude, then the IEEE total order so that `x` and `-x`
/// always land in the same relative order.
pub(crate) fn magnitude_order(a: &f64, b: &f64) -> Ordering {
    a.abs().total_cmp(&b.abs()).then_with(|| a.total_cmp(b))
}

/// Sort values by ascending magnitude (in parallel, deterministic result).
pub fn sort_by_magnitude(values: &mut [f64]) {
    values.par_sort_unstable_by(magnitude_order);
}

/// Elementwise products over the common prefix, computed in parallel.
pub fn elementwise_products(v: &[f64], w: &[f64]) -> Vec<f64> {
    v.par_iter().zip(w.par_iter()).map(|(a, b)| a * b).collect()
}

/// Sort `values` by magnitude, then sum them serially.
///
/// **Reorders `values` in place.** Copy first if the original order matters.
pub fn sort_and_accumulate(values: &mut [f64]) -> f64 {
    sort_by_magnitude(values);
    sum_naive(values)
}

/// Inner product by sorting the products before accumulation.
pub fn inner_product_sorted(v: &[f64], w: &[f64]) -> f64 {
    let mut products = elementwise_products(v, w);
    sort_and_accumulate(&mut products)
}
