//! Compensated (Kahan) summation.
//!
//! A running correction collects the low-order bits each addition drops and
//! feeds them back into the total. The update used here is the
//! Kahan–Babuška form: the lost part is measured against whichever operand
//! is larger, so a term that dwarfs the running sum does not wipe out the
//! correction gathered so far.
//!
//! Algebraically the correction is always zero. It survives only because the
//! compiler keeps the floating-point operations in program order. Rust does
//! not reassociate or contract `f64` arithmetic by default, and the
//! correction is additionally routed through [`std::hint::black_box`].
//! `black_box` is a best-effort hint, not a guarantee, so builds with
//! non-default float flags (fast-math style codegen options) need to be
//! checked per target.

use super::sorted::{elementwise_products, sort_by_magnitude};
use std::hint::black_box;

/// Running sum with a compensation term.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanAccumulator {
    sum: f64,
    compensation: f64,
}

impl KahanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term.
    #[inline]
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        let lost = if self.sum.abs() >= value.abs() {
            (self.sum - t) + value
        } else {
            (value - t) + self.sum
        };
        self.compensation = black_box(self.compensation + lost);
        self.sum = t;
    }

    /// Compensated total.
    ///
    /// Once the running sum overflows the correction is meaningless, so the
    /// IEEE result of the plain sum is returned instead of a NaN.
    #[inline]
    pub fn total(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }

    pub fn sum_iter<I: IntoIterator<Item = f64>>(iter: I) -> f64 {
        let mut acc = Self::new();
        for value in iter {
            acc.add(value);
        }
        acc.total()
    }
}

/// Compensated sum of one vector (for instance, precomputed products).
///
/// # Example
/// ```
/// use inner_product_accuracy::math::inner_product::{kahan_sum, sum_naive};
///
/// let v = [1e16, 1.0, -1e16];
/// assert_eq!(sum_naive(&v), 0.0);
/// assert_eq!(kahan_sum(&v), 1.0);
/// ```
pub fn kahan_sum(values: &[f64]) -> f64 {
    KahanAccumulator::sum_iter(values.iter().copied())
}

/// Sort by magnitude, then sum with compensation.
///
/// **Reorders `values` in place.** This is the recombination step of the
/// chunk coordinator.
pub fn kahan_sort_and_sum(values: &mut [f64]) -> f64 {
    sort_by_magnitude(values);
    kahan_sum(values)
}

/// Compensated inner product over the common prefix.
pub fn inner_product_kahan(v: &[f64], w: &[f64]) -> f64 {
    KahanAccumulator::sum_iter(v.iter().zip(w).map(|(a, b)| a * b))
}

/// Products sorted by magnitude, then compensated accumulation.
///
/// The most accurate of the double-only kernels on ill-conditioned data.
pub fn inner_product_sort_kahan(v: &[f64], w: &[f64]) -> f64 {
    let mut products = elementwise_products(v, w);
    kahan_sort_and_sum(&mut products)
}
