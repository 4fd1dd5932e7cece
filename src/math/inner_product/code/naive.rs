//! Naive (reference-order) accumulation.
//!
//! A single left-to-right pass. This is the baseline every other kernel is
//! compared against, and the one that loses the most to cancellation.

/// Inner product by plain multiply-accumulate.
///
/// Operates over the common prefix of `v` and `w`.
///
/// # Example
/// ```
/// use inner_product_accuracy::math::inner_product::inner_product_naive;
///
/// let v = [1.0, 2.0, 3.0];
/// let w = [4.0, 5.0, 6.0];
/// assert_eq!(inner_product_naive(&v, &w), 32.0);
/// ```
pub fn inner_product_naive(v: &[f64], w: &[f64]) -> f64 {
    v.iter().zip(w).fold(0.0, |acc, (a, b)| acc + a * b)
}

/// Plain left-to-right sum of one vector.
pub fn sum_naive(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, x| acc + x)
}
