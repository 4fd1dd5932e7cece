//! Exact accumulation on top of [`ExtendedFloat`].
//!
//! Two flavours:
//! - `exact-sum` rounds every product to a double first (as the other
//!   kernels do) and then adds those doubles without any further rounding,
//!   returning the correctly rounded sum of the rounded products.
//! - `reference` keeps the products exact as well. It is the ground truth the
//!   experiment measures every kernel against and is far too slow to be a
//!   production kernel.

use crate::error::{Error, Result};
use crate::math::extended::ExtendedFloat;
use log::debug;
use num_traits::Zero;

/// Correctly rounded sum of a vector of doubles.
///
/// Non-finite terms follow IEEE semantics (an infinity wins, opposite
/// infinities give NaN), and an exact sum beyond `f64::MAX` rounds to the
/// matching infinity.
pub fn exact_sum(values: &[f64]) -> f64 {
    let mut acc = ExtendedFloat::zero();
    let mut special = 0.0;
    for &x in values {
        match ExtendedFloat::from_f64(x) {
            Some(term) => acc += &term,
            None => special += x,
        }
    }

    // NaN compares unequal too.
    if special != 0.0 {
        return special;
    }
    acc.to_f64().unwrap_or(if acc.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

/// Exact sum of the double-rounded products.
pub fn inner_product_exact_sum(v: &[f64], w: &[f64]) -> f64 {
    let products: Vec<f64> = v.iter().zip(w).map(|(a, b)| a * b).collect();
    exact_sum(&products)
}

/// The extended-precision inner product, rounded once at the end.
///
/// # Errors
/// [`Error::NonFinite`] if any operand is NaN or infinite, and
/// [`Error::ReferenceOverflow`] if the exact result does not fit in an `f64`.
pub fn inner_product_reference(v: &[f64], w: &[f64]) -> Result<f64> {
    let mut acc = ExtendedFloat::zero();
    for (index, (&a, &b)) in v.iter().zip(w).enumerate() {
        let a = ExtendedFloat::from_f64(a).ok_or(Error::NonFinite { index, value: a })?;
        let b = ExtendedFloat::from_f64(b).ok_or(Error::NonFinite { index, value: b })?;
        acc += &(&a * &b);
    }

    debug!(
        "reference accumulator: {} terms, {} mantissa bits",
        v.len().min(w.len()),
        acc.mantissa_bits()
    );
    acc.to_f64().ok_or(Error::ReferenceOverflow)
}
