//! # Extended-Precision Numbers
//!
//! An exact binary floating-point value `mantissa * 2^exponent` with an
//! arbitrary-width integer mantissa. Every finite `f64` converts exactly, and
//! sums and products of such values never round, so a running inner product
//! kept in this type is exact no matter how many terms are added.
//!
//! Only the operations the accuracy oracle needs are provided: conversion
//! from and to `f64`, addition, multiplication and negation.


use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Mul, Neg};

const MANTISSA_BITS: i64 = 52;
const EXPONENT_BIAS: i64 = 1023;
/// Exponent of the least significant bit of the smallest subnormal.
const MIN_EXPONENT: i64 = -1074;
const MAX_BIASED_EXPONENT: i64 = 0x7ff;

/// Exact value `mantissa * 2^exponent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedFloat {
    mantissa: BigInt,
    exponent: i64,
}

impl ExtendedFloat {
    /// Exact conversion from a double. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> MANTISSA_BITS) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << MANTISSA_BITS) - 1);

        let (mut significand, mut exponent) = if biased == 0 {
            (fraction, MIN_EXPONENT)
        } else {
            (
                fraction | (1u64 << MANTISSA_BITS),
                biased - EXPONENT_BIAS - MANTISSA_BITS,
            )
        };

        if significand == 0 {
            return Some(Self::zero());
        }

        // Keep mantissas odd so repeated products stay narrow.
        let tz = significand.trailing_zeros();
        significand >>= tz;
        exponent += i64::from(tz);

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Some(Self {
            mantissa: BigInt::from_biguint(sign, BigUint::from(significand)),
            exponent,
        })
    }

    /// True when the value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Width of the mantissa in bits.
    pub fn mantissa_bits(&self) -> u64 {
        self.mantissa.bits()
    }

    /// Round to the nearest double, ties to even.
    ///
    /// Returns `None` when the magnitude exceeds `f64::MAX` after rounding.
    pub fn to_f64(&self) -> Option<f64> {
        if self.mantissa.is_zero() {
            return Some(0.0);
        }

        let magnitude = self.mantissa.magnitude();
        let leading = self.exponent + magnitude.bits() as i64 - 1;
        // Weight of the last bit the result can hold.
        let mut quantum = (leading - MANTISSA_BITS).max(MIN_EXPONENT);
        let shift = quantum - self.exponent;

        let mut kept = if shift <= 0 {
            magnitude << ((-shift) as usize)
        } else {
            let shift = shift as usize;
            let mut kept = magnitude >> shift;
            let dropped = magnitude - (&kept << shift);
            let half = BigUint::one() << (shift - 1);
            match dropped.cmp(&half) {
                Ordering::Greater => kept += 1u32,
                Ordering::Equal if kept.bit(0) => kept += 1u32,
                _ => {}
            }
            kept
        };

        if kept.bits() > (MANTISSA_BITS + 1) as u64 {
            // Rounding carried into a new bit.
            kept >>= 1usize;
            quantum += 1;
        }

        let significand = kept.iter_u64_digits().next().unwrap_or(0);
        let bits = if significand >> MANTISSA_BITS != 0 {
            let biased = quantum + MANTISSA_BITS + EXPONENT_BIAS;
            if biased >= MAX_BIASED_EXPONENT {
                return None;
            }
            ((biased as u64) << MANTISSA_BITS) | (significand & ((1u64 << MANTISSA_BITS) - 1))
        } else {
            // Subnormal: quantum is pinned at MIN_EXPONENT.
            significand
        };

        let result = f64::from_bits(bits);
        Some(if self.is_negative() { -result } else { result })
    }

    fn aligned_to(&self, exponent: i64) -> BigInt {
        debug_assert!(exponent <= self.exponent);
        &self.mantissa << ((self.exponent - exponent) as usize)
    }
}

impl Zero for ExtendedFloat {
    fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }
}

impl AddAssign<&ExtendedFloat> for ExtendedFloat {
    fn add_assign(&mut self, rhs: &ExtendedFloat) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            self.clone_from(rhs);
            return;
        }

        if rhs.exponent >= self.exponent {
            self.mantissa += rhs.aligned_to(self.exponent);
        } else {
            self.mantissa = self.aligned_to(rhs.exponent) + &rhs.mantissa;
            self.exponent = rhs.exponent;
        }
    }
}

impl Add<&ExtendedFloat> for &ExtendedFloat {
    type Output = ExtendedFloat;

    fn add(self, rhs: &ExtendedFloat) -> ExtendedFloat {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Add for ExtendedFloat {
    type Output = ExtendedFloat;

    fn add(mut self, rhs: ExtendedFloat) -> ExtendedFloat {
        self += &rhs;
        self
    }
}

impl Mul<&ExtendedFloat> for &ExtendedFloat {
    type Output = ExtendedFloat;

    fn mul(self, rhs: &ExtendedFloat) -> ExtendedFloat {
        if self.is_zero() || rhs.is_zero() {
            return ExtendedFloat::zero();
        }
        ExtendedFloat {
            mantissa: &self.mantissa * &rhs.mantissa,
            exponent: self.exponent + rhs.exponent,
        }
    }
}

impl Mul for ExtendedFloat {
    type Output = ExtendedFloat;

    fn mul(self, rhs: ExtendedFloat) -> ExtendedFloat {
        &self * &rhs
    }
}

impl Neg for ExtendedFloat {
    type Output = ExtendedFloat;

    fn neg(self) -> ExtendedFloat {
        ExtendedFloat {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}
