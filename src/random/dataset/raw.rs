//! Raw double synthesis from random bit patterns.
//!
//! A sample starts as 64 random bits. The 11-bit exponent field is then
//! overwritten with a value drawn from a band of width `spread` centred on
//! the bias, so magnitudes span roughly `2^(-spread/2) .. 2^(spread/2)`.
//! Mantissa bits stay random; the sign bit is set according to a
//! [`SignPattern`].

use crate::error::{Error, Result};
use rand::Rng;

pub const SIGN_MASK: u64 = 1 << 63;
pub const EXPONENT_SHIFT: u32 = 52;
pub const EXPONENT_MASK: u64 = 0x7ff << EXPONENT_SHIFT;
pub const MANTISSA_MASK: u64 = (1 << EXPONENT_SHIFT) - 1;
pub const EXPONENT_BIAS: u64 = 0x3ff;

/// Widest spread whose exponent band stays inside the normal encodings
/// (field values `1..=2046`).
pub const MAX_EXPONENT_SPREAD: u32 = 2045;

/// Sign applied to successive raw samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignPattern {
    /// Keep the random sign bit.
    Random,
    /// Sign bit set on every draw: all samples negative.
    Negative,
    /// Strict alternation `-|x|, +|x|` with the same `x`: every pair cancels.
    MirroredPairs,
}

/// Iterator-like source of raw samples.
pub struct RawSampler<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    spread: u32,
    pattern: SignPattern,
    pending: Option<f64>,
}

impl<'a, R: Rng + ?Sized> RawSampler<'a, R> {
    /// # Errors
    /// [`Error::InvalidExponentSpread`] if `spread > MAX_EXPONENT_SPREAD`.
    pub fn new(rng: &'a mut R, spread: u32, pattern: SignPattern) -> Result<Self> {
        if spread > MAX_EXPONENT_SPREAD {
            return Err(Error::InvalidExponentSpread(spread));
        }
        Ok(Self {
            rng,
            spread,
            pattern,
            pending: None,
        })
    }

    fn draw_bits(&mut self) -> u64 {
        let bits = self.rng.next_u64();
        let exponent = if self.spread == 0 {
            EXPONENT_BIAS
        } else {
            let offset = self.rng.random_range(0..u64::from(self.spread));
            EXPONENT_BIAS + offset - u64::from(self.spread / 2)
        };
        (bits & !EXPONENT_MASK) | (exponent << EXPONENT_SHIFT)
    }

    /// Next sample.
    pub fn sample(&mut self) -> f64 {
        match self.pattern {
            SignPattern::Random => f64::from_bits(self.draw_bits()),
            SignPattern::Negative => f64::from_bits(self.draw_bits() | SIGN_MASK),
            SignPattern::MirroredPairs => match self.pending.take() {
                Some(saved) => saved,
                None => {
                    let magnitude = self.draw_bits() & !SIGN_MASK;
                    self.pending = Some(f64::from_bits(magnitude));
                    f64::from_bits(magnitude | SIGN_MASK)
                }
            },
        }
    }

    /// Fill `out` with consecutive samples.
    pub fn fill(&mut self, out: &mut [f64]) {
        for slot in out {
            *slot = self.sample();
        }
    }
}
