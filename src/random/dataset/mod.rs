//! # Test Data Generators
//!
//! Vectors with controlled numerical conditioning. Each profile targets one
//! failure mode of naive summation:
//!
//! - **well-conditioned**: terms of one sign, so nothing cancels
//! - **random**: random signs and magnitudes spread over `spread` binades
//! - **anderson**: random terms minus their mean, so the sum is tiny
//!   compared to the terms (Anderson's ill-conditioned data)
//! - **exact-sum-zero**: pairs `-|x|, +|x|`, exact sum zero, then scrambled
//! - **mersenne-mirrored**: uniform draws followed by a sign-mirrored copy;
//!   the inner product of two such vectors is exactly zero
//!
//! Randomness is always passed in. The same seed gives the same vectors.

mod raw;
#[cfg(test)]
mod test;

pub use raw::{
    RawSampler, SignPattern, EXPONENT_BIAS, EXPONENT_MASK, MANTISSA_MASK, MAX_EXPONENT_SPREAD,
    SIGN_MASK,
};

use crate::error::{Error, Result};
use crate::math::inner_product::sum_naive;
use crate::random::xoroshiro::Xoroshiro128PlusPlus;
use log::warn;
use rand::distr::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// Generation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditioningProfile {
    WellConditioned,
    Random,
    AndersonIllConditioned,
    ExactSumZero,
    MersenneMirrored,
}

impl ConditioningProfile {
    /// Every profile, in experiment order.
    pub const ALL: [ConditioningProfile; 5] = [
        ConditioningProfile::WellConditioned,
        ConditioningProfile::Random,
        ConditioningProfile::AndersonIllConditioned,
        ConditioningProfile::ExactSumZero,
        ConditioningProfile::MersenneMirrored,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConditioningProfile::WellConditioned => "well-conditioned",
            ConditioningProfile::Random => "random",
            ConditioningProfile::AndersonIllConditioned => "anderson",
            ConditioningProfile::ExactSumZero => "exact-sum-zero",
            ConditioningProfile::MersenneMirrored => "mersenne-mirrored",
        }
    }

    /// Exact inner product of a generated pair of length `len`, when it is
    /// known by construction.
    pub fn known_inner_product(&self, len: usize) -> Option<f64> {
        match self {
            ConditioningProfile::MersenneMirrored => Some(0.0),
            ConditioningProfile::ExactSumZero if len % 2 == 0 => Some(0.0),
            _ => None,
        }
    }

    fn sign_pattern(&self) -> SignPattern {
        match self {
            ConditioningProfile::WellConditioned => SignPattern::Negative,
            ConditioningProfile::ExactSumZero => SignPattern::MirroredPairs,
            _ => SignPattern::Random,
        }
    }
}

impl fmt::Display for ConditioningProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConditioningProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| Error::UnknownProfile(s.to_string()))
    }
}

/// Swap `2 * len` random pairs of distinct positions.
pub fn scramble<R: Rng + ?Sized>(values: &mut [f64], rng: &mut R) {
    let n = values.len();
    if n < 2 {
        return;
    }
    for _ in 0..2 * n {
        let x = rng.random_range(0..n);
        let mut y = rng.random_range(0..n);
        while x == y {
            y = rng.random_range(0..n);
        }
        values.swap(x, y);
    }
}

/// Raw bit-pattern profile data.
///
/// `MersenneMirrored` is treated as a uniform draw of magnitude `2^spread`
/// mirrored with factor -1, so the returned vector sums to zero.
///
/// # Errors
/// [`Error::InvalidExponentSpread`] for a spread the exponent field cannot
/// hold, [`Error::InvalidMagnitude`] when `2^spread` is not a usable range.
pub fn generate<R: Rng + ?Sized>(
    profile: ConditioningProfile,
    count: usize,
    spread: u32,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if profile == ConditioningProfile::MersenneMirrored {
        let mut values = generate_uniform(count / 2, mirrored_magnitude(spread)?, rng)?;
        duplicate_negated(&mut values);
        return Ok(values);
    }

    let mut values = vec![0.0; count];
    RawSampler::new(rng, spread, profile.sign_pattern())?.fill(&mut values);

    if profile == ConditioningProfile::AndersonIllConditioned && count > 0 {
        let mean = sum_naive(&values) / count as f64;
        for x in &mut values {
            *x -= mean;
        }
    }

    if profile == ConditioningProfile::ExactSumZero && count % 2 == 1 {
        warn!("exact-sum-zero with odd length {count}: last term has no partner");
    }

    scramble(&mut values, rng);
    Ok(values)
}

/// `count` values uniform in `[-magnitude, +magnitude]`.
pub fn generate_uniform<R: Rng + ?Sized>(
    count: usize,
    magnitude: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let dist = Uniform::new_inclusive(-magnitude, magnitude)
        .map_err(|_| Error::InvalidMagnitude(magnitude))?;
    Ok((0..count).map(|_| dist.sample(rng)).collect())
}

/// Append `factor * v[i]` for every current element (the length doubles).
pub fn duplicate(values: &mut Vec<f64>, factor: f64) {
    values.reserve(values.len());
    values.extend_from_within(..);
    let half = values.len() / 2;
    for x in &mut values[half..] {
        *x *= factor;
    }
}

/// `duplicate(values, -1.0)`: the result sums to exactly zero.
pub fn duplicate_negated(values: &mut Vec<f64>) {
    duplicate(values, -1.0);
}

fn mirrored_magnitude(spread: u32) -> Result<f64> {
    let magnitude = 2f64.powi(spread.min(i32::MAX as u32) as i32);
    if magnitude.is_finite() && magnitude > 0.0 {
        Ok(magnitude)
    } else {
        Err(Error::InvalidMagnitude(magnitude))
    }
}

/// Two vectors to multiply.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorPair {
    pub v: Vec<f64>,
    pub w: Vec<f64>,
}

impl VectorPair {
    /// Common length the kernels will see.
    pub fn len(&self) -> usize {
        self.v.len().min(self.w.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pair for one experiment trial.
///
/// Bit-pattern profiles pair the generated vector with ones, so the inner
/// product is the plain sum. `MersenneMirrored` mirrors `v` with +1 and `w`
/// with -1: every product `v[i] * w[i]` meets its exact negation in the
/// second half. An odd `count` loses one element to the halving.
pub fn generate_pair<R: Rng + ?Sized>(
    profile: ConditioningProfile,
    count: usize,
    spread: u32,
    rng: &mut R,
) -> Result<VectorPair> {
    if profile == ConditioningProfile::MersenneMirrored {
        if count % 2 == 1 {
            warn!("mirrored pair with odd length {count}: using {}", count - 1);
        }
        let magnitude = mirrored_magnitude(spread)?;
        let mut v = generate_uniform(count / 2, magnitude, rng)?;
        duplicate(&mut v, 1.0);
        let mut w = generate_uniform(count / 2, magnitude, rng)?;
        duplicate_negated(&mut w);
        return Ok(VectorPair { v, w });
    }

    let v = generate(profile, count, spread, rng)?;
    let w = vec![1.0; v.len()];
    Ok(VectorPair { v, w })
}

/// Seeded generator bundle used by the experiment driver.
///
/// Bit-pattern profiles draw from a Xoroshiro128++ stream; the uniform
/// profile draws from ChaCha8. Both derive from one seed.
pub struct DataGenerator {
    raw: Xoroshiro128PlusPlus,
    uniform: ChaCha8Rng,
}

impl DataGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            raw: Xoroshiro128PlusPlus::seed_from_u64(seed),
            uniform: ChaCha8Rng::seed_from_u64(seed.rotate_left(32) ^ 0x5851_f42d_4c95_7f2d),
        }
    }

    pub fn pair(
        &mut self,
        profile: ConditioningProfile,
        count: usize,
        spread: u32,
    ) -> Result<VectorPair> {
        match profile {
            ConditioningProfile::MersenneMirrored => {
                generate_pair(profile, count, spread, &mut self.uniform)
            }
            _ => generate_pair(profile, count, spread, &mut self.raw),
        }
    }
}
