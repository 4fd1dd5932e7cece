//! Xoroshiro128++ pseudo-random number generator.
//!
//! Small and fast enough to fill tens of millions of raw bit patterns.
//! Plugs into `rand` through [`RngCore`] and [`SeedableRng`], so every data
//! generator takes it (or any other `Rng`) as an explicit argument.

#[cfg(test)]
mod test;

use rand::{RngCore, SeedableRng};

/// One step of Xoroshiro128++: returns the output and advances the state.
#[inline]
pub fn xoroshiro_step(s0: &mut u64, s1: &mut u64) -> u64 {
    let (a, b) = (*s0, *s1);
    let result = a.wrapping_add(b).rotate_left(17).wrapping_add(a);

    let b = b ^ a;
    *s0 = a.rotate_left(49) ^ b ^ (b << 21);
    *s1 = b.rotate_left(28);

    result
}

/// Xoroshiro128++ generator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xoroshiro128PlusPlus {
    s0: u64,
    s1: u64,
}

impl Xoroshiro128PlusPlus {
    /// Build from raw state words.
    ///
    /// The all-zero state is a fixed point of the generator, so it is
    /// replaced by a constant non-zero state.
    pub fn from_state(s0: u64, s1: u64) -> Self {
        if s0 == 0 && s1 == 0 {
            Self {
                s0: 0x9e37_79b9_7f4a_7c15,
                s1: 0xbf58_476d_1ce4_e5b9,
            }
        } else {
            Self { s0, s1 }
        }
    }
}

impl RngCore for Xoroshiro128PlusPlus {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        xoroshiro_step(&mut self.s0, &mut self.s1)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut chunks = dst.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let bytes = self.next_u64().to_le_bytes();
            tail.copy_from_slice(&bytes[..tail.len()]);
        }
    }
}

impl SeedableRng for Xoroshiro128PlusPlus {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        Self::from_state(u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }
}
