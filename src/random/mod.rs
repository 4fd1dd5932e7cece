//! Random number generation and test data.

pub mod dataset;
pub mod xoroshiro;
