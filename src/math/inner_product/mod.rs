//! # Inner Product Algorithms
//!
//! The inner product (dot product) of two vectors:
//!
//! `dot(v, w) = Σ(v[i] * w[i])`
//!
//! Every kernel here computes the same mathematical value and differs only in
//! how much rounding error it lets through and how fast it runs.
//!
//! ## Strategies
//!
//! - **Naive**: one left-to-right pass; cheapest, least accurate
//! - **Transform-reduce**: parallel reduction; faster, no more accurate
//! - **Sorting**: add small magnitudes first so each step rounds less
//! - **Compensation (Kahan)**: carry the lost low-order bits along
//! - **Chunking**: compensated kernels per chunk in parallel, compensated recombination
//! - **Exact**: extended-precision accumulation, used as the accuracy oracle
//!
//! All kernels work on the common prefix `min(v.len(), w.len())`; nothing is
//! padded. Except for transform-reduce, every kernel is deterministic for a
//! fixed input order.

pub mod code;

pub use code::*;
