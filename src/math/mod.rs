//! Numerical kernels.

pub mod extended;
pub mod inner_product;
