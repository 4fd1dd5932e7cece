//! Inner product implementations.
//!
//! Serial kernels share the signature [`InnerProductFn`]; the chunked
//! variants wrap one of them in the parallel coordinator.

mod chunked;
mod exact;
mod kahan;
mod naive;
mod sorted;
mod transform_reduce;

pub use chunked::{parallel_chunked_sum, ChunkPlan, ChunkedKernel, Recombine, DEFAULT_CHUNK_SIZE};
pub use exact::{exact_sum, inner_product_exact_sum, inner_product_reference};
pub use kahan::{
    inner_product_kahan, inner_product_sort_kahan, kahan_sort_and_sum, kahan_sum,
    KahanAccumulator,
};
pub use naive::{inner_product_naive, sum_naive};
pub use sorted::{elementwise_products, inner_product_sorted, sort_and_accumulate, sort_by_magnitude};
pub use transform_reduce::inner_product_transform_reduce;

use crate::utils::VariantInfo;

/// Signature of a serial inner product kernel.
pub type InnerProductFn = fn(&[f64], &[f64]) -> f64;

/// Serial kernels, in result-log order.
pub fn available_variants() -> Vec<VariantInfo<InnerProductFn>> {
    vec![
        VariantInfo {
            name: "naive",
            description: "Left-to-right multiply-accumulate",
            function: inner_product_naive,
        },
        VariantInfo {
            name: "transform-reduce",
            description: "Parallel map and reduce, unspecified order",
            function: inner_product_transform_reduce,
        },
        VariantInfo {
            name: "sort",
            description: "Products sorted by magnitude, serial accumulation",
            function: inner_product_sorted,
        },
        VariantInfo {
            name: "kahan",
            description: "Compensated multiply-accumulate",
            function: inner_product_kahan,
        },
        VariantInfo {
            name: "sort-kahan",
            description: "Products sorted by magnitude, compensated accumulation",
            function: inner_product_sort_kahan,
        },
        VariantInfo {
            name: "exact-sum",
            description: "Correctly rounded sum of the rounded products",
            function: inner_product_exact_sum,
        },
    ]
}

/// Chunked kernels built on the serial ones.
pub fn chunked_variants(chunk_size: usize) -> Vec<ChunkedKernel> {
    vec![
        ChunkedKernel {
            name: "par-kahan",
            description: "Kahan per chunk in parallel, sort-Kahan recombination",
            chunk_size,
            per_chunk: inner_product_kahan,
            recombine: Recombine::SortKahan,
        },
        ChunkedKernel {
            name: "par-sort-kahan",
            description: "Sort-Kahan per chunk in parallel, sort-Kahan recombination",
            chunk_size,
            per_chunk: inner_product_sort_kahan,
            recombine: Recombine::SortKahan,
        },
        ChunkedKernel {
            name: "par-exact-sum",
            description: "Exact sum per chunk in parallel, exact recombination",
            chunk_size,
            per_chunk: inner_product_exact_sum,
            recombine: Recombine::Exact,
        },
    ]
}
