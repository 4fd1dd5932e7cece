//! Parallel chunk coordinator.
//!
//! The common prefix of the two inputs is cut into `len / chunk_size` full
//! chunks plus one shorter remainder chunk. Each chunk is handed to a serial
//! kernel on the rayon pool and writes its partial sum into its own slot of
//! a pre-sized array, so the result never depends on which task finishes
//! first. Once every task has returned, the partial sums are recombined
//! serially with a sort-then-compensate pass (or an exact sum), never with a
//! plain or parallel reduction: partial sums can differ by orders of
//! magnitude and would cancel just as badly as the raw terms.

use super::exact::exact_sum;
use super::kahan::kahan_sort_and_sum;
use super::InnerProductFn;
use crate::error::{Error, Result};
use crate::registry::InnerProductKernel;
use log::debug;
use rayon::prelude::*;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

/// Chunk size used when none is configured.
///
/// Large enough that per-task overhead vanishes against a chunk's work,
/// small enough to keep tens of tasks busy on vectors of a few million.
pub const DEFAULT_CHUNK_SIZE: usize = 25_000;

/// Partition of `len` elements into fixed-size chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    len: usize,
    chunk_size: usize,
}

impl ChunkPlan {
    /// # Panics
    /// Panics if `chunk_size` is zero.
    pub fn new(len: usize, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self { len, chunk_size }
    }

    pub fn full_chunks(&self) -> usize {
        self.len / self.chunk_size
    }

    pub fn remainder(&self) -> usize {
        self.len % self.chunk_size
    }

    /// Number of partial sums: one per full chunk, plus one for a non-empty remainder.
    pub fn slot_count(&self) -> usize {
        self.full_chunks() + usize::from(self.remainder() > 0)
    }

    /// Element range covered by `slot`.
    pub fn range(&self, slot: usize) -> Range<usize> {
        let start = slot * self.chunk_size;
        start..(start + self.chunk_size).min(self.len)
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.slot_count()).map(|slot| self.range(slot))
    }
}

/// How the partial sums are folded into the final result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recombine {
    /// Sort by magnitude, then compensated accumulation.
    SortKahan,
    /// Correctly rounded exact sum.
    Exact,
}

impl Recombine {
    /// Fold the partial sums. May reorder `partial_sums`.
    pub fn apply(self, partial_sums: &mut [f64]) -> f64 {
        match self {
            Recombine::SortKahan => kahan_sort_and_sum(partial_sums),
            Recombine::Exact => exact_sum(partial_sums),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Chunked parallel inner product.
///
/// Runs `per_chunk` on every chunk concurrently, blocks until all chunks are
/// done, then recombines.
///
/// # Errors
/// [`Error::ChunkTaskFailed`] if any chunk task panics. No partial result is
/// produced in that case.
///
/// # Panics
/// Panics if `chunk_size` is zero.
pub fn parallel_chunked_sum(
    v: &[f64],
    w: &[f64],
    chunk_size: usize,
    per_chunk: InnerProductFn,
    recombine: Recombine,
) -> Result<f64> {
    let len = v.len().min(w.len());
    let plan = ChunkPlan::new(len, chunk_size);
    let (v, w) = (&v[..len], &w[..len]);

    debug!(
        "chunk plan: {} elements, {} full chunks of {}, remainder {}",
        len,
        plan.full_chunks(),
        chunk_size,
        plan.remainder()
    );

    let mut partial_sums = vec![0.0; plan.slot_count()];
    partial_sums
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(chunk, slot)| {
            let range = plan.range(chunk);
            let (a, b) = (&v[range.clone()], &w[range]);
            *slot = panic::catch_unwind(AssertUnwindSafe(|| per_chunk(a, b))).map_err(
                |payload| Error::ChunkTaskFailed {
                    chunk,
                    message: panic_message(payload),
                },
            )?;
            Ok::<(), Error>(())
        })?;

    Ok(recombine.apply(&mut partial_sums))
}

/// Registry entry running a serial kernel through the chunk coordinator.
pub struct ChunkedKernel {
    pub name: &'static str,
    pub description: &'static str,
    pub chunk_size: usize,
    pub per_chunk: InnerProductFn,
    pub recombine: Recombine,
}

impl InnerProductKernel for ChunkedKernel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn compute(&self, v: &[f64], w: &[f64]) -> Result<f64> {
        parallel_chunked_sum(v, w, self.chunk_size, self.per_chunk, self.recombine)
    }
}
