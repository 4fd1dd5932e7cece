//! Kernel registry.
//!
//! Every inner product kernel the experiment compares is registered here in
//! the fixed order the result log uses, so the driver, the CLI listing and
//! the verification test all iterate over the same list.

use crate::error::{Error, Result};
use crate::math::inner_product::{
    self, inner_product_reference, InnerProductFn, DEFAULT_CHUNK_SIZE,
};
use crate::random::dataset::generate_uniform;
use crate::utils::VariantInfo;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Trait that every inner product kernel implements
pub trait InnerProductKernel: Send + Sync {
    /// Short name used in logs and tables (e.g., "sort-kahan")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Inner product over the common prefix of `v` and `w`
    fn compute(&self, v: &[f64], w: &[f64]) -> Result<f64>;

    /// True for the extended-precision ground truth
    fn is_reference(&self) -> bool {
        false
    }
}

impl InnerProductKernel for VariantInfo<InnerProductFn> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn compute(&self, v: &[f64], w: &[f64]) -> Result<f64> {
        Ok((self.function)(v, w))
    }
}

/// The extended-precision oracle.
pub struct ReferenceKernel;

impl InnerProductKernel for ReferenceKernel {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn description(&self) -> &'static str {
        "Exact extended-precision inner product"
    }

    fn compute(&self, v: &[f64], w: &[f64]) -> Result<f64> {
        inner_product_reference(v, w)
    }

    fn is_reference(&self) -> bool {
        true
    }
}

/// Ordered collection of kernels
pub struct KernelRegistry {
    kernels: Vec<Box<dyn InnerProductKernel>>,
}

impl KernelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kernels: Vec::new(),
        }
    }

    /// Append a kernel
    pub fn register<K: InnerProductKernel + 'static>(&mut self, kernel: K) {
        self.kernels.push(Box::new(kernel));
    }

    /// All kernels, in registration order
    pub fn all(&self) -> &[Box<dyn InnerProductKernel>] {
        &self.kernels
    }

    /// Find kernel by name
    pub fn find(&self, name: &str) -> Option<&dyn InnerProductKernel> {
        self.kernels
            .iter()
            .find(|k| k.name() == name)
            .map(|k| k.as_ref())
    }

    /// The registered reference kernel, if any
    pub fn reference(&self) -> Option<&dyn InnerProductKernel> {
        self.kernels
            .iter()
            .find(|k| k.is_reference())
            .map(|k| k.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.kernels.iter().map(|k| k.name()).collect()
    }

    /// Check every kernel against the reference on a benign, seeded input.
    ///
    /// Uniform data in `[-1, 1]` keeps every kernel well within `1e-9` of
    /// the exact value; a larger deviation means the kernel is broken, not
    /// merely inaccurate.
    pub fn verify(&self) -> Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(0x1d0f_5eed);
        // Non-multiple of the chunk size to exercise the remainder chunk.
        let size = 1023;
        let v = generate_uniform(size, 1.0, &mut rng)?;
        let w = generate_uniform(size, 1.0, &mut rng)?;
        let expected = inner_product_reference(&v, &w)?;

        for kernel in &self.kernels {
            let got = kernel.compute(&v, &w)?;
            if (got - expected).abs() > 1e-9 {
                return Err(Error::Verification {
                    kernel: kernel.name(),
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        build_registry(DEFAULT_CHUNK_SIZE)
    }
}

/// Build the full registry in result-log order.
///
/// Serial kernels first, then the chunked ones, then the reference.
pub fn build_registry(chunk_size: usize) -> KernelRegistry {
    let mut registry = KernelRegistry::new();

    for variant in inner_product::available_variants() {
        registry.register(variant);
    }
    for kernel in inner_product::chunked_variants(chunk_size) {
        registry.register(kernel);
    }
    registry.register(ReferenceKernel);

    registry
}
