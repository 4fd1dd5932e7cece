//! Utility modules for timing, reporting and terminal output.

pub mod bench;
pub mod report;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use bench::{format_duration, time_seed, to_millis};
pub use report::{format_record, ResultLog};
pub use timer::{calculate_median, measure, Measured, TimingConfig};

/// Information about a kernel implementation variant.
/// Generic over F which is the function signature.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "naive", "sort-kahan")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
