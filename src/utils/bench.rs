//! Shared timing helpers.
//!
//! The clock seed and the duration conversions the result log and the
//! terminal tables need.

use std::time::Duration;

/// Get a seed from current time, for runs that did not ask for one
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Fractional milliseconds, as written to the result log
pub fn to_millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1e6
}

/// Human-scaled duration for tables (ns, µs, ms or s)
pub fn format_duration(d: Duration) -> String {
    let ns = d.as_nanos();
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} µs", ns as f64 / 1e3)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1e6)
    } else {
        format!("{:.2} s", ns as f64 / 1e9)
    }
}
