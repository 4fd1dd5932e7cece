//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use crate::experiment::{ExperimentConfig, TrialRecord};
use crate::registry::KernelRegistry;
use crate::utils::bench::format_duration;
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80); // Cap header at 80
    let title = " Inner Product Accuracy ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the run configuration box
pub fn print_config_box(config: &ExperimentConfig, threads: usize) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let spreads = config
        .exponent_spreads
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let profiles = config
        .profiles
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ");

    let lines = [
        format!("Length:   {}", config.vector_length),
        format!("Chunk:    {}", config.chunk_size),
        format!("Threads:  {}", threads),
        format!(
            "Seed:     {}",
            config.seed.map_or_else(|| "from clock".to_string(), |s| s.to_string())
        ),
        format!("Spreads:  {}", spreads),
        format!("Profiles: {}", profiles),
        format!("Log:      {}", config.log_path.display()),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for line in &lines {
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print one trial: value, absolute error and median time per kernel
pub fn print_trial_table(record: &TrialRecord) {
    if record.outcomes.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let fixed_width = 50;
    let kernel_col_width = term_width.saturating_sub(fixed_width).clamp(15, 24);
    let table_width = kernel_col_width + fixed_width - 4;

    println!(
        "  {} | spread {} | length {} | baseline {:e}",
        record.profile, record.exponent_spread, record.length, record.baseline
    );
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<k_width$} {:>14} {:>14} {:>12}",
        "Kernel",
        "Value",
        "Abs. Error",
        "Time",
        k_width = kernel_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for outcome in &record.outcomes {
        println!(
            "  {:<k_width$} {:>14.6e} {:>14.3e} {:>12}",
            truncate(outcome.kernel, kernel_col_width),
            outcome.value,
            outcome.abs_error,
            format_duration(outcome.elapsed),
            k_width = kernel_col_width
        );
    }
    println!();
}

/// Print the list of registered kernels
pub fn print_available_kernels(registry: &KernelRegistry) {
    println!("Available kernels (result log order):");
    println!();
    for kernel in registry.all() {
        println!("  {:<20} - {}", kernel.name(), kernel.description());
    }
}
