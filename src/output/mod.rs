//! User-facing messages and progress rendering.
//!
//! Everything the user is meant to read goes to stdout as a single stream:
//! the transient progress line, warnings, and the final report. Only fatal
//! errors go to stderr.

mod progress;

pub use progress::{SpinnerLine, estimate_remaining, format_remaining};

use colored::Colorize;

/// Prints a non-fatal warning to stdout.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}

/// Prints an informational message to stdout.
pub fn print_info(message: &str) {
    println!("{message}");
}

/// Prints an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
