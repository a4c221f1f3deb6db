//! Console presentation
//!
//! Summary lines go to stdout, warnings to stderr. Styling is done with
//! `console::Style`, which drops colours when the stream is not a terminal.

pub mod report;

use console::Style;

/// Print a yellow warning line on stderr
pub fn warn(message: &str) {
    eprintln!(
        "{} {}",
        Style::new().bold().yellow().apply_to("Warning:"),
        message
    );
}

/// Print a green success line on stdout
pub fn success(message: &str) {
    println!("{}", Style::new().green().apply_to(message));
}

/// Print a bold section header on stdout
pub fn header(text: &str) {
    println!("{}", Style::new().bold().apply_to(text));
}

/// Print a dimmed detail line on stdout
pub fn detail(text: &str) {
    println!("  {}", Style::new().dim().apply_to(text));
}

/// Human readable size: bytes below 1 KiB, then KB/MB/GB with one decimal
#[allow(clippy::cast_precision_loss)]
pub fn formatted_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < 1024.0 {
        format!("{bytes} B")
    } else if size < 1024.0 * 1024.0 {
        format!("{:.1} KB", size / 1024.0)
    } else if size < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Size in kilobytes with one decimal, the unit used in per-file report lines
#[allow(clippy::cast_precision_loss)]
pub fn kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
