//! Progress bar display for copy and normalize runs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a run over a known number of files
pub struct ProgressDisplay {
    pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a progress bar over `total` files, labelled with `label`
    pub fn new(total: u64, label: &str) -> Self {
        let style = ProgressStyle::with_template(&format!(
            "{label} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        Self { pb }
    }

    /// A display that draws nothing (JSON output, tests)
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Set the number of files once it is known
    pub fn set_total(&self, total: u64) {
        self.pb.set_length(total);
    }

    /// Show `name` as the current file and advance by one
    pub fn step(&self, name: &str) {
        // Truncate long names for display
        let display_name = if name.chars().count() > 50 {
            let tail: String = name
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            name.to_string()
        };
        self.pb.set_message(display_name);
        self.pb.inc(1);
    }

    /// Print a line above the bar without tearing it
    pub fn println(&self, line: &str) {
        self.pb.suspend(|| eprintln!("{line}"));
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
