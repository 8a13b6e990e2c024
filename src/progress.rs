//! Progress presentation for file writes
//!
//! All progress reporting goes through the `ProgressReporter` trait, allowing
//! different implementations based on command-line flags: an interactive
//! progress bar for normal runs, a silent no-op for dry-run and
//! non-interactive mode.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for the write phase
pub trait ProgressReporter {
    /// Initialize with the number of files that will be written
    fn init(&mut self, total_files: u64);

    /// Show the file currently being written
    fn update_item(&mut self, dest: &str);

    /// Finish the progress display
    fn finish(&mut self);
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn init(&mut self, total_files: u64) {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let bar = ProgressBar::new(total_files);
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn update_item(&mut self, dest: &str) {
        if let Some(ref bar) = self.bar {
            // Truncate long paths for display
            let display_path = if dest.len() > 50 {
                format!("...{}", &dest[dest.len() - 47..])
            } else {
                dest.to_string()
            };
            bar.set_message(display_path);
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Silent progress reporter for dry-run and non-interactive mode
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn init(&mut self, _total_files: u64) {
        // No-op for silent mode
    }

    fn update_item(&mut self, _dest: &str) {
        // No-op for silent mode
    }

    fn finish(&mut self) {
        // No-op for silent mode
    }
}
