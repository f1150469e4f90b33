use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over the tickers of a batch. A hidden tracker swallows every call,
/// which keeps tests and `--no-progress` runs quiet.
#[derive(Clone)]
pub struct ProgressTracker {
    progress_bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new(total: u64) -> Self {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { progress_bar: pb }
    }

    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    pub fn update_message(&self, ticker: &str) {
        self.progress_bar
            .set_message(format!("Processing {}...", ticker));
    }

    pub fn increment(&self) {
        self.progress_bar.inc(1);
    }

    /// Prints a line above the bar without breaking it.
    pub fn println(&self, line: &str) {
        self.progress_bar.println(line);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
