use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use review_insight_core::ProgressReporter;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress reporter using indicatif progress bars.
///
/// - Fetch phase: spinner (the store may return fewer reviews than asked)
/// - Classify phase: progress bar over the fetched batch
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_fetch_start(&self, app_id: &str, count: u32) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("Fetching {} reviews for {}...", count, app_id));
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_fetch_complete(&self, reviews: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Fetch complete: {} reviews in {:.2}s",
            "✓".green(),
            reviews, duration_secs
        );
    }

    fn on_classify_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Classifying [{bar:30.cyan/dim}] {pos}/{len} reviews",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_classify_progress(&self, classified: usize, _total: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(classified as u64);
        }
    }

    fn on_classify_complete(&self, total: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Classification complete: {} reviews in {:.2}s",
            "✓".green(),
            total, duration_secs
        );
    }

    fn on_run_failed(&self, reason: &str) {
        self.finish_bar();
        eprintln!("  {} {}", "✗".red(), reason);
    }
}
