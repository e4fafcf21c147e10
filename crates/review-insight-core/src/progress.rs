/// Trait for reporting run progress.
///
/// The CLI implements it with indicatif spinners and bars. All methods have
/// default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_fetch_start(&self, _app_id: &str, _count: u32) {}
    fn on_fetch_complete(&self, _reviews: usize, _duration_secs: f64) {}
    fn on_classify_start(&self, _total: usize) {}
    fn on_classify_progress(&self, _classified: usize, _total: usize) {}
    fn on_classify_complete(&self, _total: usize, _duration_secs: f64) {}
    fn on_run_failed(&self, _reason: &str) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
