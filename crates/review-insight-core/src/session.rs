use crate::engine::{AnalysisEngine, RunOutcome};
use crate::error::Result;
use crate::fetcher::ReviewSource;
use crate::model::ReviewCount;
use crate::progress::ProgressReporter;
use crate::report::AnalysisReport;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// One user's analysis session: holds at most one report.
///
/// A run borrows the session mutably, so only one can be in flight. A
/// failed run leaves the previously held report in place; only
/// [`Session::reset`] clears it.
pub struct Session<S: ReviewSource> {
    engine: AnalysisEngine<S>,
    state: SessionState,
    report: Option<AnalysisReport>,
}

impl<S: ReviewSource> Session<S> {
    pub fn new(engine: AnalysisEngine<S>) -> Self {
        Self {
            engine,
            state: SessionState::Idle,
            report: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn engine(&self) -> &AnalysisEngine<S> {
        &self.engine
    }

    /// Run one analysis. `Ok(None)` means the store had no reviews.
    pub fn run(
        &mut self,
        url: &str,
        count: ReviewCount,
        reporter: &dyn ProgressReporter,
    ) -> Result<Option<&AnalysisReport>> {
        // Precondition failures never reach the network and leave us idle.
        if let Err(e) = self.engine.check_preconditions(url) {
            self.state = SessionState::Idle;
            return Err(e);
        }

        self.state = SessionState::Fetching;
        debug!("Session state: {:?}", self.state);
        match self.engine.run(url, count, reporter) {
            Ok(RunOutcome::Completed(report)) => {
                info!(
                    "Analysis of {} complete: {} reviews",
                    report.app_id(),
                    report.reviews().len()
                );
                self.state = SessionState::Succeeded;
                self.report = Some(report);
                Ok(self.report.as_ref())
            }
            Ok(RunOutcome::NoReviews(app_id)) => {
                info!("No reviews for {}; keeping previous report", app_id);
                self.state = SessionState::Failed;
                Ok(None)
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    /// Drop the held report and return to idle.
    pub fn reset(&mut self) {
        if self.report.take().is_some() {
            info!("Session reset, report cleared");
        }
        self.state = SessionState::Idle;
    }
}
