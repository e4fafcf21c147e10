pub mod analysis;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod model;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod session;
pub mod text;

pub use config::AppConfig;
pub use engine::{AnalysisEngine, RunOutcome};
pub use error::Error;
pub use model::{AppId, AppMetadata, ClassifiedReview, ReviewCount, ReviewRecord, SentimentLabel};
pub use progress::{ProgressReporter, SilentReporter};
pub use report::AnalysisReport;
pub use resolver::resolve_app_id;
pub use session::{Session, SessionState};
pub use text::normalize;
