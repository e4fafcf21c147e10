use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Classifier artifacts were missing or corrupt at start-up.
    #[error("Sentiment model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid model artifact {path}: {reason}")]
    Artifact { path: String, reason: String },

    #[error("Enter a Play Store app link first")]
    EmptyUrl,

    #[error("Invalid app link: no app id found in '{0}'")]
    InvalidUrl(String),

    #[error("Review count must be between {min} and {max} in steps of {step}, got {got}")]
    InvalidCount {
        got: u32,
        min: u32,
        max: u32,
        step: u32,
    },

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Classification failed: {0}")]
    Classify(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Input errors are rejected before any network call.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyUrl | Error::InvalidUrl(_) | Error::InvalidCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
