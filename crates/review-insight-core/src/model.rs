use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Package-name style key of a store application, e.g. `com.mobile.legends`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of reviews requested for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewCount(u32);

impl ReviewCount {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 2000;
    pub const STEP: u32 = 10;

    pub fn new(count: u32) -> Result<Self, Error> {
        if !(Self::MIN..=Self::MAX).contains(&count) || count % Self::STEP != 0 {
            return Err(Error::InvalidCount {
                got: count,
                min: Self::MIN,
                max: Self::MAX,
                step: Self::STEP,
            });
        }
        Ok(Self(count))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ReviewCount {
    fn default() -> Self {
        Self(50)
    }
}

/// Application metadata shown above the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub title: String,
    pub developer: String,
    pub genre: String,
    pub icon_url: String,
    /// Aggregate store rating, absent for apps without enough ratings.
    pub score: Option<f64>,
}

/// One scraped review, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(default)]
    pub review_id: Option<String>,
    pub user_name: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    /// A class the classifier emitted that maps to neither label.
    Other(String),
}

impl SentimentLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Other(name) => name,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review together with its cleaned text and predicted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReview {
    pub record: ReviewRecord,
    pub cleaned: String,
    pub label: SentimentLabel,
}
