use crate::analysis::{self, SentimentSummary, TrendBucket};
use crate::model::{AppId, AppMetadata, ClassifiedReview, SentimentLabel};
use crate::text::{self, TermCount};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunTimings {
    pub fetch_duration: Duration,
    pub classify_duration: Duration,
}

/// Result of one successful run: every review of a single fetch batch,
/// classified. Never empty.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    app_id: AppId,
    app: AppMetadata,
    reviews: Vec<ClassifiedReview>,
    summary: SentimentSummary,
    created_at: DateTime<Utc>,
    timings: RunTimings,
}

impl AnalysisReport {
    /// Returns `None` when `reviews` is empty.
    pub fn new(
        app_id: AppId,
        app: AppMetadata,
        reviews: Vec<ClassifiedReview>,
        timings: RunTimings,
    ) -> Option<Self> {
        let summary = SentimentSummary::from_reviews(&reviews)?;
        Some(Self {
            app_id,
            app,
            reviews,
            summary,
            created_at: Utc::now(),
            timings,
        })
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn app(&self) -> &AppMetadata {
        &self.app
    }

    pub fn reviews(&self) -> &[ClassifiedReview] {
        &self.reviews
    }

    pub fn summary(&self) -> &SentimentSummary {
        &self.summary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn timings(&self) -> RunTimings {
        self.timings
    }

    pub fn daily_trend(&self) -> Vec<TrendBucket> {
        analysis::daily_trend(&self.reviews)
    }

    pub fn corpus(&self, label: &SentimentLabel) -> String {
        analysis::label_corpus(&self.reviews, label)
    }

    pub fn top_terms(&self, label: &SentimentLabel, limit: usize) -> Vec<TermCount> {
        text::top_terms(&self.corpus(label), limit)
    }

    /// Serializable overview of the report, without the review rows.
    pub fn digest(&self, top_terms: usize) -> ReportDigest {
        let labels: Vec<SentimentLabel> = self
            .summary
            .shares
            .iter()
            .map(|share| share.label.clone())
            .collect();
        ReportDigest {
            app_id: self.app_id.to_string(),
            app: self.app.clone(),
            created_at: self.created_at,
            summary: self.summary.clone(),
            daily_trend: self.daily_trend(),
            top_terms: labels
                .into_iter()
                .map(|label| {
                    let terms = self.top_terms(&label, top_terms);
                    LabelTerms { label, terms }
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelTerms {
    pub label: SentimentLabel,
    pub terms: Vec<TermCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDigest {
    pub app_id: String,
    pub app: AppMetadata,
    pub created_at: DateTime<Utc>,
    pub summary: SentimentSummary,
    pub daily_trend: Vec<TrendBucket>,
    pub top_terms: Vec<LabelTerms>,
}
