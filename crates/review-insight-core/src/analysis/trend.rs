use crate::model::{ClassifiedReview, SentimentLabel};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of reviews with one label posted on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    pub day: NaiveDate,
    pub label: SentimentLabel,
    pub count: usize,
}

/// Sparse daily series ordered by day, then label. Days (or labels) with no
/// reviews produce no rows.
pub fn daily_trend(reviews: &[ClassifiedReview]) -> Vec<TrendBucket> {
    let mut buckets: BTreeMap<(NaiveDate, &SentimentLabel), usize> = BTreeMap::new();
    for review in reviews {
        let day = review.record.posted_at.date_naive();
        *buckets.entry((day, &review.label)).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|((day, label), count)| TrendBucket {
            day,
            label: label.clone(),
            count,
        })
        .collect()
}
