use crate::model::{ClassifiedReview, SentimentLabel};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: SentimentLabel,
    pub count: usize,
    /// `100 × count / total`, unrounded.
    pub percent: f64,
}

/// Counts, shares and net score of one batch of classified reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    /// Positive and Negative always, then any other label present.
    pub shares: Vec<LabelShare>,
    /// `(positive − negative) / total × 100`, one decimal.
    pub net_score: f64,
}

impl SentimentSummary {
    /// Returns `None` for an empty batch; there is nothing to divide by.
    pub fn from_reviews(reviews: &[ClassifiedReview]) -> Option<Self> {
        let total = reviews.len();
        if total == 0 {
            return None;
        }

        let mut counts: BTreeMap<SentimentLabel, usize> = BTreeMap::new();
        counts.insert(SentimentLabel::Positive, 0);
        counts.insert(SentimentLabel::Negative, 0);
        for review in reviews {
            *counts.entry(review.label.clone()).or_default() += 1;
        }

        let positive = counts[&SentimentLabel::Positive];
        let negative = counts[&SentimentLabel::Negative];
        let shares = counts
            .into_iter()
            .map(|(label, count)| LabelShare {
                label,
                count,
                percent: percent(count, total),
            })
            .collect();

        Some(Self {
            total,
            positive,
            negative,
            shares,
            net_score: net_score(positive, negative, total)?,
        })
    }

    pub fn positive_percent(&self) -> f64 {
        percent(self.positive, self.total)
    }

    pub fn negative_percent(&self) -> f64 {
        percent(self.negative, self.total)
    }

    pub fn share(&self, label: &SentimentLabel) -> Option<&LabelShare> {
        self.shares.iter().find(|share| &share.label == label)
    }

    /// Labels outside Positive/Negative that the classifier produced.
    pub fn other_labels(&self) -> impl Iterator<Item = &LabelShare> {
        self.shares
            .iter()
            .filter(|share| matches!(share.label, SentimentLabel::Other(_)))
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * count as f64 / total as f64
}

/// Net sentiment in `[-100, 100]`, rounded to one decimal place.
pub fn net_score(positive: usize, negative: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let raw = (positive as f64 - negative as f64) / total as f64 * 100.0;
    Some((raw * 10.0).round() / 10.0)
}
