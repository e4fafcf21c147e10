use crate::model::{ClassifiedReview, SentimentLabel};

/// Cleaned texts of every review carrying `label`, in batch order, joined by
/// a single space. Feeds the word-cloud panel.
pub fn label_corpus(reviews: &[ClassifiedReview], label: &SentimentLabel) -> String {
    reviews
        .iter()
        .filter(|review| &review.label == label)
        .map(|review| review.cleaned.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
