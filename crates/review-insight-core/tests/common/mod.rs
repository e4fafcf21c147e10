#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use review_insight_core::classifier::{Classifier, LabelMap, SentimentModel, Vectorizer};
use review_insight_core::error::{Error, Result};
use review_insight_core::fetcher::{Locale, ReviewQuery, ReviewSource};
use review_insight_core::{AnalysisEngine, AppId, AppMetadata, ReviewRecord};
use std::cell::{Cell, RefCell};

pub const STORE_URL: &str = "https://play.google.com/store/apps/details?id=com.mobile.legends&hl=id";

/// Counts words from three small keyword lists.
pub struct KeywordVectorizer;

const POSITIVE_WORDS: [&str; 3] = ["bagus", "mantap", "suka"];
const NEGATIVE_WORDS: [&str; 3] = ["jelek", "crash", "lag"];

impl Vectorizer for KeywordVectorizer {
    fn n_features(&self) -> usize {
        3
    }

    fn transform(&self, text: &str) -> Vec<f64> {
        let mut features = vec![0.0; 3];
        for word in text.split_whitespace() {
            if POSITIVE_WORDS.contains(&word) {
                features[0] += 1.0;
            } else if NEGATIVE_WORDS.contains(&word) {
                features[1] += 1.0;
            } else if word == "rusak" {
                features[2] += 1.0;
            }
        }
        features
    }
}

/// Positive when positive words outnumber negative ones; fails on "rusak".
pub struct KeywordClassifier {
    classes: Vec<String>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self {
            classes: vec!["Negatif".to_string(), "Positif".to_string()],
        }
    }
}

impl Classifier for KeywordClassifier {
    fn n_features(&self) -> usize {
        3
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<&str> {
        if features[2] > 0.0 {
            return Err(Error::Classify("unreadable review".to_string()));
        }
        if features[0] > features[1] {
            Ok(&self.classes[1])
        } else {
            Ok(&self.classes[0])
        }
    }
}

pub fn keyword_model() -> Result<SentimentModel> {
    SentimentModel::new(
        Box::new(KeywordVectorizer),
        Box::new(KeywordClassifier::new()),
        LabelMap::new("Positif", "Negatif"),
    )
}

pub fn review(user: &str, content: &str, day: u32, hour: u32, rating: u8) -> ReviewRecord {
    ReviewRecord {
        review_id: None,
        user_name: user.to_string(),
        content: content.to_string(),
        posted_at: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
        rating,
    }
}

/// In-memory store that records how often it was contacted.
pub struct FakeSource {
    pub reviews: RefCell<Vec<ReviewRecord>>,
    pub fail_with: RefCell<Option<String>>,
    pub app_calls: Cell<usize>,
    pub review_calls: Cell<usize>,
    pub last_count: Cell<u32>,
}

impl FakeSource {
    pub fn new(reviews: Vec<ReviewRecord>) -> Self {
        Self {
            reviews: RefCell::new(reviews),
            fail_with: RefCell::new(None),
            app_calls: Cell::new(0),
            review_calls: Cell::new(0),
            last_count: Cell::new(0),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.app_calls.get() + self.review_calls.get()
    }
}

impl ReviewSource for FakeSource {
    fn fetch_app(&self, app_id: &AppId, _locale: &Locale) -> Result<AppMetadata> {
        self.app_calls.set(self.app_calls.get() + 1);
        if let Some(reason) = self.fail_with.borrow().as_ref() {
            return Err(Error::Fetch(reason.clone()));
        }
        Ok(AppMetadata {
            title: format!("App {}", app_id),
            developer: "Moonton".to_string(),
            genre: "Action".to_string(),
            icon_url: "https://img/icon.png".to_string(),
            score: Some(4.2),
        })
    }

    fn fetch_reviews(&self, query: &ReviewQuery<'_>) -> Result<Vec<ReviewRecord>> {
        self.review_calls.set(self.review_calls.get() + 1);
        self.last_count.set(query.count);
        Ok(self
            .reviews
            .borrow()
            .iter()
            .take(query.count as usize)
            .cloned()
            .collect())
    }
}

pub fn engine(source: FakeSource) -> AnalysisEngine<FakeSource> {
    AnalysisEngine::new(source, keyword_model(), Locale::new("id", "id"))
}

/// Three reviews: positive and positive on June 1st, negative on June 2nd.
pub fn three_reviews() -> Vec<ReviewRecord> {
    vec![
        review("Budi", "Game-nya BAGUS banget!!", 1, 9, 5),
        review("Sari", "Sering crash setelah update 2.0", 2, 14, 1),
        review("Andi", "Mantap, suka sekali 10/10", 1, 20, 5),
    ]
}
