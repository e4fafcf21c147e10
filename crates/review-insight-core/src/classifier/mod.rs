//! Boundary to the frozen sentiment model.
//!
//! The model is a pair of artifacts produced elsewhere: a vectorizer that
//! turns cleaned review text into a fixed-length feature vector, and a
//! classifier that turns that vector into a class name. Both are loaded
//! once at start-up; the pipeline only ever calls [`SentimentModel::predict`].

pub mod linear;
pub mod tfidf;

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::model::SentimentLabel;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub use linear::LinearClassifier;
pub use tfidf::TfidfVectorizer;

/// Maps cleaned text to a feature vector of constant length.
pub trait Vectorizer: Send + Sync {
    fn n_features(&self) -> usize;
    fn transform(&self, text: &str) -> Vec<f64>;
}

/// Maps a feature vector to one of its class names.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;
    fn classes(&self) -> &[String];
    fn predict(&self, features: &[f64]) -> Result<&str>;
}

/// Which classifier classes mean positive and negative.
#[derive(Debug, Clone)]
pub struct LabelMap {
    pub positive_class: String,
    pub negative_class: String,
}

impl LabelMap {
    pub fn new(positive_class: &str, negative_class: &str) -> Self {
        Self {
            positive_class: positive_class.to_string(),
            negative_class: negative_class.to_string(),
        }
    }

    pub fn label_for(&self, class: &str) -> SentimentLabel {
        if class.eq_ignore_ascii_case(&self.positive_class) {
            SentimentLabel::Positive
        } else if class.eq_ignore_ascii_case(&self.negative_class) {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Other(class.to_string())
        }
    }
}

pub struct SentimentModel {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
    labels: LabelMap,
}

impl std::fmt::Debug for SentimentModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentModel")
            .field("n_features", &self.vectorizer.n_features())
            .field("classes", &self.classifier.classes())
            .field("labels", &self.labels)
            .finish()
    }
}

impl SentimentModel {
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
        labels: LabelMap,
    ) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(Error::ModelUnavailable(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
            labels,
        })
    }

    /// Load the vectorizer and classifier artifacts named by the config.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vectorizer: TfidfVectorizer = read_artifact::<tfidf::TfidfArtifact>(&config.vectorizer_path)
            .and_then(|artifact| {
                TfidfVectorizer::try_from(artifact).map_err(|reason| Error::Artifact {
                    path: config.vectorizer_path.clone(),
                    reason,
                })
            })?;
        let classifier: LinearClassifier = read_artifact::<linear::LinearArtifact>(&config.classifier_path)
            .and_then(|artifact| {
                LinearClassifier::try_from(artifact).map_err(|reason| Error::Artifact {
                    path: config.classifier_path.clone(),
                    reason,
                })
            })?;

        let labels = LabelMap::new(&config.positive_class, &config.negative_class);
        for class in classifier.classes() {
            if matches!(labels.label_for(class), SentimentLabel::Other(_)) {
                debug!("Classifier class '{}' maps to neither sentiment label", class);
            }
        }

        let model = Self::new(Box::new(vectorizer), Box::new(classifier), labels)?;
        info!(
            "Sentiment model loaded: {} features, classes {:?}",
            model.vectorizer.n_features(),
            model.classifier.classes()
        );
        Ok(model)
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Classify one cleaned review body.
    pub fn predict(&self, cleaned: &str) -> Result<SentimentLabel> {
        let features = self.vectorizer.transform(cleaned);
        let class = self.classifier.predict(&features)?;
        Ok(self.labels.label_for(class))
    }
}

fn read_artifact<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = fs::read_to_string(Path::new(path)).map_err(|e| Error::Artifact {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| Error::Artifact {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
