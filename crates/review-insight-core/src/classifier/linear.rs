use super::Classifier;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// On-disk form of a fitted linear model (linear SVM, logistic regression).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Linear decision function over a feature vector.
///
/// A single coefficient row with two classes is a binary model: a positive
/// decision value picks the second class. Otherwise there is one row per
/// class and the highest decision value wins.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl TryFrom<LinearArtifact> for LinearClassifier {
    type Error = String;

    fn try_from(artifact: LinearArtifact) -> std::result::Result<Self, Self::Error> {
        let LinearArtifact {
            classes,
            coef,
            intercept,
        } = artifact;

        if classes.len() < 2 {
            return Err(format!("need at least two classes, got {}", classes.len()));
        }
        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows {
            return Err(format!(
                "expected {} coefficient rows for {} classes, got {}",
                expected_rows,
                classes.len(),
                coef.len()
            ));
        }
        if intercept.len() != coef.len() {
            return Err(format!(
                "expected {} intercepts, got {}",
                coef.len(),
                intercept.len()
            ));
        }
        let n_features = coef[0].len();
        if coef.iter().any(|row| row.len() != n_features) {
            return Err("coefficient rows differ in length".to_string());
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            n_features,
        })
    }
}

impl LinearClassifier {
    pub fn decision_function(&self, features: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(self.intercept.iter())
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<&str> {
        if features.len() != self.n_features {
            return Err(Error::Classify(format!(
                "feature vector has {} entries, model expects {}",
                features.len(),
                self.n_features
            )));
        }

        let scores = self.decision_function(features);
        if scores.iter().any(|s| s.is_nan()) {
            return Err(Error::Classify("decision value is NaN".to_string()));
        }

        let index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            // First maximum wins on ties
            scores
                .iter()
                .enumerate()
                .fold(0, |best, (i, s)| if *s > scores[best] { i } else { best })
        };
        Ok(&self.classes[index])
    }
}
