use super::Vectorizer;
use ahash::AHashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_token_pattern() -> String {
    r"\b\w\w+\b".to_string()
}

fn default_lowercase() -> bool {
    true
}

/// TF-IDF vectorizer with a frozen vocabulary and idf weights.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    token_re: Regex,
    lowercase: bool,
}

impl TryFrom<TfidfArtifact> for TfidfVectorizer {
    type Error = String;

    fn try_from(artifact: TfidfArtifact) -> Result<Self, Self::Error> {
        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(format!(
                "idf has {} weights for {} vocabulary terms",
                artifact.idf.len(),
                artifact.vocabulary.len()
            ));
        }
        if let Some((term, column)) = artifact
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= artifact.idf.len())
        {
            return Err(format!("term '{}' points at column {} out of range", term, column));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }
        let token_re = Regex::new(&artifact.token_pattern)
            .map_err(|e| format!("invalid token_pattern: {}", e))?;

        Ok(Self {
            vocabulary: artifact.vocabulary.into_iter().collect(),
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            token_re,
            lowercase: artifact.lowercase,
        })
    }
}

impl TfidfVectorizer {
    fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_re.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn count_ngrams(&self, tokens: &[&str], counts: &mut [f64]) {
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            if n == 1 {
                for token in tokens {
                    if let Some(&column) = self.vocabulary.get(*token) {
                        counts[column] += 1.0;
                    }
                }
                continue;
            }
            for window in tokens.windows(n) {
                if let Some(&column) = self.vocabulary.get(window.join(" ").as_str()) {
                    counts[column] += 1.0;
                }
            }
        }
    }

    fn apply_norm(&self, vector: &mut [f64]) {
        let norm = match self.norm {
            Some(Norm::L2) => vector.iter().map(|x| x * x).sum::<f64>().sqrt(),
            Some(Norm::L1) => vector.iter().map(|x| x.abs()).sum::<f64>(),
            None => return,
        };
        if norm > 0.0 {
            for x in vector.iter_mut() {
                *x /= norm;
            }
        }
    }
}

impl Vectorizer for TfidfVectorizer {
    fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, text: &str) -> Vec<f64> {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let mut vector = vec![0.0; self.idf.len()];
        self.count_ngrams(&self.tokens(text), &mut vector);

        for (tf, idf) in vector.iter_mut().zip(self.idf.iter()) {
            if *tf > 0.0 {
                if self.sublinear_tf {
                    *tf = 1.0 + tf.ln();
                }
                *tf *= idf;
            }
        }

        self.apply_norm(&mut vector);
        vector
    }
}
