use ahash::AHashMap;
use regex::Regex;
use serde::Serialize;

lazy_static::lazy_static! {
    // Same token rule the word-cloud renderer uses: two or more word chars.
    static ref WORD: Regex = Regex::new(r"\w[\w']+").expect("word pattern is valid");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Most frequent terms of a label corpus, count descending then term
/// ascending.
pub fn top_terms(corpus: &str, limit: usize) -> Vec<TermCount> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for m in WORD.find_iter(corpus) {
        *counts.entry(m.as_str()).or_default() += 1;
    }

    let mut terms: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount {
            term: term.to_string(),
            count,
        })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(limit);
    terms
}
