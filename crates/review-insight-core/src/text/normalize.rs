use regex::Regex;

lazy_static::lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").expect("digit pattern is valid");
}

/// Canonical form of a review body as the classifier was trained on it.
///
/// Lower-cases, strips every decimal digit, strips ASCII punctuation and
/// trims the result. Non-ASCII punctuation and emoji are kept.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_digits = DIGITS.replace_all(&lowered, "");
    no_digits
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .trim()
        .to_string()
}
