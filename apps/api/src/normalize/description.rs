use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::lemmatizer::lemmatize;
use super::stopwords::is_english_stopword;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("alphanumeric pattern compiles"));

/// Reduces a description to its distinct content words:
/// lowercase → newlines to spaces → collapse whitespace → strip punctuation
/// → drop stopwords → lemmatize → dedup (first occurrence wins).
pub fn normalize_description(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let lowered = raw.to_lowercase().replace('\n', " ");
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let cleaned = NON_ALPHANUMERIC.replace_all(&collapsed, "");

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|token| !is_english_stopword(token))
        .map(lemmatize)
        .filter(|lemma| seen.insert(lemma.clone()))
        .collect::<Vec<_>>()
        .join(" ")
}
