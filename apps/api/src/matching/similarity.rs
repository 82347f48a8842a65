//! Similarity Ranker scoring — TF-IDF cosine between a query and one document.
//!
//! The vector space is rebuilt for every (query, description) pair, so the
//! corpus is always exactly two documents. Scores are therefore not
//! comparable with a corpus-wide TF-IDF ranking.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Tokens are runs of two or more word characters.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern compiles"));

/// Pluggable similarity backend. Returns a score in `[0, 1]`.
///
/// Carried in `AppState` as `Arc<dyn SimilarityScorer>`.
pub trait SimilarityScorer: Send + Sync {
    fn similarity(&self, query: &str, document: &str) -> f64;

    /// Backend label, surfaced in responses for transparency.
    fn name(&self) -> &'static str;
}

/// Default scorer: per-pair TF-IDF with smoothed idf and L2-normalised rows.
pub struct TfIdfScorer;

impl SimilarityScorer for TfIdfScorer {
    fn similarity(&self, query: &str, document: &str) -> f64 {
        tfidf_cosine(query, document)
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for token in TOKEN.find_iter(&lowered) {
        *counts.entry(token.as_str().to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of the TF-IDF vectors of `a` and `b` within the corpus
/// `{a, b}`. idf(t) = ln((1 + n) / (1 + df(t))) + 1 with n = 2.
pub fn tfidf_cosine(a: &str, b: &str) -> f64 {
    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    if counts_a.is_empty() || counts_b.is_empty() {
        return 0.0;
    }

    let idf = |term: &str| {
        let df = f64::from(
            u8::from(counts_a.contains_key(term)) + u8::from(counts_b.contains_key(term)),
        );
        (3.0 / (1.0 + df)).ln() + 1.0
    };

    let weigh = |counts: &BTreeMap<String, f64>| -> BTreeMap<String, f64> {
        counts
            .iter()
            .map(|(term, tf)| (term.clone(), tf * idf(term)))
            .collect()
    };
    let vec_a = weigh(&counts_a);
    let vec_b = weigh(&counts_b);

    let norm = |v: &BTreeMap<String, f64>| v.values().map(|w| w * w).sum::<f64>().sqrt();
    let (norm_a, norm_b) = (norm(&vec_a), norm(&vec_b));
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = vec_a
        .iter()
        .filter_map(|(term, wa)| vec_b.get(term).map(|wb| wa * wb))
        .sum();

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
