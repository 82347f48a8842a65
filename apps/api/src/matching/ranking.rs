//! Ranking — scores every filtered listing against a query and orders them.

use serde::Serialize;
use tracing::debug;

use crate::matching::similarity::SimilarityScorer;
use crate::models::listing::Listing;

/// A similarity expressed as a display percentage.
///
/// The cosine is first rounded to 4 decimals, scaled by 100, then formatted
/// with 2 decimals. `value` is the formatted string read back, so sorting
/// sees exactly what is displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    pub value: f64,
    pub display: String,
}

impl MatchScore {
    pub fn from_similarity(similarity: f64) -> Self {
        let fraction = (similarity * 10_000.0).round() / 10_000.0;
        let percent = fraction * 100.0;
        let display = format!("{percent:.2}");
        let value = display.parse().unwrap_or(percent);
        Self { value, display }
    }
}

#[derive(Debug, Clone)]
pub struct RankedResult<'a> {
    pub listing: &'a Listing,
    pub score: MatchScore,
}

/// Scores `listings` against `query`, best first. Equal scores keep input order.
///
/// Returns `None` when the query is blank: ranking is skipped, not failed.
pub fn rank<'a>(
    scorer: &dyn SimilarityScorer,
    query: &str,
    listings: &[&'a Listing],
) -> Option<Vec<RankedResult<'a>>> {
    if query.trim().is_empty() {
        return None;
    }

    let mut ranked: Vec<RankedResult<'a>> = listings
        .iter()
        .map(|&listing| RankedResult {
            listing,
            score: MatchScore::from_similarity(scorer.similarity(query, &listing.description)),
        })
        .collect();

    // Vec::sort_by is stable.
    ranked.sort_by(|a, b| b.score.value.total_cmp(&a.score.value));

    debug!(
        "Ranked {} listings with {} scorer",
        ranked.len(),
        scorer.name()
    );
    Some(ranked)
}

/// The first `k` results, with `k` clamped to `1..=len`.
pub fn top_k<'r, 'a>(ranked: &'r [RankedResult<'a>], k: usize) -> &'r [RankedResult<'a>] {
    let k = k.clamp(1, ranked.len().max(1));
    &ranked[..k.min(ranked.len())]
}
