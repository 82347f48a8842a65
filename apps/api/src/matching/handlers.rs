//! Axum route handlers for the matching dashboard.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::geo::aggregate::{aggregate_by_state, StateCount};
use crate::keywords::{keyword_frequencies, KeywordCount, DEFAULT_MAX_WORDS};
use crate::matching::cards::ResultCard;
use crate::matching::dimensions::DimensionOptions;
use crate::matching::filter::{apply_filters, FilterNotice, FilterSelection};
use crate::matching::ranking::{rank, top_k};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub filters: FilterSelection,
    /// Free-text résumé summary. Blank skips ranking.
    #[serde(default)]
    pub summary: String,
    /// How many ranked results to show; clamped to `[1, total_matches]`.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total_matches: usize,
    pub notices: Vec<FilterNotice>,
    pub state_counts: Vec<StateCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ResultCard>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<KeywordCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorer_backend: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Filter → geo counts → (optional) rank → top-K cards + keyword bag.
pub fn search(state: &AppState, request: &SearchRequest) -> SearchResponse {
    let outcome = apply_filters(&state.dataset.listings, &request.filters);
    let state_counts = aggregate_by_state(&outcome.listings, &state.geo);

    let ranked = rank(state.scorer.as_ref(), &request.summary, &outcome.listings);
    let (results, keywords) = match &ranked {
        Some(ranked) => {
            let shown = top_k(ranked, request.limit.unwrap_or(1));
            let text = shown
                .iter()
                .map(|result| result.listing.description.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            (
                Some(shown.iter().map(ResultCard::from).collect::<Vec<_>>()),
                Some(keyword_frequencies(&text, DEFAULT_MAX_WORDS)),
            )
        }
        None => (None, None),
    };

    info!(
        "Search '{}': {} matches, {} notices, {} results shown",
        request.filters.title,
        outcome.listings.len(),
        outcome.notices.len(),
        results.as_ref().map_or(0, Vec::len)
    );

    SearchResponse {
        total_matches: outcome.listings.len(),
        notices: outcome.notices,
        state_counts,
        scorer_backend: ranked.as_ref().map(|_| state.scorer.name().to_string()),
        results,
        keywords,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/dimensions
pub async fn handle_dimensions(State(state): State<AppState>) -> Json<DimensionOptions> {
    Json(state.dimensions.as_ref().clone())
}

/// POST /api/v1/search
///
/// Runs the full dashboard pipeline for one set of selector values.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    if request.filters.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    Ok(Json(search(&state, &request)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::geo::StateGeoTable;
    use crate::matching::similarity::TfIdfScorer;
    use crate::models::listing::{Dataset, Listing};

    fn listing(id: i64, title: &str, state_id: &str, state: &str, description: &str) -> Listing {
        Listing {
            id: Some(id),
            title: title.to_string(),
            state_id: state_id.to_string(),
            state_name: state.to_string(),
            job_type: "Full Time".to_string(),
            experience_level: "Entry level".to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn test_state() -> AppState {
        let listings = vec![
            listing(1, "DATA SCIENTIST", "TX", "Texas", "python model statistic"),
            listing(2, "DATA SCIENTIST", "CA", "California", "python pandas analysis expert"),
            listing(3, "DATA SCIENTIST", "NY", "New York", "java backend developer"),
            listing(4, "DATA SCIENTIST", "TX", "Texas", "excel report"),
            listing(5, "DATA SCIENTIST", "WA", "Washington", "python data analysis sql"),
            listing(6, "SOFTWARE ENGINEER", "TX", "Texas", "rust service"),
        ];
        AppState::new(
            Dataset::new(listings, "memory"),
            StateGeoTable::builtin().clone(),
            "DATA SCIENTIST",
            Arc::new(TfIdfScorer),
        )
    }

    fn request(title: &str, summary: &str, limit: Option<usize>) -> SearchRequest {
        SearchRequest {
            filters: FilterSelection::for_title(title),
            summary: summary.to_string(),
            limit,
        }
    }

    #[test]
    fn test_blank_summary_skips_results_and_keywords() {
        let response = search(&test_state(), &request("DATA SCIENTIST", "", None));
        assert_eq!(response.total_matches, 5);
        assert!(response.results.is_none());
        assert!(response.keywords.is_none());
        assert!(response.scorer_backend.is_none());
        assert_eq!(response.state_counts.len(), 50);
    }

    #[test]
    fn test_limit_one_returns_single_best_match() {
        let response = search(
            &test_state(),
            &request("DATA SCIENTIST", "python data analysis", Some(1)),
        );
        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, Some(5));
        assert_eq!(response.scorer_backend.as_deref(), Some("tfidf"));
    }

    #[test]
    fn test_limit_is_clamped_to_match_count() {
        let response = search(
            &test_state(),
            &request("DATA SCIENTIST", "python", Some(99)),
        );
        assert_eq!(response.results.unwrap().len(), 5);
    }

    #[test]
    fn test_keywords_come_from_shown_results_only() {
        let response = search(
            &test_state(),
            &request("DATA SCIENTIST", "java backend", Some(1)),
        );
        let words: Vec<_> = response
            .keywords
            .unwrap()
            .into_iter()
            .map(|k| k.word)
            .collect();
        assert_eq!(words, vec!["java", "backend", "developer"]);
    }

    #[test]
    fn test_location_fallback_surfaces_notice() {
        let mut req = request("DATA SCIENTIST", "", None);
        req.filters.location = "FLORIDA".to_string();
        let response = search(&test_state(), &req);
        assert_eq!(response.total_matches, 5);
        assert_eq!(response.notices.len(), 1);
    }

    #[test]
    fn test_state_counts_sum_to_matches() {
        let response = search(&test_state(), &request("DATA", "", None));
        let total: u64 = response.state_counts.iter().map(|c| c.count).sum();
        assert_eq!(total, response.total_matches as u64);
    }

    #[test]
    fn test_no_title_match_ranks_nothing() {
        let response = search(&test_state(), &request("ASTRONAUT", "python", Some(3)));
        assert_eq!(response.total_matches, 0);
        assert_eq!(response.results.unwrap().len(), 0);
        assert!(response.keywords.unwrap().is_empty());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"title": "DATA"}"#).unwrap();
        assert_eq!(req.filters.location, "ALL");
        assert_eq!(req.summary, "");
        assert_eq!(req.limit, None);
    }
}
