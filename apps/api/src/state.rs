use std::sync::Arc;

use crate::geo::StateGeoTable;
use crate::matching::dimensions::DimensionOptions;
use crate::matching::similarity::SimilarityScorer;
use crate::models::listing::Dataset;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Normalized listings in source order.
    pub dataset: Arc<Dataset>,
    pub geo: Arc<StateGeoTable>,
    /// Selector options, precomputed from `dataset`.
    pub dimensions: Arc<DimensionOptions>,
    /// Pluggable similarity backend. Default: TfIdfScorer.
    pub scorer: Arc<dyn SimilarityScorer>,
}

impl AppState {
    pub fn new(
        dataset: Dataset,
        geo: StateGeoTable,
        default_title: &str,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Self {
        let dimensions = DimensionOptions::from_listings(&dataset.listings, default_title);
        Self {
            dataset: Arc::new(dataset),
            geo: Arc::new(geo),
            dimensions: Arc::new(dimensions),
            scorer,
        }
    }
}
