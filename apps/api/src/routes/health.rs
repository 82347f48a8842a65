use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and the size of the loaded dataset.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch",
        "source": state.dataset.source,
        "listings": state.dataset.len(),
        "states": state.geo.len(),
        "loaded_at": state.dataset.loaded_at,
    }))
}
