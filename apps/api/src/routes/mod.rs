pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::matching::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dimensions", get(handlers::handle_dimensions))
        .route("/api/v1/search", post(handlers::handle_search))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::geo::StateGeoTable;
    use crate::matching::similarity::TfIdfScorer;
    use crate::models::listing::{Dataset, Listing};
    use crate::normalize::normalize_dataset;

    fn app() -> Router {
        let raw = |id, title: &str, state_id: &str, state: &str, job_type: &str, desc: &str| Listing {
            id: Some(id),
            title: title.to_string(),
            state_id: state_id.to_string(),
            state_name: state.to_string(),
            job_type: job_type.to_string(),
            experience_level: "Entry level".to_string(),
            description: desc.to_string(),
            salary_min: 4999.6,
            salary_max: 7000.2,
            ..Default::default()
        };
        let mut dataset = Dataset::new(
            vec![
                raw(1, "Data Scientist (Remote)", "TX", "Texas", "full-time", "Python and SQL for analytics dashboards."),
                raw(2, "$45/hr | Data Scientist", "CA", "California", "contract", "Java services.\nSpring boot."),
                raw(3, "Data Analyst in Denver, CO", "CO", "Colorado", "part-time", "Excel reports"),
            ],
            "memory",
        );
        normalize_dataset(&mut dataset);

        build_router(AppState::new(
            dataset,
            StateGeoTable::builtin().clone(),
            "DATA SCIENTIST",
            Arc::new(TfIdfScorer),
        ))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_search(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/search")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_dataset_size() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["listings"], 3);
        assert_eq!(body["states"], 50);
    }

    #[tokio::test]
    async fn test_dimensions_lists_normalized_options() {
        let request = Request::builder()
            .uri("/api/v1/dimensions")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["titles"], json!(["DATA ANALYST", "DATA SCIENTIST"]));
        assert_eq!(body["default_title"], "DATA SCIENTIST");
        assert_eq!(body["job_types"], json!(["ALL", "CONTRACT", "FULL TIME", "PART TIME"]));
        assert_eq!(body["locations"][0], "ALL");
    }

    #[tokio::test]
    async fn test_search_ranks_and_renders_cards() {
        let (status, body) = send(
            app(),
            post_search(json!({
                "title": "data scientist",
                "summary": "python sql analytics",
                "limit": 2
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_matches"], 2);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], 1);
        assert_eq!(results[0]["title"], "DATA SCIENTIST");
        assert_eq!(results[0]["job_type"], "Full Time");
        assert_eq!(results[0]["salary_min"], 5000);
        assert_eq!(results[1]["match_score"], "0.00");
        assert!(body["keywords"].as_array().is_some());
    }

    #[tokio::test]
    async fn test_search_without_summary_omits_results() {
        let (status, body) = send(
            app(),
            post_search(json!({ "title": "DATA", "location": "NEVADA" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_matches"], 3);
        assert!(body.get("results").is_none());
        assert!(body.get("keywords").is_none());
        assert_eq!(body["notices"][0]["stage"], "location");
        assert_eq!(body["state_counts"].as_array().unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_title() {
        let (status, body) = send(app(), post_search(json!({ "title": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
