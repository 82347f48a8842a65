use chrono::{DateTime, Utc};
use serde::Serialize;

/// One job posting. Titles, descriptions and job types are rewritten in place
/// by the normalizer; everything else stays as loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub id: Option<i64>,
    pub company_id: Option<i64>,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub state_id: String,
    pub state_name: String,
    pub job_type: String,
    pub experience_level: String,
    /// Monthly salary floor. Missing values load as 0.
    pub salary_min: f64,
    pub salary_max: f64,
}

/// The loaded listings in source order. Order is the tie-break for ranking.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub listings: Vec<Listing>,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>, source: impl Into<String>) -> Self {
        Self {
            listings,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
