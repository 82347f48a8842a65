use serde::Serialize;

use crate::matching::ranking::RankedResult;

/// Display-ready view of one ranked listing.
#[derive(Debug, Clone, Serialize)]
pub struct ResultCard {
    pub id: Option<i64>,
    pub title: String,
    pub company_name: String,
    pub state_name: String,
    pub experience_level: String,
    pub job_type: String,
    pub salary_min: i64,
    pub salary_max: i64,
    /// Percentage with two decimals, e.g. `"42.17"`.
    pub match_score: String,
    pub description: String,
}

impl From<&RankedResult<'_>> for ResultCard {
    fn from(result: &RankedResult<'_>) -> Self {
        let listing = result.listing;
        Self {
            id: listing.id,
            title: listing.title.clone(),
            company_name: listing.company_name.clone(),
            state_name: listing.state_name.clone(),
            experience_level: listing.experience_level.clone(),
            job_type: listing.job_type.clone(),
            salary_min: round_salary(listing.salary_min),
            salary_max: round_salary(listing.salary_max),
            match_score: result.score.display.clone(),
            description: listing.description.clone(),
        }
    }
}

fn round_salary(monthly: f64) -> i64 {
    if monthly.is_finite() {
        monthly.round() as i64
    } else {
        0
    }
}
