use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::geo::StateGeoTable;
use crate::models::listing::Listing;

/// One choropleth row: a reference state and how many listings it holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCount {
    pub state_id: String,
    pub state_name: String,
    pub lat: f64,
    pub lon: f64,
    pub count: u64,
}

/// Counts listings per state id and right-joins the counts onto `table`:
/// every table state appears once, in table order, with 0 when unmatched.
pub fn aggregate_by_state(listings: &[&Listing], table: &StateGeoTable) -> Vec<StateCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for listing in listings {
        *counts.entry(listing.state_id.as_str()).or_insert(0) += 1;
    }

    let rows: Vec<StateCount> = table
        .states()
        .iter()
        .map(|state| StateCount {
            state_id: state.id.clone(),
            state_name: state.name.clone(),
            lat: state.lat,
            lon: state.lon,
            count: counts.get(state.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let placed: u64 = rows.iter().map(|row| row.count).sum();
    let unplaced = (listings.len() as u64).saturating_sub(placed);
    if unplaced > 0 {
        debug!("{unplaced} listings have a state id outside the reference table");
    }

    rows
}
