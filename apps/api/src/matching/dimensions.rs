//! Selector options derived from the loaded listings.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::matching::filter::ALL;
use crate::models::listing::Listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionColumn {
    Title,
    Location,
    JobType,
    Experience,
}

impl DimensionColumn {
    fn value(self, listing: &Listing) -> &str {
        match self {
            DimensionColumn::Title => &listing.title,
            DimensionColumn::Location => &listing.state_name,
            DimensionColumn::JobType => &listing.job_type,
            DimensionColumn::Experience => &listing.experience_level,
        }
    }
}

/// Distinct non-empty values of `column`, uppercased and sorted, optionally
/// prefixed with `ALL`.
pub fn dimension(listings: &[Listing], column: DimensionColumn, add_all: bool) -> Vec<String> {
    let values: BTreeSet<String> = listings
        .iter()
        .map(|listing| column.value(listing).trim())
        .filter(|value| !value.is_empty())
        .map(str::to_uppercase)
        .collect();

    add_all
        .then(|| ALL.to_string())
        .into_iter()
        .chain(values)
        .collect()
}

/// All four option lists plus the preselected title.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionOptions {
    pub titles: Vec<String>,
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub experience_levels: Vec<String>,
    pub default_title: Option<String>,
}

impl DimensionOptions {
    /// `preferred_title` is used when present in the data; otherwise the first title.
    pub fn from_listings(listings: &[Listing], preferred_title: &str) -> Self {
        let titles = dimension(listings, DimensionColumn::Title, false);
        let preferred = preferred_title.trim().to_uppercase();
        let default_title = titles
            .iter()
            .find(|title| **title == preferred)
            .or_else(|| titles.first())
            .cloned();

        Self {
            locations: dimension(listings, DimensionColumn::Location, true),
            job_types: dimension(listings, DimensionColumn::JobType, true),
            experience_levels: dimension(listings, DimensionColumn::Experience, true),
            titles,
            default_title,
        }
    }
}
