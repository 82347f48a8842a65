//! Filter Engine — progressive-fallback categorical filtering.
//!
//! Filters run as a fixed sequence of stages (Title → Location → JobType →
//! Experience). Each stage narrows the set produced by the previous one with a
//! case-insensitive substring test. Title always applies. Any later stage
//! whose narrowed set would be empty is skipped: the wider set is kept and a
//! `FilterNotice` records the miss for the caller to display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::listing::Listing;

/// Selector value meaning "do not filter on this column".
pub const ALL: &str = "ALL";

fn all() -> String {
    ALL.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    Title,
    Location,
    JobType,
    Experience,
}

impl FilterStage {
    fn next(self) -> Option<Self> {
        match self {
            FilterStage::Title => Some(FilterStage::Location),
            FilterStage::Location => Some(FilterStage::JobType),
            FilterStage::JobType => Some(FilterStage::Experience),
            FilterStage::Experience => None,
        }
    }

    /// Title must always narrow; the other stages may fall back.
    fn can_fall_back(self) -> bool {
        self != FilterStage::Title
    }

    fn column(self, listing: &Listing) -> &str {
        match self {
            FilterStage::Title => &listing.title,
            FilterStage::Location => &listing.state_name,
            FilterStage::JobType => &listing.job_type,
            FilterStage::Experience => &listing.experience_level,
        }
    }
}

/// The four selector values for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub title: String,
    #[serde(default = "all")]
    pub location: String,
    #[serde(default = "all")]
    pub job_type: String,
    #[serde(default = "all")]
    pub experience: String,
}

impl FilterSelection {
    /// Title-only selection; every other selector is `ALL`.
    pub fn for_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: all(),
            job_type: all(),
            experience: all(),
        }
    }

    fn value(&self, stage: FilterStage) -> &str {
        match stage {
            FilterStage::Title => &self.title,
            FilterStage::Location => &self.location,
            FilterStage::JobType => &self.job_type,
            FilterStage::Experience => &self.experience,
        }
    }
}

/// Non-blocking "no results, showing broader set" signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterNotice {
    pub stage: FilterStage,
    pub selection: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    /// Matching listings in dataset order.
    pub listings: Vec<&'a Listing>,
    pub notices: Vec<FilterNotice>,
}

/// Applies the selection to `listings` stage by stage.
pub fn apply_filters<'a>(listings: &'a [Listing], selection: &FilterSelection) -> FilterOutcome<'a> {
    let mut working: Vec<&Listing> = listings.iter().collect();
    let mut notices = Vec::new();
    let mut stage = Some(FilterStage::Title);

    while let Some(current) = stage {
        stage = current.next();

        let needle = selection.value(current);
        if current.can_fall_back() && needle.eq_ignore_ascii_case(ALL) {
            continue;
        }

        let needle = needle.to_lowercase();
        let narrowed: Vec<&Listing> = working
            .iter()
            .copied()
            .filter(|listing| current.column(listing).to_lowercase().contains(&needle))
            .collect();

        if narrowed.is_empty() && current.can_fall_back() {
            debug!(
                "{current:?} filter '{}' matched nothing; keeping {} listings",
                selection.value(current),
                working.len()
            );
            notices.push(FilterNotice {
                stage: current,
                selection: selection.value(current).to_string(),
                message: format!(
                    "No {} listings found for {}. Showing listings you may be looking for instead.",
                    selection.title,
                    selection.value(current)
                ),
            });
        } else {
            working = narrowed;
        }
    }

    FilterOutcome {
        listings: working,
        notices,
    }
}
