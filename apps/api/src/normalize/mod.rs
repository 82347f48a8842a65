//! Text Normalizer — cleans titles, descriptions and job-type labels in place.
//!
//! Runs once after loading. Missing values are already neutral (empty
//! strings) by then, so nothing here can fail.

pub mod description;
pub mod labels;
pub mod lemmatizer;
pub mod stopwords;
pub mod title;

use tracing::info;

use crate::models::listing::{Dataset, Listing};

pub use description::normalize_description;
pub use labels::normalize_job_type;
pub use title::normalize_title;

pub fn normalize_listing(listing: &mut Listing) {
    listing.title = normalize_title(&listing.title);
    listing.description = normalize_description(Some(&listing.description));
    listing.job_type = normalize_job_type(&listing.job_type);
}

pub fn normalize_dataset(dataset: &mut Dataset) {
    dataset.listings.iter_mut().for_each(normalize_listing);
    info!("Normalized {} listings", dataset.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_listing_rewrites_text_columns_only() {
        let mut listing = Listing {
            id: Some(7),
            title: "$30/hr | Data Scientist (Remote)".to_string(),
            description: "Build MODELS with Python.\nDeploy models!".to_string(),
            state_name: "Texas".to_string(),
            job_type: "full-time".to_string(),
            experience_level: "Mid-Senior level".to_string(),
            salary_min: 5000.0,
            ..Default::default()
        };

        normalize_listing(&mut listing);

        assert_eq!(listing.title, "DATA SCIENTIST");
        assert_eq!(listing.description, "build model python deploy");
        assert_eq!(listing.job_type, "Full Time");
        assert_eq!(listing.state_name, "Texas");
        assert_eq!(listing.experience_level, "Mid-Senior level");
        assert_eq!(listing.id, Some(7));
    }

    #[test]
    fn test_normalize_dataset_visits_every_listing() {
        let mut dataset = Dataset::new(
            vec![
                Listing {
                    title: "analyst".to_string(),
                    ..Default::default()
                },
                Listing {
                    title: "engineer in Boston".to_string(),
                    ..Default::default()
                },
            ],
            "memory",
        );

        normalize_dataset(&mut dataset);

        let titles: Vec<_> = dataset.listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["ANALYST", "ENGINEER"]);
    }
}
