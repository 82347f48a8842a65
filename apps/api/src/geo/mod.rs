//! Geographic reference data — US state display names and centroids.
//!
//! The built-in table covers the 50 states. At startup it can be replaced by
//! a remote GeoJSON feature collection whose feature ids are joined against
//! the centroid table; features without a known centroid are skipped.

pub mod aggregate;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::source::{fetch_bytes, SourceError};

/// (abbreviation, display name, latitude, longitude)
const STATE_CENTERS: &[(&str, &str, f64, f64)] = &[
    ("AL", "Alabama", 32.806671, -86.791130),
    ("AK", "Alaska", 61.370716, -152.404419),
    ("AZ", "Arizona", 33.729759, -111.431221),
    ("AR", "Arkansas", 34.969704, -92.373123),
    ("CA", "California", 36.116203, -119.681564),
    ("CO", "Colorado", 39.059811, -105.311104),
    ("CT", "Connecticut", 41.597782, -72.755371),
    ("DE", "Delaware", 39.318523, -75.507141),
    ("FL", "Florida", 27.766279, -81.686783),
    ("GA", "Georgia", 33.040619, -83.643074),
    ("HI", "Hawaii", 21.094318, -157.498337),
    ("ID", "Idaho", 44.240459, -114.478828),
    ("IL", "Illinois", 40.349457, -88.986137),
    ("IN", "Indiana", 39.849426, -86.258278),
    ("IA", "Iowa", 42.011539, -93.210526),
    ("KS", "Kansas", 38.526600, -96.726486),
    ("KY", "Kentucky", 37.668140, -84.670067),
    ("LA", "Louisiana", 31.169546, -91.867805),
    ("ME", "Maine", 44.693947, -69.381927),
    ("MD", "Maryland", 39.063946, -76.802101),
    ("MA", "Massachusetts", 42.230171, -71.530106),
    ("MI", "Michigan", 43.326618, -84.536095),
    ("MN", "Minnesota", 45.694454, -93.900192),
    ("MS", "Mississippi", 32.741646, -89.678696),
    ("MO", "Missouri", 38.456085, -92.288368),
    ("MT", "Montana", 46.921925, -109.354353),
    ("NE", "Nebraska", 41.125370, -98.268082),
    ("NV", "Nevada", 38.313515, -117.055374),
    ("NH", "New Hampshire", 43.452492, -71.563896),
    ("NJ", "New Jersey", 40.298904, -74.521011),
    ("NM", "New Mexico", 34.840515, -106.248482),
    ("NY", "New York", 42.165726, -74.948051),
    ("NC", "North Carolina", 35.630066, -79.806419),
    ("ND", "North Dakota", 47.528912, -99.784012),
    ("OH", "Ohio", 40.388783, -82.764915),
    ("OK", "Oklahoma", 35.565342, -96.928917),
    ("OR", "Oregon", 44.572021, -122.070938),
    ("PA", "Pennsylvania", 40.590752, -77.209755),
    ("RI", "Rhode Island", 41.680893, -71.511780),
    ("SC", "South Carolina", 33.856892, -80.945007),
    ("SD", "South Dakota", 44.299782, -99.438828),
    ("TN", "Tennessee", 35.747845, -86.692345),
    ("TX", "Texas", 31.054487, -97.563461),
    ("UT", "Utah", 40.150032, -111.862434),
    ("VT", "Vermont", 44.045876, -72.710686),
    ("VA", "Virginia", 37.769337, -78.169968),
    ("WA", "Washington", 47.400902, -121.490494),
    ("WV", "West Virginia", 38.491226, -80.954456),
    ("WI", "Wisconsin", 44.268543, -89.616508),
    ("WY", "Wyoming", 42.755966, -107.302490),
];

static CENTROIDS: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    STATE_CENTERS
        .iter()
        .map(|(id, _, lat, lon)| (*id, (*lat, *lon)))
        .collect()
});

static BUILTIN: LazyLock<StateGeoTable> = LazyLock::new(|| StateGeoTable {
    states: STATE_CENTERS
        .iter()
        .map(|(id, name, lat, lon)| StateGeo {
            id: id.to_string(),
            name: name.to_string(),
            lat: *lat,
            lon: *lon,
        })
        .collect(),
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateGeo {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateGeoTable {
    states: Vec<StateGeo>,
}

impl StateGeoTable {
    /// The 50-state table compiled into the binary.
    pub fn builtin() -> &'static StateGeoTable {
        &BUILTIN
    }

    pub fn states(&self) -> &[StateGeo] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Joins GeoJSON features (id + `properties.name`) with the centroid table,
    /// keeping feature order.
    pub fn from_feature_collection(collection: &FeatureCollection) -> Self {
        let states = collection
            .features
            .iter()
            .filter_map(|feature| {
                let id = feature.id.as_deref()?.trim().to_uppercase();
                let Some(&(lat, lon)) = CENTROIDS.get(id.as_str()) else {
                    warn!("Skipping geo feature '{id}': no centroid for this state id");
                    return None;
                };
                let name = feature
                    .properties
                    .name
                    .clone()
                    .unwrap_or_else(|| id.clone());
                Some(StateGeo { id, name, lat, lon })
            })
            .collect();
        Self { states }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub name: Option<String>,
}

/// Fetches the GeoJSON at `location` and builds the state table from it.
/// A collection with no recognised state ids is an error.
pub async fn fetch_state_table(
    client: &reqwest::Client,
    location: &str,
) -> Result<StateGeoTable, SourceError> {
    let bytes = fetch_bytes(client, location).await?;
    let collection: FeatureCollection = serde_json::from_slice(&bytes)?;
    let table = StateGeoTable::from_feature_collection(&collection);
    if table.is_empty() {
        return Err(SourceError::NoStates(location.to_string()));
    }
    info!("Loaded {} states from {location}", table.len());
    Ok(table)
}
