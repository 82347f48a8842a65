//! Data Loader — fetches the listings spreadsheet once at startup.
//!
//! `http(s)://` locations go through reqwest; anything else is read from
//! disk. The file extension picks the parser (`.xlsx` or `.csv`). Network,
//! I/O and schema failures are hard errors with no retry.

pub mod table;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::listing::Dataset;
use table::Table;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetching {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("No known states in {0}")]
    NoStates(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    /// Picks the format from the path extension, ignoring any query string.
    pub fn from_location(location: &str) -> Result<Self, SourceError> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();
        if path.ends_with(".xlsx") {
            Ok(SourceFormat::Xlsx)
        } else if path.ends_with(".csv") {
            Ok(SourceFormat::Csv)
        } else {
            Err(SourceError::UnsupportedFormat(location.to_string()))
        }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads the raw bytes behind `location`, over HTTP or from disk.
pub async fn fetch_bytes(client: &reqwest::Client, location: &str) -> Result<Bytes, SourceError> {
    if !is_remote(location) {
        debug!("Reading {location} from disk");
        let data = tokio::fs::read(location)
            .await
            .map_err(|source| SourceError::Io {
                path: location.to_string(),
                source,
            })?;
        return Ok(Bytes::from(data));
    }

    debug!("Fetching {location}");
    let response = client.get(location).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: location.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?)
}

/// Fetches and parses the listings. Text columns are left raw for the normalizer.
pub async fn load_dataset(
    client: &reqwest::Client,
    location: &str,
) -> Result<Dataset, SourceError> {
    let format = SourceFormat::from_location(location)?;
    let bytes = fetch_bytes(client, location).await?;

    let table = match format {
        SourceFormat::Csv => Table::from_csv(&bytes)?,
        SourceFormat::Xlsx => Table::from_xlsx(&bytes)?,
    };
    let listings = table.into_listings()?;

    info!("Loaded {} listings from {location}", listings.len());
    Ok(Dataset::new(listings, location))
}
