use anyhow::{Context, Result};

const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/Rizkiramdani04/byte_brigade/main/cleaned_lowongan_kerja_only.xlsx";
const DEFAULT_STATE_GEO_URL: &str =
    "https://raw.githubusercontent.com/python-visualization/folium/master/examples/data/us-states.json";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// `http(s)://` URL or local path of the listings spreadsheet (.xlsx or .csv).
    pub dataset_url: String,
    /// GeoJSON feature collection with state names. `None` keeps the built-in table.
    pub state_geo_url: Option<String>,
    /// Title preselected in the dashboard when it exists in the data.
    pub default_title: String,
    pub fetch_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let state_geo_url = env_or("STATE_GEO_URL", DEFAULT_STATE_GEO_URL);

        Ok(Config {
            dataset_url: env_or("DATASET_URL", DEFAULT_DATASET_URL),
            state_geo_url: (!state_geo_url.trim().is_empty()).then_some(state_geo_url),
            default_title: env_or("DEFAULT_TITLE", "DATA SCIENTIST"),
            fetch_timeout_secs: env_or("FETCH_TIMEOUT_SECS", "60")
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
