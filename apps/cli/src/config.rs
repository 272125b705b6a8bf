//! Runtime configuration from the environment.

use std::path::PathBuf;

use rust_decimal::Decimal;

/// Settings for one batch run, read from the environment (a `.env` file is
/// honored when present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the persisted columnar store.
    pub data_dir: PathBuf,
    /// Where the renderer payload is written.
    pub output_file: PathBuf,
    /// Optional CSV of (date, index value) pairs, e.g. monthly CPI-U.
    pub index_file: Option<PathBuf>,
    /// Optional cohort threshold in millions (e.g. 1000 for billionaires).
    pub min_worth_millions: Option<Decimal>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            data_dir: std::env::var("WW_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            output_file: std::env::var("WW_OUTPUT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("docs/dashboard.json")),
            index_file: std::env::var("WW_INDEX_FILE").ok().map(PathBuf::from),
            min_worth_millions: std::env::var("WW_MIN_WORTH")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}
