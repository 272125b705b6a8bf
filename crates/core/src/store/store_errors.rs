use chrono::NaiveDate;
use thiserror::Error;

use crate::store::persist::STORE_FORMAT_VERSION;

/// Errors raised by the columnar store and its persisted layout.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A batch was appended for a date that already has records.
    ///
    /// Informational: the merger consumes this and supersedes instead.
    #[error("Store already holds records for {0}")]
    DuplicateDate(NaiveDate),

    /// Column lengths or dictionary references are inconsistent.
    ///
    /// Fatal. This implies prior data loss; the run must abort rather than
    /// return inconsistent data.
    #[error("Store corruption: {0}")]
    Corruption(String),

    /// The persisted manifest was written by an incompatible format version.
    #[error("Unsupported store format version {found} (supported: {supported})", supported = STORE_FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
