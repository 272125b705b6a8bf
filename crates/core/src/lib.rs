//! Wealthwatch Core - Columnar snapshot storage and wealth time-series analytics.
//!
//! This crate contains the analytics core for the wealth tracker: the
//! dictionary-encoded columnar store for daily snapshot batches, the merge
//! logic that keeps the historical dataset deduplicated, the exponential
//! growth fit, the inflation adjustment, and the summary payload consumed
//! by the dashboard renderer.

pub mod constants;
pub mod dictionary;
pub mod errors;
pub mod growth;
pub mod inflation;
pub mod records;
pub mod series;
pub mod store;
pub mod summary;

// Re-export common types from the domain modules
pub use dictionary::{CategoricalDictionary, DictionarySet, Field};
pub use records::{FinancialAsset, WealthRecord};
pub use series::{HistoricalSeries, MergeOutcome, SeriesPoint};
pub use store::{AppendResult, ColumnarStore, FileStore};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
