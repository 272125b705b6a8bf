//! Aggregate wealth time series and batch merging.
//!
//! - [`series_model`] - `SeriesPoint`, `HistoricalSeries`
//! - [`merge_service`] - aggregation over the store and the daily merge

pub mod merge_service;
pub mod series_model;


pub use merge_service::{aggregate, merge_batch, MergeOutcome, SinceLastUpdate};
pub use series_model::{HistoricalSeries, SeriesPoint};
