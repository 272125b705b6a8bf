//! Inflation adjustment to constant dollars.
//!
//! - [`index_model`] - the external price-index series (e.g. monthly CPI-U)
//! - [`adjuster_service`] - re-expressing a wealth series at a base date

pub mod adjuster_service;
pub mod index_model;


pub use adjuster_service::adjust_series;
pub use index_model::{InflationError, InflationIndexSeries};
