//! Snapshot record domain models.
//!
//! - [`records_model`] - `WealthRecord`, `FinancialAsset`, and validation

pub mod records_model;


pub use records_model::{partition_valid, FinancialAsset, WealthRecord};
