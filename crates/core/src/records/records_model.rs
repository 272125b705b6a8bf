//! Wealth snapshot record models.
//!
//! A [`WealthRecord`] is one entity's valuation on one calendar date, as
//! delivered by the external fetcher. The uniqueness key for the historical
//! dataset is `(entity_id, snapshot_date)`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One financial-asset holding attached to a record.
///
/// Holdings are variable-length per record; the columnar store decomposes
/// them into parallel arrays keyed by a per-record offset range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAsset {
    /// Company name as reported by the source list.
    pub company: String,
    /// Number of shares held.
    pub shares: Decimal,
    /// Price per share in the asset's trading currency.
    pub share_price: Decimal,
}

/// One entity's valuation on one snapshot date.
///
/// * `entity_id` - stable identifier across dates (uniqueness key together
///   with `snapshot_date`)
/// * `net_worth` - valuation in millions of `currency` units
/// * `industry` / `exchange` - optional categorical attributes; dictionary
///   encoded by the store
/// * `financial_assets` - public-market holdings backing the valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthRecord {
    pub entity_id: String,
    pub name: String,
    pub net_worth: Decimal,
    pub currency: String,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub snapshot_date: NaiveDate,
    #[serde(default)]
    pub financial_assets: Vec<FinancialAsset>,
}

impl WealthRecord {
    /// Validates the record against a batch date.
    ///
    /// A record fails when its entity id or currency is empty, its net worth
    /// is negative, or its date differs from the batch date.
    pub fn validate(&self, batch_date: NaiveDate) -> Result<(), ValidationError> {
        if self.entity_id.trim().is_empty() {
            return Err(ValidationError::MissingField("entityId".to_string()));
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingField("currency".to_string()));
        }
        if self.net_worth.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "negative net worth {} for '{}'",
                self.net_worth, self.entity_id
            )));
        }
        if self.snapshot_date != batch_date {
            return Err(ValidationError::DateMismatch {
                entity_id: self.entity_id.clone(),
                expected: batch_date,
                found: self.snapshot_date,
            });
        }
        Ok(())
    }
}

/// Splits a raw batch into valid records and rejected `(record, error)` pairs.
///
/// This is the lenient boundary used by ingest: rejected records are dropped
/// (and reported by the caller) while the rest of the batch proceeds. The
/// store's own `append` stays strict.
pub fn partition_valid(
    records: Vec<WealthRecord>,
    batch_date: NaiveDate,
) -> (Vec<WealthRecord>, Vec<(WealthRecord, ValidationError)>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for record in records {
        match record.validate(batch_date) {
            Ok(()) => valid.push(record),
            Err(e) => rejected.push((record, e)),
        }
    }
    (valid, rejected)
}
