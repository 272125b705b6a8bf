//! Struct-of-arrays layout for one snapshot date.
//!
//! Record-level fields become one column each. The variable-length asset
//! lists decompose into parallel `asset_*` columns addressed through
//! `asset_offsets`, which has `rows + 1` entries: record `i` owns asset
//! entries `asset_offsets[i]..asset_offsets[i + 1]`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dictionary::{DictionarySet, Field};
use crate::records::{FinancialAsset, WealthRecord};
use crate::store::store_errors::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBatch {
    pub snapshot_date: NaiveDate,

    // Record columns, all of equal length.
    pub entity_ids: Vec<String>,
    pub names: Vec<String>,
    pub net_worths: Vec<Decimal>,
    pub currency_codes: Vec<u32>,
    pub industry_codes: Vec<Option<u32>>,
    pub exchange_codes: Vec<Option<u32>>,

    // Asset columns. `asset_offsets.len() == rows + 1`; the other three are
    // of equal length `asset_offsets[rows]`.
    pub asset_offsets: Vec<usize>,
    pub asset_company_codes: Vec<u32>,
    pub asset_shares: Vec<Decimal>,
    pub asset_prices: Vec<Decimal>,
}

impl ColumnBatch {
    pub fn empty(snapshot_date: NaiveDate) -> Self {
        Self {
            snapshot_date,
            entity_ids: Vec::new(),
            names: Vec::new(),
            net_worths: Vec::new(),
            currency_codes: Vec::new(),
            industry_codes: Vec::new(),
            exchange_codes: Vec::new(),
            asset_offsets: vec![0],
            asset_company_codes: Vec::new(),
            asset_shares: Vec::new(),
            asset_prices: Vec::new(),
        }
    }

    /// Encodes pre-validated, pre-deduplicated records into columns,
    /// growing the dictionaries as new categorical values appear.
    pub fn encode(
        snapshot_date: NaiveDate,
        records: &[WealthRecord],
        dictionaries: &mut DictionarySet,
    ) -> Self {
        let mut batch = Self::empty(snapshot_date);
        batch.entity_ids.reserve(records.len());

        for record in records {
            batch.entity_ids.push(record.entity_id.clone());
            batch.names.push(record.name.clone());
            batch.net_worths.push(record.net_worth);
            batch
                .currency_codes
                .push(dictionaries.encode(Field::Currency, &record.currency));
            batch.industry_codes.push(
                record
                    .industry
                    .as_deref()
                    .map(|v| dictionaries.encode(Field::Industry, v)),
            );
            batch.exchange_codes.push(
                record
                    .exchange
                    .as_deref()
                    .map(|v| dictionaries.encode(Field::Exchange, v)),
            );

            for asset in &record.financial_assets {
                batch
                    .asset_company_codes
                    .push(dictionaries.encode(Field::Company, &asset.company));
                batch.asset_shares.push(asset.shares);
                batch.asset_prices.push(asset.share_price);
            }
            batch.asset_offsets.push(batch.asset_company_codes.len());
        }

        batch
    }

    /// Reconstructs the records by reversing the decomposition and decoding
    /// every categorical code. Output is in storage (append) order.
    pub fn decode(&self, dictionaries: &DictionarySet) -> Result<Vec<WealthRecord>, StoreError> {
        self.check_integrity()?;

        let decode = |field: Field, code: u32| {
            dictionaries
                .decode(field, code)
                .map(str::to_string)
                .map_err(|e| StoreError::Corruption(e.to_string()))
        };

        let mut records = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let mut financial_assets = Vec::new();
            for i in self.asset_offsets[row]..self.asset_offsets[row + 1] {
                financial_assets.push(FinancialAsset {
                    company: decode(Field::Company, self.asset_company_codes[i])?,
                    shares: self.asset_shares[i],
                    share_price: self.asset_prices[i],
                });
            }

            records.push(WealthRecord {
                entity_id: self.entity_ids[row].clone(),
                name: self.names[row].clone(),
                net_worth: self.net_worths[row],
                currency: decode(Field::Currency, self.currency_codes[row])?,
                industry: self.industry_codes[row]
                    .map(|c| decode(Field::Industry, c))
                    .transpose()?,
                exchange: self.exchange_codes[row]
                    .map(|c| decode(Field::Exchange, c))
                    .transpose()?,
                snapshot_date: self.snapshot_date,
                financial_assets,
            });
        }
        Ok(records)
    }

    pub fn row_count(&self) -> usize {
        self.entity_ids.len()
    }

    pub fn asset_count(&self) -> usize {
        self.asset_company_codes.len()
    }

    /// Verifies column-length and offset invariants.
    ///
    /// Any violation means the batch can no longer be trusted to describe
    /// the records it was built from.
    pub fn check_integrity(&self) -> Result<(), StoreError> {
        let rows = self.entity_ids.len();
        let record_columns = [
            ("names", self.names.len()),
            ("netWorths", self.net_worths.len()),
            ("currencyCodes", self.currency_codes.len()),
            ("industryCodes", self.industry_codes.len()),
            ("exchangeCodes", self.exchange_codes.len()),
        ];
        for (name, len) in record_columns {
            if len != rows {
                return Err(StoreError::Corruption(format!(
                    "column '{}' has {} entries, expected {} ({})",
                    name, len, rows, self.snapshot_date
                )));
            }
        }

        if self.asset_offsets.len() != rows + 1 {
            return Err(StoreError::Corruption(format!(
                "offset column has {} entries, expected {} ({})",
                self.asset_offsets.len(),
                rows + 1,
                self.snapshot_date
            )));
        }
        if self.asset_offsets[0] != 0 {
            return Err(StoreError::Corruption(format!(
                "offset column does not start at 0 ({})",
                self.snapshot_date
            )));
        }
        if self.asset_offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(StoreError::Corruption(format!(
                "offset column is not monotonic ({})",
                self.snapshot_date
            )));
        }

        let assets = *self.asset_offsets.last().unwrap_or(&0);
        let asset_columns = [
            ("assetCompanyCodes", self.asset_company_codes.len()),
            ("assetShares", self.asset_shares.len()),
            ("assetPrices", self.asset_prices.len()),
        ];
        for (name, len) in asset_columns {
            if len != assets {
                return Err(StoreError::Corruption(format!(
                    "column '{}' has {} entries, expected {} ({})",
                    name, len, assets, self.snapshot_date
                )));
            }
        }

        Ok(())
    }
}
