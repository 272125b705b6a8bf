//! In-memory columnar snapshot store.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dictionary::DictionarySet;
use crate::errors::Result;
use crate::records::WealthRecord;
use crate::store::column_batch::ColumnBatch;
use crate::store::store_errors::StoreError;

/// Outcome of a batch append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResult {
    /// Records written to the store.
    pub appended: usize,
    /// Same-batch duplicates collapsed by last-wins before writing.
    pub skipped: usize,
}

/// Owner of the historical wealth records.
///
/// One [`ColumnBatch`] per snapshot date, ordered by date, plus the
/// categorical dictionaries shared by all batches. All derived views
/// (series, fits, summaries) are recomputed from this store on demand.
#[derive(Debug, Clone, Default)]
pub struct ColumnarStore {
    dictionaries: DictionarySet,
    batches: BTreeMap<NaiveDate, ColumnBatch>,
}

impl ColumnarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted parts, verifying integrity up front.
    pub fn from_parts(
        dictionaries: DictionarySet,
        batches: BTreeMap<NaiveDate, ColumnBatch>,
    ) -> Result<Self> {
        let store = Self {
            dictionaries,
            batches,
        };
        store.verify_integrity()?;
        Ok(store)
    }

    /// Appends one date's records.
    ///
    /// Records are validated first; any failure leaves the store untouched,
    /// dictionaries included. Same-batch duplicates by entity id collapse
    /// last-wins. A date that already has records is reported as
    /// [`StoreError::DuplicateDate`] so the merger can decide whether the
    /// batch is a correction.
    pub fn append(&mut self, records: &[WealthRecord], date: NaiveDate) -> Result<AppendResult> {
        if self.batches.contains_key(&date) {
            return Err(StoreError::DuplicateDate(date).into());
        }
        self.write_batch(records, date)
    }

    /// Replaces the records for a date that is already present (or not).
    ///
    /// Used by the merger for correction batches: the previous rows for
    /// `date` are dropped from the store and from all later aggregation.
    pub fn supersede(&mut self, records: &[WealthRecord], date: NaiveDate) -> Result<AppendResult> {
        self.write_batch(records, date)
    }

    fn write_batch(&mut self, records: &[WealthRecord], date: NaiveDate) -> Result<AppendResult> {
        for record in records {
            record.validate(date)?;
        }

        let deduplicated = dedup_last_wins(records);
        let skipped = records.len() - deduplicated.len();

        // Build the complete batch before touching the map, so a failure
        // publishes nothing and column lengths can never diverge.
        let batch = ColumnBatch::encode(date, &deduplicated, &mut self.dictionaries);
        batch.check_integrity()?;

        let appended = batch.row_count();
        self.batches.insert(date, batch);

        Ok(AppendResult { appended, skipped })
    }

    /// Reconstructs records in storage order: dates ascending, append order
    /// within each date. Bounds are inclusive; `None` leaves a side open.
    pub fn read_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<WealthRecord>> {
        let mut records = Vec::new();
        for batch in self.batches_in_range(start, end) {
            records.extend(batch.decode(&self.dictionaries)?);
        }
        Ok(records)
    }

    /// Reconstructs one date's records.
    pub fn read_date(&self, date: NaiveDate) -> Result<Vec<WealthRecord>> {
        match self.batches.get(&date) {
            Some(batch) => Ok(batch.decode(&self.dictionaries)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn batches_in_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> impl Iterator<Item = &ColumnBatch> {
        self.batches
            .iter()
            .filter(move |(date, _)| start.map_or(true, |s| **date >= s))
            .filter(move |(date, _)| end.map_or(true, |e| **date <= e))
            .map(|(_, batch)| batch)
    }

    pub fn batches(&self) -> impl Iterator<Item = &ColumnBatch> {
        self.batches.values()
    }

    pub fn batch(&self, date: NaiveDate) -> Option<&ColumnBatch> {
        self.batches.get(&date)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.batches.contains_key(&date)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.batches.keys().copied().collect()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.batches.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total record count across all dates.
    pub fn record_count(&self) -> usize {
        self.batches.values().map(ColumnBatch::row_count).sum()
    }

    pub fn dictionaries(&self) -> &DictionarySet {
        &self.dictionaries
    }

    /// Checks every batch's column invariants and that every stored code is
    /// decodable against the current dictionaries. Any violation is fatal
    /// corruption: it implies prior data loss and must never be patched over.
    pub fn verify_integrity(&self) -> Result<()> {
        use crate::dictionary::Field;

        for batch in self.batches.values() {
            batch.check_integrity()?;

            let check = |field: Field, code: u32| -> Result<()> {
                self.dictionaries
                    .decode(field, code)
                    .map(|_| ())
                    .map_err(|e| StoreError::Corruption(e.to_string()).into())
            };
            for &code in &batch.currency_codes {
                check(Field::Currency, code)?;
            }
            for code in batch.industry_codes.iter().flatten() {
                check(Field::Industry, *code)?;
            }
            for code in batch.exchange_codes.iter().flatten() {
                check(Field::Exchange, *code)?;
            }
            for &code in &batch.asset_company_codes {
                check(Field::Company, code)?;
            }
        }
        Ok(())
    }
}

/// Collapses same-batch duplicates by entity id, keeping the last record's
/// data at the first occurrence's position.
fn dedup_last_wins(records: &[WealthRecord]) -> Vec<WealthRecord> {
    let mut by_entity: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut out: Vec<WealthRecord> = Vec::with_capacity(records.len());
    for record in records {
        match by_entity.get(record.entity_id.as_str()) {
            Some(&slot) => out[slot] = record.clone(),
            None => {
                by_entity.insert(record.entity_id.as_str(), out.len());
                out.push(record.clone());
            }
        }
    }
    out
}
