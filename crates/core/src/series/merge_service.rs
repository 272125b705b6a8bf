//! Daily batch merge and series aggregation.
//!
//! The merge treats a batch for an already-seen date as a correction: the
//! new rows supersede the old ones, which drop out of all subsequent
//! aggregation. Two snapshots on the same calendar date are never both
//! counted, which makes the merge idempotent.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::records::WealthRecord;
use crate::series::series_model::{HistoricalSeries, SeriesPoint};
use crate::store::{AppendResult, ColumnarStore};

/// Change between the previous latest aggregate point and the merged one,
/// for "since last update" display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinceLastUpdate {
    pub previous_date: NaiveDate,
    pub total_worth_change: Decimal,
    pub entity_count_change: i64,
}

/// Result of merging one day's batch into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    pub result: AppendResult,
    /// True when the batch corrected an already-present date.
    pub superseded: bool,
    /// Aggregate series after the merge, in millions.
    pub series: HistoricalSeries,
    /// Delta versus the latest point strictly before the batch date.
    pub since_last_update: Option<SinceLastUpdate>,
}

/// Merges `batch` for `batch_date` into the store.
///
/// An already-present date is superseded rather than duplicated; otherwise
/// the batch is a pure append. Validation failures propagate with the store
/// unchanged.
pub fn merge_batch(
    store: &mut ColumnarStore,
    batch: &[WealthRecord],
    batch_date: NaiveDate,
) -> Result<MergeOutcome> {
    let previous = aggregate(store, None)
        .iter()
        .filter(|p| p.date < batch_date)
        .last()
        .copied();

    let superseded = store.contains_date(batch_date);
    let result = if superseded {
        warn!(
            "Records for {} already present; superseding with the new batch",
            batch_date
        );
        store.supersede(batch, batch_date)?
    } else {
        store.append(batch, batch_date)?
    };

    let series = aggregate(store, None);
    let since_last_update = previous.and_then(|prev| {
        let merged = series.iter().find(|p| p.date == batch_date)?;
        Some(SinceLastUpdate {
            previous_date: prev.date,
            total_worth_change: merged.total_worth - prev.total_worth,
            entity_count_change: merged.entity_count as i64 - prev.entity_count as i64,
        })
    });

    debug!(
        "Merged {} records for {} ({} skipped, superseded: {})",
        result.appended, batch_date, result.skipped, superseded
    );

    Ok(MergeOutcome {
        result,
        superseded,
        series,
        since_last_update,
    })
}

/// Aggregates the store into the historical series, in millions.
///
/// This is a columnar scan: totals come straight from the net-worth column
/// without reconstructing records. `min_worth` (millions) keeps only
/// records at or above the threshold, so one store serves every cohort.
pub fn aggregate(store: &ColumnarStore, min_worth: Option<Decimal>) -> HistoricalSeries {
    let mut points = Vec::new();
    for batch in store.batches() {
        let mut total = Decimal::ZERO;
        let mut count = 0usize;
        for worth in &batch.net_worths {
            if min_worth.map_or(true, |m| *worth >= m) {
                total += *worth;
                count += 1;
            }
        }
        points.push(SeriesPoint {
            date: batch.snapshot_date,
            total_worth: total,
            entity_count: count,
        });
    }
    HistoricalSeries::from_points(points)
}
