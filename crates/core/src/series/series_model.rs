//! Aggregate series models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MILLIONS_PER_TRILLION;

/// One aggregate point: everything known for one snapshot date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Sum of net worth over active records for the date, in millions.
    pub total_worth: Decimal,
    /// Number of active records for the date.
    pub entity_count: usize,
}

/// Date-ordered aggregate series derived from the columnar store.
///
/// Dates are strictly increasing; gaps are valid (the source list updates
/// irregularly). The series is a derived view, never a source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalSeries {
    points: Vec<SeriesPoint>,
}

impl HistoricalSeries {
    /// Builds a series from points already ordered by strictly increasing
    /// date. Callers constructing from a date-keyed map get this for free.
    pub fn from_points(points: Vec<SeriesPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// Days between the first and last point.
    pub fn span_days(&self) -> i64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last.date - first.date).num_days(),
            _ => 0,
        }
    }

    /// The same series with totals re-expressed in trillions.
    pub fn in_trillions(&self) -> HistoricalSeries {
        HistoricalSeries {
            points: self
                .points
                .iter()
                .map(|p| SeriesPoint {
                    date: p.date,
                    total_worth: p.total_worth / MILLIONS_PER_TRILLION,
                    entity_count: p.entity_count,
                })
                .collect(),
        }
    }
}
