//! Constant-dollar adjustment of a wealth series.

use chrono::NaiveDate;
use log::debug;

use crate::inflation::index_model::{InflationError, InflationIndexSeries};
use crate::series::{HistoricalSeries, SeriesPoint};

/// Re-expresses `series` in the purchasing power of `base_date` dollars:
/// `adjusted = nominal * index(base_date) / index(point_date)`, with the
/// index value resolved by nearest-prior lookup per point.
///
/// Entity counts are untouched. Fails with
/// [`InflationError::IndexCoverage`] when any point (or the base date)
/// precedes the earliest index value. The adjusted trend line must come
/// from re-fitting the adjusted series, not from scaling the nominal fit:
/// inflation changes the shape of the curve, not just its scale.
pub fn adjust_series(
    series: &HistoricalSeries,
    index: &InflationIndexSeries,
    base_date: NaiveDate,
) -> Result<HistoricalSeries, InflationError> {
    let base = index.value_at(base_date)?;
    debug!(
        "Adjusting {} points to {} dollars (base index {})",
        series.len(),
        base_date,
        base
    );

    let mut points = Vec::with_capacity(series.len());
    for point in series.iter() {
        let at_point = index.value_at(point.date)?;
        points.push(SeriesPoint {
            date: point.date,
            total_worth: point.total_worth * base / at_point,
            entity_count: point.entity_count,
        });
    }
    Ok(HistoricalSeries::from_points(points))
}
