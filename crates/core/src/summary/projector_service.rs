//! Summary projection and payload assembly.

use log::{info, warn};
use rust_decimal::prelude::ToPrimitive;

use crate::constants::TREND_LINE_POINTS;
use crate::errors::{Result, ValidationError};
use crate::growth::{fit_exponential, trend_line, FitParameters};
use crate::inflation::{adjust_series, InflationIndexSeries};
use crate::series::HistoricalSeries;
use crate::summary::summary_model::{
    DashboardPayload, Equivalency, EquivalencyBenchmarks, RunDelta, Summary, ViewData, ViewMode,
};

/// Projects the display summary from a series (in trillions) and its fit.
///
/// Pure function of its inputs; nothing is mutated. When a prior run's
/// series is supplied, the delta since that run is included.
pub fn project(
    series: &HistoricalSeries,
    fit: &FitParameters,
    prior: Option<&HistoricalSeries>,
) -> Result<Summary> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(
                ValidationError::InvalidInput("cannot summarize an empty series".into()).into(),
            )
        }
    };

    let start_value = first.total_worth.to_f64().unwrap_or(0.0);
    let end_value = last.total_worth.to_f64().unwrap_or(0.0);
    let timespan_days = series.span_days();

    let total_increase_pct = if start_value != 0.0 {
        (end_value - start_value) / start_value * 100.0
    } else {
        0.0
    };

    let average_worth_billions = if last.entity_count > 0 {
        end_value * 1_000.0 / last.entity_count as f64
    } else {
        0.0
    };

    let daily_accumulation_billions = if timespan_days > 0 && end_value > start_value {
        (end_value - start_value) * 1_000.0 / timespan_days as f64
    } else {
        0.0
    };

    let since_last_update = prior.and_then(|p| p.last()).map(|prev| RunDelta {
        previous_date: prev.date,
        total_worth_change: end_value - prev.total_worth.to_f64().unwrap_or(0.0),
        entity_count_change: last.entity_count as i64 - prev.entity_count as i64,
    });

    Ok(Summary {
        period_start: first.date,
        period_end: last.date,
        timespan_days,
        data_points: series.len(),
        start_value,
        end_value,
        total_increase_pct,
        entity_count: last.entity_count,
        average_worth_billions,
        annual_growth_rate_pct: fit.annual_growth_rate_pct,
        doubling_time_years: fit.doubling_time_years,
        daily_accumulation_billions,
        since_last_update,
    })
}

/// Assembles the complete renderer payload from the aggregate series
/// (in millions, as produced by aggregation).
///
/// The nominal view is always present. When an index series is supplied,
/// the inflation-adjusted view re-expresses the series at the latest
/// snapshot date's purchasing power and re-runs the fit on the adjusted
/// series; an index that does not cover the data propagates
/// `InflationError::IndexCoverage` and the caller decides whether a
/// nominal-only payload is acceptable.
pub fn build_dashboard_payload(
    series_millions: &HistoricalSeries,
    index: Option<&InflationIndexSeries>,
    prior_millions: Option<&HistoricalSeries>,
    benchmarks: &EquivalencyBenchmarks,
) -> Result<DashboardPayload> {
    let series = series_millions.in_trillions();
    let prior = prior_millions.map(HistoricalSeries::in_trillions);

    let nominal = build_view(ViewMode::Nominal, &series, prior.as_ref())?;
    let last_updated = nominal.summary.period_end;

    let inflation_adjusted = match index {
        Some(index) => {
            let adjusted = adjust_series(&series, index, last_updated)?;
            info!(
                "Inflation-adjusted growth rate vs nominal: computing from {} adjusted points",
                adjusted.len()
            );
            // Deltas compare nominal baselines only; mixing deflated and
            // nominal dollars would make the difference meaningless.
            Some(build_view(ViewMode::InflationAdjusted, &adjusted, None)?)
        }
        None => {
            warn!("No inflation index supplied; payload is nominal-only");
            None
        }
    };

    let equivalencies = equivalencies(nominal.summary.end_value, benchmarks);

    Ok(DashboardPayload {
        last_updated,
        nominal,
        inflation_adjusted,
        equivalencies,
    })
}

fn build_view(
    mode: ViewMode,
    series: &HistoricalSeries,
    prior: Option<&HistoricalSeries>,
) -> Result<ViewData> {
    let fit = fit_exponential(series)?;
    let summary = project(series, &fit, prior)?;
    Ok(ViewData {
        mode,
        series: series.points().to_vec(),
        trend_line: trend_line(&fit, series, TREND_LINE_POINTS),
        fit_params: fit,
        summary,
    })
}

/// Expresses a total (in trillions) as multiples of everyday benchmarks.
fn equivalencies(total_trillions: f64, benchmarks: &EquivalencyBenchmarks) -> Vec<Equivalency> {
    let total_dollars = total_trillions * 1e12;
    let comparisons = [
        (
            "Median US Households",
            &benchmarks.median_household_income,
            "Annual household income",
        ),
        (
            "Median Workers",
            &benchmarks.median_worker_annual,
            "Annual salaries",
        ),
        (
            "Average US Workers",
            &benchmarks.median_lifetime_earnings,
            "Lifetime careers",
        ),
    ];

    comparisons
        .into_iter()
        .map(|(comparison, benchmark, context)| Equivalency {
            comparison: comparison.to_string(),
            value_millions: total_dollars / benchmark.to_f64().unwrap_or(f64::INFINITY) / 1e6,
            context: context.to_string(),
        })
        .collect()
}
