//! Summary and payload models.
//!
//! Everything here is a plain data payload for the presentation layer:
//! numbers in, JSON out. Wealth figures are in trillions of dollars unless
//! a field name says otherwise.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::growth::{FitParameters, TrendPoint};
use crate::series::SeriesPoint;

/// Which view of the data a payload block describes.
///
/// The renderer switches between views by key; there is no ambient
/// chart-mode state anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    Nominal,
    InflationAdjusted,
}

/// Change since a prior run's series, for "+X since last update" display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDelta {
    pub previous_date: NaiveDate,
    /// Trillions.
    pub total_worth_change: f64,
    pub entity_count_change: i64,
}

/// The projected numbers the dashboard displays for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub timespan_days: i64,
    pub data_points: usize,
    /// Trillions at the first point.
    pub start_value: f64,
    /// Trillions at the latest point.
    pub end_value: f64,
    /// Percent change from first point to last.
    pub total_increase_pct: f64,
    /// Entity count at the latest point.
    pub entity_count: usize,
    /// Mean wealth per entity at the latest point, in billions.
    pub average_worth_billions: f64,
    /// Annualized rate from the fitted model, in percent.
    pub annual_growth_rate_pct: f64,
    pub doubling_time_years: f64,
    /// Billions of dollars added per day over the observed window; 0 when
    /// the window shrank.
    pub daily_accumulation_billions: f64,
    pub since_last_update: Option<RunDelta>,
}

/// One view's complete block: the series, its fitted trend, and the
/// projected summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    pub mode: ViewMode,
    /// Aggregate points in trillions.
    pub series: Vec<SeriesPoint>,
    pub trend_line: Vec<TrendPoint>,
    pub fit_params: FitParameters,
    pub summary: Summary,
}

/// Benchmark figures used to translate an abstract total into lived scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalencyBenchmarks {
    /// Annual median US household income, in dollars.
    pub median_household_income: Decimal,
    /// Annual median US worker earnings, in dollars.
    pub median_worker_annual: Decimal,
    /// Median lifetime earnings of a US worker, in dollars.
    pub median_lifetime_earnings: Decimal,
}

impl Default for EquivalencyBenchmarks {
    fn default() -> Self {
        Self {
            median_household_income: dec!(80_610),
            median_worker_annual: dec!(59_540),
            median_lifetime_earnings: dec!(1_420_000),
        }
    }
}

/// One wealth equivalency line ("equal to N million of ...").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalency {
    pub comparison: String,
    /// How many millions of the benchmark unit the latest total equals.
    pub value_millions: f64,
    pub context: String,
}

/// The full payload handed to the presentation layer.
///
/// Both views are precomputed and keyed so the renderer can flip between
/// them without recomputation. `inflation_adjusted` is absent when no index
/// series was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub last_updated: NaiveDate,
    pub nominal: ViewData,
    pub inflation_adjusted: Option<ViewData>,
    pub equivalencies: Vec<Equivalency>,
}
