//! Growth fit models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fit errors.
#[derive(Error, Debug)]
pub enum FitError {
    /// A fit needs at least two points; none is attempted below that.
    #[error("Cannot fit a growth model to {points} point(s); at least 2 required")]
    InsufficientData { points: usize },
}

/// Parameters of the fitted model `wealth(t) = a * exp(b * t)` with `t` in
/// years from the series' first date.
///
/// Recomputed whenever the series changes; never persisted as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitParameters {
    /// Base value `a`, in the series' unit.
    pub base_value: f64,
    /// Continuous growth rate `b` per year.
    pub rate_constant: f64,
    /// Annualized growth rate `(e^b - 1) * 100`, in percent.
    pub annual_growth_rate_pct: f64,
    /// Years for the series to double at the annualized rate; infinite when
    /// the growth rate is not positive.
    pub doubling_time_years: f64,
    /// Coefficient of determination against the same data. At most 1 for a
    /// sane fit; reported uncapped below (negative means the model explains
    /// less than the mean).
    pub r_squared: f64,
}

impl FitParameters {
    /// Builds the derived metrics from the raw fit outputs.
    pub fn derive(base_value: f64, rate_constant: f64, r_squared: f64) -> Self {
        let annual_growth_rate_pct = (rate_constant.exp() - 1.0) * 100.0;
        let doubling_time_years = if annual_growth_rate_pct > 0.0 {
            std::f64::consts::LN_2 / (1.0 + annual_growth_rate_pct / 100.0).ln()
        } else {
            f64::INFINITY
        };
        Self {
            base_value,
            rate_constant,
            annual_growth_rate_pct,
            doubling_time_years,
            r_squared,
        }
    }

    /// Model value at `t` years from the series start.
    pub fn value_at(&self, t_years: f64) -> f64 {
        self.base_value * (self.rate_constant * t_years).exp()
    }
}

/// One sampled point on a rendered trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}
