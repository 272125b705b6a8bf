//! Nonlinear least-squares exponential fit.
//!
//! The model is `wealth(t) = a * exp(b * t)` with `t` in years from the
//! series' first date. Residuals are minimized in the original scale, not
//! log scale, so absolute-dollar deviations carry the weight. The solver is
//! Levenberg-Marquardt over the two parameters with the analytic Jacobian,
//! seeded by a log-linear regression over the positive points.

use chrono::Duration;
use log::debug;
use rust_decimal::prelude::ToPrimitive;

use crate::constants::DAYS_PER_YEAR;
use crate::growth::growth_model::{FitError, FitParameters, TrendPoint};
use crate::series::HistoricalSeries;

const MAX_ITERATIONS: usize = 100;
const INITIAL_DAMPING: f64 = 1e-3;
const MIN_DAMPING: f64 = 1e-12;
const MAX_DAMPING: f64 = 1e12;
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Fits the exponential growth model to the series.
///
/// Fails with [`FitError::InsufficientData`] below two points. Noisy or
/// non-monotonic data is fit as-is; a poor fit shows up in `r_squared`
/// rather than as an error.
pub fn fit_exponential(series: &HistoricalSeries) -> Result<FitParameters, FitError> {
    if series.len() < 2 {
        return Err(FitError::InsufficientData {
            points: series.len(),
        });
    }

    let start = series.first().expect("non-empty series").date;
    let t: Vec<f64> = series
        .iter()
        .map(|p| (p.date - start).num_days() as f64 / DAYS_PER_YEAR)
        .collect();
    let y: Vec<f64> = series
        .iter()
        .map(|p| p.total_worth.to_f64().unwrap_or(0.0))
        .collect();

    let (mut a, mut b) = log_linear_seed(&t, &y);
    let mut sse = sum_squared_residuals(&t, &y, a, b);
    let mut lambda = INITIAL_DAMPING;

    for iteration in 0..MAX_ITERATIONS {
        // Accumulate the normal equations J'J and J'r.
        let mut jtj = [0.0f64; 3]; // [aa, ab, bb]
        let mut jtr = [0.0f64; 2];
        for (&ti, &yi) in t.iter().zip(&y) {
            let e = (b * ti).exp();
            let residual = yi - a * e;
            let ja = e;
            let jb = a * ti * e;
            jtj[0] += ja * ja;
            jtj[1] += ja * jb;
            jtj[2] += jb * jb;
            jtr[0] += ja * residual;
            jtr[1] += jb * residual;
        }

        // Marquardt damping scales the diagonal.
        let m00 = jtj[0] * (1.0 + lambda);
        let m11 = jtj[2] * (1.0 + lambda);
        let det = m00 * m11 - jtj[1] * jtj[1];
        if !det.is_finite() || det.abs() < f64::MIN_POSITIVE {
            break;
        }

        let da = (jtr[0] * m11 - jtr[1] * jtj[1]) / det;
        let db = (jtr[1] * m00 - jtr[0] * jtj[1]) / det;
        let candidate_sse = sum_squared_residuals(&t, &y, a + da, b + db);

        if candidate_sse.is_finite() && candidate_sse < sse {
            let improvement = sse - candidate_sse;
            a += da;
            b += db;
            sse = candidate_sse;
            lambda = (lambda * 0.3).max(MIN_DAMPING);
            if improvement <= sse.max(f64::MIN_POSITIVE) * RELATIVE_TOLERANCE {
                debug!("Fit converged after {} iterations", iteration + 1);
                break;
            }
        } else {
            lambda *= 10.0;
            if lambda > MAX_DAMPING {
                break;
            }
        }
    }

    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - sse / ss_tot } else { 0.0 };

    Ok(FitParameters::derive(a, b, r_squared))
}

/// Samples the fitted curve at `samples` evenly spaced dates across the
/// series' span, for the renderer's trend line.
pub fn trend_line(
    fit: &FitParameters,
    series: &HistoricalSeries,
    samples: usize,
) -> Vec<TrendPoint> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };
    let span_days = (last.date - first.date).num_days();
    let samples = samples.max(2);

    (0..samples)
        .map(|i| {
            let days = span_days as f64 * i as f64 / (samples - 1) as f64;
            TrendPoint {
                date: first.date + Duration::days(days.round() as i64),
                value: fit.value_at(days / DAYS_PER_YEAR),
            }
        })
        .collect()
}

/// Linear regression on `(t, ln y)` over the positive points.
///
/// This is the legacy estimate of the parameters; it seeds the solver and
/// is what the fit degrades to when the solver cannot improve on it. Falls
/// back to a flat line through the mean when fewer than two points are
/// usable.
fn log_linear_seed(t: &[f64], y: &[f64]) -> (f64, f64) {
    let pairs: Vec<(f64, f64)> = t
        .iter()
        .zip(y)
        .filter(|(_, &yi)| yi > 0.0)
        .map(|(&ti, &yi)| (ti, yi.ln()))
        .collect();

    if pairs.len() < 2 {
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        return (mean, 0.0);
    }

    let n = pairs.len() as f64;
    let sum_t: f64 = pairs.iter().map(|(ti, _)| ti).sum();
    let sum_ln: f64 = pairs.iter().map(|(_, ln)| ln).sum();
    let mean_t = sum_t / n;
    let mean_ln = sum_ln / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (ti, ln) in &pairs {
        cov += (ti - mean_t) * (ln - mean_ln);
        var += (ti - mean_t) * (ti - mean_t);
    }
    if var == 0.0 {
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        return (mean, 0.0);
    }

    let slope = cov / var;
    let intercept = mean_ln - slope * mean_t;
    (intercept.exp(), slope)
}

fn sum_squared_residuals(t: &[f64], y: &[f64], a: f64, b: f64) -> f64 {
    t.iter()
        .zip(y)
        .map(|(&ti, &yi)| {
            let r = yi - a * (b * ti).exp();
            r * r
        })
        .sum()
}
