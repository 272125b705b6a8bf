//! Tests for the exponential fit and its derived metrics.

#[cfg(test)]
mod tests {
    use crate::growth::{fit_exponential, trend_line, FitError, FitParameters};
    use crate::series::{HistoricalSeries, SeriesPoint};
    use chrono::{Duration, NaiveDate};
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Synthetic noiseless series `y = a * exp(b * t)` sampled daily.
    fn exponential_series(a: f64, b: f64, days: i64) -> HistoricalSeries {
        let start = date(2023, 1, 1);
        let points = (0..days)
            .map(|day| {
                let t = day as f64 / 365.25;
                SeriesPoint {
                    date: start + Duration::days(day),
                    total_worth: Decimal::from_f64(a * (b * t).exp()).unwrap(),
                    entity_count: 2700,
                }
            })
            .collect();
        HistoricalSeries::from_points(points)
    }

    #[test]
    fn recovers_parameters_of_noiseless_exponential() {
        let series = exponential_series(1.0, 0.1, 731);
        let fit = fit_exponential(&series).unwrap();

        assert!((fit.base_value - 1.0).abs() < 1e-6, "a = {}", fit.base_value);
        assert!(
            (fit.rate_constant - 0.1).abs() < 1e-6,
            "b = {}",
            fit.rate_constant
        );
        assert!(fit.r_squared > 0.999_999, "r2 = {}", fit.r_squared);
    }

    #[test]
    fn single_point_is_insufficient() {
        let series = exponential_series(1.0, 0.1, 1);
        assert!(matches!(
            fit_exponential(&series),
            Err(FitError::InsufficientData { points: 1 })
        ));
    }

    #[test]
    fn empty_series_is_insufficient() {
        let series = HistoricalSeries::from_points(Vec::new());
        assert!(matches!(
            fit_exponential(&series),
            Err(FitError::InsufficientData { points: 0 })
        ));
    }

    #[test]
    fn doubling_time_at_twelve_and_a_half_percent() {
        let fit = FitParameters::derive(1.0, (1.125f64).ln(), 1.0);
        assert!((fit.annual_growth_rate_pct - 12.5).abs() < 1e-9);
        assert!(
            (fit.doubling_time_years - 5.885).abs() < 0.01,
            "doubling time = {}",
            fit.doubling_time_years
        );
    }

    #[test]
    fn two_point_series_yields_thirteen_percent_growth() {
        let series = HistoricalSeries::from_points(vec![
            SeriesPoint {
                date: date(2023, 1, 1),
                total_worth: dec!(10.0),
                entity_count: 2640,
            },
            SeriesPoint {
                date: date(2024, 1, 1),
                total_worth: dec!(11.3),
                entity_count: 2781,
            },
        ]);
        let fit = fit_exponential(&series).unwrap();

        assert!(
            (fit.annual_growth_rate_pct - 13.0).abs() < 0.1,
            "growth = {}%",
            fit.annual_growth_rate_pct
        );
        // Two points, two parameters: the fit is exact.
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn shrinking_series_reports_infinite_doubling_time() {
        let series = exponential_series(10.0, -0.05, 400);
        let fit = fit_exponential(&series).unwrap();

        assert!(fit.annual_growth_rate_pct < 0.0);
        assert!(fit.doubling_time_years.is_infinite());
    }

    #[test]
    fn flat_series_reports_infinite_doubling_time() {
        let points = (0..10)
            .map(|day| SeriesPoint {
                date: date(2023, 1, 1) + Duration::days(day * 7),
                total_worth: dec!(5.0),
                entity_count: 100,
            })
            .collect();
        let fit = fit_exponential(&HistoricalSeries::from_points(points)).unwrap();

        assert!(fit.annual_growth_rate_pct.abs() < 1e-9);
        assert!(fit.doubling_time_years.is_infinite());
    }

    #[test]
    fn noisy_data_fits_with_imperfect_r_squared() {
        // Deterministic zig-zag around an exponential.
        let start = date(2023, 1, 1);
        let points = (0..200i64)
            .map(|day| {
                let t = day as f64 / 365.25;
                let noise = if day % 2 == 0 { 1.03 } else { 0.97 };
                SeriesPoint {
                    date: start + Duration::days(day),
                    total_worth: Decimal::from_f64(10.0 * (0.12 * t).exp() * noise).unwrap(),
                    entity_count: 2700,
                }
            })
            .collect();
        let fit = fit_exponential(&HistoricalSeries::from_points(points)).unwrap();

        assert!(fit.r_squared < 1.0);
        assert!(fit.r_squared > 0.0);
        assert!((fit.rate_constant - 0.12).abs() < 0.05);
    }

    #[test]
    fn trend_line_spans_the_series() {
        let series = exponential_series(2.0, 0.1, 366);
        let fit = fit_exponential(&series).unwrap();
        let line = trend_line(&fit, &series, 100);

        assert_eq!(line.len(), 100);
        assert_eq!(line[0].date, series.first().unwrap().date);
        assert_eq!(line[99].date, series.last().unwrap().date);
        assert!((line[0].value - fit.base_value).abs() < 1e-9);
        let t_end = 365.0 / 365.25;
        assert!((line[99].value - fit.value_at(t_end)).abs() < 1e-9);
    }
}
