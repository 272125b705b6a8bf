//! Tests for summary projection and payload assembly.

#[cfg(test)]
mod tests {
    use crate::growth::fit_exponential;
    use crate::inflation::InflationIndexSeries;
    use crate::series::{HistoricalSeries, SeriesPoint};
    use crate::summary::{build_dashboard_payload, project, EquivalencyBenchmarks, ViewMode};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: NaiveDate, total_worth: Decimal, entity_count: usize) -> SeriesPoint {
        SeriesPoint {
            date: d,
            total_worth,
            entity_count,
        }
    }

    /// The two-point reference scenario: 10.0T -> 11.3T over 2023.
    fn two_point_series() -> HistoricalSeries {
        HistoricalSeries::from_points(vec![
            point(date(2023, 1, 1), dec!(10.0), 2640),
            point(date(2024, 1, 1), dec!(11.3), 2781),
        ])
    }

    #[test]
    fn two_point_summary_matches_reference_numbers() {
        let series = two_point_series();
        let fit = fit_exponential(&series).unwrap();
        let summary = project(&series, &fit, None).unwrap();

        assert!((summary.total_increase_pct - 13.0).abs() < 1e-9);
        assert!((summary.annual_growth_rate_pct - 13.0).abs() < 0.1);
        assert_eq!(summary.data_points, 2);
        assert_eq!(summary.timespan_days, 365);
        assert_eq!(summary.entity_count, 2781);
        assert!((summary.start_value - 10.0).abs() < 1e-12);
        assert!((summary.end_value - 11.3).abs() < 1e-12);
    }

    #[test]
    fn supplemental_metrics_are_derived_from_the_latest_point() {
        let series = two_point_series();
        let fit = fit_exponential(&series).unwrap();
        let summary = project(&series, &fit, None).unwrap();

        // 11.3T over 2781 entities, in billions each.
        assert!((summary.average_worth_billions - 11.3 * 1000.0 / 2781.0).abs() < 1e-9);
        // 1.3T gained over 365 days, in billions per day.
        assert!((summary.daily_accumulation_billions - 1300.0 / 365.0).abs() < 1e-9);
    }

    #[test]
    fn shrinking_window_reports_zero_daily_accumulation() {
        let series = HistoricalSeries::from_points(vec![
            point(date(2023, 1, 1), dec!(11.0), 2700),
            point(date(2024, 1, 1), dec!(10.0), 2650),
        ]);
        let fit = fit_exponential(&series).unwrap();
        let summary = project(&series, &fit, None).unwrap();

        assert!(summary.total_increase_pct < 0.0);
        assert_eq!(summary.daily_accumulation_billions, 0.0);
    }

    #[test]
    fn delta_against_prior_run() {
        let prior = HistoricalSeries::from_points(vec![point(
            date(2023, 12, 25),
            dec!(11.1),
            2770,
        )]);
        let series = two_point_series();
        let fit = fit_exponential(&series).unwrap();
        let summary = project(&series, &fit, Some(&prior)).unwrap();

        let delta = summary.since_last_update.unwrap();
        assert_eq!(delta.previous_date, date(2023, 12, 25));
        assert!((delta.total_worth_change - 0.2).abs() < 1e-9);
        assert_eq!(delta.entity_count_change, 11);
    }

    #[test]
    fn empty_series_cannot_be_summarized() {
        let series = two_point_series();
        let fit = fit_exponential(&series).unwrap();
        assert!(project(&HistoricalSeries::default(), &fit, None).is_err());
    }

    // =========================================================================
    // Payload assembly
    // =========================================================================

    /// Series in millions, as aggregation produces it.
    fn millions_series() -> HistoricalSeries {
        HistoricalSeries::from_points(vec![
            point(date(2023, 1, 1), dec!(10_000_000), 2640),
            point(date(2023, 7, 1), dec!(10_700_000), 2710),
            point(date(2024, 1, 1), dec!(11_300_000), 2781),
        ])
    }

    #[test]
    fn payload_converts_to_trillions_and_keys_views() {
        let index = InflationIndexSeries::from_pairs(vec![
            (date(2023, 1, 1), dec!(300.0)),
            (date(2024, 1, 1), dec!(300.0)),
        ])
        .unwrap();

        let payload = build_dashboard_payload(
            &millions_series(),
            Some(&index),
            None,
            &EquivalencyBenchmarks::default(),
        )
        .unwrap();

        assert_eq!(payload.last_updated, date(2024, 1, 1));
        assert_eq!(payload.nominal.mode, ViewMode::Nominal);
        assert_eq!(payload.nominal.series.len(), 3);
        assert_eq!(payload.nominal.series[0].total_worth, dec!(10.0));

        // A constant index means both views carry identical numbers.
        let adjusted = payload.inflation_adjusted.unwrap();
        assert_eq!(adjusted.mode, ViewMode::InflationAdjusted);
        assert_eq!(adjusted.series, payload.nominal.series);
        assert_eq!(adjusted.summary.end_value, payload.nominal.summary.end_value);
    }

    #[test]
    fn payload_without_index_is_nominal_only() {
        let payload = build_dashboard_payload(
            &millions_series(),
            None,
            None,
            &EquivalencyBenchmarks::default(),
        )
        .unwrap();

        assert!(payload.inflation_adjusted.is_none());
        assert_eq!(payload.nominal.trend_line.len(), 100);
    }

    #[test]
    fn payload_propagates_index_coverage_error() {
        // Index starts after the first wealth point.
        let index =
            InflationIndexSeries::from_pairs(vec![(date(2023, 6, 1), dec!(300.0))]).unwrap();

        let result = build_dashboard_payload(
            &millions_series(),
            Some(&index),
            None,
            &EquivalencyBenchmarks::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn inflation_changes_the_fit_not_just_the_scale() {
        // Rising index: early points inflate more than late ones, so the
        // adjusted growth rate must come out below the nominal one.
        let index = InflationIndexSeries::from_pairs(vec![
            (date(2023, 1, 1), dec!(300.0)),
            (date(2023, 7, 1), dec!(306.0)),
            (date(2024, 1, 1), dec!(312.0)),
        ])
        .unwrap();

        let payload = build_dashboard_payload(
            &millions_series(),
            Some(&index),
            None,
            &EquivalencyBenchmarks::default(),
        )
        .unwrap();

        let nominal_rate = payload.nominal.fit_params.annual_growth_rate_pct;
        let adjusted_rate = payload
            .inflation_adjusted
            .unwrap()
            .fit_params
            .annual_growth_rate_pct;
        assert!(adjusted_rate < nominal_rate);
        assert!(adjusted_rate > 0.0);
    }

    #[test]
    fn equivalencies_scale_from_the_latest_total() {
        let payload = build_dashboard_payload(
            &millions_series(),
            None,
            None,
            &EquivalencyBenchmarks::default(),
        )
        .unwrap();

        assert_eq!(payload.equivalencies.len(), 3);
        let households = &payload.equivalencies[0];
        assert_eq!(households.comparison, "Median US Households");
        // 11.3T / $80,610 ~= 140.2 million households' annual income.
        assert!((households.value_millions - 11.3e12 / 80_610.0 / 1e6).abs() < 1e-6);
    }
}
