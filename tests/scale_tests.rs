use approx::assert_relative_eq;
use table_chart_rs::ChartError;
use table_chart_rs::core::{ScaleRequest, TickRounding, ValueScale, band_count_for};

#[test]
fn scale_factor_is_extent_over_maximum() {
    let scale = ValueScale::compute(ScaleRequest::new(20.0, 400.0, 13.0)).expect("scale");
    assert_relative_eq!(scale.scale_factor(), 20.0);
    assert_relative_eq!(scale.value_to_offset(10.0), 200.0);
}

#[test]
fn ticks_use_rounded_step_and_end_at_exact_maximum() {
    // 400 px / 30 px bands -> 13.33 bands; step round(20 * 30 / 400) = 2.
    let scale =
        ValueScale::compute(ScaleRequest::from_band_size(20.0, 400.0, 30.0)).expect("scale");
    assert_eq!(
        scale.ticks(),
        &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
    );
}

#[test]
fn regular_tick_equal_to_maximum_is_not_duplicated() {
    let scale = ValueScale::compute(ScaleRequest::new(40.0, 400.0, 4.0)).expect("scale");
    assert_eq!(scale.ticks(), &[0.0, 10.0, 20.0, 30.0, 40.0]);
}

#[test]
fn nearest_ten_keeps_exact_final_tick() {
    let scale = ValueScale::compute(
        ScaleRequest::new(143.0, 300.0, 10.0).with_rounding(TickRounding::NearestTen),
    )
    .expect("scale");
    assert_eq!(scale.domain_max(), 140.0);
    assert_relative_eq!(scale.scale_factor(), 300.0 / 140.0);
    assert_eq!(scale.ticks().last(), Some(&143.0));
    assert!(scale.ticks()[1..scale.ticks().len() - 1]
        .iter()
        .all(|tick| tick % 10.0 == 0.0));
}

#[test]
fn nearest_ten_never_rounds_a_positive_domain_to_zero() {
    let scale = ValueScale::compute(
        ScaleRequest::new(3.0, 200.0, 5.0).with_rounding(TickRounding::NearestTen),
    )
    .expect("scale");
    assert_eq!(scale.domain_max(), 10.0);
    assert_eq!(scale.ticks().last(), Some(&3.0));
}

#[test]
fn non_positive_maximum_is_empty_dataset() {
    for max in [0.0, -4.0, f64::NAN] {
        let err = ValueScale::compute(ScaleRequest::new(max, 400.0, 10.0)).expect_err("bad max");
        assert!(matches!(err, ChartError::EmptyDataset(_)));
    }
}

#[test]
fn invalid_extent_is_rejected() {
    let err = ValueScale::compute(ScaleRequest::new(10.0, 0.0, 10.0)).expect_err("zero extent");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn band_count_follows_band_size() {
    assert_relative_eq!(band_count_for(400.0, 30.0), 400.0 / 30.0);
    assert_relative_eq!(band_count_for(20.0, 30.0), 1.0);
}

#[test]
fn default_surface_step_matches_band_ratio() {
    // step = round(1000 * 30 / 400) = 75; 13 whole bands, then the exact maximum.
    let scale =
        ValueScale::compute(ScaleRequest::from_band_size(1000.0, 400.0, 30.0)).expect("scale");
    let ticks = scale.ticks();
    assert_eq!(ticks.len(), 14);
    assert_eq!(ticks[1], 75.0);
    assert_eq!(ticks[12], 900.0);
    assert_eq!(ticks.last(), Some(&1000.0));
}
