//! Tests for axis scale derivation
//!
//! Tests cover:
//! - Y-scale margin and rounding
//! - Negative-value suppression and the non-inverted guarantee
//! - Y tick values
//! - X tick dates per grouping mode

use trend_pager::scale::{x_values, y_scale, y_values};
use trend_pager::{
    Calendar, DateRange, GroupedEntries, GroupingEngine, GroupingMode, SampleCollection,
    StandardConversions, Unit, YScale,
};

use crate::common::{kg, noon, utc};

/// One bucket per value, each on its own day
fn entries_with_averages(averages: &[f64]) -> GroupedEntries {
    let cal = Calendar::utc();
    let engine = GroupingEngine::new(&cal, Unit::Kilograms, &StandardConversions);
    let samples = averages
        .iter()
        .enumerate()
        .map(|(i, &v)| kg(noon(2024, 1, 1) + chrono::Duration::days(i as i64), v));
    engine.group(&SampleCollection::build(samples), GroupingMode::Weekly, None)
}

// ============================================
// Y Scale Tests
// ============================================

#[test]
fn test_y_scale_margin_with_ties_to_even() {
    // lower = 10 - 2.5 = 7.5 -> 8, upper = 20 + 5 = 25
    let entries = entries_with_averages(&[10.0, 20.0]);
    assert_eq!(y_scale(entries.iter(), true), YScale::new(8.0, 25.0));
}

#[test]
fn test_y_scale_rounds_half_to_even() {
    // lower = 2 - 0.5 = 1.5 -> 2, upper = 6 + 1.5 = 7.5 -> 8
    let entries = entries_with_averages(&[2.0, 6.0]);
    assert_eq!(y_scale(entries.iter(), true), YScale::new(2.0, 8.0));
    // lower = 10 - 2.5 = 7.5 -> 8 ; upper = 10 + 2.5 = 12.5 -> 12
    let entries = entries_with_averages(&[10.0]);
    assert_eq!(y_scale(entries.iter(), true), YScale::new(8.0, 12.0));
}

#[test]
fn test_y_scale_empty_is_zero() {
    let entries = entries_with_averages(&[]);
    assert_eq!(y_scale(entries.iter(), true), YScale::new(0.0, 0.0));
    assert_eq!(y_scale(entries.iter(), false), YScale::new(0.0, 0.0));
}

#[test]
fn test_y_scale_negative_values() {
    // lower = -10 - 2.5 = -12.5 -> -12, upper = -2 + 0.5 = -1.5 -> -2
    let entries = entries_with_averages(&[-10.0, -2.0]);
    assert_eq!(y_scale(entries.iter(), true), YScale::new(-12.0, -2.0));
    assert_eq!(y_scale(entries.iter(), false), YScale::new(0.0, 0.0));
}

#[test]
fn test_y_scale_suppresses_negative_lower_bound() {
    // lower = -4 - 1 = -5 -> clamped to 0, upper = 8 + 2 = 10
    let entries = entries_with_averages(&[-4.0, 8.0]);
    assert_eq!(y_scale(entries.iter(), false), YScale::new(0.0, 10.0));
    assert_eq!(y_scale(entries.iter(), true), YScale::new(-5.0, 10.0));
}

#[test]
fn test_y_scale_never_inverted() {
    let sets: &[&[f64]] = &[
        &[],
        &[0.0],
        &[0.4],
        &[-0.4],
        &[-100.0, -99.0],
        &[-1.0, 1.0],
        &[1e6, 1e6 + 1.0],
        &[-3.3, 7.7, 0.1],
        &[5.5, 5.5, 5.5],
    ];
    for set in sets {
        let entries = entries_with_averages(set);
        for allow_negative in [true, false] {
            let scale = y_scale(entries.iter(), allow_negative);
            assert!(
                scale.lower <= scale.upper,
                "{:?} allow_negative={} -> {:?}",
                set,
                allow_negative,
                scale
            );
            if !allow_negative {
                assert!(scale.lower >= 0.0);
            }
        }
    }
}

// ============================================
// Y Values Tests
// ============================================

#[test]
fn test_y_values_evenly_spaced() {
    assert_eq!(
        y_values(&YScale::new(0.0, 30.0)),
        [0.0, 10.0, 20.0, 30.0]
    );
}

#[test]
fn test_y_values_bracketed_and_non_decreasing() {
    for scale in [
        YScale::new(0.0, 0.0),
        YScale::new(8.0, 25.0),
        YScale::new(-12.0, -2.0),
        YScale::new(-5.0, 10.0),
    ] {
        let values = y_values(&scale);
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], scale.lower);
        assert_eq!(values[3], scale.upper);
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "{:?}", values);
        }
    }
}

// ============================================
// X Values Tests
// ============================================

#[test]
fn test_x_values_daily() {
    let cal = Calendar::utc();
    let page = cal.period(trend_pager::CalendarUnit::Day, noon(2024, 5, 1));
    let ticks = x_values(&page, GroupingMode::Daily, &cal);
    assert_eq!(
        ticks,
        vec![
            utc(2024, 5, 1, 0, 0),
            utc(2024, 5, 1, 6, 0),
            utc(2024, 5, 1, 12, 0),
            utc(2024, 5, 1, 18, 0),
        ]
    );
}

#[test]
fn test_x_values_weekly() {
    let cal = Calendar::utc();
    let page = cal.period(trend_pager::CalendarUnit::Week, noon(2024, 1, 3));
    let ticks = x_values(&page, GroupingMode::Weekly, &cal);
    assert_eq!(ticks.len(), 7);
    assert_eq!(ticks[0], utc(2024, 1, 1, 0, 0));
    assert_eq!(ticks[6], utc(2024, 1, 7, 0, 0));
}

#[test]
fn test_x_values_monthly() {
    let cal = Calendar::utc();
    // February 2024 starts on a Thursday; Monday week starts follow on 5, 12, 19, 26
    let page = cal.period(trend_pager::CalendarUnit::Month, noon(2024, 2, 10));
    let ticks = x_values(&page, GroupingMode::Monthly, &cal);
    assert_eq!(
        ticks,
        vec![
            utc(2024, 2, 1, 0, 0),
            utc(2024, 2, 5, 0, 0),
            utc(2024, 2, 12, 0, 0),
            utc(2024, 2, 19, 0, 0),
            utc(2024, 2, 26, 0, 0),
        ]
    );
}

#[test]
fn test_x_values_monthly_starting_on_week_start() {
    let cal = Calendar::utc();
    // January 2024 starts on a Monday; the month start is not repeated
    let page = cal.period(trend_pager::CalendarUnit::Month, noon(2024, 1, 10));
    let ticks = x_values(&page, GroupingMode::Monthly, &cal);
    assert_eq!(ticks.len(), 5);
    assert_eq!(ticks[0], utc(2024, 1, 1, 0, 0));
    assert_eq!(ticks[1], utc(2024, 1, 8, 0, 0));
}

#[test]
fn test_x_values_yearly() {
    let cal = Calendar::utc();
    let page = DateRange::new(cal.start_of_year(noon(2023, 6, 1)), cal.end_of_year(noon(2023, 6, 1)));
    let ticks = x_values(&page, GroupingMode::Yearly, &cal);
    assert_eq!(ticks.len(), 12);
    assert_eq!(ticks[0], utc(2023, 1, 1, 0, 0));
    assert_eq!(ticks[11], utc(2023, 12, 1, 0, 0));
}
