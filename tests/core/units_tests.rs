//! Tests for unit conversion
//!
//! Tests cover:
//! - Conversions within each dimension
//! - Roundtrip accuracy
//! - Edge cases (negative, zero and very large values)
//! - Symbols and names

use std::str::FromStr;

use strum::IntoEnumIterator;
use trend_pager::units::Dimension;
use trend_pager::{StandardConversions, Unit, UnitConverter};

// ============================================
// Mass Conversion Tests
// ============================================

#[test]
fn test_pounds_to_kilograms() {
    let kg = StandardConversions.convert(220.462, Unit::Pounds, Unit::Kilograms);
    assert!((kg - 100.0).abs() < 0.001);
}

#[test]
fn test_stones_to_pounds() {
    // 1 st = 14 lb
    let lb = StandardConversions.convert(1.0, Unit::Stones, Unit::Pounds);
    assert!((lb - 14.0).abs() < 0.0001);
}

// ============================================
// Temperature Conversion Tests
// ============================================

#[test]
fn test_temperature_freezing_point() {
    let f = StandardConversions.convert(0.0, Unit::Celsius, Unit::Fahrenheit);
    assert!((f - 32.0).abs() < 0.001);
}

#[test]
fn test_temperature_body() {
    let c = StandardConversions.convert(98.6, Unit::Fahrenheit, Unit::Celsius);
    assert!((c - 37.0).abs() < 0.001);
}

// ============================================
// Other Dimensions
// ============================================

#[test]
fn test_inches_to_centimeters() {
    let cm = StandardConversions.convert(10.0, Unit::Inches, Unit::Centimeters);
    assert!((cm - 25.4).abs() < 0.0001);
}

#[test]
fn test_kilocalories_to_kilojoules() {
    let kj = StandardConversions.convert(100.0, Unit::Kilocalories, Unit::Kilojoules);
    assert!((kj - 418.4).abs() < 0.0001);
}

#[test]
fn test_identity_for_same_unit() {
    for unit in Unit::iter() {
        assert_eq!(StandardConversions.convert(12.5, unit, unit), 12.5);
    }
}

// ============================================
// Roundtrip and Edge Cases
// ============================================

#[test]
fn test_roundtrip_within_dimension() {
    for from in Unit::iter() {
        for to in Unit::iter().filter(|to| to.dimension() == from.dimension()) {
            let there = StandardConversions.convert(-17.25, from, to);
            let back = StandardConversions.convert(there, to, from);
            assert!(
                (back - -17.25).abs() < 1e-9,
                "{} -> {} -> {} gave {}",
                from,
                to,
                from,
                back
            );
        }
    }
}

#[test]
fn test_large_values() {
    let lb = StandardConversions.convert(1.0e12, Unit::Kilograms, Unit::Pounds);
    assert!((lb / 1.0e12 - 2.204_622_6).abs() < 1e-6);
}

#[test]
fn test_percent_and_count_never_convert() {
    assert_eq!(
        StandardConversions.convert(42.0, Unit::Percent, Unit::Count),
        42.0
    );
    assert_eq!(Unit::Percent.dimension(), Dimension::Ratio);
    assert_eq!(Unit::Count.dimension(), Dimension::Count);
}

#[test]
fn test_zero_value() {
    for unit in Unit::iter() {
        assert_eq!(unit.zero(), 0.0);
    }
}

// ============================================
// Symbols and Names
// ============================================

#[test]
fn test_symbols() {
    assert_eq!(Unit::Kilograms.symbol(), "kg");
    assert_eq!(Unit::Pounds.symbol(), "lb");
    assert_eq!(Unit::Celsius.symbol(), "°C");
    assert_eq!(Unit::Kilojoules.symbol(), "kJ");
}

#[test]
fn test_display_and_parse() {
    for unit in Unit::iter() {
        let name = unit.to_string();
        assert_eq!(Unit::from_str(&name).ok(), Some(unit));
        assert_eq!(Unit::from_str(&name.to_uppercase()).ok(), Some(unit));
    }
}
