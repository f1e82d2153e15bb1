//! Measurement units and conversion utilities.
//!
//! Samples arrive in whatever unit they were recorded in; the chart displays a
//! single unit chosen by the user. Conversion is a pure function supplied to the
//! grouping engine through [`UnitConverter`], so hosts can plug in their own.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Physical dimension a unit measures; conversion only happens within one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Mass,
    Length,
    Temperature,
    Energy,
    Ratio,
    Count,
}

/// Unit tag carried by every sample
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Unit {
    #[default]
    Kilograms,
    Pounds,
    Stones,
    Centimeters,
    Inches,
    Celsius,
    Fahrenheit,
    Kilocalories,
    Kilojoules,
    Percent,
    Count,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Pounds => "lb",
            Unit::Stones => "st",
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kilocalories => "kcal",
            Unit::Kilojoules => "kJ",
            Unit::Percent => "%",
            Unit::Count => "",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Kilograms | Unit::Pounds | Unit::Stones => Dimension::Mass,
            Unit::Centimeters | Unit::Inches => Dimension::Length,
            Unit::Celsius | Unit::Fahrenheit => Dimension::Temperature,
            Unit::Kilocalories | Unit::Kilojoules => Dimension::Energy,
            Unit::Percent => Dimension::Ratio,
            Unit::Count => Dimension::Count,
        }
    }

    /// Value reported for an aggregate with no samples
    pub fn zero(&self) -> f64 {
        0.0
    }

    /// Convert into the dimension's base unit (kg, cm, °C, kcal)
    fn to_base(self, value: f64) -> f64 {
        match self {
            Unit::Pounds => value * 0.453_592_37,
            Unit::Stones => value * 6.350_293_18,
            Unit::Inches => value * 2.54,
            Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Unit::Kilojoules => value / 4.184,
            _ => value,
        }
    }

    /// Convert from the dimension's base unit into this unit
    fn from_base(self, value: f64) -> f64 {
        match self {
            Unit::Pounds => value / 0.453_592_37,
            Unit::Stones => value / 6.350_293_18,
            Unit::Inches => value / 2.54,
            Unit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
            Unit::Kilojoules => value * 4.184,
            _ => value,
        }
    }
}

/// Pure value conversion between two units
pub trait UnitConverter {
    fn convert(&self, value: f64, from: Unit, to: Unit) -> f64;
}

impl<F> UnitConverter for F
where
    F: Fn(f64, Unit, Unit) -> f64,
{
    fn convert(&self, value: f64, from: Unit, to: Unit) -> f64 {
        self(value, from, to)
    }
}

/// Built-in conversion factors. Values crossing dimensions pass through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardConversions;

impl UnitConverter for StandardConversions {
    fn convert(&self, value: f64, from: Unit, to: Unit) -> f64 {
        if from == to || from.dimension() != to.dimension() {
            return value;
        }
        to.from_base(from.to_base(value))
    }
}
