//! Axis scale derivation.
//!
//! The y-axis is sized from the bucket averages of the grouped window with a
//! 25% margin on each side, then split into four evenly spaced ticks. X-axis
//! ticks follow the calendar granularity of the active grouping mode.

use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, CalendarUnit, DateRange, Timestamp};
use crate::grouping::{GroupedEntry, GroupingMode};

/// Fraction of |min| / |max| added below / above the data
pub const SCALE_MARGIN: f64 = 0.25;

/// Number of y-axis tick values
pub const Y_TICK_COUNT: usize = 4;

/// Hours between x-axis ticks on a daily page
pub const DAILY_TICK_HOURS: u32 = 6;

/// Closed numeric interval `[lower, upper]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lower: f64,
    pub upper: f64,
}

impl ValueRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Grow the range to cover `value`
    pub fn including(self, value: f64) -> Self {
        Self {
            lower: self.lower.min(value),
            upper: self.upper.max(value),
        }
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Y-axis bounds
pub type YScale = ValueRange;

/// Round half to even, so x.5 bounds do not drift in one direction
fn round_bound(value: f64) -> f64 {
    value.round_ties_even()
}

/// Derive y-axis bounds from the averages of `entries`.
///
/// Always returns `lower <= upper`; with `allow_negative == false` both bounds
/// are at least zero.
pub fn y_scale<'a>(
    entries: impl IntoIterator<Item = &'a GroupedEntry>,
    allow_negative: bool,
) -> YScale {
    let averages = entries
        .into_iter()
        .map(GroupedEntry::average)
        .filter(|average| average.is_finite());

    let (min, max) = averages
        .fold(None, |acc: Option<(f64, f64)>, average| {
            Some(match acc {
                Some((min, max)) => (min.min(average), max.max(average)),
                None => (average, average),
            })
        })
        .unwrap_or((0.0, 0.0));

    let mut lower = round_bound(min - min.abs() * SCALE_MARGIN);
    let mut upper = round_bound(max + max.abs() * SCALE_MARGIN);

    if !allow_negative {
        lower = lower.max(0.0);
        upper = upper.max(0.0);
    }
    if lower > upper {
        upper = lower.max(0.0);
    }

    YScale::new(lower, upper)
}

/// Four evenly spaced tick values from `lower` to `upper`
pub fn y_values(scale: &YScale) -> [f64; Y_TICK_COUNT] {
    let range = scale.span();
    [
        scale.lower,
        scale.lower + range / 3.0,
        scale.lower + 2.0 * range / 3.0,
        scale.upper,
    ]
}

/// X-axis tick dates inside one page.
///
/// Daily pages tick every six local hours, weekly pages every day, monthly pages
/// on the month start and each week start, yearly pages on each month start.
pub fn x_values(x_scale: &DateRange, mode: GroupingMode, calendar: &Calendar) -> Vec<Timestamp> {
    let step = match mode {
        GroupingMode::Daily => CalendarUnit::Hour,
        GroupingMode::Weekly => CalendarUnit::Day,
        GroupingMode::Monthly => CalendarUnit::Week,
        GroupingMode::Yearly => CalendarUnit::Month,
    };

    let mut ticks = Vec::new();
    if mode == GroupingMode::Monthly {
        ticks.push(calendar.start_of_month(x_scale.lower));
    }

    let mut tick = calendar.start_of(step, x_scale.lower);
    while tick <= x_scale.upper {
        let keep = match mode {
            GroupingMode::Daily => calendar.local_hour(tick) % DAILY_TICK_HOURS == 0,
            _ => true,
        };
        if keep && tick >= x_scale.lower && ticks.last() != Some(&tick) {
            ticks.push(tick);
        }

        let next = calendar.shift(step, tick, 1);
        if next <= tick {
            break;
        }
        tick = next;
    }

    ticks
}
