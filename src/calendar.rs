//! Calendar period arithmetic.
//!
//! Start and end of hour/day/week/month/year for an instant, evaluated in a
//! configurable time zone with a configurable first day of the week. DST gaps
//! and overlaps are resolved through `chrono-tz`, so a "day" may be 23 or 25
//! hours long and a month start may not fall on local midnight.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::ConfigError;

/// Instants are always carried in UTC; the calendar decides local boundaries.
pub type Timestamp = DateTime<Utc>;

/// Seconds between a period's last instant and the next period start
pub const PERIOD_END_TICK_SECONDS: i64 = 1;

// ============================================================================
// Date Range
// ============================================================================

/// Closed interval of instants `[lower, upper]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub lower: Timestamp,
    pub upper: Timestamp,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive inverted
    pub fn new(lower: Timestamp, upper: Timestamp) -> Self {
        if lower <= upper {
            Self { lower, upper }
        } else {
            Self {
                lower: upper,
                upper: lower,
            }
        }
    }

    /// Degenerate range holding a single instant
    pub fn instant(at: Timestamp) -> Self {
        Self {
            lower: at,
            upper: at,
        }
    }

    pub fn contains(&self, date: Timestamp) -> bool {
        self.lower <= date && date <= self.upper
    }

    /// True when the two ranges share at least one instant
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.upper >= other.lower && self.lower <= other.upper
    }

    /// Pull `date` into the range
    pub fn clamp(&self, date: Timestamp) -> Timestamp {
        date.clamp(self.lower, self.upper)
    }

    pub fn duration(&self) -> Duration {
        self.upper - self.lower
    }
}

// ============================================================================
// Calendar Units
// ============================================================================

/// Calendar granularity used for bucketing, paging and axis ticks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CalendarUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

// ============================================================================
// Calendar
// ============================================================================

/// Time zone plus week-start policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calendar {
    time_zone: Tz,
    week_start: Weekday,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    pub fn new(time_zone: Tz, week_start: Weekday) -> Self {
        Self {
            time_zone,
            week_start,
        }
    }

    /// UTC calendar with ISO weeks (Monday first)
    pub fn utc() -> Self {
        Self::new(chrono_tz::UTC, Weekday::Mon)
    }

    /// Build a calendar from an IANA zone name and a weekday name ("monday", "sun", ...)
    pub fn from_names(time_zone: &str, week_start: &str) -> Result<Self, ConfigError> {
        let zone = time_zone
            .trim()
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimeZone(time_zone.to_string()))?;
        let weekday = week_start
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ConfigError::UnknownWeekStart(week_start.to_string()))?;
        Ok(Self::new(zone, weekday))
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Wall-clock view of an instant in this calendar's zone
    pub fn local(&self, date: Timestamp) -> DateTime<Tz> {
        date.with_timezone(&self.time_zone)
    }

    // ------------------------------------------------------------------------
    // Named boundaries
    // ------------------------------------------------------------------------

    pub fn start_of_hour(&self, date: Timestamp) -> Timestamp {
        self.start_of(CalendarUnit::Hour, date)
    }

    pub fn start_of_day(&self, date: Timestamp) -> Timestamp {
        self.start_of(CalendarUnit::Day, date)
    }

    pub fn end_of_day(&self, date: Timestamp) -> Timestamp {
        self.end_of(CalendarUnit::Day, date)
    }

    pub fn start_of_week(&self, date: Timestamp) -> Timestamp {
        self.start_of(CalendarUnit::Week, date)
    }

    pub fn end_of_week(&self, date: Timestamp) -> Timestamp {
        self.end_of(CalendarUnit::Week, date)
    }

    pub fn start_of_month(&self, date: Timestamp) -> Timestamp {
        self.start_of(CalendarUnit::Month, date)
    }

    pub fn end_of_month(&self, date: Timestamp) -> Timestamp {
        self.end_of(CalendarUnit::Month, date)
    }

    pub fn start_of_year(&self, date: Timestamp) -> Timestamp {
        self.start_of(CalendarUnit::Year, date)
    }

    pub fn end_of_year(&self, date: Timestamp) -> Timestamp {
        self.end_of(CalendarUnit::Year, date)
    }

    // ------------------------------------------------------------------------
    // Generic boundaries
    // ------------------------------------------------------------------------

    /// First instant of the `unit` period containing `date`
    pub fn start_of(&self, unit: CalendarUnit, date: Timestamp) -> Timestamp {
        match unit {
            CalendarUnit::Hour => {
                let local = self.local(date);
                date - Duration::minutes(i64::from(local.minute()))
                    - Duration::seconds(i64::from(local.second()))
                    - Duration::nanoseconds(i64::from(local.nanosecond()))
            }
            _ => {
                let anchor = self.anchor_date(unit, self.local(date).date_naive());
                self.start_of_local_date(anchor)
            }
        }
    }

    /// Last instant of the `unit` period containing `date`
    /// (next period start minus [`PERIOD_END_TICK_SECONDS`])
    pub fn end_of(&self, unit: CalendarUnit, date: Timestamp) -> Timestamp {
        self.shift(unit, date, 1) - Duration::seconds(PERIOD_END_TICK_SECONDS)
    }

    /// Start of the period `offset` units away from the one containing `date`
    pub fn shift(&self, unit: CalendarUnit, date: Timestamp, offset: i32) -> Timestamp {
        match unit {
            CalendarUnit::Hour => self.start_of_hour(date) + Duration::hours(i64::from(offset)),
            _ => {
                let anchor = self.anchor_date(unit, self.local(date).date_naive());
                self.start_of_local_date(advance_date(unit, anchor, offset))
            }
        }
    }

    /// `[start_of(unit, date), end_of(unit, date)]`
    pub fn period(&self, unit: CalendarUnit, date: Timestamp) -> DateRange {
        DateRange::new(self.start_of(unit, date), self.end_of(unit, date))
    }

    /// Local hour-of-day for `date`
    pub fn local_hour(&self, date: Timestamp) -> u32 {
        self.local(date).hour()
    }

    fn anchor_date(&self, unit: CalendarUnit, date: NaiveDate) -> NaiveDate {
        match unit {
            CalendarUnit::Hour | CalendarUnit::Day => date,
            CalendarUnit::Week => {
                let back = (date.weekday().num_days_from_monday() + 7
                    - self.week_start.num_days_from_monday())
                    % 7;
                date - Duration::days(i64::from(back))
            }
            CalendarUnit::Month => date.with_day(1).unwrap_or(date),
            CalendarUnit::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }

    fn start_of_local_date(&self, date: NaiveDate) -> Timestamp {
        self.resolve(date.and_time(NaiveTime::MIN))
    }

    /// Map a wall-clock time to an instant. Overlaps take the earlier reading;
    /// a wall-clock time inside a DST gap moves forward to the first time that exists.
    fn resolve(&self, naive: NaiveDateTime) -> Timestamp {
        match self.time_zone.from_local_datetime(&naive) {
            LocalResult::Single(date) => date.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                let mut probe = naive;
                // Real-world gaps are at most two hours wide
                for _ in 0..8 {
                    probe += Duration::minutes(15);
                    if let Some(date) = self.time_zone.from_local_datetime(&probe).earliest() {
                        return date.with_timezone(&Utc);
                    }
                }
                Utc.from_utc_datetime(&naive)
            }
        }
    }
}

fn advance_date(unit: CalendarUnit, date: NaiveDate, offset: i32) -> NaiveDate {
    let months = |count: i32| {
        let magnitude = Months::new(count.unsigned_abs());
        if count >= 0 {
            date.checked_add_months(magnitude)
        } else {
            date.checked_sub_months(magnitude)
        }
    };

    let shifted = match unit {
        CalendarUnit::Hour | CalendarUnit::Day => {
            date.checked_add_signed(Duration::days(i64::from(offset)))
        }
        CalendarUnit::Week => date.checked_add_signed(Duration::days(7 * i64::from(offset))),
        CalendarUnit::Month => months(offset),
        CalendarUnit::Year => offset.checked_mul(12).and_then(months),
    };
    shifted.unwrap_or(date)
}
