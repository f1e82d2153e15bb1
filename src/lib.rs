//! trend-pager - calendar-bucketed, horizontally paged time-series windows
//!
//! This library turns an unordered batch of dated measurements into the data a
//! paged trend chart needs: calendar-aligned buckets, a three-page sliding
//! window with per-page averages, axis scales, and point-selection lookup.
//! Drawing, gesture recognition and label formatting belong to the host.
//!
//! ## Module Structure
//!
//! - [`calendar`] - Start/end of hour, day, week, month and year per time zone
//! - [`units`] - Unit tags and the pluggable conversion function
//! - [`sample`] - The measurement capability contract and a concrete sample
//! - [`collection`] - Date-sorted, immutable sample collection
//! - [`grouping`] - Grouping modes, bucket aggregates and the grouping engine
//! - [`scale`] - Y-axis bounds/ticks and x-axis ticks
//! - [`pager`] - The three-page window controller
//! - [`selection`] - Mapping a selected instant back onto its bucket
//! - [`transition`] - Debounced y-scale transitions
//! - [`settings`] - Chart preferences and validated runtime options
//! - [`error`] - Configuration errors

pub mod calendar;
pub mod collection;
pub mod error;
pub mod grouping;
pub mod pager;
pub mod sample;
pub mod scale;
pub mod selection;
pub mod settings;
pub mod transition;
pub mod units;

pub use calendar::{Calendar, CalendarUnit, DateRange, Timestamp};
pub use collection::SampleCollection;
pub use error::ConfigError;
pub use grouping::{GroupedEntries, GroupedEntry, GroupingEngine, GroupingMode};
pub use pager::{Page, PagingController, WindowSnapshot, CURRENT_PAGE, PAGE_COUNT};
pub use sample::{Measurement, Sample};
pub use scale::{YScale, ValueRange};
pub use settings::{ChartOptions, ChartSettings};
pub use units::{StandardConversions, Unit, UnitConverter};
