//! Calendar bucketing of samples.
//!
//! The grouping engine walks a (date-sorted) sample collection, maps every
//! sample onto the start of its calendar bucket, converts its value into the
//! display unit and accumulates it. Buckets are created lazily, keyed in a
//! `BTreeMap`, and frozen into an ordered [`GroupedEntries`] once the pass ends.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::calendar::{Calendar, CalendarUnit, DateRange, Timestamp};
use crate::collection::SampleCollection;
use crate::sample::{Measurement, Sample};
use crate::units::{Unit, UnitConverter};

// ============================================================================
// Grouping Mode
// ============================================================================

/// Chart granularity: controls both bucket size and page span
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GroupingMode {
    /// One day per page, hourly buckets
    Daily,
    /// One week per page, daily buckets
    #[default]
    Weekly,
    /// One month per page, daily buckets
    Monthly,
    /// One year per page, monthly buckets
    Yearly,
}

impl GroupingMode {
    /// Granularity of one bucket
    pub fn bucket_unit(self) -> CalendarUnit {
        match self {
            GroupingMode::Daily => CalendarUnit::Hour,
            GroupingMode::Weekly | GroupingMode::Monthly => CalendarUnit::Day,
            GroupingMode::Yearly => CalendarUnit::Month,
        }
    }

    /// Span of one page, also the step used to advance pages
    pub fn page_unit(self) -> CalendarUnit {
        match self {
            GroupingMode::Daily => CalendarUnit::Day,
            GroupingMode::Weekly => CalendarUnit::Week,
            GroupingMode::Monthly => CalendarUnit::Month,
            GroupingMode::Yearly => CalendarUnit::Year,
        }
    }

    /// Bucket key for `date`: start of its hour, day or month
    pub fn key_date(self, date: Timestamp, calendar: &Calendar) -> Timestamp {
        calendar.start_of(self.bucket_unit(), date)
    }
}

// ============================================================================
// Grouped Entry
// ============================================================================

/// Aggregate of one calendar bucket.
///
/// Identity is a synthetic id: two buckets with identical dates and values are
/// still distinct entries.
#[derive(Clone, Debug, Serialize)]
pub struct GroupedEntry {
    id: Uuid,
    bucket_date: Timestamp,
    unit: Unit,
    values: Vec<f64>,
}

impl GroupedEntry {
    fn new(bucket_date: Timestamp, unit: Unit) -> Self {
        Self {
            id: Uuid::new_v4(),
            bucket_date,
            unit,
            values: Vec::new(),
        }
    }

    fn insert(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bucket_date(&self) -> Timestamp {
        self.bucket_date
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Every converted value that landed in the bucket, duplicates included
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Mean of the bucket; the unit's zero when the bucket is empty
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return self.unit.zero();
        }
        self.sum() / self.values.len() as f64
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

impl PartialEq for GroupedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GroupedEntry {}

impl Hash for GroupedEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Grouped Entries
// ============================================================================

/// Frozen, bucket-date-ordered output of one grouping pass
#[derive(Clone, Debug, Serialize)]
pub struct GroupedEntries {
    mode: GroupingMode,
    unit: Unit,
    entries: Vec<GroupedEntry>,
}

impl GroupedEntries {
    pub fn empty(mode: GroupingMode, unit: Unit) -> Self {
        Self {
            mode,
            unit,
            entries: Vec::new(),
        }
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GroupedEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupedEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[GroupedEntry] {
        &self.entries
    }

    /// Entry whose bucket starts exactly at `bucket_date`
    pub fn find_bucket(&self, bucket_date: Timestamp) -> Option<&GroupedEntry> {
        self.entries
            .binary_search_by_key(&bucket_date, GroupedEntry::bucket_date)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Entry whose bucket contains `date` under this grouping's mode
    pub fn lookup(&self, date: Timestamp, calendar: &Calendar) -> Option<&GroupedEntry> {
        self.find_bucket(self.mode.key_date(date, calendar))
    }

    /// Entries whose bucket date lies within `range` (inclusive)
    pub fn entries_within(&self, range: &DateRange) -> &[GroupedEntry] {
        let start = self
            .entries
            .partition_point(|entry| entry.bucket_date < range.lower);
        let end = self
            .entries
            .partition_point(|entry| entry.bucket_date <= range.upper);
        &self.entries[start..end.max(start)]
    }

    /// Mean of the bucket averages inside `range`, `None` when no bucket falls in it
    pub fn average_within(&self, range: &DateRange) -> Option<f64> {
        let entries = self.entries_within(range);
        if entries.is_empty() {
            return None;
        }
        let total: f64 = entries.iter().map(GroupedEntry::average).sum();
        Some(total / entries.len() as f64)
    }

    /// Expand every bucket back into one sample per value, dated at the bucket start
    pub fn flatten(&self) -> Vec<Sample> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .values
                    .iter()
                    .map(move |&value| Sample::new(entry.bucket_date, value, entry.unit))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a GroupedEntries {
    type Item = &'a GroupedEntry;
    type IntoIter = std::slice::Iter<'a, GroupedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Grouping Engine
// ============================================================================

/// Buckets samples under a calendar, converting into one display unit
pub struct GroupingEngine<'a> {
    calendar: &'a Calendar,
    unit: Unit,
    converter: &'a dyn UnitConverter,
}

impl<'a> GroupingEngine<'a> {
    pub fn new(calendar: &'a Calendar, unit: Unit, converter: &'a dyn UnitConverter) -> Self {
        Self {
            calendar,
            unit,
            converter,
        }
    }

    /// Group `collection` under `mode`, optionally restricted to `range`
    pub fn group<S: Measurement>(
        &self,
        collection: &SampleCollection<S>,
        mode: GroupingMode,
        range: Option<&DateRange>,
    ) -> GroupedEntries {
        let samples = match range {
            Some(range) => collection.range_slice(range),
            None => collection.as_slice(),
        };

        let mut buckets: BTreeMap<Timestamp, GroupedEntry> = BTreeMap::new();
        for sample in samples {
            let key = mode.key_date(sample.date(), self.calendar);
            let value = self
                .converter
                .convert(sample.value(), sample.unit(), self.unit);
            buckets
                .entry(key)
                .or_insert_with(|| GroupedEntry::new(key, self.unit))
                .insert(value);
        }

        tracing::trace!(
            "Grouped {} samples into {} {} buckets",
            samples.len(),
            buckets.len(),
            mode
        );

        GroupedEntries {
            mode,
            unit: self.unit,
            entries: buckets.into_values().collect(),
        }
    }
}
