//! Date-sorted, immutable sample collection.
//!
//! A [`SampleCollection`] is built once from an unordered batch of samples and
//! never mutated afterwards. When the source data changes the host builds a new
//! collection and hands it to the controller, which swaps it in whole.

use std::ops::Index;

use chrono::Utc;

use crate::calendar::{DateRange, Timestamp};
use crate::sample::{Measurement, Sample};
use crate::scale::ValueRange;
use crate::units::{Unit, UnitConverter};

/// Samples sorted ascending by date, with precomputed date and value ranges
#[derive(Clone, Debug)]
pub struct SampleCollection<S = Sample> {
    samples: Vec<S>,
    date_range: DateRange,
    value_range: ValueRange,
}

impl<S: Measurement> SampleCollection<S> {
    /// Build from raw samples; the value range uses each sample's recorded
    /// value with no conversion
    pub fn build(samples: impl IntoIterator<Item = S>) -> Self {
        Self::build_with(samples, |sample| sample.value())
    }

    /// Build from raw samples; the value range is computed after converting
    /// every sample into `unit`
    pub fn build_in<C>(samples: impl IntoIterator<Item = S>, unit: Unit, converter: &C) -> Self
    where
        C: UnitConverter + ?Sized,
    {
        Self::build_with(samples, |sample| {
            converter.convert(sample.value(), sample.unit(), unit)
        })
    }

    /// Empty collection whose date range collapses onto the current instant
    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    fn build_with(samples: impl IntoIterator<Item = S>, value_of: impl Fn(&S) -> f64) -> Self {
        let mut samples: Vec<S> = samples.into_iter().collect();
        // sort_by_key is stable, so samples sharing a date keep their input order
        samples.sort_by_key(|sample| sample.date());

        let date_range = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => DateRange::new(first.date(), last.date()),
            _ => DateRange::instant(Utc::now()),
        };

        let value_range = samples
            .iter()
            .map(&value_of)
            .fold(None, |range: Option<ValueRange>, value| {
                Some(match range {
                    Some(range) => range.including(value),
                    None => ValueRange::new(value, value),
                })
            })
            .unwrap_or_default();

        tracing::debug!(
            "Built sample collection: {} samples, {} .. {}",
            samples.len(),
            date_range.lower,
            date_range.upper
        );

        Self {
            samples,
            date_range,
            value_range,
        }
    }

    /// Contiguous run of samples whose date falls within `range` (inclusive)
    pub fn range_slice(&self, range: &DateRange) -> &[S] {
        let start = self
            .samples
            .partition_point(|sample| sample.date() < range.lower);
        let end = self
            .samples
            .partition_point(|sample| sample.date() <= range.upper);
        &self.samples[start..end.max(start)]
    }

    /// Dates of all samples, in order
    pub fn dates(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.samples.iter().map(|sample| sample.date())
    }
}

impl<S> SampleCollection<S> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&S> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&S> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.samples
    }

    /// `[first.date, last.date]`, or `[now, now]` when empty
    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// `[min(value), max(value)]`, or `[0, 0]` when empty.
    ///
    /// Values are in the unit fixed at construction: converted into the display
    /// unit for [`build_in`](Self::build_in), taken as recorded for
    /// [`build`](Self::build), [`Default`] and [`FromIterator`]. Build with
    /// `build_in` when the samples mix units.
    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }
}

impl<S: Measurement> Default for SampleCollection<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Measurement> FromIterator<S> for SampleCollection<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Two collections are equal when their sorted contents are equal
impl<S: PartialEq> PartialEq for SampleCollection<S> {
    fn eq(&self, other: &Self) -> bool {
        self.samples == other.samples
    }
}

impl<S> Index<usize> for SampleCollection<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.samples[index]
    }
}

impl<'a, S> IntoIterator for &'a SampleCollection<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
