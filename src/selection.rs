//! Point selection.
//!
//! The rendering layer reports a cursor or tap position as an instant; the
//! selection maps it back onto the bucket that instant belongs to.

use crate::calendar::{Calendar, Timestamp};
use crate::grouping::{GroupedEntries, GroupedEntry};

/// Find the grouped entry whose bucket contains `date`.
///
/// `None` input, or a date whose bucket holds no samples, yields `None`.
pub fn lookup<'a>(
    entries: &'a GroupedEntries,
    calendar: &Calendar,
    date: Option<Timestamp>,
) -> Option<&'a GroupedEntry> {
    entries.lookup(date?, calendar)
}

/// Currently selected instant, if any
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    date: Option<Timestamp>,
}

impl Selection {
    pub fn select(&mut self, date: Timestamp) {
        self.date = Some(date);
    }

    pub fn clear(&mut self) {
        self.date = None;
    }

    pub fn date(&self) -> Option<Timestamp> {
        self.date
    }

    pub fn is_active(&self) -> bool {
        self.date.is_some()
    }

    /// Grouped entry under the selected instant
    pub fn resolve<'a>(
        &self,
        entries: &'a GroupedEntries,
        calendar: &Calendar,
    ) -> Option<&'a GroupedEntry> {
        lookup(entries, calendar, self.date)
    }
}
