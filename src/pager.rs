//! Three-page sliding window controller.
//!
//! The chart scrolls horizontally through calendar pages. Only three pages are
//! materialized at any time: the one before the pivot, the pivot page, and the
//! one after. Every trigger that can change what is visible (grouping mode
//! change, data replacement, confirmed page move) runs [`PagingController::update`],
//! which re-derives everything from the pivot and returns a fresh
//! [`WindowSnapshot`] for the rendering layer.
//!
//! Page indices are slot positions: `0` is the previous page, [`CURRENT_PAGE`]
//! the pivot page and `2` the next page.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::calendar::{Calendar, DateRange, Timestamp};
use crate::collection::SampleCollection;
use crate::grouping::{GroupedEntries, GroupedEntry, GroupingEngine, GroupingMode};
use crate::sample::{Measurement, Sample};
use crate::scale::{x_values, y_scale, y_values, YScale, Y_TICK_COUNT};
use crate::selection::{self, Selection};
use crate::settings::ChartOptions;
use crate::transition::ScaleTransition;
use crate::units::{StandardConversions, Unit, UnitConverter};

/// Number of materialized pages
pub const PAGE_COUNT: usize = 3;

/// Slot index of the pivot page
pub const CURRENT_PAGE: usize = 1;

/// Offsets of the three slots relative to the pivot page
const PAGE_OFFSETS: [i32; PAGE_COUNT] = [-1, 0, 1];

// ============================================================================
// Page Arithmetic
// ============================================================================

/// Canonical start of the page containing `date`
pub fn page_date(date: Timestamp, mode: GroupingMode, calendar: &Calendar) -> Timestamp {
    calendar.start_of(mode.page_unit(), date)
}

/// Start of the page `offset` pages away from the one containing `date`
pub fn next_page_date(
    date: Timestamp,
    mode: GroupingMode,
    offset: i32,
    calendar: &Calendar,
) -> Timestamp {
    calendar.shift(mode.page_unit(), date, offset)
}

/// Visible date span of the page containing `date`
pub fn x_scale(date: Timestamp, mode: GroupingMode, calendar: &Calendar) -> DateRange {
    calendar.period(mode.page_unit(), date)
}

// ============================================================================
// Window Types
// ============================================================================

/// One pager slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Page {
    /// Canonical page start
    pub date: Timestamp,
    pub x_scale: DateRange,
    /// Mean of the bucket averages on this page; `None` when the page has no data
    pub average: Option<f64>,
}

impl Page {
    fn placeholder(date: Timestamp) -> Self {
        Self {
            date,
            x_scale: DateRange::instant(date),
            average: None,
        }
    }
}

/// Immutable result of one window recomputation
#[derive(Clone, Debug)]
pub struct WindowSnapshot {
    pub mode: GroupingMode,
    pub pivot: Timestamp,
    pub pages: [Page; PAGE_COUNT],
    /// Buckets across the whole work range around the pivot
    pub entries: Arc<GroupedEntries>,
    pub y_scale: YScale,
    pub y_values: [f64; Y_TICK_COUNT],
    /// X-axis ticks of the current page
    pub x_values: Vec<Timestamp>,
    pub unit: Unit,
    pub precision: u8,
}

impl WindowSnapshot {
    pub fn current(&self) -> &Page {
        &self.pages[CURRENT_PAGE]
    }

    pub fn previous(&self) -> &Page {
        &self.pages[0]
    }

    pub fn next(&self) -> &Page {
        &self.pages[PAGE_COUNT - 1]
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Owns the 3-page window, the active grouped entries and the selection
pub struct PagingController<S = Sample> {
    options: ChartOptions,
    converter: Box<dyn UnitConverter>,
    collection: Arc<SampleCollection<S>>,
    mode: GroupingMode,
    pivot: Timestamp,
    pages: [Page; PAGE_COUNT],
    entries: Arc<GroupedEntries>,
    y_scale: YScale,
    y_values: [f64; Y_TICK_COUNT],
    selection: Selection,
    transition: ScaleTransition,
    requested_scale: Option<YScale>,
}

impl<S: Measurement> PagingController<S> {
    /// Controller using the built-in unit conversions, pivoted on now
    pub fn new(collection: impl Into<Arc<SampleCollection<S>>>, options: ChartOptions) -> Self {
        Self::with_converter(collection, options, StandardConversions)
    }

    /// Controller using a caller-supplied conversion function
    pub fn with_converter(
        collection: impl Into<Arc<SampleCollection<S>>>,
        options: ChartOptions,
        converter: impl UnitConverter + 'static,
    ) -> Self {
        let now = Utc::now();
        let mut controller = Self {
            mode: options.grouping_mode,
            transition: ScaleTransition::new(options.settle_delay),
            entries: Arc::new(GroupedEntries::empty(
                options.grouping_mode,
                options.display_unit,
            )),
            options,
            converter: Box::new(converter),
            collection: collection.into(),
            pivot: now,
            pages: [Page::placeholder(now); PAGE_COUNT],
            y_scale: YScale::default(),
            y_values: [0.0; Y_TICK_COUNT],
            selection: Selection::default(),
            requested_scale: None,
        };
        controller.update(None);
        controller
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn calendar(&self) -> &Calendar {
        &self.options.calendar
    }

    pub fn collection(&self) -> Arc<SampleCollection<S>> {
        Arc::clone(&self.collection)
    }

    pub fn grouping_mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn pivot(&self) -> Timestamp {
        self.pivot
    }

    pub fn pages(&self) -> &[Page; PAGE_COUNT] {
        &self.pages
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[CURRENT_PAGE]
    }

    pub fn entries(&self) -> Arc<GroupedEntries> {
        Arc::clone(&self.entries)
    }

    pub fn y_scale(&self) -> YScale {
        self.y_scale
    }

    pub fn y_values(&self) -> [f64; Y_TICK_COUNT] {
        self.y_values
    }

    // ------------------------------------------------------------------------
    // Page arithmetic under the active mode
    // ------------------------------------------------------------------------

    pub fn page_date(&self, date: Timestamp) -> Timestamp {
        page_date(date, self.mode, &self.options.calendar)
    }

    pub fn next_page_date(&self, date: Timestamp, offset: i32) -> Timestamp {
        next_page_date(date, self.mode, offset, &self.options.calendar)
    }

    pub fn x_scale(&self, date: Timestamp) -> DateRange {
        x_scale(date, self.mode, &self.options.calendar)
    }

    /// Span grouped on each update: pivot page ± `lead_pages` pages, never
    /// narrower than the previous and next pages
    pub fn work_range(&self) -> DateRange {
        let lead = i32::try_from(self.options.lead_pages.max(1)).unwrap_or(i32::MAX);
        let lower = self.next_page_date(self.pivot, -lead);
        let upper = self.x_scale(self.next_page_date(self.pivot, lead)).upper;
        DateRange::new(lower, upper)
    }

    // ------------------------------------------------------------------------
    // Recomputation
    // ------------------------------------------------------------------------

    /// Recompute the whole window, optionally swapping in a new collection first
    pub fn update(&mut self, collection: Option<Arc<SampleCollection<S>>>) -> WindowSnapshot {
        if let Some(collection) = collection {
            self.collection = collection;
        }

        let calendar = self.options.calendar;
        let date_range = self.collection.date_range();
        self.pivot = page_date(date_range.clamp(self.pivot), self.mode, &calendar);

        let work_range = self.work_range();
        let engine = GroupingEngine::new(
            &calendar,
            self.options.display_unit,
            self.converter.as_ref(),
        );
        self.entries = Arc::new(engine.group(&self.collection, self.mode, Some(&work_range)));

        self.y_scale = y_scale(self.entries.iter(), self.options.allow_negative);
        self.y_values = y_values(&self.y_scale);
        if self.requested_scale != Some(self.y_scale) {
            self.requested_scale = Some(self.y_scale);
            self.transition.request(self.y_scale);
        }

        for (page, offset) in self.pages.iter_mut().zip(PAGE_OFFSETS) {
            let date = next_page_date(self.pivot, self.mode, offset, &calendar);
            let span = x_scale(date, self.mode, &calendar);
            *page = Page {
                date,
                x_scale: span,
                average: self.entries.average_within(&span),
            };
        }

        tracing::debug!(
            "Window updated: mode={} pivot={} buckets={} y=[{}, {}]",
            self.mode,
            self.pivot,
            self.entries.len(),
            self.y_scale.lower,
            self.y_scale.upper
        );

        self.snapshot()
    }

    /// Swap in a new collection and recompute
    pub fn replace_collection(
        &mut self,
        collection: impl Into<Arc<SampleCollection<S>>>,
    ) -> WindowSnapshot {
        self.update(Some(collection.into()))
    }

    /// Switch grouping mode; clears the selection and regroups
    pub fn set_grouping_mode(&mut self, mode: GroupingMode) -> WindowSnapshot {
        tracing::debug!("Grouping mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.selection.clear();
        self.update(None)
    }

    /// Re-center the window on `date` (clamped into the data range)
    pub fn jump_to(&mut self, date: Timestamp) -> WindowSnapshot {
        self.pivot = date;
        self.update(None)
    }

    /// Current window state without recomputing
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            mode: self.mode,
            pivot: self.pivot,
            pages: self.pages,
            entries: Arc::clone(&self.entries),
            y_scale: self.y_scale,
            y_values: self.y_values,
            x_values: x_values(
                &self.pages[CURRENT_PAGE].x_scale,
                self.mode,
                &self.options.calendar,
            ),
            unit: self.options.display_unit,
            precision: self.options.precision,
        }
    }

    // ------------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------------

    /// Whether slot `to_index` overlaps the data range at all
    pub fn can_move(&self, to_index: usize) -> bool {
        match self.pages.get(to_index) {
            Some(page) => page.x_scale.overlaps(&self.collection.date_range()),
            None => false,
        }
    }

    /// Promote slot `to_index` to the pivot and recompute.
    ///
    /// Returns `None` and leaves the window untouched when the move is refused.
    pub fn did_move(&mut self, to_index: usize) -> Option<WindowSnapshot> {
        if !self.can_move(to_index) {
            tracing::trace!("Refused move to page {} (pivot {})", to_index, self.pivot);
            return None;
        }

        self.pivot = self.pages[to_index].date;
        tracing::trace!("Moved to page {}, new pivot {}", to_index, self.pivot);
        Some(self.update(None))
    }

    /// Gesture entry point: apply the move if allowed, then report the outcome
    pub fn request_move<F>(&mut self, to_index: usize, completion: F) -> Option<WindowSnapshot>
    where
        F: FnOnce(bool),
    {
        let snapshot = self.did_move(to_index);
        completion(snapshot.is_some());
        snapshot
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Grouped entry whose bucket contains `date`
    pub fn lookup(&self, date: Option<Timestamp>) -> Option<&GroupedEntry> {
        selection::lookup(&self.entries, &self.options.calendar, date)
    }

    pub fn select(&mut self, date: Timestamp) -> Option<&GroupedEntry> {
        self.selection.select(date);
        self.selected_entry()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_entry(&self) -> Option<&GroupedEntry> {
        self.selection
            .resolve(&self.entries, &self.options.calendar)
    }

    // ------------------------------------------------------------------------
    // Scale transition
    // ------------------------------------------------------------------------

    /// Settled y-scale once the debounce delay has elapsed without a newer change
    pub fn poll_scale_transition(&mut self) -> Option<YScale> {
        self.transition.poll()
    }

    pub fn scale_transition(&mut self) -> &mut ScaleTransition {
        &mut self.transition
    }
}
