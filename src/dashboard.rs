//! Table-view state machine: owns the authoritative row set, the filter
//! selection, the page index and the highlight map, and recomputes the
//! visible page as filtered -> sorted -> paged in one synchronous pass.

use std::time::Instant;

use crate::core::filter::{visible_rows, CardFilterKey, FilterCommand, FilterState, TextColumn, TextFilters};
use crate::core::highlight::{apply_reading, Highlights};
use crate::core::page::{page_count, page_slice, PAGE_SIZE};
use crate::core::sort::{sort_rows, SortSpec};
use crate::core::summary::Summary;
use crate::models::{PatientRecord, VitalField, VitalsReading};

#[derive(Debug)]
pub struct DashboardTable {
    rows: Vec<PatientRecord>,
    filters: FilterState,
    text_filters: TextFilters,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
    highlights: Highlights,
}

impl DashboardTable {
    pub fn new(rows: Vec<PatientRecord>) -> Self {
        Self::with_page_size(rows, PAGE_SIZE)
    }

    pub fn with_page_size(rows: Vec<PatientRecord>, page_size: usize) -> Self {
        DashboardTable {
            rows,
            filters: FilterState::default(),
            text_filters: TextFilters::default(),
            sort: None,
            page: 0,
            page_size,
            highlights: Highlights::new(),
        }
    }

    /// Replace the roster. Resets the page and drops highlights, which are
    /// keyed by names from the old row set.
    pub fn replace_rows(&mut self, rows: Vec<PatientRecord>) {
        self.rows = rows;
        self.page = 0;
        self.highlights = Highlights::new();
    }

    pub fn rows(&self) -> &[PatientRecord] {
        &self.rows
    }

    /// Dispatch a filter change. Any selection change resets to page 0.
    pub fn dispatch_filter(&mut self, command: FilterCommand) {
        self.filters.dispatch(command);
        self.page = 0;
    }

    /// Summary-card click. Counts as a filter change for page reset purposes.
    pub fn toggle_card(&mut self, key: CardFilterKey) {
        self.filters.toggle_card(key);
        self.page = 0;
    }

    pub fn set_text_filter(&mut self, column: TextColumn, value: &str) {
        self.text_filters.set(column, value);
        self.page = 0;
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Sorting reorders within the same visible set, so the page is kept.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// The current page of the filtered, sorted row set.
    pub fn visible_page(&self) -> Vec<&PatientRecord> {
        let filtered = visible_rows(&self.rows, &self.filters, &self.text_filters);
        let sorted = sort_rows(filtered, self.sort);
        page_slice(&sorted, self.page, self.page_size).to_vec()
    }

    /// Total rows passing the active filters, across all pages.
    pub fn visible_count(&self) -> usize {
        visible_rows(&self.rows, &self.filters, &self.text_filters).len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.visible_count(), self.page_size)
    }

    /// Names on the current page: the subscriber list for the telemetry
    /// channel. Changing pages or filters means reopening the channel with
    /// the new list.
    pub fn page_names(&self) -> Vec<String> {
        self.visible_page()
            .into_iter()
            .map(|row| row.name.clone())
            .collect()
    }

    /// Reconcile one inbound reading against the row set.
    ///
    /// `subscribed` is the name list the telemetry channel was opened with;
    /// a reading for a name outside it is inert. The update lands on the
    /// underlying record even if filters have since hidden the row, and any
    /// changed fields are highlighted for the TTL window starting at `now`.
    /// Returns the changed fields.
    pub fn apply_reading(
        &mut self,
        reading: &VitalsReading,
        subscribed: &[String],
        now: Instant,
    ) -> Vec<VitalField> {
        let changed = apply_reading(reading, &mut self.rows, subscribed);
        if !changed.is_empty() {
            self.highlights.mark(&reading.name, &changed, now);
        }
        changed
    }

    pub fn is_highlighted(&self, name: &str, field: VitalField, now: Instant) -> bool {
        self.highlights.is_highlighted(name, field, now)
    }

    pub fn purge_expired_highlights(&mut self, now: Instant) {
        self.highlights.purge_expired(now);
    }

    pub fn next_highlight_deadline(&self) -> Option<Instant> {
        self.highlights.next_deadline()
    }

    /// Global aggregates over the full roster, not the filtered view.
    pub fn summary(&self) -> Summary {
        Summary::compute(&self.rows)
    }
}
