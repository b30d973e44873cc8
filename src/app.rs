//! Application state and navigation logic.

use anyhow::Result;

use crate::data::timestamp::parse_time;
use crate::data::{aggregate, classify_record, filter_and_paginate, FilterCriteria, Page, Tier};
use crate::source::{FeedEvent, FeedRecord, FeedSource};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Record detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Latest reading with per-metric classification.
    Live,
    /// Filterable, paginated table of the full feed.
    History,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Live => View::History,
            View::History => View::Live,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Live => "Live",
            View::History => "History",
        }
    }
}

/// Which time bound the input mode is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl TimeField {
    pub fn label(&self) -> &'static str {
        match self {
            TimeField::Start => "Waktu Awal",
            TimeField::End => "Waktu Akhir",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn FeedSource>,
    /// Latest reading slot. Overwritten by each successful fetch,
    /// last-write-wins.
    pub latest: Option<FeedRecord>,
    /// Full feed history, `None` until the one-shot fetch lands.
    pub history: Option<Vec<FeedRecord>>,
    history_requested: bool,
    /// When the latest slot last changed.
    pub last_updated: Option<std::time::Instant>,
    /// Most recent live-fetch failure, surfaced in the status bar.
    pub live_error: Option<String>,
    /// History-fetch failure, shown in place of the table.
    pub history_error: Option<String>,

    // History view state
    pub criteria: FilterCriteria,
    /// Selected row within the current page.
    pub selected_row: usize,
    pub input_field: Option<TimeField>,
    pub input_text: String,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create a new App with the given feed source.
    pub fn new(source: Box<dyn FeedSource>) -> Self {
        Self {
            running: true,
            current_view: View::Live,
            show_help: false,
            show_detail_overlay: false,
            source,
            latest: None,
            history: None,
            history_requested: false,
            last_updated: None,
            live_error: None,
            history_error: None,
            criteria: FilterCriteria::default(),
            selected_row: 0,
            input_field: None,
            input_text: String::new(),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain pending events from the feed source.
    ///
    /// Returns Ok(true) if new data arrived. Failures never interrupt
    /// the views: the latest slot and the history slot each keep their
    /// previous contents.
    pub fn reload_data(&mut self) -> Result<bool> {
        let mut updated = false;

        while let Some(event) = self.source.poll() {
            match event {
                FeedEvent::Latest(record) => {
                    self.latest = Some(record);
                    self.last_updated = Some(std::time::Instant::now());
                    self.live_error = None;
                    updated = true;
                }
                FeedEvent::History(records) => {
                    self.history = Some(records);
                    self.history_error = None;
                    updated = true;
                }
                FeedEvent::LatestFailed(message) => {
                    self.live_error = Some(message);
                }
                FeedEvent::HistoryFailed(message) => {
                    self.history_error = Some(message);
                }
            }
        }

        Ok(updated)
    }

    /// Switch to a specific view.
    ///
    /// Entering the history view for the first time triggers the
    /// one-shot history fetch.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        if view == View::History && !self.history_requested {
            self.history_requested = true;
            self.source.request_history();
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Ask the source for a fresh reading ahead of its cadence.
    pub fn request_refresh(&mut self) {
        self.source.request_refresh();
    }

    /// Aggregate status across the three metrics of the latest reading.
    pub fn aggregate_tier(&self) -> Option<Tier> {
        let latest = self.latest.as_ref()?;
        let tiers: Vec<Tier> = classify_record(latest).iter().map(|(_, _, s)| s.tier).collect();
        Some(aggregate(&tiers))
    }

    /// The filtered history sliced to the current page.
    pub fn history_page(&self) -> Option<Page<'_>> {
        self.history.as_ref().map(|records| filter_and_paginate(records, &self.criteria))
    }

    /// Page count for the current filter, 0 while history is unloaded.
    pub fn total_pages(&self) -> usize {
        self.history_page().map(|p| p.total_pages).unwrap_or(0)
    }

    /// Jump to a page. Requests outside [1, total_pages] are a no-op,
    /// not an error.
    pub fn set_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.criteria.page = page;
            self.selected_row = 0;
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.criteria.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.criteria.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Move the row selection down by one within the current page.
    pub fn select_next(&mut self) {
        let max = self.history_page().map(|p| p.items.len()).unwrap_or(0).saturating_sub(1);
        self.selected_row = (self.selected_row + 1).min(max);
    }

    /// Move the row selection up by one.
    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// The record under the row selection, if any.
    pub fn selected_record(&self) -> Option<&FeedRecord> {
        let page = self.history_page()?;
        page.items.get(self.selected_row).copied()
    }

    /// Cycle the sensor column selector.
    pub fn cycle_sensor(&mut self) {
        self.criteria.sensor = self.criteria.sensor.next();
    }

    /// Clear the time-range filter.
    ///
    /// The current page is left alone: the page guard applies to page
    /// *requests*, not to filter changes.
    pub fn clear_filters(&mut self) {
        self.criteria.start = None;
        self.criteria.end = None;
    }

    /// Enter time input mode for the given bound.
    pub fn start_time_input(&mut self, field: TimeField) {
        self.input_field = Some(field);
        self.input_text.clear();
    }

    /// Exit time input mode without applying.
    pub fn cancel_time_input(&mut self) {
        self.input_field = None;
        self.input_text.clear();
    }

    /// Append a character to the time input.
    pub fn input_push(&mut self, c: char) {
        self.input_text.push(c);
    }

    /// Remove the last character from the time input.
    pub fn input_pop(&mut self) {
        self.input_text.pop();
    }

    /// Parse the time input and apply it to the bound being edited.
    ///
    /// An empty input clears the bound; an unparseable one leaves the
    /// criteria unchanged and flashes a status message.
    pub fn apply_time_input(&mut self) {
        let Some(field) = self.input_field.take() else {
            return;
        };
        let text = std::mem::take(&mut self.input_text);

        if text.trim().is_empty() {
            match field {
                TimeField::Start => self.criteria.start = None,
                TimeField::End => self.criteria.end = None,
            }
            return;
        }

        match parse_time(&text) {
            Ok(t) => match field {
                TimeField::Start => self.criteria.start = Some(t),
                TimeField::End => self.criteria.end = Some(t),
            },
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    /// Open the detail overlay for the selected history row.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::History && self.selected_record().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then return to the live view.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Live {
            self.current_view = View::Live;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the latest classified reading to a JSON file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let Some(ref latest) = self.latest else {
            anyhow::bail!("No data to export");
        };

        let classified = classify_record(latest);

        let metrics: Vec<serde_json::Value> = classified
            .iter()
            .map(|(metric, value, status)| {
                serde_json::json!({
                    "metric": metric.label(),
                    "value": if value.is_nan() {
                        serde_json::Value::Null
                    } else {
                        serde_json::json!(value)
                    },
                    "tier": status.tier.symbol(),
                    "description": status.description,
                })
            })
            .collect();

        let tiers: Vec<Tier> = classified.iter().map(|(_, _, s)| s.tier).collect();

        let export = serde_json::json!({
            "created_at": latest.created_at.to_rfc3339(),
            "entry_id": latest.entry_id,
            "metrics": metrics,
            "status": aggregate(&tiers).symbol(),
            "history_records": self.history.as_ref().map(|h| h.len()).unwrap_or(0),
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChannelSource;
    use chrono::{TimeZone, Utc};

    fn record(minute: u32) -> FeedRecord {
        FeedRecord {
            created_at: Utc.with_ymd_and_hms(2024, 11, 23, 10, minute, 0).unwrap(),
            entry_id: minute as i64,
            field1: Some("7.0".to_string()),
            field2: Some("10".to_string()),
            field3: Some("300".to_string()),
        }
    }

    fn app_with_history(n: u32) -> App {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));
        tx.send(FeedEvent::History((0..n).map(record).collect())).unwrap();
        app.reload_data().unwrap();
        app
    }

    #[test]
    fn test_page_requests_outside_range_are_no_ops() {
        let mut app = app_with_history(25);
        assert_eq!(app.total_pages(), 3);
        assert_eq!(app.criteria.page, 1);

        app.set_page(0);
        assert_eq!(app.criteria.page, 1);

        app.set_page(4);
        assert_eq!(app.criteria.page, 1);

        app.set_page(3);
        assert_eq!(app.criteria.page, 3);

        app.next_page();
        assert_eq!(app.criteria.page, 3);
    }

    #[test]
    fn test_latest_slot_is_last_write_wins() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));

        tx.send(FeedEvent::Latest(record(1))).unwrap();
        tx.send(FeedEvent::Latest(record(2))).unwrap();
        app.reload_data().unwrap();

        assert_eq!(app.latest.as_ref().unwrap().entry_id, 2);
    }

    #[test]
    fn test_failures_keep_previous_data() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));

        tx.send(FeedEvent::Latest(record(1))).unwrap();
        app.reload_data().unwrap();
        tx.send(FeedEvent::LatestFailed("boom".to_string())).unwrap();
        app.reload_data().unwrap();

        assert_eq!(app.latest.as_ref().unwrap().entry_id, 1);
        assert_eq!(app.live_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_aggregate_tier_danger_dominates() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));

        let mut bad = record(1);
        bad.field1 = Some("6.0".to_string()); // acidic -> Danger
        tx.send(FeedEvent::Latest(bad)).unwrap();
        app.reload_data().unwrap();

        assert_eq!(app.aggregate_tier(), Some(Tier::Danger));
    }

    #[test]
    fn test_time_input_applies_and_clears() {
        let mut app = app_with_history(10);

        app.start_time_input(TimeField::Start);
        for c in "2024-11-23 10:05".chars() {
            app.input_push(c);
        }
        app.apply_time_input();

        assert!(app.criteria.start.is_some());
        assert_eq!(app.history_page().unwrap().filtered_count, 5);

        // An empty input clears the bound again.
        app.start_time_input(TimeField::Start);
        app.apply_time_input();
        assert!(app.criteria.start.is_none());
    }

    #[test]
    fn test_invalid_time_input_leaves_criteria_unchanged() {
        let mut app = app_with_history(10);

        app.start_time_input(TimeField::End);
        for c in "next tuesday".chars() {
            app.input_push(c);
        }
        app.apply_time_input();

        assert!(app.criteria.end.is_none());
        assert!(app.get_status_message().is_some());
    }

    #[test]
    fn test_filter_change_does_not_snap_page_back() {
        let mut app = app_with_history(25);
        app.set_page(3);

        // Narrow the range so only one page remains; the view stays on
        // page 3 and simply shows an empty page.
        app.start_time_input(TimeField::End);
        for c in "2024-11-23 10:04".chars() {
            app.input_push(c);
        }
        app.apply_time_input();

        assert_eq!(app.criteria.page, 3);
        assert_eq!(app.total_pages(), 1);
        assert!(app.history_page().unwrap().items.is_empty());
    }

    #[test]
    fn test_detail_overlay_needs_a_row() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source));
        tx.send(FeedEvent::History(Vec::new())).unwrap();
        app.reload_data().unwrap();

        app.set_view(View::History);
        app.enter_detail();
        assert!(!app.show_detail_overlay);
    }
}
