// src/calendar/mod.rs - Month/week calendar with per-day events

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{CalendarEvent, NewCalendarEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    #[default]
    Month,
    Week,
}

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// `YYYY-MM-DD`, the key events are grouped under.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Sunday-first weeks covering `month`, padded with neighbouring days.
pub fn month_grid(month: NaiveDate) -> Vec<[NaiveDate; 7]> {
    let first = first_of_month(month);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);

    let mut weeks = Vec::with_capacity(6);
    let mut start = week_start(first);
    while start <= last {
        weeks.push(week_of(start));
        start += Duration::days(7);
    }
    weeks
}

/// The seven days of the Sunday-first week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    month: NaiveDate,
    selected: NaiveDate,
    mode: CalendarMode,
    events: BTreeMap<String, Vec<String>>,
    draft: Option<String>,
    error: Option<String>,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            selected: today,
            mode: CalendarMode::Month,
            events: BTreeMap::new(),
            draft: None,
            error: None,
        }
    }

    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn selected_label(&self) -> String {
        self.selected.format("%B %-d, %Y").to_string()
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CalendarMode) {
        self.mode = mode;
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.month.checked_add_months(Months::new(1)) {
            self.month = next;
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(previous) = self.month.checked_sub_months(Months::new(1)) {
            self.month = previous;
        }
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn weeks(&self) -> Vec<[NaiveDate; 7]> {
        match self.mode {
            CalendarMode::Month => month_grid(self.month),
            CalendarMode::Week => vec![week_of(self.selected)],
        }
    }

    pub fn in_current_month(&self, date: NaiveDate) -> bool {
        date.year() == self.month.year() && date.month() == self.month.month()
    }

    pub fn events_on(&self, date: NaiveDate) -> &[String] {
        self.events
            .get(&date_key(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn insert(&mut self, event: CalendarEvent) {
        self.events
            .entry(date_key(event.date))
            .or_default()
            .push(event.title);
    }

    pub fn apply_events(&mut self, result: Result<Vec<CalendarEvent>>) {
        match result {
            Ok(events) => {
                tracing::debug!(count = events.len(), "events loaded");
                self.events.clear();
                for event in events {
                    self.insert(event);
                }
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch events");
                self.error = Some(e.user_message("Failed to fetch events"));
            }
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        let result = api.list_events().await;
        self.apply_events(result);
    }

    // New-event form

    /// Selects `date` and opens an empty event form for it.
    pub fn open_new_event(&mut self, date: NaiveDate) {
        self.selected = date;
        self.draft = Some(String::new());
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = text.into();
        }
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn cancel_new_event(&mut self) {
        self.draft = None;
    }

    /// The event to create, or `None` while the text is blank.
    pub fn pending_event(&self) -> Option<NewCalendarEvent> {
        let title = self.draft.as_deref()?.trim();
        if title.is_empty() {
            return None;
        }
        Some(NewCalendarEvent {
            date: self.selected,
            title: title.to_string(),
        })
    }

    pub fn apply_created(&mut self, result: Result<CalendarEvent>) {
        match result {
            Ok(event) => {
                tracing::info!(date = %event.date, "event added");
                self.insert(event);
                self.draft = None;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to add event");
                self.error = Some(e.user_message("Failed to add event"));
            }
        }
    }

    pub async fn add_event(&mut self, api: &ApiClient) {
        let Some(event) = self.pending_event() else {
            return;
        };
        let result = api.create_event(&event).await;
        self.apply_created(result);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
