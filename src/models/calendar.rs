// src/models/calendar.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: NaiveDate,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCalendarEvent {
    pub date: NaiveDate,
    pub title: String,
}
