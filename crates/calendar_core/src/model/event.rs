//! Calendar event model.
//!
//! # Responsibility
//! - Define the persisted event record and its create/update requests.
//! - Derive the day span used by date-range queries.
//!
//! # Invariants
//! - `id` is unique within one events collection.
//! - `start_date <= end_date` is expected but not enforced here; see
//!   `model::validation` for the optional checks.

use crate::model::date::parse_day_key;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Event identifier as stored in the persisted slice.
pub type EventId = String;

const ID_SUFFIX_LEN: usize = 11;

/// One calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 timestamp or date.
    pub start_date: String,
    /// ISO-8601 timestamp or date.
    pub end_date: String,
    pub all_day: bool,
    /// `#RRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// RFC 5545 RRULE, stored verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    /// ISO-8601 durations before start, e.g. `PT15M`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
}

impl Event {
    /// Builds an event from a create request, applying `all_day = false` and
    /// `default_color` when the request leaves them unset.
    pub fn from_request(id: EventId, request: CreateEventRequest, default_color: &str) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            all_day: request.all_day.unwrap_or(false),
            color: Some(
                request
                    .color
                    .unwrap_or_else(|| default_color.to_string()),
            ),
            recurrence_rule: request.recurrence_rule,
            reminders: request.reminders,
            location: request.location,
            attendees: request.attendees,
        }
    }

    /// Overwrites every field present in `update`; `update.id` is ignored.
    pub fn apply_update(&mut self, update: &UpdateEventRequest) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(start_date) = &update.start_date {
            self.start_date = start_date.clone();
        }
        if let Some(end_date) = &update.end_date {
            self.end_date = end_date.clone();
        }
        if let Some(all_day) = update.all_day {
            self.all_day = all_day;
        }
        if let Some(color) = &update.color {
            self.color = Some(color.clone());
        }
        if let Some(rule) = &update.recurrence_rule {
            self.recurrence_rule = Some(rule.clone());
        }
        if let Some(reminders) = &update.reminders {
            self.reminders = Some(reminders.clone());
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
        if let Some(attendees) = &update.attendees {
            self.attendees = Some(attendees.clone());
        }
    }

    /// Calendar days covered by this event, from the date prefix of
    /// `start_date`/`end_date`.
    ///
    /// Returns `None` when either bound is not a parseable ISO date.
    pub fn day_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = parse_day_key(&self.start_date)?;
        let end = parse_day_key(&self.end_date)?;
        Some((start, end))
    }

    /// Whether the inclusive day span overlaps `[from, to]`.
    pub fn overlaps_days(&self, from: NaiveDate, to: NaiveDate) -> bool {
        match self.day_span() {
            Some((start, end)) => start <= to && end >= from,
            None => false,
        }
    }
}

/// Input for creating an event. `id` is always assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub reminders: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
}

impl CreateEventRequest {
    pub fn new(
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Self::default()
        }
    }
}

/// Partial update keyed by `id`. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub id: EventId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub reminders: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
}

impl UpdateEventRequest {
    pub fn new(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Generates a time-ordered id: base-36 epoch millis plus a random suffix.
pub fn generate_event_id() -> EventId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", to_base36(millis), &suffix[..ID_SUFFIX_LEN])
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
