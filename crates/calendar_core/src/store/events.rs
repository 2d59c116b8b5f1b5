//! Events store: CRUD and day/month queries over the event collection.
//!
//! # Invariants
//! - Event ids are unique within `events`.
//! - Persisted slice is `{events, selectedDate}` under `calendar_events`.
//! - Date queries compare calendar days only (ISO date prefix), inclusive
//!   on both ends.

use crate::config::APP_CONFIG;
use crate::messages::FailedAction;
use crate::model::date::{month_bounds, to_day_key, today};
use crate::model::event::{generate_event_id, CreateEventRequest, Event, EventId, UpdateEventRequest};
use crate::model::settings::Language;
use crate::storage::{read_slice, write_slice, KeyValueStorage, StorageError};
use crate::store::{StoreError, StoreResult, SLICE_VERSION};
use chrono::NaiveDate;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventsSliceRef<'a> {
    events: &'a [Event],
    selected_date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsSlice {
    events: Vec<Event>,
    selected_date: NaiveDate,
}

/// Owner of the event collection and the selected calendar day.
pub struct EventsStore<S: KeyValueStorage> {
    storage: S,
    events: Vec<Event>,
    selected_date: NaiveDate,
    loading: bool,
    error: Option<String>,
    language: Language,
}

impl<S: KeyValueStorage> EventsStore<S> {
    /// Creates an empty store with today selected. Call `load_events` to
    /// rehydrate.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            events: Vec::new(),
            selected_date: today(),
            loading: false,
            error: None,
            language: Language::default(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Locale used for `error` messages.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Appends a new event with a fresh id and persists the collection.
    ///
    /// `all_day` defaults to `false` and `color` to the configured default
    /// event colour.
    pub fn create_event(&mut self, request: CreateEventRequest) -> StoreResult<Event> {
        self.begin();

        let id = self.fresh_id();
        let event = Event::from_request(id, request, APP_CONFIG.default_event_color);
        self.events.push(event.clone());

        self.persist_or_rollback(FailedAction::CreateEvent, |store| {
            store.events.pop();
        })?;
        info!(
            "event=event_create module=events status=ok event_id={} total={}",
            event.id,
            self.events.len()
        );
        Ok(event)
    }

    /// Merges present fields onto the event with `request.id`.
    ///
    /// Returns `Ok(None)` without writing when no event has that id.
    pub fn update_event(&mut self, request: &UpdateEventRequest) -> StoreResult<Option<Event>> {
        self.begin();

        let Some(index) = self.position(&request.id) else {
            self.loading = false;
            warn!(
                "event=event_update module=events status=skipped reason=not_found event_id={}",
                request.id
            );
            return Ok(None);
        };

        let previous = self.events[index].clone();
        self.events[index].apply_update(request);
        let updated = self.events[index].clone();

        self.persist_or_rollback(FailedAction::UpdateEvent, move |store| {
            store.events[index] = previous;
        })?;
        info!(
            "event=event_update module=events status=ok event_id={}",
            updated.id
        );
        Ok(Some(updated))
    }

    /// Removes the event with `id`. Returns `Ok(false)` when absent.
    pub fn delete_event(&mut self, id: &str) -> StoreResult<bool> {
        self.begin();

        let Some(index) = self.position(id) else {
            self.loading = false;
            warn!("event=event_delete module=events status=skipped reason=not_found event_id={id}");
            return Ok(false);
        };

        let removed = self.events.remove(index);
        self.persist_or_rollback(FailedAction::DeleteEvent, move |store| {
            store.events.insert(index, removed);
        })?;
        info!(
            "event=event_delete module=events status=ok event_id={id} total={}",
            self.events.len()
        );
        Ok(true)
    }

    /// Empties the collection and persists. Selected date is kept.
    pub fn clear_events(&mut self) -> StoreResult<()> {
        self.begin();

        let previous = std::mem::take(&mut self.events);
        let removed = previous.len();
        self.persist_or_rollback(FailedAction::ClearEvents, move |store| {
            store.events = previous;
        })?;
        info!("event=events_clear module=events status=ok removed={removed}");
        Ok(())
    }

    pub fn get_event_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Events whose day span contains `date`.
    pub fn get_events_for_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| event.overlaps_days(date, date))
            .collect()
    }

    /// Events whose day span overlaps the calendar month.
    ///
    /// `month` is 1-based; an invalid month yields no events.
    pub fn get_events_for_month(&self, year: i32, month: u32) -> Vec<&Event> {
        let Some((month_start, month_end)) = month_bounds(year, month) else {
            warn!("event=events_for_month module=events status=skipped reason=invalid_month year={year} month={month}");
            return Vec::new();
        };

        self.events
            .iter()
            .filter(|event| event.overlaps_days(month_start, month_end))
            .collect()
    }

    pub fn count_events_for_date(&self, date: NaiveDate) -> usize {
        self.events
            .iter()
            .filter(|event| event.overlaps_days(date, date))
            .count()
    }

    /// Whether `date` already holds the configured maximum number of events.
    /// Creation is not blocked by this limit.
    pub fn is_day_full(&self, date: NaiveDate) -> bool {
        self.count_events_for_date(date) >= APP_CONFIG.max_events_per_day
    }

    /// Selects a calendar day and persists the slice.
    pub fn set_selected_date(&mut self, date: NaiveDate) -> StoreResult<()> {
        self.begin();

        let previous = std::mem::replace(&mut self.selected_date, date);
        self.persist_or_rollback(FailedAction::SaveEvents, move |store| {
            store.selected_date = previous;
        })
    }

    /// Replaces in-memory state with the persisted slice, if one exists.
    pub fn load_events(&mut self) -> StoreResult<()> {
        self.begin();

        match read_slice::<_, EventsSlice>(&self.storage, APP_CONFIG.storage_keys.events, SLICE_VERSION) {
            Ok(Some(slice)) => {
                self.events = slice.events;
                self.selected_date = slice.selected_date;
                self.loading = false;
                info!(
                    "event=events_load module=events status=ok total={}",
                    self.events.len()
                );
                Ok(())
            }
            Ok(None) => {
                self.loading = false;
                info!("event=events_load module=events status=ok total=0 source=empty");
                Ok(())
            }
            Err(source) => Err(self.fail(FailedAction::LoadEvents, source)),
        }
    }

    /// Writes the current slice.
    pub fn save_events(&mut self) -> StoreResult<()> {
        self.persist()
            .map_err(|source| self.fail(FailedAction::SaveEvents, source))
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }

    fn fresh_id(&self) -> EventId {
        loop {
            let id = generate_event_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let slice = EventsSliceRef {
            events: &self.events,
            selected_date: self.selected_date,
        };
        write_slice(
            &self.storage,
            APP_CONFIG.storage_keys.events,
            SLICE_VERSION,
            &slice,
        )
    }

    fn persist_or_rollback(
        &mut self,
        action: FailedAction,
        rollback: impl FnOnce(&mut Self),
    ) -> StoreResult<()> {
        match self.persist() {
            Ok(()) => {
                self.loading = false;
                Ok(())
            }
            Err(source) => {
                rollback(self);
                Err(self.fail(action, source))
            }
        }
    }

    fn fail(&mut self, action: FailedAction, source: StorageError) -> StoreError {
        error!(
            "event=events_persist module=events status=error action={action:?} selected_date={} error={source}",
            to_day_key(self.selected_date)
        );
        self.loading = false;
        self.error = Some(action.message(self.language).to_string());
        StoreError::Storage { action, source }
    }
}
