mod common;

use calendar_core::db::open_db_in_memory;
use calendar_core::{
    CreateEventRequest, EventsStore, Language, MemoryStorage, SqliteKeyValueStorage,
    StoreError, UpdateEventRequest, APP_CONFIG,
};
use chrono::NaiveDate;
use common::FlakyStorage;
use std::collections::HashSet;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn request(title: &str, start: &str, end: &str) -> CreateEventRequest {
    CreateEventRequest::new(title, start, end)
}

#[test]
fn create_assigns_unique_ids_and_defaults() {
    let mut store = EventsStore::new(MemoryStorage::new());

    let mut ids = HashSet::new();
    for index in 0..50 {
        let event = store
            .create_event(request(
                &format!("Event {index}"),
                "2024-01-10T09:00:00Z",
                "2024-01-10T10:00:00Z",
            ))
            .unwrap();
        assert!(ids.insert(event.id.clone()));
        assert!(!event.all_day);
        assert_eq!(event.color.as_deref(), Some(APP_CONFIG.default_event_color));
    }

    assert_eq!(store.events().len(), 50);
    assert!(!store.is_loading());
    assert!(store.error().is_none());
}

#[test]
fn create_keeps_explicit_color_and_all_day() {
    let mut store = EventsStore::new(MemoryStorage::new());
    let mut input = request("Holiday", "2024-05-01", "2024-05-01");
    input.all_day = Some(true);
    input.color = Some("#FF5722".to_string());

    let event = store.create_event(input).unwrap();
    assert!(event.all_day);
    assert_eq!(event.color.as_deref(), Some("#FF5722"));
}

#[test]
fn multi_day_event_appears_on_every_covered_day() {
    let mut store = EventsStore::new(MemoryStorage::new());
    let event = store
        .create_event(request(
            "Conference",
            "2024-01-10T09:00:00Z",
            "2024-01-12T18:00:00Z",
        ))
        .unwrap();

    for covered in [day(2024, 1, 10), day(2024, 1, 11), day(2024, 1, 12)] {
        let found = store.get_events_for_date(covered);
        assert_eq!(found.len(), 1, "missing on {covered}");
        assert_eq!(found[0].id, event.id);
    }
    assert!(store.get_events_for_date(day(2024, 1, 9)).is_empty());
    assert!(store.get_events_for_date(day(2024, 1, 13)).is_empty());
}

#[test]
fn month_query_includes_overlapping_events_only() {
    let mut store = EventsStore::new(MemoryStorage::new());
    let spanning = store
        .create_event(request("Spanning", "2024-01-28", "2024-02-02"))
        .unwrap();
    let inside = store
        .create_event(request("Inside", "2024-02-29T08:00:00Z", "2024-02-29T09:00:00Z"))
        .unwrap();
    store
        .create_event(request("March", "2024-03-01", "2024-03-02"))
        .unwrap();

    let ids: Vec<_> = store
        .get_events_for_month(2024, 2)
        .into_iter()
        .map(|event| event.id.clone())
        .collect();
    assert_eq!(ids, vec![spanning.id, inside.id]);
}

#[test]
fn invalid_month_yields_no_events() {
    let mut store = EventsStore::new(MemoryStorage::new());
    store
        .create_event(request("Any", "2024-01-01", "2024-12-31"))
        .unwrap();

    assert!(store.get_events_for_month(2024, 0).is_empty());
    assert!(store.get_events_for_month(2024, 13).is_empty());
}

#[test]
fn events_with_unparseable_dates_are_excluded_from_queries() {
    let mut store = EventsStore::new(MemoryStorage::new());
    store
        .create_event(request("Broken", "someday", "2024-01-10"))
        .unwrap();

    assert_eq!(store.events().len(), 1);
    assert!(store.get_events_for_date(day(2024, 1, 10)).is_empty());
    assert!(store.get_events_for_month(2024, 1).is_empty());
}

#[test]
fn update_merges_present_fields() {
    let mut store = EventsStore::new(MemoryStorage::new());
    let mut input = request("Draft", "2024-01-10", "2024-01-10");
    input.location = Some("Room 4".to_string());
    let event = store.create_event(input).unwrap();

    let mut update = UpdateEventRequest::new(event.id.clone());
    update.title = Some("Final".to_string());
    update.end_date = Some("2024-01-11".to_string());
    let updated = store.update_event(&update).unwrap().unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.end_date, "2024-01-11");
    assert_eq!(updated.location.as_deref(), Some("Room 4"));
    assert_eq!(store.get_event_by_id(&event.id), Some(&updated));
    assert_eq!(store.get_events_for_date(day(2024, 1, 11)).len(), 1);
}

#[test]
fn update_and_delete_of_unknown_id_change_nothing() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    store
        .create_event(request("Kept", "2024-01-10", "2024-01-10"))
        .unwrap();
    let before = store.events().to_vec();
    let persisted = storage.raw(APP_CONFIG.storage_keys.events);

    let mut update = UpdateEventRequest::new("missing");
    update.title = Some("Ghost".to_string());
    assert_eq!(store.update_event(&update).unwrap(), None);
    assert!(!store.delete_event("missing").unwrap());

    assert_eq!(store.events(), before.as_slice());
    assert_eq!(storage.raw(APP_CONFIG.storage_keys.events), persisted);
    assert!(store.error().is_none());
}

#[test]
fn delete_removes_event() {
    let mut store = EventsStore::new(MemoryStorage::new());
    let first = store
        .create_event(request("First", "2024-01-10", "2024-01-10"))
        .unwrap();
    let second = store
        .create_event(request("Second", "2024-01-10", "2024-01-10"))
        .unwrap();

    assert!(store.delete_event(&first.id).unwrap());
    assert!(store.get_event_by_id(&first.id).is_none());
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].id, second.id);
}

#[test]
fn state_survives_reload_through_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::new(&conn);

    let mut store = EventsStore::new(storage);
    let created = store
        .create_event(request("Persisted", "2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z"))
        .unwrap();
    store.set_selected_date(day(2024, 6, 1)).unwrap();

    let mut reloaded = EventsStore::new(storage);
    reloaded.load_events().unwrap();
    assert_eq!(reloaded.events(), &[created]);
    assert_eq!(reloaded.selected_date(), day(2024, 6, 1));
    assert!(!reloaded.is_loading());
    assert!(reloaded.error().is_none());
}

#[test]
fn persisted_slice_uses_envelope_shape() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    store
        .create_event(request("Shape", "2024-01-10", "2024-01-10"))
        .unwrap();

    let raw = storage.raw(APP_CONFIG.storage_keys.events).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 0);
    assert_eq!(value["state"]["events"][0]["title"], "Shape");
    assert!(value["state"]["selectedDate"].is_string());
    assert!(value["state"].get("loading").is_none());
}

#[test]
fn failed_create_rolls_back_and_sets_error() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    storage.fail_writes(true);

    let err = store
        .create_event(request("Lost", "2024-01-10", "2024-01-10"))
        .unwrap_err();

    assert!(matches!(err, StoreError::Storage { .. }));
    assert!(store.events().is_empty());
    assert_eq!(store.error(), Some("Не удалось создать событие"));
    assert!(!store.is_loading());

    storage.fail_writes(false);
    store.clear_error();
    assert!(store.error().is_none());
}

#[test]
fn failed_update_and_delete_restore_previous_event() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    store.set_language(Language::En);
    let event = store
        .create_event(request("Original", "2024-01-10", "2024-01-10"))
        .unwrap();

    storage.fail_writes(true);
    let mut update = UpdateEventRequest::new(event.id.clone());
    update.title = Some("Changed".to_string());
    assert!(store.update_event(&update).is_err());
    assert_eq!(store.get_event_by_id(&event.id), Some(&event));
    assert_eq!(store.error(), Some("Could not update the event"));

    assert!(store.delete_event(&event.id).is_err());
    assert_eq!(store.events(), &[event]);
    assert_eq!(store.error(), Some("Could not delete the event"));
}

#[test]
fn failed_load_reports_error_and_keeps_state() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    store
        .create_event(request("Local", "2024-01-10", "2024-01-10"))
        .unwrap();

    storage.fail_reads(true);
    assert!(store.load_events().is_err());
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.error(), Some("Не удалось загрузить события"));
}

#[test]
fn corrupt_slice_loads_as_empty() {
    let storage = MemoryStorage::new();
    calendar_core::KeyValueStorage::set_item(&storage, APP_CONFIG.storage_keys.events, "{not json")
        .unwrap();

    let mut store = EventsStore::new(storage);
    store.load_events().unwrap();
    assert!(store.events().is_empty());
    assert!(store.error().is_none());
}

#[test]
fn clear_events_keeps_selected_date() {
    let mut store = EventsStore::new(MemoryStorage::new());
    store.set_selected_date(day(2024, 2, 14)).unwrap();
    store
        .create_event(request("Gone", "2024-02-14", "2024-02-14"))
        .unwrap();

    store.clear_events().unwrap();
    assert!(store.events().is_empty());
    assert_eq!(store.selected_date(), day(2024, 2, 14));
}

#[test]
fn day_capacity_is_reported_without_blocking_creation() {
    let mut store = EventsStore::new(MemoryStorage::new());
    let busy_day = day(2024, 3, 5);
    for index in 0..APP_CONFIG.max_events_per_day {
        store
            .create_event(request(&format!("Slot {index}"), "2024-03-05", "2024-03-05"))
            .unwrap();
    }
    assert!(store.is_day_full(busy_day));
    assert!(!store.is_day_full(day(2024, 3, 6)));

    store
        .create_event(request("Overflow", "2024-03-05", "2024-03-05"))
        .unwrap();
    assert_eq!(
        store.count_events_for_date(busy_day),
        APP_CONFIG.max_events_per_day + 1
    );
}

#[test]
fn failed_clear_reports_collection_message_and_restores_events() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    store
        .create_event(request("Kept", "2024-01-10", "2024-01-10"))
        .unwrap();

    storage.fail_writes(true);
    assert!(store.clear_events().is_err());
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.error(), Some("Не удалось удалить события"));
}

#[test]
fn set_selected_date_clears_stale_error_and_rolls_back_on_failure() {
    let storage = FlakyStorage::new();
    let mut store = EventsStore::new(storage.clone());
    store.set_selected_date(day(2024, 4, 1)).unwrap();

    storage.fail_writes(true);
    assert!(store
        .create_event(request("Lost", "2024-04-01", "2024-04-01"))
        .is_err());
    assert!(store.error().is_some());

    assert!(store.set_selected_date(day(2024, 4, 2)).is_err());
    assert_eq!(store.selected_date(), day(2024, 4, 1));
    assert_eq!(store.error(), Some("Не удалось сохранить события"));
    assert!(!store.is_loading());

    storage.fail_writes(false);
    store.set_selected_date(day(2024, 4, 2)).unwrap();
    assert_eq!(store.selected_date(), day(2024, 4, 2));
    assert!(store.error().is_none());
}
