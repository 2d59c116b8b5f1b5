mod common;

use calendar_core::db::open_db;
use calendar_core::{
    CalendarView, DateFormat, Language, Settings, SettingsPatch, SettingsStore,
    SqliteKeyValueStorage, ThemeMode, TimeFormat, WeekStartDay, APP_CONFIG,
};
use common::FlakyStorage;

#[test]
fn new_store_starts_with_defaults() {
    let store = SettingsStore::new(FlakyStorage::new());
    let settings = store.settings();

    assert_eq!(settings, &Settings::default());
    assert_eq!(settings.start_of_week, APP_CONFIG.default_start_of_week);
    assert_eq!(settings.default_view, APP_CONFIG.default_view);
    assert_eq!(settings.language, Language::Ru);
}

#[test]
fn reset_then_update_overrides_single_field() {
    let mut store = SettingsStore::new(FlakyStorage::new());
    store.set_time_format(TimeFormat::H12).unwrap();
    store.set_analytics(true).unwrap();

    store.reset_settings().unwrap();
    let settings = store
        .update_settings(&SettingsPatch {
            theme: Some(ThemeMode::Dark),
            ..SettingsPatch::default()
        })
        .unwrap()
        .clone();

    assert_eq!(
        settings,
        Settings {
            theme: ThemeMode::Dark,
            ..Settings::default()
        }
    );
}

#[test]
fn setters_change_only_their_field() {
    let mut store = SettingsStore::new(FlakyStorage::new());

    store.set_start_of_week(WeekStartDay::Sunday).unwrap();
    store.set_default_view(CalendarView::Agenda).unwrap();
    store.set_date_format(DateFormat::Iso).unwrap();
    store.set_notifications(false).unwrap();
    store.set_default_reminder_time("PT1H").unwrap();
    store.set_dynamic_colors(false).unwrap();
    store.set_language(Language::En).unwrap();

    let settings = store.settings();
    assert_eq!(settings.start_of_week, WeekStartDay::Sunday);
    assert_eq!(settings.default_view, CalendarView::Agenda);
    assert_eq!(settings.date_format, DateFormat::Iso);
    assert!(!settings.notifications_enabled);
    assert_eq!(settings.default_reminder_time, "PT1H");
    assert!(!settings.dynamic_colors_enabled);
    assert_eq!(settings.language, Language::En);
    assert_eq!(settings.theme, ThemeMode::System);
    assert_eq!(settings.time_format, TimeFormat::H24);
}

#[test]
fn persisted_slice_wraps_full_record() {
    let storage = FlakyStorage::new();
    let mut store = SettingsStore::new(storage.clone());
    store.set_start_of_week(WeekStartDay::Sunday).unwrap();

    let raw = storage.raw(APP_CONFIG.storage_keys.settings).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 0);
    assert_eq!(value["state"]["settings"]["startOfWeek"], 0);
    assert_eq!(value["state"]["settings"]["defaultReminderTime"], "PT15M");
}

#[test]
fn failed_update_rolls_back() {
    let storage = FlakyStorage::new();
    let mut store = SettingsStore::new(storage.clone());
    storage.fail_writes(true);

    assert!(store.set_theme(ThemeMode::Light).is_err());
    assert_eq!(store.settings().theme, ThemeMode::System);
    assert_eq!(store.error(), Some("Не удалось обновить настройки"));
    assert!(!store.is_loading());

    assert!(store.reset_settings().is_err());
    assert_eq!(store.error(), Some("Не удалось сбросить настройки"));
}

#[test]
fn failed_language_change_reports_in_current_language() {
    let storage = FlakyStorage::new();
    let mut store = SettingsStore::new(storage.clone());
    storage.fail_writes(true);

    assert!(store.set_language(Language::En).is_err());
    assert_eq!(store.settings().language, Language::Ru);
    assert_eq!(store.error(), Some("Не удалось обновить настройки"));
}

#[test]
fn settings_survive_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = SettingsStore::new(SqliteKeyValueStorage::new(&conn));
        store.set_theme(ThemeMode::Dark).unwrap();
        store.set_time_format(TimeFormat::H12).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let mut store = SettingsStore::new(SqliteKeyValueStorage::new(&conn));
    store.load_settings().unwrap();
    assert_eq!(store.settings().theme, ThemeMode::Dark);
    assert_eq!(store.settings().time_format, TimeFormat::H12);
    assert!(store.error().is_none());
}

#[test]
fn load_without_slice_keeps_defaults() {
    let mut store = SettingsStore::new(FlakyStorage::new());
    store.load_settings().unwrap();
    assert_eq!(store.settings(), &Settings::default());
}
