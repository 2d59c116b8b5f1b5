//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level store actions to Dart via FRB.
//! - Carry complex payloads as JSON strings in camelCase, matching the
//!   persisted slice shapes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call runs against a freshly initialized `RootStore` over the
//!   shared SQLite file, so state never lives only in FFI memory.
//! - Host-pushed platform state (appearance, dynamic palette) is kept
//!   process-wide and handed to each store as its platform collaborator.

use calendar_core::db::open_db;
use calendar_core::model::date::{parse_day_key, to_day_key};
use calendar_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner, validate_create_request,
    AppearanceHub, ColorScheme, CreateEventRequest, Language, MonetPalette, RootStore, Route,
    SettingsPatch, SqliteKeyValueStorage, StaticDynamicColors, ThemeMode, UpdateEventRequest,
};
use log::warn;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

const CALENDAR_DB_FILE_NAME: &str = "calendar.sqlite3";
static CALENDAR_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APPEARANCE: OnceLock<AppearanceHub> = OnceLock::new();
static DYNAMIC_PALETTE: Mutex<Option<MonetPalette>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Level used when the host has no preference (`debug` or `info`).
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// JSON payload on success (event, list, settings or theme).
    pub payload_json: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl CalendarActionResponse {
    fn success(message: impl Into<String>, payload_json: String) -> Self {
        Self {
            ok: true,
            payload_json: Some(payload_json),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload_json: None,
            message: message.into(),
        }
    }
}

/// Creates an event from a `CreateEventRequest` JSON object.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Rejects invalid title, date range or colour before touching storage.
/// - Returns the created event JSON, including its generated `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn events_create(request_json: String) -> CalendarActionResponse {
    let request: CreateEventRequest = match serde_json::from_str(&request_json) {
        Ok(request) => request,
        Err(err) => {
            return CalendarActionResponse::failure(format!("events_create invalid request: {err}"))
        }
    };
    if let Err(err) = validate_create_request(&request) {
        return CalendarActionResponse::failure(format!(
            "events_create invalid {}: {err}",
            err.field()
        ));
    }

    with_root_store("events_create", "Event created.", |store| {
        store
            .events_mut()
            .create_event(request)
            .map_err(|err| err.to_string())
    })
}

/// Applies an `UpdateEventRequest` JSON object.
///
/// Unknown ids fail with `event not found` and write nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn events_update(request_json: String) -> CalendarActionResponse {
    let request: UpdateEventRequest = match serde_json::from_str(&request_json) {
        Ok(request) => request,
        Err(err) => {
            return CalendarActionResponse::failure(format!("events_update invalid request: {err}"))
        }
    };

    with_root_store("events_update", "Event updated.", |store| {
        store
            .events_mut()
            .update_event(&request)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("event not found: {}", request.id))
    })
}

/// Deletes an event by id. Unknown ids fail with `event not found`.
#[flutter_rust_bridge::frb(sync)]
pub fn events_delete(event_id: String) -> CalendarActionResponse {
    let event_id = event_id.trim().to_string();
    with_root_store("events_delete", "Event deleted.", |store| {
        match store.events_mut().delete_event(&event_id) {
            Ok(true) => Ok(json!({ "id": event_id })),
            Ok(false) => Err(format!("event not found: {event_id}")),
            Err(err) => Err(err.to_string()),
        }
    })
}

/// Loads one event by id.
#[flutter_rust_bridge::frb(sync)]
pub fn events_get(event_id: String) -> CalendarActionResponse {
    let event_id = event_id.trim().to_string();
    with_root_store("events_get", "Event loaded.", |store| {
        store
            .events()
            .get_event_by_id(&event_id)
            .cloned()
            .ok_or_else(|| format!("event not found: {event_id}"))
    })
}

/// Lists events covering `date` (`YYYY-MM-DD` or any ISO timestamp).
#[flutter_rust_bridge::frb(sync)]
pub fn events_for_date(date: String) -> CalendarActionResponse {
    let Some(day) = parse_day_key(&date) else {
        return CalendarActionResponse::failure(format!("events_for_date invalid date: {date}"));
    };
    with_root_store("events_for_date", "Events loaded.", |store| {
        let events = store.events();
        Ok(json!({
            "date": to_day_key(day),
            "events": events.get_events_for_date(day),
            "isDayFull": events.is_day_full(day),
        }))
    })
}

/// Lists events overlapping a calendar month (`month` is 1-based).
///
/// An invalid month returns an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn events_for_month(year: i32, month: u32) -> CalendarActionResponse {
    with_root_store("events_for_month", "Events loaded.", |store| {
        Ok(store
            .events()
            .get_events_for_month(year, month)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>())
    })
}

/// Persists the selected calendar day.
#[flutter_rust_bridge::frb(sync)]
pub fn events_set_selected_date(date: String) -> CalendarActionResponse {
    let Some(day) = parse_day_key(&date) else {
        return CalendarActionResponse::failure(format!(
            "events_set_selected_date invalid date: {date}"
        ));
    };
    with_root_store("events_set_selected_date", "Date selected.", |store| {
        store
            .events_mut()
            .set_selected_date(day)
            .map_err(|err| err.to_string())?;
        Ok(json!({ "selectedDate": to_day_key(day) }))
    })
}

/// Returns the full settings record.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> CalendarActionResponse {
    with_root_store("settings_get", "Settings loaded.", |store| {
        Ok(store.settings().settings().clone())
    })
}

/// Merges a partial settings JSON object and returns the full record.
///
/// Theme mode and dynamic-colour changes are applied to the theme too.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_update(patch_json: String) -> CalendarActionResponse {
    let patch: SettingsPatch = match serde_json::from_str(&patch_json) {
        Ok(patch) => patch,
        Err(err) => {
            return CalendarActionResponse::failure(format!("settings_update invalid patch: {err}"))
        }
    };
    with_root_store("settings_update", "Settings updated.", |store| {
        store.update_settings(&patch).map_err(|err| err.to_string())
    })
}

/// Restores default settings.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_reset() -> CalendarActionResponse {
    with_root_store("settings_reset", "Settings reset.", |store| {
        store
            .settings_mut()
            .reset_settings()
            .cloned()
            .map_err(|err| err.to_string())
    })
}

/// Returns the derived Paper theme plus calendar widget colours.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_current() -> CalendarActionResponse {
    with_root_store("theme_current", "Theme loaded.", |store| {
        Ok(theme_payload(store))
    })
}

/// Sets `light|dark|system` and returns the recomputed theme.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set_mode(mode: String) -> CalendarActionResponse {
    let Some(mode) = ThemeMode::parse(&mode) else {
        return CalendarActionResponse::failure(format!("theme_set_mode invalid mode: {mode}"));
    };
    with_root_store("theme_set_mode", "Theme mode updated.", |store| {
        store
            .update_settings(&SettingsPatch {
                theme: Some(mode),
                ..SettingsPatch::default()
            })
            .map_err(|err| err.to_string())?;
        Ok(theme_payload(store))
    })
}

/// Enables or disables dynamic colours and returns the recomputed theme.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set_dynamic_colors(enabled: bool) -> CalendarActionResponse {
    with_root_store("theme_set_dynamic_colors", "Dynamic colors updated.", |store| {
        store
            .update_settings(&SettingsPatch {
                dynamic_colors_enabled: Some(enabled),
                ..SettingsPatch::default()
            })
            .map_err(|err| err.to_string())?;
        Ok(theme_payload(store))
    })
}

/// Hands over the platform dynamic palette (29 MD3 roles as JSON).
///
/// The palette is remembered for the rest of the process and persisted.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set_monet_palette(palette_json: String) -> CalendarActionResponse {
    let palette: MonetPalette = match serde_json::from_str(&palette_json) {
        Ok(palette) => palette,
        Err(err) => {
            return CalendarActionResponse::failure(format!(
                "theme_set_monet_palette invalid palette: {err}"
            ))
        }
    };
    *DYNAMIC_PALETTE.lock().unwrap_or_else(PoisonError::into_inner) = Some(palette.clone());

    with_root_store("theme_set_monet_palette", "Palette updated.", |store| {
        store
            .theme_mut()
            .update_monet_palette(palette)
            .map_err(|err| err.to_string())?;
        Ok(theme_payload(store))
    })
}

/// Records the system appearance (`light`, `dark`, or empty for unknown).
///
/// # FFI contract
/// - Sync call, no DB access.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn set_system_color_scheme(scheme: String) -> String {
    let scheme = match scheme.trim() {
        "" => None,
        "light" => Some(ColorScheme::Light),
        "dark" => Some(ColorScheme::Dark),
        other => return format!("unsupported color scheme: {other}"),
    };
    appearance_hub().set_color_scheme(scheme);
    String::new()
}

/// Resets settings and deletes every event. Theme preferences are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_all_data() -> CalendarActionResponse {
    with_root_store("clear_all_data", "All data cleared.", |store| {
        store.clear_all_data().map_err(|err| err.to_string())?;
        Ok(json!({ "cleared": true }))
    })
}

/// Header title for a route JSON (`{"name": "EventEdit", "params": {..}}`).
///
/// Returns an empty string when the route hides its header or does not
/// parse.
#[flutter_rust_bridge::frb(sync)]
pub fn route_title(route_json: String, language: String) -> String {
    let language = Language::parse(&language).unwrap_or_default();
    serde_json::from_str::<Route>(&route_json)
        .ok()
        .and_then(|route| route.title(language))
        .unwrap_or_default()
        .to_owned()
}

fn theme_payload(store: &RootStore<SqliteKeyValueStorage<'_>>) -> serde_json::Value {
    let theme = store.theme();
    json!({
        "themeMode": theme.theme_mode(),
        "isDark": theme.is_dark(),
        "dynamicColorsEnabled": theme.dynamic_colors_enabled(),
        "dynamicColorsAvailable": theme.dynamic_colors_available(),
        "paperTheme": theme.paper_theme(),
        "calendarTheme": theme.calendar_theme(),
    })
}

fn resolve_calendar_db_path() -> PathBuf {
    CALENDAR_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("CALENDAR_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CALENDAR_DB_FILE_NAME)
        })
        .clone()
}

fn appearance_hub() -> &'static AppearanceHub {
    APPEARANCE.get_or_init(|| AppearanceHub::new(None))
}

fn dynamic_palette() -> Option<MonetPalette> {
    DYNAMIC_PALETTE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn open_calendar_db() -> Result<rusqlite::Connection, String> {
    open_db(resolve_calendar_db_path()).map_err(|err| format!("calendar DB open failed: {err}"))
}

fn with_root_store<T: Serialize>(
    action: &str,
    message: &str,
    f: impl FnOnce(&mut RootStore<SqliteKeyValueStorage<'_>>) -> Result<T, String>,
) -> CalendarActionResponse {
    let conn = match open_calendar_db() {
        Ok(conn) => conn,
        Err(err) => return CalendarActionResponse::failure(format!("{action} failed: {err}")),
    };

    let mut store = RootStore::new(
        SqliteKeyValueStorage::new(&conn),
        Arc::new(appearance_hub().clone()),
    );
    let provider = StaticDynamicColors(dynamic_palette());
    if let Err(err) = store.initialize_app(Some(&provider)) {
        warn!("event=ffi_call module=ffi status=error action={action} stage=initialize");
        return CalendarActionResponse::failure(format!("{action} failed: {err}"));
    }

    let outcome = f(&mut store).and_then(|payload| {
        serde_json::to_string(&payload).map_err(|err| format!("encode failed: {err}"))
    });
    match outcome {
        Ok(payload_json) => CalendarActionResponse::success(message, payload_json),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error action={action}");
            CalendarActionResponse::failure(format!("{action} failed: {err}"))
        }
    }
}
