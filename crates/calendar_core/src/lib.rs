//! Core domain logic for the calendar app.
//! This crate is the single source of truth for event, settings and theme
//! state and the invariants that govern them.

pub mod config;
pub mod db;
pub mod logging;
pub mod messages;
pub mod model;
pub mod navigation;
pub mod platform;
pub mod storage;
pub mod store;
pub mod theme;

pub use config::{AppConfig, StorageKeys, APP_CONFIG};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{CreateEventRequest, Event, EventId, UpdateEventRequest};
pub use model::settings::{
    CalendarView, DateFormat, Language, Settings, SettingsPatch, ThemeMode, TimeFormat,
    WeekStartDay,
};
pub use model::validation::{validate_create_request, EventValidationError};
pub use navigation::{NavigationStack, Route};
pub use platform::{
    AppearanceHub, AppearanceSource, AppearanceSubscription, ColorScheme, DynamicColorProvider,
    StaticDynamicColors,
};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteKeyValueStorage, StorageError};
pub use store::events::EventsStore;
pub use store::root::RootStore;
pub use store::settings::SettingsStore;
pub use store::theme::ThemeStore;
pub use store::{StoreError, StoreKind, StoreResult};
pub use theme::{CalendarTheme, MonetPalette, PaletteSource, PaperTheme};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
