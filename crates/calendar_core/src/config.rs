//! Application-wide configuration constants.
//!
//! # Responsibility
//! - Hold build metadata, calendar defaults and storage key names.
//!
//! # Invariants
//! - Storage keys are distinct so store slices never overwrite each other.

use crate::model::settings::{CalendarView, WeekStartDay};

/// Static application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub version: &'static str,
    pub build_number: &'static str,
    pub default_start_of_week: WeekStartDay,
    pub default_view: CalendarView,
    /// Reported by the build; the runtime answer comes from the platform.
    pub dynamic_colors_available: bool,
    pub default_event_color: &'static str,
    /// Declared per-day cap. Reported by `EventsStore::is_day_full`, not
    /// enforced on create.
    pub max_events_per_day: usize,
    pub storage_keys: StorageKeys,
}

/// Namespaced keys of the persisted store slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageKeys {
    pub events: &'static str,
    pub settings: &'static str,
    pub theme: &'static str,
}

pub const APP_CONFIG: AppConfig = AppConfig {
    version: "1.0.0",
    build_number: "1",
    default_start_of_week: WeekStartDay::Monday,
    default_view: CalendarView::Month,
    dynamic_colors_available: true,
    default_event_color: "#2196F3",
    max_events_per_day: 50,
    storage_keys: StorageKeys {
        events: "calendar_events",
        settings: "user_settings",
        theme: "theme_preferences",
    },
};
