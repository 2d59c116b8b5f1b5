//! User preference record.
//!
//! # Invariants
//! - `Settings` is always complete; partial input arrives as `SettingsPatch`
//!   and is merged onto a full record.
//! - Enumerated fields serialize to the same strings/numbers the UI layer
//!   persists (`"system"`, `"24h"`, `"DD/MM/YYYY"`, `1`, ...).

use serde::{Deserialize, Serialize};

/// Light/dark selection. `System` follows the platform appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// First day of the week; persisted as `0` (Sunday) or `1` (Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WeekStartDay {
    Sunday,
    Monday,
}

impl From<WeekStartDay> for u8 {
    fn from(value: WeekStartDay) -> Self {
        match value {
            WeekStartDay::Sunday => 0,
            WeekStartDay::Monday => 1,
        }
    }
}

impl TryFrom<u8> for WeekStartDay {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Sunday),
            1 => Ok(Self::Monday),
            other => Err(format!("invalid start of week `{other}`; expected 0 or 1")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
    Agenda,
}

impl CalendarView {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            "day" => Some(Self::Day),
            "agenda" => Some(Self::Agenda),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "24h")]
    H24,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

/// UI language; also selects the locale of store failure messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "ru" => Some(Self::Ru),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// Complete user preference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: ThemeMode,
    pub dynamic_colors_enabled: bool,
    pub start_of_week: WeekStartDay,
    pub default_view: CalendarView,
    pub time_format: TimeFormat,
    pub date_format: DateFormat,
    pub notifications_enabled: bool,
    /// ISO-8601 duration, e.g. `PT15M`.
    pub default_reminder_time: String,
    pub language: Language,
    pub analytics_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
            dynamic_colors_enabled: true,
            start_of_week: WeekStartDay::Monday,
            default_view: CalendarView::Month,
            time_format: TimeFormat::H24,
            date_format: DateFormat::DayMonthYear,
            notifications_enabled: true,
            default_reminder_time: "PT15M".to_string(),
            language: Language::Ru,
            analytics_enabled: false,
        }
    }
}

impl Settings {
    /// Returns a copy with every field present in `patch` overridden.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            theme: patch.theme.unwrap_or(self.theme),
            dynamic_colors_enabled: patch
                .dynamic_colors_enabled
                .unwrap_or(self.dynamic_colors_enabled),
            start_of_week: patch.start_of_week.unwrap_or(self.start_of_week),
            default_view: patch.default_view.unwrap_or(self.default_view),
            time_format: patch.time_format.unwrap_or(self.time_format),
            date_format: patch.date_format.unwrap_or(self.date_format),
            notifications_enabled: patch
                .notifications_enabled
                .unwrap_or(self.notifications_enabled),
            default_reminder_time: patch
                .default_reminder_time
                .clone()
                .unwrap_or_else(|| self.default_reminder_time.clone()),
            language: patch.language.unwrap_or(self.language),
            analytics_enabled: patch.analytics_enabled.unwrap_or(self.analytics_enabled),
        }
    }
}

/// Partial settings update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub theme: Option<ThemeMode>,
    pub dynamic_colors_enabled: Option<bool>,
    pub start_of_week: Option<WeekStartDay>,
    pub default_view: Option<CalendarView>,
    pub time_format: Option<TimeFormat>,
    pub date_format: Option<DateFormat>,
    pub notifications_enabled: Option<bool>,
    pub default_reminder_time: Option<String>,
    pub language: Option<Language>,
    pub analytics_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn touches_theme(&self) -> bool {
        self.theme.is_some() || self.dynamic_colors_enabled.is_some()
    }
}
