//! Settings store: the flat user preference record.
//!
//! # Invariants
//! - `settings` always holds every field; partial updates merge onto it.
//! - Persisted slice is `{settings}` under `user_settings`.

use crate::config::APP_CONFIG;
use crate::messages::FailedAction;
use crate::model::settings::{
    CalendarView, DateFormat, Language, Settings, SettingsPatch, ThemeMode, TimeFormat,
    WeekStartDay,
};
use crate::storage::{read_slice, write_slice, KeyValueStorage, StorageError};
use crate::store::{StoreError, StoreResult, SLICE_VERSION};
use log::{error, info};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SettingsSliceRef<'a> {
    settings: &'a Settings,
}

#[derive(Deserialize)]
struct SettingsSlice {
    settings: Settings,
}

pub struct SettingsStore<S: KeyValueStorage> {
    storage: S,
    settings: Settings,
    loading: bool,
    error: Option<String>,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            settings: Settings::default(),
            loading: false,
            error: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
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

    /// Merges `patch` onto the current record and persists it.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> StoreResult<&Settings> {
        let next = self.settings.merged(patch);
        self.replace(next, FailedAction::UpdateSettings)?;
        info!("event=settings_update module=settings status=ok");
        Ok(&self.settings)
    }

    /// Restores the default record and persists it.
    pub fn reset_settings(&mut self) -> StoreResult<&Settings> {
        self.replace(Settings::default(), FailedAction::ResetSettings)?;
        info!("event=settings_reset module=settings status=ok");
        Ok(&self.settings)
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            theme: Some(theme),
            ..SettingsPatch::default()
        })
    }

    pub fn set_dynamic_colors(&mut self, enabled: bool) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            dynamic_colors_enabled: Some(enabled),
            ..SettingsPatch::default()
        })
    }

    pub fn set_start_of_week(&mut self, day: WeekStartDay) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            start_of_week: Some(day),
            ..SettingsPatch::default()
        })
    }

    pub fn set_default_view(&mut self, view: CalendarView) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            default_view: Some(view),
            ..SettingsPatch::default()
        })
    }

    pub fn set_time_format(&mut self, format: TimeFormat) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            time_format: Some(format),
            ..SettingsPatch::default()
        })
    }

    pub fn set_date_format(&mut self, format: DateFormat) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            date_format: Some(format),
            ..SettingsPatch::default()
        })
    }

    pub fn set_notifications(&mut self, enabled: bool) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            notifications_enabled: Some(enabled),
            ..SettingsPatch::default()
        })
    }

    /// `duration` is an ISO-8601 duration such as `PT30M`; stored verbatim.
    pub fn set_default_reminder_time(
        &mut self,
        duration: impl Into<String>,
    ) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            default_reminder_time: Some(duration.into()),
            ..SettingsPatch::default()
        })
    }

    pub fn set_language(&mut self, language: Language) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            language: Some(language),
            ..SettingsPatch::default()
        })
    }

    pub fn set_analytics(&mut self, enabled: bool) -> StoreResult<&Settings> {
        self.update_settings(&SettingsPatch {
            analytics_enabled: Some(enabled),
            ..SettingsPatch::default()
        })
    }

    /// Replaces in-memory settings with the persisted slice, if one exists.
    pub fn load_settings(&mut self) -> StoreResult<()> {
        self.loading = true;
        self.error = None;

        match read_slice::<_, SettingsSlice>(
            &self.storage,
            APP_CONFIG.storage_keys.settings,
            SLICE_VERSION,
        ) {
            Ok(slice) => {
                let found = slice.is_some();
                if let Some(slice) = slice {
                    self.settings = slice.settings;
                }
                self.loading = false;
                info!("event=settings_load module=settings status=ok found={found}");
                Ok(())
            }
            Err(source) => Err(self.fail(FailedAction::LoadSettings, source)),
        }
    }

    pub fn save_settings(&mut self) -> StoreResult<()> {
        self.persist()
            .map_err(|source| self.fail(FailedAction::UpdateSettings, source))
    }

    fn replace(&mut self, next: Settings, action: FailedAction) -> StoreResult<()> {
        self.loading = true;
        self.error = None;

        let previous = std::mem::replace(&mut self.settings, next);
        match self.persist() {
            Ok(()) => {
                self.loading = false;
                Ok(())
            }
            Err(source) => {
                self.settings = previous;
                Err(self.fail(action, source))
            }
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        write_slice(
            &self.storage,
            APP_CONFIG.storage_keys.settings,
            SLICE_VERSION,
            &SettingsSliceRef {
                settings: &self.settings,
            },
        )
    }

    fn fail(&mut self, action: FailedAction, source: StorageError) -> StoreError {
        error!("event=settings_persist module=settings status=error action={action:?} error={source}");
        self.loading = false;
        // Messages follow the language currently in effect, including a
        // language change that was just rolled back.
        self.error = Some(action.message(self.settings.language).to_string());
        StoreError::Storage { action, source }
    }
}
