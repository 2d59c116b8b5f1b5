//! Composition root owning the three stores.
//!
//! # Responsibility
//! - Build every store over one shared storage handle.
//! - Run app-wide flows: startup, data clearing, settings propagation.
//!
//! # Invariants
//! - Sub-stores run in a fixed order: events, settings, theme.
//! - `is_initialized` becomes `true` only after every sub-store succeeded.
//! - Theme mode and dynamic-colour changes made through `update_settings`
//!   reach the theme store before the call returns.

use crate::messages::FailedAction;
use crate::model::settings::{Language, Settings, SettingsPatch};
use crate::platform::{AppearanceSource, DynamicColorProvider};
use crate::storage::KeyValueStorage;
use crate::store::events::EventsStore;
use crate::store::settings::SettingsStore;
use crate::store::theme::ThemeStore;
use crate::store::{StoreError, StoreKind, StoreResult};
use log::{error, info, warn};
use std::sync::Arc;

pub struct RootStore<S: KeyValueStorage + Clone> {
    events: EventsStore<S>,
    settings: SettingsStore<S>,
    theme: ThemeStore<S>,
    is_initialized: bool,
    loading: bool,
    error: Option<String>,
}

impl<S: KeyValueStorage + Clone> RootStore<S> {
    pub fn new(storage: S, appearance: Arc<dyn AppearanceSource>) -> Self {
        Self {
            events: EventsStore::new(storage.clone()),
            settings: SettingsStore::new(storage.clone()),
            theme: ThemeStore::new(storage, appearance),
            is_initialized: false,
            loading: false,
            error: None,
        }
    }

    pub fn events(&self) -> &EventsStore<S> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventsStore<S> {
        &mut self.events
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    /// Direct settings access. Theme-related changes made here are not
    /// propagated; prefer `update_settings`.
    pub fn settings_mut(&mut self) -> &mut SettingsStore<S> {
        &mut self.settings
    }

    pub fn theme(&self) -> &ThemeStore<S> {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeStore<S> {
        &mut self.theme
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_global_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    /// Loads persisted events and settings, then restores and initializes
    /// the theme.
    ///
    /// Every sub-store is attempted even after an earlier one failed; the
    /// returned error names each failed store.
    pub fn initialize_app(
        &mut self,
        provider: Option<&dyn DynamicColorProvider>,
    ) -> StoreResult<()> {
        info!("event=app_initialize module=root status=start");
        self.loading = true;
        self.error = None;

        let mut failed = Vec::new();

        if let Err(err) = self.events.load_events() {
            failed.push((StoreKind::Events, err));
        }
        match self.settings.load_settings() {
            Ok(()) => self.apply_language(self.settings.settings().language),
            Err(err) => failed.push((StoreKind::Settings, err)),
        }
        let theme_result = self
            .theme
            .load_theme()
            .and_then(|()| self.theme.initialize_theme(provider));
        if let Err(err) = theme_result {
            failed.push((StoreKind::Theme, err));
        }

        self.loading = false;
        if failed.is_empty() {
            self.is_initialized = true;
            info!("event=app_initialize module=root status=ok");
            return Ok(());
        }

        let err = StoreError::Initialization { failed };
        error!("event=app_initialize module=root status=error error={err}");
        self.error = Some(FailedAction::InitializeApp.message(self.language()).to_string());
        Err(err)
    }

    /// Resets settings to defaults and removes every event. The theme is
    /// left as is.
    pub fn clear_all_data(&mut self) -> StoreResult<()> {
        info!("event=clear_all_data module=root status=start");
        self.loading = true;
        self.error = None;

        let mut failed = Vec::new();

        if let Err(err) = self.events.clear_events() {
            failed.push((StoreKind::Events, err));
        }
        match self.settings.reset_settings() {
            Ok(settings) => {
                let language = settings.language;
                self.apply_language(language);
            }
            Err(err) => failed.push((StoreKind::Settings, err)),
        }

        self.loading = false;
        if failed.is_empty() {
            info!("event=clear_all_data module=root status=ok");
            return Ok(());
        }

        let err = StoreError::ClearAllData { failed };
        error!("event=clear_all_data module=root status=error error={err}");
        self.error = Some(FailedAction::ClearAllData.message(self.language()).to_string());
        Err(err)
    }

    /// Updates settings and forwards theme and language changes to the
    /// other stores.
    ///
    /// Propagation runs only after the settings write succeeded. A theme
    /// write failure is returned while the settings change stays applied.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> StoreResult<Settings> {
        let settings = self.settings.update_settings(patch)?.clone();

        if let Some(language) = patch.language {
            self.apply_language(language);
        }
        if patch.touches_theme() {
            if let Some(mode) = patch.theme.filter(|mode| *mode != self.theme.theme_mode()) {
                self.theme.set_theme_mode(mode)?;
            }
            if let Some(enabled) = patch
                .dynamic_colors_enabled
                .filter(|enabled| *enabled != self.theme.dynamic_colors_enabled())
            {
                self.theme.set_dynamic_colors(enabled)?;
            }
        }

        if patch.is_empty() {
            warn!("event=settings_update module=root status=ok reason=empty_patch");
        }
        Ok(settings)
    }

    fn language(&self) -> Language {
        self.settings.settings().language
    }

    fn apply_language(&mut self, language: Language) {
        self.events.set_language(language);
        self.theme.set_language(language);
    }
}
