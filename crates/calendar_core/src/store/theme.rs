//! Theme store: theme inputs and the Paper theme derived from them.
//!
//! # Responsibility
//! - Own the user theme inputs (mode, dynamic colours, monet palette).
//! - Recompute `paper_theme`/`is_dark` after every input change.
//! - Own the appearance subscription used while following the system scheme.
//!
//! # Invariants
//! - `paper_theme`, `is_dark` and `palette_source` always equal
//!   `derive_theme` of the current inputs.
//! - At most one appearance subscription is held; it is released by
//!   `dispose_appearance_listener` or when the store is dropped.
//! - Persisted slice is `{themeMode, dynamicColorsEnabled, monetPalette}`
//!   under `theme_preferences`.

use crate::config::APP_CONFIG;
use crate::messages::FailedAction;
use crate::model::settings::{Language, ThemeMode};
use crate::platform::{AppearanceSource, AppearanceSubscription, DynamicColorProvider};
use crate::storage::{read_slice, write_slice, KeyValueStorage, StorageError};
use crate::store::{StoreError, StoreResult, SLICE_VERSION};
use crate::theme::{derive_theme, CalendarTheme, MonetPalette, PaletteSource, PaperTheme, ThemeInputs};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeSliceRef<'a> {
    theme_mode: ThemeMode,
    dynamic_colors_enabled: bool,
    monet_palette: Option<&'a MonetPalette>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeSlice {
    theme_mode: ThemeMode,
    dynamic_colors_enabled: bool,
    #[serde(default)]
    monet_palette: Option<MonetPalette>,
}

/// Input values restored when a write fails.
struct ThemeInputsSnapshot {
    theme_mode: ThemeMode,
    dynamic_colors_enabled: bool,
    dynamic_colors_available: bool,
    monet_palette: Option<MonetPalette>,
}

pub struct ThemeStore<S: KeyValueStorage> {
    storage: S,
    appearance: Arc<dyn AppearanceSource>,
    subscription: Option<AppearanceSubscription>,
    paper_theme: PaperTheme,
    is_dark: bool,
    palette_source: PaletteSource,
    monet_palette: Option<MonetPalette>,
    dynamic_colors_available: bool,
    dynamic_colors_enabled: bool,
    theme_mode: ThemeMode,
    loading: bool,
    error: Option<String>,
    language: Language,
}

impl<S: KeyValueStorage> ThemeStore<S> {
    /// Starts in system mode with dynamic colours enabled but not yet
    /// available, derived against the current platform scheme.
    pub fn new(storage: S, appearance: Arc<dyn AppearanceSource>) -> Self {
        let mut store = Self {
            storage,
            appearance,
            subscription: None,
            paper_theme: PaperTheme::default(),
            is_dark: false,
            palette_source: PaletteSource::BuiltinLight,
            monet_palette: None,
            dynamic_colors_available: false,
            dynamic_colors_enabled: true,
            theme_mode: ThemeMode::System,
            loading: false,
            error: None,
            language: Language::default(),
        };
        store.update_paper_theme();
        store
    }

    pub fn paper_theme(&self) -> &PaperTheme {
        &self.paper_theme
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn palette_source(&self) -> PaletteSource {
        self.palette_source
    }

    pub fn monet_palette(&self) -> Option<&MonetPalette> {
        self.monet_palette.as_ref()
    }

    pub fn dynamic_colors_available(&self) -> bool {
        self.dynamic_colors_available
    }

    pub fn dynamic_colors_enabled(&self) -> bool {
        self.dynamic_colors_enabled
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
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

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn has_appearance_listener(&self) -> bool {
        self.subscription.is_some()
    }

    /// Calendar widget colours for the current Paper theme.
    pub fn calendar_theme(&self) -> CalendarTheme {
        CalendarTheme::from_paper(&self.paper_theme)
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) -> StoreResult<()> {
        self.change_inputs(FailedAction::SaveTheme, |store| store.theme_mode = mode)?;
        info!(
            "event=theme_mode_set module=theme status=ok mode={} is_dark={}",
            mode.as_str(),
            self.is_dark
        );
        Ok(())
    }

    pub fn set_dynamic_colors(&mut self, enabled: bool) -> StoreResult<()> {
        self.change_inputs(FailedAction::SaveTheme, |store| {
            store.dynamic_colors_enabled = enabled
        })?;
        info!("event=theme_dynamic_colors_set module=theme status=ok enabled={enabled}");
        Ok(())
    }

    /// Installs a platform palette and marks dynamic colours available.
    pub fn update_monet_palette(&mut self, palette: MonetPalette) -> StoreResult<()> {
        self.change_inputs(FailedAction::SaveTheme, move |store| {
            store.monet_palette = Some(palette);
            store.dynamic_colors_available = true;
        })?;
        info!(
            "event=theme_palette_set module=theme status=ok source={:?}",
            self.palette_source
        );
        Ok(())
    }

    /// Recomputes the derived theme from the current inputs.
    pub fn update_paper_theme(&mut self) {
        let derived = derive_theme(&ThemeInputs {
            theme_mode: self.theme_mode,
            dynamic_colors_enabled: self.dynamic_colors_enabled,
            dynamic_colors_available: self.dynamic_colors_available,
            monet_palette: self.monet_palette.as_ref(),
            system_scheme: self.appearance.color_scheme(),
        });
        self.paper_theme = derived.paper_theme;
        self.is_dark = derived.is_dark;
        self.palette_source = derived.palette_source;
    }

    /// Asks the provider for a dynamic palette, recomputes and starts
    /// following the system appearance.
    ///
    /// A missing palette is not an error: dynamic colours are then marked
    /// unavailable and the built-in palettes apply. A detected palette equal
    /// to the stored one is not written again. Calling this again keeps
    /// the existing subscription.
    pub fn initialize_theme(
        &mut self,
        provider: Option<&dyn DynamicColorProvider>,
    ) -> StoreResult<()> {
        self.loading = true;
        self.error = None;

        let detected = if APP_CONFIG.dynamic_colors_available {
            provider.and_then(|provider| provider.dynamic_palette())
        } else {
            None
        };
        let available = detected.is_some();

        let result = match detected {
            Some(palette) if self.monet_palette.as_ref() == Some(&palette) => {
                self.dynamic_colors_available = true;
                self.update_paper_theme();
                self.loading = false;
                Ok(())
            }
            Some(palette) => self.change_inputs(FailedAction::InitializeTheme, move |store| {
                store.monet_palette = Some(palette);
                store.dynamic_colors_available = true;
            }),
            None => {
                self.dynamic_colors_available = false;
                self.update_paper_theme();
                self.loading = false;
                Ok(())
            }
        };

        if self.subscription.is_none() {
            self.subscription = Some(self.appearance.subscribe());
            debug!("event=appearance_subscribe module=theme status=ok");
        }

        result?;
        info!(
            "event=theme_initialize module=theme status=ok dynamic_colors_available={available} is_dark={}",
            self.is_dark
        );
        Ok(())
    }

    /// Applies pending appearance notifications.
    ///
    /// Returns `true` when the theme was recomputed, which only happens while
    /// `theme_mode` is `System`.
    pub fn poll_appearance(&mut self) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };
        if subscription.latest().is_none() || self.theme_mode != ThemeMode::System {
            return false;
        }

        let was_dark = self.is_dark;
        self.update_paper_theme();
        debug!(
            "event=appearance_change module=theme status=ok was_dark={was_dark} is_dark={}",
            self.is_dark
        );
        true
    }

    /// Stops following the system appearance. Returns `false` when no
    /// subscription was active.
    pub fn dispose_appearance_listener(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                subscription.dispose();
                debug!("event=appearance_unsubscribe module=theme status=ok");
                true
            }
            None => false,
        }
    }

    /// Restores persisted inputs, if any, then recomputes.
    pub fn load_theme(&mut self) -> StoreResult<()> {
        self.loading = true;
        self.error = None;

        let slice = match read_slice::<_, ThemeSlice>(
            &self.storage,
            APP_CONFIG.storage_keys.theme,
            SLICE_VERSION,
        ) {
            Ok(slice) => slice,
            Err(source) => return Err(self.fail(FailedAction::InitializeTheme, source)),
        };

        let found = slice.is_some();
        if let Some(slice) = slice {
            self.theme_mode = slice.theme_mode;
            self.dynamic_colors_enabled = slice.dynamic_colors_enabled;
            self.monet_palette = slice.monet_palette;
        }
        self.update_paper_theme();
        self.loading = false;
        info!("event=theme_load module=theme status=ok found={found}");
        Ok(())
    }

    fn snapshot(&self) -> ThemeInputsSnapshot {
        ThemeInputsSnapshot {
            theme_mode: self.theme_mode,
            dynamic_colors_enabled: self.dynamic_colors_enabled,
            dynamic_colors_available: self.dynamic_colors_available,
            monet_palette: self.monet_palette.clone(),
        }
    }

    fn restore(&mut self, snapshot: ThemeInputsSnapshot) {
        self.theme_mode = snapshot.theme_mode;
        self.dynamic_colors_enabled = snapshot.dynamic_colors_enabled;
        self.dynamic_colors_available = snapshot.dynamic_colors_available;
        self.monet_palette = snapshot.monet_palette;
        self.update_paper_theme();
    }

    /// Applies `change`, recomputes and persists; restores the previous
    /// inputs when the write fails.
    fn change_inputs(
        &mut self,
        action: FailedAction,
        change: impl FnOnce(&mut Self),
    ) -> StoreResult<()> {
        self.loading = true;
        self.error = None;

        let snapshot = self.snapshot();
        change(self);
        self.update_paper_theme();

        match self.persist() {
            Ok(()) => {
                self.loading = false;
                Ok(())
            }
            Err(source) => {
                self.restore(snapshot);
                Err(self.fail(action, source))
            }
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        write_slice(
            &self.storage,
            APP_CONFIG.storage_keys.theme,
            SLICE_VERSION,
            &ThemeSliceRef {
                theme_mode: self.theme_mode,
                dynamic_colors_enabled: self.dynamic_colors_enabled,
                monet_palette: self.monet_palette.as_ref(),
            },
        )
    }

    fn fail(&mut self, action: FailedAction, source: StorageError) -> StoreError {
        error!("event=theme_persist module=theme status=error action={action:?} error={source}");
        self.loading = false;
        self.error = Some(action.message(self.language).to_string());
        StoreError::Storage { action, source }
    }
}
