//! Localized user-facing failure messages for store `error` fields.

use crate::model::settings::Language;

/// Store action whose failure is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    ClearEvents,
    LoadEvents,
    SaveEvents,
    UpdateSettings,
    ResetSettings,
    LoadSettings,
    InitializeTheme,
    SaveTheme,
    InitializeApp,
    ClearAllData,
}

impl FailedAction {
    pub fn message(self, language: Language) -> &'static str {
        match language {
            Language::Ru => self.message_ru(),
            Language::En => self.message_en(),
        }
    }

    fn message_ru(self) -> &'static str {
        match self {
            Self::CreateEvent => "Не удалось создать событие",
            Self::UpdateEvent => "Не удалось обновить событие",
            Self::DeleteEvent => "Не удалось удалить событие",
            Self::ClearEvents => "Не удалось удалить события",
            Self::LoadEvents => "Не удалось загрузить события",
            Self::SaveEvents => "Не удалось сохранить события",
            Self::UpdateSettings => "Не удалось обновить настройки",
            Self::ResetSettings => "Не удалось сбросить настройки",
            Self::LoadSettings => "Не удалось загрузить настройки",
            Self::InitializeTheme => "Не удалось инициализировать тему",
            Self::SaveTheme => "Не удалось сохранить тему",
            Self::InitializeApp => "Не удалось инициализировать приложение",
            Self::ClearAllData => "Не удалось очистить данные",
        }
    }

    fn message_en(self) -> &'static str {
        match self {
            Self::CreateEvent => "Could not create the event",
            Self::UpdateEvent => "Could not update the event",
            Self::DeleteEvent => "Could not delete the event",
            Self::ClearEvents => "Could not delete events",
            Self::LoadEvents => "Could not load events",
            Self::SaveEvents => "Could not save events",
            Self::UpdateSettings => "Could not update settings",
            Self::ResetSettings => "Could not reset settings",
            Self::LoadSettings => "Could not load settings",
            Self::InitializeTheme => "Could not initialize the theme",
            Self::SaveTheme => "Could not save the theme",
            Self::InitializeApp => "Could not initialize the app",
            Self::ClearAllData => "Could not clear data",
        }
    }
}
