//! Screen routes and the stack navigator state.
//!
//! # Invariants
//! - The stack is never empty; its bottom entry is always `Route::Home`.
//! - `EventEdit` without an id means create mode.

use crate::model::event::EventId;
use crate::model::settings::Language;
use serde::{Deserialize, Serialize};

/// One application screen with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params")]
pub enum Route {
    Home,
    EventDetail {
        #[serde(rename = "eventId")]
        event_id: EventId,
    },
    EventEdit {
        #[serde(rename = "eventId", default, skip_serializing_if = "Option::is_none")]
        event_id: Option<EventId>,
    },
    Settings,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::EventDetail { .. } => "EventDetail",
            Self::EventEdit { .. } => "EventEdit",
            Self::Settings => "Settings",
        }
    }

    /// Home draws its own header.
    pub fn header_shown(&self) -> bool {
        !matches!(self, Self::Home)
    }

    /// Header title; `None` when the header is hidden.
    pub fn title(&self, language: Language) -> Option<&'static str> {
        let title = match (self, language) {
            (Self::Home, _) => return None,
            (Self::EventDetail { .. }, Language::Ru) => "Событие",
            (Self::EventDetail { .. }, Language::En) => "Event",
            (Self::EventEdit { event_id: Some(_) }, Language::Ru) => "Редактировать событие",
            (Self::EventEdit { event_id: Some(_) }, Language::En) => "Edit event",
            (Self::EventEdit { event_id: None }, Language::Ru) => "Новое событие",
            (Self::EventEdit { event_id: None }, Language::En) => "New event",
            (Self::Settings, Language::Ru) => "Настройки",
            (Self::Settings, Language::En) => "Settings",
        };
        Some(title)
    }

    /// Body text shown until the screen has real content.
    pub fn placeholder(&self, language: Language) -> String {
        let (screen, suffix) = match language {
            Language::Ru => (
                match self {
                    Self::Home => "Главный экран календаря",
                    Self::EventDetail { .. } => "Детали события",
                    Self::EventEdit { .. } => "Редактирование события",
                    Self::Settings => "Настройки",
                },
                "В разработке",
            ),
            Language::En => (
                match self {
                    Self::Home => "Calendar home",
                    Self::EventDetail { .. } => "Event details",
                    Self::EventEdit { .. } => "Event editing",
                    Self::Settings => "Settings",
                },
                "Under construction",
            ),
        };
        format!("{screen} - {suffix}")
    }
}

/// Back stack of visited routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self {
            routes: vec![Route::Home],
        }
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        static HOME: Route = Route::Home;
        self.routes.last().unwrap_or(&HOME)
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.routes.len() > 1
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Leaves the current screen. Returns `None` at the root.
    pub fn pop(&mut self) -> Option<Route> {
        if self.can_go_back() {
            self.routes.pop()
        } else {
            None
        }
    }

    /// Drops everything above Home.
    pub fn reset(&mut self) {
        self.routes.truncate(1);
    }
}
