//! Host platform collaborators consumed by the theme store.
//!
//! # Responsibility
//! - Report the system light/dark appearance and notify on changes.
//! - Optionally supply a wallpaper-derived (Monet) palette.
//!
//! # Invariants
//! - A subscription stops receiving notifications once disposed or dropped.
//! - Lock poisoning never panics; the inner state is recovered.

use crate::theme::palette::MonetPalette;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// System appearance reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Appearance query and change notification.
pub trait AppearanceSource: Send + Sync {
    /// Current system scheme; `None` when the platform does not say.
    fn color_scheme(&self) -> Option<ColorScheme>;
    /// Starts delivering scheme changes to the returned subscription.
    fn subscribe(&self) -> AppearanceSubscription;
}

/// Best-effort provider of a platform dynamic palette.
pub trait DynamicColorProvider {
    /// Returns `None` when the platform has no dynamic palette.
    fn dynamic_palette(&self) -> Option<MonetPalette>;
}

/// Fixed answer, used when the host hands over a palette it already read.
#[derive(Debug, Clone, Default)]
pub struct StaticDynamicColors(pub Option<MonetPalette>);

impl DynamicColorProvider for StaticDynamicColors {
    fn dynamic_palette(&self) -> Option<MonetPalette> {
        self.0.clone()
    }
}

/// Receiving end of appearance notifications.
///
/// Dropping the subscription unregisters it from its source.
pub struct AppearanceSubscription {
    receiver: Receiver<Option<ColorScheme>>,
    disposer: Option<Box<dyn FnOnce() + Send>>,
}

impl AppearanceSubscription {
    pub fn new(
        receiver: Receiver<Option<ColorScheme>>,
        disposer: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Drains pending notifications and returns the most recent one.
    pub fn latest(&self) -> Option<Option<ColorScheme>> {
        self.receiver.try_iter().last()
    }

    /// Unregisters from the source now.
    pub fn dispose(mut self) {
        self.run_disposer();
    }

    fn run_disposer(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for AppearanceSubscription {
    fn drop(&mut self) {
        self.run_disposer();
    }
}

impl std::fmt::Debug for AppearanceSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppearanceSubscription")
            .field("active", &self.disposer.is_some())
            .finish()
    }
}

#[derive(Default)]
struct HubState {
    scheme: Option<ColorScheme>,
    next_listener_id: u64,
    listeners: BTreeMap<u64, Sender<Option<ColorScheme>>>,
}

/// In-process appearance source the host pushes scheme changes into.
#[derive(Clone, Default)]
pub struct AppearanceHub {
    state: Arc<Mutex<HubState>>,
}

impl AppearanceHub {
    pub fn new(initial: Option<ColorScheme>) -> Self {
        let hub = Self::default();
        lock(&hub.state).scheme = initial;
        hub
    }

    /// Records the new scheme and notifies listeners when it changed.
    pub fn set_color_scheme(&self, scheme: Option<ColorScheme>) {
        let mut state = lock(&self.state);
        if state.scheme == scheme {
            return;
        }
        state.scheme = scheme;
        state
            .listeners
            .retain(|_, listener| listener.send(scheme).is_ok());
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.state).listeners.len()
    }
}

impl AppearanceSource for AppearanceHub {
    fn color_scheme(&self) -> Option<ColorScheme> {
        lock(&self.state).scheme
    }

    fn subscribe(&self) -> AppearanceSubscription {
        let (sender, receiver) = channel();
        let id = {
            let mut state = lock(&self.state);
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.insert(id, sender);
            id
        };

        let weak: Weak<Mutex<HubState>> = Arc::downgrade(&self.state);
        AppearanceSubscription::new(receiver, move || {
            if let Some(state) = weak.upgrade() {
                lock(&state).listeners.remove(&id);
            }
        })
    }
}

fn lock(state: &Mutex<HubState>) -> MutexGuard<'_, HubState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::{AppearanceHub, AppearanceSource, ColorScheme};

    #[test]
    fn subscription_receives_latest_change_only() {
        let hub = AppearanceHub::new(Some(ColorScheme::Light));
        let subscription = hub.subscribe();

        hub.set_color_scheme(Some(ColorScheme::Dark));
        hub.set_color_scheme(Some(ColorScheme::Light));
        hub.set_color_scheme(Some(ColorScheme::Dark));

        assert_eq!(subscription.latest(), Some(Some(ColorScheme::Dark)));
        assert_eq!(subscription.latest(), None);
    }

    #[test]
    fn unchanged_scheme_is_not_broadcast() {
        let hub = AppearanceHub::new(Some(ColorScheme::Dark));
        let subscription = hub.subscribe();
        hub.set_color_scheme(Some(ColorScheme::Dark));
        assert_eq!(subscription.latest(), None);
    }

    #[test]
    fn dispose_and_drop_unregister() {
        let hub = AppearanceHub::new(None);
        let first = hub.subscribe();
        let second = hub.subscribe();
        assert_eq!(hub.listener_count(), 2);

        first.dispose();
        assert_eq!(hub.listener_count(), 1);

        drop(second);
        assert_eq!(hub.listener_count(), 0);
    }
}
