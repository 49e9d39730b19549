//! Active theme selection, persisted through a [`KeyValueStore`].
//!
//! One `ThemeStore` is created at startup and shared with the views that
//! need a palette.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::storage::KeyValueStore;
use crate::subscription::{SubscriptionId, Subscribers};
use crate::theme::{Palette, Theme};

/// Storage key holding `"light"` or `"dark"`
pub const THEME_KEY: &str = "weather-app-theme";

pub struct ThemeStore {
    current: RwLock<Theme>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    subscribers: Mutex<Subscribers<Theme>>,
}

impl ThemeStore {
    /// Read the persisted theme under [`THEME_KEY`]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_key(storage, THEME_KEY)
    }

    /// Read the persisted theme once. Absent, unreadable or unrecognized
    /// values start in light mode.
    pub fn load_with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let theme = match storage.get(&key) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring persisted theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read persisted theme: {}", e);
                Theme::default()
            }
        };

        tracing::info!("Starting with {} theme", theme);

        Self {
            current: RwLock::new(theme),
            storage,
            key,
            subscribers: Mutex::new(Subscribers::default()),
        }
    }

    pub fn theme(&self) -> Theme {
        *self.current.read()
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme().palette()
    }

    pub fn is_light(&self) -> bool {
        self.theme() == Theme::Light
    }

    pub fn is_dark(&self) -> bool {
        self.theme() == Theme::Dark
    }

    /// Flip light/dark, persist the result and return it.
    ///
    /// A failed write is logged; the in-memory theme changes regardless.
    pub fn toggle_theme(&self) -> Theme {
        let theme = {
            let mut current = self.current.write();
            *current = current.toggled();
            // Persist under the lock so storage order matches toggle order
            if let Err(e) = self.storage.set(&self.key, current.as_str()) {
                tracing::warn!("Failed to persist theme {}: {}", *current, e);
            }
            *current
        };

        tracing::debug!("Theme toggled to {}", theme);

        let callbacks = self.subscribers.lock().snapshot();
        for callback in callbacks {
            callback(&theme);
        }

        theme
    }

    pub fn subscribe(&self, callback: impl Fn(&Theme) + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.lock().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.lock().unsubscribe(id)
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.theme())
            .field("key", &self.key)
            .finish()
    }
}
