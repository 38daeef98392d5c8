//! Light/dark theme preference.
//!
//! Stored as the bare literal `light` or `dark` under the `theme` key.

use std::sync::Arc;

use perfumery_core::Theme;
use tracing::warn;

use crate::storage::{KeyValueStore, keys};

/// The persisted theme preference.
pub struct ThemePreference {
    current: Theme,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Load the saved theme, defaulting to light.
    ///
    /// A JSON-quoted literal (`"dark"`) is accepted as well as the bare one.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(keys::THEME) {
            Ok(Some(raw)) => raw
                .trim()
                .trim_matches('"')
                .parse()
                .unwrap_or_else(|e: String| {
                    warn!(error = %e, "Ignoring saved theme");
                    Theme::default()
                }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved theme");
                Theme::default()
            }
        };
        Self { current, store }
    }

    /// The active theme.
    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Switch to `theme` and save it.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.store.set(keys::THEME, theme.as_str()) {
            warn!(error = %e, "Failed to persist theme");
        }
    }

    /// Switch to the other theme and return it.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }
}
