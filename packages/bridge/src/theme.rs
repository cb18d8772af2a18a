//! Display theme preference: resolution, persistence and visual effect.
//!
//! Resolution order:
//! 1. the stored value, if it is exactly `light`, `dark` or `system`
//! 2. the configured default
//!
//! `system` then follows the host's color scheme preference at use time.
//! Unreadable storage counts as "no stored value".

use glossary_parser::Theme;

use crate::host::{Host, DARK_CLASS};
use crate::store::{KeyValueStore, StoreError};

/// Storage key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "glossaryPageTheme";

#[derive(Debug)]
pub struct ThemePersistence<S> {
    store: S,
    default: Theme,
}

impl<S: KeyValueStore> ThemePersistence<S> {
    pub fn new(store: S, default: Theme) -> Self {
        Self { store, default }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored preference, if it is one of the recognized values.
    pub fn stored(&self) -> Option<Theme> {
        match self.store.get(THEME_STORAGE_KEY) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference, using default");
                None
            }
        }
    }

    /// The effective preference: stored value, else the configured default.
    pub fn preference(&self) -> Theme {
        self.stored().unwrap_or(self.default)
    }

    /// Whether the page should currently be dark.
    pub fn is_dark(&self, host_prefers_dark: bool) -> bool {
        match self.preference() {
            Theme::Dark => true,
            Theme::Light => false,
            Theme::System => host_prefers_dark,
        }
    }

    /// Toggle the dark class on the document root to match the preference.
    pub fn reflect<H: Host + ?Sized>(&self, host: &H) {
        let dark = self.is_dark(host.prefers_dark_color_scheme());
        host.set_root_class(DARK_CLASS, dark);
    }

    /// Persist `value`, or clear the stored preference when `value` is empty,
    /// then re-apply the visual effect.
    ///
    /// The effect is applied even if storage fails.
    pub fn change_theme<H: Host + ?Sized>(&self, value: &str, host: &H) -> Result<(), StoreError> {
        let result = if value.is_empty() {
            self.store.clear(THEME_STORAGE_KEY)
        } else {
            self.store.set(THEME_STORAGE_KEY, value)
        };
        self.reflect(host);
        result
    }
}
