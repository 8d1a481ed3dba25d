//! # Settings Service
//!
//! Owns the persisted theme flag (`darkMode` key, `"true"` / `"false"`) and
//! hands out the [`ThemeContext`] that the view tree renders with.

use std::sync::Arc;

use log::{debug, warn};

use crate::core::storage::{KeyValueStore, StorageError};

/// Storage key for the theme flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Theme flag passed down to every component as a prop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeContext {
    pub dark: bool,
}

impl ThemeContext {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn toggled(self) -> Self {
        Self { dark: !self.dark }
    }

    pub fn label(&self) -> &'static str {
        if self.dark { "Dark" } else { "Light" }
    }
}

pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
    default_dark: bool,
}

impl SettingsService {
    /// `default_dark` is used when nothing (or garbage) is stored.
    pub fn new(store: Arc<dyn KeyValueStore>, default_dark: bool) -> Self {
        Self {
            store,
            default_dark,
        }
    }

    pub fn load_theme(&self) -> Result<ThemeContext, StorageError> {
        let dark = match self.store.get_item(DARK_MODE_KEY)?.as_deref() {
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                warn!("Ignoring unrecognized {} value: {:?}", DARK_MODE_KEY, other);
                self.default_dark
            }
            None => self.default_dark,
        };
        Ok(ThemeContext::new(dark))
    }

    pub fn save_theme(&self, theme: ThemeContext) -> Result<(), StorageError> {
        let value = if theme.dark { "true" } else { "false" };
        self.store.set_item(DARK_MODE_KEY, value)?;
        debug!("Theme saved: {}", theme.label());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn test_load_defaults_when_absent() {
        let kv = Arc::new(MemoryStore::new());
        assert!(!SettingsService::new(kv.clone(), false).load_theme().unwrap().dark);
        assert!(SettingsService::new(kv, true).load_theme().unwrap().dark);
    }

    #[test]
    fn test_stored_value_wins_over_default() {
        let kv = Arc::new(MemoryStore::new());
        kv.set_item(DARK_MODE_KEY, "false").unwrap();
        let settings = SettingsService::new(kv, true);
        assert!(!settings.load_theme().unwrap().dark);
    }

    #[test]
    fn test_save_writes_string_literals() {
        let kv = Arc::new(MemoryStore::new());
        let settings = SettingsService::new(kv.clone(), false);

        settings.save_theme(ThemeContext::new(true)).unwrap();
        assert_eq!(kv.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        settings.save_theme(ThemeContext::new(false)).unwrap();
        assert_eq!(kv.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_unrecognized_value_falls_back() {
        let kv = Arc::new(MemoryStore::new());
        kv.set_item(DARK_MODE_KEY, "yes please").unwrap();
        let settings = SettingsService::new(kv, false);
        assert_eq!(settings.load_theme().unwrap(), ThemeContext::new(false));
    }

    #[test]
    fn test_toggled_and_label() {
        let theme = ThemeContext::default();
        assert_eq!(theme.label(), "Light");
        assert_eq!(theme.toggled().label(), "Dark");
        assert_eq!(theme.toggled().toggled(), theme);
    }
}
