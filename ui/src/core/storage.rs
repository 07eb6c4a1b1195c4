//! Local persistence for the two page preferences (theme and locale).
//!
//! On the web the values live in `window.localStorage`; everywhere else an
//! in-memory store stands in so views and tests behave the same.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::config::StorageKeys;
use crate::core::error::PortfolioError;
use crate::i18n::Locale;
use crate::theme::Theme;

/// Minimal key/value contract the preferences need.
pub trait PrefStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortfolioError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PortfolioError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortfolioError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortfolioError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, PortfolioError> {
        web_sys::window()
            .ok_or(PortfolioError::Unsupported("window"))?
            .local_storage()
            .map_err(|err| PortfolioError::Storage(format!("{err:?}")))?
            .ok_or_else(|| PortfolioError::Storage("localStorage is disabled".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl PrefStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortfolioError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| PortfolioError::Storage(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortfolioError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| PortfolioError::Storage(format!("{err:?}")))
    }
}

/// Typed access to the persisted flags.
#[derive(Clone)]
pub struct Preferences {
    store: Rc<dyn PrefStore>,
    keys: StorageKeys,
}

impl Preferences {
    pub fn new(store: Rc<dyn PrefStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// `localStorage` on the web, memory elsewhere.
    pub fn platform_default(keys: StorageKeys) -> Self {
        #[cfg(target_arch = "wasm32")]
        let store: Rc<dyn PrefStore> = Rc::new(LocalStore);
        #[cfg(not(target_arch = "wasm32"))]
        let store: Rc<dyn PrefStore> = Rc::new(MemoryStore::new());
        Self::new(store, keys)
    }

    pub fn stored_theme(&self) -> Result<Option<String>, PortfolioError> {
        self.store.get(&self.keys.theme)
    }

    /// Persisted theme, or the system preference when nothing usable is stored.
    pub fn theme(&self, system_prefers_dark: bool) -> Result<Theme, PortfolioError> {
        let stored = self.stored_theme()?;
        Ok(Theme::resolve(stored.as_deref(), system_prefers_dark))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), PortfolioError> {
        self.store.set(&self.keys.theme, theme.as_str())
    }

    pub fn locale(&self, default: Locale) -> Result<Locale, PortfolioError> {
        let stored = self.store.get(&self.keys.locale)?;
        Ok(stored
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or(default))
    }

    pub fn set_locale(&self, locale: Locale) -> Result<(), PortfolioError> {
        self.store.set(&self.keys.locale, locale.code())
    }
}
