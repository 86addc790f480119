//! Shared, mutable handle to the application configuration
//!
//! The config is built once at startup and then edited by settings screens
//! while other surfaces keep reading it. Every clone of a [`SharedConfig`]
//! points at the same mapping, so a write through one handle is visible to
//! all readers on their next read.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::value::{AppConfig, ConfigValue};

#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<AppConfig>>,
}

impl SharedConfig {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    // The config is plain data, a panicking writer cannot leave it half-updated
    fn read(&self) -> RwLockReadGuard<'_, AppConfig> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.read().get(key).cloned()
    }

    /// See [`AppConfig::flag`]
    pub fn flag(&self, key: &str) -> bool {
        self.read().flag(key)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.read().string(key).map(str::to_string)
    }

    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        let key = key.into();
        let value = value.into();
        log::debug!("set: {} = {}", key, value);
        self.write().set(key, value)
    }

    /// Copy of the current mapping
    pub fn snapshot(&self) -> AppConfig {
        self.read().clone()
    }

    /// Run a closure against the current mapping without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&AppConfig) -> R) -> R {
        f(&self.read())
    }
}

impl From<AppConfig> for SharedConfig {
    fn from(config: AppConfig) -> Self {
        Self::new(config)
    }
}
