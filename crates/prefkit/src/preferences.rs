//! Preferences: typed accessors over a snapshot store.
//!
//! The facade holds no state besides the store handle. Every read fetches
//! or subscribes afresh; every write is one atomic store edit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use prefkit_core::{
    bool_key, double_key, float_key, int_key, long_key, string_key, PrefKey, PrefValueType,
    Snapshot, DEFAULT_BOOL, DEFAULT_DOUBLE, DEFAULT_FLOAT, DEFAULT_INT, DEFAULT_LONG,
};
use prefkit_store::{SqliteStore, Store, StoreExt};

use crate::config::PreferencesConfig;
use crate::error::{PrefsError, Result};
use crate::flow::{value_stream, PrefStream};

/// A typed preference store.
///
/// Provides, for each supported type (`bool`, `String`, `i32`, `i64`, `f32`,
/// `f64`):
/// - `set_*`: write a value
/// - `get_*`: one-shot read with a caller-supplied default
/// - `*_flow`: a live stream of the value, default substituted when absent
///
/// Generic [`set`](Self::set), [`get`](Self::get) and [`flow`](Self::flow)
/// take a typed [`PrefKey`] directly.
pub struct Preferences<S: Store> {
    store: Arc<S>,
}

impl<S: Store> Clone for Preferences<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl Preferences<SqliteStore> {
    /// Open the SQLite store described by `config`, creating its directory.
    pub fn open(config: &PreferencesConfig) -> Result<Self> {
        let path = config.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PrefsError::Config(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        let store = SqliteStore::open(&path)?;
        tracing::debug!(path = %path.display(), "preferences opened");
        Ok(Self::new(store))
    }
}

impl<S: Store> Preferences<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Wrap a store shared with other owners.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Generic Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or overwrite the value for `key`. Other entries are untouched.
    pub async fn set<T: PrefValueType>(&self, key: &PrefKey<T>, value: T) -> Result<()> {
        tracing::debug!(key = key.name(), ty = %key.pref_type(), "set preference");
        let key = key.clone();
        self.store.update(move |prefs| prefs.set(&key, value)).await?;
        Ok(())
    }

    /// The stored value for `key`, or `None` if absent.
    pub async fn find<T: PrefValueType>(&self, key: &PrefKey<T>) -> Result<Option<T>> {
        let snapshot = self.store.data().await?;
        Ok(snapshot.try_get(key)?)
    }

    /// The stored value for `key`, or `default` if absent.
    pub async fn get<T: PrefValueType>(&self, key: &PrefKey<T>, default: T) -> Result<T> {
        Ok(self.find(key).await?.unwrap_or(default))
    }

    /// A live stream of the value for `key`, `default` when absent.
    pub fn flow<T: PrefValueType>(&self, key: &PrefKey<T>, default: T) -> PrefStream<T> {
        value_stream(self.store.subscribe(), key.clone(), Some(default))
    }

    /// Remove the entry under `name`. Returns whether it existed.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        let removed = Arc::new(AtomicBool::new(false));
        let flag = removed.clone();
        let owned = name.to_string();
        self.store
            .update(move |prefs| {
                flag.store(prefs.remove(&owned).is_some(), Ordering::SeqCst);
            })
            .await?;
        let existed = removed.load(Ordering::SeqCst);
        tracing::debug!(key = name, existed, "removed preference");
        Ok(existed)
    }

    /// Whether an entry exists under `name`, of any type.
    pub async fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.store.data().await?.contains(name))
    }

    /// Remove every entry.
    pub async fn clear(&self) -> Result<()> {
        self.store.update(|prefs| prefs.clear()).await?;
        tracing::debug!("cleared preferences");
        Ok(())
    }

    /// The current snapshot of all preferences.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.store.data().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn set_bool(&self, name: &str, value: bool) -> Result<()> {
        self.set(&bool_key(name)?, value).await
    }

    pub async fn set_string(&self, name: &str, value: impl Into<String>) -> Result<()> {
        self.set(&string_key(name)?, value.into()).await
    }

    pub async fn set_int(&self, name: &str, value: i32) -> Result<()> {
        self.set(&int_key(name)?, value).await
    }

    pub async fn set_long(&self, name: &str, value: i64) -> Result<()> {
        self.set(&long_key(name)?, value).await
    }

    pub async fn set_float(&self, name: &str, value: f32) -> Result<()> {
        self.set(&float_key(name)?, value).await
    }

    pub async fn set_double(&self, name: &str, value: f64) -> Result<()> {
        self.set(&double_key(name)?, value).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // One-shot Reads
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_bool(&self, name: &str, default: bool) -> Result<bool> {
        self.get(&bool_key(name)?, default).await
    }

    /// Strings have no conventional default, so one is always required.
    pub async fn get_string(&self, name: &str, default: impl Into<String>) -> Result<String> {
        self.get(&string_key(name)?, default.into()).await
    }

    pub async fn get_int(&self, name: &str, default: i32) -> Result<i32> {
        self.get(&int_key(name)?, default).await
    }

    pub async fn get_long(&self, name: &str, default: i64) -> Result<i64> {
        self.get(&long_key(name)?, default).await
    }

    pub async fn get_float(&self, name: &str, default: f32) -> Result<f32> {
        self.get(&float_key(name)?, default).await
    }

    pub async fn get_double(&self, name: &str, default: f64) -> Result<f64> {
        self.get(&double_key(name)?, default).await
    }

    /// Read with the conventional default, `false`.
    pub async fn get_bool_or_default(&self, name: &str) -> Result<bool> {
        self.get_bool(name, DEFAULT_BOOL).await
    }

    /// Read with the conventional default, `-1`.
    pub async fn get_int_or_default(&self, name: &str) -> Result<i32> {
        self.get_int(name, DEFAULT_INT).await
    }

    /// Read with the conventional default, `-1`.
    pub async fn get_long_or_default(&self, name: &str) -> Result<i64> {
        self.get_long(name, DEFAULT_LONG).await
    }

    /// Read with the conventional default, `-1.0`.
    pub async fn get_float_or_default(&self, name: &str) -> Result<f32> {
        self.get_float(name, DEFAULT_FLOAT).await
    }

    /// Read with the conventional default, `-1.0`.
    pub async fn get_double_or_default(&self, name: &str) -> Result<f64> {
        self.get_double(name, DEFAULT_DOUBLE).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reactive Reads
    // ─────────────────────────────────────────────────────────────────────────

    pub fn bool_flow(&self, name: &str, default: bool) -> Result<PrefStream<bool>> {
        Ok(self.flow(&bool_key(name)?, default))
    }

    /// Unlike the other flows, the default is optional: when it is `None`
    /// and the entry is absent, nothing is emitted for that change.
    pub fn string_flow(&self, name: &str, default: Option<String>) -> Result<PrefStream<String>> {
        Ok(value_stream(self.store.subscribe(), string_key(name)?, default))
    }

    pub fn int_flow(&self, name: &str, default: i32) -> Result<PrefStream<i32>> {
        Ok(self.flow(&int_key(name)?, default))
    }

    pub fn long_flow(&self, name: &str, default: i64) -> Result<PrefStream<i64>> {
        Ok(self.flow(&long_key(name)?, default))
    }

    pub fn float_flow(&self, name: &str, default: f32) -> Result<PrefStream<f32>> {
        Ok(self.flow(&float_key(name)?, default))
    }

    pub fn double_flow(&self, name: &str, default: f64) -> Result<PrefStream<f64>> {
        Ok(self.flow(&double_key(name)?, default))
    }
}
