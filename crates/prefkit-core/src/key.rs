//! Typed preference keys.
//!
//! A [`PrefKey<T>`] pairs a name with the value type `T`. The type lives in
//! the key handle itself, so a key built for `i32` can only ever read or
//! write `i32` values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::{CoreError, Result};
use crate::value::{PrefType, PrefValueType};

/// A named preference key with a statically known value type.
pub struct PrefKey<T> {
    name: String,
    _type: PhantomData<fn() -> T>,
}

impl<T: PrefValueType> PrefKey<T> {
    /// Create a key. The name must be non-empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::EmptyKeyName);
        }
        Ok(Self {
            name,
            _type: PhantomData,
        })
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value type.
    pub fn pref_type(&self) -> PrefType {
        T::TYPE
    }
}

impl<T> Clone for PrefKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _type: PhantomData,
        }
    }
}

impl<T: PrefValueType> fmt::Debug for PrefKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrefKey<{}>({:?})", T::TYPE, self.name)
    }
}

impl<T: PrefValueType> fmt::Display for PrefKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> PartialEq for PrefKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for PrefKey<T> {}

impl<T> Hash for PrefKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Key for a `bool` preference.
pub fn bool_key(name: impl Into<String>) -> Result<PrefKey<bool>> {
    PrefKey::new(name)
}

/// Key for a `String` preference.
pub fn string_key(name: impl Into<String>) -> Result<PrefKey<String>> {
    PrefKey::new(name)
}

/// Key for an `i32` preference.
pub fn int_key(name: impl Into<String>) -> Result<PrefKey<i32>> {
    PrefKey::new(name)
}

/// Key for an `i64` preference.
pub fn long_key(name: impl Into<String>) -> Result<PrefKey<i64>> {
    PrefKey::new(name)
}

/// Key for an `f32` preference.
pub fn float_key(name: impl Into<String>) -> Result<PrefKey<f32>> {
    PrefKey::new(name)
}

/// Key for an `f64` preference.
pub fn double_key(name: impl Into<String>) -> Result<PrefKey<f64>> {
    PrefKey::new(name)
}
