//! Preference values and their type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// The declared type of a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PrefType {
    /// `bool`
    Bool = 0,
    /// `String`
    String = 1,
    /// 32-bit signed integer.
    Int = 2,
    /// 64-bit signed integer.
    Long = 3,
    /// 32-bit float.
    Float = 4,
    /// 64-bit float.
    Double = 5,
}

impl PrefType {
    /// All supported types, in tag order.
    pub const ALL: [PrefType; 6] = [
        PrefType::Bool,
        PrefType::String,
        PrefType::Int,
        PrefType::Long,
        PrefType::Float,
        PrefType::Double,
    ];

    /// Convert to the stable tag used by persistent backends.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from a persisted tag.
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Bool),
            1 => Some(Self::String),
            2 => Some(Self::Int),
            3 => Some(Self::Long),
            4 => Some(Self::Float),
            5 => Some(Self::Double),
            _ => None,
        }
    }

    /// Short lowercase name, used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for PrefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for PrefType {
    type Error = CoreError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_u8(tag).ok_or(CoreError::UnknownTypeTag(tag))
    }
}

/// A stored preference value.
///
/// Equality compares float payloads by bit pattern: `0.0` and `-0.0` differ,
/// and a NaN equals the same NaN. Stores rely on this to detect no-op edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PrefValue {
    Bool(bool),
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl PrefValue {
    /// The type tag of this value.
    pub fn pref_type(&self) -> PrefType {
        match self {
            Self::Bool(_) => PrefType::Bool,
            Self::String(_) => PrefType::String,
            Self::Int(_) => PrefType::Int,
            Self::Long(_) => PrefType::Long,
            Self::Float(_) => PrefType::Float,
            Self::Double(_) => PrefType::Double,
        }
    }
}

impl PartialEq for PrefValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for PrefValue {}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{:?}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
        }
    }
}

/// A Rust type that can be stored as a preference.
///
/// Implemented for exactly the six supported types. The associated
/// [`PrefType`] ties a [`PrefKey<T>`](crate::PrefKey) to its stored variant,
/// so a typed key can never read or write a value of another type.
pub trait PrefValueType: Clone + Send + Sync + 'static {
    /// The tag of the stored variant.
    const TYPE: PrefType;

    /// Wrap into a [`PrefValue`].
    fn into_value(self) -> PrefValue;

    /// Extract from a [`PrefValue`], if it holds this type.
    fn from_value(value: &PrefValue) -> Option<Self>;
}

macro_rules! impl_pref_value_type {
    ($ty:ty, $variant:ident) => {
        impl PrefValueType for $ty {
            const TYPE: PrefType = PrefType::$variant;

            fn into_value(self) -> PrefValue {
                PrefValue::$variant(self)
            }

            fn from_value(value: &PrefValue) -> Option<Self> {
                match value {
                    PrefValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_pref_value_type!(bool, Bool);
impl_pref_value_type!(String, String);
impl_pref_value_type!(i32, Int);
impl_pref_value_type!(i64, Long);
impl_pref_value_type!(f32, Float);
impl_pref_value_type!(f64, Double);

// Conventional read defaults. `String` has no natural sentinel.
pub const DEFAULT_BOOL: bool = false;
pub const DEFAULT_INT: i32 = -1;
pub const DEFAULT_LONG: i64 = -1;
pub const DEFAULT_FLOAT: f32 = -1.0;
pub const DEFAULT_DOUBLE: f64 = -1.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_roundtrip() {
        for ty in PrefType::ALL {
            assert_eq!(PrefType::from_u8(ty.to_u8()), Some(ty));
        }
        assert_eq!(PrefType::from_u8(6), None);
        assert_eq!(PrefType::try_from(9), Err(CoreError::UnknownTypeTag(9)));
    }

    #[test]
    fn test_value_reports_its_type() {
        assert_eq!(PrefValue::Float(1.5).pref_type(), PrefType::Float);
        assert_eq!(PrefValue::Double(1.5).pref_type(), PrefType::Double);
        assert_eq!(PrefValue::String("x".into()).pref_type(), PrefType::String);
    }

    #[test]
    fn test_from_value_rejects_other_variants() {
        assert_eq!(i32::from_value(&PrefValue::Int(3)), Some(3));
        assert_eq!(i32::from_value(&PrefValue::Long(3)), None);
        assert_eq!(f32::from_value(&PrefValue::Double(2.0)), None);
        assert_eq!(bool::from_value(&PrefValue::Int(1)), None);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_ne!(PrefValue::Double(0.0), PrefValue::Double(-0.0));
        assert_ne!(PrefValue::Float(0.0), PrefValue::Float(-0.0));
        assert_eq!(PrefValue::Double(f64::NAN), PrefValue::Double(f64::NAN));
        assert_eq!(PrefValue::Float(f32::NAN), PrefValue::Float(f32::NAN));
        assert_ne!(PrefValue::Int(1), PrefValue::Long(1));
    }

    #[test]
    fn test_value_serde_json_shape() {
        let json = serde_json::to_string(&PrefValue::Int(3)).unwrap();
        assert_eq!(json, r#"{"Int":3}"#);
        let back: PrefValue = serde_json::from_str(r#"{"String":"alice"}"#).unwrap();
        assert_eq!(back, PrefValue::String("alice".into()));
    }
}
