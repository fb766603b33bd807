//! Proptest generators for property-based testing.

use proptest::prelude::*;

use prefkit_core::{PrefType, PrefValue};

/// Generate a non-empty key name.
pub fn key_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,31}".prop_map(String::from)
}

/// Generate a PrefType.
pub fn pref_type() -> impl Strategy<Value = PrefType> {
    prop_oneof![
        Just(PrefType::Bool),
        Just(PrefType::String),
        Just(PrefType::Int),
        Just(PrefType::Long),
        Just(PrefType::Float),
        Just(PrefType::Double),
    ]
}

/// Generate a value of the given type.
///
/// Floats are finite so generated values compare equal to themselves.
pub fn value_of(ty: PrefType) -> BoxedStrategy<PrefValue> {
    match ty {
        PrefType::Bool => any::<bool>().prop_map(PrefValue::Bool).boxed(),
        PrefType::String => ".{0,64}".prop_map(PrefValue::String).boxed(),
        PrefType::Int => any::<i32>().prop_map(PrefValue::Int).boxed(),
        PrefType::Long => any::<i64>().prop_map(PrefValue::Long).boxed(),
        PrefType::Float => (prop::num::f32::NORMAL | prop::num::f32::ZERO)
            .prop_map(PrefValue::Float)
            .boxed(),
        PrefType::Double => (prop::num::f64::NORMAL | prop::num::f64::ZERO)
            .prop_map(PrefValue::Double)
            .boxed(),
    }
}

/// Generate a value of any supported type.
pub fn pref_value() -> impl Strategy<Value = PrefValue> {
    pref_type().prop_flat_map(value_of)
}

/// Generate snapshot entries with distinct names.
pub fn snapshot_entries(max_len: usize) -> impl Strategy<Value = Vec<(String, PrefValue)>> {
    prop::collection::btree_map(key_name(), pref_value(), 0..=max_len)
        .prop_map(|entries| entries.into_iter().collect())
}
