//! JSON value comparison with numbers taken by value, so `1`, `1.0` and
//! `1e0` are the same number, as they are once parsed by a JavaScript engine.

use std::hash::{Hash, Hasher};

use serde_json::{Number, Value};

// 2^63 and 2^64: the float range holding every i64 and u64
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
const U64_END_F: f64 = 18_446_744_073_709_551_616.0;

/// A number reduced to one form per value: integral floats in integer range
/// become integers, `-0.0` included.
#[derive(Debug, Clone, Copy, PartialEq)]
enum NumValue {
    Int(i128),
    Float(f64),
}

impl NumValue {
    fn of(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return NumValue::Int(i128::from(i));
        }
        if let Some(u) = n.as_u64() {
            return NumValue::Int(i128::from(u));
        }
        let f = n.as_f64().unwrap_or(f64::NAN);
        if f.fract() == 0.0 && (I64_MIN_F..U64_END_F).contains(&f) {
            NumValue::Int(f as i128)
        } else {
            NumValue::Float(f)
        }
    }

    fn to_number(self) -> Option<Number> {
        match self {
            NumValue::Int(i) => i64::try_from(i)
                .map(Number::from)
                .or_else(|_| u64::try_from(i).map(Number::from))
                .ok(),
            NumValue::Float(f) => Number::from_f64(f),
        }
    }
}

/// Structural equality of two JSON values, numbers compared by value.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => NumValue::of(a) == NumValue::of(b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

/// Hash agreeing with [`values_equal`]. Objects hash by key set only.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(n) => {
            state.write_u8(2);
            match NumValue::of(n) {
                NumValue::Int(i) => i.hash(state),
                NumValue::Float(f) => f.to_bits().hash(state),
            }
        }
        Value::String(s) => {
            state.write_u8(3);
            s.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            state.write_u8(5);
            map.len().hash(state);
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            keys.hash(state);
        }
    }
}

/// Copy of `value` with every number in its canonical form, `[1.0]`
/// becoming `[1]`.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Number(n) => NumValue::of(n)
            .to_number()
            .map_or_else(|| value.clone(), Value::Number),
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}
