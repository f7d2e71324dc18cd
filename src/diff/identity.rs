use std::hash::{Hash, Hasher};

use serde_json::Value;

use crate::json::{hash_value, values_equal};

/// One component of an [`Identity`].
///
/// `Missing` stands for a key field the record does not carry. It is a value
/// like any other: two records missing the same field match each other, but
/// never a record holding an explicit `null`. Present values compare
/// structurally with numbers taken by value, so `1` and `1.0` match.
#[derive(Debug, Clone)]
pub enum Slot {
    Missing,
    Present(Value),
}

impl From<Option<&Value>> for Slot {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None => Slot::Missing,
            Some(value) => Slot::Present(value.clone()),
        }
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Missing, Slot::Missing) => true,
            (Slot::Present(a), Slot::Present(b)) => values_equal(a, b),
            _ => false,
        }
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Slot::Missing => state.write_u8(0),
            Slot::Present(value) => {
                state.write_u8(1);
                hash_value(value, state);
            }
        }
    }
}

/// The key field values of a record, in key order, compared field by field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(Vec<Slot>);

impl Identity {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self(slots)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.0
    }
}
