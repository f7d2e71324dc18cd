pub mod collection;
pub mod identity;
pub mod key;
pub use collection::CollectionDiff;
pub use identity::{Identity, Slot};
pub use key::KeySpec;

use serde_json::{Map, Value};

/// A structured value whose fields can be looked up by name.
///
/// Snapshots are compared only through the fields named by a [`KeySpec`], so
/// this is all the diff needs from a record.
pub trait Record {
    fn field(&self, name: &str) -> Option<&Value>;
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(name),
            _ => None,
        }
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }
}
