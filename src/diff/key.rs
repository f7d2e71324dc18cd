use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Identity, Record, Slot};

pub const DEFAULT_KEY_FIELD: &str = "id";

/// Field(s) identifying a record within one snapshot.
///
/// Deserializes from either `"id"` or `["id", "type"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    Field(String),
    Composite(Vec<String>),
}

impl Default for KeySpec {
    fn default() -> Self {
        Self::Field(DEFAULT_KEY_FIELD.to_string())
    }
}

impl KeySpec {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn composite<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Composite(names.into_iter().map(Into::into).collect())
    }

    pub fn fields(&self) -> &[String] {
        match self {
            Self::Field(name) => std::slice::from_ref(name),
            Self::Composite(names) => names,
        }
    }

    pub fn identity_of<R: Record + ?Sized>(&self, record: &R) -> Identity {
        Identity::new(
            self.fields()
                .iter()
                .map(|name| Slot::from(record.field(name)))
                .collect(),
        )
    }

    /// Record reduced to its key fields. Absent fields are left out.
    pub fn project<R: Record + ?Sized>(&self, record: &R) -> Map<String, Value> {
        self.fields()
            .iter()
            .filter_map(|name| record.field(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }
}

impl FromStr for KeySpec {
    type Err = Infallible;

    /// `"id"` is a single field, `"id,type"` a composite key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s.split(',').map(str::trim).collect();
        match names.as_slice() {
            [name] => Ok(Self::field(*name)),
            _ => Ok(Self::composite(names)),
        }
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join(","))
    }
}
