//! Ordered collection of breach records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PwnedError, Result};
use crate::models::breach::Breach;

/// A list of breaches as returned by the HIBP API.
///
/// Items are kept as raw JSON and turned into [`Breach`] records on access.
/// Out-of-range indexes yield an empty record rather than an error.
///
/// ```
/// use pwnedapi::Breaches;
/// use serde_json::json;
///
/// let breaches = Breaches::try_from(json!([{"Name": "Adobe"}, {"Name": "Dropbox"}])).unwrap();
/// assert_eq!(breaches.len(), 2);
/// assert_eq!(breaches.get(1).name(), Some("Dropbox"));
/// assert!(breaches.get(9).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breaches {
    items: Vec<Value>,
}

impl Breaches {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    /// The "no breaches" collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The record at `index`; empty when out of range or not an object.
    pub fn get(&self, index: usize) -> Breach {
        self.items.get(index).map(to_breach).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records in source order.
    pub fn iter(&self) -> impl Iterator<Item = Breach> + '_ {
        self.items.iter().map(to_breach)
    }

    /// The raw JSON items.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.items.clone()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.items
    }
}

fn to_breach(item: &Value) -> Breach {
    match item {
        Value::Object(map) => Breach::new(map.clone()),
        _ => Breach::default(),
    }
}

fn into_breach(item: Value) -> Breach {
    match item {
        Value::Object(map) => Breach::new(map),
        _ => Breach::default(),
    }
}

impl From<Vec<Value>> for Breaches {
    fn from(items: Vec<Value>) -> Self {
        Self::new(items)
    }
}

/// Accepts an array; `null` and an empty object (an empty body) give an
/// empty collection.
impl TryFrom<Value> for Breaches {
    type Error = PwnedError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::new(items)),
            Value::Null => Ok(Self::empty()),
            Value::Object(map) if map.is_empty() => Ok(Self::empty()),
            other => Err(PwnedError::unexpected_shape("array", &other)),
        }
    }
}

impl IntoIterator for Breaches {
    type Item = Breach;
    type IntoIter = std::iter::Map<std::vec::IntoIter<Value>, fn(Value) -> Breach>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter().map(into_breach as fn(Value) -> Breach)
    }
}

impl<'a> IntoIterator for &'a Breaches {
    type Item = Breach;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Value>, fn(&'a Value) -> Breach>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().map(to_breach as fn(&'a Value) -> Breach)
    }
}
