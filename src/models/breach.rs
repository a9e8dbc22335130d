//! Single breach record.

use std::ops::Index;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PwnedError, Result};
use crate::support::to_pascal_case;

/// A breach as returned by the HIBP API.
///
/// The record keeps the API's JSON object untouched (key order included) and
/// has no mutating methods. Fields are looked up with [`Breach::get`], which
/// accepts both the API's PascalCase names and snake_case aliases:
///
/// ```
/// use pwnedapi::Breach;
/// use serde_json::json;
///
/// let breach = Breach::try_from(json!({"Name": "Adobe", "PwnCount": 152445165})).unwrap();
/// assert_eq!(breach.get("PwnCount"), breach.get("pwn_count"));
/// assert_eq!(breach.name(), Some("Adobe"));
/// assert!(breach.get("unknown").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breach {
    item: Map<String, Value>,
}

static NULL: Value = Value::Null;

impl Breach {
    pub fn new(item: Map<String, Value>) -> Self {
        Self { item }
    }

    /// Look up a field by its literal name, then by its PascalCase form.
    ///
    /// `null` values are treated as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.item
            .get(field)
            .filter(|v| !v.is_null())
            .or_else(|| self.item.get(&to_pascal_case(field)))
            .filter(|v| !v.is_null())
    }

    /// Look up a field and decode it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Option<T> {
        self.get(field)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Whether the literal key is present with a non-null value.
    pub fn contains(&self, field: &str) -> bool {
        self.item.get(field).is_some_and(|v| !v.is_null())
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.item
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.item
    }

    /// Iterate over `(field, value)` pairs in source order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.item.iter()
    }

    pub fn len(&self) -> usize {
        self.item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    fn bool_field(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    fn datetime_field(&self, field: &str) -> Option<DateTime<Utc>> {
        self.str_field(field)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc))
    }

    /// Stable identifier, e.g. `"Adobe"`.
    pub fn name(&self) -> Option<&str> {
        self.str_field("Name")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("Title")
    }

    pub fn domain(&self) -> Option<&str> {
        self.str_field("Domain")
    }

    /// Date the breach occurred (`YYYY-MM-DD`).
    pub fn breach_date(&self) -> Option<NaiveDate> {
        self.str_field("BreachDate")
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// When the breach was added to HIBP.
    pub fn added_date(&self) -> Option<DateTime<Utc>> {
        self.datetime_field("AddedDate")
    }

    pub fn modified_date(&self) -> Option<DateTime<Utc>> {
        self.datetime_field("ModifiedDate")
    }

    /// Number of accounts affected.
    pub fn pwn_count(&self) -> Option<u64> {
        self.get("PwnCount").and_then(Value::as_u64)
    }

    /// HTML description of the incident.
    pub fn description(&self) -> Option<&str> {
        self.str_field("Description")
    }

    pub fn logo_path(&self) -> Option<&str> {
        self.str_field("LogoPath")
    }

    pub fn attribution(&self) -> Option<&str> {
        self.str_field("Attribution")
    }

    pub fn disclosure_url(&self) -> Option<&str> {
        self.str_field("DisclosureUrl")
    }

    /// Kinds of data exposed, e.g. `["Email addresses", "Passwords"]`.
    pub fn data_classes(&self) -> Option<Vec<&str>> {
        self.get("DataClasses")
            .and_then(Value::as_array)
            .map(|classes| classes.iter().filter_map(Value::as_str).collect())
    }

    pub fn is_verified(&self) -> Option<bool> {
        self.bool_field("IsVerified")
    }

    pub fn is_fabricated(&self) -> Option<bool> {
        self.bool_field("IsFabricated")
    }

    pub fn is_sensitive(&self) -> Option<bool> {
        self.bool_field("IsSensitive")
    }

    pub fn is_retired(&self) -> Option<bool> {
        self.bool_field("IsRetired")
    }

    pub fn is_spam_list(&self) -> Option<bool> {
        self.bool_field("IsSpamList")
    }

    pub fn is_malware(&self) -> Option<bool> {
        self.bool_field("IsMalware")
    }

    pub fn is_subscription_free(&self) -> Option<bool> {
        self.bool_field("IsSubscriptionFree")
    }

    pub fn is_stealer_log(&self) -> Option<bool> {
        self.bool_field("IsStealerLog")
    }
}

/// Literal-key access; missing keys yield `Value::Null`.
impl Index<&str> for Breach {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        self.item.get(field).unwrap_or(&NULL)
    }
}

impl From<Map<String, Value>> for Breach {
    fn from(item: Map<String, Value>) -> Self {
        Self::new(item)
    }
}

/// Accepts an object; `null` and an empty array (an empty body) give an
/// empty record.
impl TryFrom<Value> for Breach {
    type Error = PwnedError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(item) => Ok(Self::new(item)),
            Value::Null => Ok(Self::default()),
            Value::Array(items) if items.is_empty() => Ok(Self::default()),
            other => Err(PwnedError::unexpected_shape("object", &other)),
        }
    }
}

impl<'a> IntoIterator for &'a Breach {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.item.iter()
    }
}
