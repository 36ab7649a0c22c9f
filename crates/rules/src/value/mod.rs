//! Dynamic values that constraints are evaluated against.
//!
//! Domain objects expose their properties as [`Value`]s through a
//! [`PropertyAccessor`](crate::property::PropertyAccessor). The enum is
//! deliberately small: scalars, text, ordered lists, and insertion-ordered
//! maps. Nested maps are what dotted property paths (`"address.city"`)
//! descend through.
//!
//! # Examples
//!
//! ```
//! use nebula_rules::value::{Value, ValueKind};
//!
//! let age = Value::from(42);
//! assert_eq!(age.kind(), ValueKind::Int);
//!
//! let person = Value::from_json(serde_json::json!({ "name": "Ada", "age": 36 }));
//! assert_eq!(person.get("name"), Some(&Value::from("Ada")));
//! ```

pub mod compare;

pub use compare::{NaturalOrder, NullSafeComparator, ValueComparator};

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::PropertyAccessError;

/// Ordered key-value storage used by [`Value::Map`].
pub type ValueMap = IndexMap<String, Value>;

/// An opaque value a constraint can test.
///
/// Equality is structural: `Int(1)` and `Float(1.0)` are *not* equal, while
/// ordering (see [`compare`]) treats them as the same number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Insertion-ordered map, typically a nested domain object.
    Map(ValueMap),
}

/// Discriminant of a [`Value`], used for type checks and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::Text`]
    Text,
    /// [`Value::List`]
    List,
    /// [`Value::Map`]
    Map,
}

impl ValueKind {
    /// Lowercase name for messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    /// `Int` and `Float`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Whether two kinds may be compared with each other.
    ///
    /// Integers and floats form one numeric family; every other kind is only
    /// compatible with itself.
    #[must_use]
    pub fn is_compatible_with(self, other: Self) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Creates a text value.
    pub fn text(v: impl Into<String>) -> Self {
        Self::Text(v.into())
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the text of a [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer of a [`Value::Int`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns any numeric value widened to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean of a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrows the elements of a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the entries of a [`Value::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Text form of a scalar value.
    ///
    /// Text is borrowed; booleans and numbers are rendered. Null, lists and
    /// maps have no text form.
    #[must_use]
    pub fn text_rendering(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            Self::Int(i) => Some(Cow::Owned(i.to_string())),
            Self::Float(f) => Some(Cow::Owned(f.to_string())),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Converts a JSON document into a value.
    ///
    /// Integers that fit in `i64` become [`Value::Int`]; every other number
    /// becomes [`Value::Float`].
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts this value into a JSON document.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(b),
            Self::Int(i) => serde_json::Value::from(i),
            Self::Float(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s),
            Self::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Self::into_json).collect())
            }
            Self::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into_json())).collect(),
            ),
        }
    }

    /// Snapshots any serializable domain object into a value.
    ///
    /// This is the reflection-free way to make a plain struct readable by
    /// property constraints: derive `Serialize` and snapshot it.
    ///
    /// # Examples
    ///
    /// ```
    /// use nebula_rules::value::Value;
    ///
    /// #[derive(serde::Serialize)]
    /// struct Person { name: String, age: u32 }
    ///
    /// let snapshot = Value::from_serialize(&Person { name: "Ada".into(), age: 36 }).unwrap();
    /// assert_eq!(snapshot.get("age"), Some(&Value::Int(36)));
    /// ```
    pub fn from_serialize<T>(bean: &T) -> Result<Self, PropertyAccessError>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(bean)
            .map(Self::from_json)
            .map_err(|e| PropertyAccessError::Snapshot(e.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::Float(v as f64), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Self::Float(v as f64), Self::Int)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(v: Cow<'_, str>) -> Self {
        Self::Text(v.into_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Self::Map(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::from_json(v)
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        v.into_json()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(1).kind(), ValueKind::Int);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("x").kind(), ValueKind::Text);
        assert_eq!(Value::from(vec![1, 2]).kind(), ValueKind::List);
    }

    #[test]
    fn test_numeric_family_is_compatible() {
        assert!(ValueKind::Int.is_compatible_with(ValueKind::Float));
        assert!(ValueKind::Text.is_compatible_with(ValueKind::Text));
        assert!(!ValueKind::Text.is_compatible_with(ValueKind::Int));
    }

    #[test]
    fn test_structural_equality_keeps_int_and_float_apart() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::from("a"), Value::Text("a".to_owned()));
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let value = Value::from_json(json!({ "b": 1, "a": [true, null], "c": 2.5 }));
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(
            value.get("a"),
            Some(&Value::List(vec![Value::Bool(true), Value::Null]))
        );
        assert_eq!(value.get("c"), Some(&Value::Float(2.5)));
    }

    #[test]
    fn test_json_round_trip_of_nested_object() {
        let doc = json!({ "address": { "city": "Oslo", "zip": 150 } });
        assert_eq!(Value::from_json(doc.clone()).into_json(), doc);
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Person {
            name: String,
            nickname: Option<String>,
        }

        let value = Value::from_serialize(&Person {
            name: "Ada".to_owned(),
            nickname: None,
        })
        .unwrap();
        assert_eq!(value.get("name"), Some(&Value::from("Ada")));
        assert_eq!(value.get("nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(Value::from(12).text_rendering().as_deref(), Some("12"));
        assert_eq!(Value::from("ab").text_rendering().as_deref(), Some("ab"));
        assert!(Value::Null.text_rendering().is_none());
        assert!(Value::from(vec![1]).text_rendering().is_none());
    }

    #[test]
    fn test_display() {
        let value: Value = [("name", Value::from("Ada")), ("tags", Value::from(vec![1, 2]))]
            .into_iter()
            .collect();
        assert_eq!(value.to_string(), r#"{name: "Ada", tags: [1, 2]}"#);
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: Value = serde_json::from_str(r#"{"n": 3, "f": 0.5, "s": "x", "z": null}"#)
            .unwrap();
        assert_eq!(value.get("n"), Some(&Value::Int(3)));
        assert_eq!(value.get("f"), Some(&Value::Float(0.5)));
        assert_eq!(value.get("z"), Some(&Value::Null));
    }
}
