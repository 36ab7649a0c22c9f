//! Reading and writing properties of domain objects.
//!
//! A [`PropertyAccessor`] exposes the top-level properties of one object.
//! Dotted paths (`"address.city"`) are resolved by [`read_path`] and
//! [`write_path`]: the first segment goes through the accessor, the rest
//! descend into nested [`Value::Map`]s.
//!
//! # Path resolution
//!
//! | Situation | Result |
//! |---|---|
//! | key missing at any level | [`PropertyAccessError::NotFound`] |
//! | `null` partway along the path | `Ok(Value::Null)` |
//! | scalar or list partway along the path | [`PropertyAccessError::NotNavigable`] |

use super::PropertyName;
use crate::foundation::PropertyAccessError;
use crate::value::{Value, ValueMap};

// ============================================================================
// ACCESSOR TRAIT
// ============================================================================

/// Access to the top-level properties of a domain object.
///
/// Implemented for [`Value`], [`ValueMap`] and [`serde_json::Value`]. Plain
/// structs can be snapshotted with [`Value::from_serialize`], or implement
/// the trait by hand:
///
/// ```
/// use nebula_rules::foundation::PropertyAccessError;
/// use nebula_rules::property::PropertyAccessor;
/// use nebula_rules::value::Value;
///
/// struct Person { name: String, age: u32 }
///
/// impl PropertyAccessor for Person {
///     fn get_property(&self, name: &str) -> Result<Value, PropertyAccessError> {
///         match name {
///             "name" => Ok(Value::from(self.name.as_str())),
///             "age" => Ok(Value::from(self.age)),
///             _ => Err(PropertyAccessError::not_found(name)),
///         }
///     }
/// }
///
/// let ada = Person { name: "Ada".into(), age: 36 };
/// assert_eq!(ada.get_property("age"), Ok(Value::from(36)));
/// ```
pub trait PropertyAccessor {
    /// Reads one top-level property.
    ///
    /// # Errors
    ///
    /// [`PropertyAccessError::NotFound`] if the object has no such property.
    fn get_property(&self, name: &str) -> Result<Value, PropertyAccessError>;

    /// Writes one top-level property.
    ///
    /// # Errors
    ///
    /// [`PropertyAccessError::ReadOnly`] unless the accessor supports writes.
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), PropertyAccessError> {
        let _ = value;
        Err(PropertyAccessError::ReadOnly {
            path: name.to_owned(),
        })
    }
}

impl PropertyAccessor for ValueMap {
    fn get_property(&self, name: &str) -> Result<Value, PropertyAccessError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| PropertyAccessError::not_found(name))
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), PropertyAccessError> {
        self.insert(name.to_owned(), value);
        Ok(())
    }
}

impl PropertyAccessor for Value {
    fn get_property(&self, name: &str) -> Result<Value, PropertyAccessError> {
        match self {
            Self::Map(map) => map.get_property(name),
            other => Err(PropertyAccessError::NotNavigable {
                path: name.to_owned(),
                kind: other.kind(),
            }),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), PropertyAccessError> {
        match self {
            Self::Map(map) => map.set_property(name, value),
            other => Err(PropertyAccessError::NotNavigable {
                path: name.to_owned(),
                kind: other.kind(),
            }),
        }
    }
}

impl PropertyAccessor for serde_json::Value {
    fn get_property(&self, name: &str) -> Result<Value, PropertyAccessError> {
        match self {
            Self::Object(map) => map
                .get(name)
                .cloned()
                .map(Value::from_json)
                .ok_or_else(|| PropertyAccessError::not_found(name)),
            other => Err(PropertyAccessError::NotNavigable {
                path: name.to_owned(),
                kind: Value::from_json(other.clone()).kind(),
            }),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), PropertyAccessError> {
        match self {
            Self::Object(map) => {
                map.insert(name.to_owned(), value.into_json());
                Ok(())
            }
            other => Err(PropertyAccessError::NotNavigable {
                path: name.to_owned(),
                kind: Value::from_json(other.clone()).kind(),
            }),
        }
    }
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

/// Reads a possibly dotted property path.
///
/// # Errors
///
/// See the [module documentation](self).
///
/// # Examples
///
/// ```
/// use nebula_rules::property::{PropertyName, read_path};
/// use nebula_rules::value::Value;
///
/// let person = Value::from_json(serde_json::json!({ "address": { "city": "Oslo" } }));
/// let city = PropertyName::new("address.city")?;
/// assert_eq!(read_path(&person, &city), Ok(Value::from("Oslo")));
/// # Ok::<(), nebula_rules::foundation::ConstraintError>(())
/// ```
pub fn read_path(bean: &dyn PropertyAccessor, path: &PropertyName) -> Result<Value, PropertyAccessError> {
    let mut segments = path.segments();
    let root = segments.next().unwrap_or_default();
    let mut current = bean.get_property(root)?;
    let mut walked = root.len();

    for segment in segments {
        walked += 1 + segment.len();
        current = match current {
            Value::Map(mut map) => map
                .swap_remove(segment)
                .ok_or_else(|| PropertyAccessError::not_found(&path.as_str()[..walked]))?,
            Value::Null => return Ok(Value::Null),
            other => {
                return Err(PropertyAccessError::NotNavigable {
                    path: path.as_str()[..walked].to_owned(),
                    kind: other.kind(),
                });
            }
        };
    }

    Ok(current)
}

/// Writes a possibly dotted property path.
///
/// Nested segments update the enclosing map in place; the last segment may
/// introduce a new key.
///
/// # Errors
///
/// [`PropertyAccessError::NotFound`] / [`PropertyAccessError::NotNavigable`]
/// if an intermediate segment does not resolve to a map, or whatever the
/// accessor's [`set_property`](PropertyAccessor::set_property) returns.
pub fn write_path(
    bean: &mut dyn PropertyAccessor,
    path: &PropertyName,
    value: impl Into<Value>,
) -> Result<(), PropertyAccessError> {
    let value = value.into();
    let segments: Vec<&str> = path.segments().collect();
    let Some((root, nested)) = segments.split_first() else {
        return Err(PropertyAccessError::not_found(path.as_str()));
    };
    let Some((last, intermediate)) = nested.split_last() else {
        return bean.set_property(root, value);
    };

    let mut root_value = bean.get_property(root)?;
    let mut walked = root.len();
    let mut current = &mut root_value;
    for segment in intermediate {
        walked += 1 + segment.len();
        current = match current {
            Value::Map(map) => map
                .get_mut(*segment)
                .ok_or_else(|| PropertyAccessError::not_found(&path.as_str()[..walked]))?,
            other => {
                return Err(PropertyAccessError::NotNavigable {
                    path: path.as_str()[..walked].to_owned(),
                    kind: other.kind(),
                });
            }
        };
    }

    match current {
        Value::Map(map) => {
            map.insert((*last).to_owned(), value);
        }
        other => {
            return Err(PropertyAccessError::NotNavigable {
                path: path.as_str()[..walked].to_owned(),
                kind: other.kind(),
            });
        }
    }

    bean.set_property(root, root_value)
}
