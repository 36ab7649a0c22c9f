//! Uniqueness of a property value among existing objects.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::{PropertyAccessor, PropertyName, read_path};
use crate::foundation::{EvaluationResult, PropertyAccessError};
use crate::value::Value;

/// Decides whether a property value is unique.
///
/// Implemented for [`ExistingValues`] and for any
/// `Fn(&str, &Value) -> bool + Send + Sync` closure, which receives the
/// property path and the candidate value.
pub trait UniquenessCheck: Send + Sync {
    /// Returns `true` if no other object holds `value` for `property`.
    fn is_unique(&self, property: &str, value: &Value) -> bool;
}

impl<F> UniquenessCheck for F
where
    F: Fn(&str, &Value) -> bool + Send + Sync,
{
    fn is_unique(&self, property: &str, value: &Value) -> bool {
        self(property, value)
    }
}

// ============================================================================
// EXISTING VALUES
// ============================================================================

/// A snapshot of one property's values across a collection of objects.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
/// use serde_json::json;
///
/// let users = vec![
///     Value::from_json(json!({ "login": "ada" })),
///     Value::from_json(json!({ "login": "grace" })),
/// ];
/// let login = PropertyName::new("login")?;
///
/// // Editing users[0]: its own login does not count as a clash.
/// let taken = ExistingValues::snapshot(&users, &login)?.excluding_index(0);
/// assert!(taken.is_unique("login", &Value::from("ada")));
/// assert!(!taken.is_unique("login", &Value::from("grace")));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExistingValues {
    values: Vec<Value>,
}

impl ExistingValues {
    /// Uses `values` as the existing values.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads `property` from every object, in order.
    ///
    /// # Errors
    ///
    /// The first property access error.
    pub fn snapshot<'a, A, I>(beans: I, property: &PropertyName) -> Result<Self, PropertyAccessError>
    where
        A: PropertyAccessor + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        let values = beans
            .into_iter()
            .map(|bean| read_path(bean, property))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    /// Drops the value taken from the object at `index`, typically the one
    /// being edited.
    #[must_use = "builder methods must be chained or built"]
    pub fn excluding_index(mut self, index: usize) -> Self {
        if index < self.values.len() {
            self.values.remove(index);
        }
        self
    }

    /// The snapshotted values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl UniquenessCheck for ExistingValues {
    fn is_unique(&self, _property: &str, value: &Value) -> bool {
        !self.values.contains(value)
    }
}

// ============================================================================
// CONSTRAINT
// ============================================================================

/// Passes when the property's value is unique according to a
/// [`UniquenessCheck`].
#[derive(Clone)]
pub struct UniquePropertyValueConstraint {
    property_name: PropertyName,
    check: Arc<dyn UniquenessCheck>,
    type_tag: Cow<'static, str>,
}

impl UniquePropertyValueConstraint {
    /// Default type tag.
    pub const TYPE_TAG: &'static str = "unique";

    /// Checks `property_name` with `check`.
    pub fn new(property_name: PropertyName, check: impl UniquenessCheck + 'static) -> Self {
        Self::from_arc(property_name, Arc::new(check))
    }

    /// Same as [`new`](Self::new) with a shared check.
    #[must_use]
    pub fn from_arc(property_name: PropertyName, check: Arc<dyn UniquenessCheck>) -> Self {
        Self {
            property_name,
            check,
            type_tag: Cow::Borrowed(Self::TYPE_TAG),
        }
    }

    /// Overrides the type tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.type_tag = tag.into();
        self
    }

    /// The property checked.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        &self.property_name
    }

    /// The uniqueness check.
    #[must_use]
    pub fn check(&self) -> &Arc<dyn UniquenessCheck> {
        &self.check
    }

    /// Reads the property and checks it.
    ///
    /// # Errors
    ///
    /// If the property cannot be read.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        let value = read_path(bean, &self.property_name)?;
        Ok(self.check.is_unique(self.property_name.as_str(), &value))
    }

    /// The type tag, `"unique"` unless overridden.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        Some(&self.type_tag)
    }
}

impl fmt::Debug for UniquePropertyValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniquePropertyValueConstraint")
            .field("property_name", &self.property_name)
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}
