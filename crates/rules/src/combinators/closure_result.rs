//! Tests a constraint against a value derived from the input.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::Constraint;
use crate::foundation::Predicate;
use crate::value::Value;

/// Shared mapping applied before testing.
pub type Mapping = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Applies a mapping to the input and tests the result.
///
/// String length checks are built this way: the mapping counts characters and
/// a comparison tests the count.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let list_len = |v: &Value| Value::from(v.as_list().map_or(0, <[Value]>::len));
/// let pair = ClosureResultConstraint::new(list_len, EqualTo::new().bind(2));
/// assert!(pair.test(&Value::from(vec![1, 2])));
/// assert!(!pair.test(&Value::from(vec![1])));
/// ```
#[derive(Clone)]
pub struct ClosureResultConstraint {
    mapping: Mapping,
    constraint: Constraint,
    type_tag: Option<Cow<'static, str>>,
}

impl ClosureResultConstraint {
    /// Tests `constraint` against `mapping(value)`.
    pub fn new<F>(mapping: F, constraint: impl Into<Constraint>) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(mapping), constraint)
    }

    /// Same as [`new`](Self::new) with a shared mapping.
    pub fn from_arc(mapping: Mapping, constraint: impl Into<Constraint>) -> Self {
        Self {
            mapping,
            constraint: constraint.into(),
            type_tag: None,
        }
    }

    /// Overrides the type tag. Without one, the inner constraint's tag is used.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    /// The constraint applied to the mapped value.
    #[must_use]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Applies the mapping alone.
    #[must_use]
    pub fn map(&self, value: &Value) -> Value {
        (self.mapping)(value)
    }
}

impl fmt::Debug for ClosureResultConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureResultConstraint")
            .field("mapping", &"<fn>")
            .field("constraint", &self.constraint)
            .field("type_tag", &self.type_tag)
            .finish()
    }
}

impl Predicate for ClosureResultConstraint {
    fn test(&self, value: &Value) -> bool {
        self.constraint.test(&self.map(value))
    }

    fn type_tag(&self) -> Option<&str> {
        self.type_tag
            .as_deref()
            .or_else(|| self.constraint.type_tag())
    }
}
