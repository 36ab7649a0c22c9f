//! Binds a fixed right-hand parameter to a binary predicate.

use std::sync::Arc;

use crate::foundation::{BinaryPredicate, Predicate};
use crate::value::Value;

/// A unary constraint that tests `predicate(value, parameter)`.
///
/// Comparisons against a constant (`age >= 18`) are built this way: the
/// binary comparison is the predicate, `18` the parameter.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let adult = ParameterizedBinaryConstraint::new(GreaterThanEqualTo::new(), 18);
/// assert!(adult.test(&Value::from(18)));
/// assert!(!adult.test(&Value::from(17)));
/// assert_eq!(adult.type_tag(), Some("greaterThanEqualTo"));
/// ```
#[derive(Debug, Clone)]
pub struct ParameterizedBinaryConstraint {
    predicate: Arc<dyn BinaryPredicate>,
    parameter: Value,
}

impl ParameterizedBinaryConstraint {
    /// Binds `parameter` as the right-hand side of `predicate`.
    pub fn new(predicate: impl BinaryPredicate + 'static, parameter: impl Into<Value>) -> Self {
        Self::from_arc(Arc::new(predicate), parameter)
    }

    /// Same as [`new`](Self::new) for an already shared predicate.
    pub fn from_arc(predicate: Arc<dyn BinaryPredicate>, parameter: impl Into<Value>) -> Self {
        Self {
            predicate,
            parameter: parameter.into(),
        }
    }

    /// The bound binary predicate.
    #[must_use]
    pub fn predicate(&self) -> &Arc<dyn BinaryPredicate> {
        &self.predicate
    }

    /// The bound right-hand value.
    #[must_use]
    pub fn parameter(&self) -> &Value {
        &self.parameter
    }
}

impl Predicate for ParameterizedBinaryConstraint {
    fn test(&self, value: &Value) -> bool {
        self.predicate.test(value, &self.parameter)
    }

    fn type_tag(&self) -> Option<&str> {
        self.predicate.type_tag()
    }
}
