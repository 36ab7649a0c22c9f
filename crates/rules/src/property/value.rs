//! Property constraints that read values and test them.

use std::sync::Arc;

use super::{PropertyAccessor, PropertyName, read_path};
use crate::combinators::{Constraint, ParameterizedBinaryConstraint};
use crate::foundation::{BinaryPredicate, EvaluationResult, Predicate};

// ============================================================================
// PROPERTY VALUE
// ============================================================================

/// Tests one property's value with a unary [`Constraint`].
#[derive(Debug, Clone)]
pub struct PropertyValueConstraint {
    property_name: PropertyName,
    constraint: Constraint,
}

impl PropertyValueConstraint {
    /// Binds `constraint` to `property_name`.
    pub fn new(property_name: PropertyName, constraint: impl Into<Constraint>) -> Self {
        Self {
            property_name,
            constraint: constraint.into(),
        }
    }

    /// The property read.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        &self.property_name
    }

    /// The constraint applied to the value.
    #[must_use]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Reads the property and tests it.
    ///
    /// # Errors
    ///
    /// If the property cannot be read.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        let value = read_path(bean, &self.property_name)?;
        Ok(self.constraint.test(&value))
    }

    /// Tag of the wrapped constraint.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.constraint.type_tag()
    }
}

// ============================================================================
// PROPERTY AGAINST CONSTANT
// ============================================================================

/// Compares one property against a constant, e.g. `age >= 18`.
#[derive(Debug, Clone)]
pub struct ParameterizedPropertyConstraint {
    property_name: PropertyName,
    constraint: ParameterizedBinaryConstraint,
}

impl ParameterizedPropertyConstraint {
    /// Binds a parameterized comparison to `property_name`.
    #[must_use]
    pub fn new(property_name: PropertyName, constraint: ParameterizedBinaryConstraint) -> Self {
        Self {
            property_name,
            constraint,
        }
    }

    /// The property read.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        &self.property_name
    }

    /// The comparison with its bound constant.
    #[must_use]
    pub fn constraint(&self) -> &ParameterizedBinaryConstraint {
        &self.constraint
    }

    /// Reads the property and compares it.
    ///
    /// # Errors
    ///
    /// If the property cannot be read.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        let value = read_path(bean, &self.property_name)?;
        Ok(self.constraint.test(&value))
    }

    /// Tag of the comparison.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.constraint.type_tag()
    }
}

// ============================================================================
// PROPERTY AGAINST PROPERTY
// ============================================================================

/// Compares two properties of the same object, e.g. `end > start`.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let c = PropertiesConstraint::new(
///     PropertyName::new("end")?,
///     GreaterThan::new(),
///     PropertyName::new("start")?,
/// );
/// let booking = Value::from_json(serde_json::json!({ "start": 3, "end": 5 }));
/// assert_eq!(c.test(&booking), Ok(true));
/// # Ok::<(), ConstraintError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesConstraint {
    property_name: PropertyName,
    predicate: Arc<dyn BinaryPredicate>,
    other_property_name: PropertyName,
}

impl PropertiesConstraint {
    /// Tests `predicate(property, other_property)`.
    pub fn new(
        property_name: PropertyName,
        predicate: impl BinaryPredicate + 'static,
        other_property_name: PropertyName,
    ) -> Self {
        Self::from_arc(property_name, Arc::new(predicate), other_property_name)
    }

    /// Same as [`new`](Self::new) with a shared predicate.
    #[must_use]
    pub fn from_arc(
        property_name: PropertyName,
        predicate: Arc<dyn BinaryPredicate>,
        other_property_name: PropertyName,
    ) -> Self {
        Self {
            property_name,
            predicate,
            other_property_name,
        }
    }

    /// The left-hand property.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        &self.property_name
    }

    /// The right-hand property.
    #[must_use]
    pub fn other_property_name(&self) -> &PropertyName {
        &self.other_property_name
    }

    /// The comparison.
    #[must_use]
    pub fn predicate(&self) -> &Arc<dyn BinaryPredicate> {
        &self.predicate
    }

    /// Reads both properties and compares them.
    ///
    /// # Errors
    ///
    /// If either property cannot be read.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        let left = read_path(bean, &self.property_name)?;
        let right = read_path(bean, &self.other_property_name)?;
        Ok(self.predicate.test(&left, &right))
    }

    /// Tag of the comparison.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.predicate.type_tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{GreaterThanEqualTo, LessThan, Required};
    use crate::foundation::PropertyAccessError;
    use crate::value::Value;
    use serde_json::json;

    fn name(path: &str) -> PropertyName {
        PropertyName::new(path).unwrap()
    }

    #[test]
    fn test_value_constraint() {
        let c = PropertyValueConstraint::new(name("address.city"), Required::REQUIRED);
        let bean = Value::from_json(json!({ "address": { "city": "" } }));
        assert_eq!(c.test(&bean), Ok(false));
        assert_eq!(c.type_tag(), Some("required"));
    }

    #[test]
    fn test_missing_property_is_an_error() {
        let c = PropertyValueConstraint::new(name("email"), Required::REQUIRED);
        let bean = Value::from_json(json!({ "name": "Ada" }));
        assert_eq!(c.test(&bean), Err(PropertyAccessError::not_found("email")));
    }

    #[test]
    fn test_parameterized() {
        let c = ParameterizedPropertyConstraint::new(name("age"), GreaterThanEqualTo::new().bind(18));
        assert_eq!(c.test(&Value::from_json(json!({ "age": 18 }))), Ok(true));
        assert_eq!(c.test(&Value::from_json(json!({ "age": 17 }))), Ok(false));
        assert_eq!(c.type_tag(), Some("greaterThanEqualTo"));
    }

    #[test]
    fn test_two_properties() {
        let c = PropertiesConstraint::new(name("min"), LessThan::new(), name("max"));
        assert_eq!(c.test(&Value::from_json(json!({ "min": 1, "max": 2 }))), Ok(true));
        assert_eq!(c.test(&Value::from_json(json!({ "min": 2, "max": 2 }))), Ok(false));
        assert!(c.test(&Value::from_json(json!({ "min": 1 }))).is_err());
        assert_eq!(c.other_property_name(), "max");
    }
}
