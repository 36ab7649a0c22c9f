//! Constraints bound to properties of a domain object.
//!
//! A [`PropertyConstraint`] names the property (or properties) it reads and
//! evaluates against any [`PropertyAccessor`]. Evaluation returns
//! `Ok(bool)` for a real verdict and `Err` when a property path does not
//! resolve: a misspelled property is a schema bug, not a failed validation.
//!
//! # Examples
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! let c = Constraints::new();
//! let adult = c.gte("age", 18)?;
//!
//! let person = Value::from_json(serde_json::json!({ "age": 15 }));
//! assert_eq!(adult.test(&person), Ok(false));
//!
//! let typo = c.gte("agee", 18)?;
//! assert!(typo.test(&person).is_err());
//! # Ok::<(), ConstraintError>(())
//! ```

pub mod accessor;
pub mod compound;
pub mod conditional;
pub mod negated;
pub mod unique;
pub mod value;

pub use accessor::{PropertyAccessor, read_path, write_path};
pub use compound::CompoundPropertyConstraint;
pub use conditional::ConditionalPropertyConstraint;
pub use negated::NegatedPropertyConstraint;
pub use unique::{ExistingValues, UniquePropertyValueConstraint, UniquenessCheck};
pub use value::{ParameterizedPropertyConstraint, PropertiesConstraint, PropertyValueConstraint};

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::combinators::Junction;
use crate::foundation::{ConstraintError, ConstraintResult, EvaluationResult};

// ============================================================================
// PROPERTY NAME
// ============================================================================

/// A validated, possibly dotted, property path such as `"address.city"`.
///
/// Neither the path nor any of its segments may be empty. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyName(Arc<str>);

impl PropertyName {
    /// Validates `name`.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::EmptyPropertyName`] if `name` or one of its dotted
    /// segments is empty.
    pub fn new(name: impl AsRef<str>) -> ConstraintResult<Self> {
        let name = name.as_ref();
        if name.split('.').any(str::is_empty) {
            return Err(ConstraintError::EmptyPropertyName(name.to_owned()));
        }
        Ok(Self(Arc::from(name)))
    }

    /// The full path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dotted segments in order.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('.')
    }

    /// The first segment, read through the accessor.
    #[must_use]
    pub fn root(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Whether this path has more than one segment.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.0.contains('.')
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PropertyName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for PropertyName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl TryFrom<&str> for PropertyName {
    type Error = ConstraintError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<String> for PropertyName {
    type Error = ConstraintError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

// ============================================================================
// PROPERTY CONSTRAINT
// ============================================================================

/// A constraint bound to a property.
#[derive(Debug, Clone)]
pub enum PropertyConstraint {
    /// Unary constraint on one property's value.
    Value(PropertyValueConstraint),
    /// Binary predicate between one property and a constant.
    Parameterized(ParameterizedPropertyConstraint),
    /// Binary predicate between two properties.
    Properties(PropertiesConstraint),
    /// One property constraint gated by another.
    Conditional(ConditionalPropertyConstraint),
    /// Negation.
    Negated(NegatedPropertyConstraint),
    /// And / Or / XOr over property constraints.
    Compound(CompoundPropertyConstraint),
    /// Uniqueness among existing values.
    Unique(UniquePropertyValueConstraint),
}

impl PropertyConstraint {
    /// The property this constraint is filed under.
    ///
    /// For a conditional this is the property of its `then` branch; for a
    /// comparison of two properties, the left one.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        match self {
            Self::Value(c) => c.property_name(),
            Self::Parameterized(c) => c.property_name(),
            Self::Properties(c) => c.property_name(),
            Self::Conditional(c) => c.property_name(),
            Self::Negated(c) => c.property_name(),
            Self::Compound(c) => c.property_name(),
            Self::Unique(c) => c.property_name(),
        }
    }

    /// Evaluates against a domain object.
    ///
    /// # Errors
    ///
    /// [`PropertyAccessError`](crate::foundation::PropertyAccessError) if a
    /// property path does not resolve.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        match self {
            Self::Value(c) => c.test(bean),
            Self::Parameterized(c) => c.test(bean),
            Self::Properties(c) => c.test(bean),
            Self::Conditional(c) => c.test(bean),
            Self::Negated(c) => c.test(bean),
            Self::Compound(c) => c.test(bean),
            Self::Unique(c) => c.test(bean),
        }
    }

    /// Tag a consumer resolves to a message.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Value(c) => c.type_tag(),
            Self::Parameterized(c) => c.type_tag(),
            Self::Properties(c) => c.type_tag(),
            Self::Conditional(c) => c.type_tag(),
            Self::Negated(_) | Self::Compound(_) => None,
            Self::Unique(c) => c.type_tag(),
        }
    }

    /// Whether the outcome can change when `property` changes.
    #[must_use]
    pub fn is_dependent_on(&self, property: &str) -> bool {
        match self {
            Self::Value(c) => c.property_name() == property,
            Self::Parameterized(c) => c.property_name() == property,
            Self::Properties(c) => {
                c.property_name() == property || c.other_property_name() == property
            }
            Self::Conditional(c) => c.is_dependent_on(property),
            Self::Negated(c) => c.inner().is_dependent_on(property),
            Self::Compound(c) => c.iter().any(|child| child.is_dependent_on(property)),
            Self::Unique(c) => c.property_name() == property,
        }
    }

    /// Negation. Negating a negation returns the original constraint.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Negated(negated) => negated.into_inner(),
            other => Self::Negated(NegatedPropertyConstraint::new(other)),
        }
    }

    /// Both must hold. Extends an existing And in place.
    #[must_use]
    pub fn and(self, other: impl Into<PropertyConstraint>) -> Self {
        self.join(Junction::And, other.into())
    }

    /// At least one must hold. Extends an existing Or in place.
    #[must_use]
    pub fn or(self, other: impl Into<PropertyConstraint>) -> Self {
        self.join(Junction::Or, other.into())
    }

    fn join(self, junction: Junction, other: PropertyConstraint) -> Self {
        match self {
            Self::Compound(mut compound) if compound.junction() == junction => {
                compound.add(other);
                Self::Compound(compound)
            }
            this => {
                let mut compound =
                    CompoundPropertyConstraint::new(this.property_name().clone(), junction);
                compound.add(this).add(other);
                Self::Compound(compound)
            }
        }
    }

    /// Borrows the compound, if this is one.
    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundPropertyConstraint> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Structural identity, as [`Constraint::same_as`](crate::combinators::Constraint::same_as).
    #[must_use]
    pub fn same_as(&self, other: &PropertyConstraint) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => {
                a.property_name() == b.property_name() && a.constraint().same_as(b.constraint())
            }
            (Self::Parameterized(a), Self::Parameterized(b)) => {
                a.property_name() == b.property_name()
                    && Arc::ptr_eq(a.constraint().predicate(), b.constraint().predicate())
                    && a.constraint().parameter() == b.constraint().parameter()
            }
            (Self::Properties(a), Self::Properties(b)) => {
                a.property_name() == b.property_name()
                    && a.other_property_name() == b.other_property_name()
                    && Arc::ptr_eq(a.predicate(), b.predicate())
            }
            (Self::Conditional(a), Self::Conditional(b)) => {
                a.condition().same_as(b.condition())
                    && a.then_branch().same_as(b.then_branch())
                    && match (a.else_branch(), b.else_branch()) {
                        (Some(x), Some(y)) => x.same_as(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (Self::Negated(a), Self::Negated(b)) => a.inner().same_as(b.inner()),
            (Self::Compound(a), Self::Compound(b)) => {
                a.property_name() == b.property_name()
                    && a.junction() == b.junction()
                    && a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.same_as(y))
            }
            (Self::Unique(a), Self::Unique(b)) => {
                a.property_name() == b.property_name() && Arc::ptr_eq(a.check(), b.check())
            }
            _ => false,
        }
    }
}

impl From<PropertyValueConstraint> for PropertyConstraint {
    fn from(c: PropertyValueConstraint) -> Self {
        Self::Value(c)
    }
}

impl From<ParameterizedPropertyConstraint> for PropertyConstraint {
    fn from(c: ParameterizedPropertyConstraint) -> Self {
        Self::Parameterized(c)
    }
}

impl From<PropertiesConstraint> for PropertyConstraint {
    fn from(c: PropertiesConstraint) -> Self {
        Self::Properties(c)
    }
}

impl From<ConditionalPropertyConstraint> for PropertyConstraint {
    fn from(c: ConditionalPropertyConstraint) -> Self {
        Self::Conditional(c)
    }
}

impl From<NegatedPropertyConstraint> for PropertyConstraint {
    fn from(c: NegatedPropertyConstraint) -> Self {
        Self::Negated(c)
    }
}

impl From<CompoundPropertyConstraint> for PropertyConstraint {
    fn from(c: CompoundPropertyConstraint) -> Self {
        Self::Compound(c)
    }
}

impl From<UniquePropertyValueConstraint> for PropertyConstraint {
    fn from(c: UniquePropertyValueConstraint) -> Self {
        Self::Unique(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{GreaterThan, Required};
    use crate::value::Value;
    use serde_json::json;

    fn name(path: &str) -> PropertyName {
        PropertyName::new(path).unwrap()
    }

    #[test]
    fn test_property_name_validation() {
        assert!(PropertyName::new("name").is_ok());
        assert!(PropertyName::new("address.city").is_ok());
        for bad in ["", ".", "a.", ".a", "a..b"] {
            assert_eq!(
                PropertyName::new(bad).unwrap_err(),
                ConstraintError::EmptyPropertyName(bad.to_owned())
            );
        }
    }

    #[test]
    fn test_property_name_segments() {
        let path = name("address.geo.lat");
        assert_eq!(path.root(), "address");
        assert!(path.is_nested());
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["address", "geo", "lat"]);
        assert_eq!(path, "address.geo.lat");
        assert!(!name("age").is_nested());
    }

    #[test]
    fn test_negate_unwraps() {
        let required: PropertyConstraint =
            PropertyValueConstraint::new(name("name"), Required::REQUIRED).into();
        let twice = required.clone().negate().negate();
        assert!(matches!(twice, PropertyConstraint::Value(_)));
        assert!(twice.same_as(&required));
    }

    #[test]
    fn test_and_flattens_and_keeps_first_name() {
        let bean = Value::from_json(json!({ "min": 1, "max": 5 }));
        let c = PropertyConstraint::from(PropertyValueConstraint::new(name("max"), Required::REQUIRED))
            .and(PropertiesConstraint::new(name("max"), GreaterThan::new(), name("min")))
            .and(PropertyValueConstraint::new(name("min"), Required::REQUIRED));

        let compound = c.as_compound().unwrap();
        assert_eq!(compound.len(), 3);
        assert_eq!(c.property_name(), "max");
        assert_eq!(c.test(&bean), Ok(true));
        assert!(c.is_dependent_on("min"));
        assert!(!c.is_dependent_on("other"));
    }

    #[test]
    fn test_or() {
        let bean = Value::from_json(json!({ "a": "", "b": "x" }));
        let c = PropertyConstraint::from(PropertyValueConstraint::new(name("a"), Required::REQUIRED))
            .or(PropertyValueConstraint::new(name("b"), Required::REQUIRED));
        assert_eq!(c.test(&bean), Ok(true));
    }
}
