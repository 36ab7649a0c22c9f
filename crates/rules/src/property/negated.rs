//! Negated property constraint.

use super::{PropertyAccessor, PropertyConstraint, PropertyName};
use crate::foundation::EvaluationResult;

/// Passes when the wrapped property constraint fails.
///
/// Build it with [`PropertyConstraint::negate`], which unwraps double
/// negation.
#[derive(Debug, Clone)]
pub struct NegatedPropertyConstraint {
    inner: Box<PropertyConstraint>,
}

impl NegatedPropertyConstraint {
    /// Wraps `inner`.
    pub fn new(inner: impl Into<PropertyConstraint>) -> Self {
        Self {
            inner: Box::new(inner.into()),
        }
    }

    /// The negated constraint.
    #[must_use]
    pub fn inner(&self) -> &PropertyConstraint {
        &self.inner
    }

    /// Unwraps the negated constraint.
    #[must_use]
    pub fn into_inner(self) -> PropertyConstraint {
        *self.inner
    }

    /// Property of the negated constraint.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        self.inner.property_name()
    }

    /// Inverts the wrapped verdict. Access errors pass through unchanged.
    ///
    /// # Errors
    ///
    /// If the wrapped constraint cannot read its property.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        self.inner.test(bean).map(|passed| !passed)
    }
}
