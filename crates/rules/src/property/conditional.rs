//! Property constraint gated by another.

use std::borrow::Cow;

use super::{PropertyAccessor, PropertyConstraint, PropertyName};
use crate::combinators::if_true::IF_TRUE_TAG;
use crate::foundation::EvaluationResult;

/// If `condition` holds on the object, `then` must hold too; otherwise
/// `otherwise` must, or the object passes.
///
/// Filed under the property of its `then` branch.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let c = Constraints::new();
/// // A shipping address is required when shipping is selected.
/// let rule = c.conditional(c.eq("ship", true)?, c.required("address")?);
///
/// let pickup = Value::from_json(serde_json::json!({ "ship": false, "address": "" }));
/// let post = Value::from_json(serde_json::json!({ "ship": true, "address": "" }));
/// assert_eq!(rule.test(&pickup), Ok(true));
/// assert_eq!(rule.test(&post), Ok(false));
/// assert_eq!(rule.property_name(), "address");
/// # Ok::<(), ConstraintError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConditionalPropertyConstraint {
    condition: Box<PropertyConstraint>,
    then: Box<PropertyConstraint>,
    otherwise: Option<Box<PropertyConstraint>>,
    type_tag: Cow<'static, str>,
}

impl ConditionalPropertyConstraint {
    /// Creates a conditional with no else branch.
    pub fn new(condition: impl Into<PropertyConstraint>, then: impl Into<PropertyConstraint>) -> Self {
        Self {
            condition: Box::new(condition.into()),
            then: Box::new(then.into()),
            otherwise: None,
            type_tag: Cow::Borrowed(IF_TRUE_TAG),
        }
    }

    /// Sets the else branch.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise(mut self, otherwise: impl Into<PropertyConstraint>) -> Self {
        self.otherwise = Some(Box::new(otherwise.into()));
        self
    }

    /// Overrides the type tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.type_tag = tag.into();
        self
    }

    /// The property of the `then` branch.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        self.then.property_name()
    }

    /// The guard.
    #[must_use]
    pub fn condition(&self) -> &PropertyConstraint {
        &self.condition
    }

    /// The branch tested when the guard holds.
    #[must_use]
    pub fn then_branch(&self) -> &PropertyConstraint {
        &self.then
    }

    /// The branch tested when the guard fails, if any.
    #[must_use]
    pub fn else_branch(&self) -> Option<&PropertyConstraint> {
        self.otherwise.as_deref()
    }

    /// Whether any branch reads `property`.
    #[must_use]
    pub fn is_dependent_on(&self, property: &str) -> bool {
        self.condition.is_dependent_on(property)
            || self.then.is_dependent_on(property)
            || self
                .otherwise
                .as_ref()
                .is_some_and(|c| c.is_dependent_on(property))
    }

    /// Evaluates the guard, then the chosen branch.
    ///
    /// # Errors
    ///
    /// If a property read by the guard or the chosen branch cannot be read.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        if self.condition.test(bean)? {
            self.then.test(bean)
        } else {
            match &self.otherwise {
                Some(otherwise) => otherwise.test(bean),
                None => Ok(true),
            }
        }
    }

    /// The type tag, `"ifTrue"` unless overridden.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        Some(&self.type_tag)
    }
}
