//! Conditional constraint.

use std::borrow::Cow;

use super::Constraint;
use crate::foundation::Predicate;
use crate::value::Value;

/// Default type tag of [`IfTrue`].
pub const IF_TRUE_TAG: &str = "ifTrue";

/// If `condition` holds, test `then`; otherwise test `otherwise`, or pass.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// // Negative numbers must be at least -10; others are unconstrained.
/// let c = IfTrue::new(LessThan::new().bind(0), GreaterThanEqualTo::new().bind(-10));
/// assert!(c.test(&Value::from(-5)));
/// assert!(!c.test(&Value::from(-50)));
/// assert!(c.test(&Value::from(1_000)));
/// ```
#[derive(Debug, Clone)]
pub struct IfTrue {
    condition: Constraint,
    then: Constraint,
    otherwise: Option<Constraint>,
    type_tag: Cow<'static, str>,
}

impl IfTrue {
    /// Creates a conditional with no else branch.
    pub fn new(condition: impl Into<Constraint>, then: impl Into<Constraint>) -> Self {
        Self {
            condition: condition.into(),
            then: then.into(),
            otherwise: None,
            type_tag: Cow::Borrowed(IF_TRUE_TAG),
        }
    }

    /// Sets the else branch.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise(mut self, otherwise: impl Into<Constraint>) -> Self {
        self.otherwise = Some(otherwise.into());
        self
    }

    /// Overrides the type tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.type_tag = tag.into();
        self
    }

    /// The condition.
    #[must_use]
    pub fn condition(&self) -> &Constraint {
        &self.condition
    }

    /// The branch tested when the condition holds.
    #[must_use]
    pub fn then_branch(&self) -> &Constraint {
        &self.then
    }

    /// The branch tested when the condition fails, if any.
    #[must_use]
    pub fn else_branch(&self) -> Option<&Constraint> {
        self.otherwise.as_ref()
    }
}

impl Predicate for IfTrue {
    fn test(&self, value: &Value) -> bool {
        if self.condition.test(value) {
            self.then.test(value)
        } else {
            self.otherwise.as_ref().is_none_or(|c| c.test(value))
        }
    }

    fn type_tag(&self) -> Option<&str> {
        Some(&self.type_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::tests::Above;
    use crate::combinators::not;

    #[test]
    fn test_without_else_passes_when_condition_fails() {
        let c = IfTrue::new(Above(10), Above(20));
        assert!(c.test(&Value::from(5)));
        assert!(c.test(&Value::from(25)));
        assert!(!c.test(&Value::from(15)));
        assert_eq!(c.type_tag(), Some(IF_TRUE_TAG));
    }

    #[test]
    fn test_else_branch() {
        let c = IfTrue::new(Above(10), Above(20)).otherwise(not(Above(0)));
        assert!(c.test(&Value::from(-1)));
        assert!(!c.test(&Value::from(5)));
        assert!(c.else_branch().is_some());
    }
}
