//! Negation.

use super::Constraint;

/// Negates a constraint. See [`Constraint::negate`].
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let blank = not(Required::REQUIRED);
/// assert!(blank.test(&Value::from("")));
/// assert!(!blank.test(&Value::from("x")));
/// ```
pub fn not(constraint: impl Into<Constraint>) -> Constraint {
    Constraint::negate(constraint.into())
}

impl Constraint {
    /// Logical negation.
    ///
    /// `not(not(c))` is `c` itself, not a doubly wrapped node.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// The negated constraint, if this is a `Not` node.
    #[must_use]
    pub fn negated(&self) -> Option<&Constraint> {
        match self {
            Self::Not(inner) => Some(inner),
            _ => None,
        }
    }
}
