//! Core predicate traits
//!
//! This module defines the two leaf contracts every constraint is built from.

use std::any::Any;
use std::fmt;

use crate::combinators::Constraint;
use crate::value::Value;

// ============================================================================
// UNARY PREDICATE
// ============================================================================

/// A boolean test over a single value.
///
/// Leaf constraints implement this trait; trees of them are assembled with
/// [`Constraint`]. Implementations must be pure: the same input always gives
/// the same answer, and no input panics. Inputs a predicate has no meaning
/// for (a map handed to a pattern match, say) simply test `false`.
///
/// # Examples
///
/// ```
/// use nebula_rules::foundation::Predicate;
/// use nebula_rules::value::Value;
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Predicate for Even {
///     fn test(&self, value: &Value) -> bool {
///         value.as_i64().is_some_and(|n| n % 2 == 0)
///     }
/// }
///
/// assert!(Even.test(&Value::from(4)));
/// assert!(!Even.test(&Value::Null));
/// ```
pub trait Predicate: Any + Send + Sync + fmt::Debug {
    /// Tests the value.
    fn test(&self, value: &Value) -> bool;

    /// Tag a consumer resolves to a human-readable message, e.g. `"required"`.
    fn type_tag(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// BINARY PREDICATE
// ============================================================================

/// A boolean test over two values, such as a comparison.
pub trait BinaryPredicate: Send + Sync + fmt::Debug {
    /// Tests the pair.
    fn test(&self, left: &Value, right: &Value) -> bool;

    /// Tag a consumer resolves to a human-readable message.
    fn type_tag(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// Fluent composition for anything that converts into a [`Constraint`].
///
/// Implemented automatically for every [`Predicate`]; [`Constraint`] has the
/// same methods inherently.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let short_word = Like::parse("a%").and(StringLengthConstraint::max(5));
/// assert!(short_word.test(&Value::from("abc")));
/// assert!(!short_word.test(&Value::from("abcdefgh")));
/// ```
pub trait ConstraintExt: Into<Constraint> + Sized {
    /// Both must hold. Chained calls extend one flat `And`.
    fn and(self, other: impl Into<Constraint>) -> Constraint {
        Constraint::and(self.into(), other)
    }

    /// At least one must hold. Chained calls extend one flat `Or`.
    fn or(self, other: impl Into<Constraint>) -> Constraint {
        Constraint::or(self.into(), other)
    }

    /// Exactly one must hold.
    fn xor(self, other: impl Into<Constraint>) -> Constraint {
        Constraint::xor(self.into(), other)
    }

    /// Negation. Negating a negation yields the original constraint.
    fn negate(self) -> Constraint {
        Constraint::negate(self.into())
    }
}

impl<P: Predicate> ConstraintExt for P {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct AlwaysTrue;

    impl Predicate for AlwaysTrue {
        fn test(&self, _value: &Value) -> bool {
            true
        }
    }

    #[test]
    fn test_default_type_tag() {
        assert!(AlwaysTrue.type_tag().is_none());
        assert!(AlwaysTrue.test(&Value::Null));
    }

    #[test]
    fn test_ext_builds_constraints() {
        let both = AlwaysTrue.and(AlwaysTrue);
        assert!(both.test(&Value::Null));
        assert!(!AlwaysTrue.negate().test(&Value::Null));
    }
}
