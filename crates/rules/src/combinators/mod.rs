//! Boolean trees over predicates.
//!
//! [`Constraint`] is a closed tree: a leaf wraps any [`Predicate`], a
//! compound node combines children with And / Or / XOr, and `Not` negates one
//! child. A single recursive [`Constraint::test`] interprets it.
//!
//! # Examples
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! let adult = Constraint::leaf(Range::inclusive(18, 130).unwrap());
//! let retired = Constraint::leaf(Range::inclusive(65, 130).unwrap());
//! let working_age = adult.and(retired.negate());
//!
//! assert!(working_age.test(&Value::from(40)));
//! assert!(!working_age.test(&Value::from(70)));
//! ```

pub mod closure_result;
pub mod compound;
pub mod if_true;
pub mod not;
pub mod parameterized;

pub use closure_result::ClosureResultConstraint;
pub use compound::{CompoundConstraint, Junction};
pub use if_true::IfTrue;
pub use not::not;
pub use parameterized::ParameterizedBinaryConstraint;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::foundation::Predicate;
use crate::value::Value;

// ============================================================================
// CONSTRAINT TREE
// ============================================================================

/// A composable unary constraint.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// A single predicate.
    Leaf(Arc<dyn Predicate>),
    /// And / Or / XOr over children.
    Compound(CompoundConstraint),
    /// Negation of one child.
    Not(Box<Constraint>),
}

/// Shape of a [`Constraint`] node, used by type-safety checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// [`Constraint::Leaf`]
    Leaf,
    /// Compound with [`Junction::And`]
    And,
    /// Compound with [`Junction::Or`]
    Or,
    /// Compound with [`Junction::XOr`]
    XOr,
    /// [`Constraint::Not`]
    Not,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leaf => "leaf",
            Self::And => "and",
            Self::Or => "or",
            Self::XOr => "xor",
            Self::Not => "not",
        })
    }
}

impl Constraint {
    /// Wraps a predicate as a leaf.
    pub fn leaf(predicate: impl Predicate) -> Self {
        Self::Leaf(Arc::new(predicate))
    }

    /// And over the given constraints. Empty is vacuously true.
    pub fn all<I, C>(constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Self::Compound(CompoundConstraint::with(Junction::And, constraints))
    }

    /// Or over the given constraints. Empty is false.
    pub fn any<I, C>(constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Self::Compound(CompoundConstraint::with(Junction::Or, constraints))
    }

    /// XOr over the given constraints: exactly one must hold.
    pub fn exactly_one<I, C>(constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Self::Compound(CompoundConstraint::with(Junction::XOr, constraints))
    }

    /// Evaluates the tree.
    #[must_use]
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Self::Leaf(predicate) => predicate.test(value),
            Self::Compound(compound) => compound.test(value),
            Self::Not(inner) => !inner.test(value),
        }
    }

    /// Shape of this node.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Leaf(_) => ConstraintKind::Leaf,
            Self::Compound(compound) => compound.junction().kind(),
            Self::Not(_) => ConstraintKind::Not,
        }
    }

    /// Type tag of a leaf. Compound and negated nodes carry none.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Leaf(predicate) => predicate.type_tag(),
            Self::Compound(_) | Self::Not(_) => None,
        }
    }

    /// Both must hold.
    ///
    /// If `self` is already an And, `other` is appended to it instead of
    /// nesting a new node.
    #[must_use]
    pub fn and(self, other: impl Into<Constraint>) -> Self {
        self.join(Junction::And, other.into())
    }

    /// At least one must hold. Extends an existing Or in place.
    #[must_use]
    pub fn or(self, other: impl Into<Constraint>) -> Self {
        self.join(Junction::Or, other.into())
    }

    /// Exactly one of the two must hold.
    ///
    /// Unlike [`and`](Self::and) and [`or`](Self::or) this never flattens:
    /// `a.xor(b).xor(c)` is `(a ^ b) ^ c`, which differs from
    /// [`Constraint::exactly_one`] over `[a, b, c]`.
    #[must_use]
    pub fn xor(self, other: impl Into<Constraint>) -> Self {
        Self::exactly_one([self, other.into()])
    }

    fn join(self, junction: Junction, other: Constraint) -> Self {
        match self {
            Self::Compound(mut compound) if compound.junction() == junction => {
                compound.add(other);
                Self::Compound(compound)
            }
            this => Self::Compound(CompoundConstraint::with(junction, [this, other])),
        }
    }

    /// Borrows the compound node, if this is one.
    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundConstraint> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Mutably borrows the compound node, if this is one.
    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundConstraint> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Downcasts a leaf to its concrete predicate type.
    #[must_use]
    pub fn as_leaf<P: Predicate>(&self) -> Option<&P> {
        match self {
            Self::Leaf(predicate) => {
                let any: &dyn Any = predicate.as_ref();
                any.downcast_ref::<P>()
            }
            _ => None,
        }
    }

    /// Structural identity.
    ///
    /// Leaves are the same when they share the same predicate instance;
    /// inner nodes when their shapes and children are the same.
    #[must_use]
    pub fn same_as(&self, other: &Constraint) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Arc::ptr_eq(a, b),
            (Self::Compound(a), Self::Compound(b)) => {
                a.junction() == b.junction()
                    && a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.same_as(y))
            }
            (Self::Not(a), Self::Not(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl<P: Predicate> From<P> for Constraint {
    fn from(predicate: P) -> Self {
        Self::leaf(predicate)
    }
}

impl From<Arc<dyn Predicate>> for Constraint {
    fn from(predicate: Arc<dyn Predicate>) -> Self {
        Self::Leaf(predicate)
    }
}

impl From<CompoundConstraint> for Constraint {
    fn from(compound: CompoundConstraint) -> Self {
        Self::Compound(compound)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Passes for integers strictly above a threshold.
    #[derive(Debug)]
    pub(crate) struct Above(pub(crate) i64);

    impl Predicate for Above {
        fn test(&self, value: &Value) -> bool {
            value.as_i64().is_some_and(|n| n > self.0)
        }

        fn type_tag(&self) -> Option<&str> {
            Some("above")
        }
    }

    #[test]
    fn test_leaf() {
        let c = Constraint::leaf(Above(3));
        assert!(c.test(&Value::from(4)));
        assert!(!c.test(&Value::from(3)));
        assert_eq!(c.kind(), ConstraintKind::Leaf);
        assert_eq!(c.type_tag(), Some("above"));
    }

    #[test]
    fn test_and_chain_flattens() {
        let c = Constraint::leaf(Above(1))
            .and(Above(2))
            .and(Above(3));
        let compound = c.as_compound().unwrap();
        assert_eq!(compound.junction(), Junction::And);
        assert_eq!(compound.len(), 3);
        assert!(c.test(&Value::from(4)));
        assert!(!c.test(&Value::from(3)));
    }

    #[test]
    fn test_or_does_not_flatten_into_and() {
        let c = Constraint::leaf(Above(10)).and(Above(20)).or(Above(0));
        let compound = c.as_compound().unwrap();
        assert_eq!(compound.junction(), Junction::Or);
        assert_eq!(compound.len(), 2);
        assert!(c.test(&Value::from(1)));
    }

    #[test]
    fn test_xor_nests() {
        let c = Constraint::leaf(Above(0)).xor(Above(5)).xor(Above(10));
        // (n > 0 ^ n > 5) ^ n > 10
        assert!(c.test(&Value::from(3)));
        assert!(!c.test(&Value::from(7)));
        assert!(c.test(&Value::from(11)));
    }

    #[test]
    fn test_as_leaf_downcast() {
        let c = Constraint::leaf(Above(7));
        assert_eq!(c.as_leaf::<Above>().map(|a| a.0), Some(7));
        assert!(Constraint::all(Vec::<Constraint>::new()).as_leaf::<Above>().is_none());
    }

    #[test]
    fn test_same_as() {
        let leaf = Constraint::leaf(Above(1));
        let clone = leaf.clone();
        let other = Constraint::leaf(Above(1));
        assert!(leaf.same_as(&clone));
        assert!(!leaf.same_as(&other));
        assert!(Constraint::all([leaf.clone()]).same_as(&Constraint::all([clone])));
        assert!(!Constraint::all([leaf.clone()]).same_as(&Constraint::any([leaf])));
    }
}
