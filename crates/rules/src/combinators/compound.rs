//! And / Or / XOr over a mutable list of children.

use std::any::Any;

use serde::{Deserialize, Serialize};

use super::{Constraint, ConstraintKind};
use crate::foundation::{ConstraintError, ConstraintResult, Predicate};
use crate::value::Value;

/// How a compound combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Junction {
    /// Every child must hold. Empty is vacuously true.
    And,
    /// At least one child must hold. Empty is false.
    Or,
    /// Exactly one child must hold. Empty is false.
    XOr,
}

impl Junction {
    /// The [`ConstraintKind`] of a compound with this junction.
    #[must_use]
    pub const fn kind(self) -> ConstraintKind {
        match self {
            Self::And => ConstraintKind::And,
            Self::Or => ConstraintKind::Or,
            Self::XOr => ConstraintKind::XOr,
        }
    }
}

/// Ordered children combined by a [`Junction`].
///
/// Children can be added, replaced and removed after construction; the
/// list keeps insertion order.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let mut any = CompoundConstraint::new(Junction::Or);
/// assert!(!any.test(&Value::from("x")));
///
/// any.add(Required::PRESENT);
/// assert!(any.test(&Value::from("x")));
/// ```
#[derive(Debug, Clone)]
pub struct CompoundConstraint {
    junction: Junction,
    constraints: Vec<Constraint>,
}

impl CompoundConstraint {
    /// Empty compound.
    #[must_use]
    pub fn new(junction: Junction) -> Self {
        Self {
            junction,
            constraints: Vec::new(),
        }
    }

    /// Compound over the given children.
    pub fn with<I, C>(junction: Junction, constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Self {
            junction,
            constraints: constraints.into_iter().map(Into::into).collect(),
        }
    }

    /// The junction.
    #[must_use]
    pub fn junction(&self) -> Junction {
        self.junction
    }

    /// Evaluates the children.
    ///
    /// And and Or stop at the first decisive child. XOr always visits every
    /// child.
    #[must_use]
    pub fn test(&self, value: &Value) -> bool {
        match self.junction {
            Junction::And => self.constraints.iter().all(|c| c.test(value)),
            Junction::Or => self.constraints.iter().any(|c| c.test(value)),
            Junction::XOr => self.constraints.iter().filter(|c| c.test(value)).count() == 1,
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Appends a child.
    pub fn add(&mut self, constraint: impl Into<Constraint>) -> &mut Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Appends several children.
    pub fn add_all<I, C>(&mut self, constraints: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        self.constraints
            .extend(constraints.into_iter().map(Into::into));
        self
    }

    /// Removes and returns the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Constraint> {
        (index < self.constraints.len()).then(|| self.constraints.remove(index))
    }

    /// Removes the first child that is the [same](Constraint::same_as) as
    /// `constraint`. Returns whether one was removed.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> bool {
        match self.index_of(constraint) {
            Some(index) => {
                self.constraints.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the child at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the compound untouched when `index` is out
    /// of bounds.
    pub fn set(&mut self, index: usize, constraint: impl Into<Constraint>) -> Option<Constraint> {
        self.constraints
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, constraint.into()))
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    /// The child at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Constraint> {
        self.constraints.get(index)
    }

    /// Position of the first child that is the same as `constraint`.
    #[must_use]
    pub fn index_of(&self, constraint: &Constraint) -> Option<usize> {
        self.constraints.iter().position(|c| c.same_as(constraint))
    }

    /// Appends clones of every child to `target`.
    pub fn copy_into(&self, target: &mut Vec<Constraint>) {
        target.extend(self.constraints.iter().cloned());
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates children in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// All children.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Consumes the compound, returning its children.
    #[must_use]
    pub fn into_constraints(self) -> Vec<Constraint> {
        self.constraints
    }

    // ========================================================================
    // TYPE SAFETY
    // ========================================================================

    /// Checks that every child has the expected shape.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::TypeSafety`] naming the first offending child.
    pub fn validate_type_safety(&self, expected: ConstraintKind) -> ConstraintResult<()> {
        for (index, child) in self.constraints.iter().enumerate() {
            let actual = child.kind();
            if actual != expected {
                return Err(ConstraintError::TypeSafety {
                    index,
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Checks that every child is a leaf wrapping a `P`.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::TypeSafety`] naming the first offending child.
    pub fn validate_leaf_type<P: Predicate>(&self) -> ConstraintResult<()> {
        let expected = std::any::type_name::<P>();
        for (index, child) in self.constraints.iter().enumerate() {
            let matches = match child {
                Constraint::Leaf(predicate) => {
                    let any: &dyn Any = predicate.as_ref();
                    any.is::<P>()
                }
                _ => false,
            };
            if !matches {
                let actual = match child {
                    Constraint::Leaf(predicate) => format!("{predicate:?}"),
                    other => other.kind().to_string(),
                };
                return Err(ConstraintError::TypeSafety {
                    index,
                    expected: expected.to_owned(),
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CompoundConstraint {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::tests::Above;

    #[test]
    fn test_empty_junctions() {
        let v = Value::from(1);
        assert!(CompoundConstraint::new(Junction::And).test(&v));
        assert!(!CompoundConstraint::new(Junction::Or).test(&v));
        assert!(!CompoundConstraint::new(Junction::XOr).test(&v));
    }

    #[test]
    fn test_xor_counts_exactly_one() {
        let xor = CompoundConstraint::with(Junction::XOr, [Above(0), Above(5), Above(10)]);
        assert!(xor.test(&Value::from(3)));
        assert!(!xor.test(&Value::from(7)));
        assert!(!xor.test(&Value::from(11)));
        assert!(!xor.test(&Value::from(-1)));
    }

    #[test]
    fn test_mutation() {
        let first = Constraint::leaf(Above(1));
        let mut and = CompoundConstraint::new(Junction::And);
        and.add(first.clone()).add(Above(2));
        assert_eq!(and.len(), 2);
        assert_eq!(and.index_of(&first), Some(0));

        let previous = and.set(1, Above(10)).unwrap();
        assert_eq!(previous.as_leaf::<Above>().map(|a| a.0), Some(2));
        assert!(and.set(9, Above(0)).is_none());
        assert_eq!(and.len(), 2);

        assert!(and.remove_constraint(&first));
        assert!(!and.remove_constraint(&first));
        assert_eq!(and.len(), 1);
        assert!(and.remove(5).is_none());
        assert!(and.remove(0).is_some());
        assert!(and.is_empty());
    }

    #[test]
    fn test_copy_into() {
        let and = CompoundConstraint::with(Junction::And, [Above(1), Above(2)]);
        let mut target = vec![Constraint::leaf(Above(0))];
        and.copy_into(&mut target);
        assert_eq!(target.len(), 3);
        assert!(target[1].same_as(and.get(0).unwrap()));
    }

    #[test]
    fn test_validate_type_safety() {
        let mut or = CompoundConstraint::with(Junction::Or, [Above(1), Above(2)]);
        assert!(or.validate_type_safety(ConstraintKind::Leaf).is_ok());
        assert!(or.validate_leaf_type::<Above>().is_ok());

        or.add(Constraint::leaf(Above(3)).negate());
        let err = or.validate_type_safety(ConstraintKind::Leaf).unwrap_err();
        assert_eq!(
            err,
            ConstraintError::TypeSafety {
                index: 2,
                expected: "leaf".to_owned(),
                actual: "not".to_owned(),
            }
        );
        assert!(matches!(
            or.validate_leaf_type::<Above>(),
            Err(ConstraintError::TypeSafety { index: 2, .. })
        ));
    }
}
