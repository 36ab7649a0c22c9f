//! And / Or / XOr over property constraints.

use super::{PropertyAccessor, PropertyConstraint, PropertyName};
use crate::combinators::Junction;
use crate::foundation::{EvaluationResult, PropertyAccessError};

/// Property constraints combined by a [`Junction`].
///
/// This is the unit [`Rules`](crate::rules::Rules) stores per property: an
/// And of everything registered for that property, in registration order.
/// Children may read other properties; the compound is filed under its own
/// name.
#[derive(Debug, Clone)]
pub struct CompoundPropertyConstraint {
    property_name: PropertyName,
    junction: Junction,
    constraints: Vec<PropertyConstraint>,
}

impl CompoundPropertyConstraint {
    /// Empty compound filed under `property_name`.
    #[must_use]
    pub fn new(property_name: PropertyName, junction: Junction) -> Self {
        Self {
            property_name,
            junction,
            constraints: Vec::new(),
        }
    }

    /// Compound filed under the property of `first`.
    pub fn starting_with(junction: Junction, first: impl Into<PropertyConstraint>) -> Self {
        let first = first.into();
        Self {
            property_name: first.property_name().clone(),
            junction,
            constraints: vec![first],
        }
    }

    /// The property this compound is filed under.
    #[must_use]
    pub fn property_name(&self) -> &PropertyName {
        &self.property_name
    }

    /// The junction.
    #[must_use]
    pub fn junction(&self) -> Junction {
        self.junction
    }

    /// Evaluates the children.
    ///
    /// And and Or stop at the first decisive child, so an unreadable property
    /// behind it is never touched. XOr visits every child.
    ///
    /// # Errors
    ///
    /// The first property access error encountered.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        match self.junction {
            Junction::And => {
                for child in &self.constraints {
                    if !child.test(bean)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Junction::Or => {
                for child in &self.constraints {
                    if child.test(bean)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Junction::XOr => {
                let mut passed = 0_usize;
                for child in &self.constraints {
                    if child.test(bean)? {
                        passed += 1;
                    }
                }
                Ok(passed == 1)
            }
        }
    }

    /// The first child that fails on `bean`.
    ///
    /// # Errors
    ///
    /// The first property access error encountered.
    pub fn first_failing(
        &self,
        bean: &dyn PropertyAccessor,
    ) -> Result<Option<&PropertyConstraint>, PropertyAccessError> {
        for child in &self.constraints {
            if !child.test(bean)? {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Appends a child.
    pub fn add(&mut self, constraint: impl Into<PropertyConstraint>) -> &mut Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Appends several children.
    pub fn add_all<I, C>(&mut self, constraints: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<PropertyConstraint>,
    {
        self.constraints
            .extend(constraints.into_iter().map(Into::into));
        self
    }

    /// Removes and returns the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<PropertyConstraint> {
        (index < self.constraints.len()).then(|| self.constraints.remove(index))
    }

    /// Replaces the child at `index`, returning the previous one. Out of
    /// bounds leaves the compound untouched and returns `None`.
    pub fn set(
        &mut self,
        index: usize,
        constraint: impl Into<PropertyConstraint>,
    ) -> Option<PropertyConstraint> {
        self.constraints
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, constraint.into()))
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    /// The child at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PropertyConstraint> {
        self.constraints.get(index)
    }

    /// Position of the first child that is the same as `constraint`.
    #[must_use]
    pub fn index_of(&self, constraint: &PropertyConstraint) -> Option<usize> {
        self.constraints.iter().position(|c| c.same_as(constraint))
    }

    /// Appends clones of every child to `target`.
    pub fn copy_into(&self, target: &mut Vec<PropertyConstraint>) {
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
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyConstraint> {
        self.constraints.iter()
    }
}

impl<'a> IntoIterator for &'a CompoundPropertyConstraint {
    type Item = &'a PropertyConstraint;
    type IntoIter = std::slice::Iter<'a, PropertyConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
