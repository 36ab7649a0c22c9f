//! Bounded ranges.

use std::cmp::Ordering;

use crate::combinators::{CompoundConstraint, Junction};
use crate::constraints::RelationalOperator;
use crate::foundation::{ConstraintError, ConstraintResult, Predicate};
use crate::value::{NullSafeComparator, Value};

/// Passes when a value lies between two bounds.
///
/// Inclusive ranges test `value >= min && value <= max`, exclusive ones
/// `value > min && value < max`, with the comparison rules of
/// [`value::compare`](crate::value::compare). `null` is greater than any
/// bound, so it never lies inside a range.
///
/// Bounds are checked when the range is built: they must be of compatible
/// kinds (integers and floats mix), orderable, and in order.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let working_age = Range::inclusive(18, 65)?;
/// assert!(working_age.test(&Value::from(18)));
/// assert!(working_age.test(&Value::from(40.5)));
/// assert!(!working_age.test(&Value::from(66)));
///
/// assert!(Range::inclusive(10, 5).is_err());
/// assert!(Range::inclusive(1, "z").is_err());
/// # Ok::<(), ConstraintError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Range {
    min: Value,
    max: Value,
    inclusive: bool,
    constraint: CompoundConstraint,
}

impl Range {
    /// Type tag reported by ranges.
    pub const TYPE_TAG: &'static str = "range";

    /// Range under the natural order.
    ///
    /// # Errors
    ///
    /// See [`with_comparator`](Self::with_comparator).
    pub fn new(min: impl Into<Value>, max: impl Into<Value>, inclusive: bool) -> ConstraintResult<Self> {
        Self::with_comparator(min, max, inclusive, NullSafeComparator::natural())
    }

    /// `min <= value <= max`.
    ///
    /// # Errors
    ///
    /// See [`with_comparator`](Self::with_comparator).
    pub fn inclusive(min: impl Into<Value>, max: impl Into<Value>) -> ConstraintResult<Self> {
        Self::new(min, max, true)
    }

    /// `min < value < max`.
    ///
    /// # Errors
    ///
    /// See [`with_comparator`](Self::with_comparator).
    pub fn exclusive(min: impl Into<Value>, max: impl Into<Value>) -> ConstraintResult<Self> {
        Self::new(min, max, false)
    }

    /// Range under a custom comparator.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::RangeTypeMismatch`] if the bounds are of
    ///   incompatible kinds.
    /// - [`ConstraintError::IncomparableBounds`] if the comparator cannot order
    ///   them.
    /// - [`ConstraintError::InvalidRange`] if `min > max`, or `min == max` for
    ///   an exclusive range.
    pub fn with_comparator(
        min: impl Into<Value>,
        max: impl Into<Value>,
        inclusive: bool,
        comparator: NullSafeComparator,
    ) -> ConstraintResult<Self> {
        let (min, max) = (min.into(), max.into());

        if !min.kind().is_compatible_with(max.kind()) {
            return Err(ConstraintError::RangeTypeMismatch {
                min: min.kind(),
                max: max.kind(),
            });
        }

        let in_order = match comparator.compare(&min, &max) {
            None => {
                return Err(ConstraintError::IncomparableBounds {
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => inclusive,
            Some(Ordering::Greater) => false,
        };
        if !in_order {
            return Err(ConstraintError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
                inclusive,
            });
        }

        let (lower, upper) = if inclusive {
            (
                RelationalOperator::GreaterThanEqualTo,
                RelationalOperator::LessThanEqualTo,
            )
        } else {
            (RelationalOperator::GreaterThan, RelationalOperator::LessThan)
        };
        let constraint = CompoundConstraint::with(
            Junction::And,
            [
                lower.bind(comparator.clone(), min.clone()),
                upper.bind(comparator, max.clone()),
            ],
        );

        Ok(Self {
            min,
            max,
            inclusive,
            constraint,
        })
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> &Value {
        &self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> &Value {
        &self.max
    }

    /// Whether the bounds themselves are inside the range.
    #[must_use]
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// The `And` of both bound checks.
    #[must_use]
    pub fn constraint(&self) -> &CompoundConstraint {
        &self.constraint
    }
}

impl Predicate for Range {
    fn test(&self, value: &Value) -> bool {
        self.constraint.test(value)
    }

    fn type_tag(&self) -> Option<&str> {
        Some(Self::TYPE_TAG)
    }
}
