//! Binary comparisons.
//!
//! Every comparison goes through a
//! [`NullSafeComparator`](crate::value::NullSafeComparator), so `null` sorts
//! above every other value:
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! assert!(GreaterThan::new().test(&Value::Null, &Value::from(5)));
//! assert!(!LessThan::new().test(&Value::Null, &Value::from(5)));
//! ```
//!
//! Pairs the comparator cannot order (text against a number) fail every
//! ordering comparison.

use std::sync::Arc;

use crate::combinators::ParameterizedBinaryConstraint;
use crate::comparison;
use crate::foundation::BinaryPredicate;
use crate::value::{NullSafeComparator, Value, ValueComparator};

// ============================================================================
// EQUALITY
// ============================================================================

/// Passes when both values are equal.
///
/// Without a custom comparator this is structural equality, so `Int(1)` and
/// `Float(1.0)` differ. With one, the pair is equal when the comparator
/// answers `Equal`.
#[derive(Debug, Clone, Default)]
pub struct EqualTo {
    comparator: NullSafeComparator,
}

impl EqualTo {
    /// Type tag reported by this comparison.
    pub const TYPE_TAG: &'static str = "equalTo";

    /// Structural equality.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Equality decided by a custom comparator.
    #[must_use]
    pub fn with_comparator(comparator: Arc<dyn ValueComparator>) -> Self {
        Self {
            comparator: NullSafeComparator::wrapping(comparator),
        }
    }

    /// Equality under an already wrapped comparator.
    #[must_use]
    pub fn from_comparator(comparator: NullSafeComparator) -> Self {
        Self { comparator }
    }

    /// The comparator in use.
    #[must_use]
    pub fn comparator(&self) -> &NullSafeComparator {
        &self.comparator
    }

    /// Fixes the right-hand side, producing a unary constraint.
    #[must_use]
    pub fn bind(self, parameter: impl Into<Value>) -> ParameterizedBinaryConstraint {
        ParameterizedBinaryConstraint::new(self, parameter)
    }
}

impl BinaryPredicate for EqualTo {
    fn test(&self, left: &Value, right: &Value) -> bool {
        if self.comparator.is_custom() {
            self.comparator.compare(left, right).is_some_and(|o| o.is_eq())
        } else {
            left == right
        }
    }

    fn type_tag(&self) -> Option<&str> {
        Some(Self::TYPE_TAG)
    }
}

/// Creates an [`EqualTo`].
#[must_use]
pub fn equal_to() -> EqualTo {
    EqualTo::new()
}

// ============================================================================
// ORDERING
// ============================================================================

comparison! {
    /// Passes when the left value is greater than the right one.
    pub GreaterThan = "greaterThan";
    holds(ordering) { ordering.is_gt() }
    fn greater_than();
}

comparison! {
    /// Passes when the left value is greater than or equal to the right one.
    pub GreaterThanEqualTo = "greaterThanEqualTo";
    holds(ordering) { ordering.is_ge() }
    fn greater_than_equal_to();
}

comparison! {
    /// Passes when the left value is less than the right one.
    pub LessThan = "lessThan";
    holds(ordering) { ordering.is_lt() }
    fn less_than();
}

comparison! {
    /// Passes when the left value is less than or equal to the right one.
    pub LessThanEqualTo = "lessThanEqualTo";
    holds(ordering) { ordering.is_le() }
    fn less_than_equal_to();
}

// ============================================================================
// OPERATOR
// ============================================================================

/// One of the five comparisons, chosen at runtime.
///
/// Used where the relation is data, as in
/// [`StringLengthConstraint::new`](super::StringLengthConstraint::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationalOperator {
    /// `==`
    EqualTo,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqualTo,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqualTo,
}

impl RelationalOperator {
    /// The comparison for this operator under `comparator`.
    #[must_use]
    pub fn predicate(self, comparator: NullSafeComparator) -> Arc<dyn BinaryPredicate> {
        match self {
            Self::EqualTo => Arc::new(EqualTo::from_comparator(comparator)),
            Self::GreaterThan => Arc::new(GreaterThan::from_comparator(comparator)),
            Self::GreaterThanEqualTo => Arc::new(GreaterThanEqualTo::from_comparator(comparator)),
            Self::LessThan => Arc::new(LessThan::from_comparator(comparator)),
            Self::LessThanEqualTo => Arc::new(LessThanEqualTo::from_comparator(comparator)),
        }
    }

    /// Binds `parameter` as the right-hand side.
    #[must_use]
    pub fn bind(
        self,
        comparator: NullSafeComparator,
        parameter: impl Into<Value>,
    ) -> ParameterizedBinaryConstraint {
        ParameterizedBinaryConstraint::from_arc(self.predicate(comparator), parameter)
    }
}
