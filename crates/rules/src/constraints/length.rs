//! String length bounds.

use crate::combinators::ClosureResultConstraint;
use crate::constraints::{Range, RelationalOperator};
use crate::foundation::{ConstraintResult, Predicate};
use crate::value::{NullSafeComparator, Value};

/// Character count of a value's text form. `null` has length 0; lists and
/// maps have no length and map to `null`.
#[must_use]
pub fn char_length(value: &Value) -> Value {
    match value {
        Value::Null => Value::from(0),
        other => other
            .text_rendering()
            .map_or(Value::Null, |text| Value::from(text.chars().count())),
    }
}

/// Bounds the number of characters in a value's text form.
///
/// Length is counted in Unicode scalar values, not bytes. Lists and maps
/// have no string length and always fail.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let name = StringLengthConstraint::max(5);
/// assert!(name.test(&Value::from("héllo")));
/// assert!(!name.test(&Value::from("hello!")));
/// assert!(name.test(&Value::Null));
/// assert_eq!(name.type_tag(), Some("maxLength"));
/// ```
#[derive(Debug, Clone)]
pub struct StringLengthConstraint {
    inner: ClosureResultConstraint,
    type_tag: &'static str,
}

impl StringLengthConstraint {
    /// Length compared to `length` with `operator`.
    #[must_use]
    pub fn new(operator: RelationalOperator, length: usize) -> Self {
        let type_tag = match operator {
            RelationalOperator::LessThanEqualTo => "maxLength",
            RelationalOperator::GreaterThanEqualTo => "minLength",
            _ => "stringLength",
        };
        let bound = operator.bind(NullSafeComparator::natural(), length);
        Self {
            inner: ClosureResultConstraint::new(char_length, bound),
            type_tag,
        }
    }

    /// At most `length` characters.
    #[must_use]
    pub fn max(length: usize) -> Self {
        Self::new(RelationalOperator::LessThanEqualTo, length)
    }

    /// At least `length` characters.
    #[must_use]
    pub fn min(length: usize) -> Self {
        Self::new(RelationalOperator::GreaterThanEqualTo, length)
    }

    /// Between `min` and `max` characters, inclusive.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidRange`](crate::foundation::ConstraintError::InvalidRange)
    /// if `min > max`.
    pub fn range(min: usize, max: usize) -> ConstraintResult<Self> {
        Ok(Self::within(Range::inclusive(min, max)?))
    }

    /// Length inside an arbitrary [`Range`] of lengths.
    #[must_use]
    pub fn within(range: Range) -> Self {
        Self {
            inner: ClosureResultConstraint::new(char_length, range),
            type_tag: "stringLengthRange",
        }
    }
}

impl Predicate for StringLengthConstraint {
    fn test(&self, value: &Value) -> bool {
        !matches!(value, Value::List(_) | Value::Map(_)) && self.inner.test(value)
    }

    fn type_tag(&self) -> Option<&str> {
        Some(self.type_tag)
    }
}
