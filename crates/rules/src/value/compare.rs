//! Ordering of values and the single null policy of the crate.
//!
//! Every ordering predicate (comparisons, ranges, string lengths) goes through
//! [`NullSafeComparator`]:
//!
//! - two nulls are equal;
//! - `null` sorts as the **greatest** value, so `null > 5` and `5 < null`;
//! - non-null pairs are handed to the wrapped comparator, or to
//!   [`NaturalOrder`] when none was supplied.
//!
//! A comparator may answer `None` for pairs it cannot order (text against a
//! number, NaN, maps). Predicates treat such pairs as *not satisfying* the
//! relation; nothing panics.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::Value;

/// Compares two non-null values.
///
/// Implemented for [`NaturalOrder`] and for any
/// `Fn(&Value, &Value) -> Ordering + Send + Sync` closure.
pub trait ValueComparator: Send + Sync {
    /// Returns the ordering of `left` relative to `right`, or `None` if the
    /// pair cannot be ordered.
    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering>;
}

impl<F> ValueComparator for F
where
    F: Fn(&Value, &Value) -> Ordering + Send + Sync,
{
    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        Some(self(left, right))
    }
}

/// Exact ordering of an integer against a float.
///
/// Casting the integer would merge neighbours above 2^53, so the float is
/// split into its integral part (compared as `i64`) and its fraction.
fn int_to_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63: the first float past i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    if float >= BOUND {
        return Some(Ordering::Less);
    }
    if float < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    let whole_int = whole as i64;
    match int.cmp(&whole_int) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        other => Some(other),
    }
}

/// The natural order of values.
///
/// Integers and floats compare numerically with each other, text
/// lexicographically, booleans `false < true`, and lists element by element
/// (null-safe). Maps and cross-kind pairs have no natural order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl ValueComparator for NaturalOrder {
    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => int_to_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => int_to_float(*b, *a).map(Ordering::reverse),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match null_safe(x, y, self)? {
                        Ordering::Equal => {}
                        other => return Some(other),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => None,
        }
    }
}

/// Wraps an optional comparator so that nulls follow the crate's policy.
#[derive(Clone, Default)]
pub struct NullSafeComparator {
    inner: Option<Arc<dyn ValueComparator>>,
}

impl NullSafeComparator {
    /// Null-safe natural order.
    #[must_use]
    pub fn natural() -> Self {
        Self { inner: None }
    }

    /// Null-safe wrapper around a custom comparator.
    pub fn wrapping(comparator: Arc<dyn ValueComparator>) -> Self {
        Self {
            inner: Some(comparator),
        }
    }

    /// Wraps `comparator` if present, otherwise uses the natural order.
    #[must_use]
    pub fn from_option(comparator: Option<Arc<dyn ValueComparator>>) -> Self {
        Self { inner: comparator }
    }

    /// Returns `true` if a custom comparator is wrapped.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.inner.is_some()
    }

    /// Returns the wrapped custom comparator, if any.
    #[must_use]
    pub fn custom(&self) -> Option<&Arc<dyn ValueComparator>> {
        self.inner.as_ref()
    }

    /// Compares two values, nulls included.
    #[must_use]
    pub fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        let ordering = match &self.inner {
            Some(inner) => null_safe(left, right, inner.as_ref()),
            None => null_safe(left, right, &NaturalOrder),
        };
        if ordering.is_none() {
            trace!(left = %left.kind(), right = %right.kind(), "values cannot be ordered");
        }
        ordering
    }
}

impl fmt::Debug for NullSafeComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullSafeComparator")
            .field(
                "inner",
                &if self.inner.is_some() {
                    "<custom>"
                } else {
                    "natural"
                },
            )
            .finish()
    }
}

fn null_safe(left: &Value, right: &Value, inner: &dyn ValueComparator) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Greater),
        (_, Value::Null) => Some(Ordering::Less),
        _ => inner.compare(left, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_greatest() {
        let cmp = NullSafeComparator::natural();
        assert_eq!(cmp.compare(&Value::Null, &Value::Null), Some(Ordering::Equal));
        assert_eq!(cmp.compare(&Value::Null, &Value::Int(5)), Some(Ordering::Greater));
        assert_eq!(cmp.compare(&Value::Int(5), &Value::Null), Some(Ordering::Less));
    }

    #[test]
    fn test_numeric_family() {
        let cmp = NullSafeComparator::natural();
        assert_eq!(cmp.compare(&Value::Int(2), &Value::Float(2.5)), Some(Ordering::Less));
        assert_eq!(cmp.compare(&Value::Float(3.0), &Value::Int(3)), Some(Ordering::Equal));
    }

    #[test]
    fn test_int_float_exact_above_f64_precision() {
        let cmp = NaturalOrder;
        let big = Value::Int(9_007_199_254_740_993);
        let near = Value::Float(9_007_199_254_740_992.0);
        assert_eq!(cmp.compare(&big, &near), Some(Ordering::Greater));
        assert_eq!(cmp.compare(&near, &big), Some(Ordering::Less));
        assert_eq!(cmp.compare(&Value::Int(i64::MAX), &Value::Float(f64::INFINITY)), Some(Ordering::Less));
        assert_eq!(cmp.compare(&Value::Int(i64::MIN), &Value::Float(-1.0e19)), Some(Ordering::Greater));
        assert_eq!(cmp.compare(&Value::Int(-3), &Value::Float(-2.5)), Some(Ordering::Less));
        assert_eq!(cmp.compare(&Value::Int(-2), &Value::Float(-2.5)), Some(Ordering::Greater));
        assert_eq!(cmp.compare(&Value::Int(i64::MIN), &Value::Float(-9_223_372_036_854_775_808.0)), Some(Ordering::Equal));
    }

    #[test]
    fn test_incomparable_pairs() {
        let cmp = NullSafeComparator::natural();
        assert_eq!(cmp.compare(&Value::from("a"), &Value::Int(1)), None);
        assert_eq!(cmp.compare(&Value::Float(f64::NAN), &Value::Float(1.0)), None);
    }

    #[test]
    fn test_lists_compare_elementwise() {
        let cmp = NullSafeComparator::natural();
        let a = Value::from(vec![1, 2]);
        let b = Value::from(vec![1, 3]);
        let c = Value::from(vec![1]);
        assert_eq!(cmp.compare(&a, &b), Some(Ordering::Less));
        assert_eq!(cmp.compare(&a, &c), Some(Ordering::Greater));
    }

    #[test]
    fn test_custom_comparator_stays_null_safe() {
        // Case-insensitive text ordering.
        let by_lowercase = |a: &Value, b: &Value| {
            let a = a.as_str().unwrap_or_default().to_lowercase();
            let b = b.as_str().unwrap_or_default().to_lowercase();
            a.cmp(&b)
        };
        let cmp = NullSafeComparator::wrapping(Arc::new(by_lowercase));
        assert!(cmp.is_custom());
        assert_eq!(
            cmp.compare(&Value::from("ABC"), &Value::from("abc")),
            Some(Ordering::Equal)
        );
        assert_eq!(cmp.compare(&Value::Null, &Value::from("z")), Some(Ordering::Greater));
    }
}
