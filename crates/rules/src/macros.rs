//! Macros for declaring constraints with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`comparison!`]: Ordering comparison (struct + `BinaryPredicate` impl + factory fn)
//! - [`all_of!`]: AND-chain several constraints
//! - [`any_of!`]: OR-chain several constraints
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_rules::comparison;
//!
//! comparison! {
//!     /// Passes when the left value is at most the right one.
//!     pub AtMost = "atMost";
//!     holds(ordering) { ordering.is_le() }
//!     fn at_most();
//! }
//! ```

// ============================================================================
// COMPARISON MACRO
// ============================================================================

/// Creates an ordering comparison: a struct holding a
/// [`NullSafeComparator`](crate::value::NullSafeComparator), its
/// [`BinaryPredicate`](crate::foundation::BinaryPredicate) implementation,
/// constructors, and a factory function.
///
/// `holds(ordering)` receives the `Ordering` of left relative to right.
/// Pairs the comparator cannot order never hold.
///
/// `#[derive(Debug, Clone, Default)]` is always applied.
#[macro_export]
macro_rules! comparison {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $tag:literal;
        holds($ord:ident) $rule:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        $vis struct $name {
            comparator: $crate::value::NullSafeComparator,
        }

        impl $name {
            /// Type tag reported by this comparison.
            pub const TYPE_TAG: &'static str = $tag;

            /// Comparison under the null-safe natural order.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Comparison under a custom comparator, still null-safe.
            #[must_use]
            pub fn with_comparator(
                comparator: ::std::sync::Arc<dyn $crate::value::ValueComparator>,
            ) -> Self {
                Self {
                    comparator: $crate::value::NullSafeComparator::wrapping(comparator),
                }
            }

            /// Comparison under an already wrapped comparator.
            #[must_use]
            pub fn from_comparator(comparator: $crate::value::NullSafeComparator) -> Self {
                Self { comparator }
            }

            /// The comparator in use.
            #[must_use]
            pub fn comparator(&self) -> &$crate::value::NullSafeComparator {
                &self.comparator
            }

            /// Fixes the right-hand side, producing a unary constraint.
            #[must_use]
            pub fn bind(
                self,
                parameter: impl Into<$crate::value::Value>,
            ) -> $crate::combinators::ParameterizedBinaryConstraint {
                $crate::combinators::ParameterizedBinaryConstraint::new(self, parameter)
            }
        }

        impl $crate::foundation::BinaryPredicate for $name {
            fn test(&self, left: &$crate::value::Value, right: &$crate::value::Value) -> bool {
                self.comparator
                    .compare(left, right)
                    .is_some_and(|$ord| $rule)
            }

            fn type_tag(&self) -> Option<&str> {
                Some(Self::TYPE_TAG)
            }
        }

        #[doc = concat!("Creates a [`", stringify!($name), "`].")]
        #[must_use]
        $vis fn $factory() -> $name {
            $name::new()
        }
    };
}

// ============================================================================
// COMPOSITION MACROS
// ============================================================================

/// AND-chains constraints into one flat compound.
///
/// # Examples
///
/// ```rust
/// use nebula_rules::all_of;
/// use nebula_rules::prelude::*;
///
/// let c = all_of![Required::REQUIRED, StringLengthConstraint::max(3)];
/// assert!(c.test(&Value::from("abc")));
/// assert!(!c.test(&Value::from("abcd")));
/// ```
#[macro_export]
macro_rules! all_of {
    ($($constraint:expr),+ $(,)?) => {
        $crate::combinators::Constraint::all([
            $($crate::combinators::Constraint::from($constraint)),+
        ])
    };
}

/// OR-chains constraints into one flat compound.
///
/// # Examples
///
/// ```rust
/// use nebula_rules::any_of;
/// use nebula_rules::prelude::*;
///
/// let c = any_of![EqualTo::new().bind("a"), EqualTo::new().bind("b")];
/// assert!(c.test(&Value::from("b")));
/// assert!(!c.test(&Value::from("c")));
/// ```
#[macro_export]
macro_rules! any_of {
    ($($constraint:expr),+ $(,)?) => {
        $crate::combinators::Constraint::any([
            $($crate::combinators::Constraint::from($constraint)),+
        ])
    };
}
