//! Core contracts and error types
//!
//! This module contains the fundamental building blocks of the rule engine:
//!
//! - **Traits**: [`Predicate`], [`BinaryPredicate`], [`ConstraintExt`]
//! - **Errors**: [`ConstraintError`], [`PropertyAccessError`], [`FactoryError`]
//! - **Reports**: [`Violation`], [`Violations`]
//!
//! # Architecture
//!
//! ## 1. Closed trees, open leaves
//!
//! Leaves are any type implementing [`Predicate`]. Everything above the
//! leaves is the closed [`Constraint`](crate::combinators::Constraint) enum,
//! interpreted by one recursive `test` function.
//!
//! ## 2. Construction fails, evaluation does not
//!
//! Malformed constraints are rejected when built. Once a constraint exists,
//! testing it only ever answers `true` or `false`; a property constraint may
//! additionally report that a property path did not resolve.
//!
//! ## 3. Tags, not messages
//!
//! Constraints carry an optional type tag such as `"required"`. Turning a tag
//! into text is the consumer's job.

pub mod error;
pub mod traits;
pub mod violation;

pub use error::{ConstraintError, FactoryError, PropertyAccessError};
pub use traits::{BinaryPredicate, ConstraintExt, Predicate};
pub use violation::{DEFAULT_CODE, Violation, Violations};

/// Result of building a constraint.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Result of evaluating a property constraint against a domain object.
pub type EvaluationResult = Result<bool, PropertyAccessError>;
