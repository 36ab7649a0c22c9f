//! Error types.
//!
//! Three failure families are kept apart because they are fixed in different
//! places:
//!
//! - [`ConstraintError`]: a constraint could not be built (bad range, unknown
//!   predicate, invalid pattern). Raised at construction, never at test time.
//! - [`PropertyAccessError`]: a property path did not resolve on a domain
//!   object. This is a schema/configuration bug, not a failed validation, so
//!   property constraints return it as `Err` instead of `Ok(false)`.
//! - [`FactoryError`]: misuse of the process-wide default factory.

use crate::value::ValueKind;

// ============================================================================
// CONSTRUCTION ERRORS
// ============================================================================

/// A constraint could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConstraintError {
    /// Range bounds are out of order (`min > max`, or `min >= max` when
    /// exclusive).
    #[error("invalid range: min {min} and max {max} are out of order (inclusive: {inclusive})")]
    InvalidRange {
        /// Rendered minimum.
        min: String,
        /// Rendered maximum.
        max: String,
        /// Whether the bounds were inclusive.
        inclusive: bool,
    },

    /// Range bounds are of different kinds.
    #[error("range bounds must share a kind, got {min} and {max}")]
    RangeTypeMismatch {
        /// Kind of the minimum.
        min: ValueKind,
        /// Kind of the maximum.
        max: ValueKind,
    },

    /// The comparator could not order the range bounds.
    #[error("range bounds {min} and {max} cannot be ordered")]
    IncomparableBounds {
        /// Rendered minimum.
        min: String,
        /// Rendered maximum.
        max: String,
    },

    /// No predicate with this name exists in the predicate registry.
    #[error("no predicate named '{0}' is registered")]
    PredicateNotFound(String),

    /// A compound contains a child of an unexpected kind.
    #[error("child {index} is {actual}, expected {expected}")]
    TypeSafety {
        /// Position of the offending child.
        index: usize,
        /// What every child should be.
        expected: String,
        /// What the child actually is.
        actual: String,
    },

    /// A regular expression failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Source pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// Property names must be non-empty, and so must every dotted segment.
    #[error("property name must not be empty: '{0}'")]
    EmptyPropertyName(String),

    /// Factory configuration is unusable.
    #[error("invalid constraints configuration: {0}")]
    InvalidConfig(String),
}

// ============================================================================
// PROPERTY RESOLUTION ERRORS
// ============================================================================

/// A property could not be read from or written to a domain object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PropertyAccessError {
    /// Nothing exists at this path.
    #[error("no property at '{path}'")]
    NotFound {
        /// Full dotted path up to and including the missing segment.
        path: String,
    },

    /// The path continues through a value that has no properties.
    #[error("cannot read '{path}': found {kind} where an object was expected")]
    NotNavigable {
        /// Full dotted path up to and including the failing segment.
        path: String,
        /// Kind of the value that could not be descended into.
        kind: ValueKind,
    },

    /// The accessor does not support writes for this path.
    #[error("property '{path}' is read-only")]
    ReadOnly {
        /// Path that was written.
        path: String,
    },

    /// The accessor rejected the written value.
    #[error("cannot assign {kind} to '{path}'")]
    InvalidValue {
        /// Path that was written.
        path: String,
        /// Kind of the rejected value.
        kind: ValueKind,
    },

    /// A domain object could not be snapshotted into a value.
    #[error("cannot snapshot domain object: {0}")]
    Snapshot(String),
}

impl PropertyAccessError {
    /// Creates a [`PropertyAccessError::NotFound`].
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Returns the path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound { path }
            | Self::NotNavigable { path, .. }
            | Self::ReadOnly { path }
            | Self::InvalidValue { path, .. } => Some(path),
            Self::Snapshot(_) => None,
        }
    }
}

// ============================================================================
// FACTORY ERRORS
// ============================================================================

/// The process-wide default factory was misused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FactoryError {
    /// A default factory was already installed or already handed out.
    #[error("the default constraints factory is already installed")]
    AlreadyInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_error_display() {
        let err = ConstraintError::RangeTypeMismatch {
            min: ValueKind::Int,
            max: ValueKind::Text,
        };
        assert_eq!(err.to_string(), "range bounds must share a kind, got int and text");

        let err = ConstraintError::PredicateNotFound("is_even".to_owned());
        assert!(err.to_string().contains("is_even"));
    }

    #[test]
    fn test_property_access_error_path() {
        let err = PropertyAccessError::NotNavigable {
            path: "address.city".to_owned(),
            kind: ValueKind::Text,
        };
        assert_eq!(err.path(), Some("address.city"));
        assert!(err.to_string().contains("found text"));
        assert_eq!(PropertyAccessError::Snapshot("x".to_owned()).path(), None);
    }
}
