//! Presence check.

use crate::foundation::Predicate;
use crate::value::Value;

/// Passes when a value is present.
///
/// Present means non-null, text with at least one non-whitespace character,
/// and non-empty lists and maps. Numbers and booleans are always present.
///
/// [`REQUIRED`](Self::REQUIRED) and [`PRESENT`](Self::PRESENT) test the same
/// thing and differ only in their type tag.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// assert!(Required::REQUIRED.test(&Value::from("Ada")));
/// assert!(!Required::REQUIRED.test(&Value::from("   ")));
/// assert!(Required::PRESENT.test(&Value::from(0)));
/// assert_eq!(Required::PRESENT.type_tag(), Some("present"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Required {
    type_tag: &'static str,
}

impl Required {
    /// Presence reported as `"required"`.
    pub const REQUIRED: Self = Self {
        type_tag: "required",
    };

    /// Presence reported as `"present"`.
    pub const PRESENT: Self = Self { type_tag: "present" };

    /// The presence test on its own.
    #[must_use]
    pub fn is_present(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Text(s) => !s.trim().is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => true,
        }
    }
}

impl Predicate for Required {
    fn test(&self, value: &Value) -> bool {
        Self::is_present(value)
    }

    fn type_tag(&self) -> Option<&str> {
        Some(self.type_tag)
    }
}
