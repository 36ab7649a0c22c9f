//! Full-string regular expression matching.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};

use crate::config::DEFAULT_REGEX_SIZE_LIMIT;
use crate::foundation::{ConstraintError, ConstraintResult, Predicate};
use crate::value::Value;

/// Passes when the whole text matches a pattern.
///
/// The pattern is anchored at both ends, so `"[a-z]+"` rejects `"abc1"`.
/// `null` is matched as the empty string; numbers and booleans through
/// their text form; lists and maps never match.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let zip = RegexpConstraint::new(r"\d{5}")?;
/// assert!(zip.test(&Value::from("12345")));
/// assert!(!zip.test(&Value::from("123456")));
/// assert!(zip.test(&Value::from(90210)));
///
/// let optional = RegexpConstraint::new(r"(\d{5})?")?;
/// assert!(optional.test(&Value::Null));
/// # Ok::<(), ConstraintError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RegexpConstraint {
    pattern: String,
    regex: Regex,
    type_tag: Cow<'static, str>,
}

impl RegexpConstraint {
    /// Default type tag.
    pub const TYPE_TAG: &'static str = "regexp";

    /// Compiles `pattern` with the default size limit.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: impl Into<String>) -> ConstraintResult<Self> {
        Self::with_size_limit(pattern, DEFAULT_REGEX_SIZE_LIMIT)
    }

    /// Compiles `pattern`, bounding the compiled program to `size_limit`
    /// bytes.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidPattern`] if the pattern does not compile or
    /// exceeds the limit.
    pub fn with_size_limit(pattern: impl Into<String>, size_limit: usize) -> ConstraintResult<Self> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .size_limit(size_limit)
            .build()
            .map_err(|e| ConstraintError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            pattern,
            regex,
            type_tag: Cow::Borrowed(Self::TYPE_TAG),
        })
    }

    /// Overrides the type tag, e.g. `"email"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.type_tag = tag.into();
        self
    }

    /// The pattern as given, without anchors.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Predicate for RegexpConstraint {
    fn test(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.regex.is_match(""),
            other => other
                .text_rendering()
                .is_some_and(|text| self.regex.is_match(&text)),
        }
    }

    fn type_tag(&self) -> Option<&str> {
        Some(&self.type_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match() {
        let word = RegexpConstraint::new("[a-z]+").unwrap();
        assert!(word.test(&Value::from("abc")));
        assert!(!word.test(&Value::from("abc1")));
        assert!(!word.test(&Value::from("1abc")));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let c = RegexpConstraint::new("a|b").unwrap();
        assert!(c.test(&Value::from("a")));
        assert!(!c.test(&Value::from("ab")));
    }

    #[test]
    fn test_null_is_empty_string() {
        assert!(!RegexpConstraint::new(".+").unwrap().test(&Value::Null));
        assert!(RegexpConstraint::new(".*").unwrap().test(&Value::Null));
    }

    #[test]
    fn test_collections_never_match() {
        let c = RegexpConstraint::new(".*").unwrap();
        assert!(!c.test(&Value::from(vec!["a"])));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RegexpConstraint::new("(").unwrap_err();
        assert!(matches!(err, ConstraintError::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn test_size_limit() {
        assert!(RegexpConstraint::with_size_limit(r"\w{100}", 16).is_err());
    }

    #[test]
    fn test_type_tag() {
        let c = RegexpConstraint::new(".+@.+").unwrap().with_type_tag("email");
        assert_eq!(c.type_tag(), Some("email"));
        assert_eq!(c.pattern(), ".+@.+");
    }
}
