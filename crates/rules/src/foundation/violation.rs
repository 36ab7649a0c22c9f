//! Structured reports of failed properties.
//!
//! A [`Violation`] names the property that failed and the type tag of the
//! constraint that rejected it. The crate never formats messages: consumers
//! resolve `code` (plus `params`) against their own message catalog.
//!
//! All string fields use `Cow<'static, str>` so static codes do not allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Code used when the failing constraint carries no type tag.
pub const DEFAULT_CODE: &str = "invalid";

// ============================================================================
// VIOLATION
// ============================================================================

/// One failing property.
///
/// # Examples
///
/// ```
/// use nebula_rules::foundation::Violation;
///
/// let violation = Violation::new("age", "range")
///     .with_param("min", "18")
///     .with_param("max", "65");
/// assert_eq!(violation.param("min"), Some("18"));
/// assert_eq!(violation.to_string(), "[age] range (params: [min=18, max=65])");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Property path that failed, e.g. `"address.city"`.
    pub field: Cow<'static, str>,

    /// Type tag of the failing constraint, or [`DEFAULT_CODE`].
    pub code: Cow<'static, str>,

    /// Ordered key-value pairs for message templates (typically 0-2).
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,
}

impl Violation {
    /// Creates a violation for a field and code.
    pub fn new(field: impl Into<Cow<'static, str>>, code: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            params: SmallVec::new(),
        }
    }

    /// Adds a template parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.code)?;

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for Violation {}

// ============================================================================
// VIOLATION COLLECTION
// ============================================================================

/// Violations of a whole domain object, in property declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Adds a violation.
    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns true if there are any violations.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns all violations.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterates violations in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// The first failing property, which is what "jump to first error" UIs want.
    #[must_use]
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Returns the violation for a field, if that field failed.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, Violations> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_without_params() {
        let violation = Violation::new("name", "required");
        assert_eq!(violation.to_string(), "[name] required");
        assert!(violation.param("min").is_none());
    }

    #[test]
    fn test_collection() {
        let mut violations = Violations::new();
        assert!(violations.is_empty());
        violations.add(Violation::new("name", "required"));
        violations.add(Violation::new("age", DEFAULT_CODE));

        assert_eq!(violations.len(), 2);
        assert!(violations.has_violations());
        assert_eq!(violations.first().map(|v| v.field.as_ref()), Some("name"));
        assert_eq!(
            violations.for_field("age").map(|v| v.code.as_ref()),
            Some("invalid")
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Violations::new().into_result(7), Ok(7));
        let failed: Violations = [Violation::new("x", "y")].into_iter().collect();
        assert!(failed.into_result(()).is_err());
    }

    #[test]
    fn test_static_codes_do_not_allocate() {
        let violation = Violation::new("name", "required");
        assert!(matches!(violation.code, Cow::Borrowed(_)));
        assert!(matches!(violation.field, Cow::Borrowed(_)));
    }

    #[test]
    fn test_display_lists_every_violation() {
        let violations: Violations = [Violation::new("a", "x"), Violation::new("b", "y")]
            .into_iter()
            .collect();
        let text = violations.to_string();
        assert!(text.contains("2 violation(s)"));
        assert!(text.contains("1. [a] x"));
        assert!(text.contains("2. [b] y"));
    }
}
