//! Named predicates resolved from a registry.
//!
//! Domain-specific checks ("is a valid IBAN", "is a known country") are
//! registered once under a name and looked up when a constraint is built.
//! Lookup failures surface at construction, never at test time.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::foundation::{ConstraintError, ConstraintResult, Predicate};
use crate::value::Value;

/// A shared single-argument boolean function.
pub type NamedPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

// ============================================================================
// REGISTRY
// ============================================================================

/// Name to predicate lookup table.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let mut registry = PredicateRegistry::new();
/// registry.register("even", |v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0));
///
/// let even = MethodInvokingConstraint::new(&registry, "even")?;
/// assert!(even.test(&Value::from(4)));
/// assert!(MethodInvokingConstraint::new(&registry, "odd").is_err());
/// # Ok::<(), ConstraintError>(())
/// ```
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: IndexMap<String, NamedPredicate>,
}

impl PredicateRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `predicate` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(name = %name, "registered predicate");
        self.predicates.insert(name, Arc::new(predicate));
        self
    }

    /// Looks up a predicate.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NamedPredicate> {
        self.predicates.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Number of registered predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.predicates.keys()).finish()
    }
}

// ============================================================================
// CONSTRAINT
// ============================================================================

/// Adapts a registered predicate into a constraint.
///
/// The predicate is resolved once, when the constraint is built. The type tag
/// is the registered name.
#[derive(Clone)]
pub struct MethodInvokingConstraint {
    name: String,
    predicate: NamedPredicate,
}

impl MethodInvokingConstraint {
    /// Resolves `name` in `registry`.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::PredicateNotFound`] if nothing is registered under
    /// `name`.
    pub fn new(registry: &PredicateRegistry, name: impl Into<String>) -> ConstraintResult<Self> {
        let name = name.into();
        match registry.get(&name) {
            Some(predicate) => Ok(Self {
                predicate: Arc::clone(predicate),
                name,
            }),
            None => Err(ConstraintError::PredicateNotFound(name)),
        }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for MethodInvokingConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInvokingConstraint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Predicate for MethodInvokingConstraint {
    fn test(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn type_tag(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PredicateRegistry {
        let mut registry = PredicateRegistry::new();
        registry
            .register("even", |v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0))
            .register("non_null", |v: &Value| !v.is_null());
        registry
    }

    #[test]
    fn test_resolved_at_construction() {
        let mut registry = registry();
        let even = MethodInvokingConstraint::new(&registry, "even").unwrap();

        // Later registrations do not affect an existing constraint.
        registry.register("even", |_: &Value| false);
        assert!(even.test(&Value::from(2)));
        assert_eq!(even.type_tag(), Some("even"));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            MethodInvokingConstraint::new(&registry(), "prime").unwrap_err(),
            ConstraintError::PredicateNotFound("prime".to_owned())
        );
    }

    #[test]
    fn test_registry_listing() {
        let registry = registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["even", "non_null"]);
        assert!(registry.contains("non_null"));
        assert_eq!(registry.len(), 2);
        assert_eq!(format!("{registry:?}"), r#"{"even", "non_null"}"#);
    }
}
