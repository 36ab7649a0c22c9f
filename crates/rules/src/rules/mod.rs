//! Per-type rule sets.
//!
//! Rules are built in two phases. A [`RulesBuilder`] collects property
//! constraints; [`RulesBuilder::build`] seals them into an immutable
//! [`Rules`] that can be shared across threads.
//!
//! Every property gets one And-compound. The first constraint added for a
//! property fixes its position; later ones are appended to the same
//! compound.
//!
//! # Examples
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! let c = Constraints::new();
//! let rules = Rules::builder(DomainType::named("Person"))
//!     .add(c.required("name")?)
//!     .add(c.in_range("age", 18, 65)?)
//!     .add(c.max_length("name", 10)?)
//!     .build();
//!
//! let names: Vec<_> = rules.property_names().map(PropertyName::as_str).collect();
//! assert_eq!(names, ["name", "age"]);
//!
//! let person = Value::from_json(serde_json::json!({ "name": "", "age": 15 }));
//! assert_eq!(rules.test(&person), Ok(false));
//! # Ok::<(), ConstraintError>(())
//! ```

pub mod domain;
pub mod source;

pub use domain::DomainType;
pub use source::{RulesRegistry, RulesSource};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::combinators::{Constraint, Junction};
use crate::foundation::{
    ConstraintResult, DEFAULT_CODE, EvaluationResult, PropertyAccessError, Violation, Violations,
};
use crate::property::{
    CompoundPropertyConstraint, PropertyAccessor, PropertyConstraint, PropertyName,
    PropertyValueConstraint,
};

/// Something that can hand out the compound constraint of a property.
pub trait PropertyConstraintProvider {
    /// The compound constraint registered for `property_name`, if any.
    fn property_constraint(&self, property_name: &str) -> Option<&CompoundPropertyConstraint>;
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects property constraints for one domain type.
#[derive(Debug, Clone)]
pub struct RulesBuilder {
    domain_type: DomainType,
    constraints: IndexMap<PropertyName, CompoundPropertyConstraint>,
}

impl RulesBuilder {
    /// Empty builder for `domain_type`.
    #[must_use]
    pub fn new(domain_type: DomainType) -> Self {
        Self {
            domain_type,
            constraints: IndexMap::new(),
        }
    }

    /// Adds a property constraint.
    ///
    /// Files it under its property: a new property is appended in a fresh
    /// And-compound, a known one gets the constraint appended to its
    /// existing compound without moving.
    #[must_use = "builder methods must be chained or built"]
    pub fn add(mut self, constraint: impl Into<PropertyConstraint>) -> Self {
        self.push(constraint.into());
        self
    }

    /// Adds several property constraints in order.
    #[must_use = "builder methods must be chained or built"]
    pub fn add_all<I, C>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<PropertyConstraint>,
    {
        for constraint in constraints {
            self.push(constraint.into());
        }
        self
    }

    /// Binds a value constraint to `property_name` and adds it.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::EmptyPropertyName`](crate::foundation::ConstraintError::EmptyPropertyName)
    /// if the name is invalid.
    pub fn add_value(
        self,
        property_name: &str,
        constraint: impl Into<Constraint>,
    ) -> ConstraintResult<Self> {
        let name = PropertyName::new(property_name)?;
        Ok(self.add(PropertyValueConstraint::new(name, constraint)))
    }

    fn push(&mut self, constraint: PropertyConstraint) {
        let name = constraint.property_name().clone();
        trace!(
            domain_type = %self.domain_type,
            property = %name,
            tag = constraint.type_tag().unwrap_or(DEFAULT_CODE),
            "adding property constraint"
        );
        self.constraints
            .entry(name)
            .or_insert_with_key(|name| CompoundPropertyConstraint::new(name.clone(), Junction::And))
            .add(constraint);
    }

    /// Number of properties with constraints so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether nothing was added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Seals the collected constraints.
    #[must_use]
    pub fn build(self) -> Rules {
        debug!(
            domain_type = %self.domain_type,
            properties = self.constraints.len(),
            "sealed rules"
        );
        Rules {
            domain_type: self.domain_type,
            constraints: self.constraints,
        }
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Immutable property constraints of one domain type, in declaration order.
#[derive(Debug, Clone)]
pub struct Rules {
    domain_type: DomainType,
    constraints: IndexMap<PropertyName, CompoundPropertyConstraint>,
}

impl Rules {
    /// Starts building rules for `domain_type`.
    #[must_use]
    pub fn builder(domain_type: DomainType) -> RulesBuilder {
        RulesBuilder::new(domain_type)
    }

    /// The type these rules were built for.
    #[must_use]
    pub fn domain_type(&self) -> &DomainType {
        &self.domain_type
    }

    /// Whether these rules apply to `domain_type` (same type or a subtype).
    #[must_use]
    pub fn supports(&self, domain_type: &DomainType) -> bool {
        self.domain_type.supports(domain_type)
    }

    /// The And-compound of every constraint on `property_name`.
    #[must_use]
    pub fn property_constraint(&self, property_name: &str) -> Option<&CompoundPropertyConstraint> {
        self.constraints.get(property_name)
    }

    /// Declaration position of `property_name`.
    #[must_use]
    pub fn position(&self, property_name: &str) -> Option<usize> {
        self.constraints.get_index_of(property_name)
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &PropertyName> {
        self.constraints.keys()
    }

    /// Compounds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompoundPropertyConstraint> {
        self.constraints.values()
    }

    /// Compounds whose outcome may change when `property` is edited.
    pub fn dependent_on<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a CompoundPropertyConstraint> + 'a {
        self.constraints
            .values()
            .filter(move |compound| compound.iter().any(|c| c.is_dependent_on(property)))
    }

    /// Number of constrained properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether no property is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Tests every property in declaration order, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// The first property access error encountered.
    pub fn test(&self, bean: &dyn PropertyAccessor) -> EvaluationResult {
        Ok(self.first_failure(bean)?.is_none())
    }

    /// The first property, in declaration order, whose constraints fail.
    ///
    /// # Errors
    ///
    /// The first property access error encountered.
    pub fn first_failure(
        &self,
        bean: &dyn PropertyAccessor,
    ) -> Result<Option<&PropertyName>, PropertyAccessError> {
        for (name, compound) in &self.constraints {
            if !compound.test(bean)? {
                trace!(domain_type = %self.domain_type, property = %name, "property failed");
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    /// Tests every property and reports each failing one.
    ///
    /// A violation's code is the type tag of the first failing constraint on
    /// that property, or [`DEFAULT_CODE`] if it has none.
    ///
    /// # Errors
    ///
    /// The first property access error encountered.
    pub fn violations(&self, bean: &dyn PropertyAccessor) -> Result<Violations, PropertyAccessError> {
        let mut violations = Violations::new();
        for (name, compound) in &self.constraints {
            if let Some(failing) = compound.first_failing(bean)? {
                let code = failing.type_tag().unwrap_or(DEFAULT_CODE).to_owned();
                violations.add(Violation::new(name.to_string(), code));
            }
        }
        Ok(violations)
    }
}

impl PropertyConstraintProvider for Rules {
    fn property_constraint(&self, property_name: &str) -> Option<&CompoundPropertyConstraint> {
        Self::property_constraint(self, property_name)
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a CompoundPropertyConstraint;
    type IntoIter = indexmap::map::Values<'a, PropertyName, CompoundPropertyConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{Range, Required, StringLengthConstraint};
    use crate::foundation::ConstraintExt;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn person_rules() -> Rules {
        Rules::builder(DomainType::named("Person"))
            .add_value("name", Required::REQUIRED)
            .and_then(|b| b.add_value("age", Range::inclusive(18, 65)?))
            .and_then(|b| b.add_value("name", StringLengthConstraint::max(10)))
            .unwrap()
            .build()
    }

    #[test]
    fn test_merge_keeps_first_position() {
        let rules = person_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.position("name"), Some(0));
        assert_eq!(rules.position("age"), Some(1));
        assert_eq!(rules.property_constraint("name").map(CompoundPropertyConstraint::len), Some(2));
    }

    #[test]
    fn test_merged_constraints_are_all_enforced() {
        let rules = person_rules();
        let name = rules.property_constraint("name").unwrap();
        assert_eq!(name.test(&Value::from_json(json!({ "name": "" }))), Ok(false));
        assert_eq!(
            name.test(&Value::from_json(json!({ "name": "Bartholomew Jr." }))),
            Ok(false)
        );
        assert_eq!(name.test(&Value::from_json(json!({ "name": "Ada" }))), Ok(true));
    }

    #[test]
    fn test_first_failure_and_violations() {
        let rules = person_rules();
        let bean = Value::from_json(json!({ "name": "Bartholomew Jr.", "age": 15 }));

        assert_eq!(rules.first_failure(&bean).unwrap().map(PropertyName::as_str), Some("name"));

        let violations = rules.violations(&bean).unwrap();
        let codes: Vec<_> = violations
            .iter()
            .map(|v| (v.field.as_ref(), v.code.as_ref()))
            .collect();
        assert_eq!(codes, vec![("name", "maxLength"), ("age", "range")]);
    }

    #[test]
    fn test_untagged_failure_uses_default_code() {
        let rules = Rules::builder(DomainType::named("Doc"))
            .add_value("title", Required::REQUIRED.negate())
            .unwrap()
            .build();
        let violations = rules
            .violations(&Value::from_json(json!({ "title": "x" })))
            .unwrap();
        assert_eq!(violations.first().map(|v| v.code.as_ref()), Some(DEFAULT_CODE));
    }

    #[test]
    fn test_dependent_on() {
        let c = crate::factory::Constraints::new();
        let rules = Rules::builder(DomainType::named("Booking"))
            .add(c.gt_property("end", "start").unwrap())
            .add(c.required("start").unwrap())
            .build();
        let dependent: Vec<_> = rules
            .dependent_on("start")
            .map(|compound| compound.property_name().as_str())
            .collect();
        assert_eq!(dependent, vec!["end", "start"]);
    }

    #[test]
    fn test_empty_rules_pass() {
        let rules = RulesBuilder::new(DomainType::named("Empty")).build();
        assert!(rules.is_empty());
        assert_eq!(rules.test(&Value::Null), Ok(true));
    }

    #[test]
    fn test_provider() {
        fn lookup<'a>(provider: &'a dyn PropertyConstraintProvider, name: &str) -> Option<&'a CompoundPropertyConstraint> {
            provider.property_constraint(name)
        }
        let rules = person_rules();
        assert!(lookup(&rules, "age").is_some());
        assert!(lookup(&rules, "email").is_none());
    }
}
