//! The `Constraints` factory.
//!
//! Short-named constructors for every constraint, bound to one
//! configuration and an optional custom comparator. Property constraints use
//! the short names (`required`, `gte`, `in_range`, ...); value constraints
//! that are not bound to a property use the long names (`greater_than`,
//! `range`, ...).
//!
//! Pass a `Constraints` to the code that builds rules, or install one
//! process-wide default with [`Constraints::install`] before the first
//! [`Constraints::global`] call.
//!
//! # Examples
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! let c = Constraints::new();
//! let rules = Rules::builder(DomainType::named("Order"))
//!     .add(c.required("number")?)
//!     .add(c.gt_property("shipped", "ordered")?)
//!     .add(c.conditional(c.eq("express", true)?, c.lte("days", 2)?))
//!     .build();
//!
//! let order = Value::from_json(serde_json::json!({
//!     "number": "A-17", "ordered": 3, "shipped": 5, "express": true, "days": 4,
//! }));
//! assert_eq!(rules.first_failure(&order).unwrap().map(PropertyName::as_str), Some("days"));
//! # Ok::<(), ConstraintError>(())
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::combinators::{
    ClosureResultConstraint, CompoundConstraint, Constraint, IfTrue, Junction,
    ParameterizedBinaryConstraint,
};
use crate::config::ConstraintsConfig;
use crate::constraints::{
    InGroup, Like, MethodInvokingConstraint, PredicateRegistry, Range, RegexpConstraint,
    RelationalOperator, Required, StringLengthConstraint,
};
use crate::foundation::{BinaryPredicate, ConstraintResult, FactoryError};
use crate::property::{
    CompoundPropertyConstraint, ConditionalPropertyConstraint, ParameterizedPropertyConstraint,
    PropertiesConstraint, PropertyConstraint, PropertyName, PropertyValueConstraint,
    UniquePropertyValueConstraint, UniquenessCheck,
};
use crate::value::{NullSafeComparator, Value, ValueComparator};

static GLOBAL: OnceLock<Constraints> = OnceLock::new();

/// Builds constraints under one configuration.
#[derive(Clone, Default)]
pub struct Constraints {
    config: ConstraintsConfig,
    comparator: Option<Arc<dyn ValueComparator>>,
    predicates: PredicateRegistry,
}

impl Constraints {
    /// Factory with the default configuration and natural ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidConfig`](crate::foundation::ConstraintError::InvalidConfig)
    /// if `config` fails validation.
    pub fn with_config(config: ConstraintsConfig) -> ConstraintResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Orders values with `comparator` in every comparison and range.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_comparator(mut self, comparator: impl ValueComparator + 'static) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Resolves [`method`](Self::method) names against `predicates`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_predicates(mut self, predicates: PredicateRegistry) -> Self {
        self.predicates = predicates;
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ConstraintsConfig {
        &self.config
    }

    /// The registry used by [`method`](Self::method).
    #[must_use]
    pub fn predicates(&self) -> &PredicateRegistry {
        &self.predicates
    }

    fn comparator(&self) -> NullSafeComparator {
        NullSafeComparator::from_option(self.comparator.clone())
    }

    // ========================================================================
    // DEFAULT INSTANCE
    // ========================================================================

    /// Installs the process-wide default.
    ///
    /// # Errors
    ///
    /// [`FactoryError::AlreadyInstalled`] if a default was installed before,
    /// or [`global`](Self::global) already handed one out.
    pub fn install(factory: Constraints) -> Result<(), FactoryError> {
        GLOBAL
            .set(factory)
            .map_err(|_| FactoryError::AlreadyInstalled)?;
        debug!("installed default constraints factory");
        Ok(())
    }

    /// The process-wide default. Falls back to [`Constraints::new`] if none
    /// was installed.
    #[must_use]
    pub fn global() -> &'static Constraints {
        GLOBAL.get_or_init(|| {
            debug!("using built-in default constraints factory");
            Constraints::new()
        })
    }

    // ========================================================================
    // VALUE CONSTRAINTS
    // ========================================================================

    /// All of `constraints` must hold.
    pub fn all_of<I, C>(&self, constraints: I) -> Constraint
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Constraint::all(constraints)
    }

    /// At least one of `constraints` must hold.
    pub fn any_of<I, C>(&self, constraints: I) -> Constraint
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Constraint::any(constraints)
    }

    /// Exactly one of `constraints` must hold.
    pub fn one_of<I, C>(&self, constraints: I) -> Constraint
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        Constraint::exactly_one(constraints)
    }

    /// An empty compound to fill in place.
    #[must_use]
    pub fn compound(&self, junction: Junction) -> CompoundConstraint {
        CompoundConstraint::new(junction)
    }

    /// Negation of `constraint`.
    pub fn negation(&self, constraint: impl Into<Constraint>) -> Constraint {
        Constraint::negate(constraint.into())
    }

    /// Binds `parameter` as the right-hand side of `predicate`.
    pub fn bind(
        &self,
        predicate: impl BinaryPredicate + 'static,
        parameter: impl Into<Value>,
    ) -> ParameterizedBinaryConstraint {
        ParameterizedBinaryConstraint::new(predicate, parameter)
    }

    /// Tests `constraint` against `mapping(value)`.
    pub fn test_result_of<F>(&self, mapping: F, constraint: impl Into<Constraint>) -> ClosureResultConstraint
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        ClosureResultConstraint::new(mapping, constraint)
    }

    /// `then` must hold whenever `condition` does.
    pub fn if_true(&self, condition: impl Into<Constraint>, then: impl Into<Constraint>) -> IfTrue {
        IfTrue::new(condition, then)
    }

    /// Equal to `value` under this factory's ordering.
    pub fn equal_to(&self, value: impl Into<Value>) -> ParameterizedBinaryConstraint {
        RelationalOperator::EqualTo.bind(self.comparator(), value)
    }

    /// Greater than `value`.
    pub fn greater_than(&self, value: impl Into<Value>) -> ParameterizedBinaryConstraint {
        RelationalOperator::GreaterThan.bind(self.comparator(), value)
    }

    /// Greater than or equal to `value`.
    pub fn greater_than_equal_to(&self, value: impl Into<Value>) -> ParameterizedBinaryConstraint {
        RelationalOperator::GreaterThanEqualTo.bind(self.comparator(), value)
    }

    /// Less than `value`.
    pub fn less_than(&self, value: impl Into<Value>) -> ParameterizedBinaryConstraint {
        RelationalOperator::LessThan.bind(self.comparator(), value)
    }

    /// Less than or equal to `value`.
    pub fn less_than_equal_to(&self, value: impl Into<Value>) -> ParameterizedBinaryConstraint {
        RelationalOperator::LessThanEqualTo.bind(self.comparator(), value)
    }

    /// Inclusive range under this factory's ordering.
    ///
    /// # Errors
    ///
    /// See [`Range::with_comparator`].
    pub fn range(&self, min: impl Into<Value>, max: impl Into<Value>) -> ConstraintResult<Range> {
        Range::with_comparator(min, max, true, self.comparator())
    }

    /// Exclusive range under this factory's ordering.
    ///
    /// # Errors
    ///
    /// See [`Range::with_comparator`].
    pub fn range_exclusive(
        &self,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> ConstraintResult<Range> {
        Range::with_comparator(min, max, false, self.comparator())
    }

    /// Like-pattern such as `"foo%"`, honoring the configured case policy.
    #[must_use]
    pub fn like_pattern(&self, encoded: &str) -> Like {
        Like::parse(encoded).case_insensitive(self.config.case_insensitive_like)
    }

    /// Full-match regular expression within the configured size limit.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidPattern`](crate::foundation::ConstraintError::InvalidPattern)
    /// if the pattern does not compile.
    pub fn pattern(&self, pattern: impl Into<String>) -> ConstraintResult<RegexpConstraint> {
        RegexpConstraint::with_size_limit(pattern, self.config.regex_size_limit)
    }

    /// Character count compared to `length` with `operator`.
    #[must_use]
    pub fn string_length(&self, operator: RelationalOperator, length: usize) -> StringLengthConstraint {
        StringLengthConstraint::new(operator, length)
    }

    /// One of `members`.
    pub fn group<I, V>(&self, members: I) -> InGroup
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        InGroup::new(members)
    }

    /// The predicate registered under `name`.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::PredicateNotFound`](crate::foundation::ConstraintError::PredicateNotFound)
    /// if nothing is registered under `name`.
    pub fn named_predicate(&self, name: &str) -> ConstraintResult<MethodInvokingConstraint> {
        MethodInvokingConstraint::new(&self.predicates, name)
    }

    // ========================================================================
    // PROPERTY CONSTRAINTS
    // ========================================================================

    /// Binds any value constraint to `property`.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::EmptyPropertyName`](crate::foundation::ConstraintError::EmptyPropertyName)
    /// for an invalid property path. Every property method below fails the
    /// same way.
    pub fn value(
        &self,
        property: &str,
        constraint: impl Into<Constraint>,
    ) -> ConstraintResult<PropertyConstraint> {
        Ok(PropertyValueConstraint::new(PropertyName::new(property)?, constraint).into())
    }

    /// `property` is non-null and non-blank. Tag `"required"`.
    pub fn required(&self, property: &str) -> ConstraintResult<PropertyConstraint> {
        self.value(property, Required::REQUIRED)
    }

    /// Same test as [`required`](Self::required), tag `"present"`.
    pub fn present(&self, property: &str) -> ConstraintResult<PropertyConstraint> {
        self.value(property, Required::PRESENT)
    }

    fn compare(
        &self,
        operator: RelationalOperator,
        property: &str,
        value: impl Into<Value>,
    ) -> ConstraintResult<PropertyConstraint> {
        let bound = operator.bind(self.comparator(), value);
        Ok(ParameterizedPropertyConstraint::new(PropertyName::new(property)?, bound).into())
    }

    /// `property == value`.
    pub fn eq(&self, property: &str, value: impl Into<Value>) -> ConstraintResult<PropertyConstraint> {
        self.compare(RelationalOperator::EqualTo, property, value)
    }

    /// `property > value`.
    pub fn gt(&self, property: &str, value: impl Into<Value>) -> ConstraintResult<PropertyConstraint> {
        self.compare(RelationalOperator::GreaterThan, property, value)
    }

    /// `property >= value`.
    pub fn gte(&self, property: &str, value: impl Into<Value>) -> ConstraintResult<PropertyConstraint> {
        self.compare(RelationalOperator::GreaterThanEqualTo, property, value)
    }

    /// `property < value`.
    pub fn lt(&self, property: &str, value: impl Into<Value>) -> ConstraintResult<PropertyConstraint> {
        self.compare(RelationalOperator::LessThan, property, value)
    }

    /// `property <= value`.
    pub fn lte(&self, property: &str, value: impl Into<Value>) -> ConstraintResult<PropertyConstraint> {
        self.compare(RelationalOperator::LessThanEqualTo, property, value)
    }

    fn compare_properties(
        &self,
        operator: RelationalOperator,
        property: &str,
        other: &str,
    ) -> ConstraintResult<PropertyConstraint> {
        Ok(PropertiesConstraint::from_arc(
            PropertyName::new(property)?,
            operator.predicate(self.comparator()),
            PropertyName::new(other)?,
        )
        .into())
    }

    /// `property == other`.
    pub fn eq_property(&self, property: &str, other: &str) -> ConstraintResult<PropertyConstraint> {
        self.compare_properties(RelationalOperator::EqualTo, property, other)
    }

    /// `property > other`.
    pub fn gt_property(&self, property: &str, other: &str) -> ConstraintResult<PropertyConstraint> {
        self.compare_properties(RelationalOperator::GreaterThan, property, other)
    }

    /// `property >= other`.
    pub fn gte_property(&self, property: &str, other: &str) -> ConstraintResult<PropertyConstraint> {
        self.compare_properties(RelationalOperator::GreaterThanEqualTo, property, other)
    }

    /// `property < other`.
    pub fn lt_property(&self, property: &str, other: &str) -> ConstraintResult<PropertyConstraint> {
        self.compare_properties(RelationalOperator::LessThan, property, other)
    }

    /// `property <= other`.
    pub fn lte_property(&self, property: &str, other: &str) -> ConstraintResult<PropertyConstraint> {
        self.compare_properties(RelationalOperator::LessThanEqualTo, property, other)
    }

    /// `min <= property <= max`. Tag `"range"`.
    ///
    /// # Errors
    ///
    /// Also fails with the errors of [`Range::with_comparator`].
    pub fn in_range(
        &self,
        property: &str,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> ConstraintResult<PropertyConstraint> {
        self.value(property, self.range(min, max)?)
    }

    /// `min < property < max`. Tag `"range"`.
    ///
    /// # Errors
    ///
    /// Also fails with the errors of [`Range::with_comparator`].
    pub fn in_range_exclusive(
        &self,
        property: &str,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> ConstraintResult<PropertyConstraint> {
        self.value(property, self.range_exclusive(min, max)?)
    }

    /// `min_property <= property <= max_property`, filed under `property`.
    pub fn in_range_properties(
        &self,
        property: &str,
        min_property: &str,
        max_property: &str,
    ) -> ConstraintResult<PropertyConstraint> {
        Ok(self
            .gte_property(property, min_property)?
            .and(self.lte_property(property, max_property)?))
    }

    /// At most `length` characters. Tag `"maxLength"`.
    pub fn max_length(&self, property: &str, length: usize) -> ConstraintResult<PropertyConstraint> {
        self.value(property, StringLengthConstraint::max(length))
    }

    /// At least `length` characters. Tag `"minLength"`.
    pub fn min_length(&self, property: &str, length: usize) -> ConstraintResult<PropertyConstraint> {
        self.value(property, StringLengthConstraint::min(length))
    }

    /// Between `min` and `max` characters. Tag `"stringLengthRange"`.
    pub fn length_between(
        &self,
        property: &str,
        min: usize,
        max: usize,
    ) -> ConstraintResult<PropertyConstraint> {
        self.value(property, StringLengthConstraint::range(min, max)?)
    }

    /// Text matches the like-pattern `encoded`. Tag `"like"`.
    pub fn like(&self, property: &str, encoded: &str) -> ConstraintResult<PropertyConstraint> {
        self.value(property, self.like_pattern(encoded))
    }

    /// Text fully matches `pattern`. Tag `"regexp"`.
    ///
    /// # Errors
    ///
    /// Also fails if the pattern does not compile.
    pub fn regexp(
        &self,
        property: &str,
        pattern: impl Into<String>,
    ) -> ConstraintResult<PropertyConstraint> {
        self.value(property, self.pattern(pattern)?)
    }

    /// Value is one of `members`. Tag `"inGroup"`.
    pub fn in_group<I, V>(&self, property: &str, members: I) -> ConstraintResult<PropertyConstraint>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.value(property, InGroup::new(members))
    }

    /// The registered predicate `name` accepts the value. Tagged with `name`.
    ///
    /// # Errors
    ///
    /// Also fails if `name` is not registered.
    pub fn method(&self, property: &str, name: &str) -> ConstraintResult<PropertyConstraint> {
        self.value(property, self.named_predicate(name)?)
    }

    /// Value is unique according to `check`. Tag `"unique"`.
    pub fn unique(
        &self,
        property: &str,
        check: impl UniquenessCheck + 'static,
    ) -> ConstraintResult<PropertyConstraint> {
        Ok(UniquePropertyValueConstraint::new(PropertyName::new(property)?, check).into())
    }

    /// Negation of a property constraint.
    #[must_use]
    pub fn not(&self, constraint: impl Into<PropertyConstraint>) -> PropertyConstraint {
        PropertyConstraint::negate(constraint.into())
    }

    /// Both must hold.
    #[must_use]
    pub fn and(
        &self,
        left: impl Into<PropertyConstraint>,
        right: impl Into<PropertyConstraint>,
    ) -> PropertyConstraint {
        PropertyConstraint::and(left.into(), right)
    }

    /// At least one must hold.
    #[must_use]
    pub fn or(
        &self,
        left: impl Into<PropertyConstraint>,
        right: impl Into<PropertyConstraint>,
    ) -> PropertyConstraint {
        PropertyConstraint::or(left.into(), right)
    }

    /// Exactly one must hold. Filed under the property of `left`.
    #[must_use]
    pub fn xor(
        &self,
        left: impl Into<PropertyConstraint>,
        right: impl Into<PropertyConstraint>,
    ) -> PropertyConstraint {
        let mut compound = CompoundPropertyConstraint::starting_with(Junction::XOr, left);
        compound.add(right);
        compound.into()
    }

    /// `then` must hold whenever `condition` does. Tag `"ifTrue"`.
    #[must_use]
    pub fn conditional(
        &self,
        condition: impl Into<PropertyConstraint>,
        then: impl Into<PropertyConstraint>,
    ) -> PropertyConstraint {
        ConditionalPropertyConstraint::new(condition, then).into()
    }

    /// `then` when `condition` holds, `otherwise` when it does not.
    #[must_use]
    pub fn conditional_else(
        &self,
        condition: impl Into<PropertyConstraint>,
        then: impl Into<PropertyConstraint>,
        otherwise: impl Into<PropertyConstraint>,
    ) -> PropertyConstraint {
        ConditionalPropertyConstraint::new(condition, then)
            .otherwise(otherwise)
            .into()
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints")
            .field("config", &self.config)
            .field("custom_comparator", &self.comparator.is_some())
            .field("predicates", &self.predicates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ConstraintError, Predicate};
    use crate::property::ExistingValues;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cmp::Ordering;

    fn bean(json: serde_json::Value) -> Value {
        Value::from_json(json)
    }

    #[test]
    fn test_property_comparisons() {
        let c = Constraints::new();
        let person = bean(json!({ "age": 30 }));
        assert_eq!(c.eq("age", 30).unwrap().test(&person), Ok(true));
        assert_eq!(c.gt("age", 30).unwrap().test(&person), Ok(false));
        assert_eq!(c.gte("age", 30).unwrap().test(&person), Ok(true));
        assert_eq!(c.lt("age", 31).unwrap().test(&person), Ok(true));
        assert_eq!(c.lte("age", 29).unwrap().test(&person), Ok(false));
        assert_eq!(c.gte("age", 30).unwrap().type_tag(), Some("greaterThanEqualTo"));
    }

    #[test]
    fn test_empty_property_name_is_rejected() {
        let c = Constraints::new();
        assert_eq!(
            c.required("").unwrap_err(),
            ConstraintError::EmptyPropertyName(String::new())
        );
        assert!(c.gt_property("end", "a..b").is_err());
    }

    #[test]
    fn test_range_between_properties() {
        let c = Constraints::new();
        let window = c.in_range_properties("value", "low", "high").unwrap();
        assert_eq!(window.property_name(), "value");
        assert_eq!(window.test(&bean(json!({ "low": 1, "high": 9, "value": 9 }))), Ok(true));
        assert_eq!(window.test(&bean(json!({ "low": 1, "high": 9, "value": 10 }))), Ok(false));
    }

    #[test]
    fn test_custom_comparator_applies_to_ranges_and_comparisons() {
        // Orders text by length.
        let by_length = |a: &Value, b: &Value| {
            let len = |v: &Value| v.as_str().map_or(0, str::len);
            len(a).cmp(&len(b))
        };
        let c = Constraints::new().with_comparator(by_length);
        let range = c.range("aa", "aaaa").unwrap();
        assert!(range.test(&Value::from("zzz")));
        assert!(!range.test(&Value::from("z")));
        assert!(c.greater_than("ab").test(&Value::from("xyz")));
        assert_eq!(by_length(&Value::from("a"), &Value::from("b")), Ordering::Equal);
    }

    #[test]
    fn test_config_is_applied() {
        let config = ConstraintsConfig {
            case_insensitive_like: true,
            regex_size_limit: 64,
        };
        let c = Constraints::with_config(config).unwrap();
        assert!(c.like_pattern("abc%").test(&Value::from("ABCdef")));
        assert!(matches!(
            c.pattern("a{1000}"),
            Err(ConstraintError::InvalidPattern { .. })
        ));

        let zero = ConstraintsConfig {
            regex_size_limit: 0,
            ..ConstraintsConfig::default()
        };
        assert!(Constraints::with_config(zero).is_err());
    }

    #[test]
    fn test_method_resolution() {
        let mut predicates = PredicateRegistry::new();
        predicates.register("isEven", |v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0));
        let c = Constraints::new().with_predicates(predicates);

        let even = c.method("count", "isEven").unwrap();
        assert_eq!(even.type_tag(), Some("isEven"));
        assert_eq!(even.test(&bean(json!({ "count": 4 }))), Ok(true));
        assert_eq!(
            c.method("count", "isOdd").unwrap_err(),
            ConstraintError::PredicateNotFound("isOdd".to_owned())
        );
    }

    #[test]
    fn test_logical_property_constraints() {
        let c = Constraints::new();
        let doc = bean(json!({ "email": "a@b", "phone": "" }));

        let contact = c.or(c.required("email").unwrap(), c.required("phone").unwrap());
        assert_eq!(contact.test(&doc), Ok(true));

        let exactly_one = c.xor(c.required("email").unwrap(), c.required("phone").unwrap());
        assert_eq!(exactly_one.test(&doc), Ok(true));

        let no_phone = c.not(c.required("phone").unwrap());
        assert_eq!(no_phone.test(&doc), Ok(true));
        assert_eq!(c.and(contact, no_phone).test(&doc), Ok(true));
    }

    #[test]
    fn test_conditional_else() {
        let c = Constraints::new();
        let rule = c.conditional_else(
            c.eq("kind", "company").unwrap(),
            c.required("vat").unwrap(),
            c.required("birthday").unwrap(),
        );
        assert_eq!(rule.property_name(), "vat");
        assert_eq!(rule.test(&bean(json!({ "kind": "person", "vat": "", "birthday": "1990" }))), Ok(true));
        assert_eq!(rule.test(&bean(json!({ "kind": "company", "vat": "", "birthday": "" }))), Ok(false));
    }

    #[test]
    fn test_unique_and_group() {
        let c = Constraints::new();
        let login = c.unique("login", ExistingValues::new(["root"])).unwrap();
        assert_eq!(login.test(&bean(json!({ "login": "root" }))), Ok(false));

        let status = c.in_group("status", ["open", "closed"]).unwrap();
        assert_eq!(status.test(&bean(json!({ "status": "open" }))), Ok(true));
        assert_eq!(status.type_tag(), Some("inGroup"));
    }

    #[test]
    fn test_value_level_helpers() {
        let c = Constraints::new();
        let word = c.all_of([
            Constraint::from(c.like_pattern("a%")),
            Constraint::from(c.string_length(RelationalOperator::LessThan, 4)),
        ]);
        assert!(word.test(&Value::from("abc")));
        assert!(!word.test(&Value::from("abcd")));

        let either = c.any_of([c.equal_to(1), c.equal_to(2)]);
        assert!(either.test(&Value::from(2)));
        assert!(c.negation(either).test(&Value::from(3)));

        let small = c.if_true(c.less_than(10), c.group([1, 2, 3]));
        assert!(small.test(&Value::from(2)));
        assert!(!small.test(&Value::from(5)));
        assert!(small.test(&Value::from(50)));
    }

    #[test]
    fn test_default_instance_is_write_once() {
        let _ = Constraints::install(Constraints::new());
        assert_eq!(
            Constraints::install(Constraints::new()),
            Err(FactoryError::AlreadyInstalled)
        );
        assert_eq!(Constraints::global().config(), &ConstraintsConfig::default());
    }
}
