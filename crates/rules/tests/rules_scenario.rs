//! End-to-end scenarios: rules built through the factory, evaluated against
//! JSON documents and edited in place.

use nebula_rules::prelude::*;
use nebula_rules::property::write_path;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn person_rules() -> Rules {
    let c = Constraints::new();
    Rules::builder(DomainType::named("Person"))
        .add(c.required("name").unwrap())
        .add(c.in_range("age", 18, 65).unwrap())
        .build()
}

// ============================================================================
// WHOLE-OBJECT EVALUATION
// ============================================================================

#[rstest]
fn test_edit_cycle(person_rules: Rules) {
    let mut person = Value::from_json(json!({ "name": "", "age": 15 }));
    let age = person_rules.property_constraint("age").unwrap();

    assert_eq!(person_rules.test(&person), Ok(false));
    assert_eq!(age.test(&person), Ok(false));

    write_path(&mut person, &PropertyName::new("age").unwrap(), 30).unwrap();
    assert_eq!(age.test(&person), Ok(true));
    assert_eq!(person_rules.test(&person), Ok(false));
    assert_eq!(
        person_rules.first_failure(&person).unwrap().map(PropertyName::as_str),
        Some("name")
    );

    write_path(&mut person, &PropertyName::new("name").unwrap(), "Ada").unwrap();
    assert_eq!(person_rules.test(&person), Ok(true));
    assert!(person_rules.violations(&person).unwrap().is_empty());
}

#[rstest]
fn test_violations_follow_declaration_order(person_rules: Rules) {
    let person = Value::from_json(json!({ "name": " ", "age": 70 }));
    let violations = person_rules.violations(&person).unwrap();
    let report: Vec<_> = violations
        .iter()
        .map(|v| format!("{}:{}", v.field, v.code))
        .collect();
    assert_eq!(report, vec!["name:required", "age:range"]);
}

#[rstest]
fn test_missing_property_is_an_error(person_rules: Rules) {
    let person = Value::from_json(json!({ "name": "Ada" }));
    assert!(matches!(
        person_rules.test(&person),
        Err(PropertyAccessError::NotFound { .. })
    ));
}

#[rstest]
fn test_serde_json_document_is_a_bean(person_rules: Rules) {
    let person = json!({ "name": "Grace", "age": 45 });
    assert_eq!(person_rules.test(&person), Ok(true));
}

#[test]
fn test_ordering_and_merge() {
    let c = Constraints::new();
    let rules = Rules::builder(DomainType::named("Person"))
        .add(c.required("name").unwrap())
        .add(c.gte("age", 0).unwrap())
        .add(c.max_length("name", 10).unwrap())
        .build();

    let names: Vec<_> = rules.property_names().map(PropertyName::as_str).collect();
    assert_eq!(names, vec!["name", "age"]);

    let name = rules.property_constraint("name").unwrap();
    assert_eq!(name.len(), 2);
    assert_eq!(name.junction(), Junction::And);

    let too_long = Value::from_json(json!({ "name": "Maximilian Alexander", "age": 3 }));
    let blank = Value::from_json(json!({ "name": "", "age": 3 }));
    assert_eq!(name.test(&too_long), Ok(false));
    assert_eq!(name.test(&blank), Ok(false));
    assert_eq!(
        rules.violations(&too_long).unwrap().first().map(|v| v.code.to_string()),
        Some("maxLength".to_owned())
    );
}

#[test]
fn test_nested_paths() {
    let c = Constraints::new();
    let rules = Rules::builder(DomainType::named("Customer"))
        .add(c.required("address.city").unwrap())
        .add(c.like("address.zip", "9%").unwrap())
        .build();

    let customer = Value::from_json(json!({ "address": { "city": "Oslo", "zip": "9010" } }));
    assert_eq!(rules.test(&customer), Ok(true));

    let no_address = Value::from_json(json!({ "address": null }));
    assert_eq!(rules.test(&no_address), Ok(false));

    let scalar_address = Value::from_json(json!({ "address": "Oslo" }));
    assert!(matches!(
        rules.test(&scalar_address),
        Err(PropertyAccessError::NotNavigable { .. })
    ));
}

// ============================================================================
// LEAF SEMANTICS
// ============================================================================

#[rstest]
#[case::inclusive_low(true, 5, true)]
#[case::inclusive_mid(true, 7, true)]
#[case::inclusive_high(true, 10, true)]
#[case::inclusive_below(true, 4, false)]
#[case::exclusive_low(false, 5, false)]
#[case::exclusive_mid(false, 7, true)]
#[case::exclusive_high(false, 10, false)]
fn test_range_inclusivity(#[case] inclusive: bool, #[case] value: i64, #[case] expected: bool) {
    let range = Range::new(5, 10, inclusive).unwrap();
    assert_eq!(range.test(&Value::from(value)), expected);
}

#[rstest]
#[case::contains("%foo%", LikeType::Contains, "xfoox", true)]
#[case::starts_with("foo%", LikeType::StartsWith, "foobar", true)]
#[case::starts_with_miss("foo%", LikeType::StartsWith, "barfoo", false)]
#[case::ends_with("%foo", LikeType::EndsWith, "barfoo", true)]
#[case::no_marker("foo", LikeType::Contains, "afoob", true)]
fn test_like(
    #[case] encoded: &str,
    #[case] like_type: LikeType,
    #[case] input: &str,
    #[case] expected: bool,
) {
    let like = Like::parse(encoded);
    assert_eq!(like.like_type(), like_type);
    assert_eq!(like.test(&Value::from(input)), expected);
}

#[rstest]
#[case::both_null(Value::Null, Value::Null, RelationalOperator::EqualTo, true)]
#[case::null_greater(Value::Null, Value::from(5), RelationalOperator::GreaterThan, true)]
#[case::null_not_less(Value::Null, Value::from(5), RelationalOperator::LessThan, false)]
#[case::int_float(Value::from(2), Value::from(1.5), RelationalOperator::GreaterThan, true)]
#[case::text_vs_int(Value::from("5"), Value::from(5), RelationalOperator::GreaterThanEqualTo, false)]
fn test_null_safe_comparisons(
    #[case] left: Value,
    #[case] right: Value,
    #[case] operator: RelationalOperator,
    #[case] expected: bool,
) {
    let predicate = operator.predicate(NullSafeComparator::natural());
    assert_eq!(predicate.test(&left, &right), expected);
}

#[rstest]
#[case::min_above_max(Range::inclusive(10, 5).unwrap_err())]
#[case::exclusive_equal(Range::exclusive(5, 5).unwrap_err())]
#[case::kinds(Range::inclusive("a", 5).unwrap_err())]
fn test_malformed_ranges_are_rejected(#[case] error: ConstraintError) {
    assert!(matches!(
        error,
        ConstraintError::InvalidRange { .. } | ConstraintError::RangeTypeMismatch { .. }
    ));
}

// ============================================================================
// REGISTRY
// ============================================================================

#[test]
fn test_registry_serves_property_constraints() {
    let registry = RulesRegistry::new();
    registry.register_lazy(DomainType::named("Person"), None, || {
        let c = Constraints::new();
        Rules::builder(DomainType::named("Person"))
            .add(c.required("name").unwrap())
            .build()
    });

    let source: &dyn RulesSource = &registry;
    let employee = DomainType::named("Employee").extending(DomainType::named("Person"));
    let name = source
        .property_constraint(&employee, "name", Some("hire"))
        .unwrap();
    assert_eq!(name.test(&Value::from_json(json!({ "name": "" }))), Ok(false));
    assert!(source.property_constraint(&employee, "salary", None).is_none());
}
