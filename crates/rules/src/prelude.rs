//! Prelude module for convenient imports.
//!
//! A single `use nebula_rules::prelude::*;` brings in the value model, the
//! constraint tree, every built-in constraint, the property layer, rules and
//! the factory.
//!
//! # Examples
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! let c = Constraints::new();
//! let name = c.required("name")?.and(c.max_length("name", 10)?);
//! let person = Value::from_json(serde_json::json!({ "name": "Ada" }));
//! assert_eq!(name.test(&person), Ok(true));
//! # Ok::<(), ConstraintError>(())
//! ```

// ============================================================================
// FOUNDATION: Traits, errors, reports
// ============================================================================

pub use crate::foundation::{
    BinaryPredicate, ConstraintError, ConstraintExt, ConstraintResult, DEFAULT_CODE,
    EvaluationResult, FactoryError, Predicate, PropertyAccessError, Violation, Violations,
};

// ============================================================================
// VALUES
// ============================================================================

pub use crate::value::{NaturalOrder, NullSafeComparator, Value, ValueComparator, ValueKind, ValueMap};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{
    ClosureResultConstraint, CompoundConstraint, Constraint, ConstraintKind, IfTrue, Junction,
    ParameterizedBinaryConstraint, not,
};

// ============================================================================
// CONSTRAINTS: Built-in leaves
// ============================================================================

pub use crate::constraints::{
    EqualTo, GreaterThan, GreaterThanEqualTo, InGroup, LessThan, LessThanEqualTo, Like, LikeType,
    MethodInvokingConstraint, PredicateRegistry, Range, RegexpConstraint, RelationalOperator,
    Required, StringLengthConstraint,
};

// ============================================================================
// PROPERTIES
// ============================================================================

pub use crate::property::{
    CompoundPropertyConstraint, ConditionalPropertyConstraint, ExistingValues,
    NegatedPropertyConstraint, ParameterizedPropertyConstraint, PropertiesConstraint,
    PropertyAccessor, PropertyConstraint, PropertyName, PropertyValueConstraint,
    UniquePropertyValueConstraint, UniquenessCheck,
};

// ============================================================================
// RULES, FACTORY, CONFIG
// ============================================================================

pub use crate::config::ConstraintsConfig;
pub use crate::factory::Constraints;
pub use crate::rules::{
    DomainType, PropertyConstraintProvider, Rules, RulesBuilder, RulesRegistry, RulesSource,
};
