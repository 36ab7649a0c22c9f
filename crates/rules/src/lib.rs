//! # nebula-rules
//!
//! A declarative constraint engine: composable boolean predicates over
//! dynamic values, bound to properties of domain objects and collected into
//! ordered per-type rule sets.
//!
//! ## Quick Start
//!
//! ```
//! use nebula_rules::prelude::*;
//!
//! let c = Constraints::new();
//! let rules = Rules::builder(DomainType::named("Person"))
//!     .add(c.required("name")?)
//!     .add(c.in_range("age", 18, 65)?)
//!     .build();
//!
//! let person = Value::from_json(serde_json::json!({ "name": "", "age": 15 }));
//! assert_eq!(rules.test(&person), Ok(false));
//!
//! let violations = rules.violations(&person)?;
//! assert_eq!(violations.for_field("age").map(|v| v.code.as_ref()), Some("range"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Layers
//!
//! - [`value`]: the [`Value`](value::Value) model and the null-safe ordering
//! - [`foundation`]: [`Predicate`](foundation::Predicate), errors, violations
//! - [`combinators`]: And / Or / XOr / Not trees and adapters
//! - [`constraints`]: built-in leaves such as [`Range`](constraints::Range)
//!   and [`Like`](constraints::Like)
//! - [`property`]: constraints bound to property paths
//! - [`rules`]: per-type rule sets and their registry
//! - [`factory`]: the short-named [`Constraints`](factory::Constraints)
//!   builder
//!
//! ## Null policy
//!
//! `null` equals `null` and sorts above every other value. Pairs that cannot
//! be ordered fail every ordering comparison. See [`value::compare`].

pub mod combinators;
pub mod config;
pub mod constraints;
pub mod factory;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod property;
pub mod rules;
pub mod value;
