//! Built-in leaf constraints.
//!
//! | Constraint | Tag | Passes when |
//! |---|---|---|
//! | [`EqualTo`] .. [`LessThanEqualTo`] | `equalTo`, `greaterThan`, ... | the pair compares as named |
//! | [`Required`] | `required` / `present` | the value is non-null and non-blank |
//! | [`Range`] | `range` | the value lies between two bounds |
//! | [`Like`] | `like` | the text starts with, ends with or contains a literal |
//! | [`RegexpConstraint`] | `regexp` | the whole text matches a pattern |
//! | [`StringLengthConstraint`] | `maxLength`, `minLength`, ... | the character count is in bounds |
//! | [`InGroup`] | `inGroup` | the value is one of a fixed set |
//! | [`MethodInvokingConstraint`] | registered name | a registered predicate accepts it |

pub mod comparison;
pub mod group;
pub mod length;
pub mod like;
pub mod method;
pub mod range;
pub mod regexp;
pub mod required;

pub use comparison::{
    EqualTo, GreaterThan, GreaterThanEqualTo, LessThan, LessThanEqualTo, RelationalOperator,
    equal_to, greater_than, greater_than_equal_to, less_than, less_than_equal_to,
};
pub use group::InGroup;
pub use length::{StringLengthConstraint, char_length};
pub use like::{Like, LikeType};
pub use method::{MethodInvokingConstraint, NamedPredicate, PredicateRegistry};
pub use range::Range;
pub use regexp::RegexpConstraint;
pub use required::Required;
