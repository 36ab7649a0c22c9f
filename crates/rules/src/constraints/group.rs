//! Set membership.

use crate::foundation::Predicate;
use crate::value::Value;

/// Passes when the value equals one of the group's members.
///
/// Membership uses structural equality, so `Int(1)` is not a member of a
/// group holding `Float(1.0)`. `null` is a member only if the group holds
/// `null`.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let colour = InGroup::new(["red", "green", "blue"]);
/// assert!(colour.test(&Value::from("red")));
/// assert!(!colour.test(&Value::from("pink")));
/// assert!(!colour.test(&Value::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InGroup {
    members: Vec<Value>,
}

impl InGroup {
    /// Type tag reported by [`InGroup`].
    pub const TYPE_TAG: &'static str = "inGroup";

    /// Group of the given members. Duplicates are dropped, first one wins.
    pub fn new<I, V>(members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for member in members {
            let member = member.into();
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self { members: unique }
    }

    /// Whether `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains(value)
    }

    /// Members in first-seen order.
    #[must_use]
    pub fn members(&self) -> &[Value] {
        &self.members
    }

    /// Number of distinct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<V: Into<Value>> FromIterator<V> for InGroup {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Predicate for InGroup {
    fn test(&self, value: &Value) -> bool {
        self.contains(value)
    }

    fn type_tag(&self) -> Option<&str> {
        Some(Self::TYPE_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_order() {
        let group = InGroup::new([3, 1, 3, 2, 1]);
        assert_eq!(group.members(), &[Value::from(3), Value::from(1), Value::from(2)]);
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_null_membership() {
        assert!(!InGroup::new([1, 2]).test(&Value::Null));
        let with_null: InGroup = [Value::Null, Value::from(1)].into_iter().collect();
        assert!(with_null.test(&Value::Null));
    }

    #[test]
    fn test_structural_membership() {
        let group = InGroup::new([Value::from(vec![1, 2]), Value::from(1.0)]);
        assert!(group.test(&Value::from(vec![1, 2])));
        assert!(!group.test(&Value::from(1)));
    }

    #[test]
    fn test_empty_group() {
        let group = InGroup::default();
        assert!(group.is_empty());
        assert!(!group.test(&Value::from("x")));
    }
}
