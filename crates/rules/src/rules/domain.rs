//! Identity of the domain types rules are registered for.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A named domain type with an optional declared supertype.
///
/// Equality and hashing use the name only.
///
/// # Examples
///
/// ```
/// use nebula_rules::rules::DomainType;
///
/// let party = DomainType::named("Party");
/// let person = DomainType::named("Person").extending(party.clone());
///
/// assert!(party.supports(&person));
/// assert!(!person.supports(&party));
/// ```
#[derive(Debug, Clone)]
pub struct DomainType {
    name: Arc<str>,
    parent: Option<Arc<DomainType>>,
}

impl DomainType {
    /// The Rust type `T`, named by [`std::any::type_name`].
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    /// A type known only by name, e.g. for JSON documents.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Declares `parent` as the supertype.
    #[must_use = "builder methods must be chained or built"]
    pub fn extending(mut self, parent: DomainType) -> Self {
        self.parent = Some(Arc::new(parent));
        self
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared supertype.
    #[must_use]
    pub fn parent(&self) -> Option<&DomainType> {
        self.parent.as_deref()
    }

    /// This type followed by its supertypes, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = &DomainType> {
        std::iter::successors(Some(self), |ty| ty.parent())
    }

    /// Whether rules for this type apply to `other`: `other` is this type or
    /// declares it as an ancestor.
    #[must_use]
    pub fn supports(&self, other: &DomainType) -> bool {
        other.lineage().any(|ty| ty == self)
    }
}

impl PartialEq for DomainType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DomainType {}

impl Hash for DomainType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person;

    #[test]
    fn test_of_uses_type_name() {
        assert!(DomainType::of::<Person>().name().ends_with("Person"));
        assert_eq!(DomainType::of::<Person>(), DomainType::of::<Person>());
    }

    #[test]
    fn test_lineage() {
        let person = DomainType::named("Person")
            .extending(DomainType::named("Party").extending(DomainType::named("Entity")));
        let names: Vec<_> = person.lineage().map(DomainType::name).collect();
        assert_eq!(names, vec!["Person", "Party", "Entity"]);
    }

    #[test]
    fn test_supports() {
        let entity = DomainType::named("Entity");
        let person = DomainType::named("Person").extending(entity.clone());
        assert!(person.supports(&person));
        assert!(entity.supports(&person));
        assert!(!person.supports(&entity));
        assert!(!DomainType::named("Order").supports(&person));
    }
}
