//! Lookup of [`Rules`] by domain type and context.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{DomainType, Rules};
use crate::property::CompoundPropertyConstraint;

/// Hands out the rules of a domain type.
///
/// A `context_id` selects an alternative rule set for the same type, e.g.
/// `"draft"` versus `"publish"`.
pub trait RulesSource: Send + Sync {
    /// Rules for `domain_type` under `context_id`, if any apply.
    fn rules(&self, domain_type: &DomainType, context_id: Option<&str>) -> Option<Arc<Rules>>;

    /// The compound constraint of one property.
    fn property_constraint(
        &self,
        domain_type: &DomainType,
        property_name: &str,
        context_id: Option<&str>,
    ) -> Option<CompoundPropertyConstraint> {
        self.rules(domain_type, context_id)?
            .property_constraint(property_name)
            .cloned()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

type Init = Box<dyn Fn() -> Rules + Send + Sync>;
type Key = (DomainType, Option<String>);

struct Slot {
    rules: OnceLock<Arc<Rules>>,
    init: Option<Init>,
}

impl Slot {
    fn ready(rules: Rules) -> Self {
        Self {
            rules: OnceLock::from(Arc::new(rules)),
            init: None,
        }
    }

    fn lazy(init: Init) -> Self {
        Self {
            rules: OnceLock::new(),
            init: Some(init),
        }
    }

    fn resolve(&self, key: &Key) -> Option<Arc<Rules>> {
        if let Some(rules) = self.rules.get() {
            return Some(Arc::clone(rules));
        }
        let init = self.init.as_ref()?;
        let rules = self.rules.get_or_init(|| {
            let rules = init();
            if rules.domain_type() != &key.0 {
                warn!(
                    registered = %key.0,
                    built = %rules.domain_type(),
                    "lazy rules built for a different domain type"
                );
            }
            debug!(domain_type = %key.0, context = ?key.1, "initialized lazy rules");
            Arc::new(rules)
        });
        Some(Arc::clone(rules))
    }
}

/// Thread-safe [`RulesSource`] backed by an ordered map.
///
/// Lookup walks the domain type's lineage, nearest first. For each type it
/// tries the requested context, then the context-free entry.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// let party = DomainType::named("Party");
/// let person = DomainType::named("Person").extending(party.clone());
///
/// let registry = RulesRegistry::new();
/// registry.register_lazy(party.clone(), None, || {
///     let c = Constraints::global();
///     Rules::builder(DomainType::named("Party"))
///         .add(c.required("name").expect("valid property name"))
///         .build()
/// });
///
/// let rules = registry.rules(&person, Some("draft")).expect("inherited from Party");
/// assert_eq!(rules.domain_type(), &party);
/// assert!(registry.property_constraint(&person, "name", None).is_some());
/// ```
pub struct RulesRegistry {
    slots: RwLock<IndexMap<Key, Arc<Slot>>>,
}

impl RulesRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(IndexMap::new()),
        }
    }

    /// Registers sealed rules under their own domain type.
    ///
    /// Replaces any entry with the same type and context.
    pub fn register(&self, rules: Rules, context_id: Option<&str>) {
        let key = (rules.domain_type().clone(), context_id.map(str::to_owned));
        debug!(
            domain_type = %key.0,
            context = ?key.1,
            properties = rules.len(),
            "registered rules"
        );
        self.slots.write().insert(key, Arc::new(Slot::ready(rules)));
    }

    /// Registers rules built on first lookup.
    ///
    /// `init` runs at most once, even when several threads ask for the rules
    /// at the same time. The registry lock is not held while it runs, so
    /// `init` may look up other entries of this registry.
    ///
    /// # Panics
    ///
    /// `init` must not look up its own entry: re-entering the same
    /// initialisation may deadlock or panic.
    pub fn register_lazy<F>(&self, domain_type: DomainType, context_id: Option<&str>, init: F)
    where
        F: Fn() -> Rules + Send + Sync + 'static,
    {
        let key = (domain_type, context_id.map(str::to_owned));
        debug!(domain_type = %key.0, context = ?key.1, "registered lazy rules");
        self.slots
            .write()
            .insert(key, Arc::new(Slot::lazy(Box::new(init))));
    }

    /// Removes an entry, returning whether one existed.
    pub fn unregister(&self, domain_type: &DomainType, context_id: Option<&str>) -> bool {
        let key = (domain_type.clone(), context_id.map(str::to_owned));
        self.slots.write().shift_remove(&key).is_some()
    }

    /// Registered domain types in registration order, without duplicates.
    #[must_use]
    pub fn domain_types(&self) -> Vec<DomainType> {
        let slots = self.slots.read();
        let mut types: Vec<DomainType> = Vec::with_capacity(slots.len());
        for (domain_type, _) in slots.keys() {
            if !types.contains(domain_type) {
                types.push(domain_type.clone());
            }
        }
        types
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    fn slot(&self, domain_type: &DomainType, context_id: Option<&str>) -> Option<(Key, Arc<Slot>)> {
        let slots = self.slots.read();
        let find = |context: Option<&str>| {
            let key = (domain_type.clone(), context.map(str::to_owned));
            slots.get(&key).map(|slot| (key, Arc::clone(slot)))
        };
        find(context_id).or_else(|| context_id.and_then(|_| find(None)))
    }
}

impl RulesSource for RulesRegistry {
    fn rules(&self, domain_type: &DomainType, context_id: Option<&str>) -> Option<Arc<Rules>> {
        domain_type.lineage().find_map(|ty| {
            // Clone the slot out so lazy init runs without the map lock.
            let (key, slot) = self.slot(ty, context_id)?;
            slot.resolve(&key)
        })
    }
}

impl Default for RulesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RulesRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read();
        f.debug_struct("RulesRegistry")
            .field("entries", &slots.len())
            .field(
                "initialized",
                &slots.values().filter(|slot| slot.rules.get().is_some()).count(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Required;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn rules_for(name: &str, property: &str) -> Rules {
        Rules::builder(DomainType::named(name))
            .add_value(property, Required::REQUIRED)
            .unwrap()
            .build()
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = RulesRegistry::new();
        registry.register(rules_for("Person", "name"), None);

        let person = DomainType::named("Person");
        assert!(registry.rules(&person, None).is_some());
        assert!(registry.property_constraint(&person, "name", None).is_some());
        assert!(registry.property_constraint(&person, "age", None).is_none());
        assert!(registry.rules(&DomainType::named("Order"), None).is_none());
    }

    #[test]
    fn test_context_falls_back_to_default() {
        let registry = RulesRegistry::new();
        registry.register(rules_for("Post", "title"), None);
        registry.register(rules_for("Post", "body"), Some("publish"));

        let post = DomainType::named("Post");
        let publish = registry.rules(&post, Some("publish")).unwrap();
        assert!(publish.property_constraint("body").is_some());

        let draft = registry.rules(&post, Some("draft")).unwrap();
        assert!(draft.property_constraint("title").is_some());
        assert_eq!(registry.domain_types(), vec![post]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_walks_supertypes() {
        let registry = RulesRegistry::new();
        registry.register(rules_for("Party", "name"), None);
        registry.register(rules_for("Person", "birthday"), None);

        let person = DomainType::named("Person").extending(DomainType::named("Party"));
        let company = DomainType::named("Company").extending(DomainType::named("Party"));

        assert!(registry.property_constraint(&person, "birthday", None).is_some());
        assert_eq!(
            registry.rules(&company, None).map(|r| r.domain_type().clone()),
            Some(DomainType::named("Party"))
        );
    }

    #[test]
    fn test_lazy_init_runs_once_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(RulesRegistry::new());
        {
            let calls = Arc::clone(&calls);
            registry.register_lazy(DomainType::named("Order"), None, move || {
                calls.fetch_add(1, Ordering::SeqCst);
                rules_for("Order", "number")
            });
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.rules(&DomainType::named("Order"), None).is_some())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_init_may_read_other_entries() {
        let registry = Arc::new(RulesRegistry::new());
        registry.register_lazy(DomainType::named("Address"), None, || rules_for("Address", "city"));
        {
            let inner = Arc::clone(&registry);
            registry.register_lazy(DomainType::named("Customer"), None, move || {
                let address = inner
                    .rules(&DomainType::named("Address"), None)
                    .map_or(0, |rules| rules.len());
                assert_eq!(address, 1);
                rules_for("Customer", "name")
            });
        }

        let customer = registry.rules(&DomainType::named("Customer"), None).unwrap();
        assert_eq!(customer.domain_type(), &DomainType::named("Customer"));
        assert!(registry.rules(&DomainType::named("Address"), None).is_some());
    }

    #[test]
    fn test_unregister() {
        let registry = RulesRegistry::default();
        registry.register(rules_for("Person", "name"), None);
        assert!(registry.unregister(&DomainType::named("Person"), None));
        assert!(!registry.unregister(&DomainType::named("Person"), None));
        assert!(registry.is_empty());
    }
}
