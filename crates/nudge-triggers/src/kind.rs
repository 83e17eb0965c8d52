//! Trigger-kind registry — maps the stored `trigger_type` string to the
//! implementation owning rows of that type.
//!
//! Registration happens once at process initialization; `build()` then
//! freezes the registry. Callers treat a miss as "skip this row", never
//! as an error.

use std::collections::HashMap;

/// The capability surface every trigger kind exposes to the bootstrap
/// layer. Implementations own the alarm/geofence mechanics; none of
/// that lives here.
pub trait TriggerKind {
    /// (Re-)activate a stored trigger, e.g. re-register its alarm or
    /// geofence. Called with the row id and the serialized trigger
    /// descriptor the kind itself wrote.
    fn start(&self, id: i64, trigger_desc: &str);

    /// Tear down any live registration for a trigger. Implementations
    /// must not touch the trigger store; row removal belongs to the
    /// initializer.
    fn delete(&self, id: i64);

    /// Whether this kind carries user-facing settings.
    fn has_settings(&self) -> bool {
        false
    }

    /// Restore kind-level settings to their defaults.
    fn reset_settings(&self) {}
}

/// Immutable registry of trigger kinds, keyed by type string.
pub struct TriggerKindRegistry {
    kinds: HashMap<String, Box<dyn TriggerKind>>,
}

impl TriggerKindRegistry {
    /// Look up the kind owning the given type string.
    pub fn get(&self, trigger_type: &str) -> Option<&dyn TriggerKind> {
        self.kinds.get(trigger_type).map(|k| k.as_ref())
    }

    /// All registered kinds, ordered by type name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn TriggerKind)> {
        let mut entries: Vec<_> = self
            .kinds
            .iter()
            .map(|(name, kind)| (name.as_str(), kind.as_ref()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Builder used during process initialization.
#[derive(Default)]
pub struct RegistryBuilder {
    kinds: HashMap<String, Box<dyn TriggerKind>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind under its type string. Re-registering a name
    /// replaces the earlier entry.
    pub fn register(mut self, trigger_type: &str, kind: Box<dyn TriggerKind>) -> Self {
        tracing::debug!(trigger_type, "registered trigger kind");
        self.kinds.insert(trigger_type.to_string(), kind);
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> TriggerKindRegistry {
        TriggerKindRegistry { kinds: self.kinds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingKind {
        started: Rc<Cell<u32>>,
    }

    impl TriggerKind for CountingKind {
        fn start(&self, _id: i64, _trigger_desc: &str) {
            self.started.set(self.started.get() + 1);
        }
        fn delete(&self, _id: i64) {}
    }

    #[test]
    fn test_lookup_and_miss() {
        let started = Rc::new(Cell::new(0));
        let registry = RegistryBuilder::new()
            .register("time", Box::new(CountingKind { started: started.clone() }))
            .build();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("location").is_none());

        registry.get("time").unwrap().start(1, "{}");
        assert_eq!(started.get(), 1);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let registry = RegistryBuilder::new()
            .register("time", Box::new(CountingKind { started: Rc::new(Cell::new(0)) }))
            .register("location", Box::new(CountingKind { started: Rc::new(Cell::new(0)) }))
            .build();

        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["location", "time"]);
    }

    #[test]
    fn test_reregister_replaces() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let registry = RegistryBuilder::new()
            .register("time", Box::new(CountingKind { started: first.clone() }))
            .register("time", Box::new(CountingKind { started: second.clone() }))
            .build();

        assert_eq!(registry.len(), 1);
        registry.get("time").unwrap().start(1, "{}");
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }
}
