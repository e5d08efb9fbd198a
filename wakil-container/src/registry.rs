//! Provider registry — the name → [`Item`] half of the container.
//!
//! The registry only stores; dependency validation lives in
//! [`graph`](crate::graph) and memoized values live in the container's
//! cache.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::error::{AlreadyRegisteredError, WakilError};
use crate::item::Item;

/// Stores every registered provider by name.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    items: HashMap<String, Arc<Item>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `name` is taken and overriding is disabled.
    pub fn check_vacant(&self, name: &str, allow_override: bool) -> Result<(), WakilError> {
        if !allow_override && self.items.contains_key(name) {
            return Err(WakilError::AlreadyRegistered(AlreadyRegisteredError {
                name: name.to_string(),
            }));
        }
        Ok(())
    }

    /// Inserts an item, replacing any previous item of the same name.
    ///
    /// Returns true if an item was replaced.
    pub fn insert(&mut self, item: Item) -> bool {
        let name = item.name().to_string();
        debug!(
            name = %name,
            class_like = item.is_class_like(),
            dependencies = ?item.dependencies(),
            "Registered provider"
        );
        self.items.insert(name, Arc::new(item)).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Item>> {
        self.items.get(name).cloned()
    }

    /// Dependency sets of every registered item (for graph validation).
    pub fn dependency_view(&self) -> HashMap<&str, &BTreeSet<String>> {
        self.items
            .iter()
            .map(|(name, item)| (name.as_str(), item.dependencies()))
            .collect()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{Thing, inspect};

    fn item(name: &str, deps: &[&str]) -> Item {
        inspect(&Thing::function(name, deps, |_| Ok(())), None).unwrap()
    }

    #[test]
    fn insert_and_get() {
        let mut reg = Registry::new();
        assert!(!reg.insert(item("database", &[])));
        assert!(reg.contains("database"));
        assert_eq!(reg.get("database").unwrap().name(), "database");
        assert!(reg.get("cache").is_none());
    }

    #[test]
    fn insert_replaces() {
        let mut reg = Registry::new();
        reg.insert(item("database", &[]));
        assert!(reg.insert(item("database", &["url"])));
        assert_eq!(reg.len(), 1);
        assert!(reg.get("database").unwrap().dependencies().contains("url"));
    }

    #[test]
    fn vacancy_respects_override_flag() {
        let mut reg = Registry::new();
        reg.insert(item("database", &[]));

        assert!(reg.check_vacant("database", true).is_ok());
        assert!(reg.check_vacant("cache", false).is_ok());
        assert!(matches!(
            reg.check_vacant("database", false),
            Err(WakilError::AlreadyRegistered(_))
        ));
    }

    #[test]
    fn names_sorted() {
        let mut reg = Registry::new();
        reg.insert(item("b", &[]));
        reg.insert(item("a", &[]));
        assert_eq!(reg.names(), vec!["a".to_string(), "b".to_string()]);
        assert!(!reg.is_empty());
    }
}
