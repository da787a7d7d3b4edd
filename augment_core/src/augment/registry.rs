//! Augment definition registry

use super::AugmentDefinition;
use crate::types::AugmentId;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared, immutable augment definitions by id
#[derive(Debug, Clone, Default)]
pub struct AugmentRegistry {
    definitions: HashMap<AugmentId, Arc<AugmentDefinition>>,
}

impl AugmentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        AugmentRegistry {
            definitions: HashMap::new(),
        }
    }

    /// Register a definition, replacing any with the same id
    pub fn register(&mut self, definition: AugmentDefinition) -> Arc<AugmentDefinition> {
        let definition = Arc::new(definition);
        self.definitions
            .insert(definition.id.clone(), Arc::clone(&definition));
        definition
    }

    /// Get a shared definition by id
    pub fn get(&self, id: &str) -> Option<Arc<AugmentDefinition>> {
        self.definitions.get(&AugmentId::from(id)).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(&AugmentId::from(id))
    }

    /// All ids, sorted
    pub fn ids(&self) -> Vec<AugmentId> {
        let mut ids: Vec<_> = self.definitions.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AugmentDefinition>> {
        self.definitions.values()
    }

    /// Load the bundled augment set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for definition in crate::config::default_augments() {
            registry.register(definition);
        }
        registry
    }
}

impl FromIterator<AugmentDefinition> for AugmentRegistry {
    fn from_iter<I: IntoIterator<Item = AugmentDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.register(definition);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::AugmentKind;

    #[test]
    fn test_register_and_share() {
        let mut registry = AugmentRegistry::new();
        registry.register(AugmentDefinition::new(
            "second_wind",
            "Second Wind",
            AugmentKind::EmergencyHeal { heal_fraction: 0.5 },
        ));

        let a = registry.get("second_wind").unwrap();
        let b = registry.get("second_wind").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_ids_sorted() {
        let registry: AugmentRegistry = ["b", "a", "c"]
            .into_iter()
            .map(|id| AugmentDefinition::new(id, id, AugmentKind::None))
            .collect();
        let ids: Vec<_> = registry.ids().into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_defaults_loaded() {
        let registry = AugmentRegistry::with_defaults();
        assert!(registry.contains("none"));
        assert!(registry.contains("second_wind"));
        assert!(registry.len() > 5);
    }
}
