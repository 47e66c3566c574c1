//! Foundational base-type registry.
//!
//! A class is an API-surface-generation candidate only when its ancestry
//! reaches one of a small closed set of foundational base types. Which
//! fully-qualified names map to which tier is configuration injected by
//! the embedding caller, not knowledge baked into discovery.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Closed set of foundational tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoundationalTier {
    ManagedObject,
    Element,
    Control,
    WebComponent,
}

impl FoundationalTier {
    pub fn as_str(self) -> &'static str {
        match self {
            FoundationalTier::ManagedObject => "managedObject",
            FoundationalTier::Element => "element",
            FoundationalTier::Control => "control",
            FoundationalTier::WebComponent => "webComponent",
        }
    }
}

/// Mapping from fully-qualified type names to foundational tiers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BaseRegistry {
    tiers: FxHashMap<String, FoundationalTier>,
}

impl BaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fully_qualified_name: impl Into<String>, tier: FoundationalTier) {
        self.tiers.insert(fully_qualified_name.into(), tier);
    }

    pub fn tier_of(&self, fully_qualified_name: &str) -> Option<FoundationalTier> {
        self.tiers.get(fully_qualified_name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl FromIterator<(String, FoundationalTier)> for BaseRegistry {
    fn from_iter<I: IntoIterator<Item = (String, FoundationalTier)>>(entries: I) -> Self {
        Self {
            tiers: entries.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_by_fully_qualified_name() {
        let mut registry = BaseRegistry::new();
        registry.insert("sap.ui.core.Control", FoundationalTier::Control);
        assert_eq!(
            registry.tier_of("sap.ui.core.Control"),
            Some(FoundationalTier::Control)
        );
        assert_eq!(registry.tier_of("Control"), None);
    }

    #[test]
    fn deserializes_as_plain_map() {
        let registry: BaseRegistry = serde_json::from_str(
            r#"{ "sap.ui.base.ManagedObject": "managedObject", "sap.ui.core.Element": "element" }"#,
        )
        .unwrap();
        assert_eq!(
            registry.tier_of("sap.ui.core.Element"),
            Some(FoundationalTier::Element)
        );
    }
}
