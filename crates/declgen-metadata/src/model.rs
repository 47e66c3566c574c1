//! Canonical class description.
//!
//! One [`ClassInfo`] is built per discovered, metadata-bearing class per
//! run. It is assembled progressively by the normalizer and then handed
//! read-only to downstream synthesis; it is never persisted.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberKind {
    Property,
    Aggregation,
    Association,
    Event,
}

/// Cardinality of an aggregation or association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ZeroOrOne,
    ZeroOrMany,
}

impl Cardinality {
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "0..1",
            Cardinality::ZeroOrMany => "0..n",
        }
    }

    /// Aggregations are collections unless `multiple` says otherwise:
    /// unset or `true` means `0..n`.
    pub fn of_aggregation(multiple: Option<bool>) -> Self {
        if multiple == Some(false) {
            Cardinality::ZeroOrOne
        } else {
            Cardinality::ZeroOrMany
        }
    }

    /// Associations default the other way around: unset or `false` means
    /// `0..1`. The asymmetry with aggregations is a deliberate legacy
    /// convention; keep the two constructors separate.
    pub fn of_association(multiple: Option<bool>) -> Self {
        if multiple == Some(true) {
            Cardinality::ZeroOrMany
        } else {
            Cardinality::ZeroOrOne
        }
    }
}

impl Serialize for Cardinality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Documentation-adjacent tags shared by the class and all member kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocTags {
    pub doc: Option<String>,
    pub deprecation: Option<String>,
    pub since: Option<String>,
    pub experimental: Option<String>,
}

/// Derived accessor names, keyed by verb (`"get"`, `"set"`, `"indexOf"`,
/// ...). Built by [`crate::naming::accessor_names`].
pub type AccessorMap = IndexMap<&'static str, String>;

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub default_value: Option<Value>,
    pub bindable: bool,
    pub visibility: String,
    #[serde(flatten)]
    pub tags: DocTags,
    pub methods: AccessorMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub alt_types: Vec<String>,
    pub singular_name: String,
    pub cardinality: Cardinality,
    pub bindable: bool,
    pub visibility: String,
    #[serde(flatten)]
    pub tags: DocTags,
    pub methods: AccessorMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct Association {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub singular_name: String,
    pub cardinality: Cardinality,
    pub visibility: String,
    #[serde(flatten)]
    pub tags: DocTags,
    pub methods: AccessorMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(flatten)]
    pub tags: DocTags,
}

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub name: String,
    pub allow_prevent_default: bool,
    pub enable_event_bubbling: bool,
    pub visibility: String,
    #[serde(flatten)]
    pub tags: DocTags,
    pub parameters: IndexMap<String, EventParameter>,
    pub methods: AccessorMap,
}

/// A construction-time setting with no derived accessors.
#[derive(Debug, Clone, Serialize)]
pub struct SpecialSetting {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

/// Value of the `designtime` metadata field: either an enablement flag or
/// a module path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Designtime {
    Flag(bool),
    Module(String),
}

/// Canonical, typed description of one class's public API surface.
///
/// Member maps are keyed by member name; within one metadata block a later
/// duplicate silently overwrites an earlier one. Map order follows the
/// metadata block but carries no meaning.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(flatten)]
    pub tags: DocTags,
    pub stereotype: Option<String>,
    pub library: Option<String>,
    pub interfaces: Vec<String>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub default_property: Option<String>,
    pub default_aggregation: Option<String>,
    pub properties: IndexMap<String, Property>,
    pub aggregations: IndexMap<String, Aggregation>,
    pub associations: IndexMap<String, Association>,
    pub events: IndexMap<String, Event>,
    pub special_settings: IndexMap<String, SpecialSetting>,
    pub designtime: Option<Designtime>,
}

impl ClassInfo {
    /// Whether any member would warrant generating a declaration unit.
    pub fn has_members(&self) -> bool {
        !self.properties.is_empty()
            || !self.aggregations.is_empty()
            || !self.associations.is_empty()
            || !self.events.is_empty()
            || !self.special_settings.is_empty()
    }
}
