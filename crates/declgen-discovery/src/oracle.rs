//! Type-resolution oracle.
//!
//! Discovery never inspects type references itself; it asks the oracle,
//! which the embedding caller backs with its real front end. The oracle
//! must be deterministic within one run; it may be invoked many times per
//! class.

use crate::input::TypeRef;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// What the oracle knows about one type reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedType {
    pub fully_qualified_name: String,
    #[serde(default)]
    pub base_type_refs: Vec<TypeRef>,
}

pub trait TypeOracle {
    /// Resolves a type reference, or `None` when the reference does not
    /// name a known type.
    fn resolve(&self, type_ref: &TypeRef) -> Option<ResolvedType>;
}

/// In-memory oracle backed by a plain table. Serves the CLI path (the
/// project description carries the table) and tests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TableOracle {
    types: FxHashMap<String, ResolvedType>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<'a>(
        &mut self,
        type_ref: impl Into<String>,
        fully_qualified_name: impl Into<String>,
        base_type_refs: impl IntoIterator<Item = &'a str>,
    ) {
        self.types.insert(
            type_ref.into(),
            ResolvedType {
                fully_qualified_name: fully_qualified_name.into(),
                base_type_refs: base_type_refs.into_iter().map(TypeRef::new).collect(),
            },
        );
    }
}

impl TypeOracle for TableOracle {
    fn resolve(&self, type_ref: &TypeRef) -> Option<ResolvedType> {
        self.types.get(type_ref.as_str()).cloned()
    }
}
