//! Accessor name derivation.
//!
//! Method names are a pure deterministic function of (member name, member
//! kind, cardinality, bindable). The verb sets live in one table so the
//! derivation is independently testable and cannot drift between member
//! kinds.

use crate::model::{AccessorMap, Cardinality, MemberKind};

/// One accessor verb. The key doubles as the method-name prefix
/// (`indexOf` + `Item` = `indexOfItem`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Set,
    Bind,
    Unbind,
    Destroy,
    Insert,
    Add,
    Remove,
    IndexOf,
    RemoveAll,
    Attach,
    Detach,
    Fire,
}

impl Verb {
    pub fn key(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Set => "set",
            Verb::Bind => "bind",
            Verb::Unbind => "unbind",
            Verb::Destroy => "destroy",
            Verb::Insert => "insert",
            Verb::Add => "add",
            Verb::Remove => "remove",
            Verb::IndexOf => "indexOf",
            Verb::RemoveAll => "removeAll",
            Verb::Attach => "attach",
            Verb::Detach => "detach",
            Verb::Fire => "fire",
        }
    }

    /// Per-item verbs operate on the singular form of a collection name:
    /// `insertItem`, not `insertItems`. `removeAll` stays plural.
    pub fn uses_singular(self) -> bool {
        matches!(self, Verb::Insert | Verb::Add | Verb::Remove | Verb::IndexOf)
    }
}

/// Verb set for one (kind, cardinality, bindable) combination.
///
/// Properties and events ignore cardinality. Associations never bind.
pub fn verbs(kind: MemberKind, cardinality: Cardinality, bindable: bool) -> &'static [Verb] {
    use Cardinality::{ZeroOrMany, ZeroOrOne};
    use Verb::*;
    match (kind, cardinality, bindable) {
        (MemberKind::Property, _, false) => &[Get, Set],
        (MemberKind::Property, _, true) => &[Get, Set, Bind, Unbind],
        (MemberKind::Aggregation, ZeroOrOne, false) => &[Get, Set, Destroy],
        (MemberKind::Aggregation, ZeroOrOne, true) => &[Get, Set, Destroy, Bind, Unbind],
        (MemberKind::Aggregation, ZeroOrMany, false) => {
            &[Get, Destroy, Insert, Add, Remove, IndexOf, RemoveAll]
        }
        (MemberKind::Aggregation, ZeroOrMany, true) => {
            &[Get, Destroy, Insert, Add, Remove, IndexOf, RemoveAll, Bind, Unbind]
        }
        (MemberKind::Association, ZeroOrOne, _) => &[Get, Set],
        (MemberKind::Association, ZeroOrMany, _) => &[Get, Add, Remove, RemoveAll],
        (MemberKind::Event, _, _) => &[Attach, Detach, Fire],
    }
}

/// First character upper, remainder unchanged.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the accessor map for one member.
///
/// `singular_name` is only consulted for per-item verbs; passing the
/// member name itself is fine for kinds that never use them.
pub fn accessor_names(
    kind: MemberKind,
    cardinality: Cardinality,
    bindable: bool,
    name: &str,
    singular_name: &str,
) -> AccessorMap {
    let capitalized = capitalize(name);
    let capitalized_singular = capitalize(singular_name);
    verbs(kind, cardinality, bindable)
        .iter()
        .map(|verb| {
            let stem = if verb.uses_singular() {
                &capitalized_singular
            } else {
                &capitalized
            };
            (verb.key(), format!("{}{stem}", verb.key()))
        })
        .collect()
}
