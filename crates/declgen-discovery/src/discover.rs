//! Candidate discovery: the base-type walk plus per-candidate inference.

use crate::input::{ClassDecl, Constructor, ModuleInput, TypeRef};
use crate::oracle::TypeOracle;
use crate::registry::{BaseRegistry, FoundationalTier};
use declgen_common::limits::MAX_BASE_CHAIN_DEPTH;
use declgen_common::{Diagnostic, diagnostic_codes};
use rustc_hash::FxHashSet;

/// A class whose ancestry reached a foundational base type.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Index into [`ModuleInput::classes`].
    pub class_index: usize,
    pub name: String,
    pub tier: FoundationalTier,
    /// The settings-type reference inferred from the constructors, when
    /// any constructor yields one.
    pub settings_type: Option<TypeRef>,
    pub completeness: ConstructorCompleteness,
}

/// Which of the three conventional constructor signatures the class
/// declares. Advisory metadata; never blocks generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructorCompleteness {
    /// `constructor(idOrSettings?: string | Settings)` without a body.
    pub has_shorthand_declaration: bool,
    /// `constructor(id: string, settings: Settings)` without a body.
    pub has_full_declaration: bool,
    /// `constructor(id: string, settings: Settings)` with a body.
    pub has_implementation: bool,
}

impl ConstructorCompleteness {
    pub fn is_complete(self) -> bool {
        self.has_shorthand_declaration && self.has_full_declaration && self.has_implementation
    }
}

/// Scans a module's classes and keeps those whose heritage chain reaches a
/// registered foundational base type.
///
/// Classes with no interesting ancestry are dropped silently (the common
/// case for unrelated classes). A declared heritage reference the oracle
/// cannot resolve is fatal for that class and reported; so is an inferred
/// settings type the oracle cannot resolve. An incomplete constructor set
/// is reported as an informational diagnostic only.
pub fn discover(
    module: &ModuleInput,
    registry: &BaseRegistry,
    oracle: &dyn TypeOracle,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    'classes: for (class_index, class) in module.classes.iter().enumerate() {
        let mut tier = None;
        for heritage_ref in &class.heritage {
            let Some(resolved) = oracle.resolve(heritage_ref) else {
                diagnostics.push(
                    Diagnostic::error(
                        diagnostic_codes::UNRESOLVED_TYPE_REFERENCE,
                        module.source.as_str(),
                        format!("cannot resolve heritage type reference `{heritage_ref}`"),
                    )
                    .with_class(&class.name),
                );
                continue 'classes;
            };

            let mut visited = FxHashSet::default();
            visited.insert(resolved.fully_qualified_name.clone());
            tier = registry.tier_of(&resolved.fully_qualified_name).or_else(|| {
                resolved
                    .base_type_refs
                    .iter()
                    .find_map(|base| tier_of_chain(base, registry, oracle, &mut visited, 1))
            });
            // First heritage reference with an interesting base wins.
            if tier.is_some() {
                break;
            }
        }

        let Some(tier) = tier else {
            tracing::trace!(class = %class.name, "no foundational base type; not a candidate");
            continue;
        };

        let settings_type = infer_settings_type(&class.constructors);
        if let Some(settings_ref) = &settings_type {
            if oracle.resolve(settings_ref).is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        diagnostic_codes::UNRESOLVED_TYPE_REFERENCE,
                        module.source.as_str(),
                        format!("cannot resolve settings type reference `{settings_ref}`"),
                    )
                    .with_class(&class.name),
                );
                continue;
            }
        }

        let completeness = constructor_completeness(class, settings_type.as_ref());
        if !completeness.is_complete() {
            diagnostics.push(
                Diagnostic::message(
                    diagnostic_codes::MISSING_CONSTRUCTOR_SIGNATURES,
                    module.source.as_str(),
                    "class does not declare the full set of conventional constructor signatures",
                )
                .with_class(&class.name),
            );
        }

        tracing::debug!(
            class = %class.name,
            tier = tier.as_str(),
            settings = settings_type.as_ref().map(TypeRef::as_str),
            "discovered candidate"
        );
        candidates.push(Candidate {
            class_index,
            name: class.name.clone(),
            tier,
            settings_type,
            completeness,
        });
    }

    candidates
}

/// Depth-first walk up one base-type chain; first registry match wins.
///
/// References the oracle cannot resolve merely end that branch. The
/// visited set and depth bound are defensive hardening against cyclic or
/// unbounded ancestry; well-formed input never hits them.
fn tier_of_chain(
    type_ref: &TypeRef,
    registry: &BaseRegistry,
    oracle: &dyn TypeOracle,
    visited: &mut FxHashSet<String>,
    depth: u32,
) -> Option<FoundationalTier> {
    if depth > MAX_BASE_CHAIN_DEPTH {
        tracing::warn!(%type_ref, "base-type chain exceeds depth bound; giving up on branch");
        return None;
    }
    let resolved = oracle.resolve(type_ref)?;
    if !visited.insert(resolved.fully_qualified_name.clone()) {
        return None;
    }
    if let Some(tier) = registry.tier_of(&resolved.fully_qualified_name) {
        return Some(tier);
    }
    resolved
        .base_type_refs
        .iter()
        .find_map(|base| tier_of_chain(base, registry, oracle, visited, depth + 1))
}

/// Takes the last parameter's declared type of every constructor and keeps
/// the plain named references; when constructors disagree, the last one
/// examined wins. Lenient by design; no diagnostic.
fn infer_settings_type(constructors: &[Constructor]) -> Option<TypeRef> {
    let mut settings_type = None;
    for constructor in constructors {
        if let Some(named) = constructor
            .params
            .last()
            .and_then(|param| param.ty.as_named())
        {
            settings_type = Some(named.clone());
        }
    }
    settings_type
}

fn constructor_completeness(
    class: &ClassDecl,
    settings_type: Option<&TypeRef>,
) -> ConstructorCompleteness {
    let mut completeness = ConstructorCompleteness::default();
    let Some(settings_type) = settings_type else {
        return completeness;
    };
    for constructor in &class.constructors {
        match constructor.params.as_slice() {
            [only]
                if !constructor.has_body
                    && only.optional
                    && only.ty.admits_string_or(settings_type) =>
            {
                completeness.has_shorthand_declaration = true;
            }
            [first, second]
                if first.ty.is_string() && second.ty.as_named() == Some(settings_type) =>
            {
                if constructor.has_body {
                    completeness.has_implementation = true;
                } else {
                    completeness.has_full_declaration = true;
                }
            }
            _ => {}
        }
    }
    completeness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Param, ParamType};
    use crate::oracle::TableOracle;
    use declgen_common::SourceId;

    fn class(name: &str, heritage: &[&str]) -> ClassDecl {
        ClassDecl {
            name: name.to_string(),
            heritage: heritage.iter().copied().map(TypeRef::new).collect(),
            fields: Vec::new(),
            constructors: Vec::new(),
        }
    }

    fn module(classes: Vec<ClassDecl>) -> ModuleInput {
        ModuleInput {
            source: SourceId::new("src/Test.ts"),
            classes,
        }
    }

    fn control_registry() -> BaseRegistry {
        let mut registry = BaseRegistry::new();
        registry.insert("sap.ui.core.Control", FoundationalTier::Control);
        registry
    }

    #[test]
    fn direct_heritage_matches_registry() {
        let mut oracle = TableOracle::new();
        oracle.insert("Control", "sap.ui.core.Control", []);
        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![class("Widget", &["Control"])]),
            &control_registry(),
            &oracle,
            &mut diagnostics,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].tier, FoundationalTier::Control);
        assert_eq!(candidates[0].class_index, 0);
    }

    #[test]
    fn three_tier_hierarchy_resolves_to_grandparent_tier() {
        // Grandparent registered as foundational; Parent extends
        // Grandparent; Child extends Parent.
        let mut registry = BaseRegistry::new();
        registry.insert("demo.Grandparent", FoundationalTier::ManagedObject);
        let mut oracle = TableOracle::new();
        oracle.insert("Parent", "demo.Parent", ["Grandparent"]);
        oracle.insert("Grandparent", "demo.Grandparent", []);

        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![class("Child", &["Parent"])]),
            &registry,
            &oracle,
            &mut diagnostics,
        );
        assert!(diagnostics.is_empty());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].tier, FoundationalTier::ManagedObject);
    }

    #[test]
    fn unrelated_class_is_dropped_silently() {
        let mut oracle = TableOracle::new();
        oracle.insert("Helper", "demo.Helper", []);
        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![class("Util", &["Helper"])]),
            &control_registry(),
            &oracle,
            &mut diagnostics,
        );
        assert!(candidates.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unresolvable_declared_heritage_is_fatal_for_the_class() {
        let oracle = TableOracle::new();
        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![class("Widget", &["Missing"])]),
            &control_registry(),
            &oracle,
            &mut diagnostics,
        );
        assert!(candidates.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].code,
            diagnostic_codes::UNRESOLVED_TYPE_REFERENCE
        );
        assert_eq!(diagnostics[0].class_name.as_deref(), Some("Widget"));
    }

    #[test]
    fn cyclic_ancestry_terminates_without_a_match() {
        let mut oracle = TableOracle::new();
        oracle.insert("A", "demo.A", ["B"]);
        oracle.insert("B", "demo.B", ["A"]);
        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![class("Widget", &["A"])]),
            &control_registry(),
            &oracle,
            &mut diagnostics,
        );
        assert!(candidates.is_empty());
        assert!(diagnostics.is_empty());
    }

    fn full_constructors(settings: &str) -> Vec<Constructor> {
        let settings_ref = TypeRef::new(settings);
        vec![
            Constructor {
                params: vec![Param {
                    name: "idOrSettings".to_string(),
                    optional: true,
                    ty: ParamType::Union(vec![
                        ParamType::String,
                        ParamType::Named(settings_ref.clone()),
                    ]),
                }],
                has_body: false,
            },
            Constructor {
                params: vec![
                    Param {
                        name: "id".to_string(),
                        optional: true,
                        ty: ParamType::String,
                    },
                    Param {
                        name: "settings".to_string(),
                        optional: true,
                        ty: ParamType::Named(settings_ref.clone()),
                    },
                ],
                has_body: false,
            },
            Constructor {
                params: vec![
                    Param {
                        name: "id".to_string(),
                        optional: true,
                        ty: ParamType::String,
                    },
                    Param {
                        name: "settings".to_string(),
                        optional: true,
                        ty: ParamType::Named(settings_ref),
                    },
                ],
                has_body: true,
            },
        ]
    }

    #[test]
    fn settings_type_and_completeness_from_conventional_constructors() {
        let mut oracle = TableOracle::new();
        oracle.insert("Control", "sap.ui.core.Control", []);
        oracle.insert("$WidgetSettings", "demo.$WidgetSettings", []);

        let mut widget = class("Widget", &["Control"]);
        widget.constructors = full_constructors("$WidgetSettings");

        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![widget]),
            &control_registry(),
            &oracle,
            &mut diagnostics,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].settings_type,
            Some(TypeRef::new("$WidgetSettings"))
        );
        assert!(candidates[0].completeness.is_complete());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_signatures_are_informational_only() {
        let mut oracle = TableOracle::new();
        oracle.insert("Control", "sap.ui.core.Control", []);
        oracle.insert("$WidgetSettings", "demo.$WidgetSettings", []);

        let mut widget = class("Widget", &["Control"]);
        widget.constructors = vec![Constructor {
            params: vec![
                Param {
                    name: "id".to_string(),
                    optional: true,
                    ty: ParamType::String,
                },
                Param {
                    name: "settings".to_string(),
                    optional: true,
                    ty: ParamType::Named(TypeRef::new("$WidgetSettings")),
                },
            ],
            has_body: true,
        }];

        let mut diagnostics = Vec::new();
        let candidates = discover(
            &module(vec![widget]),
            &control_registry(),
            &oracle,
            &mut diagnostics,
        );
        assert_eq!(candidates.len(), 1, "incomplete constructors never block");
        assert!(!candidates[0].completeness.is_complete());
        assert!(candidates[0].completeness.has_implementation);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].code,
            diagnostic_codes::MISSING_CONSTRUCTOR_SIGNATURES
        );
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn last_constructor_wins_for_settings_type() {
        let constructors = vec![
            Constructor {
                params: vec![Param {
                    name: "settings".to_string(),
                    optional: false,
                    ty: ParamType::Named(TypeRef::new("$FirstSettings")),
                }],
                has_body: false,
            },
            // Inline/union last parameters are not plain named references
            // and do not participate.
            Constructor {
                params: vec![Param {
                    name: "settings".to_string(),
                    optional: false,
                    ty: ParamType::Other,
                }],
                has_body: false,
            },
            Constructor {
                params: vec![Param {
                    name: "settings".to_string(),
                    optional: false,
                    ty: ParamType::Named(TypeRef::new("$SecondSettings")),
                }],
                has_body: true,
            },
        ];
        assert_eq!(
            infer_settings_type(&constructors),
            Some(TypeRef::new("$SecondSettings"))
        );
    }
}
