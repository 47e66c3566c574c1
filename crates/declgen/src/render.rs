//! Declaration rendering.
//!
//! Renders one [`ClassInfo`] into the text of a companion declaration
//! unit: deduplicated imports, a construction-time settings shape, and the
//! derived accessor surface. The renderer is a seam; embedders with their
//! own assembly replace [`DefaultRenderer`] through the
//! [`DeclarationRenderer`] trait.

use declgen_discovery::{ConstructorCompleteness, FoundationalTier};
use declgen_metadata::model::{Aggregation, Association, ClassInfo, Event, Property};
use declgen_metadata::Cardinality;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::fmt::Write;

/// Everything the orchestrator hands down for one class.
#[derive(Debug, Clone)]
pub struct RenderInput<'a> {
    pub class: &'a ClassInfo,
    /// The class's own settings-type name as referenced by its
    /// constructors, when inference found one.
    pub settings_type: Option<&'a str>,
    pub completeness: ConstructorCompleteness,
    pub tier: FoundationalTier,
}

/// Renders a declaration unit, or `None` when zero members warrant
/// generation.
pub trait DeclarationRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Option<String>;
}

/// Type names that need no import.
static PRIMITIVE_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "", "any", "boolean", "float", "function", "int", "number", "object", "string", "void",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl DeclarationRenderer for DefaultRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Option<String> {
        if !input.class.has_members() {
            return None;
        }
        let class = input.class;
        let mut out = String::new();

        if !input.completeness.is_complete() {
            render_constructor_hint(&mut out, input);
        }
        render_imports(&mut out, class);
        render_settings(&mut out, input);
        render_surface(&mut out, class);
        Some(out)
    }
}

/// The conventional constructor overloads, suggested when the class does
/// not declare all of them.
fn render_constructor_hint(out: &mut String, input: &RenderInput<'_>) {
    let settings = settings_name(input);
    let _ = writeln!(out, "// {} is missing constructor signatures; declare:", input.class.name);
    let _ = writeln!(out, "//   constructor(idOrSettings?: string | {settings});");
    let _ = writeln!(out, "//   constructor(id?: string, settings?: {settings});");
    out.push('\n');
}

fn render_imports(out: &mut String, class: &ClassInfo) {
    // Deduplicated by (origin, exported name).
    let mut imports: IndexSet<(String, String)> = IndexSet::new();
    let mut collect = |type_name: &str| {
        if let Some(import) = import_for(type_name) {
            imports.insert(import);
        }
    };

    for property in class.properties.values() {
        collect(&property.type_name);
    }
    for aggregation in class.aggregations.values() {
        collect(&aggregation.type_name);
        for alt in &aggregation.alt_types {
            collect(alt);
        }
    }
    for association in class.associations.values() {
        collect(&association.type_name);
    }
    for event in class.events.values() {
        for parameter in event.parameters.values() {
            collect(&parameter.type_name);
        }
    }
    for setting in class.special_settings.values() {
        if let Some(type_name) = &setting.type_name {
            collect(type_name);
        }
    }

    if imports.is_empty() {
        // At least one import keeps the unit a concrete (non-ambient)
        // declaration.
        let _ = writeln!(out, "import \"./{}\";", class.name);
    } else {
        for (origin, name) in &imports {
            let _ = writeln!(out, "import {name} from \"{origin}\";");
        }
    }
    out.push('\n');
}

fn render_settings(out: &mut String, input: &RenderInput<'_>) {
    let class = input.class;
    let parent_settings = format!("${}Settings", tier_name(input.tier));
    let _ = writeln!(
        out,
        "declare interface {} extends {parent_settings} {{",
        settings_name(input)
    );
    for property in class.properties.values() {
        let _ = writeln!(out, "    {}?: {};", property.name, local_type(&property.type_name));
    }
    for aggregation in class.aggregations.values() {
        let mut union = local_type(&aggregation.type_name);
        for alt in &aggregation.alt_types {
            let _ = write!(union, " | {}", local_type(alt));
        }
        match aggregation.cardinality {
            Cardinality::ZeroOrMany => {
                let item = if aggregation.alt_types.is_empty() {
                    format!("{union}[]")
                } else {
                    format!("({union})[]")
                };
                let _ = writeln!(out, "    {}?: {item};", aggregation.name);
            }
            Cardinality::ZeroOrOne => {
                let _ = writeln!(out, "    {}?: {union};", aggregation.name);
            }
        }
    }
    for association in class.associations.values() {
        let target = local_type(&association.type_name);
        match association.cardinality {
            Cardinality::ZeroOrMany => {
                let _ = writeln!(out, "    {}?: ({target} | string)[];", association.name);
            }
            Cardinality::ZeroOrOne => {
                let _ = writeln!(out, "    {}?: {target} | string;", association.name);
            }
        }
    }
    for event in class.events.values() {
        let _ = writeln!(out, "    {}?: (event: object) => void;", event.name);
    }
    for setting in class.special_settings.values() {
        let type_name = setting.type_name.as_deref().unwrap_or("any");
        let _ = writeln!(out, "    {}?: {};", setting.name, local_type(type_name));
    }
    out.push_str("}\n\n");
}

fn render_surface(out: &mut String, class: &ClassInfo) {
    let _ = writeln!(out, "declare interface {} {{", class.name);
    for property in class.properties.values() {
        render_property_accessors(out, property);
    }
    for aggregation in class.aggregations.values() {
        render_aggregation_accessors(out, aggregation);
    }
    for association in class.associations.values() {
        render_association_accessors(out, association);
    }
    for event in class.events.values() {
        render_event_accessors(out, event);
    }
    out.push_str("}\n");
}

fn render_property_accessors(out: &mut String, property: &Property) {
    let value_type = local_type(&property.type_name);
    for (verb, method) in &property.methods {
        let signature = match *verb {
            "get" => format!("(): {value_type}"),
            "set" => format!("({}: {value_type}): this", property.name),
            "bind" => "(bindingInfo: object): this".to_string(),
            "unbind" => "(): this".to_string(),
            _ => continue,
        };
        let _ = writeln!(out, "    {method}{signature};");
    }
}

fn render_aggregation_accessors(out: &mut String, aggregation: &Aggregation) {
    let item_type = local_type(&aggregation.type_name);
    let item = &aggregation.singular_name;
    for (verb, method) in &aggregation.methods {
        let signature = match (*verb, aggregation.cardinality) {
            ("get", Cardinality::ZeroOrMany) => format!("(): {item_type}[]"),
            ("get", Cardinality::ZeroOrOne) => format!("(): {item_type}"),
            ("set", _) => format!("({}: {item_type}): this", aggregation.name),
            ("destroy", _) => "(): this".to_string(),
            ("insert", _) => format!("({item}: {item_type}, index: number): this"),
            ("add", _) => format!("({item}: {item_type}): this"),
            ("remove", _) => format!("({item}: {item_type} | number | string): {item_type} | null"),
            ("indexOf", _) => format!("({item}: {item_type}): number"),
            ("removeAll", _) => format!("(): {item_type}[]"),
            ("bind", _) => "(bindingInfo: object): this".to_string(),
            ("unbind", _) => "(): this".to_string(),
            _ => continue,
        };
        let _ = writeln!(out, "    {method}{signature};");
    }
}

fn render_association_accessors(out: &mut String, association: &Association) {
    let target_type = local_type(&association.type_name);
    let item = &association.singular_name;
    for (verb, method) in &association.methods {
        let signature = match (*verb, association.cardinality) {
            ("get", Cardinality::ZeroOrMany) => "(): string[]".to_string(),
            ("get", Cardinality::ZeroOrOne) => "(): string".to_string(),
            ("set", _) => format!("({}: {target_type} | string): this", association.name),
            ("add", _) => format!("({item}: {target_type} | string): this"),
            ("remove", _) => format!("({item}: {target_type} | number | string): string | null"),
            ("removeAll", _) => "(): string[]".to_string(),
            _ => continue,
        };
        let _ = writeln!(out, "    {method}{signature};");
    }
}

fn render_event_accessors(out: &mut String, event: &Event) {
    for (verb, method) in &event.methods {
        let signature = match *verb {
            "attach" | "detach" => "(handler: (event: object) => void): this",
            "fire" => "(parameters?: object): this",
            _ => continue,
        };
        let _ = writeln!(out, "    {method}{signature};");
    }
}

fn settings_name(input: &RenderInput<'_>) -> String {
    match input.settings_type {
        Some(name) => name.to_string(),
        None => format!("${}Settings", input.class.name),
    }
}

fn tier_name(tier: FoundationalTier) -> &'static str {
    match tier {
        FoundationalTier::ManagedObject => "ManagedObject",
        FoundationalTier::Element => "Element",
        FoundationalTier::Control => "Control",
        FoundationalTier::WebComponent => "WebComponent",
    }
}

/// Module origin and exported name for a type that needs importing.
/// Dotted framework names map onto slash-separated module paths.
fn import_for(type_name: &str) -> Option<(String, String)> {
    if PRIMITIVE_TYPES.contains(type_name) {
        return None;
    }
    // Array notation refers to the element type.
    let element = type_name.trim_end_matches("[]");
    if element.contains('/') {
        let name = element.rsplit('/').next().unwrap_or(element);
        Some((element.to_string(), name.to_string()))
    } else if element.contains('.') {
        let name = element.rsplit('.').next().unwrap_or(element);
        Some((element.replace('.', "/"), name.to_string()))
    } else {
        None
    }
}

/// Type name as it appears in signatures: primitives mapped to the target
/// language, imported types reduced to their local name.
fn local_type(type_name: &str) -> String {
    match type_name {
        "" | "any" => "any".to_string(),
        "int" | "float" => "number".to_string(),
        "function" => "Function".to_string(),
        other => {
            let suffix = if other.ends_with("[]") { "[]" } else { "" };
            let element = other.trim_end_matches("[]");
            let local = element
                .rsplit(['.', '/'])
                .next()
                .unwrap_or(element);
            format!("{local}{suffix}")
        }
    }
}
