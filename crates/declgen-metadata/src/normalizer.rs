//! Metadata normalizer.
//!
//! Turns the raw metadata object of one class into a [`ClassInfo`]. Member
//! entries that cannot be brought into record form are skipped with an
//! `UnsupportedMemberShape` diagnostic; normalization never aborts the
//! class over one bad member.

use crate::model::{
    Aggregation, Association, Cardinality, ClassInfo, Designtime, DocTags, Event, EventParameter,
    MemberKind, Property, SpecialSetting,
};
use crate::naming::accessor_names;
use crate::shorthand::{Expansion, expand};
use crate::singular::singular_of;
use declgen_common::{Diagnostic, SourceId, diagnostic_codes};
use serde_json::{Map, Value};

/// Property types default to `"string"`.
const PROPERTY_TYPE_DEFAULT: &str = "string";

/// Event parameter types default to the empty string, not `"string"`.
/// An observed irregularity of the metadata convention; preserved, not
/// corrected.
const EVENT_PARAMETER_TYPE_DEFAULT: &str = "";

const VISIBILITY_DEFAULT: &str = "public";

/// Injected configuration for the normalizer.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Canonical "generic container element" type name used as the default
    /// aggregation/association type. Supplied by the embedding caller,
    /// never hard-coded.
    pub container_element_type: String,
}

/// Produces the canonical class description for one raw metadata object.
///
/// `source` and `class_name` only feed diagnostic attribution; the derived
/// names depend exclusively on the metadata itself.
pub fn normalize(
    raw: &Map<String, Value>,
    class_name: &str,
    source: &SourceId,
    config: &NormalizeConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> ClassInfo {
    let mut info = ClassInfo {
        name: class_name.to_string(),
        tags: doc_tags(raw),
        stereotype: str_field(raw, "stereotype"),
        library: str_field(raw, "library"),
        interfaces: string_list(raw.get("interfaces")),
        is_abstract: bool_field(raw, "abstract").unwrap_or(false),
        is_final: bool_field(raw, "final").unwrap_or(false),
        default_property: str_field(raw, "defaultProperty"),
        default_aggregation: str_field(raw, "defaultAggregation"),
        designtime: designtime_value(raw),
        ..ClassInfo::default()
    };

    let mut ctx = SectionContext {
        class_name,
        source,
        diagnostics,
    };

    for (name, record) in ctx.entries(raw, "specialSettings", Some("type")) {
        info.special_settings
            .insert(name.clone(), build_special_setting(name, &record));
    }
    for (name, record) in ctx.entries(raw, "properties", Some("type")) {
        info.properties
            .insert(name.clone(), build_property(name, &record));
    }
    for (name, record) in ctx.entries(raw, "aggregations", Some("type")) {
        info.aggregations
            .insert(name.clone(), build_aggregation(name, &record, config));
    }
    for (name, record) in ctx.entries(raw, "associations", Some("type")) {
        info.associations
            .insert(name.clone(), build_association(name, &record, config));
    }
    // Event entries have no scalar shorthand; a bare scalar is invalid.
    for (name, record) in ctx.entries(raw, "events", None) {
        let event = build_event(&name, &record, &mut ctx);
        info.events.insert(name, event);
    }

    info
}

/// Shared diagnostic attribution while walking one metadata section.
struct SectionContext<'a> {
    class_name: &'a str,
    source: &'a SourceId,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl SectionContext<'_> {
    /// Expanded entries of one section, in metadata order. Entries that
    /// fail to expand are skipped with a diagnostic; a section that is not
    /// an object at all is diagnosed once and yields nothing.
    fn entries(
        &mut self,
        raw: &Map<String, Value>,
        section: &'static str,
        default_key: Option<&'static str>,
    ) -> Vec<(String, Map<String, Value>)> {
        let entries = match raw.get(section) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                self.skip(section, format!("section is {}, expected an object", kind_of(other)));
                return Vec::new();
            }
        };

        let mut expanded = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            match expand(Some(entry), default_key) {
                Expansion::Record(record) => expanded.push((name.clone(), record)),
                Expansion::Absent => {}
                Expansion::Invalid => {
                    self.skip(
                        &format!("{section}.{name}"),
                        format!(
                            "entry is {}, expected a record{}",
                            kind_of(entry),
                            if default_key.is_some() {
                                " or scalar shorthand"
                            } else {
                                ""
                            }
                        ),
                    );
                }
            }
        }
        expanded
    }

    fn skip(&mut self, member: &str, detail: String) {
        tracing::debug!(
            class = self.class_name,
            member,
            "skipping unsupported metadata entry: {detail}"
        );
        self.diagnostics.push(
            Diagnostic::warning(
                diagnostic_codes::UNSUPPORTED_MEMBER_SHAPE,
                self.source.as_str(),
                detail,
            )
            .with_class(self.class_name)
            .with_member(member),
        );
    }
}

fn build_property(name: String, record: &Map<String, Value>) -> Property {
    let bindable = bool_field(record, "bindable").unwrap_or(false);
    let methods = accessor_names(
        MemberKind::Property,
        Cardinality::ZeroOrOne,
        bindable,
        &name,
        &name,
    );
    Property {
        type_name: str_field(record, "type").unwrap_or_else(|| PROPERTY_TYPE_DEFAULT.to_string()),
        default_value: record.get("defaultValue").cloned(),
        bindable,
        visibility: visibility(record),
        tags: doc_tags(record),
        methods,
        name,
    }
}

fn build_aggregation(
    name: String,
    record: &Map<String, Value>,
    config: &NormalizeConfig,
) -> Aggregation {
    let cardinality = Cardinality::of_aggregation(bool_field(record, "multiple"));
    let bindable = bool_field(record, "bindable").unwrap_or(false);
    let singular_name = str_field(record, "singularName")
        .unwrap_or_else(|| singular_of(&name).into_owned());
    let methods = accessor_names(
        MemberKind::Aggregation,
        cardinality,
        bindable,
        &name,
        &singular_name,
    );
    Aggregation {
        type_name: str_field(record, "type")
            .unwrap_or_else(|| config.container_element_type.clone()),
        alt_types: string_list(record.get("altTypes")),
        singular_name,
        cardinality,
        bindable,
        visibility: visibility(record),
        tags: doc_tags(record),
        methods,
        name,
    }
}

fn build_association(
    name: String,
    record: &Map<String, Value>,
    config: &NormalizeConfig,
) -> Association {
    let cardinality = Cardinality::of_association(bool_field(record, "multiple"));
    let singular_name = str_field(record, "singularName")
        .unwrap_or_else(|| singular_of(&name).into_owned());
    let methods = accessor_names(
        MemberKind::Association,
        cardinality,
        false,
        &name,
        &singular_name,
    );
    Association {
        type_name: str_field(record, "type")
            .unwrap_or_else(|| config.container_element_type.clone()),
        singular_name,
        cardinality,
        visibility: visibility(record),
        tags: doc_tags(record),
        methods,
        name,
    }
}

fn build_event(name: &str, record: &Map<String, Value>, ctx: &mut SectionContext<'_>) -> Event {
    let mut parameters = indexmap::IndexMap::new();
    match record.get("parameters") {
        None | Some(Value::Null) => {}
        Some(Value::Object(raw_parameters)) => {
            for (parameter_name, entry) in raw_parameters {
                match expand(Some(entry), Some("type")) {
                    Expansion::Record(parameter) => {
                        parameters.insert(
                            parameter_name.clone(),
                            EventParameter {
                                name: parameter_name.clone(),
                                type_name: str_field(&parameter, "type")
                                    .unwrap_or_else(|| EVENT_PARAMETER_TYPE_DEFAULT.to_string()),
                                tags: doc_tags(&parameter),
                            },
                        );
                    }
                    Expansion::Absent => {}
                    Expansion::Invalid => ctx.skip(
                        &format!("{name}.{parameter_name}"),
                        format!("event parameter is {}, expected a record", kind_of(entry)),
                    ),
                }
            }
        }
        Some(other) => ctx.skip(
            &format!("{name}.parameters"),
            format!("parameters is {}, expected an object", kind_of(other)),
        ),
    }

    Event {
        name: name.to_string(),
        allow_prevent_default: bool_field(record, "allowPreventDefault").unwrap_or(false),
        enable_event_bubbling: bool_field(record, "enableEventBubbling").unwrap_or(false),
        visibility: visibility(record),
        tags: doc_tags(record),
        parameters,
        methods: accessor_names(MemberKind::Event, Cardinality::ZeroOrOne, false, name, name),
    }
}

fn build_special_setting(name: String, record: &Map<String, Value>) -> SpecialSetting {
    SpecialSetting {
        type_name: str_field(record, "type"),
        name,
    }
}

/// `designtime` and `designTime` are synonyms. The value is kept only if
/// it is a string or a boolean; anything else is silently ignored, with no
/// forced default.
fn designtime_value(raw: &Map<String, Value>) -> Option<Designtime> {
    let value = raw.get("designtime").or_else(|| raw.get("designTime"))?;
    match value {
        Value::Bool(flag) => Some(Designtime::Flag(*flag)),
        Value::String(module) => Some(Designtime::Module(module.clone())),
        _ => None,
    }
}

fn visibility(record: &Map<String, Value>) -> String {
    str_field(record, "visibility").unwrap_or_else(|| VISIBILITY_DEFAULT.to_string())
}

fn doc_tags(record: &Map<String, Value>) -> DocTags {
    DocTags {
        doc: str_field(record, "doc"),
        deprecation: str_field(record, "deprecation"),
        since: str_field(record, "since"),
        experimental: str_field(record, "experimental"),
    }
}

fn str_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(record: &Map<String, Value>, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

/// Accepts a single string or a list of strings; anything else is empty.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(single)) => vec![single.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(raw: serde_json::Value, class_name: &str) -> (ClassInfo, Vec<Diagnostic>) {
        let Value::Object(raw) = raw else {
            panic!("test metadata must be an object");
        };
        let config = NormalizeConfig {
            container_element_type: "sap/ui/core/Control".to_string(),
        };
        let source = SourceId::new("src/Test.ts");
        let mut diagnostics = Vec::new();
        let info = normalize(&raw, class_name, &source, &config, &mut diagnostics);
        (info, diagnostics)
    }

    #[test]
    fn derives_property_and_event_accessors() {
        let (info, diagnostics) = run(
            json!({
                "properties": { "text": { "type": "string" } },
                "events": { "press": {} },
            }),
            "Widget",
        );
        assert!(diagnostics.is_empty());

        let text = &info.properties["text"];
        assert_eq!(text.methods.get("get").unwrap(), "getText");
        assert_eq!(text.methods.get("set").unwrap(), "setText");

        let press = &info.events["press"];
        assert_eq!(press.methods.get("attach").unwrap(), "attachPress");
        assert_eq!(press.methods.get("detach").unwrap(), "detachPress");
        assert_eq!(press.methods.get("fire").unwrap(), "firePress");
    }

    #[test]
    fn scalar_shorthand_sets_the_type() {
        let (info, _) = run(json!({ "properties": { "width": "sap.ui.core.CSSSize" } }), "W");
        assert_eq!(info.properties["width"].type_name, "sap.ui.core.CSSSize");
    }

    #[test]
    fn property_type_defaults_to_string() {
        let (info, _) = run(json!({ "properties": { "text": {} } }), "W");
        assert_eq!(info.properties["text"].type_name, "string");
        assert_eq!(info.properties["text"].visibility, "public");
    }

    #[test]
    fn aggregation_defaults_to_collection_with_injected_type() {
        let (info, _) = run(json!({ "aggregations": { "items": {} } }), "W");
        let items = &info.aggregations["items"];
        assert_eq!(items.cardinality, Cardinality::ZeroOrMany);
        assert_eq!(items.type_name, "sap/ui/core/Control");
        assert_eq!(items.singular_name, "item");
        assert_eq!(items.methods.get("insert").unwrap(), "insertItem");
        assert_eq!(items.methods.get("indexOf").unwrap(), "indexOfItem");
        assert_eq!(items.methods.get("removeAll").unwrap(), "removeAllItems");
        assert!(!items.methods.contains_key("set"));
    }

    #[test]
    fn single_aggregation_gets_set_and_destroy() {
        let (info, _) = run(
            json!({ "aggregations": { "tooltip": { "multiple": false } } }),
            "W",
        );
        let tooltip = &info.aggregations["tooltip"];
        assert_eq!(tooltip.cardinality, Cardinality::ZeroOrOne);
        assert_eq!(tooltip.methods.get("set").unwrap(), "setTooltip");
        assert_eq!(tooltip.methods.get("destroy").unwrap(), "destroyTooltip");
        assert!(!tooltip.methods.contains_key("insert"));
    }

    #[test]
    fn explicit_singular_name_wins_over_heuristic() {
        let (info, _) = run(
            json!({ "aggregations": { "content": { "singularName": "contentItem" } } }),
            "W",
        );
        let content = &info.aggregations["content"];
        assert_eq!(content.singular_name, "contentItem");
        assert_eq!(content.methods.get("add").unwrap(), "addContentItem");
    }

    #[test]
    fn association_defaults_to_single() {
        let (info, _) = run(
            json!({
                "associations": {
                    "labelFor": {},
                    "ariaDescribedBy": { "multiple": true },
                }
            }),
            "W",
        );
        assert_eq!(
            info.associations["labelFor"].cardinality,
            Cardinality::ZeroOrOne
        );
        let described = &info.associations["ariaDescribedBy"];
        assert_eq!(described.cardinality, Cardinality::ZeroOrMany);
        assert!(!described.methods.contains_key("insert"));
        assert!(!described.methods.contains_key("indexOf"));
    }

    #[test]
    fn bindable_members_gain_bind_unbind() {
        let (info, _) = run(
            json!({
                "properties": { "value": { "bindable": true } },
                "aggregations": { "rows": { "bindable": true } },
            }),
            "W",
        );
        assert_eq!(info.properties["value"].methods.get("bind").unwrap(), "bindValue");
        assert_eq!(info.aggregations["rows"].methods.get("unbind").unwrap(), "unbindRows");
    }

    #[test]
    fn event_parameter_type_defaults_to_empty_string() {
        let (info, _) = run(
            json!({
                "events": {
                    "press": { "parameters": { "origin": {}, "count": "int" } }
                }
            }),
            "W",
        );
        let press = &info.events["press"];
        assert_eq!(press.parameters["origin"].type_name, "");
        assert_eq!(press.parameters["count"].type_name, "int");
    }

    #[test]
    fn scalar_event_entry_is_skipped_with_diagnostic() {
        let (info, diagnostics) = run(
            json!({ "events": { "press": "bogus", "change": {} } }),
            "Widget",
        );
        assert!(!info.events.contains_key("press"));
        assert!(info.events.contains_key("change"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].code,
            declgen_common::diagnostic_codes::UNSUPPORTED_MEMBER_SHAPE
        );
        assert_eq!(diagnostics[0].member_name.as_deref(), Some("events.press"));
    }

    #[test]
    fn array_entry_is_skipped_but_class_continues() {
        let (info, diagnostics) = run(
            json!({ "properties": { "bad": [1, 2], "good": "int" } }),
            "Widget",
        );
        assert!(!info.properties.contains_key("bad"));
        assert_eq!(info.properties["good"].type_name, "int");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn top_level_scalars_and_defaults() {
        let (info, _) = run(
            json!({
                "library": "demo.lib",
                "abstract": true,
                "interfaces": ["demo.IShrinkable"],
                "defaultAggregation": "items",
            }),
            "Widget",
        );
        assert_eq!(info.library.as_deref(), Some("demo.lib"));
        assert!(info.is_abstract);
        assert!(!info.is_final);
        assert_eq!(info.interfaces, ["demo.IShrinkable"]);
        assert_eq!(info.default_aggregation.as_deref(), Some("items"));
        assert_eq!(info.stereotype, None);
        assert_eq!(info.default_property, None);
    }

    #[test]
    fn designtime_synonyms_and_type_filtering() {
        let (info, _) = run(json!({ "designtime": true }), "W");
        assert_eq!(info.designtime, Some(Designtime::Flag(true)));

        let (info, _) = run(json!({ "designTime": "demo/designtime/W.designtime" }), "W");
        assert_eq!(
            info.designtime,
            Some(Designtime::Module("demo/designtime/W.designtime".to_string()))
        );

        // A non-string, non-boolean value is ignored without a default.
        let (info, _) = run(json!({ "designtime": 5 }), "W");
        assert_eq!(info.designtime, None);
    }

    #[test]
    fn special_settings_have_no_accessors() {
        let (info, _) = run(json!({ "specialSettings": { "id": "sap.ui.core.ID" } }), "W");
        let id = &info.special_settings["id"];
        assert_eq!(id.type_name.as_deref(), Some("sap.ui.core.ID"));
    }
}
