//! Module input model.
//!
//! Plain-data view of a module's top-level class declarations, reduced to
//! what discovery needs: class names, heritage type references, fields
//! (with modifiers and initializer text), and constructor signatures.
//! The embedding caller produces these from its own front end; the CLI
//! deserializes them from a project description.

use declgen_common::SourceId;
use serde::{Deserialize, Serialize};

/// An opaque type reference as written in source. Only the oracle assigns
/// it meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One module: an identity plus its ordered top-level class declarations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInput {
    pub source: SourceId,
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    pub name: String,
    /// Declared heritage type references, in declaration order. No
    /// stability guarantee is made about tie-breaking when more than one
    /// is declared; the walk simply takes them in order.
    #[serde(default)]
    pub heritage: Vec<TypeRef>,
    #[serde(default)]
    pub fields: Vec<FieldMember>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
}

/// A field member, with just enough shape to locate the metadata block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMember {
    pub name: String,
    /// Owner-level (`static`) rather than instance-level.
    #[serde(default)]
    pub is_static: bool,
    /// Source text of the initializer, when the field has one.
    #[serde(default)]
    pub initializer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    #[serde(default)]
    pub params: Vec<Param>,
    /// Whether this declaration carries an implementation body (overload
    /// signatures do not).
    #[serde(default)]
    pub has_body: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(rename = "type")]
    pub ty: ParamType,
}

/// Declared type of a constructor parameter.
///
/// Settings inference only accepts [`ParamType::Named`]; everything the
/// front end cannot express as a plain named reference or a string /
/// union of those collapses to [`ParamType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamType {
    String,
    Named(TypeRef),
    Union(Vec<ParamType>),
    Other,
}

impl ParamType {
    pub fn as_named(&self) -> Option<&TypeRef> {
        match self {
            ParamType::Named(type_ref) => Some(type_ref),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        *self == ParamType::String
    }

    /// Whether this is a union admitting both a plain string and the given
    /// named reference (the shape of an id-or-settings first parameter).
    pub fn admits_string_or(&self, named: &TypeRef) -> bool {
        match self {
            ParamType::Union(arms) => {
                arms.iter().any(ParamType::is_string)
                    && arms.iter().any(|arm| arm.as_named() == Some(named))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_admits_string_or_named() {
        let settings = TypeRef::new("$WidgetSettings");
        let union = ParamType::Union(vec![
            ParamType::String,
            ParamType::Named(settings.clone()),
        ]);
        assert!(union.admits_string_or(&settings));
        assert!(!union.admits_string_or(&TypeRef::new("$OtherSettings")));
        assert!(!ParamType::String.admits_string_or(&settings));
        assert!(!ParamType::Named(settings.clone()).admits_string_or(&settings));
    }

    #[test]
    fn module_input_deserializes_from_project_description() {
        let module: ModuleInput = serde_json::from_str(
            r#"{
                "source": "src/Widget.ts",
                "classes": [{
                    "name": "Widget",
                    "heritage": ["Control"],
                    "fields": [{ "name": "metadata", "isStatic": true, "initializer": "{}" }],
                    "constructors": [{
                        "params": [
                            { "name": "id", "optional": true, "type": { "union": ["string", { "named": "$WidgetSettings" }] } }
                        ]
                    }]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(module.classes.len(), 1);
        let class = &module.classes[0];
        assert_eq!(class.heritage, [TypeRef::new("Control")]);
        assert!(class.fields[0].is_static);
        assert!(!class.constructors[0].has_body);
        assert!(
            class.constructors[0].params[0]
                .ty
                .admits_string_or(&TypeRef::new("$WidgetSettings"))
        );
    }
}
