//! Project description: the serialized form of everything a run needs.
//!
//! The embedding front end exports its view of the world once (which
//! fully-qualified names are foundational, the type-resolution table, the
//! injected normalizer configuration) together with the module inputs,
//! and the CLI replays the pipeline over it.

use declgen::discovery::{BaseRegistry, ModuleInput, TableOracle};
use declgen::metadata::normalizer::NormalizeConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescription {
    /// Fully-qualified name to foundational tier.
    #[serde(default)]
    pub registry: BaseRegistry,
    /// Type-reference resolution table backing the oracle.
    #[serde(default)]
    pub types: TableOracle,
    /// Canonical "generic container element" type name used as the
    /// default aggregation/association type.
    pub container_element_type: String,
    #[serde(default)]
    pub modules: Vec<ModuleInput>,
}

impl ProjectDescription {
    pub fn normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            container_element_type: self.container_element_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declgen::{DefaultRenderer, Generator, LiteralParser, MemorySink};

    const SAMPLE: &str = r#"{
        "registry": { "sap.ui.core.Control": "control" },
        "types": {
            "Control": { "fullyQualifiedName": "sap.ui.core.Control" }
        },
        "containerElementType": "sap.ui.core.Control",
        "modules": [{
            "source": "src/Widget.ts",
            "classes": [{
                "name": "Widget",
                "heritage": ["Control"],
                "fields": [{
                    "name": "metadata",
                    "isStatic": true,
                    "initializer": "{ properties: { text: 'string' } }"
                }]
            }]
        }]
    }"#;

    #[test]
    fn sample_project_drives_the_pipeline() {
        let project: ProjectDescription = serde_json::from_str(SAMPLE).unwrap();
        let config = project.normalize_config();
        let parser = LiteralParser;
        let renderer = DefaultRenderer;
        let generator = Generator::new(
            &project.registry,
            &project.types,
            &parser,
            &renderer,
            &config,
        );

        let mut sink = MemorySink::new();
        let outcome = generator.process_module(&project.modules[0], &mut sink);
        assert_eq!(outcome.generated, 1);
        assert!(
            sink.declaration_for("Widget")
                .unwrap()
                .contains("getText(): string;")
        );
    }

    #[test]
    fn missing_container_element_type_is_rejected() {
        let result = serde_json::from_str::<ProjectDescription>(r#"{ "modules": [] }"#);
        assert!(result.is_err());
    }
}
