//! The generation pipeline for one module.
//!
//! Sequences discovery, metadata location/parsing, and normalization, then
//! hands each canonical class description to the renderer and delivers
//! non-empty results to the sink. Failure propagation is strictly bounded:
//! a member never fails its class, a class never fails its module, a
//! module never fails the run. No retries.

use crate::render::{DeclarationRenderer, RenderInput};
use crate::sink::OutputSink;
use declgen_common::{Diagnostic, diagnostic_codes};
use declgen_discovery::{
    BaseRegistry, Located, MetadataParser, ModuleInput, TypeOracle, TypeRef, discover,
    locate_metadata_block, locator::has_generatable_sections,
};
use declgen_metadata::normalizer::{NormalizeConfig, normalize};
use serde_json::Value;

/// Immutable wiring for a run. Holds no per-module state, so one
/// `Generator` can serve any number of modules, from any number of
/// threads.
pub struct Generator<'a, O, P, R> {
    registry: &'a BaseRegistry,
    oracle: &'a O,
    parser: &'a P,
    renderer: &'a R,
    config: &'a NormalizeConfig,
}

/// Per-module result. Diagnostics carry everything reportable; the counts
/// summarize it for the caller.
#[derive(Debug, Default)]
pub struct ModuleOutcome {
    /// Declaration units delivered to the sink.
    pub generated: usize,
    /// Candidates with nothing to generate (no or ambiguous metadata
    /// block, no generatable sections, or an empty surface).
    pub skipped: usize,
    /// Classes dropped over an error.
    pub failed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ModuleOutcome {
    pub fn had_errors(&self) -> bool {
        self.failed > 0
    }
}

impl<'a, O, P, R> Generator<'a, O, P, R>
where
    O: TypeOracle,
    P: MetadataParser,
    R: DeclarationRenderer,
{
    pub fn new(
        registry: &'a BaseRegistry,
        oracle: &'a O,
        parser: &'a P,
        renderer: &'a R,
        config: &'a NormalizeConfig,
    ) -> Self {
        Self {
            registry,
            oracle,
            parser,
            renderer,
            config,
        }
    }

    /// Runs the pipeline over one module's classes.
    pub fn process_module(&self, module: &ModuleInput, sink: &mut dyn OutputSink) -> ModuleOutcome {
        let span = tracing::debug_span!("process_module", source = %module.source);
        let _entered = span.enter();

        let mut outcome = ModuleOutcome::default();
        let candidates = discover(module, self.registry, self.oracle, &mut outcome.diagnostics);
        // Discovery-level errors each dropped one class.
        outcome.failed = outcome
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_error())
            .count();

        for candidate in candidates {
            let class = &module.classes[candidate.class_index];

            let block = match locate_metadata_block(class) {
                Located::Block(block) => block,
                Located::NothingToGenerate => {
                    outcome.skipped += 1;
                    continue;
                }
            };

            let parsed = match self.parser.parse(block) {
                Ok(parsed) => parsed,
                Err(error) => {
                    outcome.diagnostics.push(
                        Diagnostic::error(
                            diagnostic_codes::MALFORMED_METADATA_BLOCK,
                            module.source.as_str(),
                            format!("cannot parse metadata block: {error}"),
                        )
                        .with_class(&class.name),
                    );
                    outcome.failed += 1;
                    continue;
                }
            };

            if !has_generatable_sections(&parsed) {
                tracing::debug!(class = %class.name, "no generatable sections; skipping");
                outcome.skipped += 1;
                continue;
            }
            let Value::Object(raw) = parsed else {
                // has_generatable_sections admits only objects.
                outcome.skipped += 1;
                continue;
            };

            let info = normalize(
                &raw,
                &class.name,
                &module.source,
                self.config,
                &mut outcome.diagnostics,
            );

            let rendered = self.renderer.render(&RenderInput {
                class: &info,
                settings_type: candidate.settings_type.as_ref().map(TypeRef::as_str),
                completeness: candidate.completeness,
                tier: candidate.tier,
            });
            let Some(declaration) = rendered else {
                outcome.skipped += 1;
                continue;
            };

            match sink.accept(&module.source, &class.name, &declaration) {
                Ok(()) => outcome.generated += 1,
                Err(error) => {
                    outcome.diagnostics.push(
                        Diagnostic::error(
                            diagnostic_codes::OUTPUT_WRITE_FAILED,
                            module.source.as_str(),
                            format!("cannot deliver declaration unit: {error}"),
                        )
                        .with_class(&class.name),
                    );
                    outcome.failed += 1;
                }
            }
        }

        tracing::debug!(
            generated = outcome.generated,
            skipped = outcome.skipped,
            failed = outcome.failed,
            "module processed"
        );
        outcome
    }
}
