//! declgen derives typed API-surface declarations from component
//! metadata.
//!
//! A class written against the component framework convention extends one
//! of a few foundational base types and carries a single static `metadata`
//! field:
//!
//! ```text
//! class Widget extends Control {
//!     static metadata = {
//!         properties: { text: "string" },
//!         events: { press: {} },
//!     };
//! }
//! ```
//!
//! From that block the pipeline derives the class's public API surface
//! (`getText`, `setText`, `attachPress`, ...) and emits a companion
//! declaration unit describing that surface plus a construction-time
//! settings shape.
//!
//! The pipeline: discovery ([`declgen_discovery`]) finds candidate classes
//! and locates their metadata block; the normalizer
//! ([`declgen_metadata`]) turns the parsed block into a canonical
//! [`declgen_metadata::ClassInfo`]; the [`orchestrator`] sequences the two
//! and hands results to a renderer and an output sink.

// Convenience re-exports for embedders and the CLI.
pub use declgen_common as common;
pub use declgen_discovery as discovery;
pub use declgen_metadata as metadata;

pub mod literal;
pub use literal::LiteralParser;

pub mod orchestrator;
pub use orchestrator::{Generator, ModuleOutcome};

pub mod render;
pub use render::{DeclarationRenderer, DefaultRenderer, RenderInput};

pub mod sink;
pub use sink::{FileSink, MemorySink, OutputSink};
