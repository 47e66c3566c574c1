//! Metadata block locator.
//!
//! Within a candidate class, the declarative metadata block is the single
//! owner-level field named by the reserved identifier that carries an
//! initializer. Zero or more than one such field means there is nothing to
//! generate for the class; it is not an error.

use crate::input::ClassDecl;
use serde_json::Value;
use std::fmt;

/// The one reserved field name carrying the declarative metadata block.
pub const METADATA_FIELD: &str = "metadata";

/// Sections that warrant generating anything at all. A parsed block with
/// none of these present is also "nothing to generate".
pub const GENERATABLE_SECTIONS: [&str; 4] =
    ["properties", "aggregations", "associations", "events"];

/// Outcome of locating the metadata block in one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located<'a> {
    /// Exactly one owner-level metadata field with an initializer; its
    /// initializer source text.
    Block(&'a str),
    /// Zero or ambiguous (more than one) metadata fields.
    NothingToGenerate,
}

/// Finds the single declarative metadata field of a candidate class.
pub fn locate_metadata_block(class: &ClassDecl) -> Located<'_> {
    let mut block = None;
    for field in &class.fields {
        if !field.is_static || field.name != METADATA_FIELD {
            continue;
        }
        let Some(initializer) = field.initializer.as_deref() else {
            continue;
        };
        if block.is_some() {
            tracing::debug!(
                class = %class.name,
                "more than one metadata field; nothing to generate"
            );
            return Located::NothingToGenerate;
        }
        block = Some(initializer);
    }
    match block {
        Some(text) => Located::Block(text),
        None => Located::NothingToGenerate,
    }
}

/// Whether a successfully parsed metadata object carries any section that
/// warrants generation.
pub fn has_generatable_sections(metadata: &Value) -> bool {
    match metadata {
        Value::Object(map) => GENERATABLE_SECTIONS
            .iter()
            .any(|section| map.contains_key(*section)),
        _ => false,
    }
}

/// Failure of the relaxed-syntax parser, with the byte offset of the
/// offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for ParseError {}

/// The external relaxed-syntax object-literal parser. Implementations
/// tolerate comments, unquoted keys, and trailing commas.
pub trait MetadataParser {
    fn parse(&self, text: &str) -> Result<Value, ParseError>;
}
