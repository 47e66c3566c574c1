//! Diagnostics for the generation pipeline.
//!
//! Every diagnostic is attributable to a (source, class, member) triple so a
//! caller can act on it without replaying the run. Propagation is strictly
//! bounded: member-level issues never escalate to class level, class-level
//! issues never escalate to module level, and module-level issues never
//! escalate to the run.

use serde::Serialize;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Message,
}

/// Stable numeric codes for the diagnostic taxonomy.
pub mod diagnostic_codes {
    /// A declared heritage or settings type reference could not be resolved.
    /// Fatal for the affected class.
    pub const UNRESOLVED_TYPE_REFERENCE: u32 = 1001;
    /// The relaxed-syntax parser rejected a metadata block. Fatal for the
    /// affected class only.
    pub const MALFORMED_METADATA_BLOCK: u32 = 1002;
    /// A metadata entry is neither a scalar shorthand nor a record. The
    /// member is skipped; the class continues.
    pub const UNSUPPORTED_MEMBER_SHAPE: u32 = 1101;
    /// The class does not declare the full set of constructor signatures.
    /// Informational; never blocks generation.
    pub const MISSING_CONSTRUCTOR_SIGNATURES: u32 = 1201;
    /// A generated declaration unit could not be delivered to the sink.
    pub const OUTPUT_WRITE_FAILED: u32 = 1301;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Identity of the source the affected class came from.
    pub source: String,
    pub class_name: Option<String>,
    pub member_name: Option<String>,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(code: u32, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Error, code, source, message)
    }

    pub fn warning(code: u32, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Warning, code, source, message)
    }

    pub fn message(code: u32, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Message, code, source, message)
    }

    fn new(
        category: DiagnosticCategory,
        code: u32,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            source: source.into(),
            class_name: None,
            member_name: None,
            message_text: message.into(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_member(mut self, member_name: impl Into<String>) -> Self {
        self.member_name = Some(member_name.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "info",
        };
        write!(f, "{severity} DG{}: {}", self.code, self.message_text)?;
        write!(f, " [{}", self.source)?;
        if let Some(class) = &self.class_name {
            write!(f, ", class {class}")?;
            if let Some(member) = &self.member_name {
                write!(f, ", member {member}")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_full_attribution() {
        let diag = Diagnostic::warning(
            diagnostic_codes::UNSUPPORTED_MEMBER_SHAPE,
            "src/Widget.ts",
            "entry is neither a scalar shorthand nor a record",
        )
        .with_class("Widget")
        .with_member("press");

        let rendered = diag.to_string();
        assert!(rendered.contains("DG1101"), "{rendered}");
        assert!(rendered.contains("src/Widget.ts"), "{rendered}");
        assert!(rendered.contains("class Widget"), "{rendered}");
        assert!(rendered.contains("member press"), "{rendered}");
    }

    #[test]
    fn member_attribution_requires_class_attribution() {
        // A member name without a class name is meaningless; Display drops it.
        let diag = Diagnostic::error(
            diagnostic_codes::MALFORMED_METADATA_BLOCK,
            "src/Widget.ts",
            "unexpected token",
        )
        .with_member("orphan");
        assert!(!diag.to_string().contains("orphan"));
    }

    #[test]
    fn error_category_is_detectable() {
        let err = Diagnostic::error(diagnostic_codes::UNRESOLVED_TYPE_REFERENCE, "a.ts", "x");
        let info = Diagnostic::message(diagnostic_codes::MISSING_CONSTRUCTOR_SIGNATURES, "a.ts", "x");
        assert!(err.is_error());
        assert!(!info.is_error());
    }
}
