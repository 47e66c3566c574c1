//! Common types and utilities for the declgen workspace.
//!
//! This crate provides foundational types used across all declgen crates:
//! - Coded diagnostics attributable to (source, class, member)
//! - Source identity (`SourceId`)
//! - Centralized guard limits

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes};

// Centralized limits and thresholds
pub mod limits;

pub mod source;
pub use source::SourceId;
