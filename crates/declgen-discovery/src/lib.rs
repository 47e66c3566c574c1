//! Class and base-type discovery.
//!
//! Scans a module's top-level class declarations, resolves each class's
//! ancestry against a type-resolution oracle, and keeps the classes whose
//! chain reaches a registered foundational base type. For those candidates
//! it infers the settings-type reference and constructor-signature
//! completeness, and locates the single declarative metadata block.

pub mod discover;
pub use discover::{Candidate, ConstructorCompleteness, discover};

pub mod input;
pub use input::{ClassDecl, Constructor, FieldMember, ModuleInput, Param, ParamType, TypeRef};

pub mod locator;
pub use locator::{Located, MetadataParser, ParseError, locate_metadata_block};

pub mod oracle;
pub use oracle::{ResolvedType, TableOracle, TypeOracle};

pub mod registry;
pub use registry::{BaseRegistry, FoundationalTier};
