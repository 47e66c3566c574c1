//! Metadata normalization engine.
//!
//! Consumes the loosely-typed metadata object of a component class and
//! produces a canonical, typed description of its public API surface:
//! properties, aggregations, associations, events, and special settings,
//! each with deterministically derived accessor method names.
//!
//! ```text
//! { properties: { text: "string" }, events: { press: {} } }
//! ```
//!
//! normalizes (for a class `Widget`) into a [`model::ClassInfo`] whose
//! `text` property carries `getText`/`setText` and whose `press` event
//! carries `attachPress`/`detachPress`/`firePress`.

pub mod model;
pub use model::{Cardinality, ClassInfo, MemberKind};

pub mod naming;

pub mod normalizer;
pub use normalizer::{NormalizeConfig, normalize};

pub mod shorthand;
pub use shorthand::{Expansion, expand};

pub mod singular;
pub use singular::singular_of;
