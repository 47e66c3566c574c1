//! Centralized limits and thresholds for the generation pipeline.
//!
//! Centralizing these values prevents duplicate definitions with
//! inconsistent values and documents the rationale for each limit.

/// Maximum depth for the base-type ancestry walk.
///
/// Discovery resolves a class's heritage chain depth-first against the
/// type-resolution oracle. Well-formed inputs terminate quickly (framework
/// hierarchies are a handful of levels deep), but a misbehaving oracle can
/// produce cyclic or unbounded chains; the walk carries a visited set and
/// bails out at this depth.
pub const MAX_BASE_CHAIN_DEPTH: u32 = 64;
