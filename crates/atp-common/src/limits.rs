//! Centralized limits and thresholds.
//!
//! # Categories
//!
//! - **Recursion Depths**: Limits to prevent stack overflow when walking type trees
//! - **Expansion Bounds**: How far finite approximations of variadic features go

// =============================================================================
// Expansion Bounds
// =============================================================================

/// Highest arity synthesized for variadic forwarding.
///
/// A decorated `start_soon(fn, *args)` expands into one overload per arity in
/// `0..=DEFAULT_MAX_FORWARDED_ARITY`, so the default produces four overloads.
/// Calls forwarding more positional arguments than this fail overload
/// resolution in the host. Configurable through `PluginConfig`.
pub const DEFAULT_MAX_FORWARDED_ARITY: usize = 3;

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for the reference subtype checker.
///
/// Deeper comparisons are treated as failures rather than recursing further.
pub const MAX_SUBTYPE_DEPTH: u32 = 64;

/// Maximum nesting depth rendered by the type formatter before eliding with `...`.
pub const MAX_FORMAT_DEPTH: u32 = 32;
