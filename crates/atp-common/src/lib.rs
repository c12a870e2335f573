//! Common types and utilities for the atp type-checker plugin.
//!
//! This crate provides foundational types used across all atp crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, categories, codes and message templates)
//! - Centralized limits

// String interning for qualified names and parameter names
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message,
};
