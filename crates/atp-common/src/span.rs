//! Source spans.
//!
//! A `Span` is the location handle a host attaches to each call site. Rules
//! never interpret it; they only pass it back when reporting.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A span with no source position (synthesized call sites).
    #[inline]
    #[must_use]
    pub const fn dummy() -> Self {
        Self {
            start: u32::MAX,
            end: u32::MAX,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_dummy(&self) -> bool {
        self.start == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
