//! Source spans.
//!
//! Offsets are opaque `u32` positions that are totally ordered in program
//! order. A parser would use byte offsets; the tree builder uses pre-order
//! node numbers. The binder only ever compares them.

use serde::Serialize;
use std::fmt;

/// Half-open range `[pos, end)` of source offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub pos: u32,
    pub end: u32,
}

impl Span {
    pub const EMPTY: Span = Span { pos: 0, end: 0 };

    #[inline]
    pub const fn new(pos: u32, end: u32) -> Self {
        Span { pos, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.pos
    }

    /// Whether `offset` lies inside this span.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.pos && offset < self.end
    }

    /// Whether `other` lies entirely inside this span.
    #[inline]
    pub const fn contains_span(&self, other: Span) -> bool {
        other.pos >= self.pos && other.end <= self.end
    }

    /// Smallest span covering both.
    pub fn cover(self, other: Span) -> Span {
        Span {
            pos: self.pos.min(other.pos),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}
