//! Text range for cursor positions and replaced spans.

/// A range in text, in UTF-8 byte offsets.
///
/// When `start == end` this is a cursor position. `start` may be greater than
/// `end`; use [`min`](Self::min) and [`max`](Self::max) for ordered access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed range (cursor) at the given position.
    pub const fn cursor(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns true if this range is collapsed (cursor, not a span).
    pub const fn collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Length of the range in bytes.
    pub fn length(&self) -> usize {
        self.end.abs_diff(self.start)
    }

    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Coerces the range to be within `[0, max]`.
    pub fn coerce_in(&self, max: usize) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }
}
