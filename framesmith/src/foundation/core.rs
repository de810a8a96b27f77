use std::fmt;

use crate::foundation::error::{FramesmithError, FramesmithResult};

/// 0-based position of a frame within its sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The index following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open index range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> FramesmithResult<Self> {
        if start.0 > end.0 {
            return Err(FramesmithError::validation(format!(
                "frame range start {start} must be <= end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of indices contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Position of `f` once the range is played backwards: `end - 1 - (f - start)`.
    ///
    /// Indices outside the range are returned unchanged.
    pub fn mirror(self, f: FrameIndex) -> FrameIndex {
        if !self.contains(f) {
            return f;
        }
        FrameIndex(self.end.0 - 1 - (f.0 - self.start.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
