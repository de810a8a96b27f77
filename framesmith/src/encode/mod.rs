//! Animation encoders.
//!
//! Encoders receive the played frame list in order (repeats already expanded) and write one
//! artifact. They know nothing about how frames were stored or scheduled.

/// Animated GIF output through the `image` crate.
pub mod gif;
/// Encoder that keeps frames in memory.
pub mod memory;

use std::path::Path;

use crate::foundation::error::{FramesmithError, FramesmithResult};

/// How long each played frame is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameTiming {
    /// Every frame shows for the same number of milliseconds.
    Flat(u64),
    /// One duration per frame, in milliseconds.
    PerFrame(Vec<u64>),
}

impl FrameTiming {
    /// Duration of frame `i`, or `None` when a per-frame list is too short.
    pub fn duration_ms(&self, i: usize) -> Option<u64> {
        match self {
            Self::Flat(ms) => Some(*ms),
            Self::PerFrame(list) => list.get(i).copied(),
        }
    }

    /// Check that the timing covers exactly `frame_count` frames.
    pub fn check_len(&self, frame_count: usize) -> FramesmithResult<()> {
        if let Self::PerFrame(list) = self
            && list.len() != frame_count
        {
            return Err(FramesmithError::validation(format!(
                "per-frame timing has {} entries for {frame_count} frames",
                list.len()
            )));
        }
        Ok(())
    }
}

/// Sink contract for writing a finished animation.
pub trait AnimationEncoder {
    /// Frame payload type the encoder consumes.
    type Frame;

    /// Encode `frames` in order with `timing` and write the result to `out_path`.
    ///
    /// `looping` requests endless playback; otherwise the animation plays once.
    fn encode(
        &mut self,
        frames: &[&Self::Frame],
        timing: &FrameTiming,
        looping: bool,
        out_path: &Path,
    ) -> FramesmithResult<()>;
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> FramesmithResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| FramesmithError::io("create output directory", parent, e))?;
    }
    Ok(())
}
