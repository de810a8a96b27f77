use std::path::{Path, PathBuf};

use crate::encode::{AnimationEncoder, FrameTiming};
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// In-memory encoder for tests and debugging. Writes nothing to disk.
#[derive(Debug)]
pub struct InMemoryEncoder<T> {
    /// Frames of the last encode, in play order.
    pub(crate) frames: Vec<T>,
    timing: Option<FrameTiming>,
    looping: bool,
    out_path: Option<PathBuf>,
}

impl<T> Default for InMemoryEncoder<T> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            timing: None,
            looping: false,
            out_path: None,
        }
    }
}

impl<T: Clone> InMemoryEncoder<T> {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[T] {
        &self.frames
    }

    /// Timing passed to the last encode, if any.
    pub fn timing(&self) -> Option<&FrameTiming> {
        self.timing.as_ref()
    }

    /// Loop flag passed to the last encode.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Output path passed to the last encode, if any.
    pub fn out_path(&self) -> Option<&Path> {
        self.out_path.as_deref()
    }
}

impl<T: Clone> AnimationEncoder for InMemoryEncoder<T> {
    type Frame = T;

    fn encode(
        &mut self,
        frames: &[&T],
        timing: &FrameTiming,
        looping: bool,
        out_path: &Path,
    ) -> FramesmithResult<()> {
        if frames.is_empty() {
            return Err(FramesmithError::sequence_empty("no frames to encode"));
        }
        timing.check_len(frames.len())?;
        self.frames = frames.iter().map(|f| (*f).clone()).collect();
        self.timing = Some(timing.clone());
        self.looping = looping;
        self.out_path = Some(out_path.to_path_buf());
        Ok(())
    }
}
