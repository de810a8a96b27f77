use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder as ImageGifEncoder, Repeat};
use image::{Delay, DynamicImage};

use crate::encode::{AnimationEncoder, FrameTiming, ensure_parent_dir};
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Writes `DynamicImage` frames as an animated GIF.
#[derive(Clone, Copy, Debug)]
pub struct GifEncoder {
    /// Palette quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifEncoder {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl GifEncoder {
    /// Encoder with the given quantization speed, clamped to `1..=30`.
    pub fn with_speed(speed: i32) -> Self {
        Self {
            speed: speed.clamp(1, 30),
        }
    }
}

impl AnimationEncoder for GifEncoder {
    type Frame = DynamicImage;

    fn encode(
        &mut self,
        frames: &[&DynamicImage],
        timing: &FrameTiming,
        looping: bool,
        out_path: &Path,
    ) -> FramesmithResult<()> {
        if frames.is_empty() {
            return Err(FramesmithError::sequence_empty("no frames to encode"));
        }
        timing.check_len(frames.len())?;

        ensure_parent_dir(out_path)?;
        let file = File::create(out_path).map_err(|e| FramesmithError::io("create", out_path, e))?;
        let mut enc = ImageGifEncoder::new_with_speed(BufWriter::new(file), self.speed);
        // Without a loop extension the GIF plays once.
        if looping {
            enc.set_repeat(Repeat::Infinite)
                .context("set gif repeat")?;
        }

        for (i, frame) in frames.iter().enumerate() {
            let ms = timing.duration_ms(i).unwrap_or_default();
            let delay = Delay::from_numer_denom_ms(u32::try_from(ms).unwrap_or(u32::MAX), 1);
            let frame = image::Frame::from_parts(frame.to_rgba8(), 0, 0, delay);
            enc.encode_frame(frame)
                .with_context(|| format!("encode gif frame {i} into '{}'", out_path.display()))?;
        }
        tracing::debug!(frames = frames.len(), path = %out_path.display(), "wrote gif");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
