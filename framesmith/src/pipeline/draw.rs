use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use image::AnimationDecoder as _;
use image::DynamicImage;
use image::codecs::gif::GifDecoder;

use crate::animation::ease::EasingCurve;
use crate::assets::codec::PayloadCodec;
use crate::config::project::AnimationOpts;
use crate::encode::{AnimationEncoder, FrameTiming};
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::store::frame_store::FrameStore;
use crate::timing::resample::{TemporalBudget, resample};

/// Summary of one [`draw_animation`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawStats {
    /// Frames read from the store.
    pub source_frames: usize,
    /// Frames written to the encoder after repetition.
    pub encoded_frames: usize,
    /// Duration of each encoded frame, in milliseconds.
    pub unit_duration_ms: u64,
}

/// Encode every frame of `store`, in index order, using `opts`.
pub fn draw_animation<C, E>(
    store: &FrameStore<C>,
    opts: &AnimationOpts,
    encoder: &mut E,
    out_path: &Path,
) -> FramesmithResult<DrawStats>
where
    C: PayloadCodec,
    E: AnimationEncoder<Frame = C::Payload>,
{
    let curve = opts.ease.as_ref().map(|e| e as &dyn EasingCurve);
    draw_animation_with(
        store,
        &opts.timing,
        curve,
        opts.loop_forever,
        encoder,
        out_path,
    )
}

/// [`draw_animation`] with an arbitrary easing curve.
pub fn draw_animation_with<C, E>(
    store: &FrameStore<C>,
    timing: &TemporalBudget,
    curve: Option<&dyn EasingCurve>,
    looping: bool,
    encoder: &mut E,
    out_path: &Path,
) -> FramesmithResult<DrawStats>
where
    C: PayloadCodec,
    E: AnimationEncoder<Frame = C::Payload>,
{
    let frames = store.list_ordered()?;
    if frames.is_empty() {
        return Err(FramesmithError::sequence_empty(format!(
            "no frames found for '{}' in '{}'",
            store.identity().stem(),
            store.identity().dir().display()
        )));
    }
    // Validate the schedule before paying for decoding.
    let schedule = resample(frames.len(), curve, timing)?;

    let payloads = frames
        .iter()
        .map(|f| store.load(f))
        .collect::<FramesmithResult<Vec<_>>>()?;
    let played = schedule.expand(&payloads)?;

    encoder.encode(
        &played,
        &FrameTiming::Flat(schedule.unit_duration_ms),
        looping,
        out_path,
    )?;

    let stats = DrawStats {
        source_frames: payloads.len(),
        encoded_frames: played.len(),
        unit_duration_ms: schedule.unit_duration_ms,
    };
    tracing::info!(
        source = stats.source_frames,
        encoded = stats.encoded_frames,
        unit_ms = stats.unit_duration_ms,
        out = %out_path.display(),
        "drew animation"
    );
    Ok(stats)
}

/// Decode every frame of the GIF at `gif_path` and append it to `store`.
///
/// Returns the number of frames appended. A decode failure part way stops the import; frames
/// appended before it stay in the store.
pub fn explode_gif<C>(gif_path: &Path, store: &mut FrameStore<C>) -> FramesmithResult<usize>
where
    C: PayloadCodec<Payload = DynamicImage>,
{
    let file = File::open(gif_path).map_err(|e| FramesmithError::io("open", gif_path, e))?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("read gif header '{}'", gif_path.display()))?;

    let mut appended = 0usize;
    for frame in decoder.into_frames() {
        let frame = frame.with_context(|| {
            format!("decode gif frame {appended} of '{}'", gif_path.display())
        })?;
        store.append(&DynamicImage::ImageRgba8(frame.into_buffer()))?;
        appended += 1;
    }
    tracing::debug!(appended, gif = %gif_path.display(), "exploded gif into frames");
    Ok(appended)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/draw.rs"]
mod tests;
