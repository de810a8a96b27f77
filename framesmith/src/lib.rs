//! framesmith keeps rendered animation frames on disk as an indexed sequence and turns that
//! sequence into a timed animation.
//!
//! # Overview
//!
//! 1. **Store**: effects append frames to a [`FrameStore`]; each lands as `<index>-<stem><ext>`.
//! 2. **Reorder**: the store reverses, duplicates and renumbers frames by renaming files through
//!    a two-phase protocol, keeping indices unique at every step.
//! 3. **Schedule**: [`resample`] turns an easing curve and a total duration into a
//!    per-frame repeat count played at one flat interval.
//! 4. **Encode**: an [`AnimationEncoder`] such as [`GifEncoder`] writes the played frames.
//!
//! [`draw_animation`] runs steps 3 and 4 over a store in one call.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod config;
mod encode;
mod foundation;
mod pipeline;
mod store;
mod timing;

pub use animation::ease::{Ease, EasingCurve};
pub use assets::codec::{BytesCodec, ImageCodec, PayloadCodec};
pub use config::project::{AnimationOpts, OutputConfig, ProjectConfig, StoreOpts};
pub use encode::gif::GifEncoder;
pub use encode::memory::InMemoryEncoder;
pub use encode::{AnimationEncoder, FrameTiming, ensure_parent_dir};
pub use foundation::core::{FrameIndex, FrameRange};
pub use foundation::error::{FramesmithError, FramesmithResult};
pub use pipeline::draw::{DrawStats, draw_animation, draw_animation_with, explode_gif};
pub use store::frame_store::{Frame, FrameStore};
pub use store::naming::{SequenceIdentity, TEMP_TOKEN};
pub use timing::resample::{MAX_EXPANDED_FRAMES, PlaybackSchedule, TemporalBudget, resample};
