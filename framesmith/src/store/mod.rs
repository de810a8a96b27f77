//! On-disk indexed frame sequences.
//!
//! Frames of one sequence live side by side in a directory as `<index>-<stem><ext>`. The
//! [`FrameStore`](frame_store::FrameStore) assigns indices on append and rewrites file names in
//! batches (reindex, reverse, duplicate) through a two-phase rename so no frame is ever
//! overwritten by another one mid-batch.

/// Index assignment, recovery and batch reordering.
pub mod frame_store;
/// File-name encoding of frame indices.
pub mod naming;
