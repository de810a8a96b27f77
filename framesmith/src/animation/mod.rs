/// Easing curves used to shape playback timing.
pub mod ease;
