use crate::animation::ease::EasingCurve;
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Upper bound on the number of units a schedule may expand to.
///
/// Curve output is unconstrained, so a steep or infinite curve can ask for any repeat count;
/// schedules above this bound are rejected instead of clamped.
pub const MAX_EXPANDED_FRAMES: u64 = 1 << 20;

/// Duration budget for a playback.
///
/// With `total_ms` set, frames are repeated to follow an easing curve within that total.
/// Without it, every frame plays once for `per_frame_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemporalBudget {
    /// Fixed duration per frame, used when no total is given.
    pub per_frame_ms: u64,
    /// Target duration of the whole playback.
    pub total_ms: Option<u64>,
}

impl Default for TemporalBudget {
    fn default() -> Self {
        Self {
            per_frame_ms: 300,
            total_ms: None,
        }
    }
}

impl TemporalBudget {
    /// Fixed per-frame timing without resampling.
    pub fn per_frame(ms: u64) -> Self {
        Self {
            per_frame_ms: ms,
            total_ms: None,
        }
    }

    /// Eased timing within `ms` in total.
    pub fn total(ms: u64) -> Self {
        Self {
            total_ms: Some(ms),
            ..Self::default()
        }
    }
}

/// Per-frame repeat counts played at one flat unit duration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackSchedule {
    /// Duration of every played unit, in milliseconds.
    pub unit_duration_ms: u64,
    /// How many consecutive units each source frame occupies. Never zero.
    pub repeats: Vec<u64>,
}

impl PlaybackSchedule {
    /// Number of source frames the schedule was built for.
    pub fn source_len(&self) -> usize {
        self.repeats.len()
    }

    /// Number of units in the expanded playback, saturating at `u64::MAX`.
    pub fn expanded_len(&self) -> u64 {
        self.repeats
            .iter()
            .fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    /// Exact expanded length, or a validation error above [`MAX_EXPANDED_FRAMES`].
    pub fn checked_expanded_len(&self) -> FramesmithResult<u64> {
        self.repeats
            .iter()
            .try_fold(0u64, |acc, &n| acc.checked_add(n))
            .filter(|&len| len <= MAX_EXPANDED_FRAMES)
            .ok_or_else(|| {
                FramesmithError::validation(format!(
                    "schedule expands past {MAX_EXPANDED_FRAMES} frames"
                ))
            })
    }

    /// Total playback duration in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.expanded_len().saturating_mul(self.unit_duration_ms)
    }

    /// Repeat each item of `items` according to the schedule, preserving order.
    pub fn expand<'a, T>(&self, items: &'a [T]) -> FramesmithResult<Vec<&'a T>> {
        if items.len() != self.repeats.len() {
            return Err(FramesmithError::validation(format!(
                "schedule covers {} frames, got {}",
                self.repeats.len(),
                items.len()
            )));
        }
        let len = self.checked_expanded_len()?;
        let mut out = Vec::with_capacity(len as usize);
        for (item, &n) in items.iter().zip(&self.repeats) {
            for _ in 0..n {
                out.push(item);
            }
        }
        Ok(out)
    }
}

/// Build the playback schedule for `frame_count` frames under `budget`.
///
/// With a total duration, the unit duration is `total / frame_count` and the curve is sampled at
/// `frame_count` evenly spaced progress values. Each frame repeats `floor(delta * frame_count)`
/// times, where `delta` is the change in curve output since the previous sample (the first
/// against 0), raised to at least 1 so no frame is dropped. The repeat total is an
/// approximation of `frame_count` and is not corrected, but a schedule expanding past
/// [`MAX_EXPANDED_FRAMES`] units is a validation error.
pub fn resample(
    frame_count: usize,
    curve: Option<&dyn EasingCurve>,
    budget: &TemporalBudget,
) -> FramesmithResult<PlaybackSchedule> {
    if frame_count == 0 {
        return Err(FramesmithError::sequence_empty(
            "cannot build a playback schedule for zero frames",
        ));
    }

    let Some(total_ms) = budget.total_ms else {
        return Ok(PlaybackSchedule {
            unit_duration_ms: budget.per_frame_ms,
            repeats: vec![1; frame_count],
        });
    };
    let Some(curve) = curve else {
        return Err(FramesmithError::invalid_easing(
            "a total duration was given but no easing curve",
        ));
    };
    if total_ms == 0 {
        return Err(FramesmithError::validation(
            "total duration must be greater than zero",
        ));
    }

    let n = frame_count as f64;
    let mut repeats = Vec::with_capacity(frame_count);
    let mut prev = 0.0;
    for k in 0..frame_count {
        let y = curve.evaluate(progress_at(k, frame_count));
        repeats.push(repeat_count(y - prev, n));
        prev = y;
    }

    let schedule = PlaybackSchedule {
        unit_duration_ms: total_ms / frame_count as u64,
        repeats,
    };
    let expanded = schedule.checked_expanded_len()?;
    tracing::debug!(
        frames = frame_count,
        total_ms,
        unit_ms = schedule.unit_duration_ms,
        expanded,
        "resampled playback"
    );
    Ok(schedule)
}

// Evenly spaced over [0, 1] with both ends included; a single frame sits at 0.
fn progress_at(k: usize, frame_count: usize) -> f64 {
    if frame_count < 2 {
        return 0.0;
    }
    k as f64 / (frame_count - 1) as f64
}

fn repeat_count(delta: f64, frame_count: f64) -> u64 {
    // `as` saturates: NaN and negatives become 0 and are raised to 1 with everything else.
    ((delta * frame_count).floor() as u64).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/resample.rs"]
mod tests;
