/// Easing-driven repeat schedules for fixed-interval encoders.
pub mod resample;
