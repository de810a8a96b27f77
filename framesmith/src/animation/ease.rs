use std::f64::consts::PI;
use std::str::FromStr;

use crate::foundation::error::FramesmithError;

/// Progress-shaping function sampled by the temporal resampler.
///
/// Input is normalized progress in `[0, 1]`; the output range is unconstrained.
pub trait EasingCurve {
    /// Evaluate the curve at progress `x`.
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> EasingCurve for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Built-in easing functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in/out.
    InOutExpo,
}

impl Ease {
    /// Every built-in curve, in declaration order.
    pub const ALL: [Ease; 19] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => in_out(t, 2),
            Self::InCubic => t.powi(3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out(t, 3),
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out(t, 4),
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out(t, 5),
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Kebab-case name accepted by [`Ease::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in-quad",
            Self::OutQuad => "out-quad",
            Self::InOutQuad => "in-out-quad",
            Self::InCubic => "in-cubic",
            Self::OutCubic => "out-cubic",
            Self::InOutCubic => "in-out-cubic",
            Self::InQuart => "in-quart",
            Self::OutQuart => "out-quart",
            Self::InOutQuart => "in-out-quart",
            Self::InQuint => "in-quint",
            Self::OutQuint => "out-quint",
            Self::InOutQuint => "in-out-quint",
            Self::InSine => "in-sine",
            Self::OutSine => "out-sine",
            Self::InOutSine => "in-out-sine",
            Self::InExpo => "in-expo",
            Self::OutExpo => "out-expo",
            Self::InOutExpo => "in-out-expo",
        }
    }
}

// Polynomial in/out of degree `n`: `2^(n-1) t^n` on the first half, mirrored on the second.
fn in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(n) / 2.0)
    }
}

impl EasingCurve for Ease {
    fn evaluate(&self, x: f64) -> f64 {
        self.apply(x)
    }
}

impl FromStr for Ease {
    type Err = FramesmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| FramesmithError::invalid_easing(format!("unknown easing '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
