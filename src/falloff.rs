//! Piecewise-linear falloff curves.
//!
//! A [`FalloffCurve`] maps the normalised distance `t = r / radius_of_influence`
//! to a force multiplier.  Keys are `(t, value)` pairs sorted by `t`; evaluation
//! interpolates linearly between neighbours and holds the end values outside the
//! key range.  A curve with no keys is undefined everywhere and evaluates to
//! `0.0`.
//!
//! In TOML a curve is written as an array of pairs:
//!
//! ```toml
//! falloff = [[0.0, 1.0], [0.8, 1.0], [1.0, 0.0]]
//! ```

use serde::Deserialize;

use crate::error::{GravityError, GravityResult};

/// One control point of a [`FalloffCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FalloffKey {
    /// Normalised distance in `[0, 1]`.
    pub t: f32,
    /// Multiplier at `t`.  Negative values are allowed in the data but are
    /// clamped to zero by the force law.
    pub value: f32,
}

/// Normalised-distance → multiplier mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<(f32, f32)>")]
pub struct FalloffCurve {
    keys: Vec<FalloffKey>,
}

impl FalloffCurve {
    /// Build a curve from keys, rejecting unsorted, non-finite or out-of-range `t`.
    pub fn new(keys: Vec<FalloffKey>) -> GravityResult<Self> {
        for (index, key) in keys.iter().enumerate() {
            if !key.t.is_finite() || !key.value.is_finite() {
                return Err(GravityError::InvalidFalloff {
                    index,
                    reason: "key is not finite",
                });
            }
            if !(0.0..=1.0).contains(&key.t) {
                return Err(GravityError::InvalidFalloff {
                    index,
                    reason: "t must lie in [0, 1]",
                });
            }
            if index > 0 && key.t < keys[index - 1].t {
                return Err(GravityError::InvalidFalloff {
                    index,
                    reason: "keys must be sorted by t",
                });
            }
        }
        Ok(Self { keys })
    }

    /// A flat curve returning `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::linear(value, value)
    }

    /// A straight line from `start` at `t = 0` to `end` at `t = 1`.
    pub fn linear(start: f32, end: f32) -> Self {
        Self {
            keys: vec![
                FalloffKey { t: 0.0, value: start },
                FalloffKey { t: 1.0, value: end },
            ],
        }
    }

    /// A curve with no keys; every evaluation yields `0.0`.
    pub fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn keys(&self) -> &[FalloffKey] {
        &self.keys
    }

    /// Sample the curve at `t`.
    ///
    /// `t` is clamped to the key range, so the first and last values extend
    /// flat past the ends.  Duplicate `t` values form a step; the later key wins
    /// from that point on.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.t {
            return first.value;
        }
        if t >= last.t {
            return last.value;
        }

        // First key strictly past t; it exists and is not index 0 because of
        // the range checks above.
        let upper = self.keys.partition_point(|k| k.t <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.t - a.t;
        if span <= f32::EPSILON {
            return b.value;
        }
        let u = (t - a.t) / span;
        a.value + (b.value - a.value) * u
    }
}

impl Default for FalloffCurve {
    fn default() -> Self {
        Self::constant(1.0)
    }
}

impl TryFrom<Vec<(f32, f32)>> for FalloffCurve {
    type Error = GravityError;

    fn try_from(pairs: Vec<(f32, f32)>) -> Result<Self, Self::Error> {
        Self::new(
            pairs
                .into_iter()
                .map(|(t, value)| FalloffKey { t, value })
                .collect(),
        )
    }
}
