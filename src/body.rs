//! Per-body gravity settings.

use crate::constants::*;

/// How a body responds to the gravity field.
///
/// Runtime state (alive/dead, current dominant source) lives in
/// [`crate::lose::BodyStatus`].
#[derive(Debug, Clone, PartialEq)]
pub struct GravityBody {
    /// Multiplier on the summed acceleration.
    pub gravity_scale: f32,
    /// Nearest-first cap on sources evaluated per step.  `0` = unlimited.
    pub max_sources_per_step: usize,
    /// Whether an active gravity shield attenuates this body's gravity.
    pub respect_gravity_shield: bool,
    /// Attenuation while shielded; clamped to `[0, 1]` when applied.
    pub shield_multiplier: f32,
    /// Lose when touching the current dominant source.
    pub lose_on_collision_with_dominant_source: bool,
    /// Lose when inside the event horizon of a dominant black hole.
    pub lose_on_enter_event_horizon: bool,
}

impl Default for GravityBody {
    fn default() -> Self {
        Self {
            gravity_scale: GRAVITY_SCALE,
            max_sources_per_step: MAX_SOURCES_PER_STEP,
            respect_gravity_shield: true,
            shield_multiplier: SHIELD_MULTIPLIER,
            lose_on_collision_with_dominant_source: true,
            lose_on_enter_event_horizon: true,
        }
    }
}
