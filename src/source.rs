//! Point-mass gravity sources and the per-source force law.

use bevy::prelude::*;

use crate::constants::*;
use crate::falloff::FalloffCurve;

/// A point mass generating an inverse-square attraction inside a bounded radius.
///
/// `position` is owned by whoever moves the source (a `Transform` under the
/// plugin); the registry copies it in before each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct GravitySource {
    pub position: Vec3,
    pub gravitational_constant: f32,
    pub mass: f32,
    pub radius_of_influence: f32,
    pub min_distance: f32,
    pub softening: f32,
    /// `0.0` or less disables the cap.
    pub max_acceleration: f32,
    pub falloff: FalloffCurve,
    pub is_black_hole: bool,
    pub event_horizon_radius: f32,
    /// Solid radius for the built-in contact check.  `0.0` disables it.
    pub surface_radius: f32,
}

impl Default for GravitySource {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            mass: SOURCE_MASS,
            radius_of_influence: RADIUS_OF_INFLUENCE,
            min_distance: MIN_DISTANCE,
            softening: SOFTENING,
            max_acceleration: MAX_ACCELERATION,
            falloff: FalloffCurve::default(),
            is_black_hole: false,
            event_horizon_radius: EVENT_HORIZON_RADIUS,
            surface_radius: SURFACE_RADIUS,
        }
    }
}

impl GravitySource {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Broad-phase test: squared distance against squared radius of influence.
    ///
    /// Matches the exact cut in [`Self::acceleration_at`] except at `r == 0`,
    /// where the source is in range but contributes nothing.  A negative radius
    /// influences nothing, although its square would pass, so such a source
    /// never takes a slot under a per-step cap.
    #[inline]
    pub fn influences(&self, point: Vec3) -> bool {
        let roi = self.radius_of_influence;
        roi >= 0.0 && point.distance_squared(self.position) <= roi * roi
    }

    /// Acceleration this source imparts at `point`.
    ///
    /// Zero at the centre and beyond `radius_of_influence`.  Inside, the
    /// Newtonian `G·M / r_eff²` with `r_eff = max(min_distance, r)` (Plummer
    /// softened when `softening > 0`), shaped by the falloff curve and clamped
    /// to `max_acceleration`.
    pub fn acceleration_at(&self, point: Vec3) -> Vec3 {
        let to_center = self.position - point;
        let r = to_center.length();
        if r <= 0.0 || r > self.radius_of_influence {
            return Vec3::ZERO;
        }

        let mut r_eff = self.min_distance.max(r);
        if self.softening > 0.0 {
            r_eff = (r_eff * r_eff + self.softening * self.softening).sqrt();
        }

        let mut magnitude = self.gravitational_constant * self.mass / (r_eff * r_eff);

        let t = (r / self.radius_of_influence.max(FALLOFF_RADIUS_EPSILON)).clamp(0.0, 1.0);
        magnitude *= self.falloff.evaluate(t).max(0.0);

        if self.max_acceleration > 0.0 {
            magnitude = magnitude.min(self.max_acceleration);
        }

        // r > 0 here, so the division is safe.
        to_center / r * magnitude
    }

    /// True when `point` is within the event horizon of a black-hole source.
    pub fn is_inside_event_horizon(&self, point: Vec3) -> bool {
        if !self.is_black_hole {
            return false;
        }
        point.distance(self.position) <= self.event_horizon_radius.max(0.0)
    }

    /// Sphere overlap between a body of `body_radius` and this source's surface.
    pub fn touches_surface(&self, point: Vec3, body_radius: f32) -> bool {
        if self.surface_radius <= 0.0 {
            return false;
        }
        let reach = self.surface_radius + body_radius.max(0.0);
        point.distance_squared(self.position) <= reach * reach
    }
}
