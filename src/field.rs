//! Per-body gravity field evaluation.
//!
//! For one body at one point, [`GravityFieldEvaluator::compute_acceleration`]:
//!
//! 1. keeps active sources whose influence sphere contains the point
//!    (squared-distance test, no square root);
//! 2. if the body has a per-step source cap and more candidates than the cap,
//!    keeps only the nearest ones;
//! 3. sums each candidate's [`GravitySource::acceleration_at`], tracking the
//!    largest single contribution as the dominant source;
//! 4. scales the sum by the body's gravity scale and, while a respected shield
//!    is up, by the clamped shield multiplier.
//!
//! ## Nearest-first cap
//!
//! The cap ranks candidates by distance alone.  A heavy source just behind a
//! light one can be dropped even though it would pull harder.  Leave the cap at
//! `0` (unlimited) unless source counts are large enough for this to matter.
//!
//! [`GravitySource::acceleration_at`]: crate::source::GravitySource::acceleration_at

use bevy::prelude::*;

use crate::body::GravityBody;
use crate::registry::{GravitySourceRegistry, SourceId};

/// Result of one field evaluation.
///
/// `dominant` is only meaningful for the tick that produced it; stale ids
/// resolve to nothing in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample {
    pub acceleration: Vec3,
    pub dominant: Option<SourceId>,
}

/// Field evaluator with a reusable candidate buffer.
///
/// One evaluator can serve every body in a tick; it holds no per-body state.
#[derive(Debug, Clone, Default)]
pub struct GravityFieldEvaluator {
    candidates: Vec<(SourceId, f32)>,
}

impl GravityFieldEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net acceleration on `body` at `point`, plus the dominant source.
    pub fn compute_acceleration(
        &mut self,
        registry: &GravitySourceRegistry,
        body: &GravityBody,
        point: Vec3,
        shield_active: bool,
    ) -> FieldSample {
        self.candidates.clear();
        self.candidates.extend(
            registry
                .all_active()
                .filter(|(_, source)| source.influences(point))
                .map(|(id, source)| (id, point.distance_squared(source.position))),
        );

        let cap = body.max_sources_per_step;
        if cap > 0 && self.candidates.len() > cap {
            // Stable sort keeps registry order between equidistant sources.
            self.candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
            self.candidates.truncate(cap);
        }

        let mut sum = Vec3::ZERO;
        let mut dominant = None;
        let mut strongest = 0.0_f32;

        for &(id, _) in &self.candidates {
            let Some(source) = registry.get(id) else {
                continue;
            };
            let a = source.acceleration_at(point);
            sum += a;

            let magnitude = a.length();
            if magnitude > strongest {
                strongest = magnitude;
                dominant = Some(id);
            }
        }

        let mut multiplier = body.gravity_scale;
        if body.respect_gravity_shield && shield_active {
            multiplier *= body.shield_multiplier.clamp(0.0, 1.0);
        }

        FieldSample {
            acceleration: sum * multiplier,
            dominant,
        }
    }
}
