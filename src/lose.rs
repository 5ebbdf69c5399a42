//! Body lifecycle and dominant-source lose rules.
//!
//! A body starts [`LifeState::Alive`] and moves to [`LifeState::Dead`] at most
//! once.  Two rules can kill it, both keyed on the source that dominated the
//! body's most recent step:
//!
//! - **Event horizon**: the dominant source is a black hole and the body is
//!   inside its horizon.  Checked at the end of every step.
//! - **Collision**: the body touches the dominant source.  Checked whenever a
//!   contact is reported, against the dominant source of the last step.
//!
//! Dead bodies stop sampling the field; further triggers are ignored.

use bevy::prelude::*;

use crate::body::GravityBody;
use crate::field::{FieldSample, GravityFieldEvaluator};
use crate::registry::{GravitySourceRegistry, SourceId};

/// Why a body was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoseCause {
    /// Crossed the event horizon of the dominant black hole.
    EventHorizon(SourceId),
    /// Touched the dominant source.
    Collision(SourceId),
}

impl LoseCause {
    pub fn source(self) -> SourceId {
        match self {
            LoseCause::EventHorizon(id) | LoseCause::Collision(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dead(LoseCause),
}

/// Outcome of one [`BodyStatus::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub sample: FieldSample,
    /// `Some` only on the step where the body died.
    pub lost: Option<LoseCause>,
}

/// Runtime state of a gravity-affected body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyStatus {
    life: LifeState,
    dominant: Option<SourceId>,
}

impl BodyStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn cause(&self) -> Option<LoseCause> {
        match self.life {
            LifeState::Alive => None,
            LifeState::Dead(cause) => Some(cause),
        }
    }

    /// Dominant source of the most recent step.
    pub fn dominant(&self) -> Option<SourceId> {
        self.dominant
    }

    /// Sample the field for this tick and apply the event-horizon rule.
    ///
    /// Returns `None` once the body is dead.  On the step that kills it, the
    /// sample is still returned so the caller can apply the final push.
    pub fn step(
        &mut self,
        settings: &GravityBody,
        evaluator: &mut GravityFieldEvaluator,
        registry: &GravitySourceRegistry,
        point: Vec3,
        shield_active: bool,
    ) -> Option<StepOutcome> {
        if !self.is_alive() {
            return None;
        }

        let sample = evaluator.compute_acceleration(registry, settings, point, shield_active);
        self.dominant = sample.dominant;

        let lost = if settings.lose_on_enter_event_horizon {
            sample
                .dominant
                .filter(|&id| {
                    registry
                        .get(id)
                        .is_some_and(|source| source.is_inside_event_horizon(point))
                })
                .and_then(|id| self.trigger_lose(LoseCause::EventHorizon(id)))
        } else {
            None
        };

        Some(StepOutcome { sample, lost })
    }

    /// Apply the collision rule for a contact with `source`.
    ///
    /// Returns the cause only if this contact killed the body.
    pub fn notify_contact(&mut self, settings: &GravityBody, source: SourceId) -> Option<LoseCause> {
        if !self.is_alive() || !settings.lose_on_collision_with_dominant_source {
            return None;
        }
        if self.dominant != Some(source) {
            return None;
        }
        self.trigger_lose(LoseCause::Collision(source))
    }

    /// Alive → Dead.  A no-op returning `None` if already dead.
    pub fn trigger_lose(&mut self, cause: LoseCause) -> Option<LoseCause> {
        if !self.is_alive() {
            return None;
        }
        self.life = LifeState::Dead(cause);
        self.dominant = None;
        Some(cause)
    }
}
