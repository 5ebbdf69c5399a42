//! Ship gravity shield: an energy-limited toggle that attenuates gravity.
//!
//! The shield drains energy while up and switches itself off when its timer or
//! the energy runs out.  Raising it again needs both a full cooldown since the
//! last deactivation and more stored energy than one second of drain.  Energy
//! regenerates only while the shield is down.

use crate::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct GravityShield {
    pub duration: f32,
    pub cooldown: f32,
    /// Energy per second while active.
    pub energy_consumption: f32,
    pub max_energy: f32,
    pub energy_regen_rate: f32,
    energy: f32,
    active: bool,
    remaining: f32,
    /// Seconds since the shield last went down.  Starts at zero, so a fresh
    /// ship waits one cooldown before the first activation.
    since_deactivation: f32,
}

impl Default for GravityShield {
    fn default() -> Self {
        Self::new(
            SHIELD_DURATION,
            SHIELD_COOLDOWN,
            SHIELD_ENERGY_CONSUMPTION,
            MAX_ENERGY,
            ENERGY_REGEN_RATE,
        )
    }
}

impl GravityShield {
    /// A full-energy, lowered shield.
    pub fn new(
        duration: f32,
        cooldown: f32,
        energy_consumption: f32,
        max_energy: f32,
        energy_regen_rate: f32,
    ) -> Self {
        Self {
            duration,
            cooldown,
            energy_consumption,
            max_energy,
            energy_regen_rate,
            energy: max_energy,
            active: false,
            remaining: 0.0,
            since_deactivation: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn can_activate(&self) -> bool {
        !self.active
            && self.energy > self.energy_consumption
            && self.since_deactivation > self.cooldown
    }

    /// Toggle request from the pilot.  Returns `true` if the state changed.
    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.deactivate();
            true
        } else if self.can_activate() {
            self.active = true;
            self.remaining = self.duration;
            true
        } else {
            false
        }
    }

    /// Advance timers and energy by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.active {
            self.remaining -= dt;
            self.energy = (self.energy - self.energy_consumption * dt).max(0.0);
            if self.remaining <= 0.0 || self.energy <= 0.0 {
                self.deactivate();
            }
        } else {
            self.since_deactivation += dt;
            self.energy = (self.energy + self.energy_regen_rate * dt).min(self.max_energy);
        }
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.remaining = 0.0;
        self.since_deactivation = 0.0;
    }
}
