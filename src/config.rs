//! Runtime gravity configuration loaded from `assets/gravity.toml`.
//!
//! [`GravityConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_gravity_config`] reads
//! `assets/gravity.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GravityConfig>` to a system and build components from the
//! templates: `config.source_template(pos)`, `config.body_template()`,
//! `config.shield_template()`.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GravityConfig::default()`.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::body::GravityBody;
use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_timestep_hz, validate_unit_interval, GravityError,
    GravityResult,
};
use crate::falloff::FalloffCurve;
use crate::shield::GravityShield;
use crate::source::GravitySource;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/gravity.toml";

/// Runtime-tunable gravity configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    // ── Sources ──────────────────────────────────────────────────────────────
    pub gravitational_constant: f32,
    pub source_mass: f32,
    pub radius_of_influence: f32,
    pub min_distance: f32,
    pub softening: f32,
    pub max_acceleration: f32,
    pub falloff: FalloffCurve,
    pub event_horizon_radius: f32,
    pub surface_radius: f32,

    // ── Bodies ───────────────────────────────────────────────────────────────
    pub gravity_scale: f32,
    pub max_sources_per_step: usize,
    pub respect_gravity_shield: bool,
    pub shield_multiplier: f32,
    pub lose_on_collision_with_dominant_source: bool,
    pub lose_on_enter_event_horizon: bool,
    pub body_contact_radius: f32,

    // ── Gravity Shield ───────────────────────────────────────────────────────
    pub shield_duration: f32,
    pub shield_cooldown: f32,
    pub shield_energy_consumption: f32,
    pub max_energy: f32,
    pub energy_regen_rate: f32,

    // ── Simulation ───────────────────────────────────────────────────────────
    pub fixed_timestep_hz: f64,
    pub demo_tick_limit: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            // Sources
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            source_mass: SOURCE_MASS,
            radius_of_influence: RADIUS_OF_INFLUENCE,
            min_distance: MIN_DISTANCE,
            softening: SOFTENING,
            max_acceleration: MAX_ACCELERATION,
            falloff: FalloffCurve::default(),
            event_horizon_radius: EVENT_HORIZON_RADIUS,
            surface_radius: SURFACE_RADIUS,
            // Bodies
            gravity_scale: GRAVITY_SCALE,
            max_sources_per_step: MAX_SOURCES_PER_STEP,
            respect_gravity_shield: true,
            shield_multiplier: SHIELD_MULTIPLIER,
            lose_on_collision_with_dominant_source: true,
            lose_on_enter_event_horizon: true,
            body_contact_radius: BODY_CONTACT_RADIUS,
            // Gravity Shield
            shield_duration: SHIELD_DURATION,
            shield_cooldown: SHIELD_COOLDOWN,
            shield_energy_consumption: SHIELD_ENERGY_CONSUMPTION,
            max_energy: MAX_ENERGY,
            energy_regen_rate: ENERGY_REGEN_RATE,
            // Simulation
            fixed_timestep_hz: FIXED_TIMESTEP_HZ,
            demo_tick_limit: DEMO_TICK_LIMIT,
        }
    }
}

impl GravityConfig {
    /// Parse and validate a TOML document.  `origin` names it in errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> GravityResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| GravityError::ConfigParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// A missing file yields `Ok(None)`; defaults should stay in place.
    pub fn load(path: impl AsRef<Path>) -> GravityResult<Option<Self>> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GravityError::ConfigRead {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };
        Self::from_toml_str(&contents, &path.display().to_string()).map(Some)
    }

    /// Reject values the force law or shield model cannot use sensibly.
    ///
    /// A zero radius of influence is allowed; such sources simply never pull.
    pub fn validate(&self) -> GravityResult<()> {
        validate_non_negative("radius_of_influence", self.radius_of_influence)?;
        validate_non_negative("min_distance", self.min_distance)?;
        validate_non_negative("softening", self.softening)?;
        validate_non_negative("max_acceleration", self.max_acceleration)?;
        validate_non_negative("event_horizon_radius", self.event_horizon_radius)?;
        validate_non_negative("surface_radius", self.surface_radius)?;
        validate_non_negative("body_contact_radius", self.body_contact_radius)?;
        validate_unit_interval("shield_multiplier", self.shield_multiplier)?;
        validate_non_negative("shield_duration", self.shield_duration)?;
        validate_non_negative("shield_cooldown", self.shield_cooldown)?;
        validate_non_negative("shield_energy_consumption", self.shield_energy_consumption)?;
        validate_non_negative("max_energy", self.max_energy)?;
        validate_non_negative("energy_regen_rate", self.energy_regen_rate)?;
        validate_timestep_hz(self.fixed_timestep_hz)?;
        Ok(())
    }

    /// A plain gravity source at `position` using the configured parameters.
    pub fn source_template(&self, position: Vec3) -> GravitySource {
        GravitySource {
            position,
            gravitational_constant: self.gravitational_constant,
            mass: self.source_mass,
            radius_of_influence: self.radius_of_influence,
            min_distance: self.min_distance,
            softening: self.softening,
            max_acceleration: self.max_acceleration,
            falloff: self.falloff.clone(),
            is_black_hole: false,
            event_horizon_radius: self.event_horizon_radius,
            surface_radius: self.surface_radius,
        }
    }

    /// Same as [`Self::source_template`] with the black-hole flag set.
    pub fn black_hole_template(&self, position: Vec3) -> GravitySource {
        GravitySource {
            is_black_hole: true,
            ..self.source_template(position)
        }
    }

    pub fn body_template(&self) -> GravityBody {
        GravityBody {
            gravity_scale: self.gravity_scale,
            max_sources_per_step: self.max_sources_per_step,
            respect_gravity_shield: self.respect_gravity_shield,
            shield_multiplier: self.shield_multiplier,
            lose_on_collision_with_dominant_source: self.lose_on_collision_with_dominant_source,
            lose_on_enter_event_horizon: self.lose_on_enter_event_horizon,
        }
    }

    pub fn shield_template(&self) -> GravityShield {
        GravityShield::new(
            self.shield_duration,
            self.shield_cooldown,
            self.shield_energy_consumption,
            self.max_energy,
            self.energy_regen_rate,
        )
    }
}

/// Startup system: attempt to load `assets/gravity.toml` and overwrite the
/// `GravityConfig` resource with the values in the file.
///
/// Missing keys retain their compiled defaults.  Read, parse and validation
/// errors are logged but do not abort the simulation.  A missing file is not
/// an error (defaults are already in place from `insert_resource`).
pub fn load_gravity_config(mut config: ResMut<GravityConfig>) {
    match GravityConfig::load(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded gravity config from {CONFIG_PATH}");
        }
        Ok(None) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("{e}; using defaults");
        }
    }
}
