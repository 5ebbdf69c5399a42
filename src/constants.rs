//! Centralised gravity and gameplay constants.
//!
//! Every tunable the simulation reads lives here, so it can be found and changed
//! in one place.  [`crate::config::GravityConfig::default`] mirrors these values;
//! `assets/gravity.toml` overrides any subset of them at startup.
//!
//! ## Tuning guidance
//!
//! Scene units are arbitrary; the demo scenes read them as metres.  The
//! gravitational constant absorbs the unit scale, so changing world size usually
//! means changing [`GRAVITATIONAL_CONSTANT`] and [`RADIUS_OF_INFLUENCE`] together.

// ── Sources: Field Strength ───────────────────────────────────────────────────

/// Scene-scaled gravitational constant `G`.
///
/// At the default mass a ship 1000 u from the centre feels 0.01 u/s².
pub const GRAVITATIONAL_CONSTANT: f32 = 0.01;

/// Default source mass `M` used in `a = G·M / r²`.
pub const SOURCE_MASS: f32 = 1.0e6;

/// Distance beyond which a source contributes nothing.
///
/// Acts as the broad-phase cull; shrinking it is the cheapest way to reduce the
/// per-body candidate count in dense scenes.
pub const RADIUS_OF_INFLUENCE: f32 = 5000.0;

/// Lower bound on the distance used in the force law.
///
/// Below this distance the acceleration plateaus at `G·M / MIN_DISTANCE²`
/// (16 u/s² at the defaults) instead of diverging.
pub const MIN_DISTANCE: f32 = 25.0;

/// Plummer softening length `ε`.  `0.0` disables softening.
pub const SOFTENING: f32 = 0.0;

/// Per-source acceleration cap (u/s²).  `0.0` disables the cap.
///
/// Guards against single-tick velocity spikes when a body skims `MIN_DISTANCE`.
pub const MAX_ACCELERATION: f32 = 150.0;

/// Lower bound for the radius used to normalise falloff `t = r / roi`.
pub const FALLOFF_RADIUS_EPSILON: f32 = 1.0e-3;

// ── Sources: Black Holes ──────────────────────────────────────────────────────

/// Capture radius around a black-hole source.
pub const EVENT_HORIZON_RADIUS: f32 = 100.0;

/// Default physical radius of a source, used by the built-in contact check.
///
/// `0.0` means the source has no solid surface and can only be hit by a host
/// physics engine reporting its own contacts.
pub const SURFACE_RADIUS: f32 = 0.0;

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Global multiplier applied to a body's summed acceleration.
pub const GRAVITY_SCALE: f32 = 1.0;

/// Maximum number of sources a body evaluates per step.  `0` means unlimited.
///
/// When the cap is hit the nearest sources win; heavier but farther sources
/// are ignored.
pub const MAX_SOURCES_PER_STEP: usize = 0;

/// Fraction of gravity still felt while the gravity shield is up.
pub const SHIELD_MULTIPLIER: f32 = 0.2;

/// Radius of a body for the built-in contact check against source surfaces.
pub const BODY_CONTACT_RADIUS: f32 = 2.0;

// ── Gravity Shield ────────────────────────────────────────────────────────────

/// Seconds the shield stays up once activated.
pub const SHIELD_DURATION: f32 = 5.0;

/// Seconds after deactivation before the shield can be raised again.
pub const SHIELD_COOLDOWN: f32 = 10.0;

/// Energy drained per second while the shield is up.
///
/// Activation also requires strictly more than this much stored energy.
pub const SHIELD_ENERGY_CONSUMPTION: f32 = 20.0;

/// Energy capacity of a ship.
pub const MAX_ENERGY: f32 = 100.0;

/// Energy regenerated per second while the shield is down.
pub const ENERGY_REGEN_RATE: f32 = 5.0;

// ── Simulation ────────────────────────────────────────────────────────────────

/// Fixed simulation rate (Hz) for the `FixedUpdate` schedule.
pub const FIXED_TIMESTEP_HZ: f64 = 50.0;

/// Number of fixed ticks the demo binary runs before exiting.
pub const DEMO_TICK_LIMIT: u32 = 3000;

/// Seed for the `cluster` demo scenario.
pub const CLUSTER_SEED: u64 = 7;
