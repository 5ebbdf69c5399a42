//! Space gravity field simulation
//!
//! Inverse-square point sources with softening, falloff curves and acceleration
//! caps; per-body aggregation with nearest-first source culling and a dominant
//! source that drives event-horizon and collision lose rules.  The numeric core
//! (`source`, `registry`, `field`, `lose`) is plain Rust; `simulation` wires it
//! into Bevy.

pub mod body;
pub mod config;
pub mod constants;
pub mod error;
pub mod falloff;
pub mod field;
pub mod lose;
pub mod registry;
pub mod scenarios;
pub mod shield;
pub mod simulation;
pub mod source;
