//! Gravity-configuration error types.
//!
//! The numeric core never fails: bad geometry simply contributes nothing.
//! Errors only surface where untrusted data enters the crate, which is the TOML
//! configuration and hand-built falloff curves.
//!
//! ## Usage
//!
//! ```ignore
//! use space_gravity::error::{validate_non_negative, GravityResult};
//!
//! fn check(radius: f32) -> GravityResult<()> {
//!     validate_non_negative("radius_of_influence", radius)?;
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Top-level error enum for the gravity crate.
#[derive(Debug, Clone, PartialEq)]
pub enum GravityError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },

    /// The configuration file is not valid TOML or has mistyped values.
    ConfigParse {
        /// Path (or `"<inline>"` for in-memory strings).
        path: String,
        /// Parser error text from `toml`.
        message: String,
    },

    /// A tunable lies outside its safe operating range.
    UnsafeParameter {
        /// Name of the parameter (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A falloff curve key is malformed.
    InvalidFalloff {
        /// Index of the offending key.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for GravityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GravityError::ConfigRead { path, message } => {
                write!(f, "failed to read config '{}': {}", path, message)
            }
            GravityError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            GravityError::UnsafeParameter {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "parameter '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GravityError::InvalidFalloff { index, reason } => {
                write!(f, "falloff key {} is invalid: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for GravityError {}

/// Convenience alias: a `Result` using `GravityError` as the error type.
pub type GravityResult<T> = Result<T, GravityError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `value` is negative or not finite.
pub fn validate_non_negative(name: &'static str, value: f32) -> GravityResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GravityError::UnsafeParameter {
            name,
            value: value as f64,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error if `value` lies outside `[0, 1]`.
pub fn validate_unit_interval(name: &'static str, value: f32) -> GravityResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GravityError::UnsafeParameter {
            name,
            value: value as f64,
            safe_range: "[0.0, 1.0]",
        })
    }
}

/// Returns an error if the fixed timestep rate is not strictly positive.
pub fn validate_timestep_hz(value: f64) -> GravityResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GravityError::UnsafeParameter {
            name: "fixed_timestep_hz",
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}
