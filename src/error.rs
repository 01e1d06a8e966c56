//! Error types for simulation construction.
//!
//! Only configuration can fail. Once a simulation is built, every per-step
//! numeric edge case is handled in place and never surfaces as an error.

use thiserror::Error;

/// Errors reported while validating a [`SimConfig`](crate::config::SimConfig).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite (got {0})")]
    InvalidMass(f64),
    /// Particle radius must be non-negative and finite.
    #[error("particle radius must be non-negative and finite (got {0})")]
    InvalidRadius(f64),
    /// The arm needs at least the pinned base segment.
    #[error("segment count must be at least 1")]
    InvalidSegmentCount,
    /// Spring rest length must be positive.
    #[error("spring rest length must be positive (got {0})")]
    InvalidRestLength(f64),
    /// Spring stiffness must be non-negative.
    #[error("stiffness must be non-negative (got {0})")]
    InvalidStiffness(f64),
    /// Velocity damping must be in [0, 1].
    #[error("damping must be in [0, 1] (got {0})")]
    InvalidDamping(f64),
    /// Correction split must be in [0, 1].
    #[error("correction split must be in [0, 1] (got {0})")]
    InvalidSplit(f64),
    /// The solver must relax at least once per step.
    #[error("solver iterations must be at least 1")]
    InvalidIterations,
    /// Maximum velocity must be positive.
    #[error("max velocity must be positive (got {0})")]
    InvalidMaxVelocity(f64),
    /// Fixed timestep must be non-zero and no larger than the frame clamp;
    /// the nominal step must be non-zero.
    #[error("timestep must be non-zero and a fixed timestep must not exceed the frame clamp")]
    InvalidTimestep,
    /// The frame clamp allows more catch-up updates per tick than the stepper accepts.
    #[error("frame clamp allows {0} updates per tick, more than the supported maximum")]
    TooManyStepsPerFrame(u128),
    /// Power baseline, ceiling, growth or speed settings are inconsistent.
    #[error("invalid power range: {0}")]
    InvalidPowerRange(&'static str),
    /// Collision or boundary response factor outside [0, 1].
    #[error("response factor must be in [0, 1] (got {0})")]
    InvalidResponse(f64),
    /// Boundary domain has no interior.
    #[error("boundary domain must have min < max on both axes")]
    InvalidBounds,
}
