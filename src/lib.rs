//! Verlet arm-and-hand simulation for games.
//!
//! `limber` animates an articulated arm: a chain of Verlet particles pinned
//! at its base and ending in a free hand, pulled by gravity, softened by
//! damping, flung by a charged launch and stopped by a static platform.
//! Rendering and input stay with the host, which drives the simulation with
//! [`ArmSimulation::tick`] and the two charge commands.
//!
//! # Features
//!
//! - **Verlet integration**: time-scaled (`a·dt²`) or unit-step (`a`) variants
//! - **Soft springs**: symmetric or extension-only hardening, iterative relaxation
//! - **Pinned base**: re-anchored after every solve
//! - **Platform collider**: normal-based or raw top/bottom side classification
//! - **Fixed timestep**: accumulator decoupled from the render rate
//! - **Observable**: monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod constraint;
pub mod platform;
pub mod chain;
pub mod solver;
pub mod power;
pub mod stepper;
pub mod simulation;
pub mod snapshot;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2};
pub use particle::{Particle, IntegrationMode};
pub use spring::{Spring, StiffnessLaw};
pub use constraint::{PinConstraint, BoundsConstraint, BoundaryPolicy};
pub use platform::{Platform, Rect, CollisionPolicy, CollisionResponse};
pub use chain::{ArmChain, ChainConfig};
pub use solver::{ConstraintSolver, SolverConfig, RelaxOrder};
pub use power::{PowerController, LaunchConfig, ChargeState, Launch};
pub use stepper::{Stepper, StepMode, StepPlan};
pub use simulation::ArmSimulation;
pub use snapshot::Snapshot;
pub use config::SimConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
