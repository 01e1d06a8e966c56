//! Iterative spring relaxation followed by the base pin.

use crate::float::Float;
use crate::vec::Vec2;
use crate::particle::{IntegrationMode, Particle};
use crate::spring::{Spring, StiffnessLaw};
use crate::constraint::PinConstraint;
use crate::observer::StepObserver;
use crate::error::PhysicsError;

/// Order springs are visited within one relaxation pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelaxOrder {
    /// Base to hand.
    CreationOrder,
    /// Hand to base.
    HandToBase,
}

/// Configuration for the integrator and the constraint solver.
///
/// # Builder Pattern
/// ```
/// use limber::solver::{SolverConfig, RelaxOrder};
/// use limber::spring::StiffnessLaw;
/// use limber::vec::Vec2;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_iterations(5)
///     .with_gravity(Vec2::new(0.0, 9.8))
///     .with_damping(0.99)
///     .with_stiffness_law(StiffnessLaw::extension())
///     .with_order(RelaxOrder::CreationOrder);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<F: Float> {
    /// Relaxation passes per physics step. Default: 5.
    pub iterations: usize,
    /// Gravity acceleration, y pointing down the render surface. Default: zero.
    pub gravity: Vec2<F>,
    /// Velocity retained per step, in [0, 1]. Default: 0.99.
    pub damping: F,
    pub integration: IntegrationMode,
    pub stiffness_law: StiffnessLaw<F>,
    pub order: RelaxOrder,
    /// Share of each correction applied to a spring's first endpoint. Default: 0.5.
    pub split: F,
    /// Cap on implied per-step speed. Default: none.
    pub max_velocity: Option<F>,
}

impl<F: Float> SolverConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            iterations: 5,
            gravity: Vec2::new(F::zero(), F::zero()),
            damping: F::from_f32(0.99),
            integration: IntegrationMode::TimeScaled,
            stiffness_law: StiffnessLaw::extension(),
            order: RelaxOrder::CreationOrder,
            split: F::half(),
            max_velocity: None,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_integration(mut self, integration: IntegrationMode) -> Self {
        self.integration = integration;
        self
    }

    pub fn with_stiffness_law(mut self, law: StiffnessLaw<F>) -> Self {
        self.stiffness_law = law;
        self
    }

    pub fn with_order(mut self, order: RelaxOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_split(mut self, split: F) -> Self {
        self.split = split;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: Option<F>) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.iterations == 0 {
            return Err(PhysicsError::InvalidIterations);
        }
        if !(self.damping >= F::zero() && self.damping <= F::one()) {
            return Err(PhysicsError::InvalidDamping(self.damping.to_f64()));
        }
        if !(self.split >= F::zero() && self.split <= F::one()) {
            return Err(PhysicsError::InvalidSplit(self.split.to_f64()));
        }
        if let Some(max) = self.max_velocity {
            if !(max > F::zero()) {
                return Err(PhysicsError::InvalidMaxVelocity(max.to_f64()));
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Relaxes a spring set a fixed number of times, then re-pins the base.
///
/// This is a soft solver: links approach their rest length over repeated
/// steps but are never projected exactly.
pub struct ConstraintSolver<'a, F: Float> {
    config: &'a SolverConfig<F>,
}

impl<'a, F: Float> ConstraintSolver<'a, F> {
    pub fn new(config: &'a SolverConfig<F>) -> Self {
        ConstraintSolver { config }
    }

    pub fn solve<O: StepObserver>(
        &self,
        particles: &mut [Particle<F>],
        springs: &[Spring<F>],
        pin: &PinConstraint<F>,
        observer: &mut O,
    ) {
        let law = &self.config.stiffness_law;
        let split = self.config.split;

        for i in 0..self.config.iterations {
            match self.config.order {
                RelaxOrder::CreationOrder => {
                    for spring in springs.iter() {
                        spring.relax(particles, law, split);
                    }
                }
                RelaxOrder::HandToBase => {
                    for spring in springs.iter().rev() {
                        spring.relax(particles, law, split);
                    }
                }
            }
            observer.on_constraint_iteration(i);
        }

        pin.solve(particles);
    }
}
