//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// How the integrator scales accumulated force into displacement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrationMode {
    /// `pos += v + a * dt²`. Constants are in units per second.
    TimeScaled,
    /// `pos += v + a`. Force is a per-step displacement and `dt` is ignored.
    UnitStep,
}

impl IntegrationMode {
    /// Factor converting a per-second velocity into the implicit per-step one.
    pub fn velocity_scale<F: Float>(self, dt: F) -> F {
        match self {
            IntegrationMode::TimeScaled => dt,
            IntegrationMode::UnitStep => F::one(),
        }
    }
}

/// A Verlet particle with implicit velocity.
///
/// There is no velocity field: `pos - prev_pos` is the velocity per step.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub force: Vec2<F>,
    pub mass: F,
    pub radius: F,
    pub pinned: bool,
}

impl<F: Float> Particle<F> {
    /// Create a particle at rest. Non-positive or non-finite mass becomes 1.
    pub fn new(pos: Vec2<F>, mass: F, radius: F) -> Self {
        let mass = if mass > F::zero() && mass.is_finite() { mass } else { F::one() };
        Particle {
            pos,
            prev_pos: pos,
            force: Vec2::zero(),
            mass,
            radius,
            pinned: false,
        }
    }

    pub fn pinned(pos: Vec2<F>, radius: F) -> Self {
        Particle {
            pinned: true,
            ..Particle::new(pos, F::one(), radius)
        }
    }

    pub fn apply_force(&mut self, force: Vec2<F>) {
        if !self.pinned {
            self.force = self.force + force;
        }
    }

    /// Add `gravity * mass` to the force accumulator.
    pub fn apply_gravity(&mut self, gravity: Vec2<F>) {
        self.apply_force(gravity.scale(self.mass));
    }

    /// Advance one step and consume the accumulated force.
    pub fn integrate(&mut self, damping: F, mode: IntegrationMode, dt: F) {
        if self.pinned {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let accel = self.force.scale(F::one() / self.mass);
        let displacement = match mode {
            IntegrationMode::TimeScaled => accel.scale(dt * dt),
            IntegrationMode::UnitStep => accel,
        };
        let new_pos = self.pos + velocity + displacement;
        self.prev_pos = self.pos;
        self.pos = new_pos;
        self.force = Vec2::zero();
    }

    /// Rescale `prev_pos` so the implied speed is at most `max`, keeping direction.
    pub fn clamp_velocity(&mut self, max: F) {
        let v = self.velocity_raw();
        let speed = v.length();
        if speed > max {
            self.prev_pos = self.pos - v.scale(max / speed);
        }
    }

    /// Velocity in units per second, given the step length.
    pub fn velocity(&self, dt: F) -> Vec2<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec2::zero();
        }
        self.velocity_raw().scale(F::one() / dt)
    }

    /// Implied per-step displacement.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    /// Inject a velocity by rewriting the previous position.
    pub fn set_velocity(&mut self, velocity: Vec2<F>, scale: F) {
        self.prev_pos = self.pos - velocity.scale(scale);
    }

    /// Force to `anchor` with zero implied velocity.
    pub fn pin_to(&mut self, anchor: Vec2<F>) {
        self.pos = anchor;
        self.prev_pos = anchor;
    }
}
