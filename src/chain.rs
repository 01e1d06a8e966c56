//! Arm topology: a pinned base, a run of segments and a free hand, linked by springs.

use crate::float::Float;
use crate::vec::{Vec, Vec2};
use crate::particle::{IntegrationMode, Particle};
use crate::spring::Spring;
use crate::constraint::PinConstraint;
use crate::error::PhysicsError;
use alloc::vec::Vec as AllocVec;

/// Configuration for creating an arm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainConfig<F: Float> {
    /// Where the base is pinned.
    pub anchor: Vec2<F>,
    /// Segment particles including the pinned base. The hand is extra.
    pub segments: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub particle_mass: F,
    pub particle_radius: F,
}

impl<F: Float> ChainConfig<F> {
    pub fn new(anchor: Vec2<F>) -> Self {
        ChainConfig {
            anchor,
            segments: 10,
            rest_length: F::from_f32(10.0),
            stiffness: F::from_f32(0.5),
            particle_mass: F::one(),
            particle_radius: F::from_f32(5.0),
        }
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_rest_length(mut self, rest_length: F) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.segments == 0 {
            return Err(PhysicsError::InvalidSegmentCount);
        }
        if !(self.rest_length > F::zero() && self.rest_length.is_finite()) {
            return Err(PhysicsError::InvalidRestLength(self.rest_length.to_f64()));
        }
        if !(self.stiffness >= F::zero() && self.stiffness.is_finite()) {
            return Err(PhysicsError::InvalidStiffness(self.stiffness.to_f64()));
        }
        if !(self.particle_mass > F::zero() && self.particle_mass.is_finite()) {
            return Err(PhysicsError::InvalidMass(self.particle_mass.to_f64()));
        }
        if !(self.particle_radius >= F::zero() && self.particle_radius.is_finite()) {
            return Err(PhysicsError::InvalidRadius(self.particle_radius.to_f64()));
        }
        Ok(())
    }
}

/// Particle arena for one arm. Index 0 is the pinned base, the last index
/// is the hand, and spring `i` links particle `i` to `i + 1`.
#[derive(Clone, Debug)]
pub struct ArmChain<F: Float> {
    particles: AllocVec<Particle<F>>,
    springs: AllocVec<Spring<F>>,
    pin: PinConstraint<F>,
}

impl<F: Float> ArmChain<F> {
    /// Lay the arm out straight down from the anchor, every link at rest length.
    pub fn new(config: &ChainConfig<F>) -> Self {
        let count = config.segments + 1;
        let mut particles = AllocVec::with_capacity(count);
        let mut springs = AllocVec::with_capacity(config.segments);

        for i in 0..count {
            let offset = Vec2::new(F::zero(), config.rest_length * F::from_f32(i as f32));
            let pos = config.anchor + offset;
            let particle = if i == 0 {
                Particle::pinned(pos, config.particle_radius)
            } else {
                Particle::new(pos, config.particle_mass, config.particle_radius)
            };
            particles.push(particle);
        }

        for i in 0..config.segments {
            springs.push(Spring::new(i, i + 1, config.rest_length, config.stiffness));
        }

        ArmChain {
            particles,
            springs,
            pin: PinConstraint::new(0, config.anchor),
        }
    }

    /// Gravity plus Verlet step for every free particle, then the optional clamp.
    pub fn integrate(
        &mut self,
        gravity: Vec2<F>,
        damping: F,
        mode: IntegrationMode,
        dt: F,
        max_velocity: Option<F>,
    ) {
        for p in self.particles.iter_mut().filter(|p| !p.pinned) {
            p.apply_gravity(gravity);
            p.integrate(damping, mode, dt);
        }
        if let Some(max) = max_velocity {
            self.clamp_velocities(max);
        }
    }

    pub fn clamp_velocities(&mut self, max: F) {
        for p in self.particles.iter_mut().filter(|p| !p.pinned) {
            p.clamp_velocity(max);
        }
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Endpoint positions of every spring, in creation order.
    pub fn spring_segments(&self) -> AllocVec<(Vec2<F>, Vec2<F>)> {
        self.springs
            .iter()
            .map(|s| (self.particles[s.a].pos, self.particles[s.b].pos))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of segment particles, base included, hand excluded.
    pub fn segment_count(&self) -> usize {
        self.particles.len() - 1
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn hand_index(&self) -> usize {
        self.particles.len() - 1
    }

    pub fn base(&self) -> &Particle<F> {
        &self.particles[self.pin.particle]
    }

    pub fn hand(&self) -> &Particle<F> {
        &self.particles[self.hand_index()]
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Particle<F> {
        let index = self.hand_index();
        &mut self.particles[index]
    }

    pub fn anchor(&self) -> Vec2<F> {
        self.pin.anchor
    }

    pub fn pin(&self) -> &PinConstraint<F> {
        &self.pin
    }

    pub fn springs(&self) -> &[Spring<F>] {
        &self.springs
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    /// Split borrow for the solver: mutable particles, shared springs and pin.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Particle<F>], &[Spring<F>], &PinConstraint<F>) {
        (&mut self.particles, &self.springs, &self.pin)
    }

    /// Distance between each linked pair, base to hand.
    pub fn link_lengths(&self) -> AllocVec<F> {
        self.springs
            .iter()
            .map(|s| self.particles[s.a].pos.distance(self.particles[s.b].pos))
            .collect()
    }
}
