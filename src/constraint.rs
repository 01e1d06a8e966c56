//! Hard constraints applied after relaxation: the base pin and the domain bounds.

use crate::float::Float;
use crate::vec::Vec2;
use crate::particle::Particle;
use crate::error::PhysicsError;

/// Forces one particle onto a fixed anchor with zero implied velocity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinConstraint<F: Float> {
    pub particle: usize,
    pub anchor: Vec2<F>,
}

impl<F: Float> PinConstraint<F> {
    pub fn new(particle: usize, anchor: Vec2<F>) -> Self {
        PinConstraint { particle, anchor }
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        particles[self.particle].pin_to(self.anchor);
    }
}

/// What happens to the implied velocity when a particle hits the domain edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy<F: Float> {
    /// Reflect the edge-normal component, scaled by the factor.
    Bounce(F),
    /// Move the position only; the next step sees whatever velocity results.
    ClampOnly,
}

/// Keeps particles inside a rectangle, inset by each particle's radius.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsConstraint<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
    pub policy: BoundaryPolicy<F>,
}

impl<F: Float> BoundsConstraint<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>, policy: BoundaryPolicy<F>) -> Self {
        BoundsConstraint { min, max, policy }
    }

    /// Domain `[0, width] x [0, height]`.
    pub fn surface(width: F, height: F, policy: BoundaryPolicy<F>) -> Self {
        BoundsConstraint::new(Vec2::new(F::zero(), F::zero()), Vec2::new(width, height), policy)
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy<F>) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.min.x < self.max.x && self.min.y < self.max.y) {
            return Err(PhysicsError::InvalidBounds);
        }
        if let BoundaryPolicy::Bounce(f) = self.policy {
            if !(f >= F::zero() && f <= F::one()) {
                return Err(PhysicsError::InvalidResponse(f.to_f64()));
            }
        }
        Ok(())
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        for p in particles.iter_mut() {
            if p.pinned { continue; }
            let r = p.radius;
            if p.pos.x < self.min.x + r {
                p.pos.x = self.min.x + r;
                self.rebound_x(p);
            }
            if p.pos.x > self.max.x - r {
                p.pos.x = self.max.x - r;
                self.rebound_x(p);
            }
            if p.pos.y < self.min.y + r {
                p.pos.y = self.min.y + r;
                self.rebound_y(p);
            }
            if p.pos.y > self.max.y - r {
                p.pos.y = self.max.y - r;
                self.rebound_y(p);
            }
        }
    }

    fn rebound_x(&self, p: &mut Particle<F>) {
        if let BoundaryPolicy::Bounce(restitution) = self.policy {
            let vel_x = p.pos.x - p.prev_pos.x;
            p.prev_pos.x = p.pos.x + vel_x * restitution;
        }
    }

    fn rebound_y(&self, p: &mut Particle<F>) {
        if let BoundaryPolicy::Bounce(restitution) = self.policy {
            let vel_y = p.pos.y - p.prev_pos.y;
            p.prev_pos.y = p.pos.y + vel_y * restitution;
        }
    }
}
