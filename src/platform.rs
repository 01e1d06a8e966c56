//! Static axis-aligned platform and particle penetration resolution.

use crate::float::Float;
use crate::vec::{Vec, Vec2};
use crate::particle::Particle;
use crate::error::PhysicsError;

/// Overlap tolerated without a contact. A particle whose surface distance is
/// within `radius - CONTACT_SKIN..radius` is left alone, so a resolved
/// particle does not re-trigger on round-off.
pub const CONTACT_SKIN: f32 = 1e-4;

/// Axis-aligned rectangle, `(x, y)` being its top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<F: Float> {
    pub x: F,
    pub y: F,
    pub width: F,
    pub height: F,
}

impl<F: Float> Rect<F> {
    pub fn new(x: F, y: F, width: F, height: F) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> F { self.x }
    pub fn right(&self) -> F { self.x + self.width }
    pub fn top(&self) -> F { self.y }
    pub fn bottom(&self) -> F { self.y + self.height }

    /// Zero or negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > F::zero() && self.height > F::zero())
    }

    pub fn closest_point(&self, p: Vec2<F>) -> Vec2<F> {
        p.clamp(
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.bottom()),
        )
    }
}

/// How the push-out side is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionPolicy {
    /// Push out along the dominant axis of `particle - closest_point`;
    /// a centre inside the rectangle leaves through the nearest edge.
    Normal,
    /// Above the top edge goes up, anything else goes below the bottom.
    /// Side contacts are misclassified as top or bottom hits.
    RawTopY,
}

/// Velocity response on contact.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionResponse<F: Float> {
    /// Share of the normal velocity kept, reflected.
    pub restitution: F,
    /// Share of the tangential velocity kept.
    pub friction: F,
}

impl<F: Float> CollisionResponse<F> {
    pub fn new(restitution: F, friction: F) -> Self {
        CollisionResponse { restitution, friction }
    }

    /// Same factor on both axes.
    pub fn uniform(factor: F) -> Self {
        CollisionResponse { restitution: factor, friction: factor }
    }
}

impl<F: Float> Default for CollisionResponse<F> {
    fn default() -> Self {
        CollisionResponse::new(F::from_f32(0.5), F::from_f32(0.8))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Static platform collider. Never moves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Platform<F: Float> {
    pub rect: Rect<F>,
    pub policy: CollisionPolicy,
    pub response: CollisionResponse<F>,
}

impl<F: Float> Platform<F> {
    pub fn new(rect: Rect<F>) -> Self {
        Platform {
            rect,
            policy: CollisionPolicy::Normal,
            response: CollisionResponse::default(),
        }
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_response(mut self, response: CollisionResponse<F>) -> Self {
        self.response = response;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        for f in [self.response.restitution, self.response.friction] {
            if !(f >= F::zero() && f <= F::one()) {
                return Err(PhysicsError::InvalidResponse(f.to_f64()));
            }
        }
        Ok(())
    }

    /// True if the particle overlaps the platform by more than the contact skin.
    pub fn penetrates(&self, particle: &Particle<F>) -> bool {
        if self.rect.is_degenerate() {
            return false;
        }
        let reach = particle.radius - F::from_f32(CONTACT_SKIN);
        if reach <= F::zero() {
            return self.contains(particle.pos);
        }
        let closest = self.rect.closest_point(particle.pos);
        particle.pos.distance_sq(closest) < reach * reach
    }

    /// Push a penetrating particle out and rewrite its implied velocity.
    /// Returns whether a contact was resolved.
    pub fn resolve(&self, particle: &mut Particle<F>) -> bool {
        if !self.penetrates(particle) {
            return false;
        }

        let r = particle.radius;
        let closest = self.rect.closest_point(particle.pos);
        let axis = match self.policy {
            CollisionPolicy::Normal => {
                let d = particle.pos - closest;
                if d.length_sq() == F::zero() {
                    self.exit_through_nearest_edge(particle)
                } else if d.y.abs() >= d.x.abs() {
                    particle.pos.y = closest.y + signum(d.y) * r;
                    Axis::Y
                } else {
                    particle.pos.x = closest.x + signum(d.x) * r;
                    Axis::X
                }
            }
            CollisionPolicy::RawTopY => {
                particle.pos.y = if particle.pos.y < self.rect.top() {
                    self.rect.top() - r
                } else {
                    self.rect.bottom() + r
                };
                Axis::Y
            }
        };

        let v = particle.velocity_raw();
        let CollisionResponse { restitution, friction } = self.response;
        match axis {
            Axis::Y => {
                particle.prev_pos.y = particle.pos.y + v.y * restitution;
                particle.prev_pos.x = particle.pos.x - v.x * friction;
            }
            Axis::X => {
                particle.prev_pos.x = particle.pos.x + v.x * restitution;
                particle.prev_pos.y = particle.pos.y - v.y * friction;
            }
        }
        true
    }

    fn contains(&self, p: Vec2<F>) -> bool {
        p.x > self.rect.left() && p.x < self.rect.right()
            && p.y > self.rect.top() && p.y < self.rect.bottom()
    }

    fn exit_through_nearest_edge(&self, particle: &mut Particle<F>) -> Axis {
        let p = particle.pos;
        let r = particle.radius;
        let to_left = p.x - self.rect.left();
        let to_right = self.rect.right() - p.x;
        let to_top = p.y - self.rect.top();
        let to_bottom = self.rect.bottom() - p.y;

        let nearest = to_left.min(to_right).min(to_top).min(to_bottom);
        if nearest == to_top {
            particle.pos.y = self.rect.top() - r;
            Axis::Y
        } else if nearest == to_bottom {
            particle.pos.y = self.rect.bottom() + r;
            Axis::Y
        } else if nearest == to_left {
            particle.pos.x = self.rect.left() - r;
            Axis::X
        } else {
            particle.pos.x = self.rect.right() + r;
            Axis::X
        }
    }
}

fn signum<F: Float>(v: F) -> F {
    if v < F::zero() { -F::one() } else { F::one() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Platform<f32> {
        Platform::new(Rect::new(0.0, 580.0, 800.0, 20.0))
    }

    #[test]
    fn resting_contact_bounces_and_slows() {
        let platform = floor();
        let mut p = Particle::new(Vec2::new(100.0, 577.0), 1.0, 5.0);
        p.prev_pos = Vec2::new(98.0, 573.0);
        assert!(platform.resolve(&mut p));
        assert_eq!(p.pos.y, 575.0);
        let v = p.velocity_raw();
        // vertical: 2 down -> 1 up, horizontal: 2 -> 1.6
        assert!((v.y - -1.0).abs() < 1e-4, "vy = {}", v.y);
        assert!((v.x - 1.6).abs() < 1e-4, "vx = {}", v.x);
    }

    #[test]
    fn side_contact_resolves_horizontally() {
        let platform = Platform::new(Rect::new(100.0f32, 100.0, 50.0, 50.0));
        let mut p = Particle::new(Vec2::new(97.0, 125.0), 1.0, 5.0);
        platform.resolve(&mut p);
        assert_eq!(p.pos, Vec2::new(95.0, 125.0));
    }

    #[test]
    fn raw_top_y_misclassifies_side_contact() {
        let platform = Platform::new(Rect::new(100.0f32, 100.0, 50.0, 50.0))
            .with_policy(CollisionPolicy::RawTopY);
        let mut p = Particle::new(Vec2::new(97.0, 125.0), 1.0, 5.0);
        platform.resolve(&mut p);
        assert_eq!(p.pos, Vec2::new(97.0, 155.0));
    }

    #[test]
    fn degenerate_platform_never_collides() {
        let platform = Platform::new(Rect::new(100.0f32, 100.0, 0.0, 50.0));
        let mut p = Particle::new(Vec2::new(100.0, 120.0), 1.0, 5.0);
        assert!(!platform.resolve(&mut p));
        assert_eq!(p.pos, Vec2::new(100.0, 120.0));
    }
}
