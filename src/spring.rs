//! Soft distance springs relaxed by positional correction.

use crate::float::Float;
use crate::vec::{Vec, Vec2};
use crate::particle::Particle;

/// How a spring's effective stiffness grows with its stretch.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StiffnessLaw<F: Float> {
    /// `k = base + |stretch|^exponent * hardening`, stiffening under both
    /// compression and extension. Each endpoint moves by
    /// `delta * stretch / dist * k * scale` at an even split.
    SymmetricHardening { hardening: F, exponent: F, scale: F },
    /// `k = base + max(stretch, 0) * hardening`, stiffening only when
    /// stretched. The total correction is `delta * stretch / dist * k`.
    ExtensionHardening { hardening: F },
}

impl<F: Float> StiffnessLaw<F> {
    /// `0.001 * |stretch|^1.5`, scaled by 0.4.
    pub fn symmetric() -> Self {
        StiffnessLaw::SymmetricHardening {
            hardening: F::from_f32(0.001),
            exponent: F::from_f32(1.5),
            scale: F::from_f32(0.4),
        }
    }

    /// `0.1 * stretch` while extended.
    pub fn extension() -> Self {
        StiffnessLaw::ExtensionHardening { hardening: F::from_f32(0.1) }
    }

    /// Fraction of `delta` removed by one relaxation, split across both ends.
    fn correction_factor(&self, base: F, stretch: F, dist: F) -> F {
        match *self {
            StiffnessLaw::SymmetricHardening { hardening, exponent, scale } => {
                let stiffness = base + stretch.abs().powf(exponent) * hardening;
                let percent = (stretch / dist) * stiffness * scale;
                percent * F::two()
            }
            StiffnessLaw::ExtensionHardening { hardening } => {
                let mut stiffness = base;
                if stretch > F::zero() {
                    stiffness = stiffness + stretch * hardening;
                }
                (stretch / dist) * stiffness
            }
        }
    }
}

/// A soft link between two particles of an arena, by index.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
}

impl<F: Float> Spring<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F) -> Self {
        Spring { a, b, rest_length, stiffness }
    }

    /// Current length minus rest length.
    pub fn stretch(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos) - self.rest_length
    }

    /// Move both endpoints toward the rest length.
    ///
    /// `split` is the share of the correction taken by `a`; `b` takes the
    /// rest. Coincident endpoints are left alone. Pinned endpoints move
    /// too and are restored by the pin afterwards.
    pub fn relax(&self, particles: &mut [Particle<F>], law: &StiffnessLaw<F>, split: F) {
        let delta: Vec2<F> = particles[self.b].pos - particles[self.a].pos;
        let dist = delta.length();
        if dist == F::zero() {
            return;
        }

        let stretch = dist - self.rest_length;
        let correction = delta.scale(law.correction_factor(self.stiffness, stretch, dist));

        particles[self.a].pos = particles[self.a].pos + correction.scale(split);
        particles[self.b].pos = particles[self.b].pos - correction.scale(F::one() - split);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(b: Vec2<f32>) -> [Particle<f32>; 2] {
        [
            Particle::new(Vec2::new(0.0, 0.0), 1.0, 5.0),
            Particle::new(b, 1.0, 5.0),
        ]
    }

    #[test]
    fn coincident_endpoints_are_skipped() {
        let mut ps = pair(Vec2::new(0.0, 0.0));
        let spring = Spring::new(0, 1, 10.0, 0.5);
        spring.relax(&mut ps, &StiffnessLaw::extension(), 0.5);
        assert_eq!(ps[0].pos, Vec2::new(0.0, 0.0));
        assert_eq!(ps[1].pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn extension_law_is_linear_under_compression() {
        // stretch = -4, k = 0.5: total correction 2 units, one per end.
        let mut ps = pair(Vec2::new(6.0, 0.0));
        let spring = Spring::new(0, 1, 10.0, 0.5);
        spring.relax(&mut ps, &StiffnessLaw::extension(), 0.5);
        assert!((ps[0].pos.x - -1.0).abs() < 1e-5);
        assert!((ps[1].pos.x - 7.0).abs() < 1e-5);
    }

    #[test]
    fn symmetric_law_moves_each_end_by_percent() {
        let mut ps = pair(Vec2::new(20.0, 0.0));
        let spring = Spring::new(0, 1, 10.0, 0.2);
        spring.relax(&mut ps, &StiffnessLaw::symmetric(), 0.5);
        let k = 0.2 + 10.0f32.powf(1.5) * 0.001;
        let percent = (10.0 / 20.0) * k * 0.4;
        assert!((ps[0].pos.x - 20.0 * percent).abs() < 1e-4);
        assert!((ps[1].pos.x - (20.0 - 20.0 * percent)).abs() < 1e-4);
    }

    #[test]
    fn split_biases_the_correction() {
        let mut ps = pair(Vec2::new(14.0, 0.0));
        let spring = Spring::new(0, 1, 10.0, 1.0);
        spring.relax(&mut ps, &StiffnessLaw::ExtensionHardening { hardening: 0.0 }, 0.0);
        assert_eq!(ps[0].pos.x, 0.0);
        assert!((ps[1].pos.x - 10.0).abs() < 1e-5);
    }
}
