//! Construction-time configuration for a whole arm simulation.

use core::time::Duration;

use crate::float::Float;
use crate::vec::Vec2;
use crate::chain::ChainConfig;
use crate::constraint::{BoundaryPolicy, BoundsConstraint};
use crate::error::PhysicsError;
use crate::particle::IntegrationMode;
use crate::platform::{CollisionPolicy, CollisionResponse, Platform, Rect};
use crate::power::LaunchConfig;
use crate::solver::{RelaxOrder, SolverConfig};
use crate::spring::StiffnessLaw;
use crate::stepper::StepMode;

/// Every constant the simulation uses. Nothing is defaulted inside the step logic.
///
/// # Builder Pattern
/// ```
/// use limber::config::SimConfig;
/// use limber::stepper::StepMode;
///
/// let config: SimConfig<f32> = SimConfig::fixed_step(800.0, 600.0)
///     .with_step_mode(StepMode::fixed());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig<F: Float> {
    pub solver: SolverConfig<F>,
    pub chain: ChainConfig<F>,
    pub platform: Platform<F>,
    pub bounds: BoundsConstraint<F>,
    pub launch: LaunchConfig<F>,
    pub step_mode: StepMode,
    /// Step length reported before the first direct-mode tick.
    pub nominal_dt: Duration,
}

impl<F: Float> SimConfig<F> {
    /// Time-scaled integration on a 5 ms fixed step: gravity 9.8, damping 0.99,
    /// linear extension hardening, creation-order relaxation, a 200 unit
    /// velocity cap, normal-based collisions and clamp-only bounds.
    pub fn fixed_step(width: F, height: F) -> Self {
        let centre = Vec2::new(width * F::half(), height * F::half());
        SimConfig {
            solver: SolverConfig::new()
                .with_gravity(Vec2::new(F::zero(), F::from_f32(9.8)))
                .with_damping(F::from_f32(0.99))
                .with_integration(IntegrationMode::TimeScaled)
                .with_stiffness_law(StiffnessLaw::extension())
                .with_order(RelaxOrder::CreationOrder)
                .with_max_velocity(Some(F::from_f32(200.0))),
            chain: ChainConfig::new(centre)
                .with_rest_length(F::from_f32(10.0))
                .with_stiffness(F::from_f32(0.5)),
            platform: floor(width, height)
                .with_policy(CollisionPolicy::Normal)
                .with_response(CollisionResponse::new(F::from_f32(0.5), F::from_f32(0.8))),
            bounds: BoundsConstraint::surface(width, height, BoundaryPolicy::ClampOnly),
            launch: LaunchConfig::new(),
            step_mode: StepMode::fixed(),
            nominal_dt: Duration::from_millis(5),
        }
    }

    /// One update per tick with force as per-step displacement: gravity 0.8,
    /// damping 0.999, symmetric hardening, hand-to-base relaxation, top/bottom
    /// platform classification and bouncing bounds.
    pub fn unit_step(width: F, height: F) -> Self {
        let centre = Vec2::new(width * F::half(), height * F::half());
        SimConfig {
            solver: SolverConfig::new()
                .with_gravity(Vec2::new(F::zero(), F::from_f32(0.8)))
                .with_damping(F::from_f32(0.999))
                .with_integration(IntegrationMode::UnitStep)
                .with_stiffness_law(StiffnessLaw::symmetric())
                .with_order(RelaxOrder::HandToBase)
                .with_max_velocity(None),
            chain: ChainConfig::new(centre)
                .with_rest_length(F::from_f32(5.0))
                .with_stiffness(F::from_f32(0.2)),
            platform: floor(width, height)
                .with_policy(CollisionPolicy::RawTopY)
                .with_response(CollisionResponse::new(F::half(), F::one())),
            bounds: BoundsConstraint::surface(width, height, BoundaryPolicy::Bounce(F::half())),
            launch: LaunchConfig::new()
                .with_growth(F::from_f32(1.1))
                .with_speed_multiplier(F::from_f32(1.2))
                .with_max_speed(None),
            step_mode: StepMode::Direct,
            nominal_dt: Duration::from_millis(16),
        }
    }

    pub fn with_solver(mut self, solver: SolverConfig<F>) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_chain(mut self, chain: ChainConfig<F>) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_platform(mut self, platform: Platform<F>) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundsConstraint<F>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_launch(mut self, launch: LaunchConfig<F>) -> Self {
        self.launch = launch;
        self
    }

    pub fn with_step_mode(mut self, step_mode: StepMode) -> Self {
        self.step_mode = step_mode;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        self.solver.validate()?;
        self.chain.validate()?;
        self.platform.validate()?;
        self.bounds.validate()?;
        self.launch.validate()?;
        self.step_mode.validate()?;
        if self.nominal_dt.is_zero() {
            return Err(PhysicsError::InvalidTimestep);
        }
        Ok(())
    }
}

/// 20 unit tall strip along the bottom edge.
fn floor<F: Float>(width: F, height: F) -> Platform<F> {
    let thickness = F::from_f32(20.0);
    Platform::new(Rect::new(F::zero(), height - thickness, width, thickness))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(SimConfig::<f32>::fixed_step(800.0, 600.0).validate().is_ok());
        assert!(SimConfig::<f64>::unit_step(800.0, 600.0).validate().is_ok());
    }

    #[test]
    fn zero_segments_rejected() {
        let config = SimConfig::<f32>::fixed_step(800.0, 600.0);
        let chain = config.chain.clone().with_segments(0);
        let config = config.with_chain(chain);
        assert_eq!(config.validate(), Err(PhysicsError::InvalidSegmentCount));
    }

    #[test]
    fn timestep_longer_than_clamp_rejected() {
        let config = SimConfig::<f32>::fixed_step(800.0, 600.0).with_step_mode(
            StepMode::FixedTimestep {
                timestep: Duration::from_millis(50),
                max_frame: Duration::from_millis(33),
            },
        );
        assert_eq!(config.validate(), Err(PhysicsError::InvalidTimestep));
    }

    #[test]
    fn zero_nominal_step_rejected() {
        let mut config = SimConfig::<f32>::unit_step(800.0, 600.0);
        config.nominal_dt = Duration::ZERO;
        assert_eq!(config.validate(), Err(PhysicsError::InvalidTimestep));
    }

    #[test]
    fn damping_above_one_rejected() {
        let config = SimConfig::<f32>::fixed_step(800.0, 600.0);
        let solver = config.solver.clone().with_damping(1.5);
        assert!(matches!(
            config.with_solver(solver).validate(),
            Err(PhysicsError::InvalidDamping(_))
        ));
    }
}
