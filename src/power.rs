//! Charge-and-release launch power for the hand.

use crate::float::Float;
use crate::vec::{Vec, Vec2};
use crate::error::PhysicsError;

/// Launch tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaunchConfig<F: Float> {
    /// Power restored every time charging starts.
    pub baseline: F,
    pub max_power: F,
    /// Multiplier applied to power on every physics step while charging.
    pub growth: F,
    /// Launch speed per unit of power.
    pub speed_multiplier: F,
    /// Optional cap on launch speed.
    pub max_speed: Option<F>,
}

impl<F: Float> LaunchConfig<F> {
    pub fn new() -> Self {
        LaunchConfig {
            baseline: F::from_f32(10.0),
            max_power: F::from_f32(100.0),
            growth: F::from_f32(1.05),
            speed_multiplier: F::two(),
            max_speed: Some(F::from_f32(200.0)),
        }
    }

    pub fn with_baseline(mut self, baseline: F) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_max_power(mut self, max_power: F) -> Self {
        self.max_power = max_power;
        self
    }

    pub fn with_growth(mut self, growth: F) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_speed_multiplier(mut self, multiplier: F) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    pub fn with_max_speed(mut self, max_speed: Option<F>) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.baseline > F::zero()) {
            return Err(PhysicsError::InvalidPowerRange("baseline must be positive"));
        }
        if !(self.max_power >= self.baseline && self.max_power.is_finite()) {
            return Err(PhysicsError::InvalidPowerRange("max power must be finite and at least the baseline"));
        }
        if !(self.growth >= F::one()) {
            return Err(PhysicsError::InvalidPowerRange("growth factor must be at least 1"));
        }
        if !(self.speed_multiplier >= F::zero()) {
            return Err(PhysicsError::InvalidPowerRange("speed multiplier must be non-negative"));
        }
        if let Some(max) = self.max_speed {
            if !(max >= F::zero()) {
                return Err(PhysicsError::InvalidPowerRange("max speed must be non-negative"));
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for LaunchConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargeState {
    Idle,
    Charging,
}

/// Outcome of releasing a charge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Launch<F: Float> {
    pub power: F,
    pub angle: F,
    pub speed: F,
    /// Units per second (time-scaled) or per step (unit-step).
    pub velocity: Vec2<F>,
}

/// Idle/Charging state machine holding the current power.
#[derive(Clone, Debug)]
pub struct PowerController<F: Float> {
    config: LaunchConfig<F>,
    state: ChargeState,
    power: F,
    target: Option<Vec2<F>>,
}

impl<F: Float> PowerController<F> {
    pub fn new(config: LaunchConfig<F>) -> Self {
        let power = config.baseline;
        PowerController {
            config,
            state: ChargeState::Idle,
            power,
            target: None,
        }
    }

    /// Enter `Charging` and reset power to the baseline. Restarts an active charge.
    pub fn charge_start(&mut self, target: Vec2<F>) {
        self.power = self.config.baseline;
        self.target = Some(target);
        self.state = ChargeState::Charging;
    }

    /// One physics step of growth. No-op while idle.
    pub fn grow(&mut self) {
        if self.state == ChargeState::Charging {
            self.power = (self.power * self.config.growth).min(self.config.max_power);
        }
    }

    /// Leave `Charging` and aim the stored power from `origin` at `target`.
    /// Returns `None` if no charge was in progress.
    pub fn charge_release(&mut self, origin: Vec2<F>, target: Vec2<F>) -> Option<Launch<F>> {
        if self.state != ChargeState::Charging {
            return None;
        }
        self.state = ChargeState::Idle;
        self.target = Some(target);

        let angle = (target - origin).angle();
        let mut speed = self.power * self.config.speed_multiplier;
        if let Some(max) = self.config.max_speed {
            speed = speed.min(max);
        }
        Some(Launch {
            power: self.power,
            angle,
            speed,
            velocity: Vec2::from_angle(angle).scale(speed),
        })
    }

    pub fn state(&self) -> ChargeState {
        self.state
    }

    pub fn is_charging(&self) -> bool {
        self.state == ChargeState::Charging
    }

    pub fn power(&self) -> F {
        self.power
    }

    pub fn max_power(&self) -> F {
        self.config.max_power
    }

    /// Power as a share of max, capped at 1, for a power bar.
    pub fn fraction(&self) -> F {
        (self.power / self.config.max_power).min(F::one())
    }

    /// Last aim point received from a charge command.
    pub fn target(&self) -> Option<Vec2<F>> {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_grows_to_ceiling() {
        let mut power = PowerController::new(LaunchConfig::<f32>::new());
        power.charge_start(Vec2::new(0.0, 0.0));
        assert_eq!(power.power(), 10.0);
        for _ in 0..200 {
            power.grow();
        }
        assert_eq!(power.power(), 100.0);
        assert_eq!(power.fraction(), 1.0);
    }

    #[test]
    fn idle_does_not_grow() {
        let mut power = PowerController::new(LaunchConfig::<f32>::new());
        power.grow();
        assert_eq!(power.power(), 10.0);
    }

    #[test]
    fn restart_resets_power() {
        let mut power = PowerController::new(LaunchConfig::<f32>::new());
        power.charge_start(Vec2::new(0.0, 0.0));
        for _ in 0..10 {
            power.grow();
        }
        assert!(power.power() > 10.0);
        power.charge_start(Vec2::new(1.0, 1.0));
        assert_eq!(power.power(), 10.0);
        assert!(power.is_charging());
    }

    #[test]
    fn release_without_charge_is_ignored() {
        let mut power = PowerController::new(LaunchConfig::<f32>::new());
        assert!(power.charge_release(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn release_speed_is_capped() {
        let config = LaunchConfig::<f32>::new().with_max_speed(Some(50.0));
        let mut power = PowerController::new(config);
        power.charge_start(Vec2::new(0.0, 0.0));
        for _ in 0..100 {
            power.grow();
        }
        let launch = power.charge_release(Vec2::new(0.0, 0.0), Vec2::new(0.0, -10.0)).unwrap();
        assert_eq!(launch.speed, 50.0);
        assert!(launch.velocity.y < -49.9);
        assert_eq!(power.state(), ChargeState::Idle);
    }
}
