//! The arm simulation context: owns all state and runs physics updates per tick.

use core::time::Duration;

use crate::float::Float;
use crate::vec::Vec2;
use crate::chain::ArmChain;
use crate::config::SimConfig;
use crate::constraint::BoundsConstraint;
use crate::error::PhysicsError;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{IntegrationMode, Particle};
use crate::platform::{Platform, Rect};
use crate::power::{Launch, PowerController};
use crate::snapshot::Snapshot;
use crate::solver::{ConstraintSolver, SolverConfig};
use crate::stepper::{millis_to_duration, Stepper};
use alloc::vec::Vec as AllocVec;

/// An arm pinned at its base, a platform and a launch controller.
///
/// State changes only inside [`tick`](Self::tick), [`step`](Self::step) and
/// the two charge commands; everything else reads.
///
/// ```
/// use limber::{ArmSimulation, SimConfig};
///
/// let mut sim: ArmSimulation<f32> = ArmSimulation::new(SimConfig::fixed_step(800.0, 600.0)).unwrap();
/// sim.charge_start(700.0, 400.0);
/// sim.tick(16.0);
/// sim.charge_release(700.0, 400.0);
/// assert_eq!(sim.base().pos, sim.anchor());
/// ```
pub struct ArmSimulation<F: Float> {
    chain: ArmChain<F>,
    solver: SolverConfig<F>,
    platform: Platform<F>,
    bounds: BoundsConstraint<F>,
    power: PowerController<F>,
    stepper: Stepper,
    simulated: Duration,
    steps_taken: u64,
}

impl<F: Float> ArmSimulation<F> {
    pub fn new(config: SimConfig<F>) -> Result<Self, PhysicsError> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "rejected arm configuration");
            return Err(err);
        }
        let SimConfig { solver, chain, platform, bounds, launch, step_mode, nominal_dt } = config;

        let arm = ArmChain::new(&chain);
        tracing::debug!(
            segments = arm.segment_count(),
            springs = arm.spring_count(),
            anchor_x = chain.anchor.x.to_f64(),
            anchor_y = chain.anchor.y.to_f64(),
            ?step_mode,
            "arm simulation created"
        );

        Ok(ArmSimulation {
            chain: arm,
            solver,
            platform,
            bounds,
            power: PowerController::new(launch),
            stepper: Stepper::new(step_mode, nominal_dt),
            simulated: Duration::ZERO,
            steps_taken: 0,
        })
    }

    /// Advance by a host tick of `elapsed_ms` milliseconds. Returns the number
    /// of physics updates run.
    pub fn tick(&mut self, elapsed_ms: F) -> u32 {
        self.tick_observed(elapsed_ms, &mut NoOpStepObserver)
    }

    pub fn tick_observed<O: StepObserver>(&mut self, elapsed_ms: F, observer: &mut O) -> u32 {
        self.advance(millis_to_duration(elapsed_ms.to_f64()), observer)
    }

    /// Advance by an exact wall-clock duration.
    pub fn advance<O: StepObserver>(&mut self, elapsed: Duration, observer: &mut O) -> u32 {
        let plan = self.stepper.plan(elapsed);
        if !plan.dropped.is_zero() {
            tracing::debug!(dropped_us = plan.dropped.as_micros() as u64, "tick clamped");
        }

        let dt = F::from_f64(plan.dt.as_secs_f64());
        for _ in 0..plan.steps {
            self.update(dt, observer);
            self.simulated += plan.dt;
        }
        self.steps_taken += u64::from(plan.steps);
        tracing::trace!(steps = plan.steps, "tick");
        plan.steps
    }

    /// Exactly one physics update at the current step length.
    pub fn step(&mut self) {
        let dt = self.stepper.last_dt();
        self.update(F::from_f64(dt.as_secs_f64()), &mut NoOpStepObserver);
        self.simulated += dt;
        self.steps_taken += 1;
    }

    fn update<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        self.power.grow();

        let config = &self.solver;
        self.chain.integrate(
            config.gravity,
            config.damping,
            config.integration,
            dt,
            config.max_velocity,
        );
        observer.on_integrate();

        let (particles, springs, pin) = self.chain.parts_mut();
        ConstraintSolver::new(config).solve(particles, springs, pin, observer);

        for (index, particle) in particles.iter_mut().enumerate() {
            if particle.pinned {
                continue;
            }
            if self.platform.resolve(particle) {
                observer.on_platform_contact(index);
            }
        }

        self.bounds.solve(particles);

        if let Some(max) = config.max_velocity {
            self.chain.clamp_velocities(max);
        }
        observer.on_step_complete();
    }

    /// Begin charging toward `(x, y)`, resetting power to the baseline.
    pub fn charge_start(&mut self, x: F, y: F) {
        self.power.charge_start(Vec2::new(x, y));
        tracing::debug!(power = self.power.power().to_f64(), "charge started");
    }

    /// Release the charge toward `(x, y)` and fling the hand. Ignored while idle.
    pub fn charge_release(&mut self, x: F, y: F) -> Option<Launch<F>> {
        self.charge_release_observed(x, y, &mut NoOpStepObserver)
    }

    pub fn charge_release_observed<O: StepObserver>(
        &mut self,
        x: F,
        y: F,
        observer: &mut O,
    ) -> Option<Launch<F>> {
        let origin = self.chain.hand().pos;
        let Some(launch) = self.power.charge_release(origin, Vec2::new(x, y)) else {
            tracing::debug!("release ignored, not charging");
            return None;
        };

        let scale = self.velocity_scale();
        self.chain.hand_mut().set_velocity(launch.velocity, scale);
        observer.on_launch(launch.power.to_f64());
        tracing::debug!(
            power = launch.power.to_f64(),
            angle = launch.angle.to_f64(),
            speed = launch.speed.to_f64(),
            "hand launched"
        );
        Some(launch)
    }

    /// Per-second to per-step velocity factor for the configured integration.
    fn velocity_scale(&self) -> F {
        let dt = F::from_f64(self.stepper.impulse_dt().as_secs_f64());
        self.solver.integration.velocity_scale(dt)
    }

    /// Segment positions base first, hand last.
    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.chain.positions()
    }

    pub fn spring_segments(&self) -> AllocVec<(Vec2<F>, Vec2<F>)> {
        self.chain.spring_segments()
    }

    pub fn platform(&self) -> Rect<F> {
        self.platform.rect
    }

    pub fn power(&self) -> F {
        self.power.power()
    }

    pub fn max_power(&self) -> F {
        self.power.max_power()
    }

    pub fn power_fraction(&self) -> F {
        self.power.fraction()
    }

    pub fn is_charging(&self) -> bool {
        self.power.is_charging()
    }

    pub fn aim_target(&self) -> Option<Vec2<F>> {
        self.power.target()
    }

    pub fn hand(&self) -> &Particle<F> {
        self.chain.hand()
    }

    pub fn base(&self) -> &Particle<F> {
        self.chain.base()
    }

    pub fn anchor(&self) -> Vec2<F> {
        self.chain.anchor()
    }

    pub fn chain(&self) -> &ArmChain<F> {
        &self.chain
    }

    /// Hand velocity per second when time-scaled, per step when unit-step.
    pub fn hand_velocity(&self) -> Vec2<F> {
        let hand = self.chain.hand();
        match self.solver.integration {
            IntegrationMode::TimeScaled => {
                hand.velocity(F::from_f64(self.stepper.impulse_dt().as_secs_f64()))
            }
            IntegrationMode::UnitStep => hand.velocity_raw(),
        }
    }

    /// Sum of the step lengths of every update run so far.
    pub fn simulated_time(&self) -> Duration {
        self.simulated
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Leftover accumulator time as a fraction of one step.
    pub fn interpolation_alpha(&self) -> f64 {
        self.stepper.alpha()
    }

    pub fn snapshot(&self) -> Snapshot<F> {
        Snapshot {
            positions: self.positions(),
            springs: self.spring_segments(),
            platform: self.platform(),
            power: self.power(),
            max_power: self.max_power(),
            charging: self.is_charging(),
            aim_target: self.aim_target(),
            hand_velocity: self.hand_velocity(),
        }
    }
}
