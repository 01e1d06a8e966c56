//! Maps host wall-clock ticks onto physics updates.

use core::time::Duration;
use crate::error::PhysicsError;

/// Upper bound on `max_frame / timestep`, the updates one tick may owe.
pub const MAX_STEPS_PER_FRAME: u32 = 1_000;

/// How a tick's elapsed time becomes physics updates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepMode {
    /// One update per tick, `dt` equal to the elapsed time.
    Direct,
    /// Drain an accumulator in `timestep` slices, each tick adding at most `max_frame`.
    FixedTimestep { timestep: Duration, max_frame: Duration },
}

impl StepMode {
    /// 5 ms steps, 33 ms catch-up ceiling.
    pub fn fixed() -> Self {
        StepMode::FixedTimestep {
            timestep: Duration::from_millis(5),
            max_frame: Duration::from_millis(33),
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        match *self {
            StepMode::Direct => Ok(()),
            StepMode::FixedTimestep { timestep, max_frame } => {
                if timestep.is_zero() || timestep > max_frame {
                    return Err(PhysicsError::InvalidTimestep);
                }
                let per_frame = max_frame.as_nanos() / timestep.as_nanos();
                if per_frame > u128::from(MAX_STEPS_PER_FRAME) {
                    return Err(PhysicsError::TooManyStepsPerFrame(per_frame));
                }
                Ok(())
            }
        }
    }
}

/// Physics updates owed for one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepPlan {
    pub steps: u32,
    pub dt: Duration,
    /// Elapsed time discarded by the frame clamp.
    pub dropped: Duration,
}

/// Carries leftover time between ticks.
#[derive(Clone, Debug)]
pub struct Stepper {
    mode: StepMode,
    accumulator: Duration,
    last_dt: Duration,
    nominal_dt: Duration,
}

impl Stepper {
    /// `nominal_dt` is the step length reported before the first direct tick.
    pub fn new(mode: StepMode, nominal_dt: Duration) -> Self {
        let last_dt = match mode {
            StepMode::Direct => nominal_dt,
            StepMode::FixedTimestep { timestep, .. } => timestep,
        };
        Stepper {
            mode,
            accumulator: Duration::ZERO,
            last_dt,
            nominal_dt,
        }
    }

    /// Account for `elapsed` wall time and return the updates to run.
    pub fn plan(&mut self, elapsed: Duration) -> StepPlan {
        match self.mode {
            StepMode::Direct => {
                self.last_dt = elapsed;
                StepPlan { steps: 1, dt: elapsed, dropped: Duration::ZERO }
            }
            StepMode::FixedTimestep { timestep, max_frame } => {
                let frame = elapsed.min(max_frame);
                self.accumulator += frame;

                let owed = self.accumulator.as_nanos() / timestep.as_nanos();
                let steps = u32::try_from(owed).unwrap_or(u32::MAX);
                self.accumulator -= timestep * steps;
                StepPlan { steps, dt: timestep, dropped: elapsed - frame }
            }
        }
    }

    /// Step length used by the most recent update.
    pub fn last_dt(&self) -> Duration {
        self.last_dt
    }

    /// Step length a launch impulse is scaled by. A zero-length direct tick
    /// falls back to the nominal step so the impulse is never lost.
    pub fn impulse_dt(&self) -> Duration {
        if self.last_dt.is_zero() {
            self.nominal_dt
        } else {
            self.last_dt
        }
    }

    /// Time carried over to the next tick.
    pub fn leftover(&self) -> Duration {
        self.accumulator
    }

    /// Fraction of a step sitting in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f64 {
        match self.mode {
            StepMode::Direct => 0.0,
            StepMode::FixedTimestep { timestep, .. } => {
                self.accumulator.as_secs_f64() / timestep.as_secs_f64()
            }
        }
    }
}

/// Host milliseconds to a whole-microsecond duration; negative or NaN is zero.
pub fn millis_to_duration(ms: f64) -> Duration {
    let micros = libm::round(ms * 1000.0);
    if micros > 0.0 {
        Duration::from_micros(micros as u64)
    } else {
        Duration::ZERO
    }
}
