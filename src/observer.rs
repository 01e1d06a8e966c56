//! Step observer trait for monitoring physics simulation progress.

/// Trait for observing physics simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after all free particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each spring relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called for each particle pushed out of the platform.
    fn on_platform_contact(&mut self, _particle: usize) {}

    /// Called when one physics update is fully complete.
    fn on_step_complete(&mut self) {}

    /// Called when the hand receives a launch impulse.
    fn on_launch(&mut self, _power: f64) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
