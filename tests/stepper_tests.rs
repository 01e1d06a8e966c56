use core::time::Duration;

use limber::{ArmSimulation, NoOpStepObserver, SimConfig, StepMode};

fn roomy_clamp() -> SimConfig<f32> {
    SimConfig::fixed_step(800.0, 600.0).with_step_mode(StepMode::FixedTimestep {
        timestep: Duration::from_millis(5),
        max_frame: Duration::from_millis(100),
    })
}

fn run(config: SimConfig<f32>, ticks: &[f32]) -> ArmSimulation<f32> {
    let mut sim = ArmSimulation::new(config).unwrap();
    for &ms in ticks {
        sim.tick(ms);
    }
    sim
}

#[test]
fn irregular_ticks_track_wall_time() {
    let sim = run(roomy_clamp(), &[10.0, 50.0, 16.0, 40.0]);
    let wall = Duration::from_millis(116);
    let simulated = sim.simulated_time();
    assert!(simulated <= wall);
    assert!(wall - simulated < Duration::from_millis(5), "simulated {:?} of {:?}", simulated, wall);
    assert_eq!(sim.steps_taken(), 23);
}

#[test]
fn step_count_is_independent_of_tick_split() {
    let a = run(roomy_clamp(), &[10.0, 50.0, 16.0, 40.0]);
    let b = run(roomy_clamp(), &[58.0, 58.0]);
    let c = run(roomy_clamp(), &[29.0; 4]);
    let d = run(roomy_clamp(), &[1.0; 116]);

    for other in [&b, &c, &d] {
        assert_eq!(a.steps_taken(), other.steps_taken());
        assert_eq!(a.positions(), other.positions());
    }
}

#[test]
fn stalls_are_clamped_to_max_frame() {
    let mut sim = ArmSimulation::<f32>::new(SimConfig::fixed_step(800.0, 600.0)).unwrap();
    assert_eq!(sim.tick(1000.0), 6);
    assert_eq!(sim.simulated_time(), Duration::from_millis(30));
    assert!((sim.interpolation_alpha() - 0.6).abs() < 1e-9);
}

#[test]
fn leftover_carries_into_next_tick() {
    let mut sim = ArmSimulation::<f32>::new(SimConfig::fixed_step(800.0, 600.0)).unwrap();
    assert_eq!(sim.tick(4.0), 0);
    assert_eq!(sim.tick(4.0), 1);
    assert_eq!(sim.tick(2.0), 1);
    assert_eq!(sim.steps_taken(), 2);
}

#[test]
fn direct_mode_runs_one_step_per_tick() {
    let config = SimConfig::<f32>::fixed_step(800.0, 600.0).with_step_mode(StepMode::Direct);
    let mut sim = ArmSimulation::new(config).unwrap();
    assert_eq!(sim.tick(0.5), 1);
    assert_eq!(sim.tick(250.0), 1);
    assert_eq!(sim.steps_taken(), 2);
    assert_eq!(sim.simulated_time(), Duration::from_micros(250_500));

    sim.step();
    assert_eq!(sim.steps_taken(), 3);
}

#[test]
fn negative_elapsed_is_ignored() {
    let mut sim = ArmSimulation::<f32>::new(SimConfig::fixed_step(800.0, 600.0)).unwrap();
    assert_eq!(sim.advance(Duration::ZERO, &mut NoOpStepObserver), 0);
    assert_eq!(sim.tick(-16.0), 0);
    assert_eq!(sim.simulated_time(), Duration::ZERO);
}
