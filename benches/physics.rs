//! Benchmarks for limber arm simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use limber::*;

fn bench_fixed_step_ticks(c: &mut Criterion) {
    c.bench_function("arm_10_segments_fixed_step_60_ticks", |b| {
        b.iter(|| {
            let mut sim: ArmSimulation<f32> =
                ArmSimulation::new(SimConfig::fixed_step(800.0, 600.0)).unwrap();
            for _ in 0..60 {
                sim.tick(16.0);
            }
            sim.positions()
        });
    });
}

fn bench_unit_step_launch(c: &mut Criterion) {
    c.bench_function("arm_10_segments_unit_step_launch_120_ticks", |b| {
        b.iter(|| {
            let mut sim: ArmSimulation<f32> =
                ArmSimulation::new(SimConfig::unit_step(800.0, 600.0)).unwrap();
            sim.charge_start(700.0, 100.0);
            for _ in 0..20 {
                sim.tick(16.0);
            }
            sim.charge_release(700.0, 100.0);
            for _ in 0..100 {
                sim.tick(16.0);
            }
            sim.positions()
        });
    });
}

fn bench_long_arm_relaxation(c: &mut Criterion) {
    c.bench_function("arm_100_segments_fixed_step_60_ticks", |b| {
        b.iter(|| {
            let config = SimConfig::<f32>::fixed_step(800.0, 2400.0);
            let chain = config.chain.clone().with_segments(100);
            let mut sim = ArmSimulation::new(config.with_chain(chain)).unwrap();
            for _ in 0..60 {
                sim.tick(16.0);
            }
            sim.positions()
        });
    });
}

criterion_group!(benches, bench_fixed_step_ticks, bench_unit_step_launch, bench_long_arm_relaxation);
criterion_main!(benches);
