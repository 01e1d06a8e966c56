use limber::{Particle, Spring, StiffnessLaw, Vec2};
use limber::vec::Vec;

fn relaxed_distance(start: Vec2<f32>, law: StiffnessLaw<f32>, stiffness: f32, iterations: usize) -> f32 {
    let mut particles = [
        Particle::new(Vec2::new(0.0, 0.0), 1.0, 5.0),
        Particle::new(start, 1.0, 5.0),
    ];
    let spring = Spring::new(0, 1, 10.0, stiffness);
    for _ in 0..iterations {
        spring.relax(&mut particles, &law, 0.5);
    }
    particles[0].pos.distance(particles[1].pos)
}

#[test]
fn extension_law_converges_to_rest_length() {
    for start in [Vec2::new(3.0, 0.0), Vec2::new(12.0, 9.0), Vec2::new(0.0, -30.0), Vec2::new(-7.0, 1.0)] {
        let dist = relaxed_distance(start, StiffnessLaw::extension(), 0.5, 50);
        assert!((dist - 10.0).abs() < 0.01, "start {:?} settled at {}", start, dist);
    }
}

#[test]
fn symmetric_law_converges_to_rest_length() {
    for start in [Vec2::new(3.0, 0.0), Vec2::new(12.0, 9.0), Vec2::new(0.0, -30.0), Vec2::new(-7.0, 1.0)] {
        let dist = relaxed_distance(start, StiffnessLaw::symmetric(), 0.2, 100);
        assert!((dist - 10.0).abs() < 0.01, "start {:?} settled at {}", start, dist);
    }
}

#[test]
fn relaxation_conserves_midpoint_at_even_split() {
    let mut particles = [
        Particle::new(Vec2::new(0.0f32, 0.0), 1.0, 5.0),
        Particle::new(Vec2::new(30.0, 0.0), 1.0, 5.0),
    ];
    let spring = Spring::new(0, 1, 10.0, 0.5);
    for _ in 0..10 {
        spring.relax(&mut particles, &StiffnessLaw::extension(), 0.5);
    }
    let mid = (particles[0].pos.x + particles[1].pos.x) * 0.5;
    assert!((mid - 15.0).abs() < 1e-4, "midpoint drifted to {}", mid);
}

#[test]
fn stretch_reports_signed_error() {
    let particles = [
        Particle::new(Vec2::new(0.0f32, 0.0), 1.0, 5.0),
        Particle::new(Vec2::new(6.0, 8.0), 1.0, 5.0),
    ];
    let spring = Spring::new(0, 1, 12.0, 0.5);
    assert!((spring.stretch(&particles) - -2.0).abs() < 1e-5);
}
