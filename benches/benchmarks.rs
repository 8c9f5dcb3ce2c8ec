use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ekf_localization::simulator::{run_ekf, SimConfig};
use ekf_localization::state_estimator::ekf::{GaussParams, EKF};
use ekf_localization::state_estimator::models::dynamic::Unicycle;
use ekf_localization::state_estimator::models::measurement::CartesianPosition;
use ekf_localization::state_estimator::StateEstimator;
use nalgebra::Vector2;

fn criterion_benchmark(c: &mut Criterion) {
    let ekf = EKF::new(
        Unicycle::new(0.1, 1.0_f64.to_radians(), 1.0),
        CartesianPosition::new(1.0),
    );
    let z = Vector2::new(0.11, 0.02);
    let u = Vector2::new(1.0, 0.1);

    c.bench_function("ekf_step", |b| {
        b.iter(|| {
            ekf.step(black_box(&z), GaussParams::initial(), black_box(&u), 0.1)
                .unwrap()
        })
    });

    c.bench_function("run_ekf", |b| {
        let cfg = SimConfig::default();
        b.iter(|| run_ekf(black_box(&cfg)).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
