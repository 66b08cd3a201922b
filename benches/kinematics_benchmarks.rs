//! Kinematics benchmarks.
//!
//! Measures the per-frame cost a host pays: one session step with and
//! without rendering, and trajectory overlay sampling.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kinesim::config::{DemoPreset, DisplayToggles, SessionConfig};
use kinesim::engine::{KinematicSession, MotionLaw, TerminationPolicy, TrajectorySampler};
use kinesim::render::{CommandRecorder, NullComposer, Viewport};

/// One headless frame per motion law.
fn bench_session_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_step");
    group.sample_size(100);
    group.confidence_level(0.95);

    for preset in [DemoPreset::Accelerated, DemoPreset::Uniform, DemoPreset::Circular] {
        group.bench_with_input(BenchmarkId::new("advance", preset), &preset, |b, &preset| {
            let config = SessionConfig::builder().preset(preset).running(true).build();
            let Ok(mut session) = KinematicSession::new(config) else {
                return;
            };
            let mut t = 0.0;
            b.iter(|| {
                t += 1000.0 / 60.0;
                black_box(session.step(t, &mut NullComposer))
            });
        });
    }

    group.finish();
}

/// One recorded frame with every overlay enabled.
fn bench_recorded_frame(c: &mut Criterion) {
    let config = SessionConfig::builder()
        .preset(DemoPreset::Accelerated)
        .display(DisplayToggles::all())
        .build();
    let Ok(mut session) = KinematicSession::new(config) else {
        return;
    };
    let mut recorder = CommandRecorder::new(Viewport::from_config(&session.config().viewport));
    let mut t = 0.0;

    c.bench_function("recorded_frame_all_overlays", |b| {
        b.iter(|| {
            t += 1000.0 / 60.0;
            session.step(t, &mut recorder);
            black_box(recorder.frame().len())
        });
    });
}

/// Overlay sampling at increasing resolution.
fn bench_trajectory_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory_sample");
    let initial = DemoPreset::Projectile.config().initial_state();

    for intervals in [20_usize, 200, 2_000] {
        group.bench_with_input(
            BenchmarkId::new("projectile", intervals),
            &intervals,
            |b, &intervals| {
                let sampler = TrajectorySampler::new(intervals, 10.0);
                b.iter(|| {
                    black_box(sampler.sample(
                        &MotionLaw::ConstantAcceleration,
                        &initial,
                        TerminationPolicy::GroundContact,
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_session_step,
    bench_recorded_frame,
    bench_trajectory_sampling
);
criterion_main!(benches);
