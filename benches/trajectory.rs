//! Trajectory benchmarks
//!
//! - Building: full mirror engine runs for increasing step counts, including a
//!   strong-field case that forces step refinement
//! - Playback: stepping the controller through a built trajectory

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mirrorscope::config::MirrorConfig;
use mirrorscope::physics::{MirrorEngine, TrajectoryEngine};
use mirrorscope::playback::{PlaybackController, TrajectoryCache};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory_build");
    let engine = MirrorEngine::default();

    for steps in [100, 1_000, 10_000] {
        let config = MirrorConfig {
            step_count: steps,
            ..MirrorConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("reference", steps), &config, |b, config| {
            b.iter(|| engine.build(black_box(config)));
        });
    }

    let refined = MirrorConfig {
        field_strength: 4.0,
        step_count: 1_000,
        ..MirrorConfig::default()
    };
    group.bench_function("refined", |b| {
        b.iter(|| engine.build(black_box(&refined)));
    });

    group.finish();
}

fn bench_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback");
    let engine = MirrorEngine::default();
    let config = MirrorConfig {
        step_count: 10_000,
        ..MirrorConfig::default()
    };
    let trajectory = TrajectoryCache::default()
        .build(&engine, config)
        .expect("reference configuration builds");

    for stride in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::new("episode", stride), &stride, |b, &stride| {
            b.iter(|| {
                let mut controller = PlaybackController::new(stride);
                controller.load(trajectory.clone());
                controller.start();
                let mut published = 0usize;
                while let Some(step) = controller.advance() {
                    if let Some(index) = step.published() {
                        published += black_box(trajectory.quantities(index, &engine)).is_some() as usize;
                    }
                }
                published
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_playback);
criterion_main!(benches);
