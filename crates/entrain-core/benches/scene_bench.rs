//! Benchmarks for hero scene composition.
//!
//! Performance budget: composing one frame for a 1920 px-wide hero banner
//! must stay far below a 60 Hz frame (< 1ms with generous margin), since the
//! browser shell runs this once per animation frame on the main thread.
//!
//! Run with: cargo bench -p entrain-core --bench scene_bench

use core::time::Duration;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use entrain_core::oscillator::{CoherentTarget, OSCILLATOR_BANK};
use entrain_core::scene::compose;
use entrain_core::schedule::CouplingSchedule;
use entrain_core::{HeroPlayer, MotionPreference, SurfaceGeometry};

/// Common hero banner sizes in CSS pixels.
const SIZES: &[(f32, f32, &str)] = &[
    (640.0, 320.0, "640x320"),
    (1280.0, 420.0, "1280x420"),
    (1920.0, 600.0, "1920x600"),
];

fn bench_scene_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene/compose");
    let schedule = CouplingSchedule::default();
    let target = CoherentTarget::default();

    for &(width, height, name) in SIZES {
        let samples = (width / 3.0).ceil() as u64 + 1;
        group.throughput(Throughput::Elements(samples * OSCILLATOR_BANK.len() as u64));

        // Mid-entrainment is the most expensive instant: every oscillator sits
        // on its own point of the staggered ramp.
        group.bench_with_input(
            BenchmarkId::new("entraining", name),
            &(width, height),
            |b, &(w, h)| {
                let geometry = SurfaceGeometry::new(w, h, 2.0);
                let elapsed = Duration::from_secs_f64(32.0 * 0.33);
                b.iter(|| {
                    let scene = compose(
                        &schedule,
                        &OSCILLATOR_BANK,
                        &target,
                        black_box(geometry),
                        black_box(elapsed),
                    );
                    black_box(scene);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("coherent", name),
            &(width, height),
            |b, &(w, h)| {
                let geometry = SurfaceGeometry::new(w, h, 2.0);
                let elapsed = Duration::from_secs_f64(32.0 * 0.50);
                b.iter(|| {
                    let scene = compose(
                        &schedule,
                        &OSCILLATOR_BANK,
                        &target,
                        black_box(geometry),
                        black_box(elapsed),
                    );
                    black_box(scene);
                });
            },
        );
    }

    group.finish();
}

fn bench_player_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("player/step");
    let frame = Duration::from_millis(16);

    for &(width, height, name) in SIZES {
        group.bench_with_input(
            BenchmarkId::new("full_motion", name),
            &(width, height),
            |b, &(w, h)| {
                let geometry = SurfaceGeometry::new(w, h, 2.0);
                let mut player = HeroPlayer::new(geometry, MotionPreference::Full);
                b.iter(|| {
                    let outcome = player.step(black_box(frame));
                    black_box(outcome);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scene_compose, bench_player_step);
criterion_main!(benches);
