//! Benchmark tests for kino-touch operations
//!
//! Run with: cargo bench -p kino-touch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

use kino_touch::config::keys;
use kino_touch::{CustomBand, GestureConfig, GestureEngine, PointerEvent, PropertyChange};

// ============================================================================
// Helpers
// ============================================================================

fn drag_events(start_x: f32, y: f32, moves: usize) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(moves + 2);
    events.push(PointerEvent::down(start_x, y, 0));
    for i in 1..=moves {
        events.push(PointerEvent::moved(start_x + i as f32 * 3.0, y, i as u64 * 8));
    }
    events.push(PointerEvent::up(
        start_x + moves as f32 * 3.0,
        y,
        moves as u64 * 8 + 8,
    ));
    events
}

fn scrub_settings() -> HashMap<String, String> {
    HashMap::from([(keys::GESTURE_CUSTOM_ZONE.to_string(), "scrub".to_string())])
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let band = CustomBand::default();
    c.bench_function("zone_classify", |b| {
        b.iter(|| {
            for i in 0..100 {
                let x = i as f32 * 19.2;
                let y = i as f32 * 10.8;
                black_box(band.classify(black_box(x), black_box(y), 1920.0, 1080.0));
            }
        })
    });
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_drag");
    for moves in [10usize, 100, 500] {
        let events = drag_events(100.0, 900.0, moves);
        group.bench_with_input(BenchmarkId::new("seek", moves), &events, |b, events| {
            b.iter(|| {
                let mut count = 0u32;
                let mut engine = GestureEngine::new(|_: PropertyChange, _: f32| count += 1);
                engine.set_metrics(1920.0, 1080.0).ok();
                for event in events {
                    black_box(engine.handle(event));
                }
                drop(engine);
                black_box(count)
            })
        });

        let events = drag_events(1400.0, 540.0, moves);
        group.bench_with_input(BenchmarkId::new("frame_step", moves), &events, |b, events| {
            b.iter(|| {
                let mut frames = 0f32;
                let mut engine = GestureEngine::new(|change: PropertyChange, value: f32| {
                    if change == PropertyChange::FrameScrub {
                        frames += value;
                    }
                });
                engine.set_metrics(1920.0, 1080.0).ok();
                engine.sync_settings(&scrub_settings());
                for event in events {
                    black_box(engine.handle(event));
                }
                drop(engine);
                black_box(frames)
            })
        });
    }
    group.finish();
}

fn bench_settings(c: &mut Criterion) {
    let settings = scrub_settings();
    c.bench_function("settings_resolve", |b| {
        b.iter(|| black_box(GestureConfig::from_source(black_box(&settings))))
    });
}

criterion_group!(benches, bench_classify, bench_drag, bench_settings);
criterion_main!(benches);
