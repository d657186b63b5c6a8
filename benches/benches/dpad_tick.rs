// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_dpad::config::{PadConfig, SnapPolicy};
use understory_dpad::engine::PadEngine;
use understory_dpad::gate::{Thresholds, gate};
use understory_dpad::types::{KeyEvent, KeySet};

const POLICIES: [SnapPolicy; 4] = [
    SnapPolicy::Off,
    SnapPolicy::Four,
    SnapPolicy::Eight,
    SnapPolicy::Smart,
];

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A jittery finger path wandering across (and past) a 200×200 pad.
fn gen_walk(frames: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut p = Point::new(100.0, 100.0);
    let mut out = Vec::with_capacity(frames);
    for _ in 0..frames {
        p += Vec2::new(rng.next_f64() - 0.5, rng.next_f64() - 0.5) * 24.0;
        p.x = p.x.clamp(-50.0, 250.0);
        p.y = p.y.clamp(-50.0, 250.0);
        out.push(p);
    }
    out
}

fn gen_vectors(count: usize) -> Vec<Vec2> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| Vec2::new(rng.next_f64() * 2.0 - 1.0, rng.next_f64() * 2.0 - 1.0))
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
    let walk = gen_walk(600);
    group.throughput(Throughput::Elements(walk.len() as u64));
    for snap in POLICIES {
        let config = PadConfig {
            snap,
            haptics: false,
            ..PadConfig::default()
        };
        group.bench_function(format!("walk_{snap:?}"), |b| {
            b.iter_batched(
                || PadEngine::new(config, bounds, Vec::<KeyEvent>::with_capacity(256)),
                |mut pad| {
                    pad.begin_contact(1, walk[0]);
                    for &p in &walk {
                        pad.update_contact(1, p);
                        black_box(pad.tick());
                    }
                    black_box(pad.drain_events().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate");
    let vectors = gen_vectors(4096);
    let th = Thresholds::new(0.28, 0.72);
    group.throughput(Throughput::Elements(vectors.len() as u64));
    for snap in POLICIES {
        group.bench_function(format!("{snap:?}"), |b| {
            b.iter(|| {
                let mut held = KeySet::empty();
                for &v in &vectors {
                    held = gate(black_box(v), snap, th, held).keys();
                }
                black_box(held)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick, bench_gate);
criterion_main!(benches);
