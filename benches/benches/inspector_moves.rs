// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_inspector::agent::{AgentEvent, LocalAgent};
use understory_inspector::hit_test::{Topmost, View, ViewList};
use understory_inspector::session::InspectionSession;

fn gen_grid_views(n: usize, cell: f64) -> ViewList<u32> {
    let mut views = ViewList::new();
    let root = views.push(
        None,
        View::new(Rect::new(0.0, 0.0, n as f64 * cell, n as f64 * cell)).with_instance(0),
    );
    let mut id = 1_u32;
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            // Every other cell is native-only and resolves to the root instance.
            let view = View::new(Rect::new(x0, y0, x0 + cell, y0 + cell)).with_z_index(1);
            let view = if (x + y) % 2 == 0 {
                view.with_instance(id)
            } else {
                view
            };
            views.push(Some(root), view);
            id += 1;
        }
    }
    views
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // xorshift64*
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        let v = self.0.wrapping_mul(0x2545_f491_4f6c_dd1d);
        (v >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_points(count: usize, extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    // Overshoot the content so a share of moves miss.
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent * 1.2, rng.next_f64() * extent * 1.2))
        .collect()
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspector_moves");
    for &n in &[8_usize, 32, 64] {
        let cell = 10.0;
        let points = gen_points(1_000, n as f64 * cell, 0x5eed);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter_batched(
                || {
                    let agent = Rc::new(LocalAgent::new());
                    let session = InspectionSession::mount(
                        agent.clone(),
                        Topmost::new(),
                        Some(gen_grid_views(n, cell)),
                    );
                    agent.emit(AgentEvent::StartInspectingNative);
                    (agent, session)
                },
                |(agent, session)| {
                    for &p in &points {
                        black_box(session.on_move(p));
                    }
                    black_box(agent.take_messages().len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_moves);
criterion_main!(benches);
