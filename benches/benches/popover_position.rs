// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_popover::popover::Popover;
use understory_popover::position::{Anchor, place};
use understory_popover::types::{Content, PopoverOptions};
use understory_surface::{Document, ElementId};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    // xorshift64*
    fn next_f64(&mut self, max: f64) -> f64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        let v = x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11;
        (v as f64 / (1_u64 << 53) as f64) * max
    }
}

fn gen_anchors(n: usize) -> Vec<Anchor> {
    let mut rng = Rng::new(0x5eed);
    (0..n)
        .map(|i| Anchor {
            top: Some(rng.next_f64(1200.0) - 200.0),
            left: (i % 2 == 0).then(|| rng.next_f64(1600.0) - 200.0),
            right: Some(rng.next_f64(1600.0)),
        })
        .collect()
}

fn bench_place(c: &mut Criterion) {
    let anchors = gen_anchors(4096);
    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let mut group = c.benchmark_group("place");
    group.throughput(Throughput::Elements(anchors.len() as u64));
    for (name, size) in [
        ("fits", Size::new(240.0, 180.0)),
        ("oversized", Size::new(2000.0, 1200.0)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for a in &anchors {
                    black_box(place(*a, size, viewport, true, 10.0));
                }
            });
        });
    }
    group.finish();
}

fn doc_with_scroller() -> (Document, ElementId) {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let scroller = doc.create_element(Some(doc.root()), &["scroller"], None);
    doc.set_flow_bounds(scroller, Rect::new(0.0, 40.0, 1280.0, 800.0));
    doc.set_scrolls(scroller, true);
    (doc, scroller)
}

fn bench_show_hide_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");
    group.bench_function("render_show_destroy", |b| {
        b.iter_batched(
            doc_with_scroller,
            |(mut doc, scroller)| {
                let mut p = Popover::new(
                    PopoverOptions::new(scroller)
                        .with_content(Content::Markup("3 more\nstandup\nreview".into()))
                        .with_top(700.0)
                        .with_right(1270.0)
                        .with_auto_hide(true),
                );
                p.show(&mut doc);
                p.destroy(&mut doc);
                black_box(doc);
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("toggle_100", |b| {
        b.iter_batched(
            || {
                let (mut doc, scroller) = doc_with_scroller();
                let mut p = Popover::new(
                    PopoverOptions::new(scroller)
                        .with_content(Content::Markup("3 more".into()))
                        .with_top(700.0)
                        .with_left(1200.0),
                );
                p.show(&mut doc);
                (doc, p)
            },
            |(mut doc, mut p)| {
                for _ in 0..100 {
                    p.hide(&mut doc);
                    p.show(&mut doc);
                }
                black_box(p.surface());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_place, bench_show_hide_cycle);
criterion_main!(benches);
