// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-click dismissal and close controls.
//!
//! A tiny dispatcher hit-tests pointer presses against the document, delivers pointer-down to
//! every owner in the document listener table, and delivers clicks to owners listening on the
//! hit element or one of its ancestors.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover_dismiss`

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_popover::popover::Popover;
use understory_popover::types::{Content, EventKind, PointerEvent, PopoverOptions};
use understory_surface::{Document, ElementId, ListenTarget};

fn measure(markup: &str) -> Size {
    Size::new(160.0, 24.0 * markup.lines().count() as f64)
}

/// Press and release at `pt`: pointer-down to document listeners, then click to the hit path.
fn press(doc: &mut Document, popovers: &mut [Popover<ElementId>], pt: Point) {
    let Some(target) = doc.hit_test(pt) else {
        return;
    };
    println!("  press at {pt:?} hits {target:?}");

    let owners: Vec<u64> = doc
        .listeners(ListenTarget::Document, EventKind::PointerDown.name())
        .collect();
    deliver(doc, popovers, &owners, EventKind::PointerDown, target);

    let owners: Vec<u64> = doc
        .path_to(target)
        .into_iter()
        .flat_map(|el| {
            doc.listeners(ListenTarget::Element(el), EventKind::Click.name())
                .collect::<Vec<_>>()
        })
        .collect();
    deliver(doc, popovers, &owners, EventKind::Click, target);
}

fn deliver(
    doc: &mut Document,
    popovers: &mut [Popover<ElementId>],
    owners: &[u64],
    kind: EventKind,
    target: ElementId,
) {
    let event = PointerEvent { kind, target };
    for p in popovers.iter_mut() {
        if owners.contains(&p.owner().get()) && p.handle_event(doc, &event) {
            println!("    {kind:?} hid popover {:?}", p.surface());
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new(Size::new(800.0, 600.0)).with_measure(measure);
    let grid = doc.create_element(Some(doc.root()), &["grid"], None);
    doc.set_flow_bounds(grid, Rect::new(0.0, 0.0, 800.0, 600.0));

    let close = doc.create_element(None, &["close"], Some("close"));
    let body = doc.create_element(None, &["body"], Some("standup\nreview"));
    let mut popovers = vec![
        Popover::new(
            PopoverOptions::new(grid)
                .with_content(Content::Elements(vec![close, body]))
                .with_top(100.0)
                .with_left(100.0)
                .with_auto_hide(true),
        ),
        Popover::new(
            PopoverOptions::new(grid)
                .with_content(Content::Markup("pinned".into()))
                .with_top(300.0)
                .with_left(400.0),
        ),
    ];
    for p in &mut popovers {
        p.show(&mut doc);
    }
    println!(
        "document pointer-down listeners: {}",
        doc.listener_count(ListenTarget::Document, "pointerdown")
    );

    println!("== Press inside the body ==");
    press(&mut doc, &mut popovers, Point::new(120.0, 140.0));
    println!("== Press on empty grid ==");
    press(&mut doc, &mut popovers, Point::new(700.0, 500.0));

    println!("== Reopen and press the close control ==");
    popovers[0].show(&mut doc);
    press(&mut doc, &mut popovers, Point::new(120.0, 110.0));

    for (i, p) in popovers.iter().enumerate() {
        println!("popover {i}: {:?}", p.visibility());
    }
    for p in &mut popovers {
        p.destroy(&mut doc);
    }
    println!(
        "document pointer-down listeners after destroy: {}",
        doc.listener_count(ListenTarget::Document, "pointerdown")
    );
}
