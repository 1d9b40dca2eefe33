// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover basics.
//!
//! Builds a month grid inside a scrolling container, then opens a "more events" popover anchored
//! to the right edge of a cell near the bottom of the viewport. Prints where the panel lands
//! before and after the container shrinks.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover_basics`
//! - `RUST_LOG=understory_popover=trace cargo run -p understory_demos --example popover_basics`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_popover::popover::Popover;
use understory_popover::types::{Content, PopoverOptions};
use understory_surface::Document;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let scroller = doc.create_element(Some(doc.root()), &["month-scroller"], None);
    doc.set_flow_bounds(scroller, Rect::new(0.0, 48.0, 1024.0, 768.0));
    doc.set_scrolls(scroller, true);

    // A 7x6 grid of day cells.
    let cell = Size::new(1024.0 / 7.0, 120.0);
    let mut cells = Vec::new();
    for row in 0..6 {
        for col in 0..7 {
            let id = doc.create_element(Some(scroller), &["day"], None);
            let x = f64::from(col) * cell.width;
            let y = 48.0 + f64::from(row) * cell.height;
            doc.set_flow_bounds(id, Rect::new(x, y, x + cell.width, y + cell.height));
            cells.push(id);
        }
    }

    let events: Vec<_> = ["09:00 standup", "12:30 lunch with sam", "16:00 review"]
        .into_iter()
        .map(|title| doc.create_element(None, &["event"], Some(title)))
        .collect();
    let close = doc.create_element(None, &["close"], Some("x"));

    // Anchor to the right edge of the last cell in the fifth row.
    let anchor = doc.bounding_rect(cells[4 * 7 + 6]);
    let mut popover = Popover::new(
        PopoverOptions::new(scroller)
            .with_class_name("more-events")
            .with_content(Content::Elements([vec![close], events].concat()))
            .with_top(anchor.y0)
            .with_right(anchor.x1)
            .with_auto_hide(true)
            .on_show(|| println!("  on_show"))
            .on_hide(|| println!("  on_hide")),
    );

    println!("== Show ==");
    popover.show(&mut doc);
    let surface = popover.surface().expect("rendered by show");
    println!("  anchor={anchor:?}");
    println!("  panel ={:?}", doc.bounding_rect(surface));

    println!("== Shrink the scroller and reposition ==");
    doc.set_flow_bounds(scroller, Rect::new(0.0, 48.0, 1024.0, 500.0));
    popover.position(&mut doc);
    println!("  panel ={:?}", doc.bounding_rect(surface));

    println!("== Hide, then destroy ==");
    popover.hide(&mut doc);
    popover.destroy(&mut doc);
    println!("  state={:?} alive={}", popover.visibility(), doc.is_alive(surface));
}
