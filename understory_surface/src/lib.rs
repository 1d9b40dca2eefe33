// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_surface --heading-base-level=0

//! Understory Surface: a small retained element tree that stands in for a host page.
//!
//! Overlay components need a handful of things from the page they float over: a place to
//! create and remove elements, inline offsets and display toggling, page-space bounding
//! rectangles, the nearest scroll container, subtree containment, and a document-level
//! listener table. This crate provides exactly that over Kurbo geometry, so overlay logic can
//! run headless in tests, benches, and non-browser toolkits.
//!
//! - [`Document`]: the element tree, owning a root element that spans the viewport.
//! - [`ElementId`]: generational handle of an element.
//! - [`ElementFlags`]: display and scroll-container bits.
//! - [`ListenTarget`] / [`Listener`]: keys of the listener table.
//!
//! ## Not a layout engine
//!
//! Flow bounds are set by the caller. New elements start at their parent's flow origin, sized
//! by a measure function for markup; children appended with [`Document::append_child`] stack
//! vertically. Inline offsets ([`Document::set_offset`]) shift an element and its subtree.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_surface::{Document, ListenTarget};
//! use kurbo::{Point, Rect, Size, Vec2};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let grid = doc.create_element(Some(doc.root()), &["grid"], None);
//! doc.set_flow_bounds(grid, Rect::new(0.0, 0.0, 400.0, 300.0));
//! doc.set_scrolls(grid, true);
//!
//! let note = doc.create_element(Some(grid), &["note"], Some("hello"));
//! doc.set_offset(note, Vec2::new(20.0, 30.0));
//! assert_eq!(doc.bounding_rect(note), Rect::new(20.0, 30.0, 60.0, 46.0));
//! assert_eq!(doc.scroll_parent(note), Some(grid));
//! assert_eq!(doc.hit_test(Point::new(25.0, 35.0)), Some(note));
//!
//! doc.subscribe(1, ListenTarget::Document, "pointerdown");
//! assert_eq!(doc.listener_count(ListenTarget::Document, "pointerdown"), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::{CELL_WIDTH, Document, LINE_HEIGHT, monospace_measure};
pub use types::{ElementFlags, ElementId, ListenTarget, Listener};
