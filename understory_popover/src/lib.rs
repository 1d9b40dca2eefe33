// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popover --heading-base-level=0

//! Understory Popover: a floating overlay panel for UI, `no_std` friendly.
//!
//! ## Overview
//!
//! A popover is a rectangular surface absolutely positioned over other content, for transient
//! UI such as a "more events" list anchored to a cell of a calendar grid. This crate provides:
//!
//! - a pure [positioning engine](crate::position) that turns a top/left or top/right anchor into
//!   page coordinates clamped into the nearest scroll container's visible rectangle;
//! - a [lifecycle controller](crate::popover::Popover) with lazy rendering, display toggling,
//!   and teardown;
//! - outside pointer-down dismissal and close-control clicks, backed by a per-popover
//!   [`ListenerRegistry`](crate::listeners::ListenerRegistry).
//!
//! It does not own an element tree. Everything it needs from the page goes through the
//! [`Host`](crate::host::Host) trait: element creation and removal, inline style, bounding
//! rectangles, the scroll parent, containment, delegation, and a document listener table.
//!
//! ## Positioning
//!
//! Given the surface's measured size and a viewport rectangle:
//!
//! 1) Top is `top` (default `0`). Left is `left`, else `right − width`, else `0`.
//! 2) With `viewport_constrain`, each axis is clamped to stay [`MARGIN`](crate::types::MARGIN)
//!    inside the viewport: far edge first, near edge second. A panel larger than the viewport is
//!    pinned to the top/left margin and overflows the far side.
//! 3) The surface's offset is written relative to its un-offset flow position, so repeating
//!    the computation with unchanged geometry leaves it in place.
//!
//! ## Dismissal
//!
//! With `auto_hide`, the first `show` registers one document-level pointer-down listener that
//! stays until `destroy`, however often the popover is toggled. A pointer-down whose target is
//! outside the surface hides it. Clicks on an element with class
//! [`CLOSE_CLASS`](crate::types::CLOSE_CLASS) inside the surface hide it too.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: select Kurbo's float backend.
//! - `surface_adapter`: implement [`Host`](crate::host::Host) for
//!   `understory_surface::Document`.
//!
//! ## Logging
//!
//! Lifecycle transitions are reported through `tracing` at `debug`, positioning results at
//! `trace`. Install any subscriber to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod host;
pub mod listeners;
pub mod popover;
pub mod position;
pub mod types;

#[cfg(test)]
mod test_host;
