// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning engine.
//!
//! ## Overview
//!
//! Pure geometry: turn an [`Anchor`] and the panel's measured size into a page-space origin,
//! optionally clamped into a viewport rectangle minus a margin.
//!
//! ## Anchors
//!
//! - `top` defaults to `0`, as does a NaN `top`.
//! - `left` wins over `right`. With only `right`, the panel's right edge is aligned to it.
//! - With neither, `left` is `0`.
//!
//! ## Constraining
//!
//! Each axis applies `min` against the far edge (bottom/right) first, then `max` against the
//! near edge (top/left). When the panel is larger than the viewport the near edge wins: the
//! panel is pinned at `viewport.y0 + margin` / `viewport.x0 + margin` and overflows the far
//! side. Degenerate viewports are not validated.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_popover::position::{Anchor, place};
//!
//! let anchor = Anchor { top: Some(590.0), left: None, right: Some(300.0) };
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let origin = place(anchor, Size::new(200.0, 50.0), viewport, true, 10.0);
//! assert_eq!(origin, Point::new(100.0, 540.0));
//! ```

use kurbo::{Point, Rect, Size, Vec2};

/// Desired placement before constraining, in page coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Anchor {
    /// Top edge; `None` or NaN means `0`.
    pub top: Option<f64>,
    /// Left edge; takes precedence over `right`.
    pub left: Option<f64>,
    /// Right edge.
    pub right: Option<f64>,
}

/// Resolve an anchor into the panel's unconstrained origin.
pub fn desired_origin(anchor: Anchor, size: Size) -> Point {
    let y = anchor.top.filter(|t| !t.is_nan()).unwrap_or(0.0);
    let x = match (anchor.left, anchor.right) {
        (Some(left), _) => left,
        (None, Some(right)) => right - size.width,
        (None, None) => 0.0,
    };
    Point::new(x, y)
}

/// Clamp `origin` so a panel of `size` stays `margin` inside `viewport`.
///
/// Far edges are clamped before near edges, so top/left wins a conflict.
pub fn constrain(origin: Point, size: Size, viewport: Rect, margin: f64) -> Point {
    let mut y = origin.y.min(viewport.y0 + viewport.height() - size.height - margin);
    y = y.max(viewport.y0 + margin);
    let mut x = origin.x.min(viewport.x0 + viewport.width() - size.width - margin);
    x = x.max(viewport.x0 + margin);
    Point::new(x, y)
}

/// Compute the final page-space origin of a panel.
pub fn place(
    anchor: Anchor,
    size: Size,
    viewport: Rect,
    constrain_to_viewport: bool,
    margin: f64,
) -> Point {
    let origin = desired_origin(anchor, size);
    if constrain_to_viewport {
        constrain(origin, size, viewport, margin)
    } else {
        origin
    }
}

/// Offset to write to a surface whose un-offset (flow) origin is `flow` so that it lands at
/// `desired`.
pub fn applied_offset(desired: Point, flow: Point) -> Vec2 {
    desired - flow
}
