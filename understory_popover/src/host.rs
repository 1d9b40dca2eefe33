// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host environment a popover floats over.
//!
//! A [`Host`] owns the element tree, styling, and the document listener table. The popover
//! only ever talks to it through this trait, so the same controller drives a browser DOM
//! binding, a retained toolkit tree, or a test double.

use kurbo::{Rect, Vec2};

use crate::listeners::ListenerOwner;
use crate::types::{Content, EventKind, EventTarget};

/// Inline style applied to a freshly made element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InlineStyle {
    /// `false` is `display: none`.
    pub displayed: bool,
    /// Inline `left`/`top`.
    pub offset: Vec2,
}

impl Default for InlineStyle {
    fn default() -> Self {
        Self {
            displayed: true,
            offset: Vec2::ZERO,
        }
    }
}

/// Everything needed to build one element.
#[derive(Debug)]
pub struct ElementSpec<'a, E> {
    /// Class list; empty entries may be skipped by the host.
    pub classes: &'a [&'a str],
    /// Initial inline style.
    pub style: InlineStyle,
    /// Content inserted verbatim.
    pub content: &'a Content<E>,
}

/// Collaborator contract required from the environment.
///
/// Implementations should treat stale or unknown elements as no-ops rather than panicking.
pub trait Host {
    /// Element handle type.
    type Element: Copy + Eq + core::fmt::Debug;

    /// Build an element from `spec` and append it under `parent`.
    fn make_element(
        &mut self,
        parent: Self::Element,
        spec: &ElementSpec<'_, Self::Element>,
    ) -> Self::Element;

    /// Detach `el` from its parent and release it.
    fn remove_element(&mut self, el: Self::Element);

    /// Toggle `display` of `el`.
    fn set_display(&mut self, el: Self::Element, displayed: bool);

    /// Write the inline `left`/`top` offset of `el`.
    fn set_offset(&mut self, el: Self::Element, offset: Vec2);

    /// Current page-space bounding rectangle of `el`.
    fn bounding_rect(&self, el: Self::Element) -> Rect;

    /// Nearest ancestor of `el` establishing a scroll context, if any.
    fn scroll_parent(&self, el: Self::Element) -> Option<Self::Element>;

    /// Visible rectangle of the document root.
    fn root_viewport(&self) -> Rect;

    /// Returns true if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Element, node: Self::Element) -> bool;

    /// Delegation test: true if `target` lies inside `root` and it, or an ancestor below
    /// `root`, carries `class`. `root`'s own classes never match.
    fn delegate_matches(&self, root: Self::Element, target: Self::Element, class: &str) -> bool;

    /// Register `owner` for `kind` on `target`. Must be idempotent.
    fn subscribe(
        &mut self,
        owner: ListenerOwner,
        target: EventTarget<Self::Element>,
        kind: EventKind,
    );

    /// Remove `owner`'s registration for `kind` on `target`. Must be idempotent.
    fn unsubscribe(
        &mut self,
        owner: ListenerOwner,
        target: EventTarget<Self::Element>,
        kind: EventKind,
    );
}
