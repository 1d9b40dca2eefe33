// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle controller.
//!
//! ## Overview
//!
//! A [`Popover`] owns its surface element, its visibility flag, and its listener registry.
//! It moves through `Unrendered → Shown ⇄ Hidden → Destroyed`:
//!
//! - The first [`show`](Popover::show) renders: builds the surface under the configured
//!   parent, inserts content, registers for close-control clicks on the surface and, with
//!   `auto_hide`, for pointer-down on the document.
//! - Later `show`/`hide` calls only toggle display. The surface stays in the tree and no
//!   listener is registered twice.
//! - [`destroy`](Popover::destroy) hides, removes the surface, and releases every listener.
//!
//! Every operation in a state where it has nothing to do is a silent no-op.
//!
//! ## Ordering
//!
//! Within `show`, rendering precedes positioning, which precedes marking the popover shown
//! and calling `on_show`. A hook observing `on_show` sees a laid-out, positioned surface.
//!
//! ## Events
//!
//! The host delivers events through [`Popover::handle_event`]. Route a pointer-down to every
//! owner listening on [`EventTarget::Document`], and a click to owners listening on the
//! clicked element or one of its ancestors.

use alloc::vec::Vec;
use kurbo::Vec2;
use tracing::{debug, trace};

use crate::host::{ElementSpec, Host, InlineStyle};
use crate::listeners::{ListenerOwner, ListenerRegistry};
use crate::position;
use crate::types::{
    BASE_CLASS, CLOSE_CLASS, EventKind, EventTarget, MARGIN, PointerEvent, PopoverOptions,
    Visibility,
};

/// A floating overlay panel.
///
/// ```
/// # use understory_popover::popover::Popover;
/// # use understory_popover::types::{PopoverOptions, Visibility};
/// # fn demo<H: understory_popover::host::Host>(host: &mut H, parent: H::Element) {
/// let mut popover = Popover::new(PopoverOptions::new(parent).with_top(40.0).with_left(60.0));
/// popover.show(host);
/// assert_eq!(popover.visibility(), Visibility::Shown);
/// popover.hide(host);
/// popover.destroy(host);
/// assert_eq!(popover.visibility(), Visibility::Destroyed);
/// # }
/// ```
pub struct Popover<E> {
    options: PopoverOptions<E>,
    hidden: bool,
    destroyed: bool,
    surface: Option<E>,
    // Offset last written to the surface; subtracted to recover its flow origin.
    applied: Vec2,
    listeners: ListenerRegistry<E>,
}

impl<E: core::fmt::Debug> core::fmt::Debug for Popover<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Popover")
            .field("hidden", &self.hidden)
            .field("destroyed", &self.destroyed)
            .field("surface", &self.surface)
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

impl<E: Copy + Eq + core::fmt::Debug> Popover<E> {
    /// Capture `options`. Nothing is rendered until the first [`show`](Self::show).
    pub fn new(options: PopoverOptions<E>) -> Self {
        Self {
            options,
            hidden: true,
            destroyed: false,
            surface: None,
            applied: Vec2::ZERO,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Configuration this popover was created with.
    pub fn options(&self) -> &PopoverOptions<E> {
        &self.options
    }

    /// The surface element, while rendered.
    pub fn surface(&self) -> Option<E> {
        self.surface
    }

    /// Returns true unless the popover is currently shown.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Current lifecycle state.
    pub fn visibility(&self) -> Visibility {
        if self.destroyed {
            Visibility::Destroyed
        } else if self.surface.is_none() {
            Visibility::Unrendered
        } else if self.hidden {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }

    /// Key this popover uses in the host's listener table.
    pub fn owner(&self) -> ListenerOwner {
        self.listeners.owner()
    }

    /// Subscriptions currently held.
    pub fn listeners(&self) -> &ListenerRegistry<E> {
        &self.listeners
    }

    /// Display and position the popover, rendering it first if needed.
    pub fn show<H: Host<Element = E>>(&mut self, host: &mut H) {
        if !self.hidden || self.destroyed {
            return;
        }
        let surface = match self.surface {
            Some(surface) => surface,
            None => self.render(host),
        };
        host.set_display(surface, true);
        self.apply_position(host, surface);
        self.hidden = false;
        debug!(?surface, "popover shown");
        if let Some(on_show) = self.options.on_show.as_mut() {
            on_show();
        }
    }

    /// Hide the popover without removing it from the tree.
    pub fn hide<H: Host<Element = E>>(&mut self, host: &mut H) {
        if self.hidden {
            return;
        }
        if let Some(surface) = self.surface {
            host.set_display(surface, false);
        }
        self.hidden = true;
        debug!(surface = ?self.surface, "popover hidden");
        if let Some(on_hide) = self.options.on_hide.as_mut() {
            on_hide();
        }
    }

    /// Hide, remove the surface, and release all listeners. Safe to call repeatedly.
    pub fn destroy<H: Host<Element = E>>(&mut self, host: &mut H) {
        self.hide(host);
        if let Some(surface) = self.surface.take() {
            host.remove_element(surface);
            debug!(?surface, "popover surface removed");
        }
        self.listeners.stop_listening_all(host);
        self.listeners
            .stop_listening_to(host, EventTarget::Document, EventKind::PointerDown);
        self.applied = Vec2::ZERO;
        self.destroyed = true;
    }

    /// Recompute and reapply the surface offset from the options and measured geometry.
    ///
    /// Only acts while shown; a hidden surface is repositioned by the next `show`.
    /// Repeated calls with unchanged geometry leave the surface where it is.
    pub fn position<H: Host<Element = E>>(&mut self, host: &mut H) {
        if self.hidden {
            return;
        }
        if let Some(surface) = self.surface {
            self.apply_position(host, surface);
        }
    }

    /// Deliver an event routed by the host. Returns true if it hid the popover.
    pub fn handle_event<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        event: &PointerEvent<E>,
    ) -> bool {
        let was_shown = !self.hidden;
        match event.kind {
            EventKind::Click => self.close_click(host, event.target),
            EventKind::PointerDown => self.document_pointer_down(host, event.target),
        }
        was_shown && self.hidden
    }

    fn render<H: Host<Element = E>>(&mut self, host: &mut H) -> E {
        let class_name = self.options.class_name.as_deref().unwrap_or("");
        let classes: Vec<&str> = core::iter::once(BASE_CLASS)
            .chain(class_name.split_ascii_whitespace())
            .collect();
        let spec = ElementSpec {
            classes: &classes,
            style: InlineStyle::default(),
            content: &self.options.content,
        };
        let surface = host.make_element(self.options.parent, &spec);
        self.surface = Some(surface);
        self.applied = Vec2::ZERO;
        self.listeners
            .listen_to(host, EventTarget::Element(surface), EventKind::Click);
        if self.options.auto_hide {
            self.listeners
                .listen_to(host, EventTarget::Document, EventKind::PointerDown);
        }
        debug!(?surface, auto_hide = self.options.auto_hide, "popover rendered");
        surface
    }

    fn apply_position<H: Host<Element = E>>(&mut self, host: &mut H, surface: E) {
        let rect = host.bounding_rect(surface);
        let flow = rect.origin() - self.applied;
        let viewport = match host.scroll_parent(surface) {
            Some(scroller) => host.bounding_rect(scroller),
            None => host.root_viewport(),
        };
        let desired = position::place(
            self.options.anchor(),
            rect.size(),
            viewport,
            self.options.viewport_constrain,
            MARGIN,
        );
        let applied = position::applied_offset(desired, flow);
        host.set_offset(surface, applied);
        self.applied = applied;
        trace!(?surface, ?viewport, ?desired, ?applied, "popover positioned");
    }

    // Clicks on a close control inside the surface hide the popover.
    fn close_click<H: Host<Element = E>>(&mut self, host: &mut H, target: E) {
        let Some(surface) = self.surface else { return };
        if host.delegate_matches(surface, target, CLOSE_CLASS) {
            self.hide(host);
        }
    }

    // Pointer-down anywhere outside the surface hides an auto-hiding popover.
    fn document_pointer_down<H: Host<Element = E>>(&mut self, host: &mut H, target: E) {
        if !self
            .listeners
            .is_listening(EventTarget::Document, EventKind::PointerDown)
        {
            return;
        }
        let Some(surface) = self.surface else { return };
        if !host.contains(surface, target) {
            self.hide(host);
        }
    }
}
