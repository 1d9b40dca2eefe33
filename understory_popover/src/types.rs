// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the popover: options, content, visibility, and delivered events.
//!
//! ## Overview
//!
//! These types describe what a caller configures and what the controller reports.
//! They are consumed by [`Popover`](crate::popover::Popover) and by [`Host`](crate::host::Host)
//! implementations.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::position::Anchor;

/// Clearance kept between the panel and the viewport edges when constraining.
pub const MARGIN: f64 = 10.0;

/// Class carried by every popover surface.
pub const BASE_CLASS: &str = "popover";

/// Class flagging a close control; clicking it (or anything inside it) hides the popover.
pub const CLOSE_CLASS: &str = "close";

/// Payload inserted verbatim into the surface.
///
/// The popover never inspects content; the [`Host`](crate::host::Host) decides how to attach it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Content<E> {
    /// No content.
    #[default]
    Empty,
    /// A markup string.
    Markup(String),
    /// A single existing element, moved into the surface.
    Element(E),
    /// An ordered list of existing elements, moved into the surface.
    Elements(Vec<E>),
}

/// Zero-argument hook invoked on a transition.
pub type Callback = Box<dyn FnMut()>;

/// Caller-supplied configuration, fixed for the popover's lifetime.
///
/// Only `parent` is required; build the rest with the `with_*` methods.
///
/// ```
/// use understory_popover::types::{Content, PopoverOptions};
///
/// let options = PopoverOptions::new(0_u32)
///     .with_class_name("more-events")
///     .with_content(Content::Markup("3 more".into()))
///     .with_top(120.0)
///     .with_right(480.0)
///     .with_auto_hide(true);
/// assert_eq!(options.anchor().left, None);
/// assert!(options.viewport_constrain);
/// ```
pub struct PopoverOptions<E> {
    /// Extra class tag added next to [`BASE_CLASS`].
    pub class_name: Option<String>,
    /// Content inserted into the surface at render time.
    pub content: Content<E>,
    /// Element the surface is appended into.
    pub parent: E,
    /// Hide on pointer-down outside the surface.
    pub auto_hide: bool,
    /// Desired top edge in page coordinates; `None` means `0`.
    pub top: Option<f64>,
    /// Desired left edge in page coordinates. Takes precedence over `right`.
    pub left: Option<f64>,
    /// Desired right edge in page coordinates (not a CSS `right`).
    pub right: Option<f64>,
    /// Clamp the panel into the nearest scroll container's visible rectangle.
    pub viewport_constrain: bool,
    /// Called after the panel is shown and positioned.
    pub on_show: Option<Callback>,
    /// Called after the panel is hidden.
    pub on_hide: Option<Callback>,
}

impl<E> PopoverOptions<E> {
    /// Options with defaults for everything except the parent element.
    pub fn new(parent: E) -> Self {
        Self {
            class_name: None,
            content: Content::Empty,
            parent,
            auto_hide: false,
            top: None,
            left: None,
            right: None,
            viewport_constrain: true,
            on_show: None,
            on_hide: None,
        }
    }

    /// Set the extra class tag.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the content payload.
    pub fn with_content(mut self, content: Content<E>) -> Self {
        self.content = content;
        self
    }

    /// Enable or disable outside pointer-down dismissal.
    pub fn with_auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    /// Set the desired top edge.
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    /// Set the desired left edge.
    pub fn with_left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    /// Set the desired right edge.
    pub fn with_right(mut self, right: f64) -> Self {
        self.right = Some(right);
        self
    }

    /// Enable or disable viewport constraining.
    pub fn with_viewport_constrain(mut self, constrain: bool) -> Self {
        self.viewport_constrain = constrain;
        self
    }

    /// Set the show hook.
    pub fn on_show(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_show = Some(Box::new(f));
        self
    }

    /// Set the hide hook.
    pub fn on_hide(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hide = Some(Box::new(f));
        self
    }

    /// The anchor described by `top`/`left`/`right`.
    pub fn anchor(&self) -> Anchor {
        Anchor {
            top: self.top,
            left: self.left,
            right: self.right,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for PopoverOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PopoverOptions")
            .field("class_name", &self.class_name)
            .field("content", &self.content)
            .field("parent", &self.parent)
            .field("auto_hide", &self.auto_hide)
            .field("top", &self.top)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("viewport_constrain", &self.viewport_constrain)
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish()
    }
}

/// Observable lifecycle state of a popover.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Visibility {
    /// Never shown; no surface exists.
    Unrendered,
    /// Surface exists but is not displayed.
    Hidden,
    /// Surface is displayed and positioned.
    Shown,
    /// Surface removed and listeners released. Terminal.
    Destroyed,
}

/// Kinds of pointer events the popover reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// A pointer press anywhere; drives outside dismissal.
    PointerDown,
    /// A completed click; drives close controls.
    Click,
}

impl EventKind {
    /// Conventional event name, used as a key by string-keyed hosts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::Click => "click",
        }
    }
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventTarget<E> {
    /// The whole document.
    Document,
    /// One element.
    Element(E),
}

/// An event delivered to [`Popover::handle_event`](crate::popover::Popover::handle_event).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PointerEvent<E> {
    /// What happened.
    pub kind: EventKind,
    /// Innermost element the event hit.
    pub target: E,
}
