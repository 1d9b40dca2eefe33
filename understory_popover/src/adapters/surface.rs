// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] implementation for Understory Surface.
//!
//! ## Feature
//!
//! Enable with `surface_adapter`.
//!
//! ## Notes
//!
//! - Markup content is stored on the surface and sized by the document's measure function.
//! - Element content is moved into the surface, stacked vertically, and the surface is sized
//!   to fit it.
//! - Listener owners are keyed by [`ListenerOwner::get`] and events by [`EventKind::name`].

use kurbo::{Rect, Vec2};
use understory_surface::{Document, ElementId, ListenTarget};

use crate::host::{ElementSpec, Host};
use crate::listeners::ListenerOwner;
use crate::types::{Content, EventKind, EventTarget};

fn listen_target(target: EventTarget<ElementId>) -> ListenTarget {
    match target {
        EventTarget::Document => ListenTarget::Document,
        EventTarget::Element(id) => ListenTarget::Element(id),
    }
}

impl Host for Document {
    type Element = ElementId;

    fn make_element(
        &mut self,
        parent: ElementId,
        spec: &ElementSpec<'_, ElementId>,
    ) -> ElementId {
        let markup = match spec.content {
            Content::Markup(markup) => Some(markup.as_str()),
            _ => None,
        };
        let el = self.create_element(Some(parent), spec.classes, markup);
        let children: &[ElementId] = match spec.content {
            Content::Element(child) => core::slice::from_ref(child),
            Content::Elements(children) => children,
            Content::Empty | Content::Markup(_) => &[],
        };
        if !children.is_empty() {
            for &child in children {
                self.append_child(el, child);
            }
            self.size_to_children(el);
        }
        Self::set_offset(self, el, spec.style.offset);
        self.set_displayed(el, spec.style.displayed);
        el
    }

    fn remove_element(&mut self, el: ElementId) {
        self.remove(el);
    }

    fn set_display(&mut self, el: ElementId, displayed: bool) {
        self.set_displayed(el, displayed);
    }

    fn set_offset(&mut self, el: ElementId, offset: Vec2) {
        Self::set_offset(self, el, offset);
    }

    fn bounding_rect(&self, el: ElementId) -> Rect {
        Self::bounding_rect(self, el)
    }

    fn scroll_parent(&self, el: ElementId) -> Option<ElementId> {
        Self::scroll_parent(self, el)
    }

    fn root_viewport(&self) -> Rect {
        self.viewport()
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        Self::contains(self, ancestor, node)
    }

    fn delegate_matches(&self, root: ElementId, target: ElementId, class: &str) -> bool {
        if !Self::contains(self, root, target) {
            return false;
        }
        let mut cur = Some(target);
        while let Some(c) = cur {
            if c == root {
                break;
            }
            if self.has_class(c, class) {
                return true;
            }
            cur = self.parent_of(c);
        }
        false
    }

    fn subscribe(
        &mut self,
        owner: ListenerOwner,
        target: EventTarget<ElementId>,
        kind: EventKind,
    ) {
        Self::subscribe(self, owner.get(), listen_target(target), kind.name());
    }

    fn unsubscribe(
        &mut self,
        owner: ListenerOwner,
        target: EventTarget<ElementId>,
        kind: EventKind,
    ) {
        Self::unsubscribe(self, owner.get(), listen_target(target), kind.name());
    }
}
