// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, style updates, geometry queries, listeners.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};

use crate::types::{ElementFlags, ElementId, ListenTarget, Listener};

/// Width of one character cell used by [`monospace_measure`].
pub const CELL_WIDTH: f64 = 8.0;
/// Height of one line used by [`monospace_measure`].
pub const LINE_HEIGHT: f64 = 16.0;

/// Measure markup as monospace text: one [`CELL_WIDTH`] per character of the
/// longest line, one [`LINE_HEIGHT`] per line.
///
/// Empty markup measures as [`Size::ZERO`].
pub fn monospace_measure(markup: &str) -> Size {
    if markup.is_empty() {
        return Size::ZERO;
    }
    let mut lines = 0_u32;
    let mut widest = 0_usize;
    for line in markup.lines() {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "Character counts stay far below f64 precision limits."
    )]
    Size::new(widest as f64 * CELL_WIDTH, f64::from(lines) * LINE_HEIGHT)
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    markup: Option<String>,
    flow_bounds: Rect,
    offset: Vec2,
    flags: ElementFlags,
}

impl Element {
    fn new(generation: u32, flow_bounds: Rect) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            markup: None,
            flow_bounds,
            offset: Vec2::ZERO,
            flags: ElementFlags::default(),
        }
    }
}

/// A retained element tree standing in for a host page.
///
/// The document owns a root element spanning the viewport. Elements carry a
/// flow rectangle (where normal layout put them), an inline style offset, a
/// class list, optional markup, and [`ElementFlags`].
///
/// This is not a layout engine. Callers set flow bounds directly; the only
/// automatic placement is that new elements start at their parent's flow
/// origin and appended children stack vertically under their earlier siblings.
pub struct Document {
    elements: Vec<Option<Element>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: ElementId,
    viewport: Size,
    measure: fn(&str) -> Size,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document whose root element spans a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        let root_bounds = Rect::from_origin_size(Point::ZERO, viewport);
        Self {
            elements: alloc::vec![Some(Element::new(1, root_bounds))],
            generations: alloc::vec![1],
            free_list: Vec::new(),
            root: ElementId::new(0, 1),
            viewport,
            measure: monospace_measure,
            listeners: Vec::new(),
        }
    }

    /// Replace the function used to size elements created with markup.
    pub fn with_measure(mut self, measure: fn(&str) -> Size) -> Self {
        self.measure = measure;
        self
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The visible rectangle of the document root, anchored at the origin.
    pub fn viewport(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.viewport)
    }

    /// Resize the viewport; the root's flow bounds follow.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        let root = self.root;
        if let Some(el) = self.get_mut(root) {
            el.flow_bounds = Rect::from_origin_size(Point::ZERO, viewport);
        }
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .get(id.idx())?
            .as_ref()
            .filter(|el| el.generation == id.1)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements
            .get_mut(id.idx())?
            .as_mut()
            .filter(|el| el.generation == id.1)
    }

    /// Create an element with the given classes and optional markup.
    ///
    /// With a live `parent`, the element is appended to it and starts at the
    /// parent's flow origin; otherwise it is detached at the page origin.
    /// Markup is sized with the document's measure function.
    pub fn create_element(
        &mut self,
        parent: Option<ElementId>,
        classes: &[&str],
        markup: Option<&str>,
    ) -> ElementId {
        let size = markup.map(self.measure).unwrap_or(Size::ZERO);
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.elements.push(None);
            self.generations.push(1);
            (self.elements.len() - 1, 1)
        };
        let mut el = Element::new(generation, Rect::from_origin_size(Point::ZERO, size));
        el.classes = classes
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| (*c).to_owned())
            .collect();
        el.markup = markup.map(ToOwned::to_owned);
        self.elements[idx] = Some(el);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let id = ElementId::new(idx as u32, generation);
        if let Some(p) = parent {
            self.append_child(p, id);
        }
        id
    }

    /// Move `child` under `parent`, after its existing children.
    ///
    /// The child's flow bounds keep their size and are placed at the parent's
    /// flow origin, below the previously appended children.
    /// Ignored if either id is stale, if `child` is the root, or if it would
    /// create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if child == self.root
            || !self.is_alive(parent)
            || !self.is_alive(child)
            || self.contains(child, parent)
        {
            return;
        }
        self.unlink(child);
        let (origin, below) = {
            let p = &self.elements[parent.idx()];
            let Some(p) = p.as_ref() else { return };
            let below: f64 = p
                .children
                .iter()
                .filter_map(|c| self.get(*c))
                .map(|c| c.flow_bounds.height())
                .sum();
            (p.flow_bounds.origin(), below)
        };
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
            let size = c.flow_bounds.size();
            c.flow_bounds = Rect::from_origin_size(origin + Vec2::new(0.0, below), size);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
    }

    /// Grow or shrink an element's flow size to fit its stacked children:
    /// the widest child's width and the sum of their heights.
    pub fn size_to_children(&mut self, id: ElementId) {
        let Some(el) = self.get(id) else { return };
        let mut size = Size::ZERO;
        for c in el.children.iter().filter_map(|c| self.get(*c)) {
            size.width = size.width.max(c.flow_bounds.width());
            size.height += c.flow_bounds.height();
        }
        if let Some(el) = self.get_mut(id) {
            el.flow_bounds = el.flow_bounds.with_size(size);
        }
    }

    fn unlink(&mut self, id: ElementId) {
        let Some(parent) = self.get(id).and_then(|el| el.parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(el) = self.get_mut(id) {
            el.parent = None;
        }
    }

    /// Remove an element and its subtree. The root cannot be removed.
    ///
    /// Listeners attached to removed elements are dropped.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || !self.is_alive(id) {
            return;
        }
        self.unlink(id);
        self.free_recursive(id);
    }

    fn free_recursive(&mut self, id: ElementId) {
        let children = match self.get(id) {
            Some(el) => el.children.clone(),
            None => return,
        };
        for c in children {
            self.free_recursive(c);
        }
        self.listeners
            .retain(|l| l.target != ListenTarget::Element(id));
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Parent of `id`, if any.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    /// Children of `id` in document order; empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Class list of `id`; empty for stale ids.
    pub fn classes(&self, id: ElementId) -> impl Iterator<Item = &str> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|el| el.classes.iter().map(String::as_str))
    }

    /// Returns true if `id` carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    /// Add `class` to `id` if not already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if class.is_empty() || self.has_class(id, class) {
            return;
        }
        if let Some(el) = self.get_mut(id) {
            el.classes.push(class.to_owned());
        }
    }

    /// Markup content of `id`, if it was created with any.
    pub fn markup(&self, id: ElementId) -> Option<&str> {
        self.get(id)?.markup.as_deref()
    }

    /// Set the flow bounds (normal layout position and size) of `id`.
    pub fn set_flow_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(el) = self.get_mut(id) {
            el.flow_bounds = bounds;
        }
    }

    /// Flow bounds of `id`; [`Rect::ZERO`] for stale ids.
    pub fn flow_bounds(&self, id: ElementId) -> Rect {
        self.get(id).map(|el| el.flow_bounds).unwrap_or(Rect::ZERO)
    }

    /// Set the inline `left`/`top` offset of `id`.
    pub fn set_offset(&mut self, id: ElementId, offset: Vec2) {
        if let Some(el) = self.get_mut(id) {
            el.offset = offset;
        }
    }

    /// Inline offset of `id`.
    pub fn offset(&self, id: ElementId) -> Vec2 {
        self.get(id).map(|el| el.offset).unwrap_or(Vec2::ZERO)
    }

    /// Toggle the display flag of `id`.
    pub fn set_displayed(&mut self, id: ElementId, displayed: bool) {
        if let Some(el) = self.get_mut(id) {
            el.flags.set(ElementFlags::DISPLAYED, displayed);
        }
    }

    /// Mark `id` as a scroll container.
    pub fn set_scrolls(&mut self, id: ElementId, scrolls: bool) {
        if let Some(el) = self.get_mut(id) {
            el.flags.set(ElementFlags::SCROLLS, scrolls);
        }
    }

    /// Flags of `id`; empty for stale ids.
    pub fn flags(&self, id: ElementId) -> ElementFlags {
        self.get(id).map(|el| el.flags).unwrap_or(ElementFlags::empty())
    }

    /// Returns true if `id` and all its ancestors are displayed.
    pub fn is_displayed(&self, id: ElementId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(el) = self.get(c) else { return false };
            if !el.flags.contains(ElementFlags::DISPLAYED) {
                return false;
            }
            cur = el.parent;
        }
        true
    }

    /// Page-space rectangle of `id`: flow bounds shifted by its own offset and
    /// every ancestor's offset.
    ///
    /// Returns [`Rect::ZERO`] for stale or undisplayed elements.
    pub fn bounding_rect(&self, id: ElementId) -> Rect {
        if !self.is_displayed(id) {
            return Rect::ZERO;
        }
        let mut shift = Vec2::ZERO;
        let mut cur = Some(id);
        while let Some(el) = cur.and_then(|c| self.get(c)) {
            shift += el.offset;
            cur = el.parent;
        }
        self.flow_bounds(id) + shift
    }

    /// Nearest ancestor of `id` (exclusive) that is a scroll container.
    pub fn scroll_parent(&self, id: ElementId) -> Option<ElementId> {
        let mut cur = self.parent_of(id);
        while let Some(c) = cur {
            if self.flags(c).contains(ElementFlags::SCROLLS) {
                return Some(c);
            }
            cur = self.parent_of(c);
        }
        None
    }

    /// Returns true if `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent_of(c);
        }
        false
    }

    /// Path from the topmost ancestor to `id` (inclusive). Empty for stale ids.
    pub fn path_to(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut cur = self.is_alive(id).then_some(id);
        while let Some(c) = cur {
            out.push(c);
            cur = self.parent_of(c);
        }
        out.reverse();
        out
    }

    /// Hit test a page-space point against the root's subtree.
    ///
    /// Returns the deepest displayed element containing the point. Later
    /// siblings are above earlier ones. Children are tested even when their
    /// parent's rectangle does not contain the point, since offset elements
    /// may overflow their container.
    pub fn hit_test(&self, pt: Point) -> Option<ElementId> {
        self.hit_recursive(self.root, pt)
    }

    fn hit_recursive(&self, id: ElementId, pt: Point) -> Option<ElementId> {
        let el = self.get(id)?;
        if !el.flags.contains(ElementFlags::DISPLAYED) {
            return None;
        }
        for &c in el.children.iter().rev() {
            if let Some(hit) = self.hit_recursive(c, pt) {
                return Some(hit);
            }
        }
        self.bounding_rect(id).contains(pt).then_some(id)
    }

    /// Register `owner` for `event` on `target`. Repeated registration is a no-op.
    pub fn subscribe(&mut self, owner: u64, target: ListenTarget, event: &'static str) {
        let listener = Listener {
            owner,
            target,
            event,
        };
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Remove `owner`'s registration for `event` on `target`, if any.
    pub fn unsubscribe(&mut self, owner: u64, target: ListenTarget, event: &'static str) {
        self.listeners
            .retain(|l| !(l.owner == owner && l.target == target && l.event == event));
    }

    /// Owners listening for `event` on `target`, in registration order.
    pub fn listeners(
        &self,
        target: ListenTarget,
        event: &'static str,
    ) -> impl Iterator<Item = u64> + '_ {
        self.listeners
            .iter()
            .filter(move |l| l.target == target && l.event == event)
            .map(|l| l.owner)
    }

    /// Number of listeners for `event` on `target`.
    pub fn listener_count(&self, target: ListenTarget, event: &'static str) -> usize {
        self.listeners(target, event).count()
    }
}
