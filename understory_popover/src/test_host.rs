// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal in-memory [`Host`] used by unit tests.

use alloc::borrow::ToOwned;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use kurbo::{Point, Rect, Size, Vec2};

use crate::host::{ElementSpec, Host};
use crate::listeners::ListenerOwner;
use crate::types::{Content, EventKind, EventTarget};

#[derive(Clone, Debug)]
pub(crate) struct TestElement {
    pub(crate) parent: Option<u32>,
    pub(crate) flow: Rect,
    pub(crate) offset: Vec2,
    pub(crate) displayed: bool,
    pub(crate) scrolls: bool,
    pub(crate) classes: Vec<String>,
    pub(crate) alive: bool,
}

#[derive(Debug)]
pub(crate) struct TestHost {
    pub(crate) elements: Vec<TestElement>,
    pub(crate) viewport: Rect,
    pub(crate) listeners: Vec<(ListenerOwner, EventTarget<u32>, EventKind)>,
    pub(crate) subscribe_calls: usize,
    pub(crate) unsubscribe_calls: usize,
    pub(crate) made: usize,
    /// Size given to the next element built by `make_element`.
    pub(crate) next_size: Size,
    /// Names of mutating calls, in order.
    pub(crate) ops: Rc<RefCell<Vec<&'static str>>>,
}

impl TestHost {
    pub(crate) const ROOT: u32 = 0;

    pub(crate) fn new() -> Self {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        Self {
            elements: vec![TestElement {
                parent: None,
                flow: viewport,
                offset: Vec2::ZERO,
                displayed: true,
                scrolls: false,
                classes: Vec::new(),
                alive: true,
            }],
            viewport,
            listeners: Vec::new(),
            subscribe_calls: 0,
            unsubscribe_calls: 0,
            made: 0,
            next_size: Size::new(200.0, 50.0),
            ops: Rc::default(),
        }
    }

    pub(crate) fn add(&mut self, parent: u32, flow: Rect, classes: &[&str]) -> u32 {
        self.elements.push(TestElement {
            parent: Some(parent),
            flow,
            offset: Vec2::ZERO,
            displayed: true,
            scrolls: false,
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            alive: true,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Test trees are tiny."
        )]
        let id = (self.elements.len() - 1) as u32;
        id
    }

    pub(crate) fn el(&self, id: u32) -> &TestElement {
        &self.elements[id as usize]
    }

    pub(crate) fn el_mut(&mut self, id: u32) -> &mut TestElement {
        &mut self.elements[id as usize]
    }

    pub(crate) fn listener_count(&self, target: EventTarget<u32>, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|(_, t, k)| *t == target && *k == kind)
            .count()
    }

    fn displayed(&self, id: u32) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let el = self.el(c);
            if !el.alive || !el.displayed {
                return false;
            }
            cur = el.parent;
        }
        true
    }
}

impl Host for TestHost {
    type Element = u32;

    fn make_element(&mut self, parent: u32, spec: &ElementSpec<'_, u32>) -> u32 {
        self.made += 1;
        self.ops.borrow_mut().push("make");
        let origin: Point = self.el(parent).flow.origin();
        let id = self.add(
            parent,
            Rect::from_origin_size(origin, self.next_size),
            spec.classes,
        );
        let el = self.el_mut(id);
        el.displayed = spec.style.displayed;
        el.offset = spec.style.offset;
        let moved: Vec<u32> = match spec.content {
            Content::Element(e) => vec![*e],
            Content::Elements(es) => es.clone(),
            Content::Empty | Content::Markup(_) => Vec::new(),
        };
        for child in moved {
            self.el_mut(child).parent = Some(id);
        }
        id
    }

    fn remove_element(&mut self, el: u32) {
        self.el_mut(el).alive = false;
    }

    fn set_display(&mut self, el: u32, displayed: bool) {
        self.ops.borrow_mut().push("display");
        self.el_mut(el).displayed = displayed;
    }

    fn set_offset(&mut self, el: u32, offset: Vec2) {
        self.ops.borrow_mut().push("offset");
        self.el_mut(el).offset = offset;
    }

    fn bounding_rect(&self, el: u32) -> Rect {
        if !self.displayed(el) {
            return Rect::ZERO;
        }
        let mut shift = Vec2::ZERO;
        let mut cur = Some(el);
        while let Some(c) = cur {
            shift += self.el(c).offset;
            cur = self.el(c).parent;
        }
        self.el(el).flow + shift
    }

    fn scroll_parent(&self, el: u32) -> Option<u32> {
        let mut cur = self.el(el).parent;
        while let Some(c) = cur {
            if self.el(c).scrolls {
                return Some(c);
            }
            cur = self.el(c).parent;
        }
        None
    }

    fn root_viewport(&self) -> Rect {
        self.viewport
    }

    fn contains(&self, ancestor: u32, node: u32) -> bool {
        let mut cur = Some(node);
        while let Some(c) = cur {
            if c == ancestor {
                return self.el(c).alive;
            }
            cur = self.el(c).parent;
        }
        false
    }

    fn delegate_matches(&self, root: u32, target: u32, class: &str) -> bool {
        if !self.contains(root, target) {
            return false;
        }
        let mut cur = Some(target);
        while let Some(c) = cur {
            if c == root {
                break;
            }
            if self.el(c).classes.iter().any(|k| k == class) {
                return true;
            }
            cur = self.el(c).parent;
        }
        false
    }

    fn subscribe(&mut self, owner: ListenerOwner, target: EventTarget<u32>, kind: EventKind) {
        self.subscribe_calls += 1;
        if !self.listeners.contains(&(owner, target, kind)) {
            self.listeners.push((owner, target, kind));
        }
    }

    fn unsubscribe(&mut self, owner: ListenerOwner, target: EventTarget<u32>, kind: EventKind) {
        self.unsubscribe_calls += 1;
        self.listeners.retain(|l| *l != (owner, target, kind));
    }
}
