// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the surface document: element identifiers, flags, and listener targets.

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether an id still refers
/// to a live element. Stale ids never alias a different live element because the generation
/// must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The slot generation of this id.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Element flags controlling display and scrolling.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is displayed (the inverse of `display: none`).
        const DISPLAYED = 0b0000_0001;
        /// Element establishes a scroll context for its descendants.
        const SCROLLS   = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::DISPLAYED
    }
}

/// What a document-level listener is attached to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenTarget {
    /// The document itself; sees every event.
    Document,
    /// A single element.
    Element(ElementId),
}

/// One registered listener: an owner key listening for a named event on a target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Listener {
    /// Opaque owner key chosen by the subscriber.
    pub owner: u64,
    /// Where the listener is attached.
    pub target: ListenTarget,
    /// Event name, e.g. `"pointerdown"`.
    pub event: &'static str,
}
