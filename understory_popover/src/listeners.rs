// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener bookkeeping held by each popover.
//!
//! A [`ListenerRegistry`] remembers which `(target, kind)` pairs its owner is subscribed to on
//! the [`Host`], so the owner can subscribe once and release everything on teardown without
//! tracking it by hand.

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::host::Host;
use crate::types::{EventKind, EventTarget};

static NEXT_OWNER: AtomicU32 = AtomicU32::new(1);

/// Process-unique key identifying a listener owner in the host's listener table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerOwner(u32);

impl ListenerOwner {
    /// Allocate a fresh owner key.
    pub fn next() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw key, for hosts with integer-keyed tables.
    pub fn get(self) -> u64 {
        u64::from(self.0)
    }
}

/// Subscriptions held by one owner.
#[derive(Clone, Debug)]
pub struct ListenerRegistry<E> {
    owner: ListenerOwner,
    active: Vec<(EventTarget<E>, EventKind)>,
}

impl<E: Copy + Eq> ListenerRegistry<E> {
    /// Empty registry with a fresh owner key.
    pub fn new() -> Self {
        Self {
            owner: ListenerOwner::next(),
            active: Vec::new(),
        }
    }

    /// Owner key used with the host.
    pub fn owner(&self) -> ListenerOwner {
        self.owner
    }

    /// Subscribe to `kind` on `target` unless already subscribed.
    pub fn listen_to<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        target: EventTarget<E>,
        kind: EventKind,
    ) {
        if self.is_listening(target, kind) {
            return;
        }
        host.subscribe(self.owner, target, kind);
        self.active.push((target, kind));
    }

    /// Unsubscribe from `kind` on `target`.
    ///
    /// The host is always asked to unsubscribe, even if this registry has no record of the
    /// subscription; hosts are idempotent here.
    pub fn stop_listening_to<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        target: EventTarget<E>,
        kind: EventKind,
    ) {
        host.unsubscribe(self.owner, target, kind);
        self.active.retain(|&(t, k)| !(t == target && k == kind));
    }

    /// Unsubscribe everything this registry holds.
    pub fn stop_listening_all<H: Host<Element = E>>(&mut self, host: &mut H) {
        for (target, kind) in self.active.drain(..) {
            host.unsubscribe(self.owner, target, kind);
        }
    }

    /// Returns true if subscribed to `kind` on `target`.
    pub fn is_listening(&self, target: EventTarget<E>, kind: EventKind) -> bool {
        self.active.iter().any(|&(t, k)| t == target && k == kind)
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns true if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<E: Copy + Eq> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;

    #[test]
    fn owners_are_unique() {
        let a = ListenerOwner::next();
        let b = ListenerOwner::next();
        assert_ne!(a, b);
        assert_ne!(a.get(), b.get());
    }

    #[test]
    fn listen_to_subscribes_once() {
        let mut host = TestHost::new();
        let mut reg = ListenerRegistry::new();
        reg.listen_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        reg.listen_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        assert_eq!(reg.len(), 1);
        assert_eq!(host.subscribe_calls, 1);
        assert_eq!(
            host.listener_count(EventTarget::Document, EventKind::PointerDown),
            1
        );
    }

    #[test]
    fn stop_listening_is_unconditional_and_idempotent() {
        let mut host = TestHost::new();
        let mut reg: ListenerRegistry<u32> = ListenerRegistry::new();
        reg.stop_listening_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        assert_eq!(host.unsubscribe_calls, 1);

        reg.listen_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        reg.stop_listening_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        reg.stop_listening_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        assert!(reg.is_empty());
        assert_eq!(
            host.listener_count(EventTarget::Document, EventKind::PointerDown),
            0
        );
    }

    #[test]
    fn stop_listening_all_releases_everything() {
        let mut host = TestHost::new();
        let mut reg = ListenerRegistry::new();
        reg.listen_to(&mut host, EventTarget::Document, EventKind::PointerDown);
        reg.listen_to(&mut host, EventTarget::Element(3), EventKind::Click);
        assert!(reg.is_listening(EventTarget::Element(3), EventKind::Click));
        reg.stop_listening_all(&mut host);
        assert!(reg.is_empty());
        assert_eq!(host.listener_count(EventTarget::Element(3), EventKind::Click), 0);
        assert_eq!(
            host.listener_count(EventTarget::Document, EventKind::PointerDown),
            0
        );
    }
}
