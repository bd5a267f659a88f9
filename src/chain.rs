//! Doubly linked chains threaded through a slotmap arena.
//!
//! Nodes link to each other by arena key, never by pointer. A node type
//! exposes its `Links` through `Linked`; the free functions here do the
//! splicing so the entry list and the bucket lists share one set of
//! link/unlink rules while keeping their own ownership semantics.

use slotmap::{Key, SlotMap};

/// Neighbour keys of a node. `None` marks the end of a chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Links<L> {
    pub(crate) prev: Option<L>,
    pub(crate) next: Option<L>,
}

impl<L> Links<L> {
    pub(crate) const fn detached() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

/// A node that can be threaded into a chain stored in `SlotMap<Self::Key, Self>`.
pub(crate) trait Linked {
    type Key: Key;

    fn links(&self) -> &Links<Self::Key>;
    fn links_mut(&mut self) -> &mut Links<Self::Key>;
}

/// Thread `node` between `prev` and `next`, which must currently be adjacent
/// (or absent at the chain ends).
pub(crate) fn splice<N: Linked>(
    arena: &mut SlotMap<N::Key, N>,
    node: N::Key,
    prev: Option<N::Key>,
    next: Option<N::Key>,
) {
    if let Some(p) = prev.and_then(|p| arena.get_mut(p)) {
        p.links_mut().next = Some(node);
    }
    if let Some(n) = next.and_then(|n| arena.get_mut(n)) {
        n.links_mut().prev = Some(node);
    }
    if let Some(n) = arena.get_mut(node) {
        *n.links_mut() = Links { prev, next };
    }
}

/// Detach `node`, joining its neighbours. Returns the links it had, or `None`
/// if the key is not live. The node itself stays in the arena.
pub(crate) fn unlink<N: Linked>(arena: &mut SlotMap<N::Key, N>, node: N::Key) -> Option<Links<N::Key>> {
    let links = *arena.get(node)?.links();
    if let Some(p) = links.prev.and_then(|p| arena.get_mut(p)) {
        p.links_mut().next = links.next;
    }
    if let Some(n) = links.next.and_then(|n| arena.get_mut(n)) {
        n.links_mut().prev = links.prev;
    }
    if let Some(n) = arena.get_mut(node) {
        *n.links_mut() = Links::detached();
    }
    Some(links)
}

/// Walk forward from `start` until the chain ends.
pub(crate) fn walk<'a, N: Linked>(
    arena: &'a SlotMap<N::Key, N>,
    start: Option<N::Key>,
) -> impl Iterator<Item = (N::Key, &'a N)> + 'a {
    let first = start.and_then(|k| arena.get(k).map(|n| (k, n)));
    core::iter::successors(first, move |(_, n)| {
        n.links().next.and_then(|k| arena.get(k).map(|n| (k, n)))
    })
}
