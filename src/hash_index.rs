//! Hash index: chained buckets of non-owning references into the order list.
//!
//! The index is a routing structure only. It never owns an entry and is
//! never consulted for existence or order; `OrderList` is authoritative
//! for both. Each bucket is a chain of `BucketRef` nodes stored in one
//! shared arena.

use crate::chain::{self, Linked, Links};
use crate::order_list::{NodeKey, OrderList};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct RefKey;
}

#[derive(Debug)]
struct BucketRef {
    links: Links<RefKey>,
    target: NodeKey,
}

impl Linked for BucketRef {
    type Key = RefKey;

    fn links(&self) -> &Links<RefKey> {
        &self.links
    }
    fn links_mut(&mut self) -> &mut Links<RefKey> {
        &mut self.links
    }
}

/// One bucket: the ends of its reference chain.
#[derive(Copy, Clone, Debug, Default)]
struct Bucket {
    head: Option<RefKey>,
    tail: Option<RefKey>,
}

impl Bucket {
    fn push_back(&mut self, refs: &mut SlotMap<RefKey, BucketRef>, target: NodeKey) {
        let r = refs.insert(BucketRef {
            links: Links::detached(),
            target,
        });
        chain::splice(refs, r, self.tail, None);
        if self.head.is_none() {
            self.head = Some(r);
        }
        self.tail = Some(r);
    }

    fn remove(&mut self, refs: &mut SlotMap<RefKey, BucketRef>, r: RefKey) -> Option<NodeKey> {
        let old = chain::unlink(refs, r)?;
        if self.head == Some(r) {
            self.head = old.next;
        }
        if self.tail == Some(r) {
            self.tail = old.prev;
        }
        refs.remove(r).map(|b| b.target)
    }

    fn iter<'a>(&self, refs: &'a SlotMap<RefKey, BucketRef>) -> impl Iterator<Item = (RefKey, NodeKey)> + 'a {
        chain::walk(refs, self.head).map(|(r, b)| (r, b.target))
    }
}

pub(crate) struct HashIndex {
    buckets: Vec<Bucket>,
    refs: SlotMap<RefKey, BucketRef>,
}

impl HashIndex {
    /// An empty index with `capacity` buckets (at least one).
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buckets: vec![Bucket::default(); capacity.max(1)],
            refs: SlotMap::with_key(),
        }
    }

    /// Build a fresh index over every entry of `order`, scanning oldest to
    /// newest so each bucket's chain is in insertion order too.
    pub(crate) fn build<K, V>(capacity: usize, order: &OrderList<K, V>) -> Self {
        let mut index = Self {
            buckets: vec![Bucket::default(); capacity.max(1)],
            refs: SlotMap::with_capacity_and_key(order.len()),
        };
        for (node, e) in order.entries() {
            index.insert(e.hash, node);
        }
        log::trace!(
            "rebuilt hash index: {} buckets, {} references",
            index.capacity(),
            index.len()
        );
        index
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of bucket references across all buckets.
    pub(crate) fn len(&self) -> usize {
        self.refs.len()
    }

    pub(crate) fn slot(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    pub(crate) fn insert(&mut self, hash: u64, target: NodeKey) {
        let slot = self.slot(hash);
        self.buckets[slot].push_back(&mut self.refs, target);
    }

    /// Scan the bucket for `hash`, returning the first target accepted by `is_match`.
    pub(crate) fn find<F>(&self, hash: u64, mut is_match: F) -> Option<NodeKey>
    where
        F: FnMut(NodeKey) -> bool,
    {
        self.buckets[self.slot(hash)]
            .iter(&self.refs)
            .map(|(_, target)| target)
            .find(|&target| is_match(target))
    }

    /// Drop the reference to `target` from the bucket for `hash`.
    pub(crate) fn remove(&mut self, hash: u64, target: NodeKey) -> bool {
        let slot = self.slot(hash);
        let found = self.buckets[slot]
            .iter(&self.refs)
            .find(|&(_, t)| t == target)
            .map(|(r, _)| r);
        match found {
            Some(r) => self.buckets[slot].remove(&mut self.refs, r).is_some(),
            None => false,
        }
    }

    /// Empty every bucket, keeping the bucket count.
    pub(crate) fn clear(&mut self) {
        self.refs.clear();
        self.buckets.fill(Bucket::default());
    }

    /// Targets referenced from the bucket `slot`, in chain order.
    #[cfg(test)]
    pub(crate) fn bucket(&self, slot: usize) -> Vec<NodeKey> {
        self.buckets[slot].iter(&self.refs).map(|(_, t)| t).collect()
    }
}
