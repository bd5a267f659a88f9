//! Ordered entry list: owns every entry and defines iteration order.

use crate::chain::{self, Linked, Links};
use slotmap::{new_key_type, SecondaryMap, SlotMap};

new_key_type! {
    /// Arena key of a node in the ordered entry list.
    pub(crate) struct NodeKey;
}

#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

#[derive(Debug)]
pub(crate) struct OrderNode<K, V> {
    links: Links<NodeKey>,
    // `None` only for the head and tail sentinels.
    entry: Option<Entry<K, V>>,
}

impl<K, V> Linked for OrderNode<K, V> {
    type Key = NodeKey;

    fn links(&self) -> &Links<NodeKey> {
        &self.links
    }
    fn links_mut(&mut self) -> &mut Links<NodeKey> {
        &mut self.links
    }
}

/// Entries in insertion order, bounded by two permanent sentinels.
///
/// Node keys stay valid until that node is removed; nothing else in the
/// map (resizes included) moves or renames a node.
pub(crate) struct OrderList<K, V> {
    nodes: SlotMap<NodeKey, OrderNode<K, V>>,
    head: NodeKey,
    tail: NodeKey,
    len: usize,
}

impl<K, V> OrderList<K, V> {
    pub(crate) fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let head = nodes.insert(OrderNode {
            links: Links::detached(),
            entry: None,
        });
        let tail = nodes.insert(OrderNode {
            links: Links::detached(),
            entry: None,
        });
        chain::splice(&mut nodes, tail, Some(head), None);
        Self {
            nodes,
            head,
            tail,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> NodeKey {
        self.head
    }

    pub(crate) fn tail(&self) -> NodeKey {
        self.tail
    }

    /// First interior node, or the tail sentinel when empty.
    pub(crate) fn front_or_tail(&self) -> NodeKey {
        self.successor(self.head).unwrap_or(self.tail)
    }

    /// Last interior node, or the head sentinel when empty.
    pub(crate) fn back_or_head(&self) -> NodeKey {
        self.predecessor(self.tail).unwrap_or(self.head)
    }

    pub(crate) fn successor(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node)?.links.next
    }

    pub(crate) fn predecessor(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node)?.links.prev
    }

    pub(crate) fn entry(&self, node: NodeKey) -> Option<&Entry<K, V>> {
        self.nodes.get(node)?.entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self, node: NodeKey) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(node)?.entry.as_mut()
    }

    /// Entry of a node the caller just located or appended.
    pub(crate) fn live_mut(&mut self, node: NodeKey) -> &mut Entry<K, V> {
        match self.entry_mut(node) {
            Some(e) => e,
            None => panic!("ordered list lost a live node"),
        }
    }

    /// Append at the tail; the new node is the newest in iteration order.
    pub(crate) fn push_back(&mut self, entry: Entry<K, V>) -> NodeKey {
        let prev = self.predecessor(self.tail);
        let node = self.nodes.insert(OrderNode {
            links: Links::detached(),
            entry: Some(entry),
        });
        chain::splice(&mut self.nodes, node, prev, Some(self.tail));
        self.len += 1;
        node
    }

    /// Unlink and destroy an interior node. Sentinels and stale keys yield `None`.
    pub(crate) fn remove(&mut self, node: NodeKey) -> Option<Entry<K, V>> {
        self.entry(node)?;
        chain::unlink(&mut self.nodes, node)?;
        let entry = self.nodes.remove(node)?.entry;
        self.len -= 1;
        entry
    }

    /// Destroy every interior node, leaving only the sentinels.
    pub(crate) fn clear(&mut self) {
        self.nodes.retain(|_, n| n.entry.is_none());
        if let Some(h) = self.nodes.get_mut(self.head) {
            *h.links_mut() = Links::detached();
        }
        chain::splice(&mut self.nodes, self.tail, Some(self.head), None);
        self.len = 0;
    }

    /// Interior nodes from oldest to newest.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (NodeKey, &Entry<K, V>)> + '_ {
        chain::walk(&self.nodes, self.successor(self.head))
            .map_while(|(k, n)| n.entry.as_ref().map(|e| (k, e)))
    }

    /// Mutable borrows of every entry, oldest first.
    ///
    /// The arena hands out disjoint `&mut` only in slot order, so each
    /// borrow is dropped into its rank in insertion order.
    pub(crate) fn entries_mut(&mut self) -> Vec<&mut Entry<K, V>> {
        let mut rank: SecondaryMap<NodeKey, usize> = SecondaryMap::with_capacity(self.nodes.len());
        for (i, (node, _)) in self.entries().enumerate() {
            rank.insert(node, i);
        }
        let mut ordered: Vec<Option<&mut Entry<K, V>>> = Vec::with_capacity(self.len);
        ordered.resize_with(self.len, || None);
        for (node, n) in self.nodes.iter_mut() {
            if let (Some(&i), Some(e)) = (rank.get(node), n.entry.as_mut()) {
                ordered[i] = Some(e);
            }
        }
        ordered.into_iter().flatten().collect()
    }

    /// Consume the list, yielding entries oldest first.
    pub(crate) fn into_entries(mut self) -> Vec<Entry<K, V>> {
        let order: Vec<NodeKey> = self.entries().map(|(node, _)| node).collect();
        order
            .into_iter()
            .filter_map(|node| self.nodes.remove(node).and_then(|n| n.entry))
            .collect()
    }
}

impl<K: Clone, V: Clone> Clone for OrderList<K, V> {
    /// Fresh sentinels and fresh nodes; only order and contents carry over.
    fn clone(&self) -> Self {
        let mut out = OrderList::new();
        for (_, e) in self.entries() {
            out.push_back(e.clone());
        }
        out
    }
}
