//! LinkedHashMap: the public map and its checked position handles.

use crate::config::Config;
use crate::error::MapError;
use crate::hash_index::HashIndex;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::order_list::{Entry, NodeKey, OrderList};
use crate::policy::ResizePolicy;
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::hash_map::DefaultHashBuilder;

/// Identity tag minted once per map instance (clones get a new one).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct MapId(u64);

impl MapId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A position in a `LinkedHashMap`: an entry, or the past-the-end slot.
///
/// Handles are plain values and do not borrow the map. Every access goes
/// back through the map that issued the handle and is checked: a handle
/// presented to a different map, moved past either end, dereferenced at
/// `end()`, or used after its entry was erased yields
/// `MapError::InvalidIterator`. Resizing never invalidates a handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    node: NodeKey,
    owner: MapId,
}

impl Handle {
    pub fn key<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<&'a K, MapError> {
        map.handle_entry(*self).map(|e| &e.key)
    }

    pub fn value<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<&'a V, MapError> {
        map.handle_entry(*self).map(|e| &e.value)
    }

    pub fn value_mut<'a, K, V, S>(
        &self,
        map: &'a mut LinkedHashMap<K, V, S>,
    ) -> Result<&'a mut V, MapError> {
        map.handle_entry_mut(*self).map(|e| &mut e.value)
    }

    pub fn entry<'a, K, V, S>(
        &self,
        map: &'a LinkedHashMap<K, V, S>,
    ) -> Result<(&'a K, &'a V), MapError> {
        map.handle_entry(*self).map(|e| (&e.key, &e.value))
    }

    /// The following position; from the last entry this is `end()`.
    /// Fails when already at `end()`.
    pub fn next<K, V, S>(&self, map: &LinkedHashMap<K, V, S>) -> Result<Handle, MapError> {
        map.step_forward(*self)
    }

    /// The preceding position; from `end()` this is the last entry.
    /// Fails at the first entry, or at `end()` of an empty map.
    pub fn prev<K, V, S>(&self, map: &LinkedHashMap<K, V, S>) -> Result<Handle, MapError> {
        map.step_back(*self)
    }
}

/// A hash map that iterates in insertion order.
///
/// Entries live in a doubly linked list in the order their keys were first
/// introduced; a chained hash index points into that list for O(1) average
/// lookup. Re-inserting an existing key never moves or overwrites it.
///
/// ```
/// use linked_hashmap::LinkedHashMap;
///
/// let mut m = LinkedHashMap::new();
/// m.insert("a", 1);
/// m.insert("b", 2);
/// m.insert("c", 3);
/// let b = m.find("b");
/// m.erase(b).unwrap();
/// m.insert("d", 4);
///
/// let keys: Vec<_> = m.keys().copied().collect();
/// assert_eq!(keys, ["a", "c", "d"]);
/// assert_eq!(m.find("b"), m.end());
/// ```
pub struct LinkedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    // Declared before `order`: buckets reference nodes, so they go first.
    index: HashIndex,
    order: OrderList<K, V>,
    policy: ResizePolicy,
    id: MapId,
    reentrancy: DebugReentrancy,
}

impl<K, V> LinkedHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::default().with_capacity(capacity))
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for LinkedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

// Operations that never touch user `Hash`/`Eq`.
impl<K, V, S> LinkedHashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(Config::default(), hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_config_and_hasher(Config::default().with_capacity(capacity), hasher)
    }

    pub fn with_config_and_hasher(config: Config, hasher: S) -> Self {
        Self {
            hasher,
            index: HashIndex::new(config.capacity()),
            order: OrderList::new(),
            policy: ResizePolicy::new(config.load_factor()),
            id: MapId::fresh(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Current number of hash buckets.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.policy.load_factor()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Remove every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Position of the oldest entry, or `end()` when empty.
    pub fn begin(&self) -> Handle {
        self.handle(self.order.front_or_tail())
    }

    /// The past-the-end position.
    pub fn end(&self) -> Handle {
        self.handle(self.order.tail())
    }

    pub fn front(&self) -> Option<(&K, &V)> {
        self.order
            .entry(self.order.front_or_tail())
            .map(|e| (&e.key, &e.value))
    }

    pub fn back(&self) -> Option<(&K, &V)> {
        self.order
            .entry(self.order.back_or_head())
            .map(|e| (&e.key, &e.value))
    }

    /// Remove the entry at `pos` and return it.
    ///
    /// Fails with `InvalidIterator` for `end()`, for a handle issued by
    /// another map, and for a handle whose entry is already gone.
    pub fn erase(&mut self, pos: Handle) -> Result<(K, V), MapError> {
        if pos.owner != self.id || pos.node == self.order.tail() {
            return Err(MapError::InvalidIterator);
        }
        let hash = self
            .order
            .entry(pos.node)
            .ok_or(MapError::InvalidIterator)?
            .hash;
        self.index.remove(hash, pos.node);
        let entry = self
            .order
            .remove(pos.node)
            .ok_or(MapError::InvalidIterator)?;
        if let Some(capacity) = self.policy.after_erase(self.order.len(), self.index.capacity()) {
            self.resize(capacity);
        }
        Ok((entry.key, entry.value))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.order)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.order)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    fn handle(&self, node: NodeKey) -> Handle {
        Handle {
            node,
            owner: self.id,
        }
    }

    fn check_owner(&self, h: Handle) -> Result<(), MapError> {
        if h.owner == self.id {
            Ok(())
        } else {
            Err(MapError::InvalidIterator)
        }
    }

    pub(crate) fn handle_entry(&self, h: Handle) -> Result<&Entry<K, V>, MapError> {
        self.check_owner(h)?;
        self.order.entry(h.node).ok_or(MapError::InvalidIterator)
    }

    pub(crate) fn handle_entry_mut(&mut self, h: Handle) -> Result<&mut Entry<K, V>, MapError> {
        self.check_owner(h)?;
        self.order.entry_mut(h.node).ok_or(MapError::InvalidIterator)
    }

    pub(crate) fn step_forward(&self, h: Handle) -> Result<Handle, MapError> {
        self.check_owner(h)?;
        if h.node == self.order.tail() {
            return Err(MapError::InvalidIterator);
        }
        self.order
            .successor(h.node)
            .map(|n| self.handle(n))
            .ok_or(MapError::InvalidIterator)
    }

    pub(crate) fn step_back(&self, h: Handle) -> Result<Handle, MapError> {
        self.check_owner(h)?;
        match self.order.predecessor(h.node) {
            Some(p) if p != self.order.head() => Ok(self.handle(p)),
            _ => Err(MapError::InvalidIterator),
        }
    }

    fn resize(&mut self, capacity: usize) {
        log::debug!(
            "resizing hash index from {} to {} buckets at {} entries",
            self.index.capacity(),
            capacity,
            self.order.len()
        );
        self.index = HashIndex::build(capacity, &self.order);
    }

    /// Append a new entry, index it, then apply the grow check.
    fn append(&mut self, entry: Entry<K, V>) -> NodeKey {
        let hash = entry.hash;
        let node = self.order.push_back(entry);
        self.index.insert(hash, node);
        if let Some(capacity) = self.policy.after_insert(self.order.len(), self.index.capacity()) {
            self.resize(capacity);
        }
        node
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    // Callers hold the reentrancy guard.
    fn locate<Q>(&self, hash: u64, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.index.find(hash, |node| {
            self.order
                .entry(node)
                .map(|e| e.hash == hash && e.key.borrow() == q)
                .unwrap_or(false)
        })
    }

    fn lookup<Q>(&self, q: &Q) -> (u64, Option<NodeKey>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        (hash, self.locate(hash, q))
    }

    /// Position of `q`, or `end()` if absent.
    pub fn find<Q>(&self, q: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_, node) = self.lookup(q);
        self.handle(node.unwrap_or(self.order.tail()))
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lookup(q).1.is_some()
    }

    /// 1 if `q` is present, else 0.
    pub fn count<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        usize::from(self.contains_key(q))
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_, node) = self.lookup(q);
        self.order.entry(node?).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_, node) = self.lookup(q);
        self.order.entry_mut(node?).map(|e| &mut e.value)
    }

    /// Like `get`, but absence is an error.
    pub fn at<Q>(&self, q: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).ok_or(MapError::MissingKey)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(q).ok_or(MapError::MissingKey)
    }

    /// Insert `key` unless it is already present.
    ///
    /// Returns the position of the new entry and `true`, or the position of
    /// the existing entry and `false`. An existing entry keeps its value and
    /// its place in the order.
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        let (hash, found) = self.lookup(&key);
        if let Some(node) = found {
            return (self.handle(node), false);
        }
        let node = self.append(Entry { key, value, hash });
        (self.handle(node), true)
    }

    /// The value for `key`, appending `default()` at the back if absent.
    /// `default` only runs when the key is new.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (hash, found) = self.lookup(&key);
        let node = match found {
            Some(node) => node,
            None => self.append(Entry {
                key,
                value: default(),
                hash,
            }),
        };
        &mut self.order.live_mut(node).value
    }

    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Remove `q` and return its value, if present.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let pos = self.find(q);
        self.erase(pos).ok().map(|(_, v)| v)
    }

    /// Checks invariants tying the index to the entry list.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(self.index.capacity() >= 1);
        assert_eq!(self.index.len(), self.order.len(), "one reference per entry");
        assert_eq!(self.order.entries().count(), self.order.len());
        for (node, e) in self.order.entries() {
            let slot = self.index.slot(e.hash);
            let refs = self
                .index
                .bucket(slot)
                .into_iter()
                .filter(|&t| t == node)
                .count();
            assert_eq!(refs, 1, "entry referenced once from its own bucket");
            assert_eq!(self.make_hash(&e.key), e.hash, "stored hash is current");
            let _g = self.reentrancy.enter();
            assert_eq!(self.locate(e.hash, &e.key), Some(node), "keys are unique");
        }
    }
}

impl<K, Q: ?Sized, V, S> Index<&Q> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if `key` is absent; use `at` or `get` to handle absence.
    fn index(&self, key: &Q) -> &V {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K, V, S> Clone for LinkedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// Deep copy with a fresh identity: handles from `self` are rejected by
    /// the clone and vice versa.
    fn clone(&self) -> Self {
        let order = self.order.clone();
        Self {
            hasher: self.hasher.clone(),
            index: HashIndex::build(self.index.capacity(), &order),
            order,
            policy: self.policy,
            id: MapId::fresh(),
            reentrancy: DebugReentrancy::new(),
        }
    }
}

impl<K, V, S> fmt::Debug for LinkedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Equal when both hold equal entries in the same order.
impl<K, V, S> PartialEq for LinkedHashMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for LinkedHashMap<K, V, S> {}

/// Keys already present keep their first value and position.
impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<K, V, S> IntoIterator for LinkedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.order)
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
