//! Insertion- or access-ordered hash map.
//!
//! [`LinkedMap`] keeps its entries on a doubly linked list threaded through
//! an arena, with a hash table indexing the arena for O(1) lookups. The
//! [`Order`] chosen at construction decides how the list is maintained:
//!
//! - [`Order::Insertion`]: entries stay where they were first inserted.
//! - [`Order::Access`]: every read or write of an entry through [`get`],
//!   [`get_mut`], [`insert`] or [`get_or_insert_with`] moves it to the back,
//!   so the front is always the least recently used entry.
//!
//! [`peek`] reads without touching the order and only needs `&self`.
//!
//! [`get`]: LinkedMap::get
//! [`get_mut`]: LinkedMap::get_mut
//! [`insert`]: LinkedMap::insert
//! [`get_or_insert_with`]: LinkedMap::get_or_insert_with
//! [`peek`]: LinkedMap::peek
//!
//! # Examples
//!
//! ```
//! use keyed_maps::LinkedMap;
//! use keyed_maps::Order;
//!
//! let mut map = LinkedMap::with_order(Order::Access);
//! map.insert("a", 1);
//! map.insert("b", 2);
//! map.get(&"a");
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, ["b", "a"]);
//! ```

use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use hashbrown::HashTable;

use crate::Ptr;
use crate::RandomState;
use crate::Sizing;
use crate::arena::Arena;
use crate::arena::Node;

mod iter;

pub use iter::IntoIter;
pub use iter::Iter;

/// Ordering policy of a [`LinkedMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Entries keep the position of their first insertion.
    #[default]
    Insertion,
    /// Entries move to the back whenever they are read or written.
    Access,
}

/// A hash map that keeps its entries in insertion or access order.
///
/// The generic parameters are:
/// - `K`: key type, `Hash + Eq` for every keyed operation
/// - `V`: value type
/// - `S`: hash builder, defaults to the crate's [`RandomState`]
///
/// # Examples
///
/// ```
/// use keyed_maps::LinkedMap;
///
/// let mut map = LinkedMap::new();
/// map.insert("apple", 5);
/// map.insert("banana", 3);
/// map.insert("apple", 8);
///
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"apple", &8), (&"banana", &3)]);
/// ```
#[derive(Clone)]
pub struct LinkedMap<K, V, S = RandomState> {
    head: Option<Ptr>,
    tail: Option<Ptr>,
    nodes: Arena<K, V>,
    table: HashTable<Ptr>,
    hasher: S,
    order: Order,
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug for LinkedMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S: Default> Default for LinkedMap<K, V, S> {
    fn default() -> Self {
        LinkedMap::with_capacity_and_hasher(0, Order::Insertion, S::default())
    }
}

impl<K, V> LinkedMap<K, V> {
    /// Creates an empty insertion-ordered map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty insertion-ordered map with room for at least
    /// `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        LinkedMap::with_capacity_and_hasher(capacity, Order::Insertion, RandomState::default())
    }

    /// Creates an empty map with the given ordering policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_maps::LinkedMap;
    /// use keyed_maps::Order;
    ///
    /// let map: LinkedMap<u8, u8> = LinkedMap::with_order(Order::Access);
    /// assert_eq!(map.order(), Order::Access);
    /// ```
    pub fn with_order(order: Order) -> Self {
        LinkedMap::with_capacity_and_hasher(0, order, RandomState::default())
    }

    /// Creates an empty map pre-sized from `sizing`.
    pub fn with_sizing(sizing: Sizing, order: Order) -> Self {
        LinkedMap::with_capacity_and_hasher(sizing.reserve(), order, RandomState::default())
    }
}

impl<K, V, S> LinkedMap<K, V, S> {
    /// Creates an empty map with the given capacity, ordering policy and
    /// hasher.
    pub fn with_capacity_and_hasher(capacity: usize, order: Order, hasher: S) -> Self {
        LinkedMap {
            head: None,
            tail: None,
            nodes: Arena::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher,
            order,
        }
    }

    /// The ordering policy chosen at construction.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Returns a reference to the map's hasher.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.table.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns the entry at the front: the eldest entry in insertion order,
    /// or the least recently used one in access order.
    pub fn front(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.head?];
        Some((&node.key, &node.value))
    }

    /// Returns the entry at the back: the newest entry in insertion order,
    /// or the most recently used one in access order.
    pub fn back(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.tail?];
        Some((&node.key, &node.value))
    }

    /// Removes and returns the entry at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_maps::LinkedMap;
    ///
    /// let mut map = LinkedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// assert_eq!(map.pop_front(), Some(("a", 1)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let node = self.remove_ptr(self.head?);
        Some((node.key, node.value))
    }

    /// Removes and returns the entry at the back.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let node = self.remove_ptr(self.tail?);
        Some((node.key, node.value))
    }

    /// Returns an iterator over the entries, front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.head, self.tail, self.len())
    }

    /// Returns an iterator over the keys, front to back.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values, front to back.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Retains only the entries for which `f` returns `true`, visiting them
    /// front to back. The order of retained entries is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_maps::LinkedMap;
    ///
    /// let mut map: LinkedMap<i32, i32> = (1..=4).map(|i| (i, i * 10)).collect();
    /// map.retain(|key, value| {
    ///     *value += 1;
    ///     key % 2 == 0
    /// });
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&2, &21), (&4, &41)]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.head;
        while let Some(ptr) = cursor {
            let node = &mut self.nodes[ptr];
            cursor = node.next;
            if !f(&node.key, &mut node.value) {
                self.remove_ptr(ptr);
            }
        }
    }

    fn move_to_back(&mut self, ptr: Ptr) {
        if self.tail == Some(ptr) {
            return;
        }
        self.unlink(ptr);
        self.link_back(ptr);
    }

    fn touch(&mut self, ptr: Ptr) {
        if self.order == Order::Access {
            self.move_to_back(ptr);
        }
    }

    fn link_back(&mut self, ptr: Ptr) {
        let prev = self.tail;
        {
            let node = &mut self.nodes[ptr];
            node.prev = prev;
            node.next = None;
        }
        match prev {
            Some(prev) => self.nodes[prev].next = Some(ptr),
            None => self.head = Some(ptr),
        }
        self.tail = Some(ptr);
    }

    fn unlink(&mut self, ptr: Ptr) {
        let (prev, next) = {
            let node = &self.nodes[ptr];
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Unlinks, unindexes and frees `ptr`. Uses the cached hash, so no key
    /// hashing is needed.
    fn remove_ptr(&mut self, ptr: Ptr) -> Node<K, V> {
        let hash = self.nodes[ptr].hash;
        match self.table.find_entry(hash, |&candidate| candidate == ptr) {
            Ok(occupied) => {
                occupied.remove();
            }
            Err(_) => {
                #[cold]
                #[inline(never)]
                fn die() -> ! {
                    panic!("Pointer not found in table");
                }
                die()
            }
        }
        self.unlink(ptr);
        self.nodes.free(ptr)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LinkedMap<K, V, S> {
    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let nodes = &self.nodes;
        self.table.reserve(additional, |&ptr| nodes[ptr].hash);
        self.nodes.reserve(additional);
    }

    fn find(&self, key: &K) -> Option<Ptr> {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |&ptr| self.nodes[ptr].key == *key)
            .copied()
    }

    fn push_back(&mut self, hash: u64, key: K, value: V) -> Ptr {
        let ptr = self.nodes.alloc(Node {
            key,
            value,
            hash,
            prev: None,
            next: None,
        });
        self.link_back(ptr);
        let nodes = &self.nodes;
        self.table.insert_unique(hash, ptr, |&ptr| nodes[ptr].hash);
        ptr
    }

    /// Returns `true` if the map contains `key`. Never changes the order.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value for `key` without changing the order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.find(key).map(|ptr| &self.nodes[ptr].value)
    }

    /// Returns the value for `key`. In access order this marks the entry as
    /// most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let ptr = self.find(key)?;
        self.touch(ptr);
        Some(&self.nodes[ptr].value)
    }

    /// Returns a mutable reference to the value for `key`. In access order
    /// this marks the entry as most recently used.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let ptr = self.find(key)?;
        self.touch(ptr);
        Some(&mut self.nodes[ptr].value)
    }

    /// Inserts a key-value pair, returning the previous value for `key`.
    ///
    /// A new key goes to the back. An existing key keeps its position in
    /// insertion order and moves to the back in access order.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_maps::LinkedMap;
    ///
    /// let mut map = LinkedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.peek(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        match self.table.find(hash, |&ptr| self.nodes[ptr].key == key) {
            Some(&ptr) => {
                let old = core::mem::replace(&mut self.nodes[ptr].value, value);
                self.touch(ptr);
                Some(old)
            }
            None => {
                self.push_back(hash, key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting `default()` at the back first
    /// if the key is absent. An existing entry is touched as by [`get_mut`].
    ///
    /// [`get_mut`]: LinkedMap::get_mut
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = self.hasher.hash_one(&key);
        let ptr = match self.table.find(hash, |&ptr| self.nodes[ptr].key == key) {
            Some(&ptr) => {
                self.touch(ptr);
                ptr
            }
            None => self.push_back(hash, key, default()),
        };
        &mut self.nodes[ptr].value
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and its value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let ptr = self.find(key)?;
        let node = self.remove_ptr(ptr);
        Some((node.key, node.value))
    }
}

impl<K, V, S> PartialEq for LinkedMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Maps are equal when they hold the same entries, regardless of order.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.peek(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V, S> Eq for LinkedMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for LinkedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for LinkedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for LinkedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.clone(), value.clone());
        }
    }
}

impl<K, V, S> IntoIterator for LinkedMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        IntoIter::new(self.nodes, self.head, self.tail, len)
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Index<&K> for LinkedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        match self.peek(key) {
            Some(value) => value,
            None => {
                #[cold]
                #[inline(never)]
                fn missing() -> ! {
                    panic!("Key not found in map");
                }
                missing()
            }
        }
    }
}
