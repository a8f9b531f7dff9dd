//! A hash map bounded to a maximum number of entries, evicting the least
//! recently used one on overflow.

use core::hash::BuildHasher;
use core::hash::Hash;
use core::num::NonZeroUsize;

use crate::DEFAULT_INITIAL_CAPACITY;
use crate::Error;
use crate::LinkedMap;
use crate::MapStore;
use crate::Order;
use crate::RandomState;
use crate::Result;
use crate::linked_map;

/// An access-ordered map holding at most `max_capacity` entries.
///
/// [`get`], [`get_mut`], [`insert`] and [`get_or_insert_with`] mark an entry
/// as most recently used. [`peek`] and [`contains_key`] do not. When an
/// insertion of a new key would exceed the bound, the least recently used
/// entry is evicted, so `len() <= max_capacity()` holds after every
/// operation.
///
/// [`get`]: FixedLinkedHashMap::get
/// [`get_mut`]: FixedLinkedHashMap::get_mut
/// [`insert`]: FixedLinkedHashMap::insert
/// [`get_or_insert_with`]: FixedLinkedHashMap::get_or_insert_with
/// [`peek`]: FixedLinkedHashMap::peek
/// [`contains_key`]: FixedLinkedHashMap::contains_key
///
/// # Examples
///
/// ```
/// use keyed_maps::FixedLinkedHashMap;
///
/// let mut cache = FixedLinkedHashMap::new(2)?;
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.get(&"a");
/// cache.insert("c", 3);
///
/// assert!(cache.contains_key(&"a"));
/// assert!(!cache.contains_key(&"b"));
/// assert_eq!(cache.len(), 2);
/// # Ok::<(), keyed_maps::Error>(())
/// ```
#[derive(Clone)]
pub struct FixedLinkedHashMap<K, V, S = RandomState> {
    map: LinkedMap<K, V, S>,
    max_capacity: NonZeroUsize,
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug
    for FixedLinkedHashMap<K, V, S>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<K, V> FixedLinkedHashMap<K, V> {
    /// Creates an empty map bounded to `max_capacity` entries.
    ///
    /// Fails with [`Error::InvalidCapacity`] unless `max_capacity` is a
    /// positive integer that fits in `usize`.
    ///
    /// ```
    /// use keyed_maps::Error;
    /// use keyed_maps::FixedLinkedHashMap;
    ///
    /// assert!(FixedLinkedHashMap::<u8, u8>::new(1).is_ok());
    /// assert_eq!(FixedLinkedHashMap::<u8, u8>::new(0).unwrap_err(), Error::InvalidCapacity);
    /// assert_eq!(FixedLinkedHashMap::<u8, u8>::new(-1).unwrap_err(), Error::InvalidCapacity);
    /// ```
    pub fn new(max_capacity: impl TryInto<usize>) -> Result<Self> {
        FixedLinkedHashMap::with_hasher(max_capacity, RandomState::default())
    }
}

impl<K, V, S> FixedLinkedHashMap<K, V, S> {
    /// Creates an empty bounded map using `hasher`.
    pub fn with_hasher(max_capacity: impl TryInto<usize>, hasher: S) -> Result<Self> {
        let max_capacity = max_capacity
            .try_into()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(Error::InvalidCapacity)?;
        log::debug!("creating bounded map with max capacity {max_capacity}");

        let preallocate = max_capacity.get().min(DEFAULT_INITIAL_CAPACITY);
        Ok(FixedLinkedHashMap {
            map: LinkedMap::with_capacity_and_hasher(preallocate, Order::Access, hasher),
            max_capacity,
        })
    }

    /// The maximum number of entries.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity.get()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `true` if the next insertion of a new key evicts an entry.
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.max_capacity.get()
    }

    /// Removes every entry. The bound is kept.
    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// The least recently used entry, without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.map.front()
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.map.pop_front()
    }

    /// Iterates from the least to the most recently used entry.
    pub fn iter(&self) -> linked_map::Iter<'_, K, V> {
        self.map.iter()
    }

    /// Keys from the least to the most recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.map.keys()
    }

    /// Values from the least to the most recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.map.values()
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let evicted = self.map.pop_front();
        if evicted.is_some() {
            log::trace!(
                "evicted least recently used entry, max capacity {}",
                self.max_capacity
            );
        }
        evicted
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> FixedLinkedHashMap<K, V, S> {
    /// `true` if `key` is present. Does not mark it as used.
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Reads a value without marking it as used.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.peek(key)
    }

    /// Reads a value and marks it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Mutably borrows a value and marks it as most recently used.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    /// Inserts or updates `key`, marking it as most recently used, and
    /// returns the previous value.
    ///
    /// A new key inserted into a full map evicts the least recently used
    /// entry first.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if !self.map.contains_key(&key) && self.is_full() {
            self.evict_lru();
        }
        self.map.insert(key, value)
    }

    /// Like [`insert`](FixedLinkedHashMap::insert), but returns the entry
    /// that left the map: the replaced one if `key` was present, otherwise
    /// the evicted one if the map was full.
    ///
    /// ```
    /// use keyed_maps::FixedLinkedHashMap;
    ///
    /// let mut cache = FixedLinkedHashMap::new(1)?;
    /// assert_eq!(cache.push("a", 1), None);
    /// assert_eq!(cache.push("a", 2), Some(("a", 1)));
    /// assert_eq!(cache.push("b", 3), Some(("a", 2)));
    /// # Ok::<(), keyed_maps::Error>(())
    /// ```
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(replaced) = self.map.remove_entry(&key) {
            self.map.insert(key, value);
            return Some(replaced);
        }
        let evicted = if self.is_full() { self.evict_lru() } else { None };
        self.map.insert(key, value);
        evicted
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    /// The entry becomes the most recently used either way.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        if !self.map.contains_key(&key) && self.is_full() {
            self.evict_lru();
        }
        self.map.get_or_insert_with(key, default)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MapStore for FixedLinkedHashMap<K, V, S> {
    type Iter<'a>
        = linked_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        FixedLinkedHashMap::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        FixedLinkedHashMap::contains_key(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        FixedLinkedHashMap::peek(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        FixedLinkedHashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        FixedLinkedHashMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        FixedLinkedHashMap::insert(self, key, value)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        FixedLinkedHashMap::get_or_insert_with(self, key, default)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        FixedLinkedHashMap::remove(self, key)
    }

    fn clear(&mut self) {
        FixedLinkedHashMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        FixedLinkedHashMap::iter(self)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for FixedLinkedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> IntoIterator for FixedLinkedHashMap<K, V, S> {
    type IntoIter = linked_map::IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a FixedLinkedHashMap<K, V, S> {
    type IntoIter = linked_map::Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
