//! The map contract shared by every store in this crate.
//!
//! [`MapStore`] is what [`CanonicalKeyMap`](crate::CanonicalKeyMap) decorates
//! and what [`MultiValueMapAdapter`](crate::MultiValueMapAdapter) adapts. It
//! is implemented for this crate's own maps as well as for
//! [`hashbrown::HashMap`], [`BTreeMap`] and, with the `std` feature,
//! `std::collections::HashMap`.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::LinkedMap;
use crate::linked_map;

/// A mutable key-value store.
///
/// Reads come in two flavours. [`peek`](MapStore::peek) never changes the
/// store, while [`get`](MapStore::get) and [`get_mut`](MapStore::get_mut)
/// count as a use of the entry, which matters for access-ordered stores.
/// Stores without an access order treat both the same.
pub trait MapStore {
    /// Key type.
    type Key;
    /// Value type.
    type Value;
    /// Iterator over `(key, value)` pairs in the store's iteration order.
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Number of entries.
    fn len(&self) -> usize;

    /// `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `key` is present. Never counts as a use.
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Reads a value without counting as a use.
    fn peek(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Reads a value, counting as a use.
    fn get(&mut self, key: &Self::Key) -> Option<&Self::Value>;

    /// Mutably borrows a value, counting as a use.
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Value>;

    /// Inserts or overwrites, returning the previous value.
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Returns the value for `key`, inserting `default()` first if absent.
    fn get_or_insert_with<F>(&mut self, key: Self::Key, default: F) -> &mut Self::Value
    where
        F: FnOnce() -> Self::Value;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Iterates over all entries.
    fn iter(&self) -> Self::Iter<'_>;
}

impl<K: Hash + Eq, V, S: BuildHasher> MapStore for LinkedMap<K, V, S> {
    type Iter<'a>
        = linked_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        LinkedMap::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        LinkedMap::contains_key(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        LinkedMap::peek(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LinkedMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        LinkedMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LinkedMap::insert(self, key, value)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        LinkedMap::get_or_insert_with(self, key, default)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LinkedMap::remove(self, key)
    }

    fn clear(&mut self) {
        LinkedMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        LinkedMap::iter(self)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MapStore for hashbrown::HashMap<K, V, S> {
    type Iter<'a>
        = hashbrown::hash_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        hashbrown::HashMap::contains_key(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        hashbrown::HashMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        hashbrown::HashMap::insert(self, key, value)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        self.entry(key).or_insert_with(default)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        hashbrown::HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        hashbrown::HashMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        hashbrown::HashMap::iter(self)
    }
}

#[cfg(feature = "std")]
impl<K: Hash + Eq, V, S: BuildHasher> MapStore for std::collections::HashMap<K, V, S> {
    type Iter<'a>
        = std::collections::hash_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        std::collections::HashMap::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        std::collections::HashMap::contains_key(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        std::collections::HashMap::get(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        std::collections::HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        std::collections::HashMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        std::collections::HashMap::insert(self, key, value)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        self.entry(key).or_insert_with(default)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        std::collections::HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        std::collections::HashMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        std::collections::HashMap::iter(self)
    }
}

impl<K: Ord, V> MapStore for BTreeMap<K, V> {
    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        BTreeMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        self.entry(key).or_insert_with(default)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }
}
