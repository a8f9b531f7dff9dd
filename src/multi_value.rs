//! Maps from one key to an ordered sequence of values.
//!
//! [`MultiValueMap`] is the contract HTTP header and query-parameter
//! containers are built on: `add` appends, `set` replaces, and
//! [`to_single_value_map`](MultiValueMap::to_single_value_map) projects to
//! the first value of each key.
//!
//! [`MultiValueMapAdapter`] implements it over any [`MapStore`] whose values
//! are `Vec<V>`, so the storage policy comes from the wrapped store. Wrapping
//! a [`CaseInsensitiveMap`](crate::CaseInsensitiveMap) gives case-insensitive
//! header names; wrapping a [`LinkedMap`] gives
//! [`MultiValueLinkedMap`].

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;
use core::marker::PhantomData;

use crate::CaseInsensitiveMap;
use crate::LinkedMap;
use crate::MapStore;
use crate::Order;
use crate::Sizing;

/// A map from each key to an ordered, possibly duplicated, list of values.
///
/// A present key always has a list. Lists built through [`add`] and
/// [`set`] are never empty; `add_all` with no values, or mutation through
/// the adapter's `get_mut`, can leave one empty.
///
/// [`add`]: MultiValueMap::add
/// [`set`]: MultiValueMap::set
pub trait MultiValueMap {
    /// Key type.
    type Key;
    /// Element type of each key's list.
    type Value;
    /// Iterator over every key and its list.
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a [Self::Value])>
    where
        Self: 'a;

    /// Number of keys.
    fn len(&self) -> usize;

    /// `true` if there are no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The list for `key`, or `None` if absent.
    fn get(&self, key: &Self::Key) -> Option<&[Self::Value]>;

    /// `true` if `key` is present, even with an empty list.
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Appends `value` to the list for `key`, creating the list if needed.
    fn add(&mut self, key: Self::Key, value: Self::Value);

    /// Appends every element of `values` in order, creating the list if
    /// needed (even when `values` is empty).
    fn add_all<I>(&mut self, key: Self::Key, values: I)
    where
        I: IntoIterator<Item = Self::Value>;

    /// Replaces the whole list for `key` with `[value]`, returning the old
    /// list.
    fn set(&mut self, key: Self::Key, value: Self::Value) -> Option<Vec<Self::Value>>;

    /// Iterates over every key and its list.
    fn iter(&self) -> Self::Iter<'_>;

    /// Merges `other` into `self`: for each key of `other`, in `other`'s
    /// order, its values are appended after the values already stored here.
    fn add_all_from<M>(&mut self, other: &M)
    where
        M: MultiValueMap<Key = Self::Key, Value = Self::Value> + ?Sized,
        Self::Key: Clone,
        Self::Value: Clone,
    {
        for (key, values) in other.iter() {
            self.add_all(key.clone(), values.iter().cloned());
        }
    }

    /// Calls [`set`](MultiValueMap::set) for every entry.
    fn set_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Self::Key, Self::Value)>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// First value for `key`; `None` if the key is absent or its list empty.
    fn get_first(&self, key: &Self::Key) -> Option<&Self::Value> {
        self.get(key)?.first()
    }

    /// Last value for `key`; `None` if the key is absent or its list empty.
    fn get_last(&self, key: &Self::Key) -> Option<&Self::Value> {
        self.get(key)?.last()
    }

    /// Projects to a single-valued, insertion-ordered map holding the first
    /// value of each key. Keys whose list is empty are left out.
    fn to_single_value_map(&self) -> LinkedMap<Self::Key, Self::Value>
    where
        Self::Key: Hash + Eq + Clone,
        Self::Value: Clone,
    {
        self.iter()
            .filter_map(|(key, values)| Some((key.clone(), values.first()?.clone())))
            .collect()
    }
}

/// Iterator over the lists of a [`MultiValueMapAdapter`].
#[derive(Debug, Clone)]
pub struct Iter<I> {
    inner: I,
}

impl<'a, K: 'a, V: 'a, I> Iterator for Iter<I>
where
    I: Iterator<Item = (&'a K, &'a Vec<V>)>,
{
    type Item = (&'a K, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, values)| (key, values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A [`MultiValueMap`] over any store of `Vec<V>` values.
///
/// # Examples
///
/// ```
/// use keyed_maps::MultiValueLinkedMap;
/// use keyed_maps::MultiValueMap;
///
/// let mut params = MultiValueLinkedMap::new();
/// params.add("tag", "a");
/// params.add("tag", "b");
/// params.set("page", "1");
///
/// assert_eq!(params.get(&"tag"), Some(&["a", "b"][..]));
/// assert_eq!(params.get_first(&"tag"), Some(&"a"));
/// assert_eq!(params.get_last(&"tag"), Some(&"b"));
///
/// let single = params.to_single_value_map();
/// assert_eq!(single.peek(&"tag"), Some(&"a"));
/// ```
pub struct MultiValueMapAdapter<M, V> {
    inner: M,
    _values: PhantomData<fn() -> V>,
}

/// Multi-value map over an insertion-ordered [`LinkedMap`].
pub type MultiValueLinkedMap<K, V> = MultiValueMapAdapter<LinkedMap<K, Vec<V>>, V>;

/// Multi-value map with case-insensitive keys, in insertion order.
pub type CaseInsensitiveMultiValueMap<K, V> =
    MultiValueMapAdapter<CaseInsensitiveMap<K, Vec<V>>, V>;

/// HTTP header fields: case-insensitive names, each with its ordered
/// values.
pub type HeaderMap = CaseInsensitiveMultiValueMap<String, String>;

/// URL query parameters: exact names, each with its ordered values.
pub type QueryParams = MultiValueLinkedMap<String, String>;

impl<M: Clone, V> Clone for MultiValueMapAdapter<M, V> {
    fn clone(&self) -> Self {
        MultiValueMapAdapter::wrap(self.inner.clone())
    }
}

impl<M: Default, V> Default for MultiValueMapAdapter<M, V> {
    fn default() -> Self {
        MultiValueMapAdapter::wrap(M::default())
    }
}

impl<M: core::fmt::Debug, V> core::fmt::Debug for MultiValueMapAdapter<M, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<M: PartialEq, V> PartialEq for MultiValueMapAdapter<M, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<M: Eq, V> Eq for MultiValueMapAdapter<M, V> {}

impl<K, V> MultiValueMapAdapter<LinkedMap<K, Vec<V>>, V> {
    /// Creates an empty insertion-ordered multi-value map.
    pub fn new() -> Self {
        MultiValueMapAdapter::wrap(LinkedMap::new())
    }

    /// Creates an empty insertion-ordered multi-value map pre-sized from
    /// `sizing`.
    pub fn with_sizing(sizing: Sizing) -> Self {
        MultiValueMapAdapter::wrap(LinkedMap::with_sizing(sizing, Order::Insertion))
    }
}

impl<K, V> MultiValueMapAdapter<CaseInsensitiveMap<K, Vec<V>>, V> {
    /// Creates an empty multi-value map with case-insensitive keys.
    pub fn new() -> Self {
        MultiValueMapAdapter::wrap(CaseInsensitiveMap::new())
    }
}

impl<M, V> MultiValueMapAdapter<M, V> {
    /// Wraps `inner` without copying. Its existing lists are kept as they
    /// are.
    pub fn wrap(inner: M) -> Self {
        MultiValueMapAdapter {
            inner,
            _values: PhantomData,
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Unwraps the store.
    pub fn into_inner(self) -> M {
        self.inner
    }

    /// Returns a copy whose lists are independent of this map's lists.
    ///
    /// ```
    /// use keyed_maps::MultiValueLinkedMap;
    /// use keyed_maps::MultiValueMap;
    ///
    /// let mut original = MultiValueLinkedMap::new();
    /// original.add("a", 1);
    ///
    /// let mut copy = original.deep_copy();
    /// copy.get_mut(&"a").unwrap().push(2);
    ///
    /// assert_eq!(original.get(&"a"), Some(&[1][..]));
    /// assert_eq!(copy.get(&"a"), Some(&[1, 2][..]));
    /// ```
    pub fn deep_copy(&self) -> Self
    where
        M: Clone,
    {
        self.clone()
    }
}

impl<M, V> MultiValueMapAdapter<M, V>
where
    M: MapStore<Value = Vec<V>>,
{
    /// Mutable access to the list for `key`.
    pub fn get_mut(&mut self, key: &M::Key) -> Option<&mut Vec<V>> {
        self.inner.get_mut(key)
    }

    /// Appends `value` only if `key` is absent. Returns `true` if it was
    /// added.
    pub fn add_if_absent(&mut self, key: M::Key, value: V) -> bool {
        if self.inner.contains_key(&key) {
            return false;
        }
        self.inner.insert(key, alloc::vec![value]);
        true
    }

    /// Number of values stored for `key`.
    pub fn values_len(&self, key: &M::Key) -> usize {
        self.inner.peek(key).map_or(0, Vec::len)
    }

    /// Removes `key` and its whole list.
    pub fn remove(&mut self, key: &M::Key) -> Option<Vec<V>> {
        self.inner.remove(key)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &M::Key> {
        self.inner.iter().map(|(key, _)| key)
    }
}

impl<M, V> MultiValueMap for MultiValueMapAdapter<M, V>
where
    M: MapStore<Value = Vec<V>>,
{
    type Iter<'a>
        = Iter<M::Iter<'a>>
    where
        Self: 'a;
    type Key = M::Key;
    type Value = V;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &M::Key) -> Option<&[V]> {
        self.inner.peek(key).map(Vec::as_slice)
    }

    fn contains_key(&self, key: &M::Key) -> bool {
        self.inner.contains_key(key)
    }

    fn add(&mut self, key: M::Key, value: V) {
        self.inner.get_or_insert_with(key, Vec::new).push(value);
    }

    fn add_all<I>(&mut self, key: M::Key, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        self.inner.get_or_insert_with(key, Vec::new).extend(values);
    }

    fn set(&mut self, key: M::Key, value: V) -> Option<Vec<V>> {
        self.inner.insert(key, alloc::vec![value])
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter {
            inner: self.inner.iter(),
        }
    }
}

impl<M, V> Extend<(M::Key, V)> for MultiValueMapAdapter<M, V>
where
    M: MapStore<Value = Vec<V>>,
{
    /// Adds every pair through [`add`](MultiValueMap::add).
    fn extend<I: IntoIterator<Item = (M::Key, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<M, V> FromIterator<(M::Key, V)> for MultiValueMapAdapter<M, V>
where
    M: MapStore<Value = Vec<V>> + Default,
{
    fn from_iter<I: IntoIterator<Item = (M::Key, V)>>(iter: I) -> Self {
        let mut map = MultiValueMapAdapter::default();
        map.extend(iter);
        map
    }
}
