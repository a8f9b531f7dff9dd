//! Key-canonicalizing map decorator.
//!
//! [`CanonicalKeyMap`] wraps any [`MapStore`] and rewrites every key it is
//! handed through a [`KeyPolicy`] before delegating. Keys that fold to the
//! same canonical form address the same entry, so the backing store never
//! holds two keys with the same canonical form.
//!
//! Two policies are provided: [`CamelCase`] folds `snake_case` to
//! `camelCase`, and [`LowerCase`] makes keys case-insensitive. Any
//! `Fn(&str) -> Option<String>` can be used through [`FoldWith`].
//!
//! Only keys with a textual form (see [`FoldKey`]) are rewritten. Numeric
//! keys, and `None` for `Option` keys, pass through unchanged.
//!
//! # Examples
//!
//! ```
//! use keyed_maps::CaseInsensitiveMap;
//!
//! let mut headers = CaseInsensitiveMap::new();
//! headers.insert("Content-Type".to_string(), "text/html");
//! headers.insert("CONTENT-TYPE".to_string(), "application/json");
//!
//! assert_eq!(headers.len(), 1);
//! assert_eq!(headers.peek(&"content-type".to_string()), Some(&"application/json"));
//! ```

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::LinkedMap;
use crate::MapStore;
use crate::Order;
use crate::Sizing;

/// Keys that may have a textual form for a [`KeyPolicy`] to rewrite.
///
/// The provided implementation of [`refold`](FoldKey::refold) returns
/// `None`, meaning "no textual form, pass through unchanged".
pub trait FoldKey: Sized {
    /// Runs `fold` over the key's text and rebuilds a key from the result.
    ///
    /// Returns `None` when the key has no text, or when `fold` reports the
    /// text as already canonical.
    fn refold<F>(&self, _fold: F) -> Option<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        None
    }
}

impl FoldKey for String {
    fn refold<F: FnOnce(&str) -> Option<String>>(&self, fold: F) -> Option<Self> {
        fold(self.as_str())
    }
}

impl FoldKey for Box<str> {
    fn refold<F: FnOnce(&str) -> Option<String>>(&self, fold: F) -> Option<Self> {
        fold(self).map(String::into_boxed_str)
    }
}

impl FoldKey for Cow<'static, str> {
    fn refold<F: FnOnce(&str) -> Option<String>>(&self, fold: F) -> Option<Self> {
        fold(self).map(Cow::Owned)
    }
}

impl FoldKey for Rc<str> {
    fn refold<F: FnOnce(&str) -> Option<String>>(&self, fold: F) -> Option<Self> {
        fold(self).map(Rc::from)
    }
}

impl FoldKey for Arc<str> {
    fn refold<F: FnOnce(&str) -> Option<String>>(&self, fold: F) -> Option<Self> {
        fold(self).map(Arc::from)
    }
}

impl<K: FoldKey> FoldKey for Option<K> {
    fn refold<F: FnOnce(&str) -> Option<String>>(&self, fold: F) -> Option<Self> {
        self.as_ref()?.refold(fold).map(Some)
    }
}

macro_rules! opaque_keys {
    ($($ty:ty),* $(,)?) => {
        $(impl FoldKey for $ty {})*
    };
}

opaque_keys!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool, ()
);

/// A canonicalization policy.
///
/// Implementors only describe how text is folded. Implementations must be
/// pure, and should be idempotent: folding an already folded key must
/// report it as canonical.
pub trait KeyPolicy {
    /// Folds `text`, returning `None` when it is already canonical.
    fn fold_text(&self, text: &str) -> Option<String>;

    /// Canonical form of a borrowed key. Borrows when nothing changes.
    fn canonicalize<'k, K>(&self, key: &'k K) -> Cow<'k, K>
    where
        K: FoldKey + Clone,
    {
        match key.refold(|text| self.fold_text(text)) {
            Some(folded) => Cow::Owned(folded),
            None => Cow::Borrowed(key),
        }
    }

    /// Canonical form of an owned key.
    fn canonicalize_owned<K: FoldKey>(&self, key: K) -> K {
        key.refold(|text| self.fold_text(text)).unwrap_or(key)
    }
}

/// Folds `snake_case` keys to `camelCase`.
///
/// A run of underscores followed by an alphabetic character collapses into
/// the uppercased character. Every other character is kept, including
/// underscores not followed by a letter. Keys without underscores are
/// already canonical.
///
/// ```
/// use keyed_maps::CamelCase;
/// use keyed_maps::KeyPolicy;
///
/// assert_eq!(CamelCase.fold_text("user_name_id").as_deref(), Some("userNameId"));
/// assert_eq!(CamelCase.fold_text("userName"), None);
/// assert_eq!(CamelCase.fold_text("trailing_"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CamelCase;

impl KeyPolicy for CamelCase {
    fn fold_text(&self, text: &str) -> Option<String> {
        if !text.contains('_') {
            return None;
        }

        let mut folded = String::with_capacity(text.len());
        let mut changed = false;
        let mut pending_underscores = 0;
        for c in text.chars() {
            if c == '_' {
                pending_underscores += 1;
            } else if pending_underscores > 0 && c.is_alphabetic() {
                pending_underscores = 0;
                changed = true;
                folded.extend(c.to_uppercase());
            } else {
                folded.extend(core::iter::repeat_n('_', pending_underscores));
                pending_underscores = 0;
                folded.push(c);
            }
        }
        folded.extend(core::iter::repeat_n('_', pending_underscores));

        changed.then_some(folded)
    }
}

/// Folds keys to lowercase, making them case-insensitive.
///
/// ```
/// use keyed_maps::KeyPolicy;
/// use keyed_maps::LowerCase;
///
/// assert_eq!(LowerCase.fold_text("X-Request-ID").as_deref(), Some("x-request-id"));
/// assert_eq!(LowerCase.fold_text("accept"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LowerCase;

impl KeyPolicy for LowerCase {
    fn fold_text(&self, text: &str) -> Option<String> {
        if text.chars().flat_map(char::to_lowercase).eq(text.chars()) {
            return None;
        }
        Some(text.to_lowercase())
    }
}

/// Uses a closure as a [`KeyPolicy`].
///
/// ```
/// use keyed_maps::CanonicalKeyMap;
/// use keyed_maps::FoldWith;
/// use keyed_maps::LinkedMap;
///
/// let trim = FoldWith(|text: &str| (text.trim() != text).then(|| text.trim().to_string()));
/// let mut map = CanonicalKeyMap::with_store(LinkedMap::new(), trim);
/// map.insert(" host ".to_string(), 1);
///
/// assert_eq!(map.peek(&"host".to_string()), Some(&1));
/// ```
#[derive(Clone, Copy, Default)]
pub struct FoldWith<F>(pub F);

impl<F> core::fmt::Debug for FoldWith<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("FoldWith").finish_non_exhaustive()
    }
}

impl<F> KeyPolicy for FoldWith<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn fold_text(&self, text: &str) -> Option<String> {
        (self.0)(text)
    }
}

/// A map decorator that canonicalizes keys before every operation.
///
/// `M` is the backing [`MapStore`], owned exclusively by the decorator; `P`
/// is the [`KeyPolicy`]. Values pass through untouched. Ordering comes
/// from the backing store: wrap an access-ordered [`LinkedMap`] to get an
/// access-ordered canonical map.
///
/// # Examples
///
/// ```
/// use keyed_maps::CamelCaseMap;
///
/// let mut map = CamelCaseMap::new();
/// map.insert("key_name".to_string(), 1);
///
/// assert_eq!(map.peek(&"keyName".to_string()), Some(&1));
/// assert_eq!(map.peek(&"key_name".to_string()), Some(&1));
/// assert_eq!(map.insert("keyName".to_string(), 2), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalKeyMap<M, P> {
    raw: M,
    policy: P,
}

/// Insertion-ordered map folding `snake_case` keys to `camelCase`.
pub type CamelCaseMap<K, V> = CanonicalKeyMap<LinkedMap<K, V>, CamelCase>;

/// Insertion-ordered map with case-insensitive keys.
pub type CaseInsensitiveMap<K, V> = CanonicalKeyMap<LinkedMap<K, V>, LowerCase>;

/// Unordered map folding `snake_case` keys to `camelCase`.
pub type CamelCaseHashMap<K, V> = CanonicalKeyMap<hashbrown::HashMap<K, V>, CamelCase>;

/// Unordered map with case-insensitive keys.
pub type CaseInsensitiveHashMap<K, V> = CanonicalKeyMap<hashbrown::HashMap<K, V>, LowerCase>;

impl<K, V, P: Default> CanonicalKeyMap<LinkedMap<K, V>, P> {
    /// Creates an empty insertion-ordered map.
    pub fn new() -> Self {
        CanonicalKeyMap {
            raw: LinkedMap::new(),
            policy: P::default(),
        }
    }

    /// Creates an empty map whose backing store uses `order`.
    ///
    /// ```
    /// use keyed_maps::CaseInsensitiveMap;
    /// use keyed_maps::Order;
    ///
    /// let mut map = CaseInsensitiveMap::with_order(Order::Access);
    /// map.insert("A".to_string(), 1);
    /// map.insert("B".to_string(), 2);
    /// map.get(&"a".to_string());
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, ["b", "a"]);
    /// ```
    pub fn with_order(order: Order) -> Self {
        CanonicalKeyMap {
            raw: LinkedMap::with_order(order),
            policy: P::default(),
        }
    }

    /// Creates an empty map pre-sized from `sizing`.
    pub fn with_sizing(sizing: Sizing, order: Order) -> Self {
        CanonicalKeyMap {
            raw: LinkedMap::with_sizing(sizing, order),
            policy: P::default(),
        }
    }
}

impl<K, V, P: Default> CanonicalKeyMap<hashbrown::HashMap<K, V>, P> {
    /// Creates an empty unordered map.
    pub fn new() -> Self {
        CanonicalKeyMap {
            raw: hashbrown::HashMap::new(),
            policy: P::default(),
        }
    }

    /// Creates an empty unordered map pre-sized from `sizing`.
    pub fn with_sizing(sizing: Sizing) -> Self {
        CanonicalKeyMap {
            raw: hashbrown::HashMap::with_capacity(sizing.reserve()),
            policy: P::default(),
        }
    }
}

impl<M, P> CanonicalKeyMap<M, P> {
    /// The canonicalization policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The backing store. Every key in it is canonical.
    pub fn raw(&self) -> &M {
        &self.raw
    }

    /// Unwraps the backing store.
    pub fn into_inner(self) -> M {
        self.raw
    }
}

impl<M, P> CanonicalKeyMap<M, P>
where
    M: MapStore,
    M::Key: FoldKey + Clone,
    P: KeyPolicy,
{
    /// Wraps `store`, moving every entry whose key is not canonical under
    /// its canonical key.
    ///
    /// Moved entries are re-inserted in the store's iteration order, so when
    /// several keys fold to the same canonical key the last one visited
    /// wins.
    pub fn with_store(mut store: M, policy: P) -> Self {
        let stale: Vec<M::Key> = store
            .iter()
            .filter(|(key, _)| matches!(policy.canonicalize(*key), Cow::Owned(_)))
            .map(|(key, _)| key.clone())
            .collect();
        for key in stale {
            if let Some(value) = store.remove(&key) {
                store.insert(policy.canonicalize_owned(key), value);
            }
        }
        CanonicalKeyMap { raw: store, policy }
    }

    /// Canonical form of `key` under this map's policy.
    pub fn canonical_key<'k>(&self, key: &'k M::Key) -> Cow<'k, M::Key> {
        self.policy.canonicalize(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.raw.clear()
    }

    /// `true` if an entry is stored under the canonical form of `key`.
    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.raw.contains_key(&self.policy.canonicalize(key))
    }

    /// Reads the value for `key` without counting as a use.
    pub fn peek(&self, key: &M::Key) -> Option<&M::Value> {
        self.raw.peek(&self.policy.canonicalize(key))
    }

    /// Reads the value for `key`, counting as a use in access-ordered stores.
    pub fn get(&mut self, key: &M::Key) -> Option<&M::Value> {
        let key = self.policy.canonicalize(key);
        self.raw.get(&key)
    }

    /// Mutably borrows the value for `key`, counting as a use.
    pub fn get_mut(&mut self, key: &M::Key) -> Option<&mut M::Value> {
        let key = self.policy.canonicalize(key);
        self.raw.get_mut(&key)
    }

    /// Returns the value for `key`, or `default` when absent.
    pub fn get_or_default<'a>(&'a mut self, key: &M::Key, default: &'a M::Value) -> &'a M::Value {
        let key = self.policy.canonicalize(key);
        self.raw.get(&key).unwrap_or(default)
    }

    /// Stores `value` under the canonical form of `key`, returning the value
    /// it replaced.
    pub fn insert(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        let key = self.policy.canonicalize_owned(key);
        self.raw.insert(key, value)
    }

    /// Stores `value` only if no entry exists for `key`. Returns the existing
    /// value otherwise, leaving it in place.
    pub fn put_if_absent(&mut self, key: M::Key, value: M::Value) -> Option<&M::Value> {
        let key = self.policy.canonicalize_owned(key);
        if self.raw.contains_key(&key) {
            return self.raw.get(&key);
        }
        self.raw.insert(key, value);
        None
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: M::Key, default: F) -> &mut M::Value
    where
        F: FnOnce() -> M::Value,
    {
        let key = self.policy.canonicalize_owned(key);
        self.raw.get_or_insert_with(key, default)
    }

    /// Inserts every entry through [`insert`](Self::insert), so colliding
    /// keys overwrite each other in iteration order.
    pub fn put_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (M::Key, M::Value)>,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        self.raw.remove(&self.policy.canonicalize(key))
    }

    /// Removes the entry for `key` only if its value equals `value`.
    pub fn remove_if_eq(&mut self, key: &M::Key, value: &M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        let key = self.policy.canonicalize(key);
        if self.raw.peek(&key) != Some(value) {
            return false;
        }
        self.raw.remove(&key);
        true
    }

    /// Replaces the value for `key` only if one is present, returning the
    /// old value.
    pub fn replace(&mut self, key: &M::Key, value: M::Value) -> Option<M::Value> {
        let key = self.policy.canonicalize(key);
        self.raw
            .get_mut(&key)
            .map(|slot| core::mem::replace(slot, value))
    }

    /// Replaces the value for `key` only if it currently equals `old`.
    pub fn replace_if_eq(&mut self, key: &M::Key, old: &M::Value, new: M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        let key = self.policy.canonicalize(key);
        if self.raw.peek(&key) != Some(old) {
            return false;
        }
        if let Some(slot) = self.raw.get_mut(&key) {
            *slot = new;
        }
        true
    }

    /// Iterates over the stored (canonical) keys and their values.
    pub fn iter(&self) -> M::Iter<'_> {
        self.raw.iter()
    }

    /// Iterates over the stored (canonical) keys.
    pub fn keys(&self) -> impl Iterator<Item = &M::Key> {
        self.raw.iter().map(|(key, _)| key)
    }

    /// Iterates over the values.
    pub fn values(&self) -> impl Iterator<Item = &M::Value> {
        self.raw.iter().map(|(_, value)| value)
    }
}

impl<M, P> MapStore for CanonicalKeyMap<M, P>
where
    M: MapStore,
    M::Key: FoldKey + Clone,
    P: KeyPolicy,
{
    type Iter<'a>
        = M::Iter<'a>
    where
        Self: 'a;
    type Key = M::Key;
    type Value = M::Value;

    fn len(&self) -> usize {
        CanonicalKeyMap::len(self)
    }

    fn contains_key(&self, key: &M::Key) -> bool {
        CanonicalKeyMap::contains_key(self, key)
    }

    fn peek(&self, key: &M::Key) -> Option<&M::Value> {
        CanonicalKeyMap::peek(self, key)
    }

    fn get(&mut self, key: &M::Key) -> Option<&M::Value> {
        CanonicalKeyMap::get(self, key)
    }

    fn get_mut(&mut self, key: &M::Key) -> Option<&mut M::Value> {
        CanonicalKeyMap::get_mut(self, key)
    }

    fn insert(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        CanonicalKeyMap::insert(self, key, value)
    }

    fn get_or_insert_with<F>(&mut self, key: M::Key, default: F) -> &mut M::Value
    where
        F: FnOnce() -> M::Value,
    {
        CanonicalKeyMap::get_or_insert_with(self, key, default)
    }

    fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        CanonicalKeyMap::remove(self, key)
    }

    fn clear(&mut self) {
        CanonicalKeyMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        CanonicalKeyMap::iter(self)
    }
}

impl<M, P> Extend<(M::Key, M::Value)> for CanonicalKeyMap<M, P>
where
    M: MapStore,
    M::Key: FoldKey + Clone,
    P: KeyPolicy,
{
    fn extend<I: IntoIterator<Item = (M::Key, M::Value)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<M, P> FromIterator<(M::Key, M::Value)> for CanonicalKeyMap<M, P>
where
    M: MapStore + Default,
    M::Key: FoldKey + Clone,
    P: KeyPolicy + Default,
{
    fn from_iter<I: IntoIterator<Item = (M::Key, M::Value)>>(iter: I) -> Self {
        let mut map = CanonicalKeyMap {
            raw: M::default(),
            policy: P::default(),
        };
        map.put_all(iter);
        map
    }
}

impl<M: IntoIterator, P> IntoIterator for CanonicalKeyMap<M, P> {
    type IntoIter = M::IntoIter;
    type Item = M::Item;

    fn into_iter(self) -> Self::IntoIter {
        self.raw.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn test_camel_case_folding() {
        assert_eq!(CamelCase.fold_text("key_name").as_deref(), Some("keyName"));
        assert_eq!(CamelCase.fold_text("a_b_c").as_deref(), Some("aBC"));
        assert_eq!(CamelCase.fold_text("_private").as_deref(), Some("Private"));
        assert_eq!(CamelCase.fold_text("a__b").as_deref(), Some("aB"));
        assert_eq!(CamelCase.fold_text("v_1_x").as_deref(), Some("v_1X"));
        assert_eq!(CamelCase.fold_text("straße_ß").as_deref(), Some("straßeSS"));
        assert_eq!(CamelCase.fold_text("keyName"), None);
        assert_eq!(CamelCase.fold_text("snake_"), None);
        assert_eq!(CamelCase.fold_text("__"), None);
        assert_eq!(CamelCase.fold_text(""), None);
    }

    #[test]
    fn test_camel_case_is_idempotent() {
        for text in ["a__b", "v_1_x", "x_y_z", "_1_a", "a_B"] {
            let once = CamelCase.canonicalize_owned(s(text));
            assert_eq!(CamelCase.fold_text(&once), None, "{text} -> {once}");
        }
    }

    #[test]
    fn test_lower_case_folding() {
        assert_eq!(LowerCase.fold_text("Content-Type").as_deref(), Some("content-type"));
        assert_eq!(LowerCase.fold_text("ÄRGER").as_deref(), Some("ärger"));
        assert_eq!(LowerCase.fold_text("ÀÉ").as_deref(), Some("àé"));
        assert_eq!(LowerCase.fold_text("already-lower-1"), None);
        assert_eq!(LowerCase.fold_text("àé"), None);
    }

    #[test]
    fn test_canonicalize_borrows_when_unchanged() {
        let key = s("accept");
        assert!(matches!(LowerCase.canonicalize(&key), Cow::Borrowed(_)));

        let key = s("Accept");
        assert!(matches!(LowerCase.canonicalize(&key), Cow::Owned(ref k) if k == "accept"));
    }

    #[test]
    fn test_non_text_keys_pass_through() {
        assert!(matches!(LowerCase.canonicalize(&42u32), Cow::Borrowed(&42)));
        assert_eq!(CamelCase.canonicalize_owned('A'), 'A');
        assert_eq!(LowerCase.canonicalize_owned(None::<String>), None);
        assert_eq!(LowerCase.canonicalize_owned(Some(s("AB"))), Some(s("ab")));
    }

    #[test]
    fn test_other_string_like_keys() {
        let boxed: Box<str> = "X-Token".into();
        assert_eq!(&*LowerCase.canonicalize_owned(boxed), "x-token");

        let shared: Rc<str> = Rc::from("user_id");
        assert_eq!(&*CamelCase.canonicalize_owned(shared), "userId");

        let atomic: Arc<str> = Arc::from("HOST");
        assert_eq!(&*LowerCase.canonicalize_owned(atomic), "host");

        let cow: Cow<'static, str> = Cow::Borrowed("Accept");
        assert_eq!(LowerCase.canonicalize_owned(cow), "accept");
    }

    #[test]
    fn test_case_insensitive_collision() {
        let mut map = CaseInsensitiveMap::new();
        assert_eq!(map.insert(s("KEY"), 1), None);
        assert_eq!(map.insert(s("key"), 2), Some(1));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&s("Key")), Some(&2));
        assert!(map.contains_key(&s("kEy")));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, [s("key")]);
    }

    #[test]
    fn test_camel_case_lookup_under_both_forms() {
        let mut map = CamelCaseMap::new();
        map.insert(s("key_name"), "v");

        assert_eq!(map.get(&s("keyName")), Some(&"v"));
        assert_eq!(map.get(&s("key_name")), Some(&"v"));
        assert_eq!(map.raw().peek(&s("keyName")), Some(&"v"));
        assert_eq!(map.raw().peek(&s("key_name")), None);
    }

    #[test]
    fn test_remove_and_conditional_ops() {
        let mut map = CaseInsensitiveMap::new();
        map.insert(s("Accept"), s("*/*"));

        assert!(!map.remove_if_eq(&s("ACCEPT"), &s("text/html")));
        assert!(map.contains_key(&s("accept")));

        assert!(!map.replace_if_eq(&s("accept"), &s("nope"), s("x")));
        assert!(map.replace_if_eq(&s("ACCEPT"), &s("*/*"), s("text/html")));
        assert_eq!(map.peek(&s("accept")), Some(&s("text/html")));

        assert_eq!(map.replace(&s("Accept"), s("image/png")), Some(s("text/html")));
        assert_eq!(map.replace(&s("Missing"), s("zzz")), None);
        assert!(!map.contains_key(&s("missing")));

        assert!(map.remove_if_eq(&s("aCCept"), &s("image/png")));
        assert!(map.is_empty());
        assert_eq!(map.remove(&s("accept")), None);
    }

    #[test]
    fn test_put_all_applies_collisions_in_order() {
        let mut map = CaseInsensitiveMap::new();
        map.put_all(vec![(s("A"), 1), (s("b"), 2), (s("a"), 3)]);

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(entries, [(s("a"), 3), (s("b"), 2)]);
    }

    #[test]
    fn test_put_if_absent_and_get_or_insert_with() {
        let mut map = CamelCaseMap::new();
        assert_eq!(map.put_if_absent(s("max_age"), 10), None);
        assert_eq!(map.put_if_absent(s("maxAge"), 20), Some(&10));

        *map.get_or_insert_with(s("max_age"), || 0) += 1;
        *map.get_or_insert_with(s("min_age"), || 5) += 1;
        assert_eq!(map.peek(&s("maxAge")), Some(&11));
        assert_eq!(map.peek(&s("minAge")), Some(&6));

        let fallback = -1;
        assert_eq!(*map.get_or_default(&s("other_age"), &fallback), -1);
        assert_eq!(*map.get_or_default(&s("min_age"), &fallback), 6);
    }

    #[test]
    fn test_access_ordered_backing_store() {
        let mut map = CaseInsensitiveMap::with_order(Order::Access);
        map.insert(s("A"), 1);
        map.insert(s("B"), 2);
        map.insert(s("C"), 3);

        map.get(&s("a"));
        map.peek(&s("B"));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, [s("b"), s("c"), s("a")]);
    }

    #[test]
    fn test_hash_backed_variants() {
        let mut map = CaseInsensitiveHashMap::new();
        map.insert(s("Host"), 1);
        map.insert(s("HOST"), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.peek(&s("host")), Some(&2));

        let mut camel = CamelCaseHashMap::with_sizing(Sizing::default());
        camel.insert(s("page_size"), 50);
        assert_eq!(camel.peek(&s("pageSize")), Some(&50));
    }

    #[test]
    fn test_huge_sizing_hint_is_capped() {
        let sizing = Sizing::new(usize::MAX, 1.0).unwrap();
        let mut hashed = CaseInsensitiveHashMap::with_sizing(sizing);
        hashed.insert(s("Host"), 1);
        assert_eq!(hashed.peek(&s("host")), Some(&1));

        let mut linked = CamelCaseMap::with_sizing(sizing, Order::Insertion);
        linked.insert(s("max_age"), 2);
        assert_eq!(linked.peek(&s("maxAge")), Some(&2));
    }

    #[test]
    fn test_with_store_canonicalizes_existing_keys() {
        let mut raw = LinkedMap::new();
        raw.insert(s("Accept"), 1);
        raw.insert(s("ACCEPT"), 2);
        raw.insert(s("Host"), 3);

        let map = CanonicalKeyMap::with_store(raw, LowerCase);
        let entries: Vec<_> = map.into_iter().collect();
        assert_eq!(entries, [(s("accept"), 2), (s("host"), 3)]);
    }

    #[test]
    fn test_nullable_keys() {
        let mut map = CaseInsensitiveMap::<Option<String>, i32>::new();
        map.insert(None, 1);
        map.insert(Some(s("X")), 2);

        assert_eq!(map.peek(&None), Some(&1));
        assert_eq!(map.peek(&Some(s("x"))), Some(&2));
        assert_eq!(map.remove(&None), Some(1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut map: CamelCaseMap<String, i32> =
            [(s("a_b"), 1), (s("aB"), 2)].into_iter().collect();
        assert_eq!(map.len(), 1);
        map.extend([(s("c_d"), 3)]);
        assert_eq!(map.peek(&s("cD")), Some(&3));
        assert_eq!(map.values().copied().collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn test_equality_and_policy_accessor() {
        let mut a = CaseInsensitiveMap::new();
        let mut b = CaseInsensitiveMap::new();
        a.insert(s("X"), 1);
        b.insert(s("x"), 1);
        assert_eq!(a, b);
        assert_eq!(*a.policy(), LowerCase);
    }
}
