use core::iter::FusedIterator;

use crate::Ptr;
use crate::arena::Arena;

#[derive(Debug)]
/// An iterator over the entries of a [`LinkedMap`](super::LinkedMap), front
/// to back.
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
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// ```
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<K, V>,
    front: Option<Ptr>,
    back: Option<Ptr>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        nodes: &'a Arena<K, V>,
        front: Option<Ptr>,
        back: Option<Ptr>,
        remaining: usize,
    ) -> Self {
        Iter {
            nodes,
            front,
            back,
            remaining,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[derive(Debug)]
/// An owning iterator over the entries of a [`LinkedMap`](super::LinkedMap),
/// front to back.
///
/// Created by [`IntoIterator::into_iter`] on the map.
pub struct IntoIter<K, V> {
    nodes: Arena<K, V>,
    front: Option<Ptr>,
    back: Option<Ptr>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(
        nodes: Arena<K, V>,
        front: Option<Ptr>,
        back: Option<Ptr>,
        remaining: usize,
    ) -> Self {
        IntoIter {
            nodes,
            front,
            back,
            remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // Freeing leaves the neighbours' links intact, which is all the
        // remaining walk needs.
        let node = self.nodes.free(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.free(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some((node.key, node.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
