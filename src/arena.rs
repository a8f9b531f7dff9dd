use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};

use crate::Ptr;

#[cold]
#[inline(never)]
fn vacant_slot() -> ! {
    panic!("Attempted to access a vacant arena slot");
}

/// One linked entry. `prev`/`next` are the neighbours in map order.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) prev: Option<Ptr>,
    pub(crate) next: Option<Ptr>,
}

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<Ptr> },
}

/// Slab of nodes addressed by [`Ptr`]. Freed slots are chained into a free
/// list and handed out again before the slab grows.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<Ptr>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Ptr {
        match self.free_head {
            Some(ptr) => {
                let old = core::mem::replace(&mut self.slots[ptr.index()], Slot::Occupied(node));
                match old {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    Slot::Occupied(_) => vacant_slot(),
                }
                ptr
            }
            None => {
                assert!(
                    self.slots.len() < u32::MAX as usize,
                    "Arena cannot address more than u32::MAX - 1 entries"
                );
                let ptr = Ptr::from_index(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                ptr
            }
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        matches!(self.slots.get(ptr.index()), Some(Slot::Occupied(_)))
    }

    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<K, V> {
        assert!(self.is_occupied(ptr), "Pointer to free must be occupied");
        let old = core::mem::replace(
            &mut self.slots[ptr.index()],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(ptr);
        match old {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => vacant_slot(),
        }
    }
}

impl<K, V> Index<Ptr> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, ptr: Ptr) -> &Self::Output {
        match &self.slots[ptr.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => vacant_slot(),
        }
    }
}

impl<K, V> IndexMut<Ptr> for Arena<K, V> {
    fn index_mut(&mut self, ptr: Ptr) -> &mut Self::Output {
        match &mut self.slots[ptr.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => vacant_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        format,
        string::{
            String,
            ToString,
        },
    };

    use super::*;

    fn node<V>(key: i32, value: V) -> Node<i32, V> {
        Node {
            key,
            value,
            hash: key as u64,
            prev: None,
            next: None,
        }
    }

    #[test]
    fn test_ptr_round_trip_and_debug() {
        let ptr = Ptr::from_index(42);
        assert_eq!(ptr.index(), 42);
        assert_eq!(format!("{:?}", ptr), "Ptr(42)");
        assert_eq!(Ptr::from_index(0).index(), 0);
    }

    #[test]
    fn test_alloc_and_index() {
        let mut arena = Arena::with_capacity(4);
        let one = arena.alloc(node(1, "one".to_string()));
        let two = arena.alloc(node(2, "two".to_string()));

        assert_ne!(one, two);
        assert!(arena.is_occupied(one));
        assert_eq!(arena[one].key, 1);
        assert_eq!(arena[two].value, "two");

        arena[two].value = "deux".to_string();
        arena[one].next = Some(two);
        assert_eq!(arena[two].value, "deux");
        assert_eq!(arena[one].next, Some(two));
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = Arena::with_capacity(4);
        let one = arena.alloc(node(1, 10));
        let two = arena.alloc(node(2, 20));

        let freed = arena.free(one);
        assert_eq!((freed.key, freed.value), (1, 10));
        assert!(!arena.is_occupied(one));
        assert!(arena.is_occupied(two));

        let three = arena.alloc(node(3, 30));
        assert_eq!(three, one);
        assert_eq!(arena[three].key, 3);
        assert_eq!(arena.slots.len(), 2);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.alloc(node(1, ()));
        let b = arena.alloc(node(2, ()));
        arena.free(a);
        arena.free(b);

        assert_eq!(arena.alloc(node(3, ())), b);
        assert_eq!(arena.alloc(node(4, ())), a);
        assert_eq!(arena.free_head, None);
    }

    #[test]
    fn test_clear() {
        let mut arena: Arena<i32, String> = Arena::with_capacity(4);
        let ptr = arena.alloc(node(1, String::new()));
        arena.free(ptr);
        arena.clear();

        assert!(arena.slots.is_empty());
        assert_eq!(arena.free_head, None);
        assert!(!arena.is_occupied(ptr));
    }

    #[test]
    fn test_clone_keeps_layout() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.alloc(node(1, 1));
        let b = arena.alloc(node(2, 2));
        arena.free(a);

        let cloned = arena.clone();
        assert!(!cloned.is_occupied(a));
        assert!(cloned.is_occupied(b));
        assert_eq!(cloned.free_head, Some(a));
    }

    #[test]
    #[should_panic]
    fn test_index_vacant_slot() {
        let mut arena = Arena::with_capacity(4);
        let ptr = arena.alloc(node(1, 1));
        arena.free(ptr);
        let _ = &arena[ptr];
    }

    #[test]
    #[should_panic]
    fn test_double_free() {
        let mut arena = Arena::with_capacity(4);
        let ptr = arena.alloc(node(1, 1));
        arena.free(ptr);
        arena.free(ptr);
    }
}
