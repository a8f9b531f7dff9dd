#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
pub mod canonical;
mod error;
pub mod fixed;
pub mod linked_map;
pub mod multi_value;
mod sizing;
pub mod store;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

use core::num::NonZeroU32;

pub use canonical::CamelCase;
pub use canonical::CamelCaseHashMap;
pub use canonical::CamelCaseMap;
pub use canonical::CanonicalKeyMap;
pub use canonical::CaseInsensitiveHashMap;
pub use canonical::CaseInsensitiveMap;
pub use canonical::FoldKey;
pub use canonical::FoldWith;
pub use canonical::KeyPolicy;
pub use canonical::LowerCase;
pub use error::Error;
pub use error::Result;
pub use fixed::FixedLinkedHashMap;
pub use linked_map::IntoIter;
pub use linked_map::Iter;
pub use linked_map::LinkedMap;
pub use linked_map::Order;
pub use multi_value::CaseInsensitiveMultiValueMap;
pub use multi_value::HeaderMap;
pub use multi_value::MultiValueLinkedMap;
pub use multi_value::MultiValueMap;
pub use multi_value::MultiValueMapAdapter;
pub use multi_value::QueryParams;
pub use sizing::DEFAULT_INITIAL_CAPACITY;
pub use sizing::DEFAULT_LOAD_FACTOR;
pub use sizing::MAX_PREALLOCATION;
pub use sizing::Sizing;
pub use store::MapStore;

/// Index of a node in a map's arena.
///
/// Non-generational: once a node is freed its index is handed out again.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({})", self.index())
    }
}

impl Ptr {
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(
            index < u32::MAX as usize,
            "Index too large to fit in Ptr: {index}"
        );
        Ptr(NonZeroU32::MIN.saturating_add(index as u32))
    }

    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}
