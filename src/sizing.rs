//! Construction-time sizing hints.

use crate::Error;
use crate::Result;

/// Initial capacity used when no [`Sizing`] is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor used when no [`Sizing`] is given.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Upper bound on the number of entries a [`Sizing`] reserves up front.
/// Maps sized beyond it still grow on demand.
pub const MAX_PREALLOCATION: usize = 1 << 12;

/// Initial capacity and load factor used to pre-size a map.
///
/// These are hints only. They decide how many entries a map can take before
/// its storage first grows and never change the behavior of any operation.
///
/// # Examples
///
/// ```
/// use keyed_maps::Sizing;
///
/// let sizing = Sizing::new(32, 0.5).unwrap();
/// assert_eq!(sizing.reserve(), 16);
///
/// assert!(Sizing::new(32, 0.0).is_err());
/// assert_eq!(Sizing::default().reserve(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    initial_capacity: usize,
    load_factor: f32,
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Sizing {
    /// Creates a sizing hint, rejecting a load factor that is not finite and
    /// positive.
    pub fn new(initial_capacity: usize, load_factor: f32) -> Result<Self> {
        if !load_factor.is_finite() || load_factor <= 0.0 {
            return Err(Error::InvalidLoadFactor(load_factor));
        }
        Ok(Sizing {
            initial_capacity,
            load_factor,
        })
    }

    /// Creates a sizing hint with the given capacity and the default load
    /// factor.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Sizing {
            initial_capacity,
            ..Sizing::default()
        }
    }

    /// The requested initial capacity.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// The requested load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Number of entries to reserve up front: `initial_capacity *
    /// load_factor`, rounded down and capped at [`MAX_PREALLOCATION`].
    pub fn reserve(&self) -> usize {
        let wanted = (self.initial_capacity as f64 * self.load_factor as f64) as usize;
        wanted.min(MAX_PREALLOCATION)
    }
}
