/// Errors reported when a map is constructed with invalid sizing.
///
/// Lookups never fail: a missing key is always `None`.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// The requested maximum capacity of a bounded map is zero or not
    /// representable as a positive `usize`.
    #[error("max capacity must be a positive integer")]
    InvalidCapacity,
    /// The load factor of a [`Sizing`](crate::Sizing) is not finite and
    /// positive.
    #[error("load factor must be finite and greater than zero, got {0}")]
    InvalidLoadFactor(f32),
}

/// Result alias for fallible constructors in this crate.
pub type Result<T> = core::result::Result<T, Error>;
