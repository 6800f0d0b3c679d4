//! Entity — a persisted domain object with a unique identifier.
//!
//! This is the seam that lets the storage layer stay generic: the store
//! only needs an id to key a row by and a kind name for error messages.

use std::fmt;
use std::hash::Hash;

/// A persisted domain object with a unique identifier.
///
/// Implemented by [`Device`](crate::device::Device),
/// [`Hub`](crate::hub::Hub), and [`Dwelling`](crate::dwelling::Dwelling).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Typed identifier for this entity kind.
    type Id: Copy + Eq + Hash + fmt::Display + Send + Sync + 'static;

    /// Human-readable kind name used in error messages, e.g. `"Device"`.
    const KIND: &'static str;

    /// The entity's unique identifier.
    fn id(&self) -> Self::Id;
}
