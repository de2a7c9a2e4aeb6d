//! Tag-store units.
//!
//! This module contains the components of a cache tag store that this crate
//! models. Today that is the associative set.

/// Associative set with recency ordering and a composite-key index.
pub mod cache;
