//! Error definitions for the associative set.
//!
//! This module defines the recoverable failures of the tag-set layer. It provides:
//! 1. **Construction Errors:** Rejecting slot arrays that break the permutation invariant.
//! 2. **Slot Replacement Errors:** Reporting out-of-range ways and double residency.
//! 3. **Configuration Errors:** Wrapping JSON and I/O failures while loading a `SetConfig`.
//!
//! Lookups that miss are not errors and never produce a `SetError`. Moving a block
//! that is not resident in the set is a programmer error and panics instead.

use thiserror::Error;

/// Recoverable errors raised by [`CacheSet`](crate::core::units::cache::CacheSet)
/// construction, slot replacement, and configuration loading.
#[derive(Debug, Error)]
pub enum SetError {
    /// A set must hold at least one way.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// The slot array length does not match the configured associativity.
    #[error("slot array holds {actual} blocks but the set is configured for {expected} ways")]
    WayCountMismatch {
        /// Ways requested by the configuration.
        expected: usize,
        /// Blocks actually supplied.
        actual: usize,
    },

    /// The same block reference would occupy two ways at once.
    ///
    /// `way` is the slot that already holds the block.
    #[error("block already resident in way {way}")]
    DuplicateBlock {
        /// Way index of the existing occupant.
        way: usize,
    },

    /// A way index outside `0..assoc`.
    #[error("way {way} out of range for a {assoc}-way set")]
    WayOutOfRange {
        /// Requested way.
        way: usize,
        /// Associativity of the set.
        assoc: usize,
    },

    /// Configuration JSON failed to parse.
    #[error("invalid set configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read set configuration: {0}")]
    Io(#[from] std::io::Error),
}
