//! Associative cache set library.
//!
//! This crate models one associative set inside a simulated cache's tag store:
//! 1. **Tag Lookup:** Scan of the set's ways for a valid block with a matching tag.
//! 2. **Recency Order:** In-place move-to-head and move-to-tail over the slot array.
//! 3. **Composite Index:** A secondary lookup keyed on remote id, presence bit,
//!    and logical register, confirmed against tag and validity.
//! 4. **Configuration:** Associativity and stale-index policy, loaded from JSON.

/// Common types and constants (errors, defaults).
pub mod common;
/// Set configuration (associativity, stale-index policy).
pub mod config;
/// Cache model core (tag-store units).
pub mod core;

/// Recoverable error type for construction, replacement, and configuration.
pub use crate::common::SetError;
/// Set configuration; use `SetConfig::default()` or load from JSON.
pub use crate::config::{SetConfig, StaleIndexPolicy};
/// The associative set and its block abstractions.
pub use crate::core::units::cache::{BlockRef, CacheBlk, CacheBlock, CacheSet, CamKey};
