//! Associative cache set.
//!
//! This module implements one set of a simulated tag store. The set holds
//! non-owning handles to blocks allocated elsewhere, keeps them in recency
//! order, and answers tag and composite-key lookups over them. Set indexing,
//! replacement decisions, and block allocation belong to the enclosing tag store.

/// Block capabilities read by the set, and block handle identity.
pub mod blk;

/// Composite `(remote id, presence bit, logical register)` key.
pub mod key;

/// The associative set: tag lookup, composite index, and LRU reordering.
pub mod set;

pub use blk::{BlockRef, CacheBlk, CacheBlock};
pub use key::CamKey;
pub use set::CacheSet;
