//! Tag-set constants.
//!
//! Shared numeric defaults for set construction and block initialization.

/// Default associativity of a set when no configuration overrides it.
pub const DEFAULT_WAYS: usize = 8;

/// Tag stored in a freshly allocated block before any fill.
///
/// Freshly allocated blocks are also invalid, so this value never matches a lookup.
pub const INVALID_TAG: u64 = u64::MAX;
