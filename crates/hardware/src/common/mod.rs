//! Common utilities and types used throughout the tag-set crate.
//!
//! This module provides the building blocks shared by the set and its configuration:
//! 1. **Constants:** Default associativity and the reset tag value.
//! 2. **Error Handling:** The recoverable `SetError` type.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types for construction, replacement, and configuration.
pub mod error;

pub use constants::{DEFAULT_WAYS, INVALID_TAG};
pub use error::SetError;
