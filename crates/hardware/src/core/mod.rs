//! Cache model core.
//!
//! This module contains the hardware units of the cache model.

/// Tag-store units (associative set, block handles, composite keys).
pub mod units;
