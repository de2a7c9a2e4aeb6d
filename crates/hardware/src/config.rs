//! Configuration system for the associative set.
//!
//! This module defines the configuration structures used to parameterize a
//! [`CacheSet`](crate::core::units::cache::CacheSet). It provides:
//! 1. **Defaults:** Baseline associativity and composite-index policy.
//! 2. **Structures:** `SetConfig`, deserialized from JSON with per-field defaults.
//! 3. **Enums:** `StaleIndexPolicy`, which decides who keeps the composite index in sync.
//!
//! Configuration is supplied as JSON by the enclosing tag store, or use `SetConfig::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{DEFAULT_WAYS, SetError};

/// Handling of composite-index entries whose block is evicted from its way.
///
/// The composite index is populated by the tag store, so an evicted block may
/// remain indexed unless somebody removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaleIndexPolicy {
    /// Drop every entry pointing at the evicted block during `replace`.
    #[default]
    #[serde(alias = "Purge")]
    Purge,
    /// Leave entries untouched; the tag store removes them itself or calls `purge_stale`.
    #[serde(alias = "Keep")]
    Keep,
}

/// Associative set configuration.
///
/// # Examples
///
/// ```
/// use tagset_core::config::{SetConfig, StaleIndexPolicy};
///
/// let config = SetConfig::from_json(r#"{ "ways": 4, "stale_index": "Keep" }"#)?;
/// assert_eq!(config.ways, 4);
/// assert_eq!(config.stale_index, StaleIndexPolicy::Keep);
/// # Ok::<(), tagset_core::common::SetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetConfig {
    /// Associativity (number of ways)
    #[serde(default = "SetConfig::default_ways")]
    pub ways: usize,

    /// Composite-index maintenance on slot replacement
    #[serde(default)]
    pub stale_index: StaleIndexPolicy,
}

impl SetConfig {
    /// Returns the default associativity.
    const fn default_ways() -> usize {
        DEFAULT_WAYS
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults; unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Config`] if the document is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, SetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Io`] if the file cannot be read and
    /// [`SetError::Config`] if its contents fail to parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SetError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl Default for SetConfig {
    /// Creates a default set configuration.
    ///
    /// Eight ways, with stale composite entries purged on replacement.
    fn default() -> Self {
        Self {
            ways: DEFAULT_WAYS,
            stale_index: StaleIndexPolicy::default(),
        }
    }
}
