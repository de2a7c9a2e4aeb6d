//! # Unit Components
//!
//! This module mirrors the crate layout: shared types, configuration, and the
//! tag-store units.
