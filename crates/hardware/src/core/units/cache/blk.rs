//! Cache block capabilities.
//!
//! The associative set never owns its blocks. It reads two things from them,
//! the address tag and the validity bit, and compares block handles by identity.
//! This module defines:
//! 1. **`CacheBlock`:** The read-only view of a block the set depends on.
//! 2. **`BlockRef`:** A non-owning handle to a block, compared by address.
//! 3. **`CacheBlk`:** A minimal block with interior-mutable state for tag stores.

use std::cell::Cell;
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;

use crate::common::INVALID_TAG;

/// Read-only view of a cache block.
pub trait CacheBlock {
    /// Address-derived tag stored with the block.
    fn tag(&self) -> u64;

    /// Whether the block currently holds live data.
    fn is_valid(&self) -> bool;
}

/// Non-owning handle to an externally allocated block.
///
/// Two handles refer to the same block when [`BlockRef::same_block`] holds;
/// handle equality never looks at block contents.
pub trait BlockRef: Clone {
    /// Block type behind the handle.
    type Block: CacheBlock + ?Sized;

    /// Borrows the referenced block.
    fn block(&self) -> &Self::Block;

    /// Identity comparison.
    fn same_block(&self, other: &Self) -> bool;
}

impl<B: CacheBlock + ?Sized> BlockRef for &B {
    type Block = B;

    #[inline(always)]
    fn block(&self) -> &B {
        self
    }

    #[inline(always)]
    fn same_block(&self, other: &Self) -> bool {
        ptr::addr_eq(*self, *other)
    }
}

impl<B: CacheBlock + ?Sized> BlockRef for Rc<B> {
    type Block = B;

    #[inline(always)]
    fn block(&self) -> &B {
        self
    }

    #[inline(always)]
    fn same_block(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<B: CacheBlock + ?Sized> BlockRef for Arc<B> {
    type Block = B;

    #[inline(always)]
    fn block(&self) -> &B {
        self
    }

    #[inline(always)]
    fn same_block(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

/// Cache block with tag, validity, and dirty bits.
///
/// State sits in `Cell`s so a tag store can fill or invalidate a block while
/// sets hold shared handles to it.
#[derive(Debug)]
pub struct CacheBlk {
    tag: Cell<u64>,
    valid: Cell<bool>,
    dirty: Cell<bool>,
}

impl CacheBlk {
    /// Creates an invalid, clean block.
    pub const fn new() -> Self {
        Self {
            tag: Cell::new(INVALID_TAG),
            valid: Cell::new(false),
            dirty: Cell::new(false),
        }
    }

    /// Creates a valid, clean block holding `tag`.
    pub const fn with_tag(tag: u64) -> Self {
        Self {
            tag: Cell::new(tag),
            valid: Cell::new(true),
            dirty: Cell::new(false),
        }
    }

    /// Installs `tag` and marks the block valid and clean.
    pub fn fill(&self, tag: u64) {
        self.tag.set(tag);
        self.valid.set(true);
        self.dirty.set(false);
    }

    /// Marks the block invalid. The stale tag is kept.
    pub fn invalidate(&self) {
        self.valid.set(false);
        self.dirty.set(false);
    }

    /// Sets the dirty bit.
    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.set(dirty);
    }

    /// Returns the dirty bit.
    pub const fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
}

impl Default for CacheBlk {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBlock for CacheBlk {
    #[inline(always)]
    fn tag(&self) -> u64 {
        self.tag.get()
    }

    #[inline(always)]
    fn is_valid(&self) -> bool {
        self.valid.get()
    }
}
