//! Associative Cache Set.
//!
//! One set of a tag store: a fixed array of block handles kept in recency order,
//! plus a secondary index from [`CamKey`] to block. It provides:
//! 1. **Tag Lookup:** Head-to-tail scan for a valid block with a matching tag.
//! 2. **Composite Lookup:** Exact-match search of the secondary index, optionally
//!    confirmed against the block's tag and validity.
//! 3. **Recency Reordering:** In-place move-to-head / move-to-tail by a swap chain
//!    over the slot array, with no list nodes.
//! 4. **Slot Replacement:** Installing a new block handle into a way, which is the
//!    only way the set's membership changes.
//!
//! The set never allocates, frees, or mutates blocks. Way 0 is the most recently
//! used slot; way `assoc - 1` is the least recently used.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `find_blk()`: O(W) where W is the associativity
//!   - `map_lookup()`: O(log M) where M is the number of indexed keys
//!   - `move_to_head()` / `move_to_tail()`: O(position) to locate, O(distance moved) to rotate
//! - **Space Complexity:** O(W + M)

use std::collections::BTreeMap;
use std::mem;

use tracing::{debug, trace, warn};

use super::blk::{BlockRef, CacheBlock};
use super::key::CamKey;
use crate::common::SetError;
use crate::config::{SetConfig, StaleIndexPolicy};

/// An associative set of cache blocks, maintained in LRU order (way 0 = MRU).
#[derive(Debug)]
pub struct CacheSet<P: BlockRef> {
    /// The associativity of this set.
    assoc: usize,
    /// Block handles in recency order. Always a permutation of the blocks the set
    /// was built with, modulo `replace`.
    blks: Box<[P]>,
    /// Secondary index keyed on remote id, presence bit, and logical register.
    lnreg_map: BTreeMap<CamKey, P>,
    /// What `replace` does with index entries of the evicted block.
    stale_index: StaleIndexPolicy,
}

impl<P: BlockRef> CacheSet<P> {
    /// Creates a set from its initial slot contents, head first.
    ///
    /// The associativity is `blks.len()`. Blocks may all start invalid.
    ///
    /// # Errors
    ///
    /// * [`SetError::ZeroAssociativity`] if `blks` is empty.
    /// * [`SetError::DuplicateBlock`] if one block appears in two ways.
    pub fn new(blks: Vec<P>) -> Result<Self, SetError> {
        Self::build(blks, StaleIndexPolicy::default())
    }

    /// Creates a set whose slot count must match `config.ways`.
    ///
    /// # Errors
    ///
    /// As [`CacheSet::new`], plus [`SetError::WayCountMismatch`] when
    /// `blks.len() != config.ways`.
    pub fn with_config(config: &SetConfig, blks: Vec<P>) -> Result<Self, SetError> {
        if config.ways == 0 {
            return Err(SetError::ZeroAssociativity);
        }
        if blks.len() != config.ways {
            return Err(SetError::WayCountMismatch {
                expected: config.ways,
                actual: blks.len(),
            });
        }
        Self::build(blks, config.stale_index)
    }

    fn build(blks: Vec<P>, stale_index: StaleIndexPolicy) -> Result<Self, SetError> {
        if blks.is_empty() {
            return Err(SetError::ZeroAssociativity);
        }
        for (i, blk) in blks.iter().enumerate() {
            if let Some(way) = blks[..i].iter().position(|b| b.same_block(blk)) {
                return Err(SetError::DuplicateBlock { way });
            }
        }

        let assoc = blks.len();
        debug!(assoc, ?stale_index, "cache set constructed");
        Ok(Self {
            assoc,
            blks: blks.into_boxed_slice(),
            lnreg_map: BTreeMap::new(),
            stale_index,
        })
    }

    /// Returns the associativity (number of ways).
    #[inline(always)]
    pub const fn assoc(&self) -> usize {
        self.assoc
    }

    /// Returns the slot array, most recently used first.
    #[inline(always)]
    pub fn blks(&self) -> &[P] {
        &self.blks
    }

    /// Returns the block in way 0 (MRU).
    #[inline(always)]
    pub fn head(&self) -> &P {
        &self.blks[0]
    }

    /// Returns the block in way `assoc - 1` (LRU).
    #[inline(always)]
    pub fn tail(&self) -> &P {
        &self.blks[self.assoc - 1]
    }

    /// Returns the block in `way`, or `None` if `way >= assoc`.
    #[inline(always)]
    pub fn blk(&self, way: usize) -> Option<&P> {
        self.blks.get(way)
    }

    /// Returns the way currently holding `blk`, compared by identity.
    pub fn way_of(&self, blk: &P) -> Option<usize> {
        self.blks.iter().position(|b| b.same_block(blk))
    }

    /// Returns `true` if `blk` occupies any way of this set.
    pub fn contains(&self, blk: &P) -> bool {
        self.way_of(blk).is_some()
    }

    /// Returns the stale-index policy applied by [`CacheSet::replace`].
    pub const fn stale_index(&self) -> StaleIndexPolicy {
        self.stale_index
    }

    /// Changes the stale-index policy.
    pub const fn set_stale_index(&mut self, policy: StaleIndexPolicy) {
        self.stale_index = policy;
    }

    // ──────────────────────────────────────────────────────────
    // Tag lookup
    // ──────────────────────────────────────────────────────────

    /// Returns the lowest way holding a valid block tagged `tag`.
    pub fn find_way(&self, tag: u64) -> Option<usize> {
        self.blks.iter().position(|b| {
            let blk = b.block();
            blk.tag() == tag && blk.is_valid()
        })
    }

    /// Finds a block matching the tag in this set.
    ///
    /// # Returns
    ///
    /// `(Some(blk), way)` on a hit. On a miss, `(None, assoc)`: the way id is one
    /// past the last valid index and is never a usable way.
    pub fn find_blk_way(&self, tag: u64) -> (Option<&P>, usize) {
        self.find_way(tag)
            .map_or((None, self.assoc), |way| (Some(&self.blks[way]), way))
    }

    /// Finds a valid block matching the tag, ignoring its way.
    #[inline]
    pub fn find_blk(&self, tag: u64) -> Option<&P> {
        self.find_blk_way(tag).0
    }

    // ──────────────────────────────────────────────────────────
    // Composite-key index
    // ──────────────────────────────────────────────────────────

    /// Builds the composite key for the three index fields.
    #[inline(always)]
    pub const fn set_key(rmt_id: i32, p_bit: i32, lnreg: i32) -> CamKey {
        CamKey::new(rmt_id, p_bit, lnreg)
    }

    /// Exact-match lookup in the composite index.
    ///
    /// The returned block may be invalid or no longer resident; use
    /// [`CacheSet::find_blk_keyed`] when the result must be a real hit.
    pub fn map_lookup(&self, rmt_id: i32, p_bit: i32, lnreg: i32) -> Option<&P> {
        self.lnreg_map.get(&Self::set_key(rmt_id, p_bit, lnreg))
    }

    /// Returns `true` if the key is indexed.
    pub fn in_map(&self, rmt_id: i32, p_bit: i32, lnreg: i32) -> bool {
        self.map_lookup(rmt_id, p_bit, lnreg).is_some()
    }

    /// Finds a block through the composite index, then confirms it.
    ///
    /// Returns the indexed block only if it is valid and tagged `tag`.
    pub fn find_blk_keyed(&self, rmt_id: i32, p_bit: i32, lnreg: i32, tag: u64) -> Option<&P> {
        self.map_lookup(rmt_id, p_bit, lnreg).filter(|b| {
            let blk = b.block();
            blk.is_valid() && blk.tag() == tag
        })
    }

    /// Indexes `blk` under the key, returning the handle it displaced.
    pub fn map_insert(&mut self, rmt_id: i32, p_bit: i32, lnreg: i32, blk: P) -> Option<P> {
        self.lnreg_map.insert(Self::set_key(rmt_id, p_bit, lnreg), blk)
    }

    /// Removes the key from the index, returning its handle.
    pub fn map_remove(&mut self, rmt_id: i32, p_bit: i32, lnreg: i32) -> Option<P> {
        self.lnreg_map.remove(&Self::set_key(rmt_id, p_bit, lnreg))
    }

    /// Number of indexed keys.
    pub fn map_len(&self) -> usize {
        self.lnreg_map.len()
    }

    /// Indexed entries in ascending key order.
    pub fn map_iter(&self) -> impl Iterator<Item = (&CamKey, &P)> + '_ {
        self.lnreg_map.iter()
    }

    /// Read access to the composite index.
    pub const fn map(&self) -> &BTreeMap<CamKey, P> {
        &self.lnreg_map
    }

    /// Direct access for collaborators that maintain the index themselves.
    pub const fn map_mut(&mut self) -> &mut BTreeMap<CamKey, P> {
        &mut self.lnreg_map
    }

    /// Drops index entries whose block is not resident in any way.
    ///
    /// Entries for resident but invalid blocks are kept; keyed lookups reject them.
    /// Returns the number of entries removed.
    pub fn purge_stale(&mut self) -> usize {
        let before = self.lnreg_map.len();
        let blks = &self.blks;
        self.lnreg_map.retain(|_, p| blks.iter().any(|b| b.same_block(p)));
        let removed = before - self.lnreg_map.len();
        if removed > 0 {
            warn!(removed, "purged composite index entries for evicted blocks");
        }
        removed
    }

    fn unindex(&mut self, blk: &P) -> usize {
        let before = self.lnreg_map.len();
        self.lnreg_map.retain(|_, p| !p.same_block(blk));
        before - self.lnreg_map.len()
    }

    // ──────────────────────────────────────────────────────────
    // Recency reordering
    // ──────────────────────────────────────────────────────────

    /// Moves the given block to the head (MRU) of the set.
    ///
    /// Ways `0..i` shift one step toward the tail, keeping their order, and `blk`
    /// lands in way 0. Ways past `i` are untouched. Already at head: no-op.
    ///
    /// # Panics
    ///
    /// Panics if `blk` is not resident in this set. The set is left unchanged.
    pub fn move_to_head(&mut self, blk: &P) {
        if self.blks[0].same_block(blk) {
            return;
        }
        let Some(from) = self.way_of(blk) else {
            panic!("move_to_head: block is not resident in this {}-way set", self.assoc);
        };

        // Write `next` into blks[i], moving from MRU toward LRU through `from`;
        // the last handle displaced is `blk` itself.
        let mut next = blk.clone();
        for slot in &mut self.blks[..=from] {
            mem::swap(slot, &mut next);
        }
        debug_assert!(next.same_block(blk));
        trace!(from, "move_to_head");
    }

    /// Moves the given block to the tail (LRU) of the set.
    ///
    /// Mirror of [`CacheSet::move_to_head`]: ways `i+1..assoc` shift one step toward
    /// the head and `blk` lands in way `assoc - 1`. Already at tail: no-op.
    ///
    /// # Panics
    ///
    /// Panics if `blk` is not resident in this set. The set is left unchanged.
    pub fn move_to_tail(&mut self, blk: &P) {
        if self.blks[self.assoc - 1].same_block(blk) {
            return;
        }
        let Some(from) = self.way_of(blk) else {
            panic!("move_to_tail: block is not resident in this {}-way set", self.assoc);
        };

        let mut next = blk.clone();
        for slot in self.blks[from..].iter_mut().rev() {
            mem::swap(slot, &mut next);
        }
        debug_assert!(next.same_block(blk));
        trace!(from, "move_to_tail");
    }

    // ──────────────────────────────────────────────────────────
    // Slot replacement
    // ──────────────────────────────────────────────────────────

    /// Installs `blk` into `way`, returning the handle it evicted.
    ///
    /// Reinstalling the block a way already holds is a no-op that hands `blk` back.
    /// Recency order is not changed: the new block inherits the way's position.
    /// Under [`StaleIndexPolicy::Purge`] every index entry pointing at the evicted
    /// block is removed.
    ///
    /// # Errors
    ///
    /// * [`SetError::WayOutOfRange`] if `way >= assoc`.
    /// * [`SetError::DuplicateBlock`] if `blk` already sits in a different way.
    pub fn replace(&mut self, way: usize, blk: P) -> Result<P, SetError> {
        if way >= self.assoc {
            return Err(SetError::WayOutOfRange {
                way,
                assoc: self.assoc,
            });
        }
        if let Some(resident) = self.way_of(&blk) {
            if resident != way {
                return Err(SetError::DuplicateBlock { way: resident });
            }
            return Ok(blk);
        }

        let old = mem::replace(&mut self.blks[way], blk);
        if self.stale_index == StaleIndexPolicy::Purge {
            let dropped = self.unindex(&old);
            trace!(way, dropped, "replace");
        } else {
            trace!(way, "replace");
        }
        Ok(old)
    }
}
