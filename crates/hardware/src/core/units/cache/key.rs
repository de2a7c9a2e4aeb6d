//! Composite search key for the secondary block index.

use std::fmt;

/// Composite key `(remote id, presence bit, logical register)`.
///
/// Keys order lexicographically on `(rmt_id, p_bit, lnreg)`, which is the
/// declaration order of the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CamKey {
    /// Remote identifier.
    pub rmt_id: i32,
    /// Presence bit.
    pub p_bit: i32,
    /// Logical register number.
    pub lnreg: i32,
}

impl CamKey {
    /// Builds a key from its three fields.
    #[inline(always)]
    pub const fn new(rmt_id: i32, p_bit: i32, lnreg: i32) -> Self {
        Self {
            rmt_id,
            p_bit,
            lnreg,
        }
    }
}

impl From<(i32, i32, i32)> for CamKey {
    fn from((rmt_id, p_bit, lnreg): (i32, i32, i32)) -> Self {
        Self::new(rmt_id, p_bit, lnreg)
    }
}

impl fmt::Display for CamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.rmt_id, self.p_bit, self.lnreg)
    }
}
