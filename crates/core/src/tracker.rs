//! Cross-round record of claimed items.

use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::item::ItemId;

/// Set of item ids already assigned to some round.
///
/// Grows monotonically: an id claimed by an emitted round is never released.
#[derive(Debug, Clone, Default)]
pub struct MembershipTracker {
    claimed: FxHashSet<ItemId>,
}

impl MembershipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            claimed: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Reserve room for `additional` more claims.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.claimed.try_reserve(additional)?;
        Ok(())
    }

    /// Claim `id`. Returns false, leaving state untouched, if it was already claimed.
    #[inline]
    pub fn try_claim(&mut self, id: ItemId) -> bool {
        self.claimed.insert(id)
    }

    /// Undo a claim made by a round that failed before it was emitted.
    pub(crate) fn release(&mut self, id: ItemId) {
        self.claimed.remove(&id);
    }

    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.claimed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    /// Claimed ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.claimed.iter().copied()
    }
}
