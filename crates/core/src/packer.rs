//! Single greedy pass over the distance index.

use tracing::{debug, trace};

use crate::error::Result;
use crate::index::DistanceIndex;
use crate::item::ItemId;
use crate::tracker::MembershipTracker;

/// Items claimed by one pass, in claim order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedRound {
    pub ids: Vec<ItemId>,
    pub total_weight: f64,
}

impl PackedRound {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Walk `index` nearest-first and claim every unclaimed item that still fits.
///
/// An item that would push the running total over `capacity` is skipped and
/// stays available for later rounds; later, lighter items may still be taken.
/// Every id in the result has been claimed in `tracker` when this returns.
/// On error the tracker is left exactly as it was on entry.
pub fn pack(
    index: &DistanceIndex<'_>,
    tracker: &mut MembershipTracker,
    capacity: f64,
) -> Result<PackedRound> {
    let mut round = PackedRound::default();
    tracker.try_reserve(index.len().saturating_sub(tracker.len()))?;

    match fill_round(index, tracker, capacity, &mut round) {
        Ok(()) => Ok(round),
        Err(e) => {
            for &id in &round.ids {
                tracker.release(id);
            }
            Err(e)
        }
    }
}

fn fill_round(
    index: &DistanceIndex<'_>,
    tracker: &mut MembershipTracker,
    capacity: f64,
    round: &mut PackedRound,
) -> Result<()> {
    let mut deferred = 0usize;

    for entry in index {
        let item = entry.item;
        if tracker.contains(item.id) {
            continue;
        }
        if round.total_weight + item.weight > capacity {
            deferred += 1;
            trace!(
                id = item.id,
                weight = item.weight,
                load = round.total_weight,
                "deferred, over capacity"
            );
            continue;
        }
        round.ids.try_reserve(1)?;
        tracker.try_reserve(1)?;
        if tracker.try_claim(item.id) {
            round.ids.push(item.id);
            round.total_weight += item.weight;
        }
    }

    debug!(
        claimed = round.ids.len(),
        deferred,
        weight = round.total_weight,
        "packed round"
    );

    Ok(())
}
