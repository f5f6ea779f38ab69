//! Repeated packing passes until no further progress is possible.
//!
//! [`RoundPlanner`] is a lazy iterator of rounds. Each call to `next` runs one
//! [`pack`] over the unchanged index; only the tracker carries state between
//! rounds. The planner stops, without emitting, on the first round that
//! claims nothing, and never produces more than `max_rounds` rounds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::config::PlanConfig;
use crate::error::Result;
use crate::index::DistanceIndex;
use crate::item::{Item, ItemId, validate_items};
use crate::packer::pack;
use crate::tracker::MembershipTracker;

/// One emitted round.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// 1-based round number.
    pub number: usize,
    pub ids: Vec<ItemId>,
    pub total_weight: f64,
}

/// Why planning ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every indexed item has been claimed.
    Exhausted,
    /// Unclaimed items remain but none of them fits in an empty round.
    Stalled,
    /// `max_rounds` rounds were produced with items still unclaimed.
    RoundLimit,
    /// The cancel flag was raised between rounds.
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Exhausted => "exhausted",
            Self::Stalled => "stalled",
            Self::RoundLimit => "round limit",
            Self::Cancelled => "cancelled",
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Running { next: usize },
    Done(StopReason),
    Failed,
}

/// Iterator over rounds, driving [`pack`] against a shared tracker.
pub struct RoundPlanner<'p, 'a> {
    index: &'p DistanceIndex<'a>,
    tracker: &'p mut MembershipTracker,
    capacity: f64,
    max_rounds: usize,
    cancel: Option<Arc<AtomicBool>>,
    state: State,
}

impl<'p, 'a> RoundPlanner<'p, 'a> {
    pub fn new(
        index: &'p DistanceIndex<'a>,
        tracker: &'p mut MembershipTracker,
        config: &PlanConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            index,
            tracker,
            capacity: config.capacity,
            max_rounds: config.max_rounds,
            cancel: None,
            state: State::Running { next: 1 },
        })
    }

    /// Stop before the next round once `flag` is set. A round in progress
    /// always completes.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The reason planning ended, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.state {
            State::Done(reason) => Some(reason),
            State::Running { .. } | State::Failed => None,
        }
    }

    pub fn is_done(&self) -> bool {
        !matches!(self.state, State::Running { .. })
    }

    /// Unclaimed item ids in ascending-distance order.
    pub fn unassigned(&self) -> Vec<ItemId> {
        unassigned(self.index, &*self.tracker)
    }

    fn finish(&mut self, reason: StopReason, rounds: usize) {
        self.state = State::Done(reason);
        match reason {
            StopReason::Stalled => {
                let left = self.unassigned().len();
                warn!(
                    unassigned = left,
                    capacity = self.capacity,
                    "no remaining item fits within capacity"
                );
            }
            _ => info!(rounds, claimed = self.tracker.len(), %reason, "planning finished"),
        }
    }

    fn has_unclaimed(&self) -> bool {
        self.index.iter().any(|e| !self.tracker.contains(e.item.id))
    }
}

impl Iterator for RoundPlanner<'_, '_> {
    type Item = Result<Round>;

    fn next(&mut self) -> Option<Self::Item> {
        let State::Running { next: number } = self.state else {
            return None;
        };
        let emitted = number - 1;

        if number > self.max_rounds {
            let reason = if self.has_unclaimed() {
                StopReason::RoundLimit
            } else {
                StopReason::Exhausted
            };
            self.finish(reason, emitted);
            return None;
        }

        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            self.finish(StopReason::Cancelled, emitted);
            return None;
        }

        let packed = match pack(self.index, self.tracker, self.capacity) {
            Ok(packed) => packed,
            Err(e) => {
                self.state = State::Failed;
                return Some(Err(e));
            }
        };

        if packed.is_empty() {
            let reason = if self.has_unclaimed() {
                StopReason::Stalled
            } else {
                StopReason::Exhausted
            };
            self.finish(reason, emitted);
            return None;
        }

        self.state = State::Running { next: number + 1 };
        Some(Ok(Round {
            number,
            ids: packed.ids,
            total_weight: packed.total_weight,
        }))
    }
}

/// Outcome of planning a whole item collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub rounds: Vec<Round>,
    /// Ids never claimed, nearest first.
    pub unassigned: Vec<ItemId>,
    pub stop_reason: StopReason,
}

impl Plan {
    pub fn assigned_count(&self) -> usize {
        self.rounds.iter().map(|r| r.ids.len()).sum()
    }
}

/// Validate `items`, index them and run the planner to completion.
pub fn plan_rounds(items: &[Item], config: &PlanConfig) -> Result<Plan> {
    config.validate()?;
    validate_items(items)?;

    let index = DistanceIndex::build(items, config.reference)?;
    let mut tracker = MembershipTracker::new();
    tracker.try_reserve(items.len())?;

    let mut planner = RoundPlanner::new(&index, &mut tracker, config)?;
    let mut rounds = Vec::new();
    for round in planner.by_ref() {
        rounds.push(round?);
    }
    // the loop only ends cleanly in a Done state
    let stop_reason = planner.stop_reason().unwrap_or(StopReason::Exhausted);
    let unassigned = planner.unassigned();

    Ok(Plan {
        rounds,
        unassigned,
        stop_reason,
    })
}

fn unassigned(index: &DistanceIndex<'_>, tracker: &MembershipTracker) -> Vec<ItemId> {
    index
        .iter()
        .filter(|e| !tracker.contains(e.item.id))
        .map(|e| e.item.id)
        .collect()
}
