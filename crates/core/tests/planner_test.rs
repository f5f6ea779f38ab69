//! Tests for round planning over whole item collections.
//!
//! Covers the worked three-item scenario, the stop policy, and property
//! tests for partitioning, capacity, ordering and termination.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use sleighpack_core::{
    DistanceIndex, GeoPoint, Item, ItemId, MembershipTracker, PlanConfig, RoundPlanner,
    StopReason, plan_rounds,
};

const ORIGIN: GeoPoint = GeoPoint::new(0.0, 0.0);

fn origin_config(capacity: f64) -> PlanConfig {
    PlanConfig::default()
        .with_reference(ORIGIN.lat, ORIGIN.lon)
        .with_capacity(capacity)
}

/// Items spread over a small patch around the origin, ids in load order.
fn items_from(specs: &[(f64, f64, f64)]) -> Vec<Item> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(lat, lon, w))| Item::new(i as ItemId, lat, lon, w))
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_worked_scenario_rounds() {
    let items = vec![
        Item::new(1, 0.05, 0.0, 40.0),
        Item::new(2, 0.10, 0.0, 70.0),
        Item::new(3, 0.15, 0.0, 30.0),
    ];
    let index = DistanceIndex::build(&items, ORIGIN).unwrap();
    let mut tracker = MembershipTracker::new();
    let mut planner = RoundPlanner::new(&index, &mut tracker, &origin_config(100.0)).unwrap();

    let r1 = planner.next().unwrap().unwrap();
    assert_eq!((r1.number, r1.ids.clone(), r1.total_weight), (1, vec![1, 3], 70.0));
    let r2 = planner.next().unwrap().unwrap();
    assert_eq!((r2.number, r2.ids.clone(), r2.total_weight), (2, vec![2], 70.0));
    assert!(planner.next().is_none());
    assert_eq!(planner.stop_reason(), Some(StopReason::Exhausted));
    assert!(planner.is_done());
}

#[test]
fn test_planner_is_not_restartable() {
    let items = vec![Item::new(1, 0.05, 0.0, 40.0)];
    let index = DistanceIndex::build(&items, ORIGIN).unwrap();
    let mut tracker = MembershipTracker::new();
    let mut planner = RoundPlanner::new(&index, &mut tracker, &origin_config(100.0)).unwrap();

    assert_eq!(planner.by_ref().count(), 1);
    assert!(planner.next().is_none());
    assert!(planner.next().is_none());
}

#[test]
fn test_pre_claimed_items_are_skipped() {
    let items = vec![Item::new(1, 0.05, 0.0, 40.0), Item::new(2, 0.1, 0.0, 40.0)];
    let index = DistanceIndex::build(&items, ORIGIN).unwrap();
    let mut tracker = MembershipTracker::new();
    tracker.try_claim(1);

    let rounds: Vec<_> = RoundPlanner::new(&index, &mut tracker, &origin_config(100.0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].ids, vec![2]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let items = vec![Item::new(1, 0.05, 0.0, 40.0)];
    assert!(plan_rounds(&items, &origin_config(-5.0)).is_err());
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let items = vec![Item::new(1, 0.05, 0.0, 40.0), Item::new(1, 0.1, 0.0, 40.0)];
    assert!(plan_rounds(&items, &origin_config(100.0)).is_err());
}

#[test]
fn test_zero_weight_items_ride_along() {
    let items = vec![
        Item::new(1, 0.05, 0.0, 100.0),
        Item::new(2, 0.10, 0.0, 0.0),
        Item::new(3, 0.15, 0.0, 1.0),
    ];
    let plan = plan_rounds(&items, &origin_config(100.0)).unwrap();
    assert_eq!(plan.rounds[0].ids, vec![1, 2]);
    assert_eq!(plan.rounds[1].ids, vec![3]);
}

#[test]
fn test_large_ids_do_not_alias() {
    let items = vec![
        Item::new(7, 0.05, 0.0, 60.0),
        Item::new(100_010, 0.10, 0.0, 60.0),
        Item::new(i64::MAX, 0.15, 0.0, 60.0),
        Item::new(i64::MIN, 0.20, 0.0, 60.0),
    ];
    let plan = plan_rounds(&items, &origin_config(100.0)).unwrap();
    let order: Vec<ItemId> = plan.rounds.iter().flat_map(|r| r.ids.clone()).collect();
    assert_eq!(order, vec![7, 100_010, i64::MAX, i64::MIN]);
    assert_eq!(plan.assigned_count(), 4);
}

// ============================================================================
// Properties
// ============================================================================

fn item_specs(max_weight: f64) -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec(
        (-2.0f64..2.0, -2.0f64..2.0, 0.0f64..max_weight),
        0..60,
    )
}

proptest! {
    #[test]
    fn prop_rounds_partition_and_respect_capacity(
        specs in item_specs(150.0),
        capacity in 10.0f64..120.0,
    ) {
        let items = items_from(&specs);
        let weights: HashMap<ItemId, f64> = items.iter().map(|i| (i.id, i.weight)).collect();
        let plan = plan_rounds(&items, &origin_config(capacity)).unwrap();

        let mut seen = HashSet::new();
        for (n, round) in plan.rounds.iter().enumerate() {
            prop_assert_eq!(round.number, n + 1);
            prop_assert!(!round.ids.is_empty());
            prop_assert!(round.total_weight <= capacity);

            let mut sum = 0.0;
            for id in &round.ids {
                prop_assert!(weights.contains_key(id));
                prop_assert!(seen.insert(*id), "id {} assigned twice", id);
                sum += weights[id];
            }
            prop_assert_eq!(sum, round.total_weight);
        }
        for id in &plan.unassigned {
            prop_assert!(!seen.contains(id));
        }
        prop_assert_eq!(seen.len() + plan.unassigned.len(), items.len());
    }

    #[test]
    fn prop_rounds_follow_distance_order(
        specs in item_specs(80.0),
        capacity in 10.0f64..120.0,
    ) {
        let items = items_from(&specs);
        let index = DistanceIndex::build(&items, ORIGIN).unwrap();
        let position: HashMap<ItemId, usize> =
            index.iter().enumerate().map(|(pos, e)| (e.item.id, pos)).collect();

        let plan = plan_rounds(&items, &origin_config(capacity)).unwrap();
        for round in &plan.rounds {
            let positions: Vec<usize> = round.ids.iter().map(|id| position[id]).collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn prop_everything_fits_eventually(
        specs in item_specs(50.0),
        capacity in 50.0f64..120.0,
    ) {
        let items = items_from(&specs);
        let plan = plan_rounds(&items, &origin_config(capacity)).unwrap();

        prop_assert_eq!(plan.stop_reason, StopReason::Exhausted);
        prop_assert!(plan.unassigned.is_empty());
        prop_assert_eq!(plan.assigned_count(), items.len());
        prop_assert!(plan.rounds.len() <= items.len());
    }

    #[test]
    fn prop_oversized_items_stall(
        specs in item_specs(50.0),
        heavy in 101.0f64..1000.0,
    ) {
        let mut items = items_from(&specs);
        let heavy_id = items.len() as ItemId;
        items.push(Item::new(heavy_id, 0.0, 0.0, heavy));

        let plan = plan_rounds(&items, &origin_config(100.0)).unwrap();
        prop_assert_eq!(plan.stop_reason, StopReason::Stalled);
        prop_assert_eq!(plan.unassigned, vec![heavy_id]);
    }

    #[test]
    fn prop_index_build_is_deterministic(specs in item_specs(10.0)) {
        let items = items_from(&specs);
        let first: Vec<ItemId> = DistanceIndex::build(&items, ORIGIN)
            .unwrap()
            .iter()
            .map(|e| e.item.id)
            .collect();
        let second: Vec<ItemId> = DistanceIndex::build(&items, ORIGIN)
            .unwrap()
            .iter()
            .map(|e| e.item.id)
            .collect();
        prop_assert_eq!(first, second);
    }
}
