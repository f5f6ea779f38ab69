//! sleighpack - distance-ordered, capacity-bounded round planning.
//!
//! Items carrying a weight and a geographic position are split into an
//! ordered sequence of rounds. Each round walks the items nearest-first from
//! a fixed reference point and greedily takes every unassigned item that
//! keeps the round's total weight within capacity.
//!
//! - `index` - items sorted by haversine distance
//! - `tracker` - ids already assigned to a round
//! - `packer` - one greedy pass
//! - `planner` - repeated passes and the stop policy
//! - `manifest` - item list input, round manifest output

pub mod config;
pub mod error;
pub mod geo;
pub mod index;
pub mod item;
pub mod manifest;
pub mod packer;
pub mod planner;
pub mod tracker;

pub use config::PlanConfig;
pub use error::{Error, Result};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use index::{DistanceIndex, IndexEntry};
pub use item::{Item, ItemId, validate_items};
pub use packer::{PackedRound, pack};
pub use planner::{Plan, Round, RoundPlanner, StopReason, plan_rounds};
pub use tracker::MembershipTracker;
