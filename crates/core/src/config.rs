//! Round planning parameters.
//!
//! Contains PlanConfig for controlling where distances are measured from,
//! how much weight a round may carry and how many rounds may be produced.

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Default reference point (latitude, longitude).
pub const DEFAULT_REFERENCE: GeoPoint = GeoPoint::new(60.7603243, 46.3053893);
/// Default per-round weight limit.
pub const DEFAULT_CAPACITY: f64 = 100.0;
/// Default upper bound on the number of rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 20_000;

/// Parameters for round planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    /// Fixed origin every item distance is measured from.
    pub reference: GeoPoint,

    /// Maximum cumulative weight of the items in a single round.
    pub capacity: f64,

    /// Hard cap on the number of rounds. Planning normally finishes well
    /// before this binds.
    pub max_rounds: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            reference: DEFAULT_REFERENCE,
            capacity: DEFAULT_CAPACITY,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl PlanConfig {
    pub fn with_reference(mut self, lat: f64, lon: f64) -> Self {
        self.reference = GeoPoint::new(lat, lon);
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Reject configurations the planner cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.reference.is_valid() {
            return Err(Error::InvalidConfig(format!(
                "reference point ({}, {}) is not a valid coordinate",
                self.reference.lat, self.reference.lon
            )));
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "capacity must be a positive number, got {}",
                self.capacity
            )));
        }
        if self.max_rounds == 0 {
            return Err(Error::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
