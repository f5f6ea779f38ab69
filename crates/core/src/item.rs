//! Weighted, geolocated items.

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Item identifier. The full integer range is valid, including zero.
pub type ItemId = i64;

/// A single weighted item at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub position: GeoPoint,
    pub weight: f64,
}

impl Item {
    pub const fn new(id: ItemId, lat: f64, lon: f64, weight: f64) -> Self {
        Self {
            id,
            position: GeoPoint::new(lat, lon),
            weight,
        }
    }
}

/// Check a loaded item collection.
///
/// Rejects duplicate ids, out-of-range or non-finite coordinates, and
/// negative or non-finite weights.
pub fn validate_items(items: &[Item]) -> Result<()> {
    let mut seen = FxHashSet::default();
    seen.try_reserve(items.len())?;

    for item in items {
        if !item.position.is_valid() {
            return Err(Error::InvalidItem {
                id: item.id,
                msg: format!(
                    "position ({}, {}) is not a valid coordinate",
                    item.position.lat, item.position.lon
                ),
            });
        }
        if !item.weight.is_finite() || item.weight < 0.0 {
            return Err(Error::InvalidItem {
                id: item.id,
                msg: format!("weight {} must be finite and non-negative", item.weight),
            });
        }
        if !seen.insert(item.id) {
            return Err(Error::DuplicateId(item.id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_negative_ids() {
        let items = vec![Item::new(0, 1.0, 1.0, 2.0), Item::new(-7, 2.0, 2.0, 0.0)];
        assert!(validate_items(&items).is_ok());
    }

    #[test]
    fn rejects_duplicates() {
        let items = vec![Item::new(3, 1.0, 1.0, 2.0), Item::new(3, 2.0, 2.0, 1.0)];
        assert!(matches!(validate_items(&items), Err(Error::DuplicateId(3))));
    }

    #[test]
    fn rejects_negative_weight() {
        let items = vec![Item::new(1, 1.0, 1.0, -0.5)];
        assert!(matches!(
            validate_items(&items),
            Err(Error::InvalidItem { id: 1, .. })
        ));
    }

    #[test]
    fn rejects_bad_latitude() {
        let items = vec![Item::new(9, 91.0, 0.0, 1.0)];
        assert!(matches!(
            validate_items(&items),
            Err(Error::InvalidItem { id: 9, .. })
        ));
    }
}
