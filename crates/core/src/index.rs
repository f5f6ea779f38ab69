//! Distance-ordered index over items.
//!
//! Entries are kept in a flat vector sorted by distance from a fixed
//! reference point. Equal distances keep the order in which items were
//! inserted, so `build` and a sequence of `insert` calls over the same
//! items traverse identically.
//!
//! The index only borrows items; the item slice must outlive it. It is
//! never mutated by traversal, so every round walks the same sequence.

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::item::Item;

/// One index slot: a precomputed distance and the item it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry<'a> {
    pub distance: f64,
    pub item: &'a Item,
}

impl IndexEntry<'_> {
    #[inline]
    fn key(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.distance)
    }
}

/// Ascending traversal over a [`DistanceIndex`].
pub type Iter<'i, 'a> = std::iter::Copied<std::slice::Iter<'i, IndexEntry<'a>>>;

/// Items ordered by ascending distance from a reference point.
#[derive(Debug, Clone)]
pub struct DistanceIndex<'a> {
    reference: GeoPoint,
    entries: Vec<IndexEntry<'a>>,
}

impl<'a> DistanceIndex<'a> {
    /// Create an empty index around `reference`.
    pub const fn new(reference: GeoPoint) -> Self {
        Self {
            reference,
            entries: Vec::new(),
        }
    }

    /// Build an index over `items`, measuring from `reference`.
    ///
    /// Distances are computed in parallel; ties are broken by position in
    /// `items`.
    pub fn build(items: &'a [Item], reference: GeoPoint) -> Result<Self> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(items.len())?;
        entries.par_extend(items.par_iter().map(|item| IndexEntry {
            distance: reference.distance_km(&item.position),
            item,
        }));
        // stable: equal keys stay in load order
        entries.par_sort_by_key(IndexEntry::key);

        debug!(
            items = entries.len(),
            nearest_km = entries.first().map(|e| e.distance),
            farthest_km = entries.last().map(|e| e.distance),
            "built distance index"
        );

        Ok(Self { reference, entries })
    }

    /// Insert `item` at `distance`, after any entries with an equal distance.
    pub fn insert(&mut self, distance: f64, item: &'a Item) -> Result<()> {
        self.entries.try_reserve(1)?;
        let key = OrderedFloat(distance);
        let pos = self.entries.partition_point(|e| e.key() <= key);
        self.entries.insert(pos, IndexEntry { distance, item });
        Ok(())
    }

    /// Insert `item`, computing its distance from the reference point.
    pub fn insert_item(&mut self, item: &'a Item) -> Result<()> {
        let distance = self.reference.distance_km(&item.position);
        self.insert(distance, item)
    }

    /// Ascending-distance traversal. Can be called any number of times.
    pub fn iter(&self) -> Iter<'_, 'a> {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn reference(&self) -> GeoPoint {
        self.reference
    }
}

impl<'i, 'a> IntoIterator for &'i DistanceIndex<'a> {
    type Item = IndexEntry<'a>;
    type IntoIter = Iter<'i, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
