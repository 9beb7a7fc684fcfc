// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform spatial hash grid over the ground plane.

use core::fmt::Debug;
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use crate::occupancy::{DEFAULT_WORDS, OccupancyFilter};
use crate::types::{BoundingBox, GridKey, ObjectId};

/// Default cell edge length in world units.
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

/// Covered-cell count above which a query may scan the listed cells instead.
pub const SCAN_FALLBACK_CELLS: u64 = 4096;

/// Cell counts reported by [`SpatialGrid::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Number of non-empty cells.
    pub cell_count: usize,
    /// Sum of id-list lengths over all cells; an object spanning four cells counts four times.
    pub entry_count: usize,
}

/// Uniform grid mapping each cell to the ids whose boxes overlap it.
///
/// Every cell lookup is preceded by an [`OccupancyFilter`] check, so empty regions are
/// rejected without touching the hash map. Reads ([`query`](Self::query)) share a
/// reader-writer lock; every mutation takes it exclusively.
///
/// Choose the cell size close to typical object extents: too small and each object
/// spans many cells, too large and every cell holds most of the scene.
pub struct SpatialGrid {
    cell_size: f64,
    cells: RwLock<HashMap<GridKey, Vec<ObjectId>>>,
    occupancy: OccupancyFilter,
    alias_events: AtomicU64,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialGrid {
    /// Create a grid with the given cell size and a default-sized occupancy filter.
    pub fn new(cell_size: f64) -> Self {
        Self::with_occupancy_words(cell_size, DEFAULT_WORDS)
    }

    /// Create a grid whose occupancy filter has `words` 64-bit words.
    pub fn with_occupancy_words(cell_size: f64, words: usize) -> Self {
        assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "cell size must be positive and finite"
        );
        Self {
            cell_size,
            cells: RwLock::new(HashMap::with_capacity(256)),
            occupancy: OccupancyFilter::new(words),
            alias_events: AtomicU64::new(0),
        }
    }

    /// Cell edge length.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Saturating float->i32 casts are intentional; far-off cells clamp to the edge."
    )]
    fn floor_to_i32(v: f64) -> i32 {
        v.floor() as i32
    }

    /// Cell containing the world point `(x, y)`.
    pub fn cell_key(&self, x: f64, y: f64) -> GridKey {
        GridKey::new(
            Self::floor_to_i32(x / self.cell_size),
            Self::floor_to_i32(y / self.cell_size),
        )
    }

    /// Corner cells of the inclusive range covered by `bbox`.
    fn cell_range(&self, bbox: &BoundingBox) -> (GridKey, GridKey) {
        (
            self.cell_key(bbox.min_x, bbox.min_y),
            self.cell_key(bbox.max_x, bbox.max_y),
        )
    }

    /// Every cell in the inclusive range covered by `bbox`, column by column.
    fn cells_for(&self, bbox: &BoundingBox) -> impl Iterator<Item = GridKey> + use<> {
        let (lo, hi) = self.cell_range(bbox);
        (lo.x..=hi.x).flat_map(move |x| (lo.y..=hi.y).map(move |y| GridKey::new(x, y)))
    }

    /// Number of cells between `lo` and `hi` inclusive; zero for an inverted range.
    fn span(lo: GridKey, hi: GridKey) -> u64 {
        let side = |a: i32, b: i32| u64::try_from(i64::from(b) - i64::from(a) + 1).unwrap_or(0);
        side(lo.x, hi.x).saturating_mul(side(lo.y, hi.y))
    }

    /// Append `id` to every cell covered by `bbox` and mark those cells occupied.
    pub fn insert(&self, id: ObjectId, bbox: BoundingBox) {
        let mut cells = self.cells.write();
        self.insert_locked(&mut cells, id, &bbox);
    }

    fn insert_locked(
        &self,
        cells: &mut HashMap<GridKey, Vec<ObjectId>>,
        id: ObjectId,
        bbox: &BoundingBox,
    ) {
        for key in self.cells_for(bbox) {
            cells.entry(key).or_default().push(id);
            self.occupancy.set(key);
        }
    }

    /// Remove the first occurrence of `id` from every cell covered by `bbox`.
    ///
    /// Cells that are not listed, or do not list `id`, are left alone. Occupancy bits
    /// are never cleared here since other cells may alias them.
    pub fn remove(&self, id: ObjectId, bbox: BoundingBox) {
        let mut cells = self.cells.write();
        for key in self.cells_for(&bbox) {
            let Some(ids) = cells.get_mut(&key) else {
                continue;
            };
            if let Some(pos) = ids.iter().position(|&i| i == id) {
                ids.remove(pos);
            }
            if ids.is_empty() {
                cells.remove(&key);
            }
        }
    }

    /// Ids listed in any cell covered by `bbox`, deduplicated, in first-seen order.
    ///
    /// Cells are visited column by column (ascending x, then ascending y) and each cell
    /// lists ids in insertion order, so the result is deterministic for a given sequence
    /// of inserts.
    ///
    /// This is a broad phase: results share a cell with `bbox` but may not overlap it.
    ///
    /// When `bbox` covers more than [`SCAN_FALLBACK_CELLS`] cells and more cells than
    /// the grid lists, the listed cells are scanned instead of the covered range, so a
    /// huge query costs O(listed cells) rather than O(area). That path skips the
    /// occupancy filter and never counts alias events.
    pub fn query(&self, bbox: BoundingBox) -> Vec<ObjectId> {
        let cells = self.cells.read();
        let mut seen = HashSet::with_capacity(16);
        let mut out = Vec::with_capacity(16);
        let mut collect = |ids: &[ObjectId]| {
            for &id in ids {
                if seen.insert(id) {
                    out.push(id);
                }
            }
        };

        let (lo, hi) = self.cell_range(&bbox);
        let listed = u64::try_from(cells.len()).unwrap_or(u64::MAX);
        if Self::span(lo, hi) > listed.max(SCAN_FALLBACK_CELLS) {
            let mut hits: Vec<(GridKey, &[ObjectId])> = cells
                .iter()
                .filter(|(k, _)| (lo.x..=hi.x).contains(&k.x) && (lo.y..=hi.y).contains(&k.y))
                .map(|(k, ids)| (*k, ids.as_slice()))
                .collect();
            hits.sort_unstable_by_key(|&(k, _)| k);
            for (_, ids) in hits {
                collect(ids);
            }
        } else {
            for key in self.cells_for(&bbox) {
                if !self.occupancy.is_set(key) {
                    continue;
                }
                let Some(ids) = cells.get(&key) else {
                    // Aliased bit, or one left behind by `remove`.
                    self.alias_events.fetch_add(1, Ordering::Relaxed);
                    continue;
                };
                collect(ids.as_slice());
            }
        }
        log::trace!("grid query {bbox:?}: {} candidates", out.len());
        out
    }

    /// Drop every cell and reset the occupancy filter.
    pub fn clear(&self) {
        let mut cells = self.cells.write();
        *cells = HashMap::with_capacity(256);
        self.occupancy.clear();
    }

    /// Clear, then insert every `(id, bbox)` pair, holding the write lock throughout.
    ///
    /// Concurrent queries block until the rebuild is complete.
    pub fn rebuild<I>(&self, items: I)
    where
        I: IntoIterator<Item = (ObjectId, BoundingBox)>,
    {
        let mut cells = self.cells.write();
        *cells = HashMap::with_capacity(256);
        self.occupancy.clear();
        for (id, bbox) in items {
            self.insert_locked(&mut cells, id, &bbox);
        }
    }

    /// Current cell and entry counts.
    pub fn stats(&self) -> GridStats {
        let cells = self.cells.read();
        GridStats {
            cell_count: cells.len(),
            entry_count: cells.values().map(Vec::len).sum(),
        }
    }

    /// Number of cell lookups that found an occupancy bit set for a cell with no entry.
    ///
    /// This counts hash aliasing, and also bits left set for cells that
    /// [`remove`](Self::remove) emptied, since removal never clears bits. Stale bits go
    /// away on [`clear`](Self::clear) or [`rebuild`](Self::rebuild); the counter itself
    /// is cumulative.
    pub fn alias_event_count(&self) -> u64 {
        self.alias_events.load(Ordering::Relaxed)
    }

    /// The occupancy pre-filter.
    pub fn occupancy(&self) -> &OccupancyFilter {
        &self.occupancy
    }
}

impl Debug for SpatialGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("SpatialGrid")
            .field("cell_size", &self.cell_size)
            .field("cells", &stats.cell_count)
            .field("entries", &stats.entry_count)
            .field("alias_events", &self.alias_event_count())
            .finish_non_exhaustive()
    }
}
