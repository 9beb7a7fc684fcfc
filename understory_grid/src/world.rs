// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owned spatial context: grid, occupancy filter and object cache together.

use core::fmt::Debug;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::cache::{GameObject, ObjectCache};
use crate::config::GridConfig;
use crate::diagnostics::Diagnostics;
use crate::grid::SpatialGrid;

/// Grid, occupancy filter and object cache, rebuilt in lockstep.
///
/// A world is an ordinary value: create as many as you need, share one across threads
/// by reference or `Arc`. Collision queries live in [`collision`](crate::collision) and
/// proximity queries in [`search`](crate::search).
///
/// Locking order is always cache, then grid. [`update`](Self::update) holds the cache
/// write lock for the whole rebuild, so a query never observes a grid and a cache built
/// from different batches.
pub struct SpatialWorld {
    pub(crate) grid: SpatialGrid,
    pub(crate) cache: RwLock<ObjectCache>,
}

impl Default for SpatialWorld {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl SpatialWorld {
    /// Create an empty world.
    ///
    /// # Panics
    ///
    /// If `config.cell_size` is not positive and finite.
    pub fn new(config: GridConfig) -> Self {
        Self {
            grid: SpatialGrid::with_occupancy_words(config.cell_size, config.occupancy_words),
            cache: RwLock::new(ObjectCache::default()),
        }
    }

    /// Replace the whole index with `objects`. Returns the number of distinct ids registered.
    ///
    /// The previous contents are discarded. Boxes enter the grid in batch order, so query
    /// results are reproducible for the same batch. When an id repeats, the last snapshot
    /// wins and only its box is placed in the grid.
    pub fn update<I>(&self, objects: I) -> usize
    where
        I: IntoIterator<Item = GameObject>,
    {
        let mut cache = self.cache.write();
        let fresh = ObjectCache::from_objects(objects);
        self.grid.rebuild(fresh.iter().map(|obj| (obj.id, obj.bbox)));
        *cache = fresh;
        let stats = self.grid.stats();
        log::debug!(
            "spatial world rebuilt: {} objects across {} cells",
            cache.len(),
            stats.cell_count
        );
        cache.len()
    }

    /// Empty the grid and the cache.
    pub fn clear(&self) {
        let mut cache = self.cache.write();
        self.grid.clear();
        *cache = ObjectCache::default();
    }

    /// The spatial grid.
    ///
    /// Mutating it directly bypasses the cache; queries then skip ids the cache does
    /// not know.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Read access to the object cache.
    pub fn objects(&self) -> RwLockReadGuard<'_, ObjectCache> {
        self.cache.read()
    }

    /// Current counters.
    pub fn diagnostics(&self) -> Diagnostics {
        let cache = self.cache.read();
        let stats = self.grid.stats();
        #[allow(
            clippy::cast_precision_loss,
            reason = "Averages only need approximate precision."
        )]
        let avg_objects_per_cell = if stats.cell_count == 0 {
            0.0
        } else {
            stats.entry_count as f64 / stats.cell_count as f64
        };
        Diagnostics {
            cell_count: stats.cell_count,
            object_count: cache.len(),
            cell_entry_count: stats.entry_count,
            avg_objects_per_cell,
            alias_event_count: self.grid.alias_event_count(),
            index_wrap_count: self.grid.occupancy().index_wrap_count(),
        }
    }
}

impl Debug for SpatialWorld {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialWorld")
            .field("objects", &self.cache.read().len())
            .field("grid", &self.grid)
            .finish()
    }
}
