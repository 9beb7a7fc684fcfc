// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only counters describing the current index.

/// Snapshot returned by [`SpatialWorld::diagnostics`](crate::SpatialWorld::diagnostics).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Non-empty grid cells.
    pub cell_count: usize,
    /// Distinct objects in the cache.
    pub object_count: usize,
    /// Sum of per-cell id-list lengths.
    pub cell_entry_count: usize,
    /// `cell_entry_count / cell_count`, or 0 with no cells.
    pub avg_objects_per_cell: f64,
    /// Occupancy bits found set for cells with no entry (hash aliasing), cumulative.
    pub alias_event_count: u64,
    /// Occupancy indices wrapped back into range, cumulative. Should stay 0.
    pub index_wrap_count: u64,
}
