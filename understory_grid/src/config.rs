// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for a [`SpatialWorld`](crate::SpatialWorld).

use crate::grid::DEFAULT_CELL_SIZE;
use crate::occupancy::DEFAULT_WORDS;

/// Grid sizing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Cell edge length in world units. Must be positive and finite.
    pub cell_size: f64,
    /// Occupancy filter size in 64-bit words, clamped to
    /// [`MAX_WORDS`](crate::occupancy::MAX_WORDS).
    pub occupancy_words: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            occupancy_words: DEFAULT_WORDS,
        }
    }
}

impl GridConfig {
    /// Default sizing with a different cell size.
    pub fn with_cell_size(cell_size: f64) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }
}
