// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-id object snapshots, rebuilt together with the grid.

use core::slice;
use std::collections::HashMap;

use crate::category::{Category, CategoryMask};
use crate::types::{BoundingBox, ObjectId};

/// Snapshot of one scene object as of the last rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct GameObject {
    /// Caller-supplied identifier.
    pub id: ObjectId,
    /// Reference point used for distance queries.
    pub x: f64,
    /// Reference point used for distance queries.
    pub y: f64,
    /// Footprint used for collision and grid placement.
    pub bbox: BoundingBox,
    /// Parsed category.
    pub category: Category,
    /// Cached mask of `category`.
    pub mask: CategoryMask,
}

impl GameObject {
    /// Create a snapshot, deriving the mask from `category`.
    pub fn new(id: ObjectId, x: f64, y: f64, bbox: BoundingBox, category: Category) -> Self {
        let mask = category.mask();
        Self {
            id,
            x,
            y,
            bbox,
            category,
            mask,
        }
    }

    /// Whether this object belongs to `category`.
    #[inline]
    pub fn is(&self, category: &Category) -> bool {
        category.matches(self.mask, &self.category)
    }

    /// Squared distance from the reference point to `(x, y)`.
    #[inline]
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Authoritative id → snapshot table.
///
/// Only [`SpatialWorld::update`](crate::SpatialWorld::update) fills it, always from the
/// same batch as the grid. Snapshots are kept in batch order, so iteration and the grid
/// built from it are the same for the same batch.
#[derive(Clone, Debug, Default)]
pub struct ObjectCache {
    objects: Vec<GameObject>,
    index: HashMap<ObjectId, usize>,
}

impl ObjectCache {
    /// Build a cache from a batch.
    ///
    /// When an id repeats, only its last snapshot is kept, at the position of that
    /// last occurrence.
    pub fn from_objects<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = GameObject>,
    {
        let batch: Vec<GameObject> = objects.into_iter().collect();
        let mut last = HashMap::with_capacity(batch.len());
        for (i, obj) in batch.iter().enumerate() {
            last.insert(obj.id, i);
        }
        let mut objects = Vec::with_capacity(last.len());
        let mut index = HashMap::with_capacity(last.len());
        for (i, obj) in batch.into_iter().enumerate() {
            if last.get(&obj.id) == Some(&i) {
                index.insert(obj.id, objects.len());
                objects.push(obj);
            }
        }
        Self { objects, index }
    }

    /// Look up a snapshot.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.index.get(&id).and_then(|&i| self.objects.get(i))
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All snapshots, in batch order.
    pub fn iter(&self) -> slice::Iter<'_, GameObject> {
        self.objects.iter()
    }
}

impl<'a> IntoIterator for &'a ObjectCache {
    type Item = &'a GameObject;
    type IntoIter = slice::Iter<'a, GameObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
