// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proximity queries: nearest object of a category, and everything within a radius.
//!
//! Distances are measured between reference points (`GameObject::x`/`y`), not boxes.
//!
//! [`SpatialWorld::find_nearest_object`] scans the whole cache and is O(n) in the number
//! of registered objects. Only [`SpatialWorld::find_objects_in_radius`] goes through the
//! grid, so an object whose reference point lies outside its own box can be missed by the
//! radius query when that box does not reach the search square.

use crate::category::Category;
use crate::types::{BoundingBox, ObjectId};
use crate::world::SpatialWorld;

/// An object id paired with its distance from the query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearby {
    /// Matching object.
    pub id: ObjectId,
    /// Euclidean distance from the query point to the object's reference point.
    pub distance: f64,
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

impl SpatialWorld {
    /// Closest object of `category` strictly within `max_distance` of `(x, y)`.
    ///
    /// Linear scan over every cached object, in batch order. With equal distances the
    /// earliest object in the batch wins.
    pub fn find_nearest_object(
        &self,
        x: f64,
        y: f64,
        category: &Category,
        max_distance: f64,
    ) -> Option<Nearby> {
        let cache = self.cache.read();
        let mut best: Option<Nearby> = None;
        let mut best_distance = max_distance;
        for obj in cache.iter() {
            if !obj.is(category) {
                continue;
            }
            let d = obj.distance_sq(x, y).sqrt();
            if d < best_distance {
                best_distance = d;
                best = Some(Nearby {
                    id: obj.id,
                    distance: d,
                });
            }
        }
        best
    }

    /// Every object within `radius` of `(x, y)` (inclusive), optionally of one category.
    ///
    /// Results follow grid discovery order.
    pub fn find_objects_in_radius(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        category: Option<&Category>,
    ) -> Vec<Nearby> {
        let cache = self.cache.read();
        let candidates = self.grid.query(BoundingBox::around(x, y, radius));
        let radius_sq = radius * radius;
        let mut out = Vec::with_capacity(candidates.len());
        for id in candidates {
            let Some(obj) = cache.get(id) else {
                continue;
            };
            if category.is_some_and(|c| !obj.is(c)) {
                continue;
            }
            let d2 = obj.distance_sq(x, y);
            if d2 <= radius_sq {
                out.push(Nearby {
                    id,
                    distance: d2.sqrt(),
                });
            }
        }
        out
    }
}
