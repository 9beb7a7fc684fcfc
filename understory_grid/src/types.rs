// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and identifiers.

use core::fmt;

/// Caller-supplied identifier of an object registered in a [`SpatialWorld`](crate::SpatialWorld).
///
/// Identity is entirely up to the host: registering the same id twice in one batch
/// overwrites the earlier snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObjectId(pub i64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Axis-aligned bounding box on the ground plane, in world units.
///
/// `min_x <= max_x` and `min_y <= max_y` are assumed, not enforced.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new box from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// The square of half-extent `radius` centred on `(x, y)`.
    pub const fn around(x: f64, y: f64, radius: f64) -> Self {
        Self {
            min_x: x - radius,
            min_y: y - radius,
            max_x: x + radius,
            max_y: y + radius,
        }
    }

    /// Inclusive overlap test: boxes that only share an edge or a corner intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether this box contains the point (inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Return true if the box is inverted on either axis.
    pub fn is_inverted(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for BoundingBox {
    fn from(r: kurbo::Rect) -> Self {
        // kurbo rects may be unordered; the index expects min <= max.
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

/// Integer coordinates of one grid cell: `floor(world / cell_size)` on each axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    /// Cell column.
    pub x: i32,
    /// Cell row.
    pub y: i32,
}

impl GridKey {
    /// Create a key from cell coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
