// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain records exchanged with the host, with the host's field names.

use serde::{Deserialize, Serialize};
use understory_grid::{
    BoundingBox, Category, CollisionCheck, CollisionReport, Diagnostics, GameObject, Nearby,
    ObjectId,
};
use understory_vehicle::{VehicleInput, VehicleState};

/// `{minX, minY, maxX, maxY}`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBoxRecord {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl From<BBoxRecord> for BoundingBox {
    fn from(r: BBoxRecord) -> Self {
        Self::new(r.min_x, r.min_y, r.max_x, r.max_y)
    }
}

impl From<BoundingBox> for BBoxRecord {
    fn from(b: BoundingBox) -> Self {
        Self {
            min_x: b.min_x,
            min_y: b.min_y,
            max_x: b.max_x,
            max_y: b.max_y,
        }
    }
}

/// One scene object as sent to `updateGrid`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Host id.
    pub id: i64,
    /// Reference point x.
    pub x: f64,
    /// Reference point y (the scene's z).
    pub y: f64,
    /// Footprint.
    pub bbox: BBoxRecord,
    /// Category label, e.g. `"vehicles"`. Missing means unknown.
    #[serde(default)]
    pub category: String,
}

impl From<&ObjectRecord> for GameObject {
    fn from(r: &ObjectRecord) -> Self {
        Self::new(
            ObjectId(r.id),
            r.x,
            r.y,
            r.bbox.into(),
            Category::from_label(&r.category),
        )
    }
}

/// `{id, bbox}` entry of `batchCheckCollisions`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionCheckRecord {
    /// Id excluded from its own results.
    pub id: i64,
    /// Box to test.
    pub bbox: BBoxRecord,
}

impl From<&CollisionCheckRecord> for CollisionCheck {
    fn from(r: &CollisionCheckRecord) -> Self {
        Self {
            id: ObjectId(r.id),
            bbox: r.bbox.into(),
        }
    }
}

/// `{id, collisions}` entry returned by `batchCheckCollisions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionResultRecord {
    /// Checked id.
    pub id: i64,
    /// Colliding ids.
    pub collisions: Vec<i64>,
}

impl From<CollisionReport> for CollisionResultRecord {
    fn from(r: CollisionReport) -> Self {
        Self {
            id: r.id.0,
            collisions: ids(r.collisions),
        }
    }
}

/// `{id, distance}` search hit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyRecord {
    /// Matching id.
    pub id: i64,
    /// Distance from the query point.
    pub distance: f64,
}

impl From<Nearby> for NearbyRecord {
    fn from(n: Nearby) -> Self {
        Self {
            id: n.id.0,
            distance: n.distance,
        }
    }
}

/// Grid statistics as reported to the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsRecord {
    /// Non-empty cells.
    pub cell_count: usize,
    /// Distinct registered objects.
    pub object_count: usize,
    /// Sum of per-cell list lengths.
    pub cell_entry_count: usize,
    /// Entries per cell.
    pub avg_objects_per_cell: f64,
    /// Occupancy false positives observed by queries.
    pub alias_event_count: u64,
    /// Occupancy index wraps; non-zero means the filter needs retuning.
    pub index_wrap_count: u64,
}

impl From<Diagnostics> for DiagnosticsRecord {
    fn from(d: Diagnostics) -> Self {
        Self {
            cell_count: d.cell_count,
            object_count: d.object_count,
            cell_entry_count: d.cell_entry_count,
            avg_objects_per_cell: d.avg_objects_per_cell,
            alias_event_count: d.alias_event_count,
            index_wrap_count: d.index_wrap_count,
        }
    }
}

/// Car state with the host's snake_case names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarStateRecord {
    /// Position x.
    pub x: f64,
    /// Position z.
    pub z: f64,
    /// Heading in radians.
    pub rotation_y: f64,
    /// Velocity x.
    pub velocity_x: f64,
    /// Velocity z.
    pub velocity_z: f64,
}

impl From<CarStateRecord> for VehicleState {
    fn from(r: CarStateRecord) -> Self {
        Self {
            x: r.x,
            z: r.z,
            heading: r.rotation_y,
            velocity_x: r.velocity_x,
            velocity_z: r.velocity_z,
        }
    }
}

impl From<VehicleState> for CarStateRecord {
    fn from(s: VehicleState) -> Self {
        Self {
            x: s.x,
            z: s.z,
            rotation_y: s.heading,
            velocity_x: s.velocity_x,
            velocity_z: s.velocity_z,
        }
    }
}

/// Driver input flags; missing flags read as released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRecord {
    /// Throttle.
    pub forward: bool,
    /// Brake / reverse.
    pub backward: bool,
    /// Steer left.
    pub left: bool,
    /// Steer right.
    pub right: bool,
}

impl From<InputRecord> for VehicleInput {
    fn from(r: InputRecord) -> Self {
        Self {
            forward: r.forward,
            backward: r.backward,
            left: r.left,
            right: r.right,
        }
    }
}

pub(crate) fn ids(ids: Vec<ObjectId>) -> Vec<i64> {
    ids.into_iter().map(|id| id.0).collect()
}
