// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Host`] facade and its JSON request dispatcher.

use serde::{Deserialize, Serialize};
use understory_grid::{Category, CollisionCheck, GameObject, ObjectId, SpatialWorld, distance};
use understory_vehicle::{VehicleParams, integrate};

use crate::config::EngineConfig;
use crate::error::{BridgeError, Result};
use crate::records::{
    BBoxRecord, CarStateRecord, CollisionCheckRecord, CollisionResultRecord, DiagnosticsRecord,
    InputRecord, NearbyRecord, ObjectRecord, ids,
};

/// One spatial world plus vehicle tuning, driven through plain records.
///
/// Every method is a synchronous call that runs to completion. The host decides when to
/// call [`update_grid`](Self::update_grid); queries in between see the last batch.
#[derive(Debug, Default)]
pub struct Host {
    world: SpatialWorld,
    vehicle: VehicleParams,
}

impl Host {
    /// Validate `config`, then build a host from it.
    ///
    /// Out-of-range values are reported as [`BridgeError::InvalidConfig`] instead of
    /// reaching the grid.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world: SpatialWorld::new(config.grid),
            vehicle: config.vehicle,
        })
    }

    /// The underlying world.
    pub fn world(&self) -> &SpatialWorld {
        &self.world
    }

    /// Rebuild the index from the full object list.
    pub fn update_grid(&self, objects: &[ObjectRecord]) -> bool {
        self.world.update(objects.iter().map(GameObject::from));
        true
    }

    /// Ids colliding with `bbox`, excluding `id`.
    pub fn check_collision(&self, id: i64, bbox: BBoxRecord) -> Vec<i64> {
        ids(self.world.check_collision(ObjectId(id), bbox.into()))
    }

    /// [`check_collision`](Self::check_collision) for each entry.
    pub fn batch_check_collisions(
        &self,
        checks: &[CollisionCheckRecord],
    ) -> Vec<CollisionResultRecord> {
        let checks: Vec<CollisionCheck> = checks.iter().map(CollisionCheck::from).collect();
        self.world
            .batch_check_collisions(&checks)
            .into_iter()
            .map(CollisionResultRecord::from)
            .collect()
    }

    /// Nearest object labelled `category` strictly within `max_distance`.
    pub fn find_nearest_object(
        &self,
        x: f64,
        y: f64,
        category: &str,
        max_distance: f64,
    ) -> Option<NearbyRecord> {
        let category = Category::from_label(category);
        self.world
            .find_nearest_object(x, y, &category, max_distance)
            .map(NearbyRecord::from)
    }

    /// Objects within `radius`, optionally restricted to one category label.
    pub fn find_objects_in_radius(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        category: Option<&str>,
    ) -> Vec<NearbyRecord> {
        let category = category.map(Category::from_label);
        self.world
            .find_objects_in_radius(x, y, radius, category.as_ref())
            .into_iter()
            .map(NearbyRecord::from)
            .collect()
    }

    /// Grid statistics.
    pub fn get_diagnostics(&self) -> DiagnosticsRecord {
        self.world.diagnostics().into()
    }

    /// Advance one car by one tick.
    pub fn integrate_vehicle(&self, car: CarStateRecord, input: InputRecord) -> CarStateRecord {
        integrate(car.into(), input.into(), &self.vehicle).into()
    }

    /// Euclidean distance between two points.
    pub fn calc_distance(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        distance(x1, y1, x2, y2)
    }

    /// Decode a JSON [`Request`], run it, and encode the response as JSON.
    ///
    /// "Not found" results encode as `null`.
    pub fn dispatch(&self, request: &str) -> Result<String> {
        let request: Request = serde_json::from_str(request).map_err(BridgeError::Decode)?;
        log::trace!("dispatch {}", request.name());
        let response = match request {
            Request::UpdateGrid { objects } => encode(&self.update_grid(&objects)),
            Request::CheckCollision { id, bbox } => encode(&self.check_collision(id, bbox)),
            Request::BatchCheckCollisions { checks } => {
                encode(&self.batch_check_collisions(&checks))
            }
            Request::FindNearestObject {
                x,
                y,
                category,
                max_distance,
            } => encode(&self.find_nearest_object(x, y, &category, max_distance)),
            Request::FindObjectsInRadius {
                x,
                y,
                radius,
                category,
            } => encode(&self.find_objects_in_radius(x, y, radius, category.as_deref())),
            Request::GetDiagnostics => encode(&self.get_diagnostics()),
            Request::IntegrateVehicle { car, input } => {
                encode(&self.integrate_vehicle(car, input))
            }
            Request::CalcDistance { x1, y1, x2, y2 } => {
                encode(&self.calc_distance(x1, y1, x2, y2))
            }
        };
        response.map_err(BridgeError::Encode)
    }
}

fn encode<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// A boundary call, tagged by `"op"`.
///
/// ```json
/// {"op": "findNearestObject", "x": 0, "y": 0, "category": "vehicles", "maxDistance": 10}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Rebuild the index.
    UpdateGrid {
        /// Full object list.
        objects: Vec<ObjectRecord>,
    },
    /// Single collision check.
    CheckCollision {
        /// Id to exclude.
        id: i64,
        /// Box to test.
        bbox: BBoxRecord,
    },
    /// Batched collision checks.
    BatchCheckCollisions {
        /// Checks, answered in order.
        checks: Vec<CollisionCheckRecord>,
    },
    /// Nearest object of a category.
    FindNearestObject {
        /// Query point x.
        x: f64,
        /// Query point y.
        y: f64,
        /// Category label.
        category: String,
        /// Exclusive search bound.
        max_distance: f64,
    },
    /// Objects within a radius.
    FindObjectsInRadius {
        /// Query point x.
        x: f64,
        /// Query point y.
        y: f64,
        /// Inclusive radius.
        radius: f64,
        /// Optional category label.
        #[serde(default)]
        category: Option<String>,
    },
    /// Grid statistics.
    GetDiagnostics,
    /// One vehicle tick.
    IntegrateVehicle {
        /// Current state.
        car: CarStateRecord,
        /// Controls for this tick.
        #[serde(default)]
        input: InputRecord,
    },
    /// Distance between two points.
    CalcDistance {
        /// First point x.
        x1: f64,
        /// First point y.
        y1: f64,
        /// Second point x.
        x2: f64,
        /// Second point y.
        y2: f64,
    },
}

impl Request {
    /// The wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateGrid { .. } => "updateGrid",
            Self::CheckCollision { .. } => "checkCollision",
            Self::BatchCheckCollisions { .. } => "batchCheckCollisions",
            Self::FindNearestObject { .. } => "findNearestObject",
            Self::FindObjectsInRadius { .. } => "findObjectsInRadius",
            Self::GetDiagnostics => "getDiagnostics",
            Self::IntegrateVehicle { .. } => "integrateVehicle",
            Self::CalcDistance { .. } => "calcDistance",
        }
    }
}
