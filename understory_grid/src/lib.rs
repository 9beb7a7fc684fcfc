// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: a ground-plane spatial index for per-tick collision and proximity queries.
//!
//! Scene objects are projected onto a 2D plane and described by an axis-aligned
//! [`BoundingBox`], a reference point and a [`Category`].
//! A [`SpatialWorld`] bundles three structures that are always rebuilt together:
//!
//! - [`SpatialGrid`]: a uniform hash grid mapping each cell to the ids overlapping it.
//! - [`OccupancyFilter`]: a fixed-size hashed bit array checked before every cell lookup.
//!   It may report an empty cell as occupied (hash aliasing) but never the reverse.
//! - [`ObjectCache`]: the authoritative id → [`GameObject`] snapshot table.
//!
//! On top of that sit exact AABB collision tests ([`SpatialWorld::check_collision`],
//! [`SpatialWorld::batch_check_collisions`]) and proximity queries
//! ([`SpatialWorld::find_nearest_object`], [`SpatialWorld::find_objects_in_radius`]).
//!
//! The host calls [`SpatialWorld::update`] once per tick with the full object list, then
//! issues any number of queries before the next update. There is no incremental
//! maintenance at the world level: every update is a full rebuild.
//!
//! # Example
//!
//! ```rust
//! use understory_grid::{BoundingBox, Category, GameObject, ObjectId, SpatialWorld};
//!
//! let world = SpatialWorld::default();
//! world.update([
//!     GameObject::new(ObjectId(1), 1.0, 1.0, BoundingBox::new(0.0, 0.0, 2.0, 2.0), Category::Building),
//!     GameObject::new(ObjectId(2), 2.0, 2.0, BoundingBox::new(1.0, 1.0, 3.0, 3.0), Category::Vehicle),
//! ]);
//!
//! // Box 1 overlaps box 2.
//! let hits = world.check_collision(ObjectId(1), BoundingBox::new(0.0, 0.0, 2.0, 2.0));
//! assert_eq!(hits, vec![ObjectId(2)]);
//!
//! // Closest vehicle within 10 units of the origin.
//! let car = world.find_nearest_object(0.0, 0.0, &Category::Vehicle, 10.0).unwrap();
//! assert_eq!(car.id, ObjectId(2));
//! ```
//!
//! ## Tuning
//!
//! Choose [`GridConfig::cell_size`] close to typical object extents. The occupancy
//! filter's [`index_wrap_count`](OccupancyFilter::index_wrap_count) should stay at zero;
//! a growing [`alias_event_count`](Diagnostics::alias_event_count) means the filter is
//! too small for the number of occupied cells.
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. Inverted boxes, negative radii and similar malformed
//! input are not validated.

pub mod cache;
pub mod category;
pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod grid;
pub mod occupancy;
pub mod search;
pub mod types;
pub mod world;

pub use cache::{GameObject, ObjectCache};
pub use category::{Category, CategoryMask};
pub use collision::{CollisionCheck, CollisionReport};
pub use config::GridConfig;
pub use diagnostics::Diagnostics;
pub use grid::{GridStats, SpatialGrid};
pub use occupancy::OccupancyFilter;
pub use search::{Nearby, distance};
pub use types::{BoundingBox, GridKey, ObjectId};
pub use world::SpatialWorld;
