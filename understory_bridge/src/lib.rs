// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_bridge --heading-base-level=0

//! Understory Bridge: the host call boundary for [`understory_grid`] and [`understory_vehicle`].
//!
//! A scripting host or game loop talks to the engine through a [`Host`], either with typed
//! calls over plain [`records`] or by sending JSON requests to [`Host::dispatch`].
//! Records keep the host's field names (`minX`, `rotation_y`, ...) so objects can cross the
//! boundary without renaming; "not found" results come back as `None` or JSON `null`.
//!
//! Engine tuning lives in an [`EngineConfig`], loadable from TOML.
//!
//! ```rust
//! use understory_bridge::Host;
//!
//! let host = Host::default();
//! host.dispatch(r#"{"op": "updateGrid", "objects": [
//!     {"id": 7, "x": 1, "y": 1, "bbox": {"minX": 0, "minY": 0, "maxX": 2, "maxY": 2}, "category": "trees"}
//! ]}"#).unwrap();
//!
//! let out = host
//!     .dispatch(r#"{"op": "findNearestObject", "x": 0, "y": 0, "category": "tree", "maxDistance": 5}"#)
//!     .unwrap();
//! assert!(out.starts_with(r#"{"id":7,"#));
//!
//! let out = host
//!     .dispatch(r#"{"op": "findNearestObject", "x": 0, "y": 0, "category": "roads", "maxDistance": 5}"#)
//!     .unwrap();
//! assert_eq!(out, "null");
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod records;

pub use config::EngineConfig;
pub use error::{BridgeError, Result};
pub use host::{Host, Request};
pub use records::{
    BBoxRecord, CarStateRecord, CollisionCheckRecord, CollisionResultRecord, DiagnosticsRecord,
    InputRecord, NearbyRecord, ObjectRecord,
};
