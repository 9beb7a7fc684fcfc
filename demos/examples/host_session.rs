// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host session.
//!
//! Drives the engine the way a scripting host would: JSON requests in, JSON responses
//! out. Pass a TOML config path as the first argument to override the defaults.
//!
//! Run:
//! - `cargo run -p understory_demos --example host_session`
//! - `cargo run -p understory_demos --example host_session -- engine.toml`

use understory_bridge::{EngineConfig, Host};

fn main() -> Result<(), understory_bridge::BridgeError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    log::info!("starting host with cell size {}", config.grid.cell_size);
    let host = Host::new(&config)?;

    let requests = [
        r#"{"op": "updateGrid", "objects": [
            {"id": 1, "x": 1, "y": 1, "bbox": {"minX": 0, "minY": 0, "maxX": 2, "maxY": 2}, "category": "buildings"},
            {"id": 2, "x": 2, "y": 2, "bbox": {"minX": 1, "minY": 1, "maxX": 3, "maxY": 3}, "category": "vehicles"},
            {"id": 3, "x": 30, "y": 40, "bbox": {"minX": 29, "minY": 39, "maxX": 31, "maxY": 41}, "category": "trees"}
        ]}"#,
        r#"{"op": "checkCollision", "id": 1, "bbox": {"minX": 0, "minY": 0, "maxX": 2, "maxY": 2}}"#,
        r#"{"op": "batchCheckCollisions", "checks": [
            {"id": 1, "bbox": {"minX": 0, "minY": 0, "maxX": 2, "maxY": 2}},
            {"id": 3, "bbox": {"minX": 29, "minY": 39, "maxX": 31, "maxY": 41}}
        ]}"#,
        r#"{"op": "findNearestObject", "x": 0, "y": 0, "category": "trees", "maxDistance": 100}"#,
        r#"{"op": "findNearestObject", "x": 0, "y": 0, "category": "roads", "maxDistance": 100}"#,
        r#"{"op": "findObjectsInRadius", "x": 0, "y": 0, "radius": 5}"#,
        r#"{"op": "integrateVehicle", "car": {"x": 0, "z": 0, "rotation_y": 0, "velocity_x": 0, "velocity_z": 0}, "input": {"forward": true, "left": true}}"#,
        r#"{"op": "calcDistance", "x1": 0, "y1": 0, "x2": 3, "y2": 4}"#,
        r#"{"op": "getDiagnostics"}"#,
    ];
    for request in requests {
        let response = host.dispatch(request)?;
        println!("{response}");
    }

    match host.dispatch(r#"{"op": "teleport"}"#) {
        Ok(out) => println!("unexpected: {out}"),
        Err(err) => println!("rejected: {err}"),
    }
    Ok(())
}
