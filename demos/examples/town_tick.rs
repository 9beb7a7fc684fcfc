// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Town tick.
//!
//! Builds a small town, rebuilds the index each tick while one car drives down the
//! main road, and prints what the car hits and what is near it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example town_tick`

use kurbo::Rect;
use understory_grid::{BoundingBox, Category, GameObject, ObjectId, SpatialWorld};
use understory_vehicle::{VehicleInput, VehicleParams, VehicleState, integrate};

const CAR: ObjectId = ObjectId(0);

fn scenery() -> Vec<GameObject> {
    let mut out = Vec::new();
    let mut id = 1;
    let mut push = |rect: Rect, category: Category| {
        let c = rect.center();
        out.push(GameObject::new(ObjectId(id), c.x, c.y, rect.into(), category));
        id += 1;
    };
    push(Rect::new(-2.0, -50.0, 2.0, 50.0), Category::Road);
    for i in 0..5 {
        let z = -40.0 + f64::from(i) * 20.0;
        push(Rect::new(4.0, z, 12.0, z + 8.0), Category::Building);
        push(Rect::new(-6.0, z + 2.0, -4.0, z + 4.0), Category::Tree);
    }
    push(Rect::new(-1.0, 20.0, 1.0, 22.0), Category::Prop);
    push(Rect::new(-30.0, -30.0, -10.0, 30.0), Category::Park);
    out
}

fn car_object(car: &VehicleState) -> GameObject {
    GameObject::new(
        CAR,
        car.x,
        car.z,
        BoundingBox::around(car.x, car.z, 1.0),
        Category::Vehicle,
    )
}

fn main() {
    env_logger::init();

    let world = SpatialWorld::default();
    let params = VehicleParams::default();
    let throttle = VehicleInput {
        forward: true,
        ..VehicleInput::NONE
    };
    let scenery = scenery();
    let mut car = VehicleState::at_rest(0.0, 0.0, 0.0);

    for tick in 0..200 {
        car = integrate(car, throttle, &params);
        let mut objects = scenery.clone();
        objects.push(car_object(&car));
        world.update(objects);

        if tick % 20 != 0 {
            continue;
        }
        let hits = world.check_collision(CAR, BoundingBox::around(car.x, car.z, 1.0));
        let tree = world.find_nearest_object(car.x, car.z, &Category::Tree, 15.0);
        let nearby = world.find_objects_in_radius(car.x, car.z, 10.0, None);
        println!(
            "tick {tick:3}: car at ({:.2}, {:.2}) speed {:.3}, touching {:?}, nearest tree {:?}, {} within 10",
            car.x,
            car.z,
            car.speed(),
            hits,
            tree.map(|t| t.id),
            nearby.len()
        );
    }

    let d = world.diagnostics();
    println!(
        "cells {}, objects {}, entries {}, avg {:.2}, aliases {}, wraps {}",
        d.cell_count,
        d.object_count,
        d.cell_entry_count,
        d.avg_objects_per_cell,
        d.alias_event_count,
        d.index_wrap_count
    );
}
