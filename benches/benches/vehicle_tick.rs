// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_vehicle::{VehicleInput, VehicleParams, VehicleState, integrate};

fn bench_integrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("vehicle");
    let params = VehicleParams::default();
    let inputs = [
        VehicleInput {
            forward: true,
            ..VehicleInput::NONE
        },
        VehicleInput {
            forward: true,
            left: true,
            ..VehicleInput::NONE
        },
        VehicleInput {
            backward: true,
            ..VehicleInput::NONE
        },
        VehicleInput::NONE,
    ];
    let fleet: Vec<VehicleState> = (0..1024)
        .map(|i| VehicleState::at_rest(f64::from(i), 0.0, f64::from(i) * 0.01))
        .collect();

    group.throughput(Throughput::Elements(fleet.len() as u64));
    group.bench_function("tick_fleet_1024", |b| {
        b.iter(|| {
            let mut fleet = fleet.clone();
            for (i, car) in fleet.iter_mut().enumerate() {
                *car = integrate(*car, inputs[i % inputs.len()], &params);
            }
            black_box(fleet);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_integrate);
criterion_main!(benches);
