// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_grid::{
    BoundingBox, Category, CollisionCheck, GameObject, GridConfig, ObjectId, SpatialWorld,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const CATEGORIES: [Category; 7] = [
    Category::Vehicle,
    Category::Building,
    Category::Terrain,
    Category::Prop,
    Category::Road,
    Category::Tree,
    Category::Park,
];

/// A town of `count` objects scattered over a `size` x `size` plane.
fn gen_town(count: usize, size: f64, extent: f64) -> Vec<GameObject> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let x = rng.next_f64() * size;
            let y = rng.next_f64() * size;
            let w = extent * (0.5 + rng.next_f64());
            let h = extent * (0.5 + rng.next_f64());
            let category = CATEGORIES[i % CATEGORIES.len()].clone();
            GameObject::new(
                ObjectId(i as i64),
                x,
                y,
                BoundingBox::around(x, y, w.max(h) * 0.5),
                category,
            )
        })
        .collect()
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for &n in &[256usize, 1024, 4096] {
        let town = gen_town(n, 2000.0, 12.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("update_n{}", n), |b| {
            b.iter_batched(
                || (SpatialWorld::default(), town.clone()),
                |(world, town)| black_box(world.update(town)),
                BatchSize::SmallInput,
            )
        });
    }
    // Reuse one world across ticks, as the host does.
    let town = gen_town(4096, 2000.0, 12.0);
    let world = SpatialWorld::default();
    group.bench_function("update_steady_state_n4096", |b| {
        b.iter(|| black_box(world.update(town.iter().cloned())))
    });
    group.finish();
}

fn bench_collisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("collisions");
    for &cell in &[5.0f64, 10.0, 40.0] {
        let world = SpatialWorld::new(GridConfig::with_cell_size(cell));
        let town = gen_town(4096, 2000.0, 12.0);
        let checks: Vec<CollisionCheck> = town
            .iter()
            .take(256)
            .map(|obj| CollisionCheck {
                id: obj.id,
                bbox: obj.bbox,
            })
            .collect();
        world.update(town);
        group.throughput(Throughput::Elements(checks.len() as u64));
        group.bench_function(format!("single_cell{}", cell), |b| {
            b.iter(|| {
                let hits: usize = checks
                    .iter()
                    .map(|c| world.check_collision(c.id, c.bbox).len())
                    .sum();
                black_box(hits);
            })
        });
        group.bench_function(format!("batch_cell{}", cell), |b| {
            b.iter(|| black_box(world.batch_check_collisions(&checks)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let world = SpatialWorld::default();
    world.update(gen_town(4096, 2000.0, 12.0));
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let points: Vec<(f64, f64)> = (0..128)
        .map(|_| (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect();

    group.bench_function("nearest_vehicle", |b| {
        b.iter(|| {
            for &(x, y) in &points {
                black_box(world.find_nearest_object(x, y, &Category::Vehicle, 200.0));
            }
        })
    });
    for &r in &[10.0f64, 50.0, 200.0] {
        group.bench_function(format!("radius_r{}", r), |b| {
            b.iter(|| {
                for &(x, y) in &points {
                    black_box(world.find_objects_in_radius(x, y, r, None));
                }
            })
        });
    }
    group.finish();
}

fn bench_occupancy_sizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("occupancy_words");
    let town = gen_town(4096, 4000.0, 8.0);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let windows: Vec<BoundingBox> = (0..256)
        .map(|_| BoundingBox::around(rng.next_f64() * 4000.0, rng.next_f64() * 4000.0, 15.0))
        .collect();
    for &words in &[16usize, 512, 8192] {
        let world = SpatialWorld::new(GridConfig {
            occupancy_words: words,
            ..GridConfig::default()
        });
        world.update(town.iter().cloned());
        group.bench_function(format!("query_words{}", words), |b| {
            b.iter(|| {
                let hits: usize = windows.iter().map(|p| world.grid().query(*p).len()).sum();
                black_box(hits);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_collisions,
    bench_search,
    bench_occupancy_sizing
);
criterion_main!(benches);
