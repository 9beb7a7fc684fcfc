// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact AABB collision queries, narrowed through the grid.

use crate::cache::ObjectCache;
use crate::types::{BoundingBox, ObjectId};
use crate::world::SpatialWorld;

/// One entry of a batched collision check.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionCheck {
    /// The moving object; never reported as colliding with itself.
    pub id: ObjectId,
    /// Box to test, typically the object's proposed footprint.
    pub bbox: BoundingBox,
}

/// Result of one [`CollisionCheck`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionReport {
    /// Id of the checked object.
    pub id: ObjectId,
    /// Registered objects whose box intersects the checked box.
    pub collisions: Vec<ObjectId>,
}

impl SpatialWorld {
    /// Ids of registered objects whose box intersects `bbox`, excluding `id` itself.
    ///
    /// Touching edges count as a collision. Candidates the cache does not know are skipped.
    pub fn check_collision(&self, id: ObjectId, bbox: BoundingBox) -> Vec<ObjectId> {
        let cache = self.cache.read();
        self.collisions_locked(&cache, id, bbox)
    }

    /// Run [`check_collision`](Self::check_collision) for each entry, in order.
    ///
    /// The cache lock is taken once for the whole batch.
    pub fn batch_check_collisions(&self, checks: &[CollisionCheck]) -> Vec<CollisionReport> {
        let cache = self.cache.read();
        checks
            .iter()
            .map(|check| CollisionReport {
                id: check.id,
                collisions: self.collisions_locked(&cache, check.id, check.bbox),
            })
            .collect()
    }

    fn collisions_locked(
        &self,
        cache: &ObjectCache,
        id: ObjectId,
        bbox: BoundingBox,
    ) -> Vec<ObjectId> {
        self.grid
            .query(bbox)
            .into_iter()
            .filter(|&candidate| candidate != id)
            .filter(|&candidate| {
                cache
                    .get(candidate)
                    .is_some_and(|other| bbox.intersects(&other.bbox))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::GameObject;
    use crate::category::Category;
    use crate::config::GridConfig;

    fn world(boxes: &[(i64, BoundingBox)]) -> SpatialWorld {
        let w = SpatialWorld::new(GridConfig::with_cell_size(10.0));
        w.update(boxes.iter().map(|&(id, b)| {
            GameObject::new(ObjectId(id), b.min_x, b.min_y, b, Category::Building)
        }));
        w
    }

    #[test]
    fn disjoint_boxes_in_one_cell_do_not_collide() {
        let w = world(&[
            (1, BoundingBox::new(0.0, 0.0, 2.0, 2.0)),
            (2, BoundingBox::new(5.0, 5.0, 7.0, 7.0)),
        ]);
        let mut hits = w.grid().query(BoundingBox::new(0.0, 0.0, 2.0, 2.0));
        hits.sort();
        // Both share cell (0, 0), so the broad phase reports both.
        assert_eq!(hits, vec![ObjectId(1), ObjectId(2)]);
        assert!(w.check_collision(ObjectId(1), BoundingBox::new(0.0, 0.0, 2.0, 2.0)).is_empty());
    }

    #[test]
    fn overlapping_boxes_collide_both_ways() {
        let w = world(&[
            (1, BoundingBox::new(0.0, 0.0, 2.0, 2.0)),
            (2, BoundingBox::new(1.0, 1.0, 3.0, 3.0)),
        ]);
        assert_eq!(
            w.check_collision(ObjectId(1), BoundingBox::new(0.0, 0.0, 2.0, 2.0)),
            vec![ObjectId(2)]
        );
        assert_eq!(
            w.check_collision(ObjectId(2), BoundingBox::new(1.0, 1.0, 3.0, 3.0)),
            vec![ObjectId(1)]
        );
    }

    #[test]
    fn never_reports_self() {
        let w = world(&[
            (1, BoundingBox::new(0.0, 0.0, 20.0, 20.0)),
            (2, BoundingBox::new(0.0, 0.0, 20.0, 20.0)),
            (3, BoundingBox::new(-5.0, -5.0, 1.0, 1.0)),
        ]);
        for id in 1..=4 {
            let hits = w.check_collision(ObjectId(id), BoundingBox::new(-10.0, -10.0, 30.0, 30.0));
            assert!(!hits.contains(&ObjectId(id)));
        }
    }

    #[test]
    fn touching_edges_collide_across_cells() {
        let w = world(&[(1, BoundingBox::new(10.0, 0.0, 12.0, 2.0))]);
        assert_eq!(
            w.check_collision(ObjectId(9), BoundingBox::new(8.0, 0.0, 10.0, 2.0)),
            vec![ObjectId(1)]
        );
    }

    #[test]
    fn unknown_candidates_are_skipped() {
        let w = world(&[(1, BoundingBox::new(0.0, 0.0, 2.0, 2.0))]);
        // Placed in the grid behind the cache's back.
        w.grid().insert(ObjectId(77), BoundingBox::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(
            w.check_collision(ObjectId(5), BoundingBox::new(1.0, 1.0, 1.5, 1.5)),
            vec![ObjectId(1)]
        );
    }

    #[test]
    fn batch_matches_individual_checks() {
        let w = world(&[
            (1, BoundingBox::new(0.0, 0.0, 2.0, 2.0)),
            (2, BoundingBox::new(1.0, 1.0, 3.0, 3.0)),
            (3, BoundingBox::new(30.0, 30.0, 31.0, 31.0)),
        ]);
        let checks = [
            CollisionCheck {
                id: ObjectId(1),
                bbox: BoundingBox::new(0.0, 0.0, 2.0, 2.0),
            },
            CollisionCheck {
                id: ObjectId(3),
                bbox: BoundingBox::new(30.0, 30.0, 31.0, 31.0),
            },
            CollisionCheck {
                id: ObjectId(4),
                bbox: BoundingBox::new(2.5, 2.5, 30.5, 30.5),
            },
        ];
        let reports = w.batch_check_collisions(&checks);
        assert_eq!(reports.len(), checks.len());
        for (check, report) in checks.iter().zip(&reports) {
            assert_eq!(report.id, check.id);
            let mut expected = w.check_collision(check.id, check.bbox);
            let mut got = report.collisions.clone();
            expected.sort();
            got.sort();
            assert_eq!(got, expected);
        }
        assert_eq!(reports[0].collisions, vec![ObjectId(2)]);
        assert!(reports[1].collisions.is_empty());
        let mut last = reports[2].collisions.clone();
        last.sort();
        assert_eq!(last, vec![ObjectId(2), ObjectId(3)]);
    }

    #[test]
    fn results_follow_batch_order_in_every_world() {
        let order = [4_i64, 15, 6, 5, 12, 0, 9, 3, 14, 1, 8, 11, 2, 13, 7, 10];
        let boxes: Vec<(i64, BoundingBox)> = order
            .iter()
            .map(|&id| (id, BoundingBox::new(0.0, 0.0, 1.0, 1.0)))
            .collect();
        let expected: Vec<ObjectId> = order.iter().map(|&id| ObjectId(id)).collect();
        for _ in 0..20 {
            let w = world(&boxes);
            let window = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
            assert_eq!(w.check_collision(ObjectId(99), window), expected);
            let report = w.batch_check_collisions(&[CollisionCheck {
                id: ObjectId(99),
                bbox: window,
            }]);
            assert_eq!(report[0].collisions, expected);
            let near: Vec<ObjectId> = w
                .find_objects_in_radius(0.0, 0.0, 5.0, None)
                .into_iter()
                .map(|n| n.id)
                .collect();
            assert_eq!(near, expected);
        }
    }
}
