//! Raycasting against registered obstacles for aiming and missile targeting.

use crate::collision::ObstacleTags;
use crate::obstacle_world::{ObstacleId, ObstacleRegistry};
use glam::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The obstacle that was hit.
    pub obstacle: ObstacleId,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl ObstacleRegistry {
    /// Nearest hit among obstacles carrying any of `tags`.
    ///
    /// Uses the query pipeline as of the last [`ObstacleRegistry::refresh`].
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        tags: ObstacleTags,
    ) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        if self.needs_refresh() {
            log::trace!("Raycast against a stale query pipeline");
        }

        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );
        let predicate = |_handle: ColliderHandle, collider: &Collider| {
            self.obstacle_for_collider(collider)
                .is_some_and(|o| o.tags.intersects(tags))
        };
        let filter = QueryFilter::default().predicate(&predicate);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .and_then(|(handle, intersection)| {
                let obstacle = self.obstacle_for_collider(&self.collider_set[handle])?;
                let point = ray.point_at(intersection.time_of_impact);
                Some(RaycastHit {
                    obstacle: obstacle.id,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                })
            })
    }

    /// Nearest hit among anything a missile can lock onto.
    pub fn raycast_targets(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RaycastHit> {
        self.raycast(
            origin,
            direction,
            max_distance,
            ObstacleTags::TARGET | ObstacleTags::TRAFFIC,
        )
    }

    /// Check if there's a clear line of sight between two points.
    pub fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        let direction = to - from;
        let distance = direction.length();
        if distance < 0.001 {
            return true;
        }
        self.raycast_targets(from, direction / distance, distance)
            .is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::ObstacleKind;

    fn street() -> (ObstacleRegistry, ObstacleId, ObstacleId) {
        let mut reg = ObstacleRegistry::new();
        let near = reg.add(
            ObstacleKind::Traffic,
            ObstacleTags::TARGET | ObstacleTags::TRAFFIC,
            Vec3::new(0.0, 0.4, 20.0),
            Vec3::new(0.9, 0.5, 1.9),
        );
        let far = reg.add(
            ObstacleKind::Building,
            ObstacleTags::TARGET,
            Vec3::new(0.0, 10.0, 60.0),
            Vec3::new(10.0, 10.0, 10.0),
        );
        reg.add(
            ObstacleKind::Aircraft,
            ObstacleTags::NONE,
            Vec3::new(0.0, 0.4, 10.0),
            Vec3::splat(1.0),
        );
        reg.refresh();
        (reg, near, far)
    }

    #[test]
    fn nearest_tagged_hit_wins() {
        let (reg, near, _) = street();
        let hit = reg
            .raycast_targets(Vec3::new(0.0, 0.4, 0.0), Vec3::Z, 100.0)
            .unwrap();
        assert_eq!(hit.obstacle, near);
        assert!((hit.distance - 18.1).abs() < 1e-3);
        assert!((hit.normal - Vec3::NEG_Z).length() < 1e-3);
    }

    #[test]
    fn tag_filter_skips_other_obstacles() {
        let (reg, near, far) = street();
        let hit = reg
            .raycast(Vec3::new(0.0, 0.4, 0.0), Vec3::Z, 100.0, ObstacleTags::TARGET)
            .unwrap();
        assert_eq!(hit.obstacle, near);

        let mut moved = reg;
        moved.set_center(near, Vec3::new(5.5, 0.4, 20.0));
        moved.refresh();
        let hit = moved
            .raycast_targets(Vec3::new(0.0, 0.4, 0.0), Vec3::Z, 100.0)
            .unwrap();
        assert_eq!(hit.obstacle, far);
    }

    #[test]
    fn misses_return_none() {
        let (reg, _, _) = street();
        assert!(reg.raycast_targets(Vec3::ZERO, Vec3::NEG_Z, 100.0).is_none());
        assert!(reg.raycast_targets(Vec3::ZERO, Vec3::ZERO, 100.0).is_none());
        assert!(reg.line_of_sight(Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.0, 0.4, 15.0)));
        assert!(!reg.line_of_sight(Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.0, 0.4, 30.0)));
    }
}
