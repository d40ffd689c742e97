//! Obstacle registry backed by a Rapier3D collider set.
//!
//! The scene provider registers every collidable or targetable node here as a
//! flat list of tagged boxes. The simulation only reads the registry; the
//! provider moves traffic and refreshes the query pipeline between steps.

use crate::aabb::Aabb;
use crate::collision::{ObstacleKind, ObstacleTags};
use glam::Vec3;
use rapier3d::prelude::*;

/// Stable index of an obstacle inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u32);

/// One registered scene node.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub tags: ObstacleTags,
    pub center: Vec3,
    pub half_extents: Vec3,
    collider: ColliderHandle,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }
}

/// Flat registry of tagged obstacles with ray-query support.
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
    dirty: bool,
}

impl Default for ObstacleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Add a static cuboid obstacle. No parent body; the collider is fixed in world.
    /// `center` is the world position of the box centre, `half_extents` its half sizes.
    pub fn add(
        &mut self,
        kind: ObstacleKind,
        tags: ObstacleTags,
        center: Vec3,
        half_extents: Vec3,
    ) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        let half = half_extents.abs();
        let collider = ColliderBuilder::cuboid(half.x as Real, half.y as Real, half.z as Real)
            .translation(vector![center.x, center.y, center.z])
            .user_data(id.0 as u128)
            .build();
        let collider = self.collider_set.insert(collider);
        self.obstacles.push(Obstacle {
            id,
            kind,
            tags,
            center,
            half_extents: half,
            collider,
        });
        self.dirty = true;
        id
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize)
    }

    /// Move an obstacle. Call [`ObstacleRegistry::refresh`] once all moves for the frame are done.
    pub fn set_center(&mut self, id: ObstacleId, center: Vec3) -> bool {
        let Some(obstacle) = self.obstacles.get_mut(id.0 as usize) else {
            log::warn!("set_center on unknown obstacle {:?}", id);
            return false;
        };
        obstacle.center = center;
        if let Some(collider) = self.collider_set.get_mut(obstacle.collider) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
        self.dirty = true;
        true
    }

    /// Update the query pipeline after obstacles were added or moved.
    pub fn refresh(&mut self) {
        if self.dirty {
            self.query_pipeline.update(&self.collider_set);
            self.dirty = false;
        }
    }

    /// True when moves have not yet been pushed to the query pipeline.
    pub fn needs_refresh(&self) -> bool {
        self.dirty
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Nodes that participate in collision.
    pub fn targets(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.tags.contains(ObstacleTags::TARGET))
    }

    /// Moving road traffic.
    pub fn traffic(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.tags.contains(ObstacleTags::TRAFFIC))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub(crate) fn obstacle_for_collider(&self, collider: &Collider) -> Option<&Obstacle> {
        self.obstacles.get(collider.user_data as usize)
    }
}
