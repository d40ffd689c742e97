//! Obstacle registry, overlap resolution and ray queries for Skyline Drive.

pub mod aabb;
pub mod collision;
pub mod obstacle_world;
pub mod raycast;

pub use aabb::*;
pub use collision::*;
pub use obstacle_world::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::ColliderHandle;
