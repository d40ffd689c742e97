//! Road traffic: cars that drive their lane at constant speed and wrap around.

use glam::Vec3;
use physics::ObstacleId;

/// Ride height of traffic car centres.
pub const TRAFFIC_HEIGHT: f32 = 0.4;
pub const TRAFFIC_HALF_EXTENTS: Vec3 = Vec3::new(0.9, 0.3, 1.9);

/// Cars leaving the far end of the road reappear at the other end.
pub const WRAP_NEAR: f32 = 200.0;
pub const WRAP_FAR: f32 = -600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficCar {
    pub obstacle: ObstacleId,
    pub lane: f32,
    pub z: f32,
    /// Units per frame along +Z (negative drives toward -Z).
    pub speed: f32,
}

impl TrafficCar {
    pub fn new(obstacle: ObstacleId, lane: f32, z: f32, speed: f32) -> Self {
        Self {
            obstacle,
            lane,
            z,
            speed,
        }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.lane, TRAFFIC_HEIGHT, self.z)
    }

    /// Heading the car faces, matching its direction of travel.
    pub fn heading(&self) -> f32 {
        if self.speed < 0.0 {
            std::f32::consts::PI
        } else {
            0.0
        }
    }

    pub fn advance(&mut self) {
        self.z += self.speed;
        if self.speed > 0.0 && self.z > WRAP_NEAR {
            self.z = WRAP_FAR;
        }
        if self.speed < 0.0 && self.z < WRAP_FAR {
            self.z = WRAP_NEAR;
        }
    }
}
