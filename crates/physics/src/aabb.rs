//! Axis-aligned bounding boxes for actor/obstacle overlap tests.

use glam::Vec3;

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// World box enclosing a box of `half_extents` rotated by `heading` about Y.
    pub fn from_oriented(center: Vec3, half_extents: Vec3, heading: f32) -> Self {
        let (s, c) = (heading.sin().abs(), heading.cos().abs());
        let half = Vec3::new(
            c * half_extents.x + s * half_extents.z,
            half_extents.y,
            s * half_extents.x + c * half_extents.z,
        );
        Self::from_center_half_extents(center, half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Shrink every face inward by `amount`, never past the centre.
    pub fn shrunk(&self, amount: f32) -> Self {
        let center = self.center();
        let half = (self.half_extents() - Vec3::splat(amount)).max(Vec3::ZERO);
        Self::from_center_half_extents(center, half)
    }

    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Strict overlap test: touching faces do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Smallest horizontal (XZ) translation that moves `self` out of `other`.
    /// Returns `None` when the boxes do not overlap.
    pub fn horizontal_separation(&self, other: &Aabb) -> Option<Vec3> {
        if !self.intersects(other) {
            return None;
        }
        let push_pos_x = other.max.x - self.min.x;
        let push_neg_x = self.max.x - other.min.x;
        let push_pos_z = other.max.z - self.min.z;
        let push_neg_z = self.max.z - other.min.z;

        let x = if push_pos_x < push_neg_x { push_pos_x } else { -push_neg_x };
        let z = if push_pos_z < push_neg_z { push_pos_z } else { -push_neg_z };
        if x.abs() <= z.abs() {
            Some(Vec3::new(x, 0.0, 0.0))
        } else {
            Some(Vec3::new(0.0, 0.0, z))
        }
    }
}
