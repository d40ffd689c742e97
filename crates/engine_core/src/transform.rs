//! Transform component for actors that only rotate about the vertical axis.

use glam::{Mat4, Quat, Vec3};

/// World placement of an actor: position plus heading (yaw, radians).
///
/// A heading of zero faces +Z. Positive headings turn toward +X, so the
/// forward vector is `(sin h, 0, cos h)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub heading: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: 0.0,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and heading.
    pub fn from_position_heading(position: Vec3, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Rotation quaternion for the heading.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position)
    }

    /// Get the forward direction (+Z rotated by heading).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    /// Get the left direction (+X at zero heading).
    pub fn left(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, -self.heading.sin())
    }

    /// Rotate a local-space offset into world space (no translation).
    pub fn rotate_local(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }

    /// Transform a local-space point into world space.
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotate_local(local)
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Move along the current heading.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Rotate around the Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.heading += angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_matches_rotation() {
        let t = Transform::from_position_heading(Vec3::ZERO, 0.7);
        let via_quat = t.rotation() * Vec3::Z;
        assert!((via_quat - t.forward()).length() < 1e-5);
        let left_quat = t.rotation() * Vec3::X;
        assert!((left_quat - t.left()).length() < 1e-5);
    }

    #[test]
    fn advance_moves_along_heading() {
        let mut t = Transform::from_position_heading(Vec3::new(1.0, 0.0, 1.0), std::f32::consts::FRAC_PI_2);
        t.advance(2.0);
        assert!((t.position - Vec3::new(3.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn local_to_world_applies_heading() {
        let t = Transform::from_position_heading(Vec3::new(0.0, 0.0, 10.0), std::f32::consts::PI);
        let p = t.local_to_world(Vec3::new(0.0, 1.0, 2.0));
        assert!((p - Vec3::new(0.0, 1.0, 8.0)).length() < 1e-4);
    }
}
