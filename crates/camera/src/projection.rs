//! Projection, screen rays and the GPU camera uniform.

use crate::rig::CameraPose;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self, fov_degrees: f32) -> Mat4 {
        Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl CameraPose {
    /// Unit view direction. Falls back to +Z when position and look-at coincide.
    pub fn forward(&self) -> Vec3 {
        let dir = (self.look_at - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            Vec3::Z
        } else {
            dir
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn view_projection(&self, projection: &Projection) -> Mat4 {
        projection.matrix(self.fov) * self.view_matrix()
    }

    /// Ray from the eye through a point given in normalized device coordinates
    /// (`(0, 0)` is the screen centre, +Y is up).
    pub fn screen_ray(&self, ndc: Vec2, projection: &Projection) -> Ray {
        let inverse = self.view_projection(projection).inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let direction = (far - self.position).normalize_or_zero();
        Ray {
            origin: self.position,
            direction: if direction == Vec3::ZERO {
                self.forward()
            } else {
                direction
            },
        }
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
    /// x = vertical FOV (radians), y = aspect, z = near, w = far.
    pub lens: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
            lens: [0.0; 4],
        }
    }

    pub fn update(&mut self, pose: &CameraPose, projection: &Projection) {
        let view = pose.view_matrix();
        let proj = projection.matrix(pose.fov);
        self.view = view.to_cols_array_2d();
        self.proj = proj.to_cols_array_2d();
        self.view_proj = (proj * view).to_cols_array_2d();
        let pos = pose.position;
        self.position = [pos.x, pos.y, pos.z, 1.0];
        self.lens = [
            pose.fov.to_radians(),
            projection.aspect,
            projection.near,
            projection.far,
        ];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
