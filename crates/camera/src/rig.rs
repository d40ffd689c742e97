//! Follow camera with exponential smoothing toward a desired pose.

use engine_core::lerp;
use glam::Vec3;

/// Resting field of view in degrees.
pub const BASE_FOV: f32 = 65.0;

/// Where the camera is and what it looks at this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, -10.0),
            look_at: Vec3::ZERO,
            fov: BASE_FOV,
        }
    }
}

/// Per-frame blend rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSettings {
    /// Fraction of the remaining distance covered per frame by position and look-at.
    pub follow_blend: f32,
    pub fov_blend: f32,
    pub base_fov: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            follow_blend: 0.15,
            fov_blend: 0.1,
            base_fov: BASE_FOV,
        }
    }
}

/// Point on a sphere of `radius` around `center`, raised by `height`.
///
/// `yaw` is measured like actor headings (zero is +Z). `pitch` lifts the
/// point above the horizontal.
pub fn orbit_point(center: Vec3, yaw: f32, pitch: f32, radius: f32, height: f32) -> Vec3 {
    center
        + Vec3::new(
            yaw.sin() * radius * pitch.cos(),
            height + pitch.sin() * radius,
            yaw.cos() * radius * pitch.cos(),
        )
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    pose: CameraPose,
    pub settings: RigSettings,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraPose::default())
    }
}

impl CameraRig {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            settings: RigSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RigSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Ease position and look-at toward the desired values. `jitter` is added to both targets.
    pub fn chase(&mut self, desired_position: Vec3, desired_look_at: Vec3, jitter: Vec3) {
        let t = self.settings.follow_blend;
        self.pose.position = self.pose.position.lerp(desired_position + jitter, t);
        self.pose.look_at = self.pose.look_at.lerp(desired_look_at + jitter, t);
    }

    /// Attach rigidly (cockpit / head cam). No smoothing.
    pub fn mount(&mut self, eye: Vec3, look_at: Vec3, jitter: Vec3) {
        self.pose.position = eye + jitter;
        self.pose.look_at = look_at + jitter;
    }

    /// Blend the field of view toward `base_fov + extra_degrees`.
    pub fn kick_fov(&mut self, extra_degrees: f32) {
        let target = self.settings.base_fov + extra_degrees;
        self.pose.fov = lerp(self.pose.fov, target, self.settings.fov_blend);
    }
}
