//! User-controlled orbit offset and camera view selection.

use engine_core::lerp;
use glam::Vec2;

/// Lowest orbit pitch (looking up from below the actor).
pub const ORBIT_PITCH_MIN: f32 = -0.6;
/// Highest orbit pitch (looking down from above).
pub const ORBIT_PITCH_MAX: f32 = 1.2;

/// Which camera mode the rig renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraView {
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl CameraView {
    pub fn toggled(self) -> Self {
        match self {
            CameraView::ThirdPerson => CameraView::FirstPerson,
            CameraView::FirstPerson => CameraView::ThirdPerson,
        }
    }
}

/// Yaw/pitch applied on top of the automatic follow angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitOffset {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitOffset {
    /// Apply a drag delta (x = yaw, y = pitch). Pitch stays inside the clamp range.
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.yaw += delta.x;
        self.pitch = (self.pitch + delta.y).clamp(ORBIT_PITCH_MIN, ORBIT_PITCH_MAX);
    }

    /// Ease back toward the default view.
    pub fn relax(&mut self, rate: f32) {
        self.yaw = lerp(self.yaw, 0.0, rate);
        self.pitch = lerp(self.pitch, 0.0, rate);
    }

    /// Hand the accumulated yaw to the caller and zero it.
    pub fn take_yaw(&mut self) -> f32 {
        std::mem::take(&mut self.yaw)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
