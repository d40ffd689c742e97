//! Immutable per-frame control snapshot consumed by the simulation.

use glam::Vec2;

/// Everything the simulation reads from the player for one frame.
///
/// Level flags mirror held keys/buttons, toggles persist until flipped again,
/// and edges (`interact`, `camera_toggle`) are true for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub brake: bool,
    pub boost: bool,
    pub fly_mode: bool,
    pub up: bool,
    pub down: bool,
    pub interact: bool,
    pub aiming: bool,
    pub firing: bool,
    pub indicator_left: bool,
    pub indicator_right: bool,
    pub repair: bool,
    pub respawn: bool,
    pub camera_toggle: bool,
    /// Orbit yaw (x) / pitch (y) accumulated by pointer drags this frame.
    pub orbit_delta: Vec2,
    /// An orbit drag is in progress.
    pub dragging: bool,
}

impl ControlSnapshot {
    /// No input at all. Used for actors the player is not controlling.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Steering axis: +1 left, -1 right, 0 when neither (or both) are held.
    pub fn steer_axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Local movement intent: x = left(+)/right(-), y = forward(+)/backward(-). Not normalized.
    pub fn move_axes(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.forward {
            v.y += 1.0;
        }
        if self.backward {
            v.y -= 1.0;
        }
        if self.left {
            v.x += 1.0;
        }
        if self.right {
            v.x -= 1.0;
        }
        v
    }
}
