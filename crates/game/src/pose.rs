//! Procedural limb pose for the on-foot suit.
//!
//! Each frame a target pose is picked from the movement mode and the current
//! pose eases toward it. Angles are radians about the limb's local X axis
//! unless noted; the presentation layer applies them to the rig.

use engine_core::lerp;
use std::f32::consts::PI;

/// Mode flags the pose is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseDrivers {
    pub moving: bool,
    pub flying: bool,
    pub aiming: bool,
    /// Remaining landing fraction: 1.0 on touchdown, 0.0 when recovered.
    pub landing: Option<f32>,
    /// Smoothed 0..1 movement factor; scales the walk cycle frequency.
    pub move_blend: f32,
    pub vertical_velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    pub torso_height: f32,
    pub torso_tilt: f32,
    /// About Y.
    pub torso_twist: f32,
    /// About Z.
    pub torso_roll: f32,
    pub head_pitch: f32,
    pub thigh_left: f32,
    pub thigh_right: f32,
    pub shin_left: f32,
    pub shin_right: f32,
    pub upper_arm_left: f32,
    pub upper_arm_right: f32,
    pub forearm_left: f32,
    pub forearm_right: f32,
    /// Jet thruster scale; zero when not flying.
    pub thrust: f32,
}

/// Standing height of the torso pivot.
const TORSO_REST: f32 = 1.3;

impl Default for LimbPose {
    fn default() -> Self {
        Self {
            torso_height: TORSO_REST,
            torso_tilt: 0.0,
            torso_twist: 0.0,
            torso_roll: 0.0,
            head_pitch: 0.0,
            thigh_left: 0.0,
            thigh_right: 0.0,
            shin_left: 0.0,
            shin_right: 0.0,
            upper_arm_left: 0.0,
            upper_arm_right: 0.0,
            forearm_left: 0.0,
            forearm_right: 0.0,
            thrust: 0.0,
        }
    }
}

impl LimbPose {
    /// Target pose for the given mode at animation time `t` (seconds).
    pub fn target(drivers: &PoseDrivers, t: f32) -> Self {
        let mut p = Self::default();
        let mut bob = 0.0;
        // Knee and elbow bends are positive here and negated on output.
        let (mut knee_l, mut knee_r, mut elbow_l, mut elbow_r) = (0.0, 0.0, 0.0, 0.0);
        let walk_freq = 12.0 * drivers.move_blend;

        if let Some(progress) = drivers.landing {
            if progress > 0.4 {
                // Impact crouch, easing up out of it.
                let alpha = (progress - 0.4) / 0.6;
                let ease = 1.0 - (1.0 - alpha).powi(3);
                p.torso_height = 0.35 + ease * 0.25;
                p.torso_tilt = 1.2 + ease * 0.1;
                p.thigh_left = 1.7;
                knee_l = 1.9;
                p.thigh_right = 0.6;
                knee_r = 1.3;
                p.upper_arm_left = -1.2;
                elbow_l = 1.8;
                p.upper_arm_right = 1.0;
                elbow_r = 0.8;
            } else {
                let alpha = progress / 0.4;
                p.torso_height = TORSO_REST - (alpha * PI).sin() * 0.15;
                p.torso_tilt = alpha * 1.2;
                p.thigh_left = alpha * 1.7;
                knee_l = alpha * 1.9;
                p.thigh_right = alpha * 0.6;
                knee_r = alpha * 1.3;
                p.upper_arm_left = alpha * -1.2;
                elbow_l = alpha * 1.8;
                p.upper_arm_right = alpha * 1.0;
                elbow_r = alpha * 0.8;
            }
        } else if drivers.aiming {
            p.upper_arm_right = -PI / 2.0;
            p.upper_arm_left = 0.3;
            elbow_l = 0.5;
            p.torso_tilt = 0.1;
            if drivers.moving {
                let cycle = t * walk_freq;
                p.thigh_left = cycle.sin() * 0.4;
                p.thigh_right = (cycle + PI).sin() * 0.4;
                knee_l = (cycle.cos() * 0.6).max(0.0);
                knee_r = ((cycle + PI).cos() * 0.6).max(0.0);
                bob = cycle.cos().abs() * 0.05;
                p.torso_twist = cycle.sin() * 0.1;
            }
        } else if drivers.flying {
            p.thigh_left = 0.2;
            p.thigh_right = 0.2;
            knee_l = 0.3;
            knee_r = 0.3;
            p.upper_arm_left = 0.5;
            p.upper_arm_right = 0.5;
            elbow_l = 0.4;
            elbow_r = 0.4;
            p.torso_tilt = if drivers.moving { 0.6 } else { 0.2 };
            bob = (t * 8.0).sin() * 0.06;
            p.head_pitch = -p.torso_tilt * 0.9;
        } else if drivers.moving {
            let cycle = t * walk_freq;
            let step = cycle.sin();
            let counter = (cycle + PI).sin();
            p.thigh_left = step * 0.7;
            p.thigh_right = counter * 0.7;
            knee_l = cycle.cos().max(0.0);
            knee_r = (cycle + PI).cos().max(0.0);
            p.upper_arm_left = counter * 0.6;
            p.upper_arm_right = step * 0.6;
            elbow_l = 0.4 + step.abs() * 0.5;
            elbow_r = 0.4 + counter.abs() * 0.5;
            bob = cycle.cos().abs() * 0.1;
            p.torso_tilt = 0.1;
            p.torso_twist = -step * 0.15;
            p.torso_roll = step * 0.05;
            p.head_pitch = step.abs() * 0.05;
        } else {
            let breath = (t * 1.5).sin();
            bob = breath * 0.02;
            p.upper_arm_left = 0.1 + breath * 0.05;
            p.upper_arm_right = -0.1 - breath * 0.05;
            elbow_l = 0.2;
            elbow_r = 0.2;
        }

        p.torso_height += bob;
        p.shin_left = -knee_l;
        p.shin_right = -knee_r;
        p.forearm_left = -elbow_l;
        p.forearm_right = -elbow_r;
        if drivers.flying {
            let moving = if drivers.moving { 0.6 } else { 0.0 };
            p.thrust = 0.8 + drivers.vertical_velocity.abs() * 20.0 + moving;
        }
        p
    }

    /// Ease toward `target`. The torso snaps faster while landing.
    pub fn blend_toward(&mut self, target: &LimbPose, landing: bool) {
        let torso = if landing { 0.4 } else { 0.15 };
        self.torso_height = lerp(self.torso_height, target.torso_height, torso);
        self.torso_tilt = lerp(self.torso_tilt, target.torso_tilt, torso);
        self.torso_twist = lerp(self.torso_twist, target.torso_twist, torso);
        self.torso_roll = lerp(self.torso_roll, target.torso_roll, torso);
        self.head_pitch = lerp(self.head_pitch, target.head_pitch, 0.1);

        let limbs = 0.2;
        self.thigh_left = lerp(self.thigh_left, target.thigh_left, limbs);
        self.thigh_right = lerp(self.thigh_right, target.thigh_right, limbs);
        self.shin_left = lerp(self.shin_left, target.shin_left, limbs);
        self.shin_right = lerp(self.shin_right, target.shin_right, limbs);
        self.upper_arm_left = lerp(self.upper_arm_left, target.upper_arm_left, limbs);
        self.upper_arm_right = lerp(self.upper_arm_right, target.upper_arm_right, limbs);
        self.forearm_left = lerp(self.forearm_left, target.forearm_left, limbs);
        self.forearm_right = lerp(self.forearm_right, target.forearm_right, limbs);
        self.thrust = target.thrust;
    }
}
