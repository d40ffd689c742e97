//! On-foot suit: camera-relative walking, jet flight, landing recovery and aiming.

use crate::config::CharacterTuning;
use crate::missiles::{LauncherSettings, Missile, MissileLauncher};
use crate::pose::{LimbPose, PoseDrivers};
use camera::{CameraPose, OrbitOffset, Projection};
use engine_core::{approach_angle, lerp, DamageMeter, RetriggerGate, Transform};
use glam::{Quat, Vec2, Vec3};
use input::ControlSnapshot;
use physics::{resolve_collisions, Aabb, CollisionActor, CollisionReport, CollisionSettings, ObstacleRegistry};

/// Frames of landing recovery are counted at this rate regardless of frame time.
const LANDING_FRAME_RATE: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Character {
    pub transform: Transform,
    pub vertical_velocity: f32,
    pub flying: bool,
    was_flying: bool,
    pub aiming: bool,
    /// Remaining landing recovery in 60 Hz frames.
    landing_timer: f32,
    /// Smoothed 0..1 walk factor.
    pub move_blend: f32,
    pub moving: bool,
    /// Horizontal speed applied this frame.
    move_speed: f32,
    pub orbit: OrbitOffset,
    pub damage: DamageMeter,
    pub last_impact: Option<f32>,
    /// Where the aim ray currently lands, recomputed every frame while aiming.
    pub aim_hit: Option<Vec3>,
    pub pose: LimbPose,
    launcher: MissileLauncher,
    traffic_gate: RetriggerGate,
    anim_time: f32,
    tuning: CharacterTuning,
}

impl Character {
    pub fn new(tuning: CharacterTuning) -> Self {
        let launcher = MissileLauncher::new(LauncherSettings {
            cooldown_secs: tuning.fire_cooldown_secs,
            speed: tuning.missile_speed,
            life_frames: tuning.missile_life_frames,
        });
        Self {
            transform: Transform::default(),
            vertical_velocity: 0.0,
            flying: false,
            was_flying: false,
            aiming: false,
            landing_timer: 0.0,
            move_blend: 0.0,
            moving: false,
            move_speed: 0.0,
            orbit: OrbitOffset::default(),
            damage: DamageMeter::new(),
            last_impact: None,
            aim_hit: None,
            pose: LimbPose::default(),
            launcher,
            traffic_gate: RetriggerGate::new(),
            anim_time: 0.0,
            tuning,
        }
    }

    pub fn tuning(&self) -> &CharacterTuning {
        &self.tuning
    }

    /// Drop the character at a spot (leaving the car). Motion state is cleared.
    pub fn place(&mut self, position: Vec3, heading: f32) {
        self.transform = Transform::from_position_heading(position, heading);
        self.vertical_velocity = 0.0;
        self.landing_timer = 0.0;
        self.move_speed = 0.0;
        self.orbit.reset();
        self.aim_hit = None;
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn is_landing(&self) -> bool {
        self.landing_timer > 0.0
    }

    /// Remaining landing fraction, 1.0 at touchdown.
    pub fn landing_progress(&self) -> Option<f32> {
        self.is_landing()
            .then(|| (self.landing_timer / self.tuning.landing_frames).clamp(0.0, 1.0))
    }

    pub fn missiles(&self) -> &[Missile] {
        self.launcher.missiles()
    }

    /// One frame under player control.
    ///
    /// `camera` is the pose rendered last frame; it orients movement and the aim ray.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &ControlSnapshot,
        camera: &CameraPose,
        projection: &Projection,
        scene: &ObstacleRegistry,
        now: f32,
        dt: f32,
        collision: &CollisionSettings,
    ) -> CollisionReport {
        self.update_modes(input, dt);
        self.walk(input, camera);
        self.integrate_vertical(input);

        let settings = CollisionSettings {
            min_impact: collision.min_impact.max(self.tuning.min_impact_speed),
            ..*collision
        };
        let report = resolve_collisions(self, scene, now, &settings);
        if report.hit() {
            self.last_impact = Some(now);
        }

        self.aim_hit = if self.aiming {
            let screen = Vec2::from_array(self.tuning.aim_screen_offset);
            let ray = camera.screen_ray(screen, projection);
            scene
                .raycast_targets(ray.origin, ray.direction, self.tuning.aim_range)
                .map(|hit| hit.point)
        } else {
            None
        };

        self.launcher.update(dt);
        if self.aiming && input.firing {
            let spawn = self
                .transform
                .local_to_world(Vec3::from_array(self.tuning.missile_spawn_offset));
            self.launcher.try_fire(spawn, self.aim_hit, camera.forward(), now);
        }
        self.launcher.advance();

        self.animate(dt);
        report
    }

    /// Frame spent in the car: missiles in flight keep going.
    pub fn update_parked(&mut self, dt: f32) {
        self.launcher.update(dt);
        self.launcher.advance();
    }

    fn update_modes(&mut self, input: &ControlSnapshot, dt: f32) {
        if input.fly_mode != self.flying {
            log::info!("Flight {}", if input.fly_mode { "engaged" } else { "disengaged" });
        }
        self.flying = input.fly_mode;

        self.landing_timer = (self.landing_timer - dt * LANDING_FRAME_RATE).max(0.0);
        if self.was_flying
            && !self.flying
            && self.transform.position.y < self.tuning.landing_height
        {
            self.landing_timer = self.tuning.landing_frames;
            log::info!("Touchdown");
        }
        self.was_flying = self.flying;

        if input.aiming != self.aiming {
            log::debug!("Aim {}", if input.aiming { "raised" } else { "lowered" });
        }
        self.aiming = input.aiming;
    }

    fn walk(&mut self, input: &ControlSnapshot, camera: &CameraPose) {
        let t = &self.tuning;
        // Directional input is ignored until the touchdown recovery ends.
        let axes = if self.is_landing() {
            Vec2::ZERO
        } else {
            input.move_axes()
        };
        self.moving = axes != Vec2::ZERO;

        let speed = if self.flying {
            t.fly_speed
        } else if self.aiming {
            t.aim_speed
        } else {
            t.walk_speed
        };

        // Yaw of the camera's view across the ground.
        let to_actor = self.transform.position - camera.position;
        let camera_yaw = to_actor.x.atan2(to_actor.z);
        let direction =
            Quat::from_rotation_y(camera_yaw) * Vec3::new(axes.x, 0.0, axes.y).normalize_or_zero();

        if self.moving && direction != Vec3::ZERO {
            self.transform.translate(direction * speed);
            self.move_speed = speed;
            if !self.aiming {
                let facing = direction.x.atan2(direction.z);
                self.transform.heading =
                    approach_angle(self.transform.heading, facing, t.heading_blend);
            }
        } else {
            self.move_speed = 0.0;
        }

        let blend_target = if self.moving { 1.0 } else { 0.0 };
        self.move_blend = lerp(self.move_blend, blend_target, t.move_blend);

        if self.aiming {
            self.transform.heading += self.orbit.take_yaw() * t.aim_yaw_gain;
        }
    }

    fn integrate_vertical(&mut self, input: &ControlSnapshot) {
        let t = &self.tuning;
        let p = &mut self.transform.position;
        if self.flying {
            if input.up {
                self.vertical_velocity += t.lift_force;
            } else if input.down {
                self.vertical_velocity -= t.lift_force;
            } else {
                self.vertical_velocity *= t.air_friction;
            }
        } else if p.y > 0.0 {
            self.vertical_velocity -= t.gravity;
        } else {
            self.vertical_velocity = 0.0;
            p.y = 0.0;
        }

        p.y += self.vertical_velocity;
        if p.y < 0.0 {
            p.y = 0.0;
            self.vertical_velocity = 0.0;
        }
    }

    fn animate(&mut self, dt: f32) {
        self.anim_time += dt;
        let drivers = PoseDrivers {
            moving: self.moving,
            flying: self.flying,
            aiming: self.aiming,
            landing: self.landing_progress(),
            move_blend: self.move_blend,
            vertical_velocity: self.vertical_velocity,
        };
        let target = LimbPose::target(&drivers, self.anim_time);
        self.pose.blend_toward(&target, self.is_landing());
    }
}

impl CollisionActor for Character {
    fn bounds(&self) -> Aabb {
        Aabb::from_oriented(
            self.transform.position + Vec3::Y * self.tuning.body_height,
            Vec3::from_array(self.tuning.half_extents),
            self.transform.heading,
        )
    }

    fn speed(&self) -> f32 {
        self.move_speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    fn translate(&mut self, delta: Vec3) {
        self.transform.translate(delta);
        self.transform.position.y = self.transform.position.y.max(0.0);
    }

    fn add_damage(&mut self, amount: f32) {
        self.damage.add(amount);
    }

    fn traffic_gate(&mut self) -> &mut RetriggerGate {
        &mut self.traffic_gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::{ObstacleKind, ObstacleTags};

    const DT: f32 = 1.0 / 60.0;

    fn suit() -> Character {
        Character::new(CharacterTuning::default())
    }

    /// Chase camera sitting behind the origin, looking down +Z.
    fn behind() -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 2.5, -6.0),
            look_at: Vec3::new(0.0, 1.5, 0.0),
            fov: 65.0,
        }
    }

    fn step(c: &mut Character, input: &ControlSnapshot, camera: &CameraPose, scene: &ObstacleRegistry) {
        c.update(
            input,
            camera,
            &Projection::default(),
            scene,
            0.0,
            DT,
            &CollisionSettings::default(),
        );
    }

    fn forward() -> ControlSnapshot {
        ControlSnapshot {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn walk_fly_and_aim_speeds() {
        let scene = ObstacleRegistry::new();
        let cases = [
            (forward(), 0.15),
            (
                ControlSnapshot {
                    fly_mode: true,
                    ..forward()
                },
                0.4,
            ),
            (
                ControlSnapshot {
                    aiming: true,
                    ..forward()
                },
                0.07,
            ),
        ];
        for (input, expected) in cases {
            let mut c = suit();
            step(&mut c, &input, &behind(), &scene);
            let moved = Vec2::new(c.position().x, c.position().z);
            assert!((moved - Vec2::new(0.0, expected)).length() < 1e-5, "{:?}", moved);
        }
    }

    #[test]
    fn movement_follows_camera_view() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        // Camera on +X looking back toward the origin: forward is -X.
        let camera = CameraPose {
            position: Vec3::new(6.0, 2.0, 0.0),
            look_at: Vec3::ZERO,
            fov: 65.0,
        };
        step(&mut c, &forward(), &camera, &scene);
        assert!((c.position().x + 0.15).abs() < 1e-5);
        assert!(c.position().z.abs() < 1e-5);
        assert!(c.transform.heading < 0.0);
    }

    #[test]
    fn opposing_keys_do_not_move() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        let input = ControlSnapshot {
            forward: true,
            backward: true,
            ..Default::default()
        };
        step(&mut c, &input, &behind(), &scene);
        assert_eq!(c.position(), Vec3::ZERO);
        assert!(!c.moving);
        assert!(c.position().is_finite());
    }

    #[test]
    fn landing_after_low_flight() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        c.transform.position.y = 0.1;
        let hover = ControlSnapshot {
            fly_mode: true,
            ..Default::default()
        };
        step(&mut c, &hover, &behind(), &scene);
        assert!(!c.is_landing());

        step(&mut c, &forward(), &behind(), &scene);
        assert_eq!(c.landing_progress(), Some(1.0));
        let start = c.position();
        assert!((start.x).abs() < 1e-6 && (start.z).abs() < 1e-6);

        for _ in 0..43 {
            step(&mut c, &forward(), &behind(), &scene);
        }
        assert!(c.is_landing());
        assert!(c.position().z.abs() < 1e-6, "no horizontal motion while landing");

        for _ in 0..3 {
            step(&mut c, &forward(), &behind(), &scene);
        }
        assert!(!c.is_landing());
        assert!(c.position().z > 0.0);
    }

    #[test]
    fn landing_ignores_directional_input() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        c.transform.position.y = 0.1;
        let hover = ControlSnapshot {
            fly_mode: true,
            ..Default::default()
        };
        step(&mut c, &hover, &behind(), &scene);
        step(&mut c, &hover, &behind(), &scene);
        let blend_at_touchdown = c.move_blend;

        let strafe = ControlSnapshot {
            right: true,
            ..Default::default()
        };
        step(&mut c, &strafe, &behind(), &scene);
        assert!(c.is_landing());
        for _ in 0..20 {
            step(&mut c, &strafe, &behind(), &scene);
            assert!(c.is_landing());
            assert!(!c.moving);
            assert_eq!(c.transform.heading, 0.0);
            assert_eq!(c.move_speed, 0.0);
        }
        assert!(c.move_blend <= blend_at_touchdown);
        assert!(c.position().x.abs() < 1e-6);
    }

    #[test]
    fn no_landing_when_flight_ends_high() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        c.transform.position.y = 5.0;
        let hover = ControlSnapshot {
            fly_mode: true,
            ..Default::default()
        };
        step(&mut c, &hover, &behind(), &scene);
        step(&mut c, &ControlSnapshot::idle(), &behind(), &scene);
        assert!(!c.is_landing());
        assert!(c.vertical_velocity < 0.0);
    }

    #[test]
    fn jet_climb_and_ground_clamp() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        let climb = ControlSnapshot {
            fly_mode: true,
            up: true,
            ..Default::default()
        };
        let mut last = 0.0;
        for _ in 0..60 {
            step(&mut c, &climb, &behind(), &scene);
            assert!(c.position().y > last);
            last = c.position().y;
        }
        assert!((c.vertical_velocity - 0.9).abs() < 1e-4);

        let mut grounded = suit();
        step(&mut grounded, &ControlSnapshot::idle(), &behind(), &scene);
        assert_eq!(grounded.position().y, 0.0);
        assert_eq!(grounded.vertical_velocity, 0.0);
    }

    #[test]
    fn aiming_turns_with_orbit_yaw() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        c.orbit.yaw = 0.4;
        let aim = ControlSnapshot {
            aiming: true,
            ..Default::default()
        };
        step(&mut c, &aim, &behind(), &scene);
        assert!((c.transform.heading - 0.2).abs() < 1e-6);
        assert_eq!(c.orbit.yaw, 0.0);
    }

    #[test]
    fn aim_ray_finds_wall_ahead() {
        let mut scene = ObstacleRegistry::new();
        scene.add(
            ObstacleKind::Building,
            ObstacleTags::TARGET,
            Vec3::new(0.0, 10.0, 30.0),
            Vec3::new(20.0, 20.0, 1.0),
        );
        scene.refresh();
        let mut c = suit();
        let aim = ControlSnapshot {
            aiming: true,
            ..Default::default()
        };
        step(&mut c, &aim, &behind(), &scene);
        let hit = c.aim_hit.expect("wall in view");
        assert!((hit.z - 29.0).abs() < 1e-3);

        step(&mut c, &ControlSnapshot::idle(), &behind(), &scene);
        assert_eq!(c.aim_hit, None);
    }

    #[test]
    fn firing_needs_aim() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        let trigger_only = ControlSnapshot {
            firing: true,
            ..Default::default()
        };
        step(&mut c, &trigger_only, &behind(), &scene);
        assert!(c.missiles().is_empty());

        let armed = ControlSnapshot {
            firing: true,
            aiming: true,
            ..Default::default()
        };
        step(&mut c, &armed, &behind(), &scene);
        assert_eq!(c.missiles().len(), 1);
        assert_eq!(c.missiles()[0].life.remaining, 99);
    }

    #[test]
    fn missiles_keep_flying_while_parked() {
        let scene = ObstacleRegistry::new();
        let mut c = suit();
        let armed = ControlSnapshot {
            firing: true,
            aiming: true,
            ..Default::default()
        };
        step(&mut c, &armed, &behind(), &scene);
        let before = c.missiles()[0].position;
        c.update_parked(DT);
        assert!(c.missiles()[0].position != before);
    }

    #[test]
    fn walking_into_a_wall_is_harmless() {
        let mut scene = ObstacleRegistry::new();
        scene.add(
            ObstacleKind::Building,
            ObstacleTags::TARGET,
            Vec3::new(0.0, 10.0, 3.0),
            Vec3::new(5.0, 10.0, 2.0),
        );
        scene.refresh();
        let mut c = suit();
        for _ in 0..60 {
            step(&mut c, &forward(), &behind(), &scene);
        }
        assert_eq!(c.damage.value(), 0.0);
        // Shrunk suit box never ends up inside the wall.
        assert!(c.position().z < 1.0 - 0.4 + 0.2 + 1e-3);
    }
}
