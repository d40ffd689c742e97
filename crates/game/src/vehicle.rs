//! Arcade car dynamics: hover flight, damage-limited acceleration and speed-sensitive steering.

use crate::config::VehicleTuning;
use crate::telemetry::{CarState, Readings};
use camera::OrbitOffset;
use engine_core::{lerp, DamageMeter, RetriggerGate, Transform};
use glam::Vec3;
use input::ControlSnapshot;
use physics::{resolve_collisions, Aabb, CollisionActor, CollisionReport, CollisionSettings, ObstacleRegistry};

/// The player car.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub transform: Transform,
    /// Signed speed along the heading, units per frame.
    pub speed: f32,
    /// Smoothed left/right input in [-1, 1].
    pub raw_steering: f32,
    pub steering: f32,
    pub vertical_velocity: f32,
    pub damage: DamageMeter,
    pub boosting: bool,
    /// Body pitch posture from accelerating and braking (radians).
    pub accel_pitch: f32,
    pub orbit: OrbitOffset,
    /// Clock time of the last impact.
    pub last_impact: Option<f32>,
    traffic_gate: RetriggerGate,
    tuning: VehicleTuning,
}

impl Vehicle {
    pub fn new(tuning: VehicleTuning) -> Self {
        let spawn = Vec3::from_array(tuning.spawn_position);
        Self {
            transform: Transform::from_position(spawn),
            speed: 0.0,
            raw_steering: 0.0,
            steering: 0.0,
            vertical_velocity: 0.0,
            damage: DamageMeter::new(),
            boosting: false,
            accel_pitch: 0.0,
            orbit: OrbitOffset::default(),
            last_impact: None,
            traffic_gate: RetriggerGate::new(),
            tuning,
        }
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    /// Put the car back on the spawn point with everything zeroed.
    pub fn respawn(&mut self) {
        self.transform = Transform::from_position(Vec3::from_array(self.tuning.spawn_position));
        self.speed = 0.0;
        self.vertical_velocity = 0.0;
        self.damage.repair();
        self.orbit.reset();
        log::info!("Car respawned");
    }

    /// Top speed for the current mode.
    pub fn max_speed(&self) -> f32 {
        if self.boosting {
            self.tuning.boost_max_speed
        } else {
            self.tuning.base_max_speed
        }
    }

    /// Speed magnitude relative to the boost ceiling.
    pub fn normalized_speed(&self) -> f32 {
        self.speed.abs() / self.tuning.boost_max_speed
    }

    /// Forward acceleration at the given damage. Zero once wrecked.
    pub fn acceleration(&self, damage: f32, boosting: bool) -> f32 {
        if damage >= engine_core::MAX_DAMAGE {
            return 0.0;
        }
        let base = if boosting {
            self.tuning.boost_acceleration
        } else {
            self.tuning.base_acceleration
        };
        base * (1.0 - damage / self.tuning.damage_falloff).max(0.0)
    }

    /// One frame of motion and collision. `input` must be idle when the player is on foot.
    pub fn update(
        &mut self,
        input: &ControlSnapshot,
        sensitivity: f32,
        scene: &ObstacleRegistry,
        now: f32,
        collision: &CollisionSettings,
    ) -> CollisionReport {
        if input.repair && self.damage.value() > 0.0 {
            self.damage.repair();
            log::info!("Car repaired");
        }
        if input.respawn {
            self.respawn();
        }

        self.boosting = input.boost
            && input.forward
            && self.damage.value() < self.tuning.boost_damage_ceiling;

        self.integrate_vertical(input);
        self.accelerate(input);
        self.steer(input, sensitivity);
        self.apply_friction(input);

        self.transform.rotate_y(self.steering * self.speed * self.tuning.turn_gain);
        self.transform.advance(self.speed);

        let report = resolve_collisions(self, scene, now, collision);
        if report.hit() {
            self.last_impact = Some(now);
        }
        report
    }

    fn integrate_vertical(&mut self, input: &ControlSnapshot) {
        let t = &self.tuning;
        if input.fly_mode {
            if input.up {
                self.vertical_velocity += t.lift_force;
            } else if input.down {
                self.vertical_velocity -= t.lift_force;
            } else {
                self.vertical_velocity *= t.hover_friction;
            }
        } else {
            self.vertical_velocity -= t.gravity;
        }

        self.transform.position.y += self.vertical_velocity;
        if self.transform.position.y < 0.0 {
            self.transform.position.y = 0.0;
            self.vertical_velocity = 0.0;
        }
    }

    fn accelerate(&mut self, input: &ControlSnapshot) {
        if self.damage.is_wrecked() {
            return;
        }
        let t = &self.tuning;
        if input.forward {
            self.speed += self.acceleration(self.damage.value(), self.boosting);
            self.accel_pitch = lerp(self.accel_pitch, t.accel_pitch_forward, 0.1);
        } else if input.backward {
            self.speed -= t.base_acceleration * 0.5;
            self.accel_pitch = lerp(self.accel_pitch, t.accel_pitch_reverse, 0.1);
        } else {
            self.accel_pitch = lerp(self.accel_pitch, 0.0, 0.1);
        }
    }

    fn steer(&mut self, input: &ControlSnapshot, sensitivity: f32) {
        let t = &self.tuning;
        let stiffness = self.normalized_speed() * t.steering_stiffness;
        let speed_factor = 1.0 / (1.0 + stiffness * stiffness);

        let smoothing = 0.05 + sensitivity * 0.15;
        self.raw_steering = lerp(self.raw_steering, input.steer_axis(), smoothing);

        let target = t.turn_speed * self.raw_steering * speed_factor * sensitivity;
        self.steering = lerp(self.steering, target, t.steering_blend);
    }

    fn apply_friction(&mut self, input: &ControlSnapshot) {
        let t = &self.tuning;
        self.speed *= t.friction;
        if input.brake {
            self.speed *= t.brake_factor;
            self.accel_pitch = lerp(self.accel_pitch, t.accel_pitch_brake, 0.2);
        }
        self.speed = self
            .speed
            .clamp(-t.base_max_speed / 3.0, self.max_speed());
    }

    pub fn car_state(&self, input: &ControlSnapshot) -> CarState {
        CarState::derive(
            Readings {
                speed: self.speed,
                steering: self.steering,
                damage: self.damage.value(),
                boosting: self.boosting,
                speedometer_scale: self.tuning.speedometer_scale,
            },
            input,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

impl CollisionActor for Vehicle {
    fn bounds(&self) -> Aabb {
        Aabb::from_oriented(
            self.transform.position + Vec3::Y * self.tuning.body_height,
            Vec3::from_array(self.tuning.half_extents),
            self.transform.heading,
        )
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
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
