//! Simulation context: owns every actor and runs one frame at a time.
//!
//! Per frame: actor switch and camera edges, then the controlled actor (the
//! other one idles), collision, camera rig, and finally a read-only
//! [`FrameSnapshot`] for the presentation layer.

use crate::character::Character;
use crate::config::GameConfig;
use crate::missiles::Missile;
use crate::pose::LimbPose;
use crate::telemetry::CarState;
use crate::vehicle::Vehicle;
use camera::{orbit_point, CameraPose, CameraRig, CameraView, Projection, RigSettings, ScreenShake};
use engine_core::{Time, Transform};
use glam::Vec3;
use input::ControlSnapshot;
use physics::{CollisionReport, CollisionSettings, ObstacleRegistry};
use std::f32::consts::PI;

/// Which actor the player is controlling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveActor {
    #[default]
    Vehicle,
    Character,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleRecord {
    pub transform: Transform,
    pub accel_pitch: f32,
    pub steering: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    pub transform: Transform,
    pub flying: bool,
    pub aiming: bool,
    pub moving: bool,
    /// Remaining landing fraction while recovering from touchdown.
    pub landing: Option<f32>,
    pub pose: LimbPose,
    pub aim_hit: Option<Vec3>,
    pub damage: f32,
}

/// Everything the presentation layer reads after a step.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time: f32,
    pub active: ActiveActor,
    pub view: CameraView,
    pub car: CarState,
    pub vehicle: VehicleRecord,
    pub character: CharacterRecord,
    pub missiles: Vec<Missile>,
    pub camera: CameraPose,
    /// Collision pass of the controlled actor this frame.
    pub collision: CollisionReport,
    pub shake: f32,
}

pub struct Simulation {
    config: GameConfig,
    clock: Time,
    pub vehicle: Vehicle,
    pub character: Character,
    active: ActiveActor,
    view: CameraView,
    rig: CameraRig,
    shake: ScreenShake,
    pub projection: Projection,
    collision: CollisionSettings,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let cam = &config.camera;
        let rig = CameraRig::default().with_settings(RigSettings {
            follow_blend: cam.follow_blend,
            fov_blend: cam.fov_blend,
            base_fov: cam.base_fov,
        });
        let shake = ScreenShake::new(config.world_seed, cam.trauma_decay);
        let view = if config.first_person {
            CameraView::FirstPerson
        } else {
            CameraView::ThirdPerson
        };
        Self {
            clock: Time::new(),
            vehicle: Vehicle::new(config.vehicle.clone()),
            character: Character::new(config.character.clone()),
            active: ActiveActor::Vehicle,
            view,
            rig,
            shake,
            projection: Projection::default(),
            collision: config.collision.settings(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn active(&self) -> ActiveActor {
        self.active
    }

    pub fn view(&self) -> CameraView {
        self.view
    }

    pub fn camera(&self) -> CameraPose {
        self.rig.pose()
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed_seconds()
    }

    /// Advance the whole simulation by one frame.
    pub fn step(&mut self, input: &ControlSnapshot, scene: &ObstacleRegistry, dt: f32) -> FrameSnapshot {
        self.clock.advance(dt);
        let now = self.clock.elapsed_seconds();

        if input.camera_toggle {
            self.view = self.view.toggled();
            log::info!("Camera view: {:?}", self.view);
        }
        if input.interact {
            self.switch_actor();
        }

        let idle = ControlSnapshot::idle();
        let (report, car_input) = match self.active {
            ActiveActor::Vehicle => {
                let report =
                    self.vehicle
                        .update(input, self.config.sensitivity, scene, now, &self.collision);
                self.character.update_parked(dt);
                (report, input)
            }
            ActiveActor::Character => {
                self.vehicle
                    .update(&idle, self.config.sensitivity, scene, now, &self.collision);
                let camera = self.rig.pose();
                let report = self.character.update(
                    input,
                    &camera,
                    &self.projection,
                    scene,
                    now,
                    dt,
                    &self.collision,
                );
                (report, &idle)
            }
        };

        if report.hit() {
            self.shake.kick(self.config.camera.car_shake_impact);
        }
        self.shake.update(dt);

        match self.active {
            ActiveActor::Vehicle => self.frame_vehicle(input),
            ActiveActor::Character => self.frame_character(input),
        }

        self.snapshot(car_input, report)
    }

    fn switch_actor(&mut self) {
        match self.active {
            ActiveActor::Vehicle => {
                let exit = self
                    .vehicle
                    .transform
                    .local_to_world(Vec3::from_array(self.character.tuning().exit_offset));
                self.character.place(exit, self.vehicle.transform.heading);
                self.active = ActiveActor::Character;
                log::info!("Left the car at {:?}", exit);
            }
            ActiveActor::Character => {
                let distance = self
                    .character
                    .position()
                    .distance(self.vehicle.position());
                if distance <= self.character.tuning().enter_range {
                    self.active = ActiveActor::Vehicle;
                    log::info!("Entered the car");
                } else {
                    log::debug!("Car out of reach ({:.1} away)", distance);
                }
            }
        }
    }

    fn frame_vehicle(&mut self, input: &ControlSnapshot) {
        let cam = &self.config.camera;
        let car = &mut self.vehicle;
        if input.dragging {
            car.orbit.apply_drag(input.orbit_delta);
        } else {
            car.orbit.relax(cam.car_orbit_relax);
        }

        let norm_speed = car.normalized_speed();
        let mut sustained = 0.0;
        if input.forward {
            sustained += cam.car_shake_forward;
        }
        if car.boosting {
            sustained += cam.car_shake_boost;
        }
        let jitter = self.shake.sample(sustained, 1.0 + norm_speed);

        let heading = car.transform.heading;
        match self.view {
            CameraView::ThirdPerson => {
                let (radius, height) = if car.boosting {
                    (cam.car_boost_radius, cam.car_boost_height)
                } else {
                    (cam.car_radius, cam.car_height)
                };
                let desired = orbit_point(
                    car.position(),
                    heading + car.orbit.yaw + PI,
                    car.orbit.pitch,
                    radius,
                    height,
                );
                let look = car
                    .transform
                    .local_to_world(Vec3::from_array(cam.car_look_bias));
                self.rig.chase(desired, look, jitter);
            }
            CameraView::FirstPerson => {
                let head = car
                    .transform
                    .local_to_world(Vec3::from_array(cam.car_head_offset));
                let ahead = Vec3::new(
                    heading.sin() * cam.car_look_distance,
                    cam.car_look_drop,
                    heading.cos() * cam.car_look_distance,
                );
                self.rig.mount(head, head + ahead, jitter);
            }
        }
        self.rig.kick_fov(norm_speed * cam.car_fov_kick);
    }

    fn frame_character(&mut self, input: &ControlSnapshot) {
        let cam = &self.config.camera;
        let c = &mut self.character;
        if input.dragging {
            c.orbit.apply_drag(input.orbit_delta);
        } else if !c.aiming {
            c.orbit.relax(cam.character_orbit_relax);
        }

        let activity = match (c.flying, c.moving) {
            (true, true) => 1.0,
            (true, false) => 0.2,
            (false, true) => 0.3,
            (false, false) => 0.0,
        };
        let rumble = if input.forward {
            cam.character_shake_forward
        } else {
            cam.character_shake_idle
        };
        let jitter = self.shake.sample(rumble * activity, 1.0);

        match self.view {
            CameraView::ThirdPerson => {
                let (radius, height) = if c.aiming {
                    (cam.character_aim_radius, cam.character_aim_height)
                } else if c.flying {
                    (cam.character_fly_radius, cam.character_fly_height)
                } else if c.is_landing() {
                    (cam.character_landing_radius, cam.character_landing_height)
                } else {
                    (cam.character_radius, cam.character_height)
                };
                // While aiming the orbit yaw already went into the heading.
                let (yaw, pitch, look_height) = if c.aiming {
                    (0.0, cam.character_aim_pitch, cam.character_aim_look_height)
                } else {
                    (c.orbit.yaw, cam.character_pitch, cam.character_look_height)
                };
                let p = c.position();
                let desired = orbit_point(
                    p,
                    c.transform.heading + PI + yaw,
                    pitch + c.orbit.pitch,
                    radius,
                    height,
                );
                self.rig.chase(desired, p + Vec3::Y * look_height, jitter);
            }
            CameraView::FirstPerson => {
                let head = c
                    .transform
                    .local_to_world(Vec3::from_array(cam.character_head_offset));
                let look = head + c.transform.forward() * cam.character_look_distance;
                self.rig.mount(head, look, jitter);
            }
        }

        let kick = if c.moving && c.flying {
            cam.character_fov_kick
        } else {
            0.0
        };
        self.rig.kick_fov(kick);
    }

    fn snapshot(&self, car_input: &ControlSnapshot, collision: CollisionReport) -> FrameSnapshot {
        let c = &self.character;
        FrameSnapshot {
            frame: self.clock.frame_count(),
            time: self.clock.elapsed_seconds(),
            active: self.active,
            view: self.view,
            car: self.vehicle.car_state(car_input),
            vehicle: VehicleRecord {
                transform: self.vehicle.transform,
                accel_pitch: self.vehicle.accel_pitch,
                steering: self.vehicle.steering,
            },
            character: CharacterRecord {
                transform: c.transform,
                flying: c.flying,
                aiming: c.aiming,
                moving: c.moving,
                landing: c.landing_progress(),
                pose: c.pose,
                aim_hit: c.aim_hit,
                damage: c.damage.value(),
            },
            missiles: c.missiles().to_vec(),
            camera: self.rig.pose(),
            collision,
            shake: self.shake.intensity(),
        }
    }
}
