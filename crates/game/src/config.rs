//! Game configuration (input, world, tuning tables). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mouse sensitivity multiplier (1.0 = default). Scales orbit drags and steering.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Start in the cockpit view instead of the chase camera.
    #[serde(default)]
    pub first_person: bool,
    /// Seed for the city layout and camera shake.
    #[serde(default = "default_world_seed")]
    pub world_seed: u64,
    /// Seconds between tutorial tip refreshes.
    #[serde(default = "default_tip_interval")]
    pub tip_interval_secs: f32,
    /// Length of the scripted headless session in seconds.
    #[serde(default = "default_demo_seconds")]
    pub demo_seconds: f32,
    #[serde(default)]
    pub vehicle: VehicleTuning,
    #[serde(default)]
    pub character: CharacterTuning,
    #[serde(default)]
    pub camera: CameraTuning,
    #[serde(default)]
    pub collision: CollisionTuning,
}

fn default_sensitivity() -> f32 {
    1.0
}
fn default_world_seed() -> u64 {
    0x5EED
}
fn default_tip_interval() -> f32 {
    60.0
}
fn default_demo_seconds() -> f32 {
    40.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            first_person: false,
            world_seed: default_world_seed(),
            tip_interval_secs: default_tip_interval(),
            demo_seconds: default_demo_seconds(),
            vehicle: VehicleTuning::default(),
            character: CharacterTuning::default(),
            camera: CameraTuning::default(),
            collision: CollisionTuning::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data)
    }

    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(data)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Err(e) = self.save_to(&path) {
            log::warn!("Could not write config: {}", e);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let s = self.to_ron()?;
        std::fs::write(path, s).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

/// Arcade car constants. Per-frame values: nothing here is scaled by frame time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub base_max_speed: f32,
    pub boost_max_speed: f32,
    pub base_acceleration: f32,
    pub boost_acceleration: f32,
    pub friction: f32,
    pub brake_factor: f32,
    pub gravity: f32,
    pub lift_force: f32,
    pub hover_friction: f32,
    pub turn_speed: f32,
    /// Heading change per unit of steering times speed.
    pub turn_gain: f32,
    /// k in the steering attenuation 1 / (1 + (k * normalized speed)^2).
    pub steering_stiffness: f32,
    pub steering_blend: f32,
    /// Acceleration scales by (1 - damage / damage_falloff).
    pub damage_falloff: f32,
    /// Boost is unavailable at or above this much damage.
    pub boost_damage_ceiling: f32,
    pub accel_pitch_forward: f32,
    pub accel_pitch_reverse: f32,
    pub accel_pitch_brake: f32,
    pub half_extents: [f32; 3],
    /// Height of the body box centre above the car origin.
    pub body_height: f32,
    pub spawn_position: [f32; 3],
    /// Displayed km/h per unit of speed.
    pub speedometer_scale: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            base_max_speed: 2.0,
            boost_max_speed: 5.0,
            base_acceleration: 0.008,
            boost_acceleration: 0.035,
            friction: 0.995,
            brake_factor: 0.92,
            gravity: 0.005,
            lift_force: 0.012,
            hover_friction: 0.9,
            turn_speed: 0.025,
            turn_gain: 8.0,
            steering_stiffness: 5.0,
            steering_blend: 0.2,
            damage_falloff: 400.0,
            boost_damage_ceiling: 90.0,
            accel_pitch_forward: -0.05,
            accel_pitch_reverse: 0.03,
            accel_pitch_brake: 0.08,
            half_extents: [1.0, 0.65, 2.2],
            body_height: 0.65,
            spawn_position: [0.0, 0.0, 10.0],
            speedometer_scale: 200.0,
        }
    }
}

/// On-foot suit constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub gravity: f32,
    pub lift_force: f32,
    pub air_friction: f32,
    pub fly_speed: f32,
    pub walk_speed: f32,
    pub aim_speed: f32,
    /// Landing duration in 60 Hz frames.
    pub landing_frames: f32,
    /// Landing only triggers when flight ends below this height.
    pub landing_height: f32,
    pub heading_blend: f32,
    pub aim_yaw_gain: f32,
    pub move_blend: f32,
    pub fire_cooldown_secs: f32,
    pub missile_speed: f32,
    pub missile_life_frames: u32,
    pub missile_spawn_offset: [f32; 3],
    /// Aim ray screen point in normalized device coordinates.
    pub aim_screen_offset: [f32; 2],
    pub aim_range: f32,
    pub half_extents: [f32; 3],
    pub body_height: f32,
    /// Collisions slower than this only separate; walking into a wall is harmless.
    pub min_impact_speed: f32,
    /// How close the character must be to the car to climb in.
    pub enter_range: f32,
    /// Where the character appears when leaving the car, in car space.
    pub exit_offset: [f32; 3],
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            gravity: 0.005,
            lift_force: 0.015,
            air_friction: 0.95,
            fly_speed: 0.4,
            walk_speed: 0.15,
            aim_speed: 0.07,
            landing_frames: 45.0,
            landing_height: 0.2,
            heading_blend: 0.15,
            aim_yaw_gain: 0.5,
            move_blend: 0.1,
            fire_cooldown_secs: 0.25,
            missile_speed: 2.0,
            missile_life_frames: 100,
            missile_spawn_offset: [0.4, 1.4, 0.0],
            aim_screen_offset: [0.0, 0.1],
            aim_range: 1000.0,
            half_extents: [0.4, 0.9, 0.4],
            body_height: 0.9,
            min_impact_speed: 0.3,
            enter_range: 5.0,
            exit_offset: [2.5, 0.0, 0.0],
        }
    }
}

/// Camera framing, shake and FOV constants for both actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub follow_blend: f32,
    pub fov_blend: f32,
    pub base_fov: f32,
    /// Impact shake lost per second.
    pub trauma_decay: f32,

    pub car_radius: f32,
    pub car_height: f32,
    pub car_boost_radius: f32,
    pub car_boost_height: f32,
    /// Look-at offset in car space.
    pub car_look_bias: [f32; 3],
    pub car_fov_kick: f32,
    pub car_orbit_relax: f32,
    pub car_head_offset: [f32; 3],
    pub car_look_distance: f32,
    pub car_look_drop: f32,
    pub car_shake_forward: f32,
    pub car_shake_boost: f32,
    pub car_shake_impact: f32,

    pub character_radius: f32,
    pub character_height: f32,
    pub character_fly_radius: f32,
    pub character_fly_height: f32,
    pub character_landing_radius: f32,
    pub character_landing_height: f32,
    pub character_aim_radius: f32,
    pub character_aim_height: f32,
    pub character_pitch: f32,
    pub character_aim_pitch: f32,
    pub character_look_height: f32,
    pub character_aim_look_height: f32,
    pub character_fov_kick: f32,
    pub character_orbit_relax: f32,
    pub character_head_offset: [f32; 3],
    pub character_look_distance: f32,
    pub character_shake_forward: f32,
    pub character_shake_idle: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            follow_blend: 0.15,
            fov_blend: 0.1,
            base_fov: 65.0,
            trauma_decay: 2.0,

            car_radius: 9.0,
            car_height: 3.5,
            car_boost_radius: 13.0,
            car_boost_height: 4.2,
            car_look_bias: [0.0, 1.0, 2.0],
            car_fov_kick: 22.0,
            car_orbit_relax: 0.1,
            car_head_offset: [0.4, 1.4, 0.2],
            car_look_distance: 10.0,
            car_look_drop: -0.1,
            car_shake_forward: 0.015,
            car_shake_boost: 0.04,
            car_shake_impact: 0.3,

            character_radius: 6.0,
            character_height: 2.5,
            character_fly_radius: 8.0,
            character_fly_height: 1.5,
            character_landing_radius: 5.0,
            character_landing_height: 1.0,
            character_aim_radius: 4.0,
            character_aim_height: 1.8,
            character_pitch: 0.2,
            character_aim_pitch: 0.1,
            character_look_height: 1.5,
            character_aim_look_height: 1.7,
            character_fov_kick: 15.0,
            character_orbit_relax: 0.05,
            character_head_offset: [0.0, 1.6, 0.2],
            character_look_distance: 10.0,
            character_shake_forward: 0.03,
            character_shake_idle: 0.01,
        }
    }
}

/// Collision response constants shared by both actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub shrink: f32,
    pub min_impact_speed: f32,
    pub bounce: f32,
    pub damage_per_speed: f32,
    pub push_distance: f32,
    pub traffic_retrigger_secs: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        let s = physics::CollisionSettings::default();
        Self {
            shrink: s.shrink,
            min_impact_speed: s.min_impact,
            bounce: s.bounce,
            damage_per_speed: s.damage_per_speed,
            push_distance: s.push_distance,
            traffic_retrigger_secs: s.traffic_retrigger,
        }
    }
}

impl CollisionTuning {
    pub fn settings(&self) -> physics::CollisionSettings {
        physics::CollisionSettings {
            shrink: self.shrink,
            min_impact: self.min_impact_speed,
            bounce: self.bounce,
            damage_per_speed: self.damage_per_speed,
            push_distance: self.push_distance,
            traffic_retrigger: self.traffic_retrigger_secs,
        }
    }
}
