//! Skyline Drive gameplay: the car, the on-foot suit, missiles, the camera
//! stage and the per-frame [`Simulation`] that ties them to the city.

pub mod character;
pub mod config;
pub mod missiles;
pub mod pose;
pub mod session;
pub mod simulation;
pub mod telemetry;
pub mod tips;
pub mod vehicle;

pub use character::Character;
pub use config::{CameraTuning, CharacterTuning, CollisionTuning, ConfigError, GameConfig, VehicleTuning};
pub use missiles::{Missile, MissileId, MissileLauncher};
pub use pose::{LimbPose, PoseDrivers};
pub use session::{ScriptAction, ScriptedInput, Session, SessionSummary};
pub use simulation::{ActiveActor, CharacterRecord, FrameSnapshot, Simulation, VehicleRecord};
pub use telemetry::{CarState, Gear};
pub use tips::{CannedTips, DrivingTip, TipBoard, TipError, TipSource};
pub use vehicle::Vehicle;
