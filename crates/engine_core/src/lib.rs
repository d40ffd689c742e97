//! Core engine types and utilities for Skyline Drive.
//!
//! This crate provides the foundational types used across all simulation crates:
//! - Heading-based transforms for ground/air actors
//! - Frame timing
//! - Saturating gameplay counters (damage, lifetimes, cooldowns)
//! - Interpolation helpers

pub mod components;
pub mod math;
pub mod time;
pub mod transform;

pub use components::*;
pub use math::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
