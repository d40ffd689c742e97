//! Procedural generation for the city scene: buildings, traffic and the airfield.

pub mod city;
pub mod traffic;

pub use city::*;
pub use traffic::*;
