//! Camera rig: chase and cockpit views, orbit offset, shake and FOV kick.
//!
//! The rig only produces a [`CameraPose`] each frame; how it is drawn is up to
//! the presentation layer, which can upload a [`CameraUniform`].

pub mod orbit;
pub mod projection;
pub mod rig;
pub mod shake;

pub use orbit::*;
pub use projection::*;
pub use rig::*;
pub use shake::*;
