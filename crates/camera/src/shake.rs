//! Camera shake: per-frame random jitter scaled by activity and impact trauma.

use glam::Vec3;
use rand::prelude::*;

/// Jitter source with a decaying trauma term for impacts.
///
/// Sustained shake (engine rumble, boost, flight) is passed in each frame and
/// stops as soon as the caller stops passing it. Impact trauma is stored and
/// falls off linearly over time.
#[derive(Debug, Clone)]
pub struct ScreenShake {
    trauma: f32,
    /// Trauma lost per second.
    decay: f32,
    last_intensity: f32,
    rng: StdRng,
}

impl ScreenShake {
    pub fn new(seed: u64, decay: f32) -> Self {
        Self {
            trauma: 0.0,
            decay,
            last_intensity: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Register an impact. Trauma never stacks past the strongest kick.
    pub fn kick(&mut self, amount: f32) {
        self.trauma = self.trauma.max(amount);
    }

    pub fn update(&mut self, dt: f32) {
        self.trauma = (self.trauma - self.decay * dt.max(0.0)).max(0.0);
    }

    pub fn trauma(&self) -> f32 {
        self.trauma
    }

    /// Intensity of the most recent [`ScreenShake::sample`].
    pub fn intensity(&self) -> f32 {
        self.last_intensity
    }

    /// Draw this frame's jitter. Each axis is uniform in `[-i/2, i/2)` with
    /// `i = (sustained + trauma) * scale`.
    pub fn sample(&mut self, sustained: f32, scale: f32) -> Vec3 {
        let intensity = ((sustained + self.trauma) * scale).max(0.0);
        self.last_intensity = intensity;
        if intensity == 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(
            (self.rng.gen::<f32>() - 0.5) * intensity,
            (self.rng.gen::<f32>() - 0.5) * intensity,
            (self.rng.gen::<f32>() - 0.5) * intensity,
        )
    }
}
