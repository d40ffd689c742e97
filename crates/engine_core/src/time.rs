//! Time management for the game loop.
//!
//! The simulation is frame-rate dependent: every rendered frame runs exactly
//! one step with that frame's delta. There is no fixed-timestep accumulator.

use std::time::{Duration, Instant};

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame (wall-clock driven loops only).
    last_frame: Option<Instant>,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed simulated time.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            last_frame: None,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing from the wall clock at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = match self.last_frame {
            Some(last) => now - last,
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        self.record(delta);
    }

    /// Advance by an externally supplied delta (scripted or host-driven loops).
    pub fn advance(&mut self, dt_seconds: f32) {
        self.record(Duration::from_secs_f32(dt_seconds.max(0.0)));
    }

    fn record(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}
