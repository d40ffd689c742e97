//! Shoulder missile launcher for the on-foot suit.

use engine_core::{Cooldown, FrameLifetime};
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MissileId(pub u64);

/// A straight-flying missile.
#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    pub id: MissileId,
    pub position: Vec3,
    /// Units per frame.
    pub velocity: Vec3,
    pub life: FrameLifetime,
    /// Clock time at launch.
    pub spawned_at: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LauncherSettings {
    pub cooldown_secs: f32,
    pub speed: f32,
    pub life_frames: u32,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: 0.25,
            speed: 2.0,
            life_frames: 100,
        }
    }
}

/// Owns the live missiles and the fire cooldown.
#[derive(Debug, Clone)]
pub struct MissileLauncher {
    missiles: Vec<Missile>,
    next_id: u64,
    cooldown: Cooldown,
    pub settings: LauncherSettings,
}

impl MissileLauncher {
    pub fn new(settings: LauncherSettings) -> Self {
        Self {
            missiles: Vec::new(),
            next_id: 0,
            cooldown: Cooldown::new(),
            settings,
        }
    }

    /// Count the cooldown down; call once per frame before [`MissileLauncher::try_fire`].
    pub fn update(&mut self, dt: f32) {
        self.cooldown.update(dt);
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown.is_ready()
    }

    /// Launch from `spawn` toward `aim_point`, or along `fallback_dir` when nothing is targeted.
    /// Returns `None` while the cooldown is running.
    pub fn try_fire(
        &mut self,
        spawn: Vec3,
        aim_point: Option<Vec3>,
        fallback_dir: Vec3,
        now: f32,
    ) -> Option<MissileId> {
        if !self.cooldown.is_ready() {
            return None;
        }
        let toward_target = aim_point
            .map(|target| (target - spawn).normalize_or_zero())
            .filter(|dir| *dir != Vec3::ZERO);
        let direction = toward_target.unwrap_or_else(|| fallback_dir.normalize_or_zero());
        if direction == Vec3::ZERO {
            log::debug!("Missile suppressed: no firing direction");
            return None;
        }

        let id = MissileId(self.next_id);
        self.next_id += 1;
        self.missiles.push(Missile {
            id,
            position: spawn,
            velocity: direction * self.settings.speed,
            life: FrameLifetime::new(self.settings.life_frames),
            spawned_at: now,
        });
        self.cooldown.trigger(self.settings.cooldown_secs);
        log::trace!("Missile {:?} launched from {:?}", id, spawn);
        Some(id)
    }

    /// Move every missile one frame and drop the ones whose lifetime ran out.
    pub fn advance(&mut self) {
        for m in &mut self.missiles {
            m.position += m.velocity;
            m.life.tick();
        }
        self.missiles.retain(|m| !m.life.is_expired());
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn len(&self) -> usize {
        self.missiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_counts_down_then_removes() {
        let mut launcher = MissileLauncher::new(LauncherSettings::default());
        launcher.try_fire(Vec3::ZERO, None, Vec3::Z, 0.0).unwrap();
        let mut last = launcher.missiles()[0].life.remaining;
        assert_eq!(last, 100);
        for frame in 1..100 {
            launcher.advance();
            let life = launcher.missiles()[0].life.remaining;
            assert_eq!(life, last - 1, "frame {}", frame);
            last = life;
        }
        assert_eq!(last, 1);
        launcher.advance();
        assert!(launcher.is_empty());
    }

    #[test]
    fn fallback_goes_along_camera_forward() {
        let mut launcher = MissileLauncher::new(LauncherSettings::default());
        let forward = Vec3::new(0.0, -0.2, 1.0);
        launcher.try_fire(Vec3::ONE, None, forward, 0.0);
        let v = launcher.missiles()[0].velocity;
        assert!((v - forward.normalize() * 2.0).length() < 1e-5);
    }

    #[test]
    fn locked_target_sets_heading() {
        let mut launcher = MissileLauncher::new(LauncherSettings::default());
        launcher.try_fire(Vec3::ZERO, Some(Vec3::new(10.0, 0.0, 0.0)), Vec3::Z, 0.0);
        assert!((launcher.missiles()[0].velocity - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn held_trigger_respects_cooldown() {
        let mut launcher = MissileLauncher::new(LauncherSettings::default());
        let dt = 1.0 / 60.0;
        let mut now = 0.0;
        for _ in 0..600 {
            launcher.update(dt);
            launcher.try_fire(Vec3::ZERO, None, Vec3::Z, now);
            launcher.advance();
            now += dt;
        }
        let times: Vec<f32> = launcher.missiles().iter().map(|m| m.spawned_at).collect();
        assert!(times.len() >= 6);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= 0.25 - 1e-4);
        }
    }

    #[test]
    fn ids_are_monotonic() {
        let mut launcher = MissileLauncher::new(LauncherSettings {
            cooldown_secs: 0.0,
            ..Default::default()
        });
        let a = launcher.try_fire(Vec3::ZERO, None, Vec3::Z, 0.0).unwrap();
        let b = launcher.try_fire(Vec3::ZERO, None, Vec3::Z, 0.0).unwrap();
        assert!(b > a);
    }

    #[test]
    fn degenerate_directions_do_not_fire() {
        let mut launcher = MissileLauncher::new(LauncherSettings::default());
        assert!(launcher.try_fire(Vec3::ZERO, None, Vec3::ZERO, 0.0).is_none());
        assert!(launcher.is_ready());
        // Target at the spawn point falls back to the camera direction.
        assert!(launcher.try_fire(Vec3::ONE, Some(Vec3::ONE), Vec3::X, 0.0).is_some());
    }
}
