//! Obstacle tags and the one-sided collision resolver.

use crate::aabb::Aabb;
use crate::obstacle_world::{Obstacle, ObstacleRegistry};
use engine_core::RetriggerGate;
use glam::Vec3;

/// Tag bits carried by registered obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObstacleTags(u32);

impl ObstacleTags {
    pub const NONE: Self = Self(0);
    /// Participates in collision and missile targeting.
    pub const TARGET: Self = Self(1 << 0);
    /// Moving road traffic; targetable and rate-limited on collision.
    pub const TRAFFIC: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for ObstacleTags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// What a registered node represents in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Building,
    Traffic,
    Aircraft,
}

/// Tuning for collision response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    /// Actor box is shrunk by this much on every face to avoid false positives.
    pub shrink: f32,
    /// Impacts at or below this speed only separate, without bounce or damage.
    pub min_impact: f32,
    /// Speed multiplier applied on impact (negative reverses).
    pub bounce: f32,
    /// Damage per unit of impact speed.
    pub damage_per_speed: f32,
    /// Fixed push along obstacle-centre → actor-centre.
    pub push_distance: f32,
    /// Minimum seconds between two traffic impacts on the same actor.
    pub traffic_retrigger: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            shrink: 0.2,
            min_impact: 0.05,
            bounce: -0.4,
            damage_per_speed: 60.0,
            push_distance: 0.4,
            traffic_retrigger: 0.5,
        }
    }
}

/// Gap left between actor and obstacle after separation.
const SEPARATION_MARGIN: f32 = 1e-3;

/// An actor the resolver can push around.
pub trait CollisionActor {
    /// World-space box of the actor before shrinking.
    fn bounds(&self) -> Aabb;
    fn speed(&self) -> f32;
    fn set_speed(&mut self, speed: f32);
    fn translate(&mut self, delta: Vec3);
    fn add_damage(&mut self, amount: f32);
    /// Rate limiter for traffic impacts.
    fn traffic_gate(&mut self) -> &mut RetriggerGate;
}

/// Summary of one resolver pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// Impacts that bounced the actor and dealt damage.
    pub impacts: u32,
    /// Slow overlaps that were only separated.
    pub separations: u32,
    pub damage_dealt: f32,
    pub strongest_impact: f32,
}

impl CollisionReport {
    pub fn hit(&self) -> bool {
        self.impacts > 0
    }
}

/// Test the actor against every collidable obstacle and resolve overlaps.
/// Obstacles are never mutated.
pub fn resolve_collisions<A: CollisionActor>(
    actor: &mut A,
    registry: &ObstacleRegistry,
    now: f32,
    settings: &CollisionSettings,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    for obstacle in registry.targets() {
        resolve_one(actor, obstacle, now, settings, &mut report);
    }
    report
}

fn resolve_one<A: CollisionActor>(
    actor: &mut A,
    obstacle: &Obstacle,
    now: f32,
    settings: &CollisionSettings,
    report: &mut CollisionReport,
) {
    let obstacle_box = obstacle.aabb();
    let actor_box = actor.bounds().shrunk(settings.shrink);
    if !actor_box.intersects(&obstacle_box) {
        return;
    }

    let impact = actor.speed().abs();
    let traffic = obstacle.tags.contains(ObstacleTags::TRAFFIC);
    let gated = traffic && !actor.traffic_gate().is_open(now, settings.traffic_retrigger);

    if impact > settings.min_impact && !gated {
        actor.set_speed(actor.speed() * settings.bounce);
        actor.add_damage(impact * settings.damage_per_speed);

        let push_dir = (actor_box.center() - obstacle_box.center()).normalize_or_zero();
        actor.translate(push_dir * settings.push_distance);
        if traffic {
            actor.traffic_gate().trigger(now);
        }

        report.impacts += 1;
        report.damage_dealt += impact * settings.damage_per_speed;
        report.strongest_impact = report.strongest_impact.max(impact);
        log::debug!(
            "Impact with {:?} {:?} at speed {:.3}",
            obstacle.kind,
            obstacle.id,
            impact
        );
    } else {
        report.separations += 1;
    }

    // The fixed push is not always enough; finish along the shallowest axis.
    let actor_box = actor.bounds().shrunk(settings.shrink);
    if let Some(push) = actor_box.horizontal_separation(&obstacle_box) {
        actor.translate(push + push.normalize_or_zero() * SEPARATION_MARGIN);
    }
}
