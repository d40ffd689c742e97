//! City generation: a highway lined with buildings, road traffic and a parked aircraft.
//!
//! Buildings alternate sides of the road every 45 units along Z. Sizes come from a
//! seeded RNG so the same seed always produces the same skyline.

use crate::traffic::{TrafficCar, TRAFFIC_HALF_EXTENTS, TRAFFIC_HEIGHT};
use glam::Vec3;
use physics::{ObstacleId, ObstacleKind, ObstacleRegistry, ObstacleTags};
use rand::prelude::*;

pub const BUILDING_COUNT: usize = 45;
pub const BUILDING_SPACING: f32 = 45.0;
/// Distance from the road centreline to the near face of every building.
pub const ROAD_SETBACK: f32 = 25.0;
/// Half width of the paved road.
pub const ROAD_HALF_WIDTH: f32 = 8.0;
pub const AIRCRAFT_POSITION: Vec3 = Vec3::new(100.0, 150.0, -600.0);
/// Where the player car is placed on start and on respawn.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Colour palette shared by buildings; the presentation layer indexes into it.
pub const BUILDING_PALETTE: [[f32; 3]; 8] = [
    [1.0, 0.278, 0.341],
    [0.180, 0.835, 0.451],
    [0.118, 0.565, 1.0],
    [1.0, 0.647, 0.008],
    [0.925, 0.800, 0.408],
    [0.439, 0.631, 1.0],
    [0.325, 0.322, 0.929],
    [1.0, 0.420, 0.506],
];

/// One roadside building.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub obstacle: ObstacleId,
    pub center: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub palette_index: usize,
}

/// The parked aircraft, registered as one obstacle per part.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub position: Vec3,
    pub heading: f32,
    pub parts: Vec<ObstacleId>,
}

/// Local (centre, half extents) of each aircraft part: fuselage, wings, tail, cockpit.
const AIRCRAFT_PARTS: [(Vec3, Vec3); 4] = [
    (Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 5.0, 1.0)),
    (Vec3::new(0.0, 0.0, 0.0), Vec3::new(6.0, 0.1, 1.0)),
    (Vec3::new(0.0, 1.5, -4.0), Vec3::new(0.1, 1.5, 0.75)),
    (Vec3::new(0.0, 0.4, 4.5), Vec3::new(0.75, 0.25, 0.5)),
];

/// The generated scene layout.
#[derive(Debug, Clone)]
pub struct City {
    pub seed: u64,
    pub buildings: Vec<Building>,
    pub traffic: Vec<TrafficCar>,
    pub aircraft: Aircraft,
}

impl City {
    /// Generate the layout and register every node in `registry`.
    pub fn generate(seed: u64, registry: &mut ObstacleRegistry) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let buildings = (0..BUILDING_COUNT)
            .map(|i| {
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                let height = 20.0 + rng.gen::<f32>() * 50.0;
                let width = 14.0 + rng.gen::<f32>() * 10.0;
                let depth = 14.0 + rng.gen::<f32>() * 10.0;
                let palette_index = rng.gen_range(0..BUILDING_PALETTE.len());

                let center = Vec3::new(
                    side * (ROAD_SETBACK + width / 2.0),
                    height / 2.0,
                    (i as f32 - 22.0) * BUILDING_SPACING,
                );
                let obstacle = registry.add(
                    ObstacleKind::Building,
                    ObstacleTags::TARGET,
                    center,
                    Vec3::new(width, height, depth) * 0.5,
                );
                Building {
                    obstacle,
                    center,
                    width,
                    height,
                    depth,
                    palette_index,
                }
            })
            .collect();

        let traffic = [
            (5.5, -100.0, 0.2),
            (5.5, -400.0, 0.18),
            (-5.5, -200.0, -0.3),
            (-5.5, 0.0, -0.22),
        ]
        .into_iter()
        .map(|(lane, z, speed)| {
            let obstacle = registry.add(
                ObstacleKind::Traffic,
                ObstacleTags::TARGET | ObstacleTags::TRAFFIC,
                Vec3::new(lane, TRAFFIC_HEIGHT, z),
                TRAFFIC_HALF_EXTENTS,
            );
            TrafficCar::new(obstacle, lane, z, speed)
        })
        .collect();

        let aircraft = place_aircraft(registry, AIRCRAFT_POSITION, std::f32::consts::PI);
        registry.refresh();

        log::info!(
            "Generated city (seed {}): {} obstacles",
            seed,
            registry.len()
        );

        Self {
            seed,
            buildings,
            traffic,
            aircraft,
        }
    }

    /// Move traffic one frame and push the new positions into the registry.
    pub fn advance_traffic(&mut self, registry: &mut ObstacleRegistry) {
        for car in &mut self.traffic {
            car.advance();
            registry.set_center(car.obstacle, car.center());
        }
        registry.refresh();
    }

    /// Whether `position` lies on the paved road.
    pub fn is_on_road(position: Vec3) -> bool {
        position.x.abs() <= ROAD_HALF_WIDTH
    }
}

fn place_aircraft(registry: &mut ObstacleRegistry, position: Vec3, heading: f32) -> Aircraft {
    let rotation = glam::Quat::from_rotation_y(heading);
    let parts = AIRCRAFT_PARTS
        .iter()
        .map(|&(local, half)| {
            let center = position + rotation * local;
            let half = physics::Aabb::from_oriented(Vec3::ZERO, half, heading).half_extents();
            registry.add(ObstacleKind::Aircraft, ObstacleTags::TARGET, center, half)
        })
        .collect();
    Aircraft {
        position,
        heading,
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_generate_is_deterministic() {
        let mut r1 = ObstacleRegistry::new();
        let mut r2 = ObstacleRegistry::new();
        let c1 = City::generate(42, &mut r1);
        let c2 = City::generate(42, &mut r2);
        assert_eq!(c1.buildings, c2.buildings);
        assert_eq!(r1.len(), r2.len());
    }

    #[test]
    fn city_layout_counts_and_ranges() {
        let mut reg = ObstacleRegistry::new();
        let city = City::generate(7, &mut reg);
        assert_eq!(city.buildings.len(), BUILDING_COUNT);
        assert_eq!(city.traffic.len(), 4);
        assert_eq!(city.aircraft.parts.len(), 4);
        assert_eq!(reg.len(), BUILDING_COUNT + 4 + 4);
        assert_eq!(reg.traffic().count(), 4);
        assert!(!reg.needs_refresh());

        for (i, b) in city.buildings.iter().enumerate() {
            assert!((20.0..=70.0).contains(&b.height));
            assert!((14.0..=24.0).contains(&b.width));
            assert!((14.0..=24.0).contains(&b.depth));
            assert_eq!(b.center.z, (i as f32 - 22.0) * BUILDING_SPACING);
            assert_eq!(b.center.x > 0.0, i % 2 == 0);
            assert!((b.center.x.abs() - b.width / 2.0 - ROAD_SETBACK).abs() < 1e-4);
            assert!((b.center.y - b.height / 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn city_different_seed_different_skyline() {
        let heights = |seed| {
            let mut reg = ObstacleRegistry::new();
            City::generate(seed, &mut reg)
                .buildings
                .iter()
                .map(|b| b.height)
                .collect::<Vec<_>>()
        };
        assert_ne!(heights(1), heights(2));
    }

    #[test]
    fn spawn_point_is_clear_of_buildings() {
        let mut reg = ObstacleRegistry::new();
        City::generate(3, &mut reg);
        let car = physics::Aabb::from_center_half_extents(
            SPAWN_POSITION + Vec3::Y * 0.65,
            Vec3::new(1.0, 0.65, 2.2),
        );
        assert!(reg
            .iter()
            .filter(|o| o.kind == ObstacleKind::Building)
            .all(|o| !o.aabb().intersects(&car)));
        assert!(City::is_on_road(SPAWN_POSITION));
    }

    #[test]
    fn aircraft_is_rotated_half_turn() {
        let mut reg = ObstacleRegistry::new();
        let city = City::generate(3, &mut reg);
        let tail = reg.get(city.aircraft.parts[2]).unwrap();
        assert!((tail.center.z - (AIRCRAFT_POSITION.z + 4.0)).abs() < 1e-3);
        assert!((tail.half_extents.z - 0.75).abs() < 1e-3);
    }

    #[test]
    fn traffic_moves_in_registry() {
        let mut reg = ObstacleRegistry::new();
        let mut city = City::generate(3, &mut reg);
        let id = city.traffic[0].obstacle;
        let before = reg.get(id).unwrap().center;
        city.advance_traffic(&mut reg);
        let after = reg.get(id).unwrap().center;
        assert!((after.z - before.z - 0.2).abs() < 1e-5);
        assert!(!reg.needs_refresh());
    }
}
