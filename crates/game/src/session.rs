//! Headless play session: a timed script of key and pointer events drives the
//! input sampler, the city, the tip board and the simulation at a fixed rate.

use crate::config::GameConfig;
use crate::simulation::{ActiveActor, FrameSnapshot, Simulation};
use crate::tips::{TipBoard, TipSource};
use input::{ElementState, InputState, KeyCode, MouseButton};
use physics::ObstacleRegistry;
use procgen::City;
use std::sync::Arc;

/// One platform event in a script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    Key(KeyCode, ElementState),
    Button(MouseButton, ElementState),
    /// Absolute pointer position in window pixels.
    Cursor(f64, f64),
}

/// Events sorted by time, replayed into an [`InputState`].
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    events: Vec<(f32, ScriptAction)>,
    next: usize,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<(f32, ScriptAction)>) -> Self {
        events.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { events, next: 0 }
    }

    /// Drive, boost, swerve, repair, brake, step out, fly, land, aim and fire.
    pub fn demo() -> Self {
        use ElementState::{Pressed, Released};
        use ScriptAction::{Button, Cursor, Key};
        let tap = |t: f32, key: KeyCode| [(t, Key(key, Pressed)), (t + 0.05, Key(key, Released))];

        let mut events = vec![
            (0.5, Key(KeyCode::KeyW, Pressed)),
            (3.0, Key(KeyCode::ShiftLeft, Pressed)),
            (6.0, Key(KeyCode::KeyA, Pressed)),
            (7.5, Key(KeyCode::KeyA, Released)),
            (8.0, Key(KeyCode::ShiftLeft, Released)),
            (12.0, Key(KeyCode::KeyW, Released)),
            (12.0, Key(KeyCode::Space, Pressed)),
            (14.0, Key(KeyCode::Space, Released)),
            (17.5, Key(KeyCode::KeyZ, Pressed)),
            (19.0, Key(KeyCode::KeyZ, Released)),
            (19.0, Key(KeyCode::KeyW, Pressed)),
            (22.0, Key(KeyCode::KeyW, Released)),
            (22.0, Key(KeyCode::KeyX, Pressed)),
            (26.0, Key(KeyCode::KeyX, Released)),
            // Orbit drag with the secondary button, which also raises the aim.
            (29.0, Cursor(640.0, 360.0)),
            (29.0, Button(MouseButton::Right, Pressed)),
            (29.5, Cursor(700.0, 360.0)),
            (30.0, Button(MouseButton::Left, Pressed)),
            (33.0, Button(MouseButton::Left, Released)),
            (33.5, Button(MouseButton::Right, Released)),
        ];
        events.extend(tap(14.5, KeyCode::KeyR));
        events.extend(tap(15.0, KeyCode::KeyQ));
        events.extend(tap(16.0, KeyCode::KeyG));
        events.extend(tap(17.0, KeyCode::KeyF));
        events.extend(tap(26.5, KeyCode::KeyF));
        events.extend(tap(35.0, KeyCode::KeyC));
        Self::new(events)
    }

    /// Apply every event due at or before `now`.
    pub fn feed(&mut self, now: f32, input: &mut InputState) {
        while let Some(&(at, action)) = self.events.get(self.next) {
            if at > now {
                break;
            }
            match action {
                ScriptAction::Key(key, state) => input.process_keyboard(key, state),
                ScriptAction::Button(button, state) => input.process_mouse_button(button, state),
                ScriptAction::Cursor(x, y) => input.process_cursor_position((x, y)),
            }
            self.next += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }
}

/// What happened over a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    pub impacts: u32,
    pub peak_speed_kmh: u32,
    pub peak_altitude: f32,
    pub missiles_fired: usize,
    pub actor_switches: u32,
    pub landings: u32,
}

pub struct Session {
    pub sim: Simulation,
    pub city: City,
    pub registry: ObstacleRegistry,
    pub tips: TipBoard,
    input: InputState,
    script: ScriptedInput,
}

impl Session {
    pub fn new(config: GameConfig, tip_source: Arc<dyn TipSource>, script: ScriptedInput) -> Self {
        let mut registry = ObstacleRegistry::new();
        let city = City::generate(config.world_seed, &mut registry);
        let tips = TipBoard::new(tip_source, config.tip_interval_secs, config.world_seed);
        let input = InputState::with_sensitivity(config.sensitivity);
        Self {
            sim: Simulation::new(config),
            city,
            registry,
            tips,
            input,
            script,
        }
    }

    /// One frame: script events, traffic, tips, then the simulation step.
    pub fn frame(&mut self, dt: f32) -> FrameSnapshot {
        let now = self.sim.elapsed();
        self.script.feed(now, &mut self.input);
        let controls = self.input.sample_frame();
        self.city.advance_traffic(&mut self.registry);
        self.tips.tick(dt);
        self.sim.step(&controls, &self.registry, dt)
    }

    /// Run for `seconds` at `fps`, logging telemetry once per simulated second.
    pub fn run(&mut self, seconds: f32, fps: u32) -> SessionSummary {
        let fps = fps.max(1);
        let dt = 1.0 / fps as f32;
        let frames = (seconds.max(0.0) * fps as f32).round() as u64;

        let mut summary = SessionSummary::default();
        let mut last_active = self.sim.active();
        let mut was_landing = false;
        let mut last_missile = None;

        for _ in 0..frames {
            let frame = self.frame(dt);
            summary.frames = frame.frame;
            summary.impacts += frame.collision.impacts;
            summary.peak_speed_kmh = summary.peak_speed_kmh.max(frame.car.speed);
            summary.peak_altitude = summary.peak_altitude.max(frame.character.transform.position.y);
            if frame.active != last_active {
                summary.actor_switches += 1;
                last_active = frame.active;
            }
            let landing = frame.character.landing.is_some();
            if landing && !was_landing {
                summary.landings += 1;
            }
            was_landing = landing;
            for m in &frame.missiles {
                if last_missile.map_or(true, |id| m.id > id) {
                    summary.missiles_fired += 1;
                    last_missile = Some(m.id);
                }
            }

            if frame.frame % fps as u64 == 0 {
                log_telemetry(&frame);
            }
        }
        self.input.reset();
        summary
    }
}

fn log_telemetry(frame: &FrameSnapshot) {
    match frame.active {
        ActiveActor::Vehicle => {
            let car = &frame.car;
            let p = frame.vehicle.transform.position;
            log::info!(
                "t={:>5.1}s car  {:>4} km/h gear {} {:>5} rpm dmg {:>3}% at ({:.0}, {:.1}, {:.0}){}{}",
                frame.time,
                car.speed,
                car.gear,
                car.rpm,
                car.damage,
                p.x,
                p.y,
                p.z,
                if car.boosting { " BOOST" } else { "" },
                if car.indicator_left { " <" } else if car.indicator_right { " >" } else { "" },
            );
        }
        ActiveActor::Character => {
            let c = &frame.character;
            let p = c.transform.position;
            let mode = if c.landing.is_some() {
                "landing"
            } else if c.flying {
                "flying"
            } else if c.aiming {
                "aiming"
            } else if c.moving {
                "walking"
            } else {
                "standing"
            };
            log::info!(
                "t={:>5.1}s suit {} at ({:.1}, {:.1}, {:.1}) missiles {}{}",
                frame.time,
                mode,
                p.x,
                p.y,
                p.z,
                frame.missiles.len(),
                c.aim_hit
                    .map(|h| format!(" locked ({:.0}, {:.0}, {:.0})", h.x, h.y, h.z))
                    .unwrap_or_default(),
            );
        }
    }
}
