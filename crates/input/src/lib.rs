//! Input handling for keyboard and pointer.
//!
//! Raw platform events are folded into an [`InputState`]; once per frame the
//! host calls [`InputState::sample_frame`] to get an immutable
//! [`ControlSnapshot`] for the simulation step.

pub mod bindings;
pub mod snapshot;

pub use bindings::*;
pub use snapshot::*;

use glam::Vec2;
use std::collections::HashSet;

/// Radians of orbit per pixel of pointer drag, before the sensitivity multiplier.
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;

/// Persistent toggle flags (flip on key-down, unaffected by key-up).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Toggles {
    fly_mode: bool,
    indicator_left: bool,
    indicator_right: bool,
}

/// Manages input state between frames.
#[derive(Debug)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed since the last sample.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,

    /// Pointer position in window coordinates.
    mouse_position: Vec2,
    /// Pointer position at the previous drag step.
    drag_anchor: Option<Vec2>,
    /// Orbit yaw/pitch accumulated since the last sample.
    orbit_delta: Vec2,

    toggles: Toggles,

    /// Orbit sensitivity multiplier (1.0 = default).
    sensitivity: f32,
    /// False after teardown.
    active: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_held: HashSet::new(),
            mouse_position: Vec2::ZERO,
            drag_anchor: None,
            orbit_delta: Vec2::ZERO,
            toggles: Toggles::default(),
            sensitivity: 1.0,
            active: true,
        }
    }

    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            ..Self::new()
        }
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        if !self.active {
            return;
        }
        match state {
            ElementState::Pressed => {
                // Auto-repeat delivers Pressed again without a Released in between.
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                    if let Some(action) = Action::for_key(key) {
                        if action.kind() == ActionKind::Toggle {
                            self.flip(action);
                        }
                    }
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    fn flip(&mut self, action: Action) {
        match action {
            Action::FlyMode => {
                self.toggles.fly_mode = !self.toggles.fly_mode;
                log::debug!("Fly mode toggled {}", if self.toggles.fly_mode { "on" } else { "off" });
            }
            Action::IndicatorLeft => {
                self.toggles.indicator_left = !self.toggles.indicator_left;
                self.toggles.indicator_right = false;
            }
            Action::IndicatorRight => {
                self.toggles.indicator_right = !self.toggles.indicator_right;
                self.toggles.indicator_left = false;
            }
            _ => {}
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if !self.active {
            return;
        }
        match state {
            ElementState::Pressed => {
                let aiming = self.is_aiming();
                self.mouse_held.insert(button);
                let starts_drag = match button {
                    MouseButton::Left => !aiming,
                    MouseButton::Right => true,
                    _ => false,
                };
                if starts_drag && self.drag_anchor.is_none() {
                    self.drag_anchor = Some(self.mouse_position);
                }
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                if !self.drag_held() {
                    self.drag_anchor = None;
                }
            }
        }
    }

    /// A button that drives the orbit drag is still down.
    fn drag_held(&self) -> bool {
        self.is_aiming() || self.is_firing()
    }

    /// Process absolute pointer position; drives orbit drags.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        let position = Vec2::new(position.0 as f32, position.1 as f32);
        if let Some(anchor) = self.drag_anchor {
            self.accumulate_orbit(position - anchor);
            self.drag_anchor = Some(position);
        }
        self.mouse_position = position;
    }

    /// Process relative mouse motion (locked cursor); only counts while dragging.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.drag_anchor.is_some() {
            self.accumulate_orbit(Vec2::new(delta.0 as f32, delta.1 as f32));
        }
    }

    fn accumulate_orbit(&mut self, pixels: Vec2) {
        let scale = ORBIT_RADIANS_PER_PIXEL * self.sensitivity;
        self.orbit_delta.x -= pixels.x * scale;
        self.orbit_delta.y += pixels.y * scale;
    }

    fn level(&self, action: Action) -> bool {
        self.keys_held
            .iter()
            .any(|&key| Action::for_key(key) == Some(action))
    }

    fn edge(&self, action: Action) -> bool {
        self.keys_pressed
            .iter()
            .any(|&key| Action::for_key(key) == Some(action))
    }

    /// Check if aim is held (Right mouse button).
    pub fn is_aiming(&self) -> bool {
        self.mouse_held.contains(&MouseButton::Right)
    }

    /// Check if fire is held (Left mouse button).
    pub fn is_firing(&self) -> bool {
        self.mouse_held.contains(&MouseButton::Left)
    }

    /// Check if an orbit drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Get the pointer position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// The platform's context menu must stay suppressed so right-click can aim.
    pub fn suppresses_context_menu(&self) -> bool {
        self.active
    }

    /// Build this frame's snapshot and clear per-frame state (edges, orbit delta).
    pub fn sample_frame(&mut self) -> ControlSnapshot {
        let snapshot = ControlSnapshot {
            forward: self.level(Action::Forward),
            backward: self.level(Action::Backward),
            left: self.level(Action::Left),
            right: self.level(Action::Right),
            brake: self.level(Action::Brake),
            boost: self.level(Action::Boost),
            fly_mode: self.toggles.fly_mode,
            up: self.level(Action::Up),
            down: self.level(Action::Down),
            interact: self.edge(Action::Interact),
            aiming: self.is_aiming(),
            firing: self.is_firing(),
            indicator_left: self.toggles.indicator_left,
            indicator_right: self.toggles.indicator_right,
            repair: self.level(Action::Repair),
            respawn: self.level(Action::Respawn),
            camera_toggle: self.edge(Action::CameraToggle),
            orbit_delta: self.orbit_delta,
            dragging: self.is_dragging(),
        };
        self.keys_pressed.clear();
        self.orbit_delta = Vec2::ZERO;
        snapshot
    }

    /// Teardown: every flag back to false and further events ignored.
    pub fn reset(&mut self) {
        let sensitivity = self.sensitivity;
        *self = Self::with_sensitivity(sensitivity);
        self.active = false;
        log::debug!("Input sampler torn down");
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, key: KeyCode) {
        input.process_keyboard(key, ElementState::Pressed);
    }

    fn release(input: &mut InputState, key: KeyCode) {
        input.process_keyboard(key, ElementState::Released);
    }

    #[test]
    fn level_flags_follow_key_state() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyW);
        assert!(input.sample_frame().forward);
        assert!(input.sample_frame().forward);
        release(&mut input, KeyCode::KeyW);
        assert!(!input.sample_frame().forward);
    }

    #[test]
    fn aliased_keys_keep_level_until_both_released() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowUp);
        release(&mut input, KeyCode::ArrowUp);
        assert!(input.sample_frame().forward);
    }

    #[test]
    fn toggles_ignore_key_up_and_repeat() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyF);
        press(&mut input, KeyCode::KeyF); // auto-repeat
        release(&mut input, KeyCode::KeyF);
        assert!(input.sample_frame().fly_mode);
        press(&mut input, KeyCode::KeyF);
        release(&mut input, KeyCode::KeyF);
        assert!(!input.sample_frame().fly_mode);
    }

    #[test]
    fn indicators_are_mutually_exclusive() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyQ);
        release(&mut input, KeyCode::KeyQ);
        let s = input.sample_frame();
        assert!(s.indicator_left && !s.indicator_right);
        press(&mut input, KeyCode::KeyE);
        let s = input.sample_frame();
        assert!(!s.indicator_left && s.indicator_right);
    }

    #[test]
    fn edges_last_one_frame() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyG);
        assert!(input.sample_frame().interact);
        assert!(!input.sample_frame().interact);
    }

    #[test]
    fn drag_accumulates_scaled_orbit() {
        let mut input = InputState::with_sensitivity(2.0);
        input.process_cursor_position((100.0, 100.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.process_cursor_position((110.0, 90.0));
        let s = input.sample_frame();
        assert!(s.dragging);
        assert!(s.firing);
        assert!((s.orbit_delta.x - (-10.0 * 0.005 * 2.0)).abs() < 1e-6);
        assert!((s.orbit_delta.y - (-10.0 * 0.005 * 2.0)).abs() < 1e-6);
        assert_eq!(input.sample_frame().orbit_delta, Vec2::ZERO);
    }

    #[test]
    fn primary_while_aiming_does_not_start_a_second_drag() {
        let mut input = InputState::new();
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!input.is_dragging());
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        let s = input.sample_frame();
        assert!(s.aiming && s.firing && s.dragging);
    }

    #[test]
    fn aim_drag_survives_a_shot() {
        let mut input = InputState::new();
        input.process_cursor_position((100.0, 100.0));
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        input.process_cursor_position((200.0, 100.0));
        let s = input.sample_frame();
        assert!(s.aiming && !s.firing && s.dragging);
        assert!((s.orbit_delta.x - (-100.0 * 0.005)).abs() < 1e-6);

        input.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!input.is_dragging());
    }

    #[test]
    fn pointer_moves_without_drag_do_not_orbit() {
        let mut input = InputState::new();
        input.process_cursor_position((0.0, 0.0));
        input.process_cursor_position((50.0, 50.0));
        input.process_mouse_motion((5.0, 5.0));
        assert_eq!(input.sample_frame().orbit_delta, Vec2::ZERO);
    }

    #[test]
    fn reset_clears_everything() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyF);
        press(&mut input, KeyCode::KeyW);
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.reset();
        assert!(!input.suppresses_context_menu());
        assert_eq!(input.sample_frame(), ControlSnapshot::idle());
        press(&mut input, KeyCode::KeyW);
        assert!(!input.sample_frame().forward);
    }
}
