//! Key bindings: which logical action each physical key drives, and how.

use winit::keyboard::KeyCode;

/// How an action reacts to key-down / key-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// True while any bound key is held; cleared on key-up.
    Level,
    /// Flips once per key-down; key-up does nothing.
    Toggle,
    /// True only for the frame in which the key went down.
    Edge,
}

/// Logical actions the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Brake,
    Boost,
    Up,
    Down,
    Repair,
    Respawn,
    FlyMode,
    IndicatorLeft,
    IndicatorRight,
    Interact,
    CameraToggle,
}

impl Action {
    pub fn kind(self) -> ActionKind {
        match self {
            Action::FlyMode | Action::IndicatorLeft | Action::IndicatorRight => ActionKind::Toggle,
            Action::Interact | Action::CameraToggle => ActionKind::Edge,
            _ => ActionKind::Level,
        }
    }

    /// Default keyboard layout.
    pub fn for_key(key: KeyCode) -> Option<Action> {
        let action = match key {
            KeyCode::KeyW | KeyCode::ArrowUp => Action::Forward,
            KeyCode::KeyS | KeyCode::ArrowDown => Action::Backward,
            KeyCode::KeyA | KeyCode::ArrowLeft => Action::Left,
            KeyCode::KeyD | KeyCode::ArrowRight => Action::Right,
            KeyCode::Space => Action::Brake,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Action::Boost,
            KeyCode::KeyZ => Action::Up,
            KeyCode::KeyX => Action::Down,
            KeyCode::KeyR => Action::Repair,
            KeyCode::KeyT => Action::Respawn,
            KeyCode::KeyF => Action::FlyMode,
            KeyCode::KeyQ => Action::IndicatorLeft,
            KeyCode::KeyE => Action::IndicatorRight,
            KeyCode::KeyG => Action::Interact,
            KeyCode::KeyC => Action::CameraToggle,
            _ => return None,
        };
        Some(action)
    }
}
