//! Dashboard readout derived from the car each frame.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gear {
    Reverse,
    Forward(u8),
}

impl Gear {
    /// Step function of signed speed (units per frame).
    pub fn for_speed(speed: f32) -> Self {
        if speed < 0.0 {
            return Gear::Reverse;
        }
        let gear = match speed {
            s if s > 4.0 => 6,
            s if s > 2.5 => 5,
            s if s > 1.5 => 4,
            s if s > 0.8 => 3,
            s if s > 0.3 => 2,
            _ => 1,
        };
        Gear::Forward(gear)
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gear::Reverse => write!(f, "R"),
            Gear::Forward(n) => write!(f, "{}", n),
        }
    }
}

/// Per-frame car record for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarState {
    /// Displayed speed, km/h.
    pub speed: u32,
    pub gear: Gear,
    pub rpm: u32,
    pub steering: f32,
    /// Rounded damage, 0..=100.
    pub damage: u32,
    pub braking: bool,
    pub boosting: bool,
    pub indicator_left: bool,
    pub indicator_right: bool,
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            speed: 0,
            gear: Gear::Forward(1),
            rpm: 0,
            steering: 0.0,
            damage: 0,
            braking: false,
            boosting: false,
            indicator_left: false,
            indicator_right: false,
        }
    }
}

/// Inputs to [`CarState::derive`] that come from the car rather than the player.
#[derive(Debug, Clone, Copy)]
pub struct Readings {
    pub speed: f32,
    pub steering: f32,
    pub damage: f32,
    pub boosting: bool,
    pub speedometer_scale: f32,
}

impl CarState {
    pub fn derive(readings: Readings, input: &input::ControlSnapshot) -> Self {
        let magnitude = readings.speed.abs();
        let rpm_per_speed = if readings.boosting { 2000.0 } else { 4000.0 };
        let idle = if input.forward { 2000.0 } else { 0.0 };
        Self {
            speed: (magnitude * readings.speedometer_scale).round() as u32,
            gear: Gear::for_speed(readings.speed),
            rpm: (magnitude * rpm_per_speed + idle).round() as u32,
            steering: readings.steering,
            damage: readings.damage.round().clamp(0.0, 100.0) as u32,
            braking: input.brake,
            boosting: readings.boosting,
            indicator_left: input.indicator_left,
            indicator_right: input.indicator_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::ControlSnapshot;

    fn readings(speed: f32, boosting: bool) -> Readings {
        Readings {
            speed,
            steering: 0.0,
            damage: 12.4,
            boosting,
            speedometer_scale: 200.0,
        }
    }

    #[test]
    fn gear_bands() {
        assert_eq!(Gear::for_speed(-0.1), Gear::Reverse);
        assert_eq!(Gear::for_speed(0.0), Gear::Forward(1));
        assert_eq!(Gear::for_speed(0.3), Gear::Forward(1));
        assert_eq!(Gear::for_speed(0.31), Gear::Forward(2));
        assert_eq!(Gear::for_speed(1.0), Gear::Forward(3));
        assert_eq!(Gear::for_speed(2.0), Gear::Forward(4));
        assert_eq!(Gear::for_speed(3.0), Gear::Forward(5));
        assert_eq!(Gear::for_speed(4.5), Gear::Forward(6));
        assert_eq!(Gear::Reverse.to_string(), "R");
    }

    #[test]
    fn readout_values() {
        let input = ControlSnapshot {
            forward: true,
            brake: true,
            indicator_left: true,
            ..Default::default()
        };
        let state = CarState::derive(readings(1.0, false), &input);
        assert_eq!(state.speed, 200);
        assert_eq!(state.rpm, 6000);
        assert_eq!(state.damage, 12);
        assert!(state.braking && state.indicator_left && !state.indicator_right);

        let boosted = CarState::derive(readings(3.0, true), &input);
        assert_eq!(boosted.rpm, 8000);
        assert_eq!(boosted.gear, Gear::Forward(5));
    }

    #[test]
    fn reverse_reads_positive_speed() {
        let state = CarState::derive(readings(-0.5, false), &ControlSnapshot::idle());
        assert_eq!(state.speed, 100);
        assert_eq!(state.gear, Gear::Reverse);
        assert_eq!(state.rpm, 2000);
    }
}
