//! Scalar helpers for per-frame exponential smoothing.

use std::f32::consts::{PI, TAU};

/// Linear interpolation; `t` is a per-frame blend factor.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Wrap an angle difference into `[-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

/// Move `current` a fraction `t` of the shortest arc toward `target`.
pub fn approach_angle(current: f32, target: f32, t: f32) -> f32 {
    current + wrap_angle(target - current) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_takes_short_way_round() {
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(0.3) - 0.3).abs() < 1e-6);
        assert_eq!(wrap_angle(f32::NAN), 0.0);
    }

    #[test]
    fn approach_crosses_the_seam() {
        let next = approach_angle(PI - 0.1, -PI + 0.1, 0.5);
        assert!(next > PI - 0.1);
    }
}
