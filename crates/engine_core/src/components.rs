//! Common gameplay counters shared by vehicles and characters.

/// Upper bound of the damage scale.
pub const MAX_DAMAGE: f32 = 100.0;

/// Saturating damage meter in `[0, MAX_DAMAGE]`.
///
/// Damage only rises, except through [`DamageMeter::repair`], which resets it
/// to exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageMeter {
    value: f32,
}

impl DamageMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add damage, saturating at the maximum. Negative or NaN amounts are ignored.
    pub fn add(&mut self, amount: f32) {
        if amount > 0.0 {
            self.value = (self.value + amount).min(MAX_DAMAGE);
        }
    }

    pub fn repair(&mut self) {
        self.value = 0.0;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Fully wrecked: acceleration is disabled until repaired.
    pub fn is_wrecked(&self) -> bool {
        self.value >= MAX_DAMAGE
    }

    pub fn fraction(&self) -> f32 {
        self.value / MAX_DAMAGE
    }
}

/// Lifetime counted in simulation frames (missiles, short-lived effects).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLifetime {
    pub remaining: u32,
}

impl FrameLifetime {
    pub fn new(frames: u32) -> Self {
        Self { remaining: frames }
    }

    /// Consume one frame. Returns true once the lifetime has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

/// Countdown timer re-armed by the next qualifying event (fire cooldowns).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self, period: f32) {
        self.remaining = period;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Remembers when an event last fired so it can be rate limited.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RetriggerGate {
    last: Option<f32>,
}

impl RetriggerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least `interval` seconds have passed since the last trigger.
    pub fn is_open(&self, now: f32, interval: f32) -> bool {
        match self.last {
            Some(last) => now - last >= interval,
            None => true,
        }
    }

    pub fn trigger(&mut self, now: f32) {
        self.last = Some(now);
    }

    /// Seconds since the last trigger, if any.
    pub fn since(&self, now: f32) -> Option<f32> {
        self.last.map(|last| now - last)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_saturates_and_repairs_to_zero() {
        let mut d = DamageMeter::new();
        d.add(60.0);
        d.add(60.0);
        assert_eq!(d.value(), MAX_DAMAGE);
        assert!(d.is_wrecked());
        d.add(-30.0);
        assert_eq!(d.value(), MAX_DAMAGE);
        d.repair();
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn lifetime_never_goes_negative() {
        let mut life = FrameLifetime::new(2);
        assert!(!life.tick());
        assert!(life.tick());
        assert!(life.tick());
        assert_eq!(life.remaining, 0);
    }

    #[test]
    fn cooldown_rearms() {
        let mut c = Cooldown::new();
        assert!(c.is_ready());
        c.trigger(0.25);
        c.update(0.1);
        assert!(!c.is_ready());
        c.update(0.2);
        assert!(c.is_ready());
    }

    #[test]
    fn gate_respects_interval() {
        let mut gate = RetriggerGate::new();
        assert!(gate.is_open(0.0, 0.5));
        gate.trigger(1.0);
        assert!(!gate.is_open(1.3, 0.5));
        assert!(gate.is_open(1.5, 0.5));
        assert_eq!(gate.since(1.25), Some(0.25));
    }
}
