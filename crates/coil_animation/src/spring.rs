//! Spring physics
//!
//! RK4-integrated scalar springs. Configurable either directly through
//! physical parameters or through the UI-level `bounciness`/`speed` pair.

/// Default bounciness for [`SpringConfig::from_dynamics`].
pub const DEFAULT_BOUNCINESS: f32 = 4.0;

/// Default speed for [`SpringConfig::from_dynamics`].
pub const DEFAULT_SPEED: f32 = 12.0;

/// Bounciness at or above this value yields the minimum damping ratio.
const DYNAMICS_BOUNCE_RANGE: f32 = 20.0;

/// Floor for `speed` so a zero-speed spring still converges.
const DYNAMICS_SPEED_FLOOR: f32 = 0.5;

/// Physical configuration of a spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Derive physical parameters from UI-level dynamics.
    ///
    /// `speed` sets the natural frequency (how fast the spring settles);
    /// `bounciness` pulls the damping ratio below critical (how far it
    /// overshoots and oscillates). Bounciness 0 is critically damped,
    /// values toward 20 are progressively more underdamped. Negative
    /// inputs are treated as 0.
    pub fn from_dynamics(bounciness: f32, speed: f32) -> Self {
        let bounciness = bounciness.max(0.0);
        let speed = speed.max(0.0);

        let omega = 2.0 * speed.max(DYNAMICS_SPEED_FLOOR);
        let stiffness = omega * omega;

        let t = (bounciness / DYNAMICS_BOUNCE_RANGE).min(1.0);
        let damping_ratio = 1.0 - 0.85 * t;
        let damping = damping_ratio * 2.0 * omega;

        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    /// Damping that settles fastest without oscillation.
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of actual damping to critical damping (< 1 oscillates).
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from_dynamics(DEFAULT_BOUNCINESS, DEFAULT_SPEED)
    }
}

/// A scalar spring animating toward a target value.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

// Settle thresholds in chart-data units. Values within a thousandth of the
// target and effectively at rest snap to the target exactly.
const SETTLE_EPSILON: f32 = 1e-3;
const SETTLE_VELOCITY_EPSILON: f32 = 1e-2;

impl Spring {
    /// Create a spring at rest at `value`.
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Seed an initial velocity, e.g. inherited from a superseded spring.
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Whether the spring has converged on its target.
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SETTLE_EPSILON
            && self.velocity.abs() < SETTLE_VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Once the spring is within the settle thresholds it snaps exactly to
    /// the target, so a settled spring reports the target value verbatim.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        // Classic RK4 over (value, velocity).
        let (x, v) = (self.value, self.velocity);
        let half = dt * 0.5;

        let a1 = self.accel(x, v);
        let a2 = self.accel(x + v * half, v + a1 * half);
        let v2 = v + a1 * half;
        let a3 = self.accel(x + v2 * half, v + a2 * half);
        let v3 = v + a2 * half;
        let a4 = self.accel(x + v3 * dt, v + a3 * dt);
        let v4 = v + a3 * dt;

        self.value += (v + 2.0 * v2 + 2.0 * v3 + v4) * dt / 6.0;
        self.velocity += (a1 + 2.0 * a2 + 2.0 * a3 + a4) * dt / 6.0;
    }

    fn accel(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn settles_exactly_on_target() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(15.0);

        settle(&mut spring, 600);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 15.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::from_dynamics(12.0, 10.0), 0.0);
        spring.set_target(100.0);

        settle(&mut spring, 5);
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn seeded_velocity_is_carried() {
        let spring = Spring::new(SpringConfig::default(), 5.0).with_velocity(-3.0);
        assert_eq!(spring.velocity(), -3.0);
        assert_eq!(spring.value(), 5.0);
    }

    #[test]
    fn zero_bounciness_is_critically_damped() {
        let config = SpringConfig::from_dynamics(0.0, 12.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-5);
        assert!(!config.is_underdamped());
    }

    #[test]
    fn bounciness_lowers_damping_ratio() {
        let low = SpringConfig::from_dynamics(2.0, 12.0);
        let high = SpringConfig::from_dynamics(18.0, 12.0);
        assert!(high.damping_ratio() < low.damping_ratio());
        assert!(high.is_underdamped());
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::from_dynamics(20.0, 12.0), 0.0);
        spring.set_target(10.0);

        let mut peak = 0.0f32;
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }

        assert!(peak > 10.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn integration_is_stable_with_large_steps() {
        let mut spring = Spring::new(SpringConfig::from_dynamics(4.0, 12.0), 0.0);
        spring.set_target(1000.0);

        for _ in 0..100 {
            spring.step(0.05);
            assert!(spring.value().is_finite());
            assert!(spring.value() > -500.0 && spring.value() < 2000.0);
        }
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        spring.step(-0.1);
        assert_eq!(spring.value(), 0.0);
    }
}
