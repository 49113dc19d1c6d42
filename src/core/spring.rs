//! Damped spring smoothing for the virtual scroll value.
//!
//! A second-order filter: the value carries velocity, a stiffness force pulls
//! it toward the target and damping bleeds the velocity off. Tuned at (or
//! near) critical damping so a page turn decelerates into place without
//! overshooting the section boundary. Once displacement and velocity both
//! drop under their epsilons the value snaps exactly onto the target, so
//! downstream consumers can compare with `==` after settling.

/// Displacement below which the spring may snap, in scroll units.
const EPS_POS: f64 = 0.5;
/// Velocity below which the spring may snap, in scroll units per second.
const EPS_VEL: f64 = 1.0;
/// Integration substep ceiling. Large frame gaps (suspended terminal,
/// debugger pauses) are split so the integrator stays stable.
const MAX_STEP: f64 = 1.0 / 60.0;

/// Spring-smoothed scalar. Critically damped by default.
#[derive(Debug, Clone)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    /// Pull strength toward the target, 1/s².
    stiffness: f64,
    /// Velocity bleed, 1/s. Critical damping is `2 * stiffness.sqrt()`.
    damping: f64,
}

impl Spring {
    pub fn new(value: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping,
        }
    }

    /// Spring tuned for the section transition: settles a full page in
    /// roughly a second with no overshoot.
    pub fn page_turn(value: f64) -> Self {
        Self::new(value, 90.0, 19.0)
    }

    /// Retarget without disturbing the current value or velocity.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump instantly: value = target, velocity zeroed.
    pub fn settle_at(&mut self, value: f64) {
        self.value = value;
        self.velocity = 0.0;
        self.target = value;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance by `dt` seconds (semi-implicit Euler, substepped).
    pub fn tick(&mut self, dt: f64) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }
        let dt = dt.min(0.25);
        let steps = (dt / MAX_STEP).ceil() as usize;
        let h = dt / steps as f64;
        for _ in 0..steps {
            let accel = self.stiffness * (self.target - self.value) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        if (self.target - self.value).abs() < EPS_POS && self.velocity.abs() < EPS_VEL {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// True once the value sits exactly on the target with no motion.
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn starts_settled() {
        let s = Spring::page_turn(0.0);
        assert!(s.is_settled());
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn converges_and_snaps_exactly() {
        let mut s = Spring::page_turn(0.0);
        s.set_target(1000.0);
        for _ in 0..300 {
            s.tick(DT);
            if s.is_settled() {
                break;
            }
        }
        assert!(s.is_settled(), "spring did not settle within 5 seconds");
        assert_eq!(s.value(), 1000.0);
    }

    #[test]
    fn approach_is_monotonic_without_overshoot() {
        let mut s = Spring::page_turn(0.0);
        s.set_target(1000.0);
        let mut prev = s.value();
        for _ in 0..300 {
            s.tick(DT);
            assert!(s.value() >= prev - 1e-9);
            assert!(s.value() <= 1000.0 + EPS_POS);
            prev = s.value();
        }
    }

    #[test]
    fn retarget_mid_flight_lands_on_new_target() {
        let mut s = Spring::page_turn(0.0);
        s.set_target(1000.0);
        for _ in 0..10 {
            s.tick(DT);
        }
        assert!(!s.is_settled());
        s.set_target(0.0);
        for _ in 0..600 {
            s.tick(DT);
            if s.is_settled() {
                break;
            }
        }
        assert!(s.is_settled());
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut s = Spring::page_turn(0.0);
        s.set_target(500.0);
        s.tick(0.0);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn settle_at_jumps_instantly() {
        let mut s = Spring::page_turn(0.0);
        s.set_target(1000.0);
        for _ in 0..5 {
            s.tick(DT);
        }
        s.settle_at(2000.0);
        assert!(s.is_settled());
        assert_eq!(s.value(), 2000.0);
    }

    #[test]
    fn oversized_frame_gap_stays_stable() {
        let mut s = Spring::page_turn(0.0);
        s.set_target(1000.0);
        s.tick(3.0);
        assert!(s.value().is_finite());
        assert!(s.value() >= 0.0 && s.value() <= 1000.0 + EPS_POS);
    }
}
