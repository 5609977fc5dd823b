//! Damped harmonic oscillator used by spring keyframes
//!
//! A spring segment starts at rest on its start value and is pulled toward
//! its target. The response is evaluated in closed form, so sampling is a
//! pure function of local time and never accumulates integration error.

use serde::{Deserialize, Serialize};

use crate::easing::smoothstep;

/// Damping ratios this close to 1.0 are treated as critically damped
const CRITICAL_BAND: f64 = 1e-6;

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Spring stiffness (k)
    pub stiffness: f32,
    /// Damping coefficient (c)
    pub damping: f32,
    /// Mass of the animated body
    #[serde(default = "default_mass")]
    pub mass: f32,
}

fn default_mass() -> f32 {
    1.0
}

impl SpringConfig {
    /// Create a spring with unit mass
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: default_mass(),
        }
    }

    /// Builder: set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Damping ratio just above 1.0, 0.5s period. No overshoot.
    pub fn smooth() -> Self {
        Self::new(157.9, 25.2)
    }

    /// Slight overshoot, 0.5s period
    pub fn snappy() -> Self {
        Self::new(157.9, 21.4)
    }

    /// Visible bounce, 0.5s period
    pub fn bouncy() -> Self {
        Self::new(157.9, 17.6)
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "smooth" => Some(Self::smooth()),
            "snappy" => Some(Self::snappy()),
            "bouncy" => Some(Self::bouncy()),
            _ => None,
        }
    }

    /// Damping ratio (zeta). Below 1.0 the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Check that the parameters describe a physical spring
    pub fn validate(&self) -> Result<(), String> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(format!("stiffness must be positive, got {}", self.stiffness));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(format!("mass must be positive, got {}", self.mass));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(format!("damping must be non-negative, got {}", self.damping));
        }
        Ok(())
    }

    /// Normalized displacement at time `t` seconds.
    ///
    /// The body starts at rest at 0.0 and is pulled toward 1.0; the result
    /// may overshoot 1.0 for under-damped springs.
    pub fn response(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }

        // f64 keeps the exponentials stable for stiff springs
        let t = t as f64;
        let k = self.stiffness as f64;
        let c = self.damping as f64;
        let m = self.mass as f64;

        let omega = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());

        // Offset from the target: starts at -1, velocity 0
        let offset = if (zeta - 1.0).abs() < CRITICAL_BAND {
            -(1.0 + omega * t) * (-omega * t).exp()
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            -decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let a = r2 / (r1 - r2);
            let b = -r1 / (r1 - r2);
            a * (r1 * t).exp() + b * (r2 * t).exp()
        };

        (1.0 + offset) as f32
    }

    /// Response over a segment of fixed `duration`, landing exactly on 1.0
    /// at `t == duration`.
    ///
    /// Whatever the oscillator has not yet covered at the end of the segment
    /// is faded in with a smoothstep, so a well-tuned spring is left
    /// untouched while a short segment still arrives on its target.
    pub fn settled_response(&self, t: f32, duration: f32) -> f32 {
        if duration <= 0.0 || t >= duration {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }

        let residual = 1.0 - self.response(duration);
        self.response(t) + residual * smoothstep(t / duration)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::smooth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_starts_at_rest() {
        for config in [
            SpringConfig::smooth(),
            SpringConfig::snappy(),
            SpringConfig::bouncy(),
        ] {
            assert_eq!(config.response(0.0), 0.0);
            // Zero initial velocity: barely moved after a tiny step
            assert!(config.response(1e-4) < 1e-3);
        }
    }

    #[test]
    fn test_response_settles_on_target() {
        for config in [
            SpringConfig::smooth(),
            SpringConfig::snappy(),
            SpringConfig::bouncy(),
            SpringConfig::new(100.0, 40.0), // over-damped
        ] {
            let settled = config.response(3.0);
            assert!(
                (settled - 1.0).abs() < 1e-3,
                "{:?} should settle near 1.0, got {}",
                config,
                settled
            );
        }
    }

    #[test]
    fn test_bouncy_overshoots_and_smooth_does_not() {
        let max_of = |config: SpringConfig| {
            (0..=300)
                .map(|i| config.response(i as f32 / 100.0))
                .fold(f32::MIN, f32::max)
        };

        assert!(max_of(SpringConfig::bouncy()) > 1.01);
        assert!(max_of(SpringConfig::smooth()) <= 1.0 + 1e-6);
    }

    #[test]
    fn test_damping_ratio() {
        let config = SpringConfig::new(100.0, 20.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-6);
        assert!(SpringConfig::bouncy().damping_ratio() < 1.0);
    }

    #[test]
    fn test_settled_response_lands_exactly() {
        let config = SpringConfig::bouncy();
        // Far too short for the spring to settle on its own
        assert_eq!(config.settled_response(0.05, 0.05), 1.0);
        assert_eq!(config.settled_response(0.0, 0.05), 0.0);

        let mid = config.settled_response(0.025, 0.05);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_settled_response_tracks_physics_for_long_segments() {
        let config = SpringConfig::snappy();
        for i in 0..20 {
            let t = i as f32 * 0.1;
            let diff = (config.settled_response(t, 2.0) - config.response(t)).abs();
            assert!(diff < 1e-3, "diverged at t={}: {}", t, diff);
        }
    }

    #[test]
    fn test_validate() {
        assert!(SpringConfig::smooth().validate().is_ok());
        assert!(SpringConfig::new(0.0, 1.0).validate().is_err());
        assert!(SpringConfig::new(100.0, -1.0).validate().is_err());
        assert!(SpringConfig::new(100.0, 10.0)
            .with_mass(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_presets_by_name() {
        assert_eq!(SpringConfig::preset("bouncy"), Some(SpringConfig::bouncy()));
        assert_eq!(SpringConfig::preset("wobbly"), None);
    }
}
