//! The moon.
//!
//! The moon is not simulated. A single phase angle sweeps `[0, π)` once per
//! "night" (0 at the eastern horizon, π/2 at zenith, π at the western
//! horizon) and everything visual is a pure function of it. Near the horizon
//! the moon is drawn larger, warmer, and dimmer.

use glam::Vec3;
use serde::Serialize;
use std::f32::consts::PI;

use crate::config::MoonConfig;
use crate::error::ConfigError;

/// Derived visual state of the moon for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonState {
    pub phase: f32,
    /// `sin(phase)`: 0 at either horizon, 1 at zenith.
    pub height_fraction: f32,
    pub position: Vec3,
    /// Apparent diameter.
    pub size: f32,
    /// Surface tint, RGB in `[0, 1]`.
    pub color: Vec3,
    pub emissive: Vec3,
    /// Main moonlight intensity.
    pub light_intensity: f32,
    /// Soft halo light intensity.
    pub glow_intensity: f32,
}

/// Phase scheduler for the moon's arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moon {
    phase: f32,
    config: MoonConfig,
}

impl Moon {
    pub fn new(config: MoonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { phase: 0.0, config })
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn config(&self) -> &MoonConfig {
        &self.config
    }

    /// Step the phase forward by one tick. Returns `true` when the moon set
    /// and the phase wrapped back to 0.
    pub fn advance(&mut self) -> bool {
        self.phase += self.config.phase_step;
        if self.phase >= PI {
            self.phase = 0.0;
            return true;
        }
        false
    }

    /// Visual state at the current phase.
    pub fn state(&self) -> MoonState {
        moon_state(&self.config, self.phase)
    }
}

/// Visual state of a moon with `config` at `phase`.
pub fn moon_state(config: &MoonConfig, phase: f32) -> MoonState {
    let h = phase.sin();

    let position = Vec3::new(
        -(phase + config.azimuth).cos() * config.orbit_radius,
        h * config.amplitude,
        -(h.abs() * config.recession) - config.recession_base,
    );

    let size = config.base_size * (1.0 - h * config.shrink);

    // Orange near the horizon, pale at zenith
    let low = 1.0 - h;
    let color = Vec3::new(1.0, 1.0 - low * 0.2, 0.93 - low * 0.3);
    let emissive = color * Vec3::new(0.8, 0.8, 0.6);

    MoonState {
        phase,
        height_fraction: h,
        position,
        size,
        color,
        emissive,
        light_intensity: 1.0 + h * 0.5,
        glow_intensity: 0.3 + h * 0.2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rejects_bad_step() {
        let config = MoonConfig {
            phase_step: -0.1,
            ..Default::default()
        };
        assert!(Moon::new(config).is_err());
    }

    #[test]
    fn test_wraps_once_per_arc() {
        let mut moon = Moon::new(MoonConfig {
            phase_step: 0.01,
            ..Default::default()
        })
        .unwrap();
        let ticks = 1000;
        let mut wraps = 0;
        for _ in 0..ticks {
            if moon.advance() {
                wraps += 1;
            }
            assert!(moon.phase() >= 0.0 && moon.phase() < PI);
        }
        // 315 ticks per traversal (0.01 * 315 > π), so 1000 ticks wrap 3 times
        assert_eq!(wraps, 3);
    }

    #[test]
    fn test_horizon_is_large_warm_and_dim() {
        let config = MoonConfig::default();
        let horizon = moon_state(&config, 0.0);
        let zenith = moon_state(&config, FRAC_PI_2);

        assert!(horizon.position.y.abs() < 1e-4);
        assert!((zenith.position.y - 300.0).abs() < 1e-3);

        assert!((horizon.size - 40.0).abs() < 1e-4);
        assert!((zenith.size - 24.0).abs() < 1e-3);

        assert!(horizon.color.z < zenith.color.z);
        assert!((horizon.color.y - 0.8).abs() < 1e-5);
        assert!((zenith.color.y - 1.0).abs() < 1e-5);

        assert!((horizon.light_intensity - 1.0).abs() < 1e-5);
        assert!((zenith.light_intensity - 1.5).abs() < 1e-5);
        assert!(horizon.glow_intensity < zenith.glow_intensity);
    }

    #[test]
    fn test_plain_sweep_with_half_turn_azimuth() {
        let config = MoonConfig {
            azimuth: PI,
            orbit_radius: 600.0,
            ..Default::default()
        };
        let rise = moon_state(&config, 0.0);
        let set = moon_state(&config, PI - 1e-3);
        assert!((rise.position.x - 600.0).abs() < 1e-2);
        assert!((set.position.x + 600.0).abs() < 1e-2);
    }

    #[test]
    fn test_moon_stays_behind_scene() {
        let config = MoonConfig::default();
        for i in 0..100 {
            let phase = i as f32 / 100.0 * PI;
            assert!(moon_state(&config, phase).position.z <= -200.0);
        }
    }
}
