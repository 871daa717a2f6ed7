//! Backdrop below and behind the lattice: the rippling water plane, the
//! moon's reflection on it, and the night-sky gradient.
//!
//! Everything here is a pure function of elapsed time (and the moon), so a
//! renderer can sample the water at whatever resolution it likes.

use glam::Vec3;
use serde::Serialize;

/// Rest height of the water plane.
pub const WATER_LEVEL: f32 = -240.0;

/// Number of ellipses making up the moon's reflection.
pub const REFLECTION_COUNT: usize = 5;

/// Sky color at the top of the gradient (midnight blue).
pub const SKY_ZENITH: Vec3 = Vec3::new(25.0 / 255.0, 25.0 / 255.0, 112.0 / 255.0);
/// Sky color at the horizon (violet).
pub const SKY_HORIZON: Vec3 = Vec3::new(138.0 / 255.0, 43.0 / 255.0, 226.0 / 255.0);
/// Per-channel weight of the lightning flash on the sky.
pub const LIGHTNING_TINT: Vec3 = Vec3::new(0.5, 0.7, 0.3);

/// Wave displacement above [`WATER_LEVEL`] at plane coordinates `(x, z)`.
#[inline]
pub fn water_height(x: f32, z: f32, elapsed: f32) -> f32 {
    (x * 0.02 + elapsed).sin() * 10.0 + (z * 0.015 + elapsed * 1.3).cos() * 8.0
}

/// One ellipse of the moon's reflection on the water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonReflection {
    /// Center along the water's x axis; sways around the moon's x.
    pub x: f32,
    /// Center along the water's depth axis.
    pub z: f32,
    pub width: f32,
    pub length: f32,
}

/// The reflection ellipses under a moon at horizontal position `moon_x`.
///
/// Each ellipse sits one step further out, is narrower than the last, and
/// sways by `sin(elapsed + i) · 20`.
pub fn moon_reflections(moon_x: f32, elapsed: f32) -> [MoonReflection; REFLECTION_COUNT] {
    std::array::from_fn(|i| {
        let i = i as f32;
        MoonReflection {
            x: moon_x + (elapsed + i).sin() * 20.0,
            z: i * 20.0 - 40.0,
            width: 40.0 - i * 5.0,
            length: 20.0,
        }
    })
}

/// Additive sky brightening for a lightning flash of the given intensity.
#[inline]
pub fn lightning_boost(intensity: f32) -> Vec3 {
    LIGHTNING_TINT * intensity
}

/// Sky gradient color at `t` (0 = zenith, 1 = horizon) with `boost` added,
/// saturating at white.
pub fn sky_color(t: f32, boost: Vec3) -> Vec3 {
    (SKY_ZENITH.lerp(SKY_HORIZON, t.clamp(0.0, 1.0)) + boost).min(Vec3::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_height_at_origin() {
        // sin(0) * 10 + cos(0) * 8
        assert!((water_height(0.0, 0.0, 0.0) - 8.0).abs() < 1e-6);
        // Both waves peak together
        let x = std::f32::consts::FRAC_PI_2 / 0.02;
        assert!((water_height(x, 0.0, 0.0) - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_water_moves_over_time() {
        let a = water_height(100.0, -50.0, 0.0);
        let b = water_height(100.0, -50.0, 1.0);
        assert!((a - b).abs() > 1e-3);
        for i in 0..100 {
            let h = water_height(i as f32 * 37.0, i as f32 * -11.0, i as f32 * 0.1);
            assert!(h.abs() <= 18.0 + 1e-4);
        }
    }

    #[test]
    fn test_reflections_sway_around_moon() {
        let reflections = moon_reflections(300.0, 0.0);
        assert_eq!(reflections[0].x, 300.0);
        assert_eq!(reflections[0].z, -40.0);
        assert_eq!(reflections[4].width, 20.0);
        for r in &reflections {
            assert!((r.x - 300.0).abs() <= 20.0 + 1e-4);
        }
        assert_ne!(moon_reflections(300.0, 1.0), reflections);
    }

    #[test]
    fn test_sky_gradient_and_lightning() {
        assert_eq!(sky_color(0.0, Vec3::ZERO), SKY_ZENITH);
        assert!((sky_color(1.0, Vec3::ZERO) - SKY_HORIZON).abs().max_element() < 1e-6);

        let flash = lightning_boost(200.0 / 255.0);
        let lit = sky_color(0.0, flash);
        assert!((lit.x - (25.0 + 100.0) / 255.0).abs() < 1e-5);
        assert!((lit.y - (25.0 + 140.0) / 255.0).abs() < 1e-5);

        // Saturates at white
        assert_eq!(sky_color(1.0, Vec3::splat(5.0)), Vec3::ONE);
    }
}
