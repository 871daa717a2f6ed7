//! The lattice envelope.
//!
//! Four wireframe pyramids meet tip-to-tip at the origin. The volume the
//! small bodies live in is modelled as a vertical bipyramid: two cones joined
//! base to base, with maximum radius `R` at `y = 0` tapering linearly to zero
//! at `y = ±H`.
//!
//! ```text
//!            y = +H
//!              /\
//!             /  \
//!            /    \
//!   y = 0   <------>   radius R
//!            \    /
//!             \  /
//!              \/
//!            y = -H
//! ```

use glam::Vec3;
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;

use crate::error::ConfigError;

/// Bipyramidal containment volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    radius: f32,
    half_height: f32,
}

/// Placement of one of the four outer wireframe pyramids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatticePyramid {
    /// Center of the pyramid's bounding box.
    pub position: Vec3,
    /// Euler rotation that points the tip at the origin.
    pub rotation: Vec3,
    /// Base half-width.
    pub base_radius: f32,
    pub height: f32,
}

impl Lattice {
    /// Build a lattice with base radius `radius` and half-height `half_height`.
    ///
    /// Both must be finite and strictly positive.
    pub fn new(radius: f32, half_height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(radius) || !valid(half_height) {
            return Err(ConfigError::InvalidLattice {
                radius,
                half_height,
            });
        }
        Ok(Self {
            radius,
            half_height,
        })
    }

    /// Maximum radius at `y = 0`.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance from the center to either tip.
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Allowed distance from the vertical axis at height `y`.
    ///
    /// `R · (1 − |y| / H)`, never negative: beyond the tips nothing but the
    /// axis itself is allowed.
    #[inline]
    pub fn allowed_radius(&self, y: f32) -> f32 {
        (self.radius * (1.0 - y.abs() / self.half_height)).max(0.0)
    }

    /// Whether the point `(x, y, z)` lies inside the envelope.
    pub fn contains(&self, x: f32, y: f32, z: f32) -> bool {
        (x * x + z * z).sqrt() <= self.allowed_radius(y)
    }

    /// The four outer pyramids, tips touching at the origin.
    ///
    /// Each pyramid has base half-width `R` and height `2H`, offset by `R`
    /// along ±x and ±z.
    pub fn pyramids(&self) -> [LatticePyramid; 4] {
        let r = self.radius;
        let pyramid = |position: Vec3, rotation: Vec3| LatticePyramid {
            position,
            rotation,
            base_radius: r,
            height: self.half_height * 2.0,
        };
        [
            pyramid(Vec3::new(r, 0.0, 0.0), Vec3::new(0.0, 0.0, -FRAC_PI_2)),
            pyramid(Vec3::new(-r, 0.0, 0.0), Vec3::new(0.0, 0.0, FRAC_PI_2)),
            pyramid(Vec3::new(0.0, 0.0, r), Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            pyramid(Vec3::new(0.0, 0.0, -r), Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
        ]
    }
}

impl Default for Lattice {
    /// `R = 100`, `H = 120`.
    fn default() -> Self {
        Self {
            radius: 100.0,
            half_height: 120.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Lattice::new(-100.0, 120.0).is_err());
        assert!(Lattice::new(100.0, 0.0).is_err());
        assert!(Lattice::new(f32::NAN, 120.0).is_err());
        assert!(Lattice::new(f32::INFINITY, 120.0).is_err());
        assert!(Lattice::new(100.0, 120.0).is_ok());
    }

    #[test]
    fn test_allowed_radius_tapers() {
        let lattice = Lattice::new(100.0, 120.0).unwrap();
        assert_eq!(lattice.allowed_radius(0.0), 100.0);
        assert!((lattice.allowed_radius(60.0) - 50.0).abs() < 1e-4);
        assert!((lattice.allowed_radius(-60.0) - 50.0).abs() < 1e-4);
        assert_eq!(lattice.allowed_radius(120.0), 0.0);
        // Past the tip the taper clamps instead of going negative
        assert_eq!(lattice.allowed_radius(200.0), 0.0);
    }

    #[test]
    fn test_contains() {
        let lattice = Lattice::default();
        assert!(lattice.contains(0.0, 0.0, 0.0));
        assert!(lattice.contains(60.0, 0.0, 80.0));
        assert!(!lattice.contains(60.0, 0.0, 81.0));
        assert!(!lattice.contains(60.0, 60.0, 0.0));
        assert!(lattice.contains(0.0, 119.0, 0.0));
    }

    #[test]
    fn test_pyramids_point_inward() {
        let lattice = Lattice::default();
        let pyramids = lattice.pyramids();
        for p in &pyramids {
            assert!((p.position.length() - lattice.radius()).abs() < 1e-4);
            assert_eq!(p.height, 240.0);
        }
    }
}
