//! Simulated bodies.
//!
//! A [`SimulatedBody`] is one small decorative object drifting inside the
//! lattice. Its state is split by owner:
//!
//! - `position` / `velocity` (x, y with y vertical) belong to the planar stepper
//! - `depth` / `depth_velocity` (z) belong to the confinement rule
//! - `rotation` / `spin` belong to the compositor and are purely visual

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Stable identity of a body for the lifetime of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Geometric shape of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Three-sided pyramid with base `radius` and `height`.
    Cone { radius: f32, height: f32 },
    /// Flat hexagonal prism.
    HexDisk { radius: f32, thickness: f32 },
}

impl Shape {
    /// Cone sized like the small pyramids: base radius is half the height.
    pub fn cone(size: f32) -> Self {
        Shape::Cone {
            radius: size * 0.5,
            height: size,
        }
    }

    /// Hexagonal disk of the given circumradius and a fixed 5-unit thickness.
    pub fn hex_disk(radius: f32) -> Self {
        Shape::HexDisk {
            radius,
            thickness: 5.0,
        }
    }

    /// Radius of the bounding circle in the shape's own plane.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Cone { radius, height } => radius.max(height * 0.5),
            Shape::HexDisk { radius, .. } => radius,
        }
    }
}

/// One small decorative object.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedBody {
    pub id: BodyId,
    pub shape: Shape,
    /// Horizontal (x) and vertical (y) position.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Third spatial axis (z).
    pub depth: f32,
    pub depth_velocity: f32,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Angular velocity in radians per second.
    pub spin: Vec3,
    /// RGBA, each channel in `[0, 1]`.
    pub color: Vec4,
    /// Offset fed into the emissive pulse so bodies don't glow in lockstep.
    pub emissive_phase: f32,
}

impl SimulatedBody {
    /// Full 3D position `(x, y, depth)`.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y, self.depth)
    }

    /// Distance from the vertical axis, `sqrt(x² + z²)`.
    ///
    /// Uses `hypot`, so large but finite offsets don't overflow to infinity.
    #[inline]
    pub fn axial_radius(&self) -> f32 {
        self.position.x.hypot(self.depth)
    }

    /// Whether every kinematic field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.depth.is_finite()
            && self.depth_velocity.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32, z: f32) -> SimulatedBody {
        SimulatedBody {
            id: BodyId(0),
            shape: Shape::cone(10.0),
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            depth: z,
            depth_velocity: 0.0,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
            color: Vec4::ONE,
            emissive_phase: 0.0,
        }
    }

    #[test]
    fn test_axial_radius_ignores_height() {
        let body = body_at(3.0, 50.0, 4.0);
        assert!((body.axial_radius() - 5.0).abs() < 1e-6);
        assert_eq!(body.world_position(), Vec3::new(3.0, 50.0, 4.0));
    }

    #[test]
    fn test_shape_bounding_radius() {
        assert_eq!(Shape::cone(10.0).bounding_radius(), 5.0);
        assert_eq!(Shape::hex_disk(20.0).bounding_radius(), 20.0);
    }

    #[test]
    fn test_nan_is_not_finite() {
        let mut body = body_at(0.0, 0.0, 0.0);
        assert!(body.is_finite());
        body.depth = f32::NAN;
        assert!(!body.is_finite());
    }
}
