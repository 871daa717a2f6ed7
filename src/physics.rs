//! Planar rigid-body stepping.
//!
//! Explicit Euler in the `(x, y)` plane with no gravity and no drag. Bodies
//! never collide with each other; the only velocity change a body ever sees
//! is the bounce applied by [`ConfinementRule`](crate::ConfinementRule).

use crate::body::SimulatedBody;
use crate::registry::BodyRegistry;

/// Integrates planar motion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanarStepper;

impl PlanarStepper {
    pub fn new() -> Self {
        Self
    }

    /// Advance one body: `position += velocity * dt`.
    #[inline]
    pub fn step(&self, body: &mut SimulatedBody, dt: f32) {
        body.position += body.velocity * dt;
    }

    /// Advance every body in the registry.
    pub fn step_all(&self, registry: &mut BodyRegistry, dt: f32) {
        registry.for_each_mut(|body| self.step(body, dt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, Shape};
    use glam::{Vec2, Vec3, Vec4};

    #[test]
    fn test_step_integrates_velocity() {
        let mut body = SimulatedBody {
            id: BodyId(0),
            shape: Shape::hex_disk(20.0),
            position: Vec2::new(1.0, -1.0),
            velocity: Vec2::new(60.0, -30.0),
            depth: 0.0,
            depth_velocity: 0.0,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
            color: Vec4::ONE,
            emissive_phase: 0.0,
        };
        PlanarStepper::new().step(&mut body, 0.5);
        assert_eq!(body.position, Vec2::new(31.0, -16.0));
        // No damping between bounces
        assert_eq!(body.velocity, Vec2::new(60.0, -30.0));
        assert_eq!(body.depth, 0.0);
    }
}
