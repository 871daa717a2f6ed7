//! Frame composition.
//!
//! Turns simulation state into flat per-frame data a renderer can draw
//! directly: one [`BodyInstance`] per body (GPU-uploadable via `bytemuck`),
//! the moon's derived state, twinkling stars, the spinning lattice and its
//! pulsing glow, the lightning flash and the sky tint it casts, and the moon's
//! reflection on the water.
//!
//! The compositor also owns the purely visual state that advances every
//! tick: body spin, lattice rotation, glow flicker, and the lightning timer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;

use crate::body::{Shape, SimulatedBody};
use crate::celestial::MoonState;
use crate::config::FrameConfig;
use crate::environment::{self, MoonReflection, REFLECTION_COUNT, WATER_LEVEL};
use crate::lattice::{Lattice, LatticePyramid};
use crate::registry::BodyRegistry;
use crate::starfield::StaticField;

/// Shape code for [`Shape::Cone`] in [`BodyInstance::shape`].
pub const SHAPE_CONE: u32 = 0;
/// Shape code for [`Shape::HexDisk`] in [`BodyInstance::shape`].
pub const SHAPE_HEX_DISK: u32 = 1;

/// Lightning brightness while a flash is active.
const LIGHTNING_INTENSITY: f32 = 200.0 / 255.0;
/// Peak star alpha before twinkle.
const STAR_ALPHA: f32 = 200.0 / 255.0;

/// Per-body render instance. 64 bytes, no padding holes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize)]
pub struct BodyInstance {
    pub position: [f32; 3],
    /// [`SHAPE_CONE`] or [`SHAPE_HEX_DISK`].
    pub shape: u32,
    pub rotation: [f32; 3],
    pub emissive: f32,
    /// Cone: (base radius, height, base radius). Hex: (radius, thickness, radius).
    pub scale: [f32; 3],
    #[serde(skip)]
    _pad: f32,
    pub color: [f32; 4],
}

/// A star as drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarInstance {
    pub position: Vec3,
    pub size: f32,
    pub alpha: f32,
}

/// Glow of one outer lattice pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PyramidGlow {
    pub emissive: f32,
    pub light: f32,
}

/// An outer lattice pyramid as drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PyramidVisual {
    #[serde(flatten)]
    pub placement: LatticePyramid,
    pub glow: PyramidGlow,
}

/// Host viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub elapsed: f32,
    pub viewport: Viewport,
    /// Rotation of the whole lattice group about the vertical axis.
    pub lattice_rotation: f32,
    pub pyramids: [PyramidVisual; 4],
    pub bodies: Vec<BodyInstance>,
    pub moon: MoonState,
    pub stars: Vec<StarInstance>,
    pub constellation: Vec<(usize, usize)>,
    /// 0 when dark, flash brightness when lightning is active.
    pub lightning: f32,
    /// Additive RGB brightening of the sky from the lightning flash.
    pub sky_boost: Vec3,
    /// Rest height of the water plane.
    pub water_level: f32,
    pub reflections: [MoonReflection; REFLECTION_COUNT],
}

impl Frame {
    /// Water displacement above [`Frame::water_level`] at `(x, z)` this frame.
    #[inline]
    pub fn water_height(&self, x: f32, z: f32) -> f32 {
        environment::water_height(x, z, self.elapsed)
    }

    /// Sky gradient color at `t` (0 = zenith, 1 = horizon), lightning included.
    #[inline]
    pub fn sky_color(&self, t: f32) -> Vec3 {
        environment::sky_color(t, self.sky_boost)
    }
}

/// Advance a body's visual rotation: `rotation += spin * dt`.
#[inline]
pub fn advance_spin(body: &mut SimulatedBody, dt: f32) {
    body.rotation += body.spin * dt;
}

/// Build the render instance for a body at `elapsed` seconds.
pub fn body_instance(body: &SimulatedBody, elapsed: f32) -> BodyInstance {
    let (shape, scale) = match body.shape {
        Shape::Cone { radius, height } => (SHAPE_CONE, [radius, height, radius]),
        Shape::HexDisk { radius, thickness } => (SHAPE_HEX_DISK, [radius, thickness, radius]),
    };
    BodyInstance {
        position: body.world_position().to_array(),
        shape,
        rotation: body.rotation.to_array(),
        emissive: 0.3 + (elapsed * 2.0 + body.emissive_phase).sin() * 0.1,
        scale,
        _pad: 0.0,
        color: body.color.to_array(),
    }
}

/// Visual state that evolves independently of the physics.
#[derive(Debug, Clone)]
pub struct Compositor {
    config: FrameConfig,
    elapsed: f32,
    lattice_rotation: f32,
    glow: [PyramidGlow; 4],
    lightning_timer: u64,
    lightning_active: bool,
    rng: SmallRng,
}

impl Compositor {
    /// `seed` drives glow flicker only.
    pub fn new(config: FrameConfig, seed: u64) -> Self {
        let mut compositor = Self {
            config,
            elapsed: 0.0,
            lattice_rotation: 0.0,
            glow: [PyramidGlow::default(); 4],
            lightning_timer: 0,
            lightning_active: false,
            rng: SmallRng::seed_from_u64(seed),
        };
        compositor.update_glow();
        compositor
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn lightning_active(&self) -> bool {
        self.lightning_active
    }

    /// Advance visual state by one tick of `dt` seconds, spinning every body.
    ///
    /// Returns `true` if lightning toggled on this tick.
    pub fn advance(&mut self, registry: &mut BodyRegistry, dt: f32) -> bool {
        self.elapsed += dt;
        self.lattice_rotation =
            (self.lattice_rotation + self.config.lattice_spin * dt) % std::f32::consts::TAU;
        registry.for_each_mut(|body| advance_spin(body, dt));
        self.update_glow();

        if self.config.lightning_interval == 0 {
            return false;
        }
        self.lightning_timer += 1;
        if self.lightning_timer > self.config.lightning_interval {
            self.lightning_timer = 0;
            self.lightning_active = !self.lightning_active;
            return true;
        }
        false
    }

    fn update_glow(&mut self) {
        for (i, glow) in self.glow.iter_mut().enumerate() {
            let pulse =
                (self.elapsed * self.config.pulse_rate + i as f32 * FRAC_PI_2).sin() * 0.3 + 0.7;
            let flicker = if self.rng.gen::<f32>() < self.config.flicker_chance {
                self.rng.gen::<f32>() * 0.5
            } else {
                0.0
            };
            *glow = PyramidGlow {
                emissive: pulse * 0.4 + flicker,
                light: pulse * 0.8 + flicker,
            };
        }
    }

    /// Assemble the frame for the current state.
    pub fn compose(
        &self,
        tick: u64,
        viewport: Viewport,
        lattice: &Lattice,
        registry: &BodyRegistry,
        moon: MoonState,
        field: &StaticField,
    ) -> Frame {
        let placements = lattice.pyramids();
        let pyramids = std::array::from_fn(|i| PyramidVisual {
            placement: placements[i],
            glow: self.glow[i],
        });

        let stars = field
            .stars()
            .iter()
            .map(|star| {
                let twinkle = star.twinkle(self.elapsed);
                StarInstance {
                    position: star.position,
                    size: star.size * twinkle,
                    alpha: STAR_ALPHA * twinkle,
                }
            })
            .collect();

        let lightning = if self.lightning_active {
            LIGHTNING_INTENSITY
        } else {
            0.0
        };

        Frame {
            tick,
            elapsed: self.elapsed,
            viewport,
            lattice_rotation: self.lattice_rotation,
            pyramids,
            bodies: registry
                .iter()
                .map(|body| body_instance(body, self.elapsed))
                .collect(),
            reflections: environment::moon_reflections(moon.position.x, self.elapsed),
            moon,
            stars,
            constellation: field.lines().to_vec(),
            lightning,
            sky_boost: environment::lightning_boost(lightning),
            water_level: WATER_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyId;
    use glam::{Vec2, Vec4};

    fn hex_body() -> SimulatedBody {
        SimulatedBody {
            id: BodyId(0),
            shape: Shape::hex_disk(20.0),
            position: Vec2::new(1.0, 2.0),
            velocity: Vec2::ZERO,
            depth: 3.0,
            depth_velocity: 0.0,
            rotation: Vec3::ZERO,
            spin: Vec3::new(1.0, 0.0, -2.0),
            color: Vec4::new(1.0, 0.5, 0.2, 0.9),
            emissive_phase: 0.0,
        }
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 64);
        let instance = body_instance(&hex_body(), 0.0);
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_shape_dispatch() {
        let instance = body_instance(&hex_body(), 0.0);
        assert_eq!(instance.shape, SHAPE_HEX_DISK);
        assert_eq!(instance.scale, [20.0, 5.0, 20.0]);
        assert_eq!(instance.position, [1.0, 2.0, 3.0]);
        assert!((instance.emissive - 0.3).abs() < 1e-6);

        let mut cone = hex_body();
        cone.shape = Shape::cone(10.0);
        let instance = body_instance(&cone, 0.0);
        assert_eq!(instance.shape, SHAPE_CONE);
        assert_eq!(instance.scale, [5.0, 10.0, 5.0]);
    }

    #[test]
    fn test_spin_advances_rotation() {
        let mut body = hex_body();
        advance_spin(&mut body, 0.5);
        assert_eq!(body.rotation, Vec3::new(0.5, 0.0, -1.0));
        // Spin never touches kinematics
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_lightning_toggles_on_interval() {
        let config = FrameConfig {
            lightning_interval: 3,
            ..Default::default()
        };
        let mut compositor = Compositor::new(config, 0);
        let mut registry = BodyRegistry::default();
        // The timer must exceed the interval, so a toggle lands every 4th tick
        let toggles: Vec<bool> = (0..8)
            .map(|_| compositor.advance(&mut registry, 1.0 / 60.0))
            .collect();
        assert_eq!(
            toggles,
            vec![false, false, false, true, false, false, false, true]
        );
        assert!(!compositor.lightning_active());
    }

    #[test]
    fn test_frame_backdrop_follows_lightning_and_moon() {
        let config = FrameConfig {
            lightning_interval: 1,
            ..Default::default()
        };
        let mut compositor = Compositor::new(config, 0);
        let mut registry = BodyRegistry::default();
        let lattice = Lattice::default();
        let field = StaticField::pisces();
        let moon = crate::celestial::Moon::new(Default::default()).unwrap().state();

        let dark = compositor.compose(0, Viewport::default(), &lattice, &registry, moon, &field);
        assert_eq!(dark.sky_boost, Vec3::ZERO);
        assert_eq!(dark.sky_color(0.0), environment::SKY_ZENITH);

        compositor.advance(&mut registry, 0.5);
        assert!(compositor.advance(&mut registry, 0.5));
        let lit = compositor.compose(2, Viewport::default(), &lattice, &registry, moon, &field);
        assert_eq!(lit.lightning, LIGHTNING_INTENSITY);
        assert!((lit.sky_boost.y - LIGHTNING_INTENSITY * 0.7).abs() < 1e-6);
        assert!(lit.sky_color(0.5).cmpgt(dark.sky_color(0.5)).all());

        assert_eq!(lit.water_level, WATER_LEVEL);
        assert_eq!(lit.water_height(10.0, 20.0), environment::water_height(10.0, 20.0, 1.0));
        assert_eq!(
            lit.reflections,
            environment::moon_reflections(moon.position.x, 1.0)
        );
    }

    #[test]
    fn test_lightning_disabled() {
        let config = FrameConfig {
            lightning_interval: 0,
            ..Default::default()
        };
        let mut compositor = Compositor::new(config, 0);
        let mut registry = BodyRegistry::default();
        for _ in 0..1000 {
            assert!(!compositor.advance(&mut registry, 1.0 / 60.0));
        }
    }

    #[test]
    fn test_glow_without_flicker_is_bounded() {
        let config = FrameConfig {
            flicker_chance: 0.0,
            ..Default::default()
        };
        let mut compositor = Compositor::new(config, 1);
        let mut registry = BodyRegistry::default();
        for _ in 0..200 {
            compositor.advance(&mut registry, 1.0 / 30.0);
            for glow in &compositor.glow {
                assert!(glow.emissive >= 0.16 - 1e-5 && glow.emissive <= 0.4 + 1e-5);
                assert!(glow.light >= 0.32 - 1e-5 && glow.light <= 0.8 + 1e-5);
            }
        }
    }
}
