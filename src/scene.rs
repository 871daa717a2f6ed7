//! Scene context: the explicit owner of all simulation state.
//!
//! A host creates a [`Scene`] once, calls [`Scene::tick`] once per frame, reads
//! a [`Frame`] to draw, and finally calls [`Scene::teardown`]. The scene never
//! schedules itself and never touches global state.
//!
//! Each tick runs, in order:
//!
//! 1. integrate depth
//! 2. step planar physics
//! 3. enforce lattice confinement
//! 4. advance the moon's phase
//! 5. advance compositor state (spin, lattice rotation, glow, lightning)
//!
//! A tick with `dt == 0` is a paused frame: nothing moves and the per-tick
//! schedulers (moon phase, lightning timer) hold still too, so pausing a
//! [`FrameClock`](crate::time::FrameClock) freezes the sky along with the
//! bodies.

use crate::body::SimulatedBody;
use crate::celestial::Moon;
use crate::compositor::{Compositor, Frame, Viewport};
use crate::config::{FrameConfig, MoonConfig, SceneConfig, SpawnConfig};
use crate::confinement::{Confinement, ConfinementRule};
use crate::error::ConfigError;
use crate::lattice::Lattice;
use crate::physics::PlanarStepper;
use crate::registry::BodyRegistry;
use crate::starfield::StaticField;

/// Mixed into the scene seed so glow flicker draws from its own stream.
const FLICKER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// Bodies that hit the lattice boundary this tick.
    pub bounces: usize,
    pub moon_wrapped: bool,
    pub lightning_toggled: bool,
    /// The tick was rejected because `dt` was not a finite non-negative number.
    pub skipped: bool,
    /// `dt` was zero; nothing advanced.
    pub paused: bool,
}

/// Running totals over a scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneStats {
    pub ticks: u64,
    pub bounces: u64,
    pub moon_wraps: u64,
    pub skipped_ticks: u64,
    pub paused_ticks: u64,
}

/// A running night scene.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    seed: u64,
    lattice: Lattice,
    confinement: ConfinementRule,
    stepper: PlanarStepper,
    registry: BodyRegistry,
    moon: Moon,
    field: StaticField,
    compositor: Compositor,
    viewport: Viewport,
    stats: SceneStats,
}

impl Scene {
    /// Start configuring a scene with default settings.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// Build a scene from `config`, randomizing bodies from `seed`.
    pub fn initialize(config: SceneConfig, seed: u64) -> Result<Self, ConfigError> {
        let lattice = config.lattice()?;
        let registry = BodyRegistry::from_config(seed, &config.spawn, &lattice);
        Self::assemble(config, seed, lattice, registry)
    }

    fn assemble(
        config: SceneConfig,
        seed: u64,
        lattice: Lattice,
        registry: BodyRegistry,
    ) -> Result<Self, ConfigError> {
        let confinement = config.confinement_rule()?;
        let moon = Moon::new(config.moon)?;
        config.frame.validate()?;
        let compositor = Compositor::new(config.frame, seed ^ FLICKER_SEED_SALT);

        log::info!(
            "Scene initialized: seed {}, {} bodies, lattice R={} H={}, {:?} confinement",
            seed,
            registry.len(),
            lattice.radius(),
            lattice.half_height(),
            confinement.mode(),
        );

        Ok(Self {
            config,
            seed,
            lattice,
            confinement,
            stepper: PlanarStepper::new(),
            registry,
            moon,
            field: StaticField::pisces(),
            compositor,
            viewport: Viewport::default(),
            stats: SceneStats::default(),
        })
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// A non-finite or negative `dt` is rejected and leaves all state as it
    /// was. A finite but huge `dt` may fling bodies out of the lattice; the
    /// confinement rule brings them back to finite positions on the boundary.
    /// A zero `dt` counts as a paused frame and changes nothing.
    pub fn tick(&mut self, dt: f32) -> TickSummary {
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("Ignoring tick with invalid dt {}", dt);
            self.stats.skipped_ticks += 1;
            return TickSummary {
                skipped: true,
                ..Default::default()
            };
        }
        if dt == 0.0 {
            self.stats.paused_ticks += 1;
            return TickSummary {
                paused: true,
                ..Default::default()
            };
        }

        let lattice = &self.lattice;
        let confinement = &self.confinement;
        let stepper = &self.stepper;
        let mut bounces = 0;
        self.registry.for_each_mut(|body| {
            confinement.integrate_depth(body, dt);
            stepper.step(body, dt);
            if confinement.enforce(lattice, body).is_some() {
                bounces += 1;
            }
        });

        let moon_wrapped = self.moon.advance();
        if moon_wrapped {
            log::debug!("Moon set at tick {}; phase reset", self.stats.ticks + 1);
        }

        let lightning_toggled = self.compositor.advance(&mut self.registry, dt);
        if lightning_toggled {
            log::debug!(
                "Lightning {} at tick {}",
                if self.compositor.lightning_active() { "on" } else { "off" },
                self.stats.ticks + 1
            );
        }

        self.stats.ticks += 1;
        self.stats.bounces += bounces as u64;
        if moon_wrapped {
            self.stats.moon_wraps += 1;
        }
        log::trace!("tick {}: {} boundary bounces", self.stats.ticks, bounces);

        TickSummary {
            bounces,
            moon_wrapped,
            lightning_toggled,
            skipped: false,
            paused: false,
        }
    }

    /// Render data for the current state.
    pub fn frame(&self) -> Frame {
        self.compositor.compose(
            self.stats.ticks,
            self.viewport,
            &self.lattice,
            &self.registry,
            self.moon.state(),
            &self.field,
        )
    }

    /// Record the host's new viewport size. Simulation state is unaffected.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Viewport resized to {}x{}", width, height);
        self.viewport = Viewport { width, height };
    }

    /// Shut the scene down, returning its lifetime totals.
    pub fn teardown(self) -> SceneStats {
        log::info!(
            "Scene torn down after {} ticks: {} bounces, {} moonsets, {} skipped, {} paused",
            self.stats.ticks,
            self.stats.bounces,
            self.stats.moon_wraps,
            self.stats.skipped_ticks,
            self.stats.paused_ticks,
        );
        self.stats
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn confinement(&self) -> &ConfinementRule {
        &self.confinement
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn moon(&self) -> &Moon {
        &self.moon
    }

    pub fn field(&self) -> &StaticField {
        &self.field
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Fluent builder for [`Scene`].
///
/// ```ignore
/// let mut scene = Scene::builder()
///     .with_seed(7)
///     .with_lattice(100.0, 120.0)
///     .with_confinement(Confinement::Radial)
///     .with_cones(200)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    config: SceneConfig,
    seed: u64,
    bodies: Option<Vec<SimulatedBody>>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete config.
    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lattice base radius and half-height.
    pub fn with_lattice(mut self, radius: f32, half_height: f32) -> Self {
        self.config.lattice.radius = radius;
        self.config.lattice.half_height = half_height;
        self
    }

    pub fn with_confinement(mut self, mode: Confinement) -> Self {
        self.config.confinement = mode;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.config.restitution = restitution;
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnConfig) -> Self {
        self.config.spawn = spawn;
        self
    }

    /// Number of small pyramids.
    pub fn with_cones(mut self, count: usize) -> Self {
        self.config.spawn.cones.count = count;
        self
    }

    /// Number of hexagonal disks.
    pub fn with_hexes(mut self, count: usize) -> Self {
        self.config.spawn.hexes.count = count;
        self
    }

    pub fn with_moon(mut self, moon: MoonConfig) -> Self {
        self.config.moon = moon;
        self
    }

    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.config.frame = frame;
        self
    }

    /// Use hand-placed bodies instead of spawning random ones.
    ///
    /// Ids are renumbered to match the order given.
    pub fn with_bodies(mut self, bodies: Vec<SimulatedBody>) -> Self {
        self.bodies = Some(bodies);
        self
    }

    pub fn build(self) -> Result<Scene, ConfigError> {
        match self.bodies {
            Some(bodies) => {
                let lattice = self.config.lattice()?;
                Scene::assemble(self.config, self.seed, lattice, BodyRegistry::from(bodies))
            }
            None => Scene::initialize(self.config, self.seed),
        }
    }
}
