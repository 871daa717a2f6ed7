//! Scene configuration.
//!
//! Every section has sensible defaults matching the stock night scene, so
//! a config file only needs to name what it changes:
//!
//! ```json
//! {
//!   "lattice": { "radius": 100.0, "half_height": 120.0 },
//!   "confinement": "radial_with_height_clamp",
//!   "spawn": { "cones": { "count": 200 } },
//!   "moon": { "phase_step": 0.004 }
//! }
//! ```
//!
//! Velocities are in scene units per second and spins in radians per second.
//! The moon's `phase_step` is per tick.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::f32::consts::PI;
use std::path::Path;

use crate::confinement::{Confinement, ConfinementRule, DEFAULT_RESTITUTION};
use crate::error::{ConfigError, SceneError};
use crate::lattice::Lattice;

/// Inclusive range of values to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric span `[-half, half]`.
    pub fn symmetric(half: f32) -> Self {
        let half = half.abs();
        Self::new(-half, half)
    }

    /// Same span with `min <= max` and both ends finite.
    pub fn ordered(&self) -> Self {
        let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
        let (a, b) = (fix(self.min), fix(self.max));
        Self::new(a.min(b), a.max(b))
    }

    /// Ordered span restricted to `[lo, hi]`.
    pub fn clamped(&self, lo: f32, hi: f32) -> Self {
        let s = self.ordered();
        Self::new(s.min.clamp(lo, hi), s.max.clamp(lo, hi))
    }
}

/// Lattice dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            half_height: 120.0,
        }
    }
}

/// Random ranges for one population of bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub count: usize,
    /// Cone height or hexagon circumradius.
    pub size: Span,
    /// Maximum horizontal distance from the axis at spawn.
    pub spawn_radius: f32,
    /// Spawn heights are drawn from `[-height_band, height_band]`.
    pub height_band: f32,
    /// Maximum planar speed per axis.
    pub speed: f32,
    /// Maximum depth speed.
    pub depth_speed: f32,
    /// Maximum spin per axis.
    pub spin: f32,
    pub red: Span,
    pub green: Span,
    pub blue: Span,
    pub alpha: Span,
}

impl PopulationConfig {
    /// The small pyramids: many, small, brightly mixed colors.
    pub fn cones() -> Self {
        Self {
            count: 50,
            size: Span::new(5.0, 12.0),
            spawn_radius: 80.0,
            height_band: 50.0,
            speed: 60.0,
            depth_speed: 60.0,
            spin: 1.5,
            red: Span::new(50.0 / 255.0, 1.0),
            green: Span::new(50.0 / 255.0, 1.0),
            blue: Span::new(50.0 / 255.0, 1.0),
            alpha: Span::new(100.0 / 255.0, 1.0),
        }
    }

    /// The hexagonal disks: few, large, warm orange.
    pub fn hexes() -> Self {
        Self {
            count: 3,
            size: Span::new(15.0, 25.0),
            spawn_radius: 80.0,
            height_band: 50.0,
            speed: 45.0,
            depth_speed: 45.0,
            spin: 0.9,
            red: Span::new(200.0 / 255.0, 1.0),
            green: Span::new(100.0 / 255.0, 200.0 / 255.0),
            blue: Span::new(0.0, 100.0 / 255.0),
            alpha: Span::new(150.0 / 255.0, 1.0),
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self::cones()
    }
}

/// Initial body populations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub cones: PopulationConfig,
    /// Fields left out of a partial `hexes` section keep the hexagon defaults.
    #[serde(deserialize_with = "hexes_over_defaults")]
    pub hexes: PopulationConfig,
}

fn hexes_over_defaults<'de, D>(deserializer: D) -> Result<PopulationConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = serde_json::Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(PopulationConfig::hexes()).map_err(D::Error::custom)?;
    if let (Some(base), serde_json::Value::Object(fields)) = (merged.as_object_mut(), overrides) {
        base.extend(fields);
    }
    serde_json::from_value(merged).map_err(D::Error::custom)
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            cones: PopulationConfig::cones(),
            hexes: PopulationConfig::hexes(),
        }
    }
}

/// Scripted moon arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    /// Phase increment per tick, in radians.
    pub phase_step: f32,
    /// Peak height of the arc.
    pub amplitude: f32,
    /// Horizontal swing of the arc.
    pub orbit_radius: f32,
    /// Azimuth offset of moonrise. `π` gives a plain east-to-west `cos(phase)` sweep.
    pub azimuth: f32,
    /// Extra distance behind the scene at zenith.
    pub recession: f32,
    /// Distance behind the scene at the horizon.
    pub recession_base: f32,
    /// Apparent size at the horizon.
    pub base_size: f32,
    /// Fraction of `base_size` lost at zenith.
    pub shrink: f32,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            phase_step: 0.002,
            amplitude: 300.0,
            orbit_radius: 700.0,
            azimuth: PI * 0.6,
            recession: 200.0,
            recession_base: 200.0,
            base_size: 40.0,
            shrink: 0.4,
        }
    }
}

impl MoonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.phase_step.is_finite() && self.phase_step > 0.0 && self.phase_step < PI) {
            return Err(ConfigError::InvalidPhaseStep(self.phase_step));
        }
        let non_negative = [
            ("amplitude", self.amplitude),
            ("orbit_radius", self.orbit_radius),
            ("recession", self.recession),
            ("recession_base", self.recession_base),
            ("base_size", self.base_size),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidMoon(name));
            }
        }
        if !self.azimuth.is_finite() {
            return Err(ConfigError::InvalidMoon("azimuth"));
        }
        if !(0.0..=1.0).contains(&self.shrink) {
            return Err(ConfigError::InvalidMoon("shrink"));
        }
        Ok(())
    }
}

/// Decorative animation parameters for the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Rotation of the whole lattice about the vertical axis, radians per second.
    pub lattice_spin: f32,
    /// Ticks between lightning toggles. Zero disables lightning.
    pub lightning_interval: u64,
    /// Chance per tick that a lattice pyramid flickers.
    pub flicker_chance: f32,
    /// Angular frequency of the pyramid glow pulse.
    pub pulse_rate: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            lattice_spin: 0.6,
            lightning_interval: 180,
            flicker_chance: 0.05,
            pulse_rate: 3.0,
        }
    }
}

impl FrameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lattice_spin.is_finite() {
            return Err(ConfigError::InvalidFrame("lattice_spin"));
        }
        if !self.pulse_rate.is_finite() {
            return Err(ConfigError::InvalidFrame("pulse_rate"));
        }
        if !(0.0..=1.0).contains(&self.flicker_chance) {
            return Err(ConfigError::InvalidFrame("flicker_chance"));
        }
        Ok(())
    }
}

/// Everything needed to build a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub lattice: LatticeConfig,
    pub confinement: Confinement,
    pub restitution: f32,
    pub spawn: SpawnConfig,
    pub moon: MoonConfig,
    pub frame: FrameConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeConfig::default(),
            confinement: Confinement::Radial,
            restitution: DEFAULT_RESTITUTION,
            spawn: SpawnConfig::default(),
            moon: MoonConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check every parameter that could make the scene ill-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lattice()?;
        self.confinement_rule()?;
        self.moon.validate()?;
        self.frame.validate()
    }

    /// Build the lattice described by this config.
    pub fn lattice(&self) -> Result<Lattice, ConfigError> {
        Lattice::new(self.lattice.radius, self.lattice.half_height)
    }

    /// Build the confinement rule described by this config.
    pub fn confinement_rule(&self) -> Result<ConfinementRule, ConfigError> {
        ConfinementRule::new(self.confinement, self.restitution)
    }
}
