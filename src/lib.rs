//! # moonlattice - procedural night-scene simulator
//!
//! Small decorative bodies drift inside a lattice of four pyramids that meet
//! tip to tip, while a moon crosses the sky on a scripted arc above a fixed
//! constellation. The crate simulates the scene and hands a renderer plain
//! per-frame data; it draws nothing itself.
//!
//! ## Quick Start
//!
//! ```ignore
//! use moonlattice::prelude::*;
//!
//! let mut scene = Scene::builder()
//!     .with_seed(42)
//!     .with_lattice(100.0, 120.0)
//!     .with_cones(50)
//!     .with_hexes(3)
//!     .build()?;
//!
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//! loop {
//!     scene.tick(clock.update());
//!     let frame = scene.frame();
//!     // upload bytemuck::cast_slice(&frame.bodies) and draw
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The lattice
//!
//! The containment volume is a vertical bipyramid with base radius `R` and
//! half-height `H`. At height `y` a body may be at most `R · (1 − |y| / H)`
//! from the vertical axis. See [`Lattice`].
//!
//! ### Bodies
//!
//! Each [`SimulatedBody`] is a small cone or hexagonal disk. Its `(x, y)`
//! motion is stepped by the [`PlanarStepper`]; its depth `z` is integrated and
//! its boundary response applied by the [`ConfinementRule`]. Bodies never
//! collide with each other.
//!
//! ### The moon
//!
//! A [`Moon`] is a phase angle in `[0, π)` plus pure functions of it:
//! position on the arc, apparent size, color, and light intensity. Its
//! reflection sways on a rippling water plane below the lattice; see
//! [`environment`].
//!
//! ### Determinism
//!
//! All randomness comes from the seed given to [`Scene::initialize`] (or
//! [`SceneBuilder::with_seed`]). The same seed, config, and sequence of `dt`
//! values always reproduce the same trajectories.

pub mod body;
pub mod celestial;
pub mod compositor;
pub mod config;
pub mod confinement;
pub mod environment;
mod error;
pub mod lattice;
pub mod physics;
pub mod registry;
pub mod scene;
pub mod spawn;
pub mod starfield;
pub mod time;

pub use body::{BodyId, Shape, SimulatedBody};
pub use celestial::{Moon, MoonState};
pub use compositor::{BodyInstance, Frame, StarInstance, Viewport};
pub use config::{FrameConfig, MoonConfig, PopulationConfig, SceneConfig, Span, SpawnConfig};
pub use confinement::{BoundaryEvent, Confinement, ConfinementRule};
pub use environment::MoonReflection;
pub use error::{ConfigError, SceneError};
pub use glam::{Vec2, Vec3, Vec4};
pub use lattice::Lattice;
pub use physics::PlanarStepper;
pub use registry::BodyRegistry;
pub use scene::{Scene, SceneBuilder, SceneStats, TickSummary};
pub use starfield::{Star, StaticField};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use moonlattice::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::{BodyId, Shape, SimulatedBody};
    pub use crate::celestial::{Moon, MoonState};
    pub use crate::compositor::{BodyInstance, Frame};
    pub use crate::config::SceneConfig;
    pub use crate::confinement::{Confinement, ConfinementRule};
    pub use crate::error::{ConfigError, SceneError};
    pub use crate::lattice::Lattice;
    pub use crate::scene::{Scene, SceneBuilder};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3, Vec4};
}
