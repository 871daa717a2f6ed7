//! Depth integration and lattice confinement.
//!
//! The planar stepper only knows about `(x, y)`. Depth motion and the
//! boundary response live here, so that a body leaving the envelope is
//! corrected on both horizontal axes in the same tick.
//!
//! # Correction
//!
//! When `sqrt(x² + z²)` exceeds the allowed radius at the body's height, the
//! body is projected radially back onto the envelope (`x` and `z` scaled by
//! `allowed / radius`, direction from the vertical axis preserved) and its
//! whole velocity, planar and depth, is reversed and damped by the
//! restitution factor.
//!
//! # Modes
//!
//! ```ignore
//! ConfinementRule::new(Confinement::Radial, 0.8)?;                // default
//! ConfinementRule::new(Confinement::RadialWithHeightClamp, 0.8)?; // also clamps |y| to H
//! ```

use serde::{Deserialize, Serialize};

use crate::body::{BodyId, SimulatedBody};
use crate::error::ConfigError;
use crate::lattice::Lattice;

/// Default coefficient of restitution on a boundary bounce.
pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// Which boundary conditions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confinement {
    /// Radial projection against the tapering envelope only.
    ///
    /// Height is never clamped directly; bodies are seeded inside the height
    /// band and the velocity reversal on each bounce turns them back.
    #[default]
    Radial,

    /// Radial projection plus a hard clamp of `|y|` to the half-height.
    ///
    /// A body above a tip is snapped to the tip and bounced, as part of the
    /// same boundary event as the radial correction.
    RadialWithHeightClamp,
}

/// What happened to a body during [`ConfinementRule::enforce`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEvent {
    pub id: BodyId,
    /// `x` and `z` were projected back onto the envelope.
    pub radial: bool,
    /// `y` was clamped to a tip.
    pub vertical: bool,
    /// How far outside the envelope the body was, before correction.
    pub overshoot: f32,
}

/// Confinement mode plus bounce damping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfinementRule {
    mode: Confinement,
    restitution: f32,
}

impl ConfinementRule {
    /// Create a rule. `restitution` must lie in `[0, 1]`.
    pub fn new(mode: Confinement, restitution: f32) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(ConfigError::InvalidRestitution(restitution));
        }
        Ok(Self { mode, restitution })
    }

    #[inline]
    pub fn mode(&self) -> Confinement {
        self.mode
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Advance depth by one tick: `depth += depth_velocity * dt`.
    #[inline]
    pub fn integrate_depth(&self, body: &mut SimulatedBody, dt: f32) {
        body.depth += body.depth_velocity * dt;
    }

    /// Pull a body back inside the lattice if it has left it.
    ///
    /// Returns `None` when the body was already inside and nothing changed.
    ///
    /// A body whose position overflowed during integration is treated as
    /// having left through the boundary: a non-finite height is pinned to the
    /// nearest tip (or the waist for NaN) and a non-finite axial offset is
    /// collapsed onto the axis. Positions therefore stay finite whatever `dt`
    /// the host passed.
    pub fn enforce(&self, lattice: &Lattice, body: &mut SimulatedBody) -> Option<BoundaryEvent> {
        let half_height = lattice.half_height();
        let runaway_height = !body.position.y.is_finite();
        if runaway_height {
            body.position.y = if body.position.y.is_nan() {
                0.0
            } else {
                half_height.copysign(body.position.y)
            };
        }

        let y = body.position.y;
        let radius = body.axial_radius();
        let allowed = lattice.allowed_radius(y);
        let runaway_radius = !radius.is_finite();

        // radius == 0 always satisfies allowed >= 0; checked anyway so the
        // division below can never see a zero denominator.
        let radial = runaway_radius || (radius > allowed && radius > 0.0);
        let vertical = runaway_height
            || (self.mode == Confinement::RadialWithHeightClamp && y.abs() > half_height);

        if !radial && !vertical {
            return None;
        }

        if runaway_radius {
            body.position.x = 0.0;
            body.depth = 0.0;
        } else if radial {
            let scale = allowed / radius;
            body.position.x *= scale;
            body.depth *= scale;
        }
        if vertical && !runaway_height {
            body.position.y = half_height.copysign(y);
        }

        body.velocity *= -self.restitution;
        body.depth_velocity *= -self.restitution;

        Some(BoundaryEvent {
            id: body.id,
            radial,
            vertical,
            overshoot: if runaway_radius {
                f32::INFINITY
            } else {
                (radius - allowed).max(0.0)
            },
        })
    }
}

impl Default for ConfinementRule {
    fn default() -> Self {
        Self {
            mode: Confinement::Radial,
            restitution: DEFAULT_RESTITUTION,
        }
    }
}
