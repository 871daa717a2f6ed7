//! The body registry.
//!
//! Holds every [`SimulatedBody`] in a scene. It is filled once, at
//! initialization, and never grows or shrinks afterwards; the tick handler
//! mutates bodies in place through [`BodyRegistry::for_each_mut`].

use glam::Vec2;

use crate::body::{BodyId, Shape, SimulatedBody};
use crate::config::{PopulationConfig, SpawnConfig};
use crate::lattice::Lattice;
use crate::spawn::SpawnContext;

/// Which shape a population spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cone,
    HexDisk,
}

/// Owned collection of simulated bodies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyRegistry {
    bodies: Vec<SimulatedBody>,
}

impl BodyRegistry {
    /// `count` cones with the default cone ranges inside the default lattice.
    pub fn create(seed: u64, count: usize) -> Self {
        let mut ctx = SpawnContext::new(seed);
        let mut registry = Self::default();
        let population = PopulationConfig {
            count,
            ..PopulationConfig::cones()
        };
        registry.populate(&mut ctx, &Lattice::default(), ShapeKind::Cone, &population);
        registry
    }

    /// Cones, then hex disks, as described by `spawn`.
    pub fn from_config(seed: u64, spawn: &SpawnConfig, lattice: &Lattice) -> Self {
        let mut ctx = SpawnContext::new(seed);
        let mut registry = Self::default();
        registry.populate(&mut ctx, lattice, ShapeKind::Cone, &spawn.cones);
        registry.populate(&mut ctx, lattice, ShapeKind::HexDisk, &spawn.hexes);
        registry
    }

    /// Append `population.count` freshly randomized bodies.
    ///
    /// Heights are drawn inside the lattice's height band and horizontal
    /// offsets inside the taper at that height, so every body starts
    /// contained.
    fn populate(
        &mut self,
        ctx: &mut SpawnContext,
        lattice: &Lattice,
        kind: ShapeKind,
        population: &PopulationConfig,
    ) {
        let size = population.size.clamped(0.0, f32::MAX);
        let band = population.height_band.abs().min(lattice.half_height());
        let spawn_radius = population.spawn_radius.max(0.0);

        self.bodies.reserve(population.count);
        for _ in 0..population.count {
            let id = BodyId(self.bodies.len() as u32);
            ctx.index = id.0;

            let extent = ctx.random_span(size);
            let shape = match kind {
                ShapeKind::Cone => Shape::cone(extent),
                ShapeKind::HexDisk => Shape::hex_disk(extent),
            };

            let y = ctx.random_symmetric(band);
            let horizontal = ctx.random_in_disk(spawn_radius.min(lattice.allowed_radius(y)));

            let body = SimulatedBody {
                id,
                shape,
                position: Vec2::new(horizontal.x, y),
                velocity: Vec2::new(
                    ctx.random_symmetric(population.speed),
                    ctx.random_symmetric(population.speed),
                ),
                depth: horizontal.y,
                depth_velocity: ctx.random_symmetric(population.depth_speed),
                rotation: ctx.random_orientation(),
                spin: ctx.random_symmetric_vec3(population.spin),
                color: ctx.random_color(
                    population.red,
                    population.green,
                    population.blue,
                    population.alpha,
                ),
                emissive_phase: ctx.random_angle(),
            };
            self.bodies.push(body);
        }
    }

    /// Visit every body mutably, in id order.
    pub fn for_each_mut<F>(&mut self, visit: F)
    where
        F: FnMut(&mut SimulatedBody),
    {
        self.bodies.iter_mut().for_each(visit);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulatedBody> {
        self.bodies.iter()
    }

    pub fn get(&self, id: BodyId) -> Option<&SimulatedBody> {
        self.bodies.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut SimulatedBody> {
        self.bodies.get_mut(id.0 as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn as_slice(&self) -> &[SimulatedBody] {
        &self.bodies
    }
}

impl From<Vec<SimulatedBody>> for BodyRegistry {
    /// Wrap hand-placed bodies, renumbering ids to match their order.
    fn from(mut bodies: Vec<SimulatedBody>) -> Self {
        for (i, body) in bodies.iter_mut().enumerate() {
            body.id = BodyId(i as u32);
        }
        Self { bodies }
    }
}

impl<'a> IntoIterator for &'a BodyRegistry {
    type Item = &'a SimulatedBody;
    type IntoIter = std::slice::Iter<'a, SimulatedBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
