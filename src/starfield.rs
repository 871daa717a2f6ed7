//! The static constellation overlay.

use glam::Vec3;
use serde::Serialize;

/// Distance of the constellation plane behind the scene.
pub const STAR_DEPTH: f32 = -400.0;

/// One fixed star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub position: Vec3,
    /// Base diameter before twinkle.
    pub size: f32,
    pub name: Option<&'static str>,
}

impl Star {
    /// Brightness multiplier in `[0.4, 1.0]` at `elapsed` seconds.
    ///
    /// Each star's x coordinate offsets its cycle.
    #[inline]
    pub fn twinkle(&self, elapsed: f32) -> f32 {
        (elapsed * 3.0 + self.position.x).sin() * 0.3 + 0.7
    }
}

/// Immutable star positions and the lines joining them.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticField {
    stars: Vec<Star>,
    lines: Vec<(usize, usize)>,
}

impl StaticField {
    /// Build a field. Lines referring to missing stars are dropped.
    pub fn new(stars: Vec<Star>, lines: Vec<(usize, usize)>) -> Self {
        let n = stars.len();
        let lines = lines.into_iter().filter(|&(a, b)| a < n && b < n).collect();
        Self { stars, lines }
    }

    /// Pisces: the western fish, the cord, and the eastern fish.
    ///
    /// Consecutive stars are joined, except the western fish's last star,
    /// which is left unconnected to the cord.
    pub fn pisces() -> Self {
        const PISCES: [(f32, f32, f32); 17] = [
            // Western fish
            (-200.0, 150.0, 3.0),
            (-180.0, 140.0, 2.0),
            (-160.0, 135.0, 2.0),
            (-140.0, 145.0, 2.0),
            (-120.0, 160.0, 2.0),
            (-100.0, 170.0, 3.0),
            // Cord
            (-80.0, 165.0, 1.0),
            (-60.0, 160.0, 1.0),
            (-40.0, 155.0, 1.0),
            (-20.0, 150.0, 1.0),
            (0.0, 145.0, 2.0),
            // Eastern fish
            (20.0, 140.0, 2.0),
            (40.0, 135.0, 2.0),
            (60.0, 140.0, 3.0),
            (80.0, 150.0, 2.0),
            (100.0, 165.0, 2.0),
            (120.0, 175.0, 3.0),
        ];

        let stars = PISCES
            .iter()
            .enumerate()
            .map(|(i, &(x, y, size))| Star {
                position: Vec3::new(x, y, STAR_DEPTH),
                size,
                name: (i == 0).then_some("Alrescha"),
            })
            .collect::<Vec<_>>();

        let lines = (0..stars.len() - 1)
            .filter(|&i| i != 5)
            .map(|i| (i, i + 1))
            .collect();

        Self::new(stars, lines)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn lines(&self) -> &[(usize, usize)] {
        &self.lines
    }

    /// Line segments as endpoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.lines
            .iter()
            .map(|&(a, b)| (self.stars[a].position, self.stars[b].position))
    }
}
