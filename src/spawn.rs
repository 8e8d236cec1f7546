//! Spawn context for particle initialization.
//!
//! Provides helper methods to reduce boilerplate when spawning particles.
//! The context borrows the engine's RNG, so a seeded engine produces the
//! same particles on every run - tests inject a seed instead of relying on
//! ambient randomness.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Context handed to spawn logic, one per particle being created.
///
/// Instead of manually sampling ranges and computing random offsets, use the
/// helper methods:
///
/// ```ignore
/// let offset = ctx.random_in_disk(meteor_radius);
/// let velocity = ctx.outward_velocity(offset, ctx.random_range(1.0, 4.0));
/// ```
pub struct SpawnContext<'a> {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles in this spawn batch.
    pub count: u32,
    /// Engine RNG, shared across the batch.
    rng: &'a mut SmallRng,
}

impl<'a> SpawnContext<'a> {
    /// Create a spawn context for one particle of a batch.
    pub(crate) fn new(index: u32, count: u32, rng: &'a mut SmallRng) -> Self {
        Self { index, count, rng }
    }

    /// Normalized progress through the batch (0.0 to 1.0).
    ///
    /// Useful for staggering attributes across a burst:
    /// ```ignore
    /// let angle = ctx.progress() * TAU;  // Particles around a circle
    /// ```
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.count <= 1 {
            0.0
        } else {
            self.index as f32 / (self.count - 1) as f32
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    ///
    /// Returns `min` when the range is empty or inverted, so degenerate
    /// emitter ranges sample to a fixed value instead of panicking.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// True with the given probability (clamped to [0, 1]).
    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }

    // ========== Position helpers ==========

    /// Random point inside a disk of given radius, centered at origin.
    ///
    /// Distribution is uniform over the area.
    pub fn random_in_disk(&mut self, radius: f32) -> Vec2 {
        let theta = self.rng.gen_range(0.0..TAU);
        // Square root for uniform area distribution
        let r = radius * self.rng.gen::<f32>().sqrt();
        Vec2::new(r * theta.cos(), r * theta.sin())
    }

    /// Random point on a circle of given radius, centered at origin.
    pub fn random_on_ring(&mut self, radius: f32) -> Vec2 {
        let theta = self.rng.gen_range(0.0..TAU);
        Vec2::new(radius * theta.cos(), radius * theta.sin())
    }

    /// Random point inside an axis-aligned rectangle `[0, w) x [0, h)`.
    pub fn random_in_rect(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(
            self.random_range(0.0, width),
            self.random_range(0.0, height),
        )
    }

    // ========== Direction/velocity helpers ==========

    /// Random unit vector.
    pub fn random_direction(&mut self) -> Vec2 {
        let theta = self.rng.gen_range(0.0..TAU);
        Vec2::new(theta.cos(), theta.sin())
    }

    /// Velocity pointing outward from the spawn origin.
    ///
    /// `offset` is the particle's position relative to the origin; particles
    /// spawned exactly at the origin get a random direction instead.
    pub fn outward_velocity(&mut self, offset: Vec2, speed: f32) -> Vec2 {
        if offset.length_squared() > 1e-4 {
            offset.normalize() * speed
        } else {
            self.random_direction() * speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_progress_spans_batch() {
        let mut rng = rng();
        let first = SpawnContext::new(0, 5, &mut rng);
        assert_eq!(first.progress(), 0.0);

        let last = SpawnContext::new(4, 5, &mut rng);
        assert_eq!(last.progress(), 1.0);
    }

    #[test]
    fn test_progress_single_particle() {
        let mut rng = rng();
        let ctx = SpawnContext::new(0, 1, &mut rng);
        assert_eq!(ctx.progress(), 0.0);
    }

    #[test]
    fn test_random_in_disk_bounds() {
        let mut rng = rng();
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        for _ in 0..100 {
            let p = ctx.random_in_disk(0.5);
            assert!(p.length() <= 0.5 + 1e-3);
        }
    }

    #[test]
    fn test_random_range_degenerate() {
        let mut rng = rng();
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        assert_eq!(ctx.random_range(2.0, 2.0), 2.0);
        assert_eq!(ctx.random_range(3.0, 1.0), 3.0);
    }

    #[test]
    fn test_outward_velocity_at_origin_is_nonzero() {
        let mut rng = rng();
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        let v = ctx.outward_velocity(Vec2::ZERO, 2.0);
        assert!((v.length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_seeded_contexts_repeat() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        let va = SpawnContext::new(0, 1, &mut a).random_in_disk(3.0);
        let vb = SpawnContext::new(0, 1, &mut b).random_in_disk(3.0);
        assert_eq!(va, vb);
    }
}
