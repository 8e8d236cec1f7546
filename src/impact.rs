//! Impact parameter derivation and the staged impact sequence.
//!
//! The sliders of the host UI produce three numbers - diameter (meters),
//! approach velocity (km/s), entry angle (degrees). This module turns them
//! into emitter parameters: burst sizes, ring targets, speed and scale
//! factors. None of it is orbital mechanics; the formulas are the visual
//! tuning of the impact pages, normalized.
//!
//! [`ImpactSequence`] drives a full strike as a two-stage state machine the
//! host ticks alongside the engine:
//!
//! 1. **Approach** - the meteor body advances along the entry angle,
//!    dropping a trail particle every tick and sparks probabilistically.
//! 2. **Aftermath** - on ground contact, one burst of concentric shockwave
//!    rings, debris, and dust; the sequence then idles while the engine
//!    decays the burst.
//!
//! ```ignore
//! let params = ImpactParams::new(370.0, 30.7, 45.0);
//! let mut strike = ImpactSequence::new(&engine, params);
//!
//! // Host animation callback:
//! strike.tick(&mut engine, 1.0);
//! engine.tick(1.0);
//! engine.render(&mut surface);
//! strike.render_overlay(&mut surface);
//! if strike.is_finished(&engine) { /* stop requesting frames */ }
//! ```

use crate::emitter::{Span, SpawnOverrides, Spread};
use crate::engine::Engine;
use crate::particle::ParticleKind;
use crate::surface::Surface;
use crate::visuals::{glow_intensity, Palette, MAX_GLOW_SPEED_FACTOR};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Distance of the ground line above the bottom edge.
const GROUND_INSET: f32 = 14.0;

/// Glow radius of the meteor body at speed factor 1.
const BODY_GLOW: f32 = 28.0;

/// Slider inputs describing the strike.
///
/// Values are sanitized on construction: non-finite inputs fall back to the
/// pages' slider defaults and the rest clamp to the slider ranges, so every
/// derived quantity is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactParams {
    diameter_m: f32,
    velocity_kms: f32,
    angle_deg: f32,
}

impl ImpactParams {
    /// Sanitize raw slider values.
    pub fn new(diameter_m: f32, velocity_kms: f32, angle_deg: f32) -> Self {
        let diameter_m = if diameter_m.is_finite() { diameter_m.clamp(1.0, 10_000.0) } else { 100.0 };
        let velocity_kms = if velocity_kms.is_finite() { velocity_kms.clamp(1.0, 100.0) } else { 20.0 };
        let angle_deg = if angle_deg.is_finite() { angle_deg.clamp(5.0, 90.0) } else { 45.0 };
        Self {
            diameter_m,
            velocity_kms,
            angle_deg,
        }
    }

    /// Impactor diameter in meters.
    #[inline]
    pub fn diameter_m(&self) -> f32 {
        self.diameter_m
    }

    /// Approach velocity in km/s.
    #[inline]
    pub fn velocity_kms(&self) -> f32 {
        self.velocity_kms
    }

    /// Entry angle in degrees from horizontal.
    #[inline]
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    /// Overall visual size multiplier: clamp(diameter / 180, 0.5, 1.8).
    pub fn visual_scale(&self) -> f32 {
        (self.diameter_m / 180.0).clamp(0.5, 1.8)
    }

    /// Velocity-derived intensity multiplier: clamp(velocity / 15, 0.6, 3.0).
    pub fn speed_factor(&self) -> f32 {
        (self.velocity_kms / 15.0).clamp(0.6, 3.0)
    }

    /// On-screen radius of the meteor body.
    pub fn body_radius(&self) -> f32 {
        (self.diameter_m / 18.0 * self.visual_scale()).max(5.0)
    }

    /// Number of concentric shockwave rings in the burst.
    pub fn ring_count(&self) -> usize {
        3 + (self.diameter_m / 120.0).min(4.0).round() as usize
    }

    /// Target radius of ring `index` (outer rings reach further).
    pub fn ring_max_radius(&self, index: usize) -> f32 {
        (self.diameter_m * (1.6 + 0.18 * index as f32)).max(80.0)
    }

    /// Debris fragments thrown by the burst.
    pub fn debris_count(&self) -> usize {
        (26.0 + 12.0 * self.diameter_m / 200.0).round() as usize
    }

    /// Dust particles raised by the burst.
    pub fn dust_count(&self) -> usize {
        (40.0 + 20.0 * self.diameter_m / 200.0).round() as usize
    }

    /// Trail segment decay; slow strikes leave longer-lived trails.
    pub fn trail_decay(&self) -> f32 {
        0.022 * (1.0 + 0.5 / self.speed_factor())
    }

    /// Chance per tick of shedding a spark during approach.
    pub fn spark_chance(&self) -> f32 {
        0.42 * (self.speed_factor() / 1.2).min(1.4)
    }

    /// Radial growth per tick of the shockwave rings.
    pub fn ring_growth(&self) -> f32 {
        3.6 * (1.0 + 0.4 * self.speed_factor())
    }
}

/// Phase of an [`ImpactSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Meteor in flight, shedding trail and sparks.
    Approach,
    /// Burst spawned; waiting for the engine to decay it.
    Aftermath,
}

/// Host-ticked driver for one complete strike.
///
/// Owns only the meteor body state; every particle lives in the engine.
/// The sequence never schedules callbacks - cancellation is the host
/// dropping it.
pub struct ImpactSequence {
    params: ImpactParams,
    position: Vec2,
    velocity: Vec2,
    ground_y: f32,
    stage: Stage,
    rng: SmallRng,
}

impl ImpactSequence {
    /// Start an approach sized to the engine's current surface.
    pub fn new(engine: &Engine, params: ImpactParams) -> Self {
        let (width, height) = engine.surface_config().dimensions();

        let angle = params.angle_deg().to_radians();
        let pace = params.velocity_kms() * 0.54 * params.speed_factor();
        let velocity = Vec2::new(
            angle.cos() * pace * 0.05 * (width / 300.0).max(0.6),
            angle.sin() * pace * 0.05 * (height / 200.0).max(0.6),
        );

        Self {
            params,
            position: Vec2::new((width * 0.08).max(40.0), -30.0),
            velocity,
            ground_y: height - GROUND_INSET,
            stage: Stage::Approach,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reseed the sequence's spark RNG for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Current stage.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Meteor body position (meaningful during approach).
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Advance the sequence by `dt` ticks, spawning into `engine`.
    ///
    /// Call before `engine.tick`, never from inside a render pass.
    pub fn tick(&mut self, engine: &mut Engine, dt: f32) {
        if self.stage != Stage::Approach {
            return;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.position += self.velocity * dt;

        let body = self.params.body_radius();
        let trail = SpawnOverrides {
            radius: Some(Span::new(body * 0.6, body * 1.5)),
            decay: Some(Span::fixed(self.params.trail_decay())),
            velocity_bias: self.velocity * 0.02,
            ..SpawnOverrides::default()
        };
        engine.spawn(ParticleKind::Trail, 1, self.position.x, self.position.y, &trail);

        if self.rng.gen::<f32>() < self.params.spark_chance() * dt.min(1.0) {
            let spark = SpawnOverrides {
                spread: Some(Spread::Disk(body)),
                velocity_bias: self.velocity * 0.02,
                ..SpawnOverrides::default()
            };
            engine.spawn(ParticleKind::Spark, 1, self.position.x, self.position.y, &spark);
        }

        if self.position.y + body >= self.ground_y {
            self.position.y = self.ground_y;
            self.spawn_aftermath(engine);
            self.stage = Stage::Aftermath;
        }
    }

    /// True once the burst has been spawned and every particle has decayed.
    pub fn is_finished(&self, engine: &Engine) -> bool {
        self.stage == Stage::Aftermath && engine.is_quiescent()
    }

    /// Draw the meteor body and its streak on top of the engine's output.
    ///
    /// The body is host state, not a particle, so it renders as an overlay
    /// after [`Engine::render`].
    pub fn render_overlay<S: Surface>(&self, surface: &mut S) {
        if self.stage != Stage::Approach {
            return;
        }
        let body = self.params.body_radius();
        let speed_factor = self.params.speed_factor();
        let color = Palette::Ember.sample(0.0);
        let glow = glow_intensity(BODY_GLOW, 1.0, Some(speed_factor.min(MAX_GLOW_SPEED_FACTOR)));

        let streak = self.velocity.normalize_or_zero() * body * 6.0;
        surface.line(
            self.position - streak,
            self.position,
            body * 0.35,
            color,
            0.7,
            glow * 0.5,
        );
        surface.fill_circle(self.position, body, color, 1.0, glow);
    }

    /// One-shot burst at ground contact: staggered concentric rings, then
    /// debris and dust aimed out of the crater.
    fn spawn_aftermath(&mut self, engine: &mut Engine) {
        let x = self.position.x;
        let y = self.ground_y;
        let params = &self.params;

        for ring in 0..params.ring_count() {
            let overrides = SpawnOverrides {
                radius: Some(Span::fixed(6.0 + 6.0 * ring as f32)),
                opacity: Some(Span::fixed(0.95 - 0.12 * ring as f32)),
                growth: Some(Span::fixed(params.ring_growth())),
                max_radius: Some(Span::fixed(params.ring_max_radius(ring))),
                ..SpawnOverrides::default()
            };
            engine.spawn(ParticleKind::Shockwave, 1, x, y, &overrides);
        }

        let debris = SpawnOverrides {
            speed_scale: params.speed_factor() / 1.05,
            ..SpawnOverrides::default()
        };
        engine.spawn(ParticleKind::Debris, params.debris_count(), x, y, &debris);

        let dust = SpawnOverrides {
            speed_scale: params.speed_factor() / 1.1,
            ..SpawnOverrides::default()
        };
        engine.spawn(ParticleKind::Dust, params.dust_count(), x, y, &dust);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_sanitize_non_finite() {
        let p = ImpactParams::new(f32::NAN, f32::INFINITY, f32::NAN);
        assert_eq!(p.diameter_m(), 100.0);
        assert_eq!(p.velocity_kms(), 20.0);
        assert_eq!(p.angle_deg(), 45.0);
    }

    #[test]
    fn test_visual_scale_clamps() {
        assert_eq!(ImpactParams::new(10.0, 20.0, 45.0).visual_scale(), 0.5);
        assert_eq!(ImpactParams::new(9000.0, 20.0, 45.0).visual_scale(), 1.8);
        let mid = ImpactParams::new(180.0, 20.0, 45.0).visual_scale();
        assert!((mid - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_factor_clamps() {
        assert_eq!(ImpactParams::new(100.0, 1.0, 45.0).speed_factor(), 0.6);
        assert_eq!(ImpactParams::new(100.0, 99.0, 45.0).speed_factor(), 3.0);
    }

    #[test]
    fn test_ring_count_bounds() {
        assert_eq!(ImpactParams::new(1.0, 20.0, 45.0).ring_count(), 3);
        assert_eq!(ImpactParams::new(9000.0, 20.0, 45.0).ring_count(), 7);
    }

    #[test]
    fn test_burst_counts_scale_with_diameter() {
        let small = ImpactParams::new(50.0, 20.0, 45.0);
        let large = ImpactParams::new(1000.0, 20.0, 45.0);
        assert!(large.debris_count() > small.debris_count());
        assert!(large.dust_count() > small.dust_count());
        assert_eq!(small.debris_count(), 29);
        assert_eq!(small.dust_count(), 45);
    }

    #[test]
    fn test_ring_max_radius_staggered_and_floored() {
        let p = ImpactParams::new(200.0, 20.0, 45.0);
        assert!(p.ring_max_radius(1) > p.ring_max_radius(0));

        let tiny = ImpactParams::new(10.0, 20.0, 45.0);
        assert_eq!(tiny.ring_max_radius(0), 80.0);
    }

    #[test]
    fn test_sequence_runs_to_quiescence() {
        let mut engine = Engine::new().with_seed(11);
        engine.configure_surface(800.0, 600.0, 1.0);

        let params = ImpactParams::new(200.0, 25.0, 45.0);
        let mut strike = ImpactSequence::new(&engine, params).with_seed(11);
        assert_eq!(strike.stage(), Stage::Approach);

        for _ in 0..3000 {
            strike.tick(&mut engine, 1.0);
            engine.tick(1.0);
            if strike.is_finished(&engine) {
                break;
            }
        }
        assert_eq!(strike.stage(), Stage::Aftermath);
        assert!(strike.is_finished(&engine));
    }

    #[test]
    fn test_aftermath_spawns_all_burst_kinds() {
        let mut engine = Engine::new().with_seed(5);
        engine.configure_surface(800.0, 600.0, 1.0);

        let params = ImpactParams::new(300.0, 20.0, 60.0);
        let mut strike = ImpactSequence::new(&engine, params).with_seed(5);

        while strike.stage() == Stage::Approach {
            strike.tick(&mut engine, 1.0);
        }

        assert_eq!(engine.count_of(ParticleKind::Shockwave), params.ring_count());
        assert_eq!(engine.count_of(ParticleKind::Debris), params.debris_count());
        assert_eq!(engine.count_of(ParticleKind::Dust), params.dust_count());
    }
}
