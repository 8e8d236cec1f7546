//! The particle engine.
//!
//! One [`Engine`] owns everything for one drawing surface: the active
//! particle set, the per-kind emitter table, the frame clock, and the RNG.
//! There is no ambient state and no self-scheduling - the host calls
//! [`Engine::tick`] then [`Engine::render`] once per animation callback and
//! decides itself when to stop.
//!
//! # Quick Start
//!
//! ```ignore
//! use skyfall::prelude::*;
//!
//! let mut engine = Engine::new().with_seed(42);
//! engine.configure_surface(800.0, 600.0, 1.0);
//!
//! engine.spawn(ParticleKind::Star, 80, 0.0, 0.0, &SpawnOverrides::none());
//! engine.spawn(ParticleKind::Shockwave, 3, 400.0, 300.0, &SpawnOverrides::none());
//!
//! let mut frame = DisplayList::new();
//! while !engine.is_quiescent() {
//!     engine.tick(1.0);
//!     engine.render(&mut frame);
//!     frame.reset();
//! }
//! ```
//!
//! Spawn before `tick`/`render`, never during a render pass.

use crate::emitter::{EmitterConfig, SpawnOverrides};
use crate::particle::{Particle, ParticleKind};
use crate::spawn::SpawnContext;
use crate::surface::{Surface, SurfaceConfig};
use crate::time::FrameClock;
use crate::visuals::glow_intensity;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Converts particle speed into the glow boost for meteor-like kinds.
const GLOW_SPEED_GAIN: f32 = 0.35;

/// A particle engine bound to one drawing surface.
pub struct Engine {
    surface: SurfaceConfig,
    clock: FrameClock,
    particles: Vec<Particle>,
    emitters: [EmitterConfig; ParticleKind::COUNT],
    rng: SmallRng,
}

impl Engine {
    /// Engine with the preset emitter table and an entropy-seeded RNG.
    ///
    /// The surface starts at 1×1; call [`Engine::configure_surface`] with
    /// the host's real dimensions before spawning surface-wide effects.
    pub fn new() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            clock: FrameClock::new(),
            particles: Vec::new(),
            emitters: ParticleKind::ALL.map(EmitterConfig::preset),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reseed the RNG for fully deterministic spawning.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Replace the emitter configuration for its kind.
    pub fn with_emitter(mut self, config: EmitterConfig) -> Self {
        let slot = config.kind.index();
        self.emitters[slot] = config;
        self
    }

    /// The emitter configuration for a kind.
    pub fn emitter(&self, kind: ParticleKind) -> &EmitterConfig {
        &self.emitters[kind.index()]
    }

    /// Mutable access to the emitter configuration for a kind.
    pub fn emitter_mut(&mut self, kind: ParticleKind) -> &mut EmitterConfig {
        &mut self.emitters[kind.index()]
    }

    /// (Re)compute logical drawing dimensions.
    ///
    /// Idempotent and safe to call on every resize event. In-flight
    /// particles are untouched; only future bounds checks and rendering use
    /// the new dimensions. Zero-area inputs clamp to 1×1 and mark the
    /// surface degenerate (see [`SurfaceConfig::is_degenerate`]).
    pub fn configure_surface(&mut self, width_px: f32, height_px: f32, pixel_density: f32) {
        let config = SurfaceConfig::new(width_px, height_px, pixel_density);
        if config.is_degenerate() {
            log::debug!(
                "degenerate surface {}x{} @{}; clamped to 1x1",
                width_px,
                height_px,
                pixel_density
            );
        }
        self.surface = config;
    }

    /// Current surface configuration.
    #[inline]
    pub fn surface_config(&self) -> &SurfaceConfig {
        &self.surface
    }

    /// The engine's frame clock.
    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Set the clock's time scale (slow motion / fast forward).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Create `count` particles of `kind` around `(origin_x, origin_y)`.
    ///
    /// Attributes come from the kind's emitter ranges, adjusted by
    /// `overrides`. No-op for a zero count or non-finite inputs; the
    /// kind's `max_active` cap truncates the batch rather than growing the
    /// active set without bound.
    pub fn spawn(
        &mut self,
        kind: ParticleKind,
        count: usize,
        origin_x: f32,
        origin_y: f32,
        overrides: &SpawnOverrides,
    ) {
        if count == 0 {
            return;
        }
        if !origin_x.is_finite() || !origin_y.is_finite() || !overrides.is_finite() {
            log::debug!("non-finite spawn request for {:?} dropped", kind);
            return;
        }

        let config = &self.emitters[kind.index()];
        let active = self.particles.iter().filter(|p| p.kind == kind).count();
        let budget = config.max_active.saturating_sub(active);
        let accepted = count.min(budget);
        if accepted < count {
            log::debug!(
                "spawn of {} {:?} clamped to {} by max_active {}",
                count,
                kind,
                accepted,
                config.max_active
            );
        }
        if accepted == 0 {
            return;
        }

        let origin = Vec2::new(origin_x, origin_y);
        let dims = self.surface.dimensions();
        self.particles.reserve(accepted);
        for index in 0..accepted {
            let mut ctx = SpawnContext::new(index as u32, accepted as u32, &mut self.rng);
            self.particles
                .push(config.create(&mut ctx, origin, dims, overrides));
        }
    }

    /// Advance every active particle by one logical step scaled by
    /// `delta_factor`, then remove particles that crossed a removal
    /// threshold.
    ///
    /// Runs in time linear in the number of active particles and performs
    /// no per-tick allocation. Non-finite or negative deltas advance the
    /// frame counter but freeze motion.
    pub fn tick(&mut self, delta_factor: f32) {
        let dt = self.clock.advance(delta_factor);
        let (width, height) = self.surface.dimensions();

        self.particles.retain_mut(|p| {
            p.update(dt);
            !p.is_dead(width, height)
        });
    }

    /// Draw every active particle to `surface`, back to front by kind
    /// priority.
    ///
    /// Mutates only the surface, never particle state. A degenerate
    /// surface skips drawing entirely while the simulation continues.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        if self.surface.is_degenerate() {
            return;
        }
        let (width, height) = self.surface.dimensions();
        surface.clear(width, height);

        let elapsed = self.clock.elapsed();
        for kind in ParticleKind::ALL {
            let style = &self.emitters[kind.index()].style;
            for p in self.particles.iter().filter(|p| p.kind == kind) {
                let alpha = p.twinkle_opacity(elapsed);
                if alpha <= 0.0 {
                    continue;
                }
                let speed = p.speed();
                let color = style.color(p.opacity, speed);
                let speed_factor = kind
                    .is_meteor_like()
                    .then(|| 1.0 + GLOW_SPEED_GAIN * speed);
                let glow = glow_intensity(style.glow, alpha, speed_factor);

                match style.stroke {
                    Some(stroke_width) => {
                        surface.stroke_circle(p.position, p.radius, stroke_width, color, alpha, glow)
                    }
                    None => surface.fill_circle(p.position, p.radius, color, alpha, glow),
                }
            }
        }
    }

    /// True when no particles are active - a one-shot sequence has fully
    /// decayed and the host can stop requesting frames.
    #[inline]
    pub fn is_quiescent(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of active particles across all kinds.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of active particles of one kind.
    pub fn count_of(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    /// The active particle set, in spawn order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drop every active particle immediately.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
