//! Emitter configurations for the built-in particle kinds.
//!
//! An emitter is data, not a running object: a set of randomized
//! `(min, max)` ranges describing how to initialize one kind of particle.
//! The engine keeps one configuration per kind and samples it on every
//! [`spawn`](crate::Engine::spawn) call. All ranges are explicit so tests
//! can inject fixed values instead of relying on ambient randomness.
//!
//! # Presets
//!
//! | Preset | Kind | Character |
//! |--------|------|-----------|
//! | [`EmitterConfig::star`] | `Star` | dim, persistent, twinkling |
//! | [`EmitterConfig::trail`] | `Trail` | warm segments fading in place |
//! | [`EmitterConfig::spark`] | `Spark` | fast flecks with light gravity |
//! | [`EmitterConfig::debris`] | `Debris` | heavy fragments on arcs |
//! | [`EmitterConfig::dust`] | `Dust` | slow ash settling out |
//! | [`EmitterConfig::shockwave`] | `Shockwave` | expanding stroked rings |
//!
//! ```ignore
//! // Slower, longer-lived dust than the default preset
//! let mut dust = EmitterConfig::dust();
//! dust.decay = Span::new(0.002, 0.006);
//! engine = engine.with_emitter(dust);
//! ```

use crate::particle::{Particle, ParticleKind};
use crate::spawn::SpawnContext;
use crate::visuals::{ColorMapping, Palette, Style};
use glam::Vec2;
use std::f32::consts::TAU;

/// Smallest radius a spawned particle may have.
const MIN_RADIUS: f32 = 0.05;

/// An inclusive-exclusive randomized range.
///
/// Sampled uniformly at spawn time; a span with `min == max` always yields
/// `min`, which is how overrides pin an attribute to an exact value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    /// Range from `min` to `max`.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always samples to `value`.
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Draw one value from the range.
    #[inline]
    pub fn sample(&self, ctx: &mut SpawnContext<'_>) -> f32 {
        ctx.random_range(self.min, self.max)
    }
}

/// Where a batch scatters its particles relative to the spawn origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spread {
    /// Exactly at the origin.
    Point,
    /// Uniformly within a disk of this radius around the origin.
    Disk(f32),
    /// Uniformly over the whole configured surface; origin is ignored.
    Surface,
}

/// How to generate one kind of particle.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    /// Which kind this configuration produces.
    pub kind: ParticleKind,
    /// Scatter shape around the spawn origin.
    pub spread: Spread,
    /// Visual radius range.
    pub radius: Span,
    /// Initial speed range; direction is uniformly random.
    pub speed: Span,
    /// Vertical component multiplier applied after direction sampling.
    ///
    /// Debris flies flatter than a uniform circle (0.6 in the impact
    /// pages); 1.0 leaves the direction untouched.
    pub vertical_squash: f32,
    /// Constant upward kick subtracted from the initial vertical velocity.
    pub lift: f32,
    /// Initial opacity range; samples clamp into [0, 1].
    pub opacity: Span,
    /// Opacity lost per tick.
    pub decay: Span,
    /// Downward acceleration per tick.
    pub gravity: Span,
    /// Per-tick horizontal velocity retention (1.0 = no drag).
    pub drag: f32,
    /// Lifetime in ticks, if bounded.
    pub lifetime: Option<Span>,
    /// Ring radius growth per tick (shockwave only).
    pub growth: Span,
    /// Ring target radius (shockwave only).
    pub max_radius: Span,
    /// Render style for this kind.
    pub style: Style,
    /// Cap on simultaneously active particles of this kind.
    pub max_active: usize,
}

impl EmitterConfig {
    /// The default configuration for the given kind.
    pub fn preset(kind: ParticleKind) -> Self {
        match kind {
            ParticleKind::Star => Self::star(),
            ParticleKind::Dust => Self::dust(),
            ParticleKind::Debris => Self::debris(),
            ParticleKind::Trail => Self::trail(),
            ParticleKind::Spark => Self::spark(),
            ParticleKind::Shockwave => Self::shockwave(),
        }
    }

    /// Background starfield: dim, persistent, scattered over the surface.
    pub fn star() -> Self {
        Self {
            kind: ParticleKind::Star,
            spread: Spread::Surface,
            radius: Span::new(0.2, 1.6),
            speed: Span::fixed(0.0),
            vertical_squash: 1.0,
            lift: 0.0,
            opacity: Span::new(0.08, 0.48),
            decay: Span::fixed(0.0),
            gravity: Span::fixed(0.0),
            drag: 1.0,
            lifetime: None,
            growth: Span::fixed(0.0),
            max_radius: Span::fixed(0.0),
            style: Style {
                palette: Palette::Starlight,
                mapping: ColorMapping::Opacity,
                stroke: None,
                glow: 0.0,
            },
            max_active: 400,
        }
    }

    /// Meteor trail segments that fade where they were dropped.
    pub fn trail() -> Self {
        Self {
            kind: ParticleKind::Trail,
            spread: Spread::Point,
            radius: Span::new(3.0, 10.0),
            speed: Span::fixed(0.0),
            vertical_squash: 1.0,
            lift: 0.0,
            opacity: Span::fixed(1.0),
            decay: Span::new(0.022, 0.04),
            gravity: Span::fixed(0.0),
            drag: 1.0,
            lifetime: None,
            growth: Span::fixed(0.0),
            max_radius: Span::fixed(0.0),
            style: Style {
                palette: Palette::Ember,
                mapping: ColorMapping::Speed { max: 15.0 },
                stroke: None,
                glow: 10.0,
            },
            max_active: 90,
        }
    }

    /// Hot flecks thrown off a moving meteor.
    pub fn spark() -> Self {
        Self {
            kind: ParticleKind::Spark,
            spread: Spread::Disk(6.0),
            radius: Span::new(0.6, 2.6),
            speed: Span::new(0.2, 2.5),
            vertical_squash: 1.0,
            lift: 0.0,
            opacity: Span::fixed(1.0),
            decay: Span::fixed(0.02),
            gravity: Span::fixed(0.04),
            drag: 1.0,
            lifetime: None,
            growth: Span::fixed(0.0),
            max_radius: Span::fixed(0.0),
            style: Style {
                palette: Palette::Ember,
                mapping: ColorMapping::Fixed,
                stroke: None,
                glow: 0.0,
            },
            max_active: 300,
        }
    }

    /// Rock fragments on ballistic arcs away from the impact point.
    pub fn debris() -> Self {
        Self {
            kind: ParticleKind::Debris,
            spread: Spread::Point,
            radius: Span::new(1.6, 5.2),
            speed: Span::new(1.0, 4.0),
            vertical_squash: 0.6,
            lift: 1.0,
            opacity: Span::fixed(1.0),
            decay: Span::fixed(0.012),
            gravity: Span::new(0.12, 0.2),
            drag: 0.996,
            lifetime: None,
            growth: Span::fixed(0.0),
            max_radius: Span::fixed(0.0),
            style: Style {
                palette: Palette::Ash,
                mapping: ColorMapping::Fixed,
                stroke: None,
                glow: 0.0,
            },
            max_active: 600,
        }
    }

    /// Fine ash spreading slowly from the impact point.
    pub fn dust() -> Self {
        Self {
            kind: ParticleKind::Dust,
            spread: Spread::Disk(3.0),
            radius: Span::new(0.6, 2.6),
            speed: Span::new(0.4, 2.2),
            vertical_squash: 0.35,
            lift: 0.4,
            opacity: Span::new(0.9, 1.0),
            decay: Span::new(0.004, 0.014),
            gravity: Span::new(0.02, 0.05),
            drag: 0.998,
            lifetime: None,
            growth: Span::fixed(0.0),
            max_radius: Span::fixed(0.0),
            style: Style {
                palette: Palette::Ash,
                mapping: ColorMapping::Opacity,
                stroke: None,
                glow: 0.0,
            },
            max_active: 800,
        }
    }

    /// Expanding concentric blast rings.
    pub fn shockwave() -> Self {
        Self {
            kind: ParticleKind::Shockwave,
            spread: Spread::Point,
            radius: Span::new(6.0, 24.0),
            speed: Span::fixed(0.0),
            vertical_squash: 1.0,
            lift: 0.0,
            opacity: Span::new(0.6, 0.95),
            decay: Span::fixed(0.013),
            gravity: Span::fixed(0.0),
            drag: 1.0,
            lifetime: None,
            growth: Span::new(3.6, 6.0),
            max_radius: Span::new(80.0, 320.0),
            style: Style {
                palette: Palette::RingFire,
                mapping: ColorMapping::Opacity,
                stroke: Some(3.0),
                glow: 0.0,
            },
            max_active: 16,
        }
    }

    /// Build one particle from this configuration.
    ///
    /// `surface` is the logical (width, height), used by
    /// [`Spread::Surface`]. Overrides replace individual ranges without
    /// touching the stored configuration.
    pub(crate) fn create(
        &self,
        ctx: &mut SpawnContext<'_>,
        origin: Vec2,
        surface: (f32, f32),
        overrides: &SpawnOverrides,
    ) -> Particle {
        let spread = overrides.spread.unwrap_or(self.spread);
        let position = match spread {
            Spread::Point => origin,
            Spread::Disk(r) => origin + ctx.random_in_disk(r),
            Spread::Surface => ctx.random_in_rect(surface.0, surface.1),
        };

        let speed_span = overrides.speed.unwrap_or(self.speed);
        let speed = speed_span.sample(ctx) * overrides.speed_scale;
        let mut velocity = ctx.random_direction() * speed;
        velocity.y = velocity.y * self.vertical_squash - self.lift;
        velocity += overrides.velocity_bias;

        let mut particle = Particle::new(self.kind, position);
        particle.velocity = velocity;
        particle.radius = overrides
            .radius
            .unwrap_or(self.radius)
            .sample(ctx)
            .max(MIN_RADIUS);
        particle.opacity = overrides
            .opacity
            .unwrap_or(self.opacity)
            .sample(ctx)
            .clamp(0.0, 1.0);
        particle.decay = overrides.decay.unwrap_or(self.decay).sample(ctx).max(0.0);
        particle.gravity = match overrides.gravity {
            Some(g) => g,
            None => self.gravity.sample(ctx),
        };
        particle.drag = overrides.drag.unwrap_or(self.drag).clamp(0.0, 1.0);
        particle.ttl = overrides
            .lifetime
            .or(self.lifetime)
            .map(|span| span.sample(ctx).max(0.0));
        particle.phase = ctx.random_range(0.0, TAU);
        particle.growth = overrides.growth.unwrap_or(self.growth).sample(ctx).max(0.0);
        particle.max_radius = overrides
            .max_radius
            .unwrap_or(self.max_radius)
            .sample(ctx)
            .max(0.0);
        particle
    }
}

/// Per-spawn adjustments layered over an emitter configuration.
///
/// The common case is aiming a burst: a velocity bias pushes every spawned
/// particle away from an impact point, a speed scale makes a bigger strike
/// throw harder. Everything else pins a single attribute for this batch
/// only.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnOverrides {
    /// Added to every spawned particle's initial velocity.
    pub velocity_bias: Vec2,
    /// Multiplier on the sampled speed.
    pub speed_scale: f32,
    /// Replace the scatter shape.
    pub spread: Option<Spread>,
    /// Replace the radius range.
    pub radius: Option<Span>,
    /// Replace the speed range.
    pub speed: Option<Span>,
    /// Replace the opacity range.
    pub opacity: Option<Span>,
    /// Replace the decay range.
    pub decay: Option<Span>,
    /// Pin gravity to an exact value.
    pub gravity: Option<f32>,
    /// Replace the drag factor.
    pub drag: Option<f32>,
    /// Replace the lifetime range.
    pub lifetime: Option<Span>,
    /// Replace the ring growth range.
    pub growth: Option<Span>,
    /// Replace the ring target radius range.
    pub max_radius: Option<Span>,
}

impl Default for SpawnOverrides {
    fn default() -> Self {
        Self {
            velocity_bias: Vec2::ZERO,
            speed_scale: 1.0,
            spread: None,
            radius: None,
            speed: None,
            opacity: None,
            decay: None,
            gravity: None,
            drag: None,
            lifetime: None,
            growth: None,
            max_radius: None,
        }
    }
}

impl SpawnOverrides {
    /// No adjustments; spawn straight from the emitter configuration.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when every numeric field is finite.
    pub(crate) fn is_finite(&self) -> bool {
        self.velocity_bias.is_finite() && self.speed_scale.is_finite()
    }
}
