//! Particle state and per-kind update behavior.
//!
//! Every particle is the same struct; what distinguishes a drifting star
//! from an expanding shockwave ring is its [`ParticleKind`] tag. Kinds are
//! dispatched through a fixed lookup table of update functions rather than
//! trait objects, so `tick` is one branch-free indexed call per particle and
//! the compiler checks the table covers every variant.
//!
//! # Update order
//!
//! Ballistic kinds integrate in a fixed order, locked by test:
//! position += velocity, then gravity into vertical velocity, then
//! horizontal drag, then opacity decay.

use glam::Vec2;

/// Distance past the surface bounds before an escaped particle is removed.
pub const OFFSCREEN_MARGIN: f32 = 80.0;

/// How far past its maximum radius a ring may grow before removal.
pub const RING_OVERSHOOT: f32 = 60.0;

/// Per-tick phase advance of the twinkle sinusoid.
const TWINKLE_RATE: f32 = 0.035;

/// Floor for twinkled star brightness, so stars never fully vanish.
const TWINKLE_FLOOR: f32 = 0.03;

/// The six built-in particle kinds, ordered back-to-front for rendering.
///
/// | Kind | Motion | Typical use |
/// |------|--------|-------------|
/// | `Star` | static drift, twinkles | background starfield |
/// | `Dust` | ballistic, light gravity | settling ash after impact |
/// | `Debris` | ballistic, heavy gravity | thrown rock fragments |
/// | `Trail` | fades in place | meteor trail segments |
/// | `Spark` | ballistic, slight gravity | hot flecks off the meteor |
/// | `Shockwave` | radius grows to a maximum | concentric blast rings |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Star,
    Dust,
    Debris,
    Trail,
    Spark,
    Shockwave,
}

impl ParticleKind {
    /// Number of kinds.
    pub const COUNT: usize = 6;

    /// All kinds in render order (back to front).
    pub const ALL: [ParticleKind; Self::COUNT] = [
        ParticleKind::Star,
        ParticleKind::Dust,
        ParticleKind::Debris,
        ParticleKind::Trail,
        ParticleKind::Spark,
        ParticleKind::Shockwave,
    ];

    /// Index into the per-kind lookup tables; doubles as render priority.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ParticleKind::Star => 0,
            ParticleKind::Dust => 1,
            ParticleKind::Debris => 2,
            ParticleKind::Trail => 3,
            ParticleKind::Spark => 4,
            ParticleKind::Shockwave => 5,
        }
    }

    /// Kinds whose glow scales with a velocity-derived speed factor.
    #[inline]
    pub fn is_meteor_like(self) -> bool {
        matches!(self, ParticleKind::Trail | ParticleKind::Spark)
    }
}

/// A single animated visual element.
///
/// Created by an emitter, mutated by [`Engine::tick`](crate::Engine::tick),
/// removed once [`Particle::is_dead`] reports true.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Kind tag selecting update behavior and style.
    pub kind: ParticleKind,
    /// Position in surface-local units.
    pub position: Vec2,
    /// Velocity in surface units per tick.
    pub velocity: Vec2,
    /// Visual radius, always > 0.
    pub radius: f32,
    /// Remaining opacity in [0, 1].
    pub opacity: f32,
    /// Opacity lost per tick.
    pub decay: f32,
    /// Downward acceleration per tick (0 for stars).
    pub gravity: f32,
    /// Per-tick horizontal velocity retention (1.0 = no drag).
    pub drag: f32,
    /// Remaining lifetime in ticks, if bounded.
    pub ttl: Option<f32>,
    /// Twinkle phase offset, radians.
    pub phase: f32,
    /// Ring radius growth per tick (shockwave only).
    pub growth: f32,
    /// Ring target radius (shockwave only).
    pub max_radius: f32,
}

impl Particle {
    /// A stationary, fully opaque particle of the given kind.
    pub fn new(kind: ParticleKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 1.0,
            decay: 0.0,
            gravity: 0.0,
            drag: 1.0,
            ttl: None,
            phase: 0.0,
            growth: 0.0,
            max_radius: 0.0,
        }
    }

    /// Current speed in surface units per tick.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Brightness after applying the twinkle sinusoid at the given clock.
    ///
    /// A phase-shifted sinusoid of the frame clock, not per-frame
    /// randomness, so brightness varies smoothly. Non-star kinds return the
    /// plain opacity.
    pub fn twinkle_opacity(&self, elapsed_ticks: f32) -> f32 {
        if self.kind != ParticleKind::Star {
            return self.opacity;
        }
        let wave = 0.5 + 0.5 * (elapsed_ticks * TWINKLE_RATE + self.phase).sin();
        (self.opacity * wave).clamp(TWINKLE_FLOOR, 1.0)
    }

    /// True once this particle has crossed any removal threshold: faded
    /// out, expired lifetime, ring past its maximum, or escaped the surface
    /// bounds by more than [`OFFSCREEN_MARGIN`].
    pub fn is_dead(&self, width: f32, height: f32) -> bool {
        if self.opacity <= 0.0 {
            return true;
        }
        if matches!(self.ttl, Some(t) if t <= 0.0) {
            return true;
        }
        if self.kind == ParticleKind::Shockwave && self.radius >= self.max_radius + RING_OVERSHOOT {
            return true;
        }
        self.position.x < -OFFSCREEN_MARGIN
            || self.position.x > width + OFFSCREEN_MARGIN
            || self.position.y < -OFFSCREEN_MARGIN
            || self.position.y > height + OFFSCREEN_MARGIN
    }

    /// Advance this particle by `dt` ticks using its kind's behavior.
    #[inline]
    pub(crate) fn update(&mut self, dt: f32) {
        UPDATE_TABLE[self.kind.index()](self, dt);
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl -= dt;
        }
    }
}

/// Per-kind update behavior, indexed by [`ParticleKind::index`].
type UpdateFn = fn(&mut Particle, f32);

const UPDATE_TABLE: [UpdateFn; ParticleKind::COUNT] = [
    update_drift,     // Star
    update_ballistic, // Dust
    update_ballistic, // Debris
    update_fade,      // Trail
    update_ballistic, // Spark
    update_ring,      // Shockwave
];

/// Stars: optional slow drift, no gravity, usually no decay.
fn update_drift(p: &mut Particle, dt: f32) {
    p.position += p.velocity * dt;
    apply_decay(p, dt);
}

/// Dust, debris, sparks: explicit Euler with gravity and horizontal drag.
fn update_ballistic(p: &mut Particle, dt: f32) {
    p.position += p.velocity * dt;
    p.velocity.y += p.gravity * dt;
    if p.drag < 1.0 {
        p.velocity.x *= p.drag.powf(dt);
    }
    apply_decay(p, dt);
}

/// Trail segments: fade where they were dropped.
fn update_fade(p: &mut Particle, dt: f32) {
    p.position += p.velocity * dt;
    apply_decay(p, dt);
}

/// Shockwave rings: radius grows monotonically toward the target while
/// opacity falls linearly.
fn update_ring(p: &mut Particle, dt: f32) {
    p.radius += p.growth * dt;
    apply_decay(p, dt);
}

#[inline]
fn apply_decay(p: &mut Particle, dt: f32) {
    p.opacity = (p.opacity - p.decay * dt).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_match_render_order() {
        for (i, kind) in ParticleKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_ballistic_order_position_before_gravity() {
        let mut p = Particle::new(ParticleKind::Debris, Vec2::new(100.0, 100.0));
        p.velocity = Vec2::new(2.0, -3.0);
        p.gravity = 0.1;

        p.update(1.0);

        // Position moved by the pre-tick velocity, then gravity landed.
        assert_eq!(p.position, Vec2::new(102.0, 97.0));
        assert!((p.velocity.y - (-2.9)).abs() < 1e-6);
    }

    #[test]
    fn test_drag_only_horizontal() {
        let mut p = Particle::new(ParticleKind::Dust, Vec2::ZERO);
        p.velocity = Vec2::new(1.0, 1.0);
        p.drag = 0.5;

        p.update(1.0);

        assert_eq!(p.velocity.x, 0.5);
        assert_eq!(p.velocity.y, 1.0);
    }

    #[test]
    fn test_decay_clamps_at_zero() {
        let mut p = Particle::new(ParticleKind::Trail, Vec2::ZERO);
        p.opacity = 0.05;
        p.decay = 0.1;

        p.update(1.0);

        assert_eq!(p.opacity, 0.0);
        assert!(p.is_dead(800.0, 600.0));
    }

    #[test]
    fn test_ring_grows_and_dies_past_max() {
        let mut p = Particle::new(ParticleKind::Shockwave, Vec2::new(400.0, 300.0));
        p.radius = 6.0;
        p.growth = 50.0;
        p.max_radius = 80.0;
        p.decay = 0.0001;

        p.update(1.0);
        assert_eq!(p.radius, 56.0);
        assert!(!p.is_dead(800.0, 600.0));

        p.update(1.0);
        p.update(1.0);
        assert!(p.radius >= p.max_radius + RING_OVERSHOOT);
        assert!(p.is_dead(800.0, 600.0));
    }

    #[test]
    fn test_offscreen_margin() {
        let mut p = Particle::new(ParticleKind::Spark, Vec2::new(-OFFSCREEN_MARGIN + 1.0, 10.0));
        assert!(!p.is_dead(800.0, 600.0));

        p.position.x = -OFFSCREEN_MARGIN - 1.0;
        assert!(p.is_dead(800.0, 600.0));
    }

    #[test]
    fn test_ttl_expires() {
        let mut p = Particle::new(ParticleKind::Trail, Vec2::ZERO);
        p.ttl = Some(2.0);

        p.update(1.0);
        assert!(!p.is_dead(800.0, 600.0));
        p.update(1.0);
        assert!(p.is_dead(800.0, 600.0));
    }

    #[test]
    fn test_twinkle_stays_in_range() {
        let mut p = Particle::new(ParticleKind::Star, Vec2::ZERO);
        p.opacity = 0.4;
        p.phase = 1.3;

        for frame in 0..500 {
            let a = p.twinkle_opacity(frame as f32);
            assert!((0.0..=1.0).contains(&a));
            assert!(a >= 0.03);
        }
    }

    #[test]
    fn test_twinkle_varies_smoothly() {
        let mut p = Particle::new(ParticleKind::Star, Vec2::ZERO);
        p.opacity = 0.8;

        let a0 = p.twinkle_opacity(0.0);
        let a1 = p.twinkle_opacity(1.0);
        assert!((a0 - a1).abs() < 0.05);
    }

    #[test]
    fn test_non_star_does_not_twinkle() {
        let mut p = Particle::new(ParticleKind::Debris, Vec2::ZERO);
        p.opacity = 0.7;
        assert_eq!(p.twinkle_opacity(123.0), 0.7);
    }
}
