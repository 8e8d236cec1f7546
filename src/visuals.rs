//! Visual configuration for particle rendering.
//!
//! Rendering style is separate from the behavior that moves particles: an
//! emitter carries a [`Style`] describing fill vs stroke, the palette to
//! sample, and how strongly the particle glows. Color is always a pure
//! function of particle state - the renderer never mutates anything.
//!
//! # Usage
//!
//! ```ignore
//! let style = Style {
//!     palette: Palette::Ember,
//!     mapping: ColorMapping::Speed { max: 15.0 },
//!     stroke: None,
//!     glow: 10.0,
//! };
//! ```

use glam::Vec3;

/// Upper bound on the speed factor feeding glow, so extreme velocities
/// don't blow out the bloom.
pub const MAX_GLOW_SPEED_FACTOR: f32 = 2.6;

/// Pre-defined color palettes for the built-in particle kinds.
///
/// Each palette is five RGB stops sampled by a [`ColorMapping`]-derived
/// parameter in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Plain white (default).
    #[default]
    White,

    /// Starlight - pale violets of a night-sky starfield.
    Starlight,

    /// Ember - white-hot core through orange to deep red.
    Ember,

    /// Ash - warm grays of debris and settling dust.
    Ash,

    /// RingFire - the hot oranges of an expanding shockwave front.
    RingFire,
}

impl Palette {
    /// Get the color stops for this palette (5 colors).
    pub fn colors(&self) -> [Vec3; 5] {
        match self {
            Palette::White => [
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
            ],
            Palette::Starlight => [
                Vec3::new(1.0, 1.0, 1.0),     // White
                Vec3::new(0.82, 0.70, 1.0),   // Pale violet
                Vec3::new(0.77, 0.65, 1.0),   // Lavender
                Vec3::new(0.72, 0.56, 1.0),   // Violet
                Vec3::new(0.63, 0.55, 0.66),  // Dusty mauve
            ],
            Palette::Ember => [
                Vec3::new(1.0, 0.96, 0.78),   // White-hot
                Vec3::new(1.0, 0.94, 0.63),   // Pale yellow
                Vec3::new(1.0, 0.86, 0.47),   // Gold
                Vec3::new(1.0, 0.78, 0.47),   // Orange
                Vec3::new(1.0, 0.55, 0.27),   // Deep orange
            ],
            Palette::Ash => [
                Vec3::new(0.71, 0.67, 0.63),  // Light ash
                Vec3::new(0.63, 0.59, 0.55),  // Dust gray
                Vec3::new(0.55, 0.51, 0.47),  // Gray
                Vec3::new(0.47, 0.43, 0.39),  // Dark gray
                Vec3::new(0.38, 0.35, 0.31),  // Charcoal brown
            ],
            Palette::RingFire => [
                Vec3::new(1.0, 0.87, 0.55),   // Flash yellow
                Vec3::new(1.0, 0.78, 0.45),   // Amber
                Vec3::new(1.0, 0.67, 0.35),   // Orange
                Vec3::new(1.0, 0.58, 0.29),   // Hot orange
                Vec3::new(0.96, 0.45, 0.20),  // Red-orange
            ],
        }
    }

    /// Sample the palette at `t` in `[0, 1]`, interpolating between stops.
    pub fn sample(&self, t: f32) -> Vec3 {
        let stops = self.colors();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        let scaled = t * (stops.len() - 1) as f32;
        let lower = scaled.floor() as usize;
        if lower >= stops.len() - 1 {
            return stops[stops.len() - 1];
        }
        let frac = scaled - lower as f32;
        stops[lower].lerp(stops[lower + 1], frac)
    }
}

/// How to derive the palette parameter from particle state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorMapping {
    /// Always sample the first palette stop.
    #[default]
    Fixed,

    /// Map fading opacity to color: full opacity samples the start of the
    /// palette, a nearly-faded particle samples the end.
    Opacity,

    /// Map particle speed to color (slow = start, fast = end).
    Speed {
        /// Speed that maps to the palette end.
        max: f32,
    },
}

impl ColorMapping {
    /// Palette parameter in `[0, 1]` for the given particle state.
    pub fn parameter(&self, opacity: f32, speed: f32) -> f32 {
        match self {
            ColorMapping::Fixed => 0.0,
            ColorMapping::Opacity => (1.0 - opacity).clamp(0.0, 1.0),
            ColorMapping::Speed { max } => {
                if *max > 0.0 {
                    (speed / max).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            }
        }
    }
}

/// Rendering style of one emitter kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Palette sampled for the particle color.
    pub palette: Palette,
    /// How particle state maps into the palette.
    pub mapping: ColorMapping,
    /// `None` = filled circle, `Some(width)` = stroked circle outline.
    pub stroke: Option<f32>,
    /// Base glow radius; 0 disables glow entirely.
    pub glow: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            palette: Palette::White,
            mapping: ColorMapping::Fixed,
            stroke: None,
            glow: 0.0,
        }
    }
}

impl Style {
    /// Color for the given particle state.
    #[inline]
    pub fn color(&self, opacity: f32, speed: f32) -> Vec3 {
        self.palette.sample(self.mapping.parameter(opacity, speed))
    }
}

/// Glow intensity as a pure function of opacity and an optional
/// velocity-derived speed factor.
///
/// Meteor-like kinds pass their speed factor; everything else passes `None`
/// and glows by opacity alone. The speed factor is capped at
/// [`MAX_GLOW_SPEED_FACTOR`].
#[inline]
pub fn glow_intensity(base: f32, opacity: f32, speed_factor: Option<f32>) -> f32 {
    let boost = speed_factor
        .map(|s| s.clamp(0.0, MAX_GLOW_SPEED_FACTOR))
        .unwrap_or(1.0);
    base * opacity.clamp(0.0, 1.0) * boost
}
