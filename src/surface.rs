//! Drawing surface abstraction.
//!
//! The engine draws through the [`Surface`] trait: any 2D immediate-mode
//! target that can clear a rectangle and paint circles and lines with
//! per-call alpha and glow qualifies - an HTML canvas context behind a WASM
//! binding, a native vector backend, or the bundled [`DisplayList`] used by
//! tests and headless hosts.
//!
//! [`SurfaceConfig`] is the engine's own record of the surface geometry:
//! logical (CSS-pixel style) dimensions corrected for device pixel ratio,
//! clamped to a 1×1 minimum. Reconfiguring on resize is idempotent and
//! never disturbs in-flight particles.

use glam::{Vec2, Vec3};

/// Logical surface geometry, device-pixel-ratio corrected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    width: f32,
    height: f32,
    pixel_density: f32,
    degenerate: bool,
}

impl SurfaceConfig {
    /// Compute logical dimensions from physical pixels and pixel density.
    ///
    /// Non-finite or non-positive inputs mark the configuration degenerate:
    /// dimensions clamp to 1×1 so the simulation keeps valid bounds, and
    /// rendering is skipped until a real size arrives.
    pub fn new(width_px: f32, height_px: f32, pixel_density: f32) -> Self {
        let density = if pixel_density.is_finite() && pixel_density > 0.0 {
            pixel_density
        } else {
            1.0
        };

        let degenerate = !width_px.is_finite()
            || !height_px.is_finite()
            || width_px <= 0.0
            || height_px <= 0.0;

        let width = if degenerate { 1.0 } else { (width_px / density).round().max(1.0) };
        let height = if degenerate { 1.0 } else { (height_px / density).round().max(1.0) };

        Self {
            width,
            height,
            pixel_density: density,
            degenerate,
        }
    }

    /// Logical width in surface units.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height in surface units.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Device pixel ratio this configuration was computed with.
    #[inline]
    pub fn pixel_density(&self) -> f32 {
        self.pixel_density
    }

    /// True when the host reported a zero-area surface; rendering becomes a
    /// no-op while the simulation continues.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Logical (width, height) pair.
    #[inline]
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// A 2D immediate-mode drawing target.
///
/// Colors are linear RGB in [0, 1] per channel; `alpha` is the per-call
/// opacity and `glow` a shadow-blur style halo radius in surface units
/// (0 = none). Implementations must not retain references into the engine.
pub trait Surface {
    /// Erase the rectangle from the origin to (width, height).
    fn clear(&mut self, width: f32, height: f32);

    /// Paint a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32, glow: f32);

    /// Paint a circle outline of the given stroke width.
    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: Vec3,
        alpha: f32,
        glow: f32,
    );

    /// Paint a straight line segment of the given stroke width.
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32, glow: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Vec3,
        alpha: f32,
        glow: f32,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Vec3,
        alpha: f32,
        glow: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Vec3,
        alpha: f32,
        glow: f32,
    },
}

/// A [`Surface`] that records draw calls instead of rasterizing.
///
/// Used by the test suite to assert on render output and by headless hosts
/// that forward commands to a real canvas elsewhere.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCmd>,
}

impl DisplayList {
    /// An empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last [`DisplayList::reset`].
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drop all recorded commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCmd::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32, glow: f32) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
            alpha,
            glow,
        });
    }

    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: Vec3,
        alpha: f32,
        glow: f32,
    ) {
        self.commands.push(DrawCmd::StrokeCircle {
            center,
            radius,
            width,
            color,
            alpha,
            glow,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32, glow: f32) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
            alpha,
            glow,
        });
    }
}
