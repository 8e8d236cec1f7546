//! # Skyfall - Impact & Starfield Particle Engine
//!
//! Host-driven 2D particle effects with a small, declarative API.
//!
//! Skyfall owns the particle bookkeeping (typed emitters, aging, removal,
//! render ordering) so a demo page or visualizer can drive an asteroid
//! strike with a few calls per frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use skyfall::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.configure_surface(800.0, 600.0, window_device_pixel_ratio);
//!
//! // Persistent backdrop
//! engine.spawn(ParticleKind::Star, 80, 0.0, 0.0, &SpawnOverrides::none());
//!
//! // One strike, driven by slider values
//! let params = ImpactParams::new(diameter_m, velocity_kms, angle_deg);
//! let mut strike = ImpactSequence::new(&engine, params);
//!
//! // Per animation callback:
//! strike.tick(&mut engine, 1.0);
//! engine.tick(1.0);
//! engine.render(&mut canvas);
//! strike.render_overlay(&mut canvas);
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Every particle is position, velocity, radius, and opacity plus a
//! [`ParticleKind`] tag. Kinds are dispatched through a fixed lookup table
//! of update functions - adding behavior means adding a table entry, and
//! the compiler checks the table stays exhaustive.
//!
//! | Kind | Behavior |
//! |------|----------|
//! | `Star` | twinkles via a phase-shifted sinusoid of the frame clock |
//! | `Trail` | fades where it was dropped |
//! | `Spark` | ballistic, light gravity |
//! | `Debris` | ballistic, heavy gravity, horizontal drag |
//! | `Dust` | slow ballistic spread, gentle fade |
//! | `Shockwave` | stroked ring growing to a target radius |
//!
//! ### Emitters
//!
//! An [`EmitterConfig`] is pure data: randomized `(min, max)` ranges for
//! every attribute, a render [`Style`](visuals::Style), and an active-count
//! cap. The engine holds one per kind; [`SpawnOverrides`] adjusts a single
//! batch without touching the stored configuration.
//!
//! ### The host owns the loop
//!
//! The engine never schedules itself: no timers, no frame callbacks, no
//! hidden threads. Call [`Engine::tick`] then [`Engine::render`] once per
//! frame; stop calling to cancel. [`Engine::is_quiescent`] reports when a
//! one-shot effect has fully decayed. Tests drive the same API
//! synchronously with no real clock.
//!
//! ### Surfaces
//!
//! Rendering goes through the [`Surface`] trait - filled/stroked circles
//! and lines with per-call alpha and glow. Any canvas-style immediate-mode
//! target fits; the bundled [`DisplayList`] records commands for tests and
//! headless hosts. Degenerate (zero-area) surfaces skip drawing while the
//! simulation keeps running.

pub mod emitter;
pub mod engine;
pub mod impact;
pub mod particle;
pub mod spawn;
pub mod surface;
pub mod time;
pub mod visuals;
pub mod zones;

pub use emitter::{EmitterConfig, Span, SpawnOverrides, Spread};
pub use engine::Engine;
pub use impact::{ImpactParams, ImpactSequence, Stage};
pub use particle::{Particle, ParticleKind};
pub use surface::{DisplayList, DrawCmd, Surface, SurfaceConfig};
pub use zones::ImpactZones;

/// Everything a host typically needs.
pub mod prelude {
    pub use crate::emitter::{EmitterConfig, Span, SpawnOverrides, Spread};
    pub use crate::engine::Engine;
    pub use crate::impact::{ImpactParams, ImpactSequence, Stage};
    pub use crate::particle::{Particle, ParticleKind};
    pub use crate::surface::{DisplayList, DrawCmd, Surface, SurfaceConfig};
    pub use crate::time::FrameClock;
    pub use crate::visuals::{ColorMapping, Palette, Style};
    pub use crate::zones::ImpactZones;
}
