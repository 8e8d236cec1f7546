//! Integration tests for the engine's observable contract.
//!
//! These exercise the public API the way a host would: configure a
//! surface, spawn, tick synchronously, and assert on the active set and
//! recorded draw commands.

use skyfall::prelude::*;

fn engine() -> Engine {
    let mut e = Engine::new().with_seed(2024);
    e.configure_surface(800.0, 600.0, 1.0);
    e
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_opacity_and_radius_invariants_hold_across_ticks() {
    let mut e = engine();
    e.spawn(ParticleKind::Star, 40, 0.0, 0.0, &SpawnOverrides::none());
    e.spawn(ParticleKind::Debris, 40, 400.0, 300.0, &SpawnOverrides::none());
    e.spawn(ParticleKind::Dust, 60, 400.0, 300.0, &SpawnOverrides::none());
    e.spawn(ParticleKind::Shockwave, 3, 400.0, 300.0, &SpawnOverrides::none());

    for _ in 0..300 {
        e.tick(1.0);
        for p in e.particles() {
            assert!((0.0..=1.0).contains(&p.opacity), "opacity out of range");
            assert!(p.radius > 0.0, "radius must stay positive");
        }
    }
}

#[test]
fn test_monotonic_decay_removal_bound() {
    // Opacity 1.0 decaying at exactly 1/16 per tick: gone in 16 ticks.
    let mut e = engine();
    let overrides = SpawnOverrides {
        opacity: Some(Span::fixed(1.0)),
        decay: Some(Span::fixed(0.0625)),
        ..SpawnOverrides::default()
    };
    e.spawn(ParticleKind::Trail, 1, 400.0, 300.0, &overrides);

    for _ in 0..15 {
        e.tick(1.0);
    }
    assert_eq!(e.active_count(), 1, "alive until the decay budget runs out");

    e.tick(1.0);
    assert!(e.is_quiescent(), "removed within ceil(a0/d) ticks");
}

// ============================================================================
// Spawn semantics
// ============================================================================

#[test]
fn test_spawn_zero_count_never_changes_active_set() {
    let mut e = engine();
    for kind in ParticleKind::ALL {
        e.spawn(kind, 0, 400.0, 300.0, &SpawnOverrides::none());
    }
    assert_eq!(e.active_count(), 0);
}

#[test]
fn test_quiescence_tracks_active_set() {
    let mut e = engine();
    assert!(e.is_quiescent());

    let overrides = SpawnOverrides {
        decay: Some(Span::fixed(0.1)),
        ..SpawnOverrides::default()
    };
    e.spawn(ParticleKind::Dust, 5, 400.0, 300.0, &overrides);
    assert!(!e.is_quiescent());

    for _ in 0..20 {
        e.tick(1.0);
    }
    assert!(e.is_quiescent(), "all spawned particles decayed");
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_shockwave_burst_decays_within_500_ticks() {
    let mut e = engine();
    e.spawn(ParticleKind::Shockwave, 3, 400.0, 300.0, &SpawnOverrides::none());
    assert_eq!(e.count_of(ParticleKind::Shockwave), 3);

    for _ in 0..500 {
        e.tick(1.0);
    }
    assert!(e.is_quiescent(), "all rings decay and are removed");
}

#[test]
fn test_debris_euler_integration_order() {
    let mut e = engine();
    let overrides = SpawnOverrides {
        gravity: Some(0.1),
        ..SpawnOverrides::default()
    };
    e.spawn(ParticleKind::Debris, 40, 100.0, 100.0, &overrides);

    let before: Vec<_> = e
        .particles()
        .iter()
        .map(|p| (p.position, p.velocity))
        .collect();

    e.tick(1.0);

    assert_eq!(e.count_of(ParticleKind::Debris), 40);
    for (p, (pos, vel)) in e.particles().iter().zip(&before) {
        // Position advanced by the pre-tick velocity...
        assert_eq!(p.position, *pos + *vel);
        // ...and only then did gravity land on the vertical velocity.
        assert_eq!(p.velocity.y, vel.y + 0.1);
    }
}

#[test]
fn test_resize_mid_sequence_keeps_particles_in_flight() {
    let mut e = engine();
    e.spawn(ParticleKind::Debris, 30, 400.0, 300.0, &SpawnOverrides::none());
    e.spawn(ParticleKind::Shockwave, 2, 400.0, 300.0, &SpawnOverrides::none());

    for _ in 0..10 {
        e.tick(1.0);
    }
    let in_flight = e.active_count();
    assert!(in_flight > 0);

    e.configure_surface(1920.0, 1080.0, 2.0);
    assert_eq!(e.active_count(), in_flight);

    // Future ticks and renders use the new bounds without issue.
    e.tick(1.0);
    let mut frame = DisplayList::new();
    e.render(&mut frame);
    match frame.commands()[0] {
        DrawCmd::Clear { width, height } => {
            assert_eq!(width, 960.0);
            assert_eq!(height, 540.0);
        }
        ref other => panic!("expected a clear first, got {:?}", other),
    }
}

// ============================================================================
// Full strike end to end
// ============================================================================

#[test]
fn test_impact_sequence_is_deterministic_with_seeds() {
    let run = || {
        let mut e = Engine::new().with_seed(77);
        e.configure_surface(800.0, 600.0, 1.0);
        let params = ImpactParams::new(250.0, 22.0, 45.0);
        let mut strike = ImpactSequence::new(&e, params).with_seed(77);

        let mut ticks = 0u32;
        while !strike.is_finished(&e) && ticks < 5000 {
            strike.tick(&mut e, 1.0);
            e.tick(1.0);
            ticks += 1;
        }
        (ticks, e.clock().frame())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_strike_renders_burst_rings_as_strokes() {
    let mut e = Engine::new().with_seed(3);
    e.configure_surface(800.0, 600.0, 1.0);
    let params = ImpactParams::new(200.0, 20.0, 50.0);
    let mut strike = ImpactSequence::new(&e, params).with_seed(3);

    while strike.stage() == Stage::Approach {
        strike.tick(&mut e, 1.0);
    }

    let mut frame = DisplayList::new();
    e.render(&mut frame);

    let strokes = frame
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokeCircle { .. }))
        .count();
    assert_eq!(strokes, params.ring_count());
}
