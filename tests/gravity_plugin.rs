//! Headless tests for [`GravityPlugin`].
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering) and drive the
//! `FixedUpdate` schedule by hand so every tick is deterministic.
//!
//! Covered scenarios:
//! 1. Wells are mirrored into the registry and removed on despawn.
//! 2. Disabling a well unregisters it without forgetting it.
//! 3. Bodies receive the reference inverse-square acceleration.
//! 4. Event-horizon and dominant-source contact losses fire exactly once, and
//!    only a newly begun contact counts.
//! 5. Shields attenuate gravity; the built-in integrator moves bodies.
//! 6. Demo scenarios spawn and behave.

use std::time::Duration;

use bevy::prelude::*;
use space_gravity::config::GravityConfig;
use space_gravity::lose::LoseCause;
use space_gravity::registry::GravitySourceRegistry;
use space_gravity::scenarios::{Probe, Scenario};
use space_gravity::shield::GravityShield;
use space_gravity::simulation::{
    BodyLost, ContactRadius, GravityAcceleration, GravityAffected, GravityPlugin, GravityWell,
    LinearVelocity, ShieldState, SourceContact, WellHandle, WellIndex,
};
use space_gravity::source::GravitySource;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, GravityPlugin::default()));
    app
}

/// Run one fixed tick with zero elapsed time (field only, no motion).
fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

/// Run one fixed tick of `dt` seconds.
fn tick_for(app: &mut App, dt: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
    app.world_mut().run_schedule(FixedUpdate);
}

fn drain_lost(app: &mut App) -> Vec<BodyLost> {
    app.world_mut()
        .resource_mut::<Messages<BodyLost>>()
        .drain()
        .collect()
}

fn uncapped(position: Vec3) -> GravitySource {
    GravitySource {
        max_acceleration: 0.0,
        ..GravitySource::at(position)
    }
}

fn spawn_well(app: &mut App, source: GravitySource) -> Entity {
    let position = source.position;
    app.world_mut()
        .spawn((GravityWell::new(source), Transform::from_translation(position)))
        .id()
}

fn spawn_body(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            GravityAffected::default(),
            Transform::from_translation(position),
        ))
        .id()
}

fn registry(app: &App) -> &GravitySourceRegistry {
    app.world().resource::<GravitySourceRegistry>()
}

// ── Registry sync ─────────────────────────────────────────────────────────────

#[test]
fn wells_are_registered_and_removed_on_despawn() {
    let mut app = app();
    let well = spawn_well(&mut app, GravitySource::default());
    tick(&mut app);

    assert_eq!(registry(&app).active_count(), 1);
    let handle = *app
        .world()
        .get::<WellHandle>(well)
        .expect("sync inserts a handle");
    assert!(registry(&app).is_active(handle.0));

    app.world_mut().despawn(well);
    tick(&mut app);

    assert!(registry(&app).is_empty());
    assert!(!registry(&app).contains(handle.0), "old handle must not resolve");
}

#[test]
fn disabling_a_well_unregisters_it() {
    let mut app = app();
    let well = spawn_well(&mut app, GravitySource::default());
    tick(&mut app);

    app.world_mut().get_mut::<GravityWell>(well).unwrap().enabled = false;
    tick(&mut app);
    assert_eq!(registry(&app).active_count(), 0);
    assert_eq!(registry(&app).len(), 1);

    app.world_mut().get_mut::<GravityWell>(well).unwrap().enabled = true;
    tick(&mut app);
    assert_eq!(registry(&app).active_count(), 1);
}

#[test]
fn moving_a_well_moves_its_source() {
    let mut app = app();
    let well = spawn_well(&mut app, GravitySource::default());
    tick(&mut app);

    app.world_mut()
        .get_mut::<Transform>(well)
        .unwrap()
        .translation = Vec3::new(5.0, 6.0, 7.0);
    tick(&mut app);

    let handle = app.world().get::<WellHandle>(well).unwrap().0;
    assert_eq!(
        registry(&app).get(handle).map(|s| s.position),
        Some(Vec3::new(5.0, 6.0, 7.0))
    );
}

// ── Field evaluation ──────────────────────────────────────────────────────────

#[test]
fn body_receives_reference_acceleration() {
    let mut app = app();
    let well = spawn_well(&mut app, uncapped(Vec3::ZERO));
    let body = spawn_body(&mut app, Vec3::new(1000.0, 0.0, 0.0));
    tick(&mut app);

    let a = app.world().get::<GravityAcceleration>(body).unwrap().0;
    assert!((a - Vec3::new(-0.01, 0.0, 0.0)).length() < 1e-7, "got {a:?}");

    let handle = app.world().get::<WellHandle>(well).unwrap().0;
    let affected = app.world().get::<GravityAffected>(body).unwrap();
    assert_eq!(affected.status.dominant(), Some(handle));
}

#[test]
fn active_shield_attenuates_gravity() {
    let mut app = app();
    spawn_well(&mut app, uncapped(Vec3::ZERO));

    let mut shield = GravityShield::new(5.0, 0.0, 1.0, 100.0, 0.0);
    shield.tick(0.1);
    assert!(shield.toggle());

    let body = app
        .world_mut()
        .spawn((
            GravityAffected::default(),
            ShieldState(shield),
            Transform::from_xyz(1000.0, 0.0, 0.0),
        ))
        .id();
    tick(&mut app);

    let a = app.world().get::<GravityAcceleration>(body).unwrap().0;
    assert!((a.length() - 0.002).abs() < 1e-7, "got {}", a.length());
}

#[test]
fn integrator_applies_acceleration_then_velocity() {
    let mut app = app();
    spawn_well(&mut app, uncapped(Vec3::ZERO));
    let body = app
        .world_mut()
        .spawn((
            GravityAffected::default(),
            LinearVelocity(Vec3::new(0.0, 1.0, 0.0)),
            Transform::from_xyz(1000.0, 0.0, 0.0),
        ))
        .id();

    tick_for(&mut app, 0.5);

    let v = app.world().get::<LinearVelocity>(body).unwrap().0;
    assert!((v - Vec3::new(-0.005, 1.0, 0.0)).length() < 1e-6, "got {v:?}");
    let p = app.world().get::<Transform>(body).unwrap().translation;
    assert!((p - Vec3::new(1000.0 - 0.0025, 0.5, 0.0)).length() < 1e-3, "got {p:?}");
}

// ── Lose rules ────────────────────────────────────────────────────────────────

#[test]
fn event_horizon_loss_is_reported_once() {
    let mut app = app();
    let hole = spawn_well(
        &mut app,
        GravitySource {
            is_black_hole: true,
            ..GravitySource::default()
        },
    );
    let body = spawn_body(&mut app, Vec3::new(50.0, 0.0, 0.0));

    for _ in 0..5 {
        tick(&mut app);
    }

    let handle = app.world().get::<WellHandle>(hole).unwrap().0;
    assert_eq!(
        drain_lost(&mut app),
        vec![BodyLost {
            body,
            cause: LoseCause::EventHorizon(handle),
        }]
    );
    let a = app.world().get::<GravityAcceleration>(body).unwrap().0;
    assert_eq!(a, Vec3::ZERO, "dead bodies feel no gravity");
}

#[test]
fn touching_the_dominant_surface_loses() {
    let mut app = app();
    let planet = spawn_well(
        &mut app,
        GravitySource {
            surface_radius: 40.0,
            ..GravitySource::default()
        },
    );
    let body = app
        .world_mut()
        .spawn((
            GravityAffected::default(),
            ContactRadius(5.0),
            Transform::from_xyz(44.0, 0.0, 0.0),
        ))
        .id();

    tick(&mut app);
    tick(&mut app);

    let handle = app.world().get::<WellHandle>(planet).unwrap().0;
    assert_eq!(
        drain_lost(&mut app),
        vec![BodyLost {
            body,
            cause: LoseCause::Collision(handle),
        }]
    );
}

#[test]
fn host_contacts_only_count_for_the_dominant_source() {
    let mut app = app();
    let near = spawn_well(&mut app, GravitySource::at(Vec3::new(100.0, 0.0, 0.0)));
    let far = spawn_well(&mut app, GravitySource::at(Vec3::new(-900.0, 0.0, 0.0)));
    let body = spawn_body(&mut app, Vec3::ZERO);
    tick(&mut app);

    app.world_mut()
        .resource_mut::<Messages<SourceContact>>()
        .write(SourceContact { body, source: far });
    tick(&mut app);
    assert!(drain_lost(&mut app).is_empty());
    assert!(app
        .world()
        .get::<GravityAffected>(body)
        .unwrap()
        .status
        .is_alive());

    app.world_mut()
        .resource_mut::<Messages<SourceContact>>()
        .write(SourceContact { body, source: near });
    tick(&mut app);

    let lost = drain_lost(&mut app);
    assert_eq!(lost.len(), 1);
    assert!(matches!(lost[0].cause, LoseCause::Collision(_)));
}

#[test]
fn resting_contact_does_not_lose_when_its_source_takes_over() {
    let mut app = app();
    let heavy = spawn_well(&mut app, uncapped(Vec3::new(-30.0, 0.0, 0.0)));
    let rock = spawn_well(
        &mut app,
        GravitySource {
            mass: 1.0,
            surface_radius: 100.0,
            ..GravitySource::at(Vec3::new(60.0, 0.0, 0.0))
        },
    );
    let body = app
        .world_mut()
        .spawn((
            GravityAffected::default(),
            ContactRadius(2.0),
            Transform::default(),
        ))
        .id();

    // The overlap with the rock begins while the heavy well dominates.
    tick(&mut app);
    tick(&mut app);
    assert!(drain_lost(&mut app).is_empty());

    app.world_mut().get_mut::<GravityWell>(heavy).unwrap().enabled = false;
    tick(&mut app);
    tick(&mut app);
    assert!(drain_lost(&mut app).is_empty(), "no new contact began");

    // Separate, then touch the rock again now that it dominates.
    app.world_mut().get_mut::<Transform>(body).unwrap().translation =
        Vec3::new(300.0, 0.0, 0.0);
    tick(&mut app);
    app.world_mut().get_mut::<Transform>(body).unwrap().translation = Vec3::ZERO;
    tick(&mut app);

    let handle = app.world().get::<WellHandle>(rock).unwrap().0;
    assert_eq!(
        drain_lost(&mut app),
        vec![BodyLost {
            body,
            cause: LoseCause::Collision(handle),
        }]
    );
}

#[test]
fn lose_cause_maps_back_to_its_well() {
    let mut app = app();
    let hole = spawn_well(
        &mut app,
        GravitySource {
            is_black_hole: true,
            ..GravitySource::default()
        },
    );
    spawn_body(&mut app, Vec3::new(20.0, 0.0, 0.0));
    tick(&mut app);

    let lost = drain_lost(&mut app);
    assert_eq!(lost.len(), 1);
    let index = app.world().resource::<WellIndex>();
    assert_eq!(index.entity_of(lost[0].cause.source()), Some(hole));
    assert_eq!(index.source_of(hole), Some(lost[0].cause.source()));
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

fn spawn_scenario(app: &mut App, scenario: Scenario) -> Entity {
    let config = GravityConfig::default();
    let world = app.world_mut();
    let probe = {
        let mut commands = world.commands();
        scenario.spawn(&mut commands, &config)
    };
    world.flush();
    probe
}

#[test]
fn orbit_scenario_holds_its_radius() {
    let mut app = app();
    let probe = spawn_scenario(&mut app, Scenario::Orbit);
    assert!(app.world().get::<Probe>(probe).is_some());

    for _ in 0..500 {
        tick_for(&mut app, 0.02);
    }

    let r = app.world().get::<Transform>(probe).unwrap().translation.length();
    assert!((r - 1000.0).abs() < 10.0, "orbit drifted to r={r}");
    assert!(drain_lost(&mut app).is_empty());
}

#[test]
fn cluster_scenario_is_deterministic() {
    let mut first = app();
    spawn_scenario(&mut first, Scenario::Cluster);
    tick(&mut first);
    let mut second = app();
    spawn_scenario(&mut second, Scenario::Cluster);
    tick(&mut second);

    let positions = |app: &App| -> Vec<Vec3> {
        registry(app).all_active().map(|(_, s)| s.position).collect()
    };
    assert_eq!(registry(&first).active_count(), 12);
    assert_eq!(positions(&first), positions(&second));
}
