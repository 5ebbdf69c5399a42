//! Gravity plugin and systems for Bevy ECS.
//!
//! Source entities carry a [`GravityWell`]; the sync system mirrors them into
//! the [`GravitySourceRegistry`] resource (insert on spawn, register/unregister
//! on `enabled` changes, remove on despawn).  Body entities carry a
//! [`GravityAffected`]; each fixed tick they sample the field, record their
//! dominant source, and may be lost to an event horizon or a contact.
//!
//! All systems run in `FixedUpdate`, ordered by [`GravitySet`].

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::body::GravityBody;
use crate::field::GravityFieldEvaluator;
use crate::lose::{BodyStatus, LoseCause};
use crate::registry::{GravitySourceRegistry, SourceId};
use crate::shield::GravityShield;
use crate::source::GravitySource;

pub struct GravityPlugin {
    /// Integrate velocity and position from [`GravityAcceleration`].
    ///
    /// Turn off when another physics engine owns motion and reads
    /// `GravityAcceleration` itself.
    pub integrate_motion: bool,
}

impl Default for GravityPlugin {
    fn default() -> Self {
        Self {
            integrate_motion: true,
        }
    }
}

impl Plugin for GravityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravitySourceRegistry>()
            .init_resource::<WellIndex>()
            .add_message::<SourceContact>()
            .add_message::<BodyLost>()
            .configure_sets(
                FixedUpdate,
                (
                    GravitySet::Sync,
                    GravitySet::Field,
                    GravitySet::Integrate,
                    GravitySet::Contacts,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    sync_gravity_wells_system.in_set(GravitySet::Sync),
                    tick_shields_system.in_set(GravitySet::Sync),
                    apply_gravity_field_system.in_set(GravitySet::Field),
                    (detect_source_contacts_system, resolve_source_contacts_system)
                        .chain()
                        .in_set(GravitySet::Contacts),
                ),
            );

        if self.integrate_motion {
            app.add_systems(
                FixedUpdate,
                integrate_motion_system.in_set(GravitySet::Integrate),
            );
        }
    }
}

/// Ordering of the gravity systems inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GravitySet {
    /// Registry and shield state catch up with the world.
    Sync,
    /// Bodies sample the field and apply the event-horizon rule.
    Field,
    /// Built-in semi-implicit Euler step (optional).
    Integrate,
    /// Contacts are detected and checked against dominant sources.
    Contacts,
}

// ── Components ────────────────────────────────────────────────────────────────

/// A gravity source attached to an entity.
///
/// `source.position` is ignored; the entity's `Transform` is used instead.
#[derive(Component, Debug, Clone)]
#[require(Transform)]
pub struct GravityWell {
    pub source: GravitySource,
    /// Disabled wells stay in the registry but exert no pull.
    pub enabled: bool,
}

impl GravityWell {
    pub fn new(source: GravitySource) -> Self {
        Self {
            source,
            enabled: true,
        }
    }
}

/// Registry handle for a [`GravityWell`], inserted by the sync system.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellHandle(pub SourceId);

/// Entity → registry id, kept so despawned wells can be removed.
#[derive(Resource, Debug, Default)]
pub struct WellIndex(HashMap<Entity, SourceId>);

impl WellIndex {
    pub fn source_of(&self, entity: Entity) -> Option<SourceId> {
        self.0.get(&entity).copied()
    }

    pub fn entity_of(&self, id: SourceId) -> Option<Entity> {
        self.0
            .iter()
            .find_map(|(&entity, &source)| (source == id).then_some(entity))
    }
}

/// A body pulled by the gravity field.
#[derive(Component, Debug, Clone, Default)]
#[require(Transform, GravityAcceleration, LinearVelocity)]
pub struct GravityAffected {
    pub settings: GravityBody,
    pub status: BodyStatus,
}

impl GravityAffected {
    pub fn new(settings: GravityBody) -> Self {
        Self {
            settings,
            status: BodyStatus::new(),
        }
    }
}

/// Net gravitational acceleration from the latest fixed tick (mass-independent).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct GravityAcceleration(pub Vec3);

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearVelocity(pub Vec3);

/// Gravity shield fitted to a body.  Pilots call `toggle()` on it directly.
#[derive(Component, Debug, Clone, Default)]
pub struct ShieldState(pub GravityShield);

/// Sphere radius used by the built-in contact check.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ContactRadius(pub f32);

// ── Messages ──────────────────────────────────────────────────────────────────

/// A body touched a gravity well.  Written by the built-in sphere check; hosts
/// with their own collision detection may write these too.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceContact {
    pub body: Entity,
    pub source: Entity,
}

/// Written exactly once per body, on the tick it is lost.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLost {
    pub body: Entity,
    pub cause: LoseCause,
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Mirror `GravityWell` components into the registry.
pub fn sync_gravity_wells_system(
    mut commands: Commands,
    mut registry: ResMut<GravitySourceRegistry>,
    mut index: ResMut<WellIndex>,
    mut removed: RemovedComponents<GravityWell>,
    new_wells: Query<(Entity, &GravityWell, &Transform), Without<WellHandle>>,
    wells: Query<(Entity, Ref<GravityWell>, &WellHandle, &Transform)>,
) {
    for entity in removed.read() {
        if let Some(id) = index.0.remove(&entity) {
            registry.remove(id);
            debug!("gravity well {:?} removed ({:?})", entity, id);
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.remove::<WellHandle>();
            }
        }
    }

    for (entity, well, handle, transform) in &wells {
        let id = handle.0;
        if !registry.contains(id) {
            // Component was removed and re-added since the last tick.
            insert_well(&mut commands, &mut registry, &mut index, entity, &well, transform);
            continue;
        }
        if well.is_changed() {
            if let Some(source) = registry.get_mut(id) {
                *source = well.source.clone();
            }
            if well.enabled {
                registry.register(id);
            } else {
                registry.unregister(id);
            }
        }
        registry.set_position(id, transform.translation);
    }

    for (entity, well, transform) in &new_wells {
        insert_well(&mut commands, &mut registry, &mut index, entity, well, transform);
    }
}

fn insert_well(
    commands: &mut Commands,
    registry: &mut GravitySourceRegistry,
    index: &mut WellIndex,
    entity: Entity,
    well: &GravityWell,
    transform: &Transform,
) {
    let id = registry.insert(GravitySource {
        position: transform.translation,
        ..well.source.clone()
    });
    if well.enabled {
        registry.register(id);
    }
    index.0.insert(entity, id);
    commands.entity(entity).insert(WellHandle(id));
    debug!("gravity well {:?} inserted as {:?}", entity, id);
}

pub fn tick_shields_system(time: Res<Time>, mut shields: Query<&mut ShieldState>) {
    let dt = time.delta_secs();
    for mut shield in &mut shields {
        shield.0.tick(dt);
    }
}

/// Sample the field for every living body and apply the event-horizon rule.
pub fn apply_gravity_field_system(
    registry: Res<GravitySourceRegistry>,
    mut evaluator: Local<GravityFieldEvaluator>,
    mut bodies: Query<(
        Entity,
        &Transform,
        &mut GravityAffected,
        &mut GravityAcceleration,
        Option<&ShieldState>,
    )>,
    mut lost: MessageWriter<BodyLost>,
) {
    for (entity, transform, mut affected, mut acceleration, shield) in &mut bodies {
        let shield_active = shield.is_some_and(|s| s.0.is_active());
        let GravityAffected { settings, status } = &mut *affected;

        let Some(outcome) = status.step(
            settings,
            &mut *evaluator,
            &registry,
            transform.translation,
            shield_active,
        ) else {
            acceleration.0 = Vec3::ZERO;
            continue;
        };

        acceleration.0 = outcome.sample.acceleration;
        if let Some(cause) = outcome.lost {
            info!("body {:?} lost: {:?}", entity, cause);
            lost.write(BodyLost {
                body: entity,
                cause,
            });
        }
    }
}

/// Semi-implicit Euler: velocity first, then position.
pub fn integrate_motion_system(
    time: Res<Time>,
    mut bodies: Query<(&GravityAcceleration, &mut LinearVelocity, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (acceleration, mut velocity, mut transform) in &mut bodies {
        velocity.0 += acceleration.0 * dt;
        transform.translation += velocity.0 * dt;
    }
}

/// Sphere-vs-surface contact check between living bodies and active wells.
///
/// Only the tick on which an overlap begins writes a [`SourceContact`]; a body
/// resting against a surface is not reported again until it separates.
pub fn detect_source_contacts_system(
    mut touching: Local<HashSet<(Entity, Entity)>>,
    mut overlaps: Local<HashSet<(Entity, Entity)>>,
    registry: Res<GravitySourceRegistry>,
    bodies: Query<(Entity, &Transform, &ContactRadius, &GravityAffected)>,
    wells: Query<(Entity, &WellHandle)>,
    mut contacts: MessageWriter<SourceContact>,
) {
    overlaps.clear();
    for (body, transform, radius, affected) in &bodies {
        if !affected.status.is_alive() {
            continue;
        }
        for (source_entity, handle) in &wells {
            if !registry.is_active(handle.0) {
                continue;
            }
            let overlapping = registry
                .get(handle.0)
                .is_some_and(|source| source.touches_surface(transform.translation, radius.0));
            if !overlapping {
                continue;
            }
            overlaps.insert((body, source_entity));
            if !touching.contains(&(body, source_entity)) {
                contacts.write(SourceContact {
                    body,
                    source: source_entity,
                });
            }
        }
    }
    std::mem::swap(&mut *touching, &mut *overlaps);
}

/// Apply the collision lose rule to every reported contact.
pub fn resolve_source_contacts_system(
    mut contacts: MessageReader<SourceContact>,
    index: Res<WellIndex>,
    mut bodies: Query<&mut GravityAffected>,
    mut lost: MessageWriter<BodyLost>,
) {
    for contact in contacts.read() {
        let Some(id) = index.source_of(contact.source) else {
            continue;
        };
        let Ok(mut affected) = bodies.get_mut(contact.body) else {
            continue;
        };
        let GravityAffected { settings, status } = &mut *affected;
        if let Some(cause) = status.notify_contact(settings, id) {
            info!("body {:?} lost: {:?}", contact.body, cause);
            lost.write(BodyLost {
                body: contact.body,
                cause,
            });
        }
    }
}
