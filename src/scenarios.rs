//! Demo scenes for the headless binary and the integration tests.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::body::GravityBody;
use crate::config::GravityConfig;
use crate::constants::CLUSTER_SEED;
use crate::simulation::{
    ContactRadius, GravityAffected, GravityWell, LinearVelocity, ShieldState,
};
use crate::source::GravitySource;

/// Tags the body whose fate the demo reports.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Probe;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// A probe on a circular orbit around a single star.
    #[default]
    Orbit,
    /// A probe dropped with little tangential speed toward a heavy black hole.
    BlackHole,
    /// A probe in a random field of sources, evaluating only the nearest few.
    Cluster,
}

impl Scenario {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "orbit" => Some(Self::Orbit),
            "black_hole" => Some(Self::BlackHole),
            "cluster" => Some(Self::Cluster),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Orbit => "orbit",
            Self::BlackHole => "black_hole",
            Self::Cluster => "cluster",
        }
    }

    pub fn spawn(self, commands: &mut Commands, config: &GravityConfig) -> Entity {
        match self {
            Self::Orbit => spawn_orbit(commands, config),
            Self::BlackHole => spawn_black_hole(commands, config),
            Self::Cluster => spawn_cluster(commands, config, CLUSTER_SEED),
        }
    }
}

/// Startup system: spawn the selected [`Scenario`].
pub fn spawn_selected_scenario(
    mut commands: Commands,
    scenario: Res<Scenario>,
    config: Res<GravityConfig>,
) {
    scenario.spawn(&mut commands, &config);
    info!("Spawned scenario '{}'", scenario.name());
}

fn spawn_probe(
    commands: &mut Commands,
    config: &GravityConfig,
    settings: GravityBody,
    position: Vec3,
    velocity: Vec3,
) -> Entity {
    commands
        .spawn((
            Probe,
            GravityAffected::new(settings),
            ShieldState(config.shield_template()),
            ContactRadius(config.body_contact_radius),
            LinearVelocity(velocity),
            Transform::from_translation(position),
        ))
        .id()
}

/// Speed of a circular orbit of radius `r` around a point mass.
fn circular_speed(g: f32, mass: f32, r: f32) -> f32 {
    (g * mass / r).sqrt()
}

pub fn spawn_orbit(commands: &mut Commands, config: &GravityConfig) -> Entity {
    let star = GravitySource {
        surface_radius: 60.0,
        ..config.source_template(Vec3::ZERO)
    };
    let g = star.gravitational_constant;
    let mass = star.mass;
    commands.spawn((GravityWell::new(star), Transform::default()));

    let r = 1000.0;
    let speed = circular_speed(g, mass, r);
    spawn_probe(
        commands,
        config,
        config.body_template(),
        Vec3::new(r, 0.0, 0.0),
        Vec3::new(0.0, 0.0, speed),
    )
}

pub fn spawn_black_hole(commands: &mut Commands, config: &GravityConfig) -> Entity {
    let hole = GravitySource {
        mass: config.source_mass * 20.0,
        ..config.black_hole_template(Vec3::ZERO)
    };
    commands.spawn((GravityWell::new(hole), Transform::default()));

    spawn_probe(
        commands,
        config,
        config.body_template(),
        Vec3::new(600.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.5),
    )
}

pub fn spawn_cluster(commands: &mut Commands, config: &GravityConfig, seed: u64) -> Entity {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..12 {
        let position = Vec3::new(
            rng.gen_range(-3000.0..3000.0),
            rng.gen_range(-600.0..600.0),
            rng.gen_range(-3000.0..3000.0),
        );
        let source = GravitySource {
            mass: config.source_mass * rng.gen_range(0.2_f32..2.0),
            surface_radius: rng.gen_range(20.0..80.0),
            ..config.source_template(position)
        };
        commands.spawn((GravityWell::new(source), Transform::from_translation(position)));
    }

    let settings = GravityBody {
        max_sources_per_step: 4,
        ..config.body_template()
    };
    spawn_probe(commands, config, settings, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0))
}
