use std::env;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use space_gravity::config::{self, GravityConfig};
use space_gravity::scenarios::{self, Probe, Scenario};
use space_gravity::simulation::{
    BodyLost, GravityAffected, GravityPlugin, GravitySet, LinearVelocity, WellIndex,
};

/// `GRAVITY_SCENARIO` value that named no known scenario.
#[derive(Resource, Debug, Default)]
struct UnknownScenario(Option<String>);

fn report_unknown_scenario(unknown: Res<UnknownScenario>, scenario: Res<Scenario>) {
    if let Some(name) = &unknown.0 {
        warn!(
            "Unknown scenario '{name}'; falling back to {}",
            scenario.name()
        );
    }
}

/// Drive the fixed clock one step per app update so the demo runs as fast as
/// the CPU allows while staying deterministic.
fn setup_fixed_clock(
    mut commands: Commands,
    config: Res<GravityConfig>,
    mut fixed: ResMut<Time<Fixed>>,
) {
    fixed.set_timestep_hz(config.fixed_timestep_hz);
    commands.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / config.fixed_timestep_hz,
    )));
}

/// Report the probe every few hundred ticks and exit when it is lost or the
/// tick limit is reached.
fn watch_probe_system(
    mut ticks: Local<u32>,
    config: Res<GravityConfig>,
    mut lost: MessageReader<BodyLost>,
    wells: Res<WellIndex>,
    probes: Query<(Entity, &Transform, &LinearVelocity, &GravityAffected), With<Probe>>,
    mut exit: MessageWriter<AppExit>,
) {
    *ticks += 1;

    for message in lost.read() {
        if probes.contains(message.body) {
            info!(
                "Probe lost after {} ticks: {:?} (well entity {:?})",
                *ticks,
                message.cause,
                wells.entity_of(message.cause.source()),
            );
            exit.write(AppExit::Success);
            return;
        }
    }

    if *ticks % 250 == 0 {
        for (_, transform, velocity, affected) in &probes {
            info!(
                "tick {:>5}  pos=({:.1}, {:.1}, {:.1})  |v|={:.3}  dominant={:?}",
                *ticks,
                transform.translation.x,
                transform.translation.y,
                transform.translation.z,
                velocity.0.length(),
                affected.status.dominant(),
            );
        }
    }

    if *ticks >= config.demo_tick_limit {
        info!("Probe survived {} ticks", *ticks);
        exit.write(AppExit::Success);
    }
}

fn main() {
    // GRAVITY_SCENARIO=orbit|black_hole|cluster
    let (scenario, unknown) = match env::var("GRAVITY_SCENARIO") {
        Ok(name) => match Scenario::from_name(&name) {
            Some(scenario) => (scenario, None),
            None => (Scenario::default(), Some(name)),
        },
        Err(_) => (Scenario::default(), None),
    };

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        // Compiled defaults first; load_gravity_config overwrites them from
        // assets/gravity.toml (if present) before anything else reads them.
        .insert_resource(GravityConfig::default())
        .insert_resource(scenario)
        .insert_resource(UnknownScenario(unknown))
        .add_plugins(GravityPlugin::default())
        .add_systems(
            Startup,
            (
                config::load_gravity_config,
                report_unknown_scenario,
                setup_fixed_clock.after(config::load_gravity_config),
                scenarios::spawn_selected_scenario.after(config::load_gravity_config),
            ),
        )
        .add_systems(FixedUpdate, watch_probe_system.after(GravitySet::Contacts))
        .run();
}
