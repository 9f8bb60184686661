//! Action handlers for simulation commands
//!
//! This module contains handlers for SimulationCommand and ParameterEdit
//! events, plus the optional generate-and-run on startup.

use crate::prelude::*;
use crate::resources::parse_stride;

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut cache: ResMut<TrajectoryCache>,
    engine: Res<CurrentEngine>,
    store: Res<ConfigurationStore>,
    mut controller: ResMut<PlaybackController>,
    mut readout: ResMut<SampleReadout>,
    mut built: EventWriter<TrajectoryBuilt>,
    #[cfg(not(target_arch = "wasm32"))] mut exit: EventWriter<AppExit>,
) {
    for command in commands_reader.read() {
        match command {
            SimulationCommand::GenerateTrajectory => {
                **readout = None;
                match cache.build(engine.0.as_ref(), store.get()) {
                    Some(trajectory) => {
                        controller.load(trajectory.clone());
                        built.write(TrajectoryBuilt(trajectory));
                    }
                    None => controller.unload(),
                }
            }
            SimulationCommand::Run => {
                let phase = controller.phase();
                if controller.start() {
                    info!("Playback started from sample {}", controller.cursor());
                } else {
                    debug!("Run ignored while {:?}", phase);
                }
            }
            SimulationCommand::Stop => {
                if controller.stop() {
                    info!("Playback stopping at sample {}", controller.cursor());
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            SimulationCommand::Quit => {
                exit.write_default();
            }
        }
    }
}

pub fn handle_parameter_edits(
    mut edits: EventReader<ParameterEdit>,
    mut store: ResMut<ConfigurationStore>,
    mut controller: ResMut<PlaybackController>,
) {
    for edit in edits.read() {
        match edit.target {
            EditTarget::Mirror(parameter) => {
                store.set(parameter, &edit.raw);
                let value = parameter.display_value(&store.get());
                info!("{} set to {}", parameter.label(), value);
            }
            EditTarget::Stride => match parse_stride(&edit.raw) {
                Some(stride) => {
                    controller.set_stride(stride);
                    info!("Stride set to {}", stride);
                }
                None => {
                    warn!(
                        "Ignoring stride {:?}: expected a positive integer, keeping {}",
                        edit.raw,
                        controller.stride()
                    );
                }
            },
        }
    }
}

pub fn autostart_playback(
    config: Res<SimulationConfig>,
    mut commands: EventWriter<SimulationCommand>,
) {
    if config.playback.autostart {
        info!("Autostart enabled; generating trajectory");
        commands.write(SimulationCommand::GenerateTrajectory);
        commands.write(SimulationCommand::Run);
    }
}
