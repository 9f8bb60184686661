//! Simulation plugin - Self-contained plugin pattern
//!
//! This plugin owns the trajectory pipeline: it builds trajectories on
//! command, feeds them to the playback controller, and steps playback once per
//! frame. All resources it needs are inserted here.

use crate::prelude::*;

mod actions;
mod playback;

use actions::{autostart_playback, handle_parameter_edits, handle_simulation_commands};
use playback::{advance_playback, sync_playback_phase};

/// Frame ordering shared by every plugin
///
/// Playback steps first so that a frame-step scheduled by a command always runs
/// on the following frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Playback,
    Input,
    Commands,
    Render,
    UI,
    Camera,
}

pub struct SimulationPlugin {
    config: SimulationConfig,
}

impl SimulationPlugin {
    /// Uses the layered user configuration
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::load_from_user_config())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        app.insert_resource(ConfigurationStore::new(config.mirror));
        app.insert_resource(PlaybackController::new(config.playback.stride));
        app.insert_resource(config);
        app.init_resource::<TrajectoryCache>();
        app.init_resource::<CurrentEngine>();
        app.init_resource::<SampleReadout>();
        app.init_resource::<ParameterFocus>();

        app.add_event::<SimulationCommand>();
        app.add_event::<ParameterEdit>();
        app.add_event::<TrajectoryBuilt>();
        app.add_event::<MarkerMoved>();

        app.init_state::<PlaybackPhase>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Playback,
                SimulationSet::Input,
                SimulationSet::Commands,
                SimulationSet::Render,
                SimulationSet::UI,
                SimulationSet::Camera,
            )
                .chain(),
        );

        app.add_systems(Startup, autostart_playback);

        app.add_systems(Update, advance_playback.in_set(SimulationSet::Playback));
        app.add_systems(
            Update,
            (
                handle_parameter_edits,
                handle_simulation_commands,
                sync_playback_phase,
            )
                .chain()
                .in_set(SimulationSet::Commands),
        );
    }
}
