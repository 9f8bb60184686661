use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use clap::Parser;
use mirrorscope::cli::{Args, load_and_apply_config, render_config};
use mirrorscope::plugins::attribution::AttributionPlugin;
use mirrorscope::plugins::camera::CameraPlugin;
use mirrorscope::plugins::controls::ControlsPlugin;
use mirrorscope::plugins::parameters::ParametersPlugin;
use mirrorscope::plugins::readout_hud::ReadoutHudPlugin;
use mirrorscope::plugins::simulation::SimulationPlugin;
use mirrorscope::plugins::trace::TracePlugin;

fn main() -> AppExit {
    let args = Args::parse();

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::from_code(1);
        }
    };

    if args.print_config {
        return match render_config(&config) {
            Ok(toml) => {
                print!("{toml}");
                AppExit::Success
            }
            Err(e) => {
                eprintln!("Error: {e}");
                AppExit::from_code(1)
            }
        };
    }

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();

    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Mirrorscope".to_string(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                level,
                filter: "wgpu=error,naga=warn".to_string(),
                ..default()
            }),
        PanOrbitCameraPlugin,
    ));

    app.add_plugins((
        SimulationPlugin::with_config(config),
        TracePlugin,
        CameraPlugin,
        ControlsPlugin,
        ParametersPlugin,
        ReadoutHudPlugin,
        AttributionPlugin,
    ));

    app.add_systems(Startup, log_build_info);

    app.run()
}

fn log_build_info() {
    info!(
        "Mirrorscope v{} built {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );
}
