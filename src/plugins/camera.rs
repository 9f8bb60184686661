//! Camera plugin - Self-contained plugin pattern
//!
//! Spawns the orbit camera and reframes it whenever a new trajectory is drawn.

use crate::plugins::simulation::SimulationSet;
use crate::plugins::trace::to_scene;
use crate::prelude::*;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::TouchControls;
use bevy_panorbit_camera::TrackpadBehavior;

/// Smallest orbit radius, so a single-sample trajectory stays in view
const MIN_CAMERA_RADIUS: f32 = 1.0;

/// Plugin that handles camera setup and control
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
        app.add_systems(
            Update,
            focus_on_trajectory.in_set(SimulationSet::Camera),
        );
    }
}

fn spawn_camera(mut commands: Commands, config: Res<SimulationConfig>) {
    let rendering = &config.rendering;
    let radius = rendering.scene_scale * rendering.camera_radius_multiplier;

    commands.spawn((
        Name::new("Main Camera"),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            hdr: true,
            ..default()
        },
        Camera3d::default(),
        Tonemapping::AcesFitted,
        Bloom::NATURAL,
        Msaa::Sample4,
        PanOrbitCamera {
            allow_upside_down: true,
            focus: Vec3::ZERO,
            pan_smoothness: 0.0,
            radius: Some(radius),
            touch_enabled: true,
            touch_controls: TouchControls::OneFingerOrbit,
            trackpad_behavior: TrackpadBehavior::blender_default(),
            trackpad_pinch_to_zoom_enabled: true,
            ..default()
        },
    ));
}

/// Focus point and orbit radius that keep the whole trajectory in view
pub fn framing(trajectory: &Trajectory, rendering: &crate::config::RenderingConfig) -> (Vec3, f32) {
    let scale = rendering.scene_scale;
    let Some((min, max)) = trajectory.bounds() else {
        return (Vec3::ZERO, scale * rendering.camera_radius_multiplier);
    };

    let (min, max) = (to_scene(min, scale), to_scene(max, scale));
    let center = (min + max) / 2.0;
    let radius = (max - min).length() / 2.0 * rendering.camera_radius_multiplier;

    (center, radius.max(MIN_CAMERA_RADIUS))
}

fn focus_on_trajectory(
    mut built: EventReader<TrajectoryBuilt>,
    mut cameras: Query<&mut PanOrbitCamera>,
    config: Res<SimulationConfig>,
) {
    let Some(TrajectoryBuilt(trajectory)) = built.read().last() else {
        return;
    };

    let (focus, radius) = framing(trajectory, &config.rendering);
    for mut camera in &mut cameras {
        camera.target_focus = focus;
        camera.target_radius = radius;
        camera.force_update = true;
    }
}
