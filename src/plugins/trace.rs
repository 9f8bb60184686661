//! Trajectory trace rendering
//!
//! The full trajectory is drawn once per build as a line-strip mesh, with a
//! sphere marking the playback position. Frame-steps only move the marker.
//!
//! Simulation coordinates put the mirror axis along z; the scene maps it onto
//! Bevy's vertical y axis.

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

/// How a [`ScatterTrace`] should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    Lines,
    Markers,
}

/// Column-oriented point set handed to the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterTrace {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub mode: TraceMode,
}

impl ScatterTrace {
    /// Polyline through every sample of a trajectory
    pub fn lines(trajectory: &Trajectory) -> Self {
        Self::from_positions(trajectory.positions(), TraceMode::Lines)
    }

    /// Single marker point
    pub fn marker(position: Vector) -> Self {
        Self::from_positions(std::iter::once(position), TraceMode::Markers)
    }

    fn from_positions(positions: impl Iterator<Item = Vector>, mode: TraceMode) -> Self {
        let (lower, _) = positions.size_hint();
        let mut trace = Self {
            x: Vec::with_capacity(lower),
            y: Vec::with_capacity(lower),
            z: Vec::with_capacity(lower),
            mode,
        };
        for position in positions {
            trace.x.push(position.x as f32);
            trace.y.push(position.y as f32);
            trace.z.push(position.z as f32);
        }
        trace
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points in scene space, skipping any with a non-finite coordinate
    pub fn scene_points(&self, scale: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(move |((&x, &y), &z)| Vec3::new(x, z, -y) * scale)
            .filter(|point| point.is_finite())
    }

    pub fn to_mesh(&self, scale: f32) -> Mesh {
        let topology = match self.mode {
            TraceMode::Lines => PrimitiveTopology::LineStrip,
            TraceMode::Markers => PrimitiveTopology::PointList,
        };
        let positions: Vec<[f32; 3]> = self.scene_points(scale).map(|p| p.to_array()).collect();

        Mesh::new(topology, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    }
}

/// Converts a simulation position to scene space
pub fn to_scene(position: Vector, scale: f32) -> Vec3 {
    Vec3::new(position.x as f32, position.z as f32, -position.y as f32) * scale
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryTrace {
    pub generation: u64,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackMarker {
    pub generation: u64,
}

pub struct TracePlugin;

impl Plugin for TracePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (draw_static_trace, draw_marker_frame)
                .chain()
                .in_set(SimulationSet::Render),
        );
    }
}

/// Replaces the previous trace and marker with those of the newest trajectory
pub fn draw_static_trace(
    mut built: EventReader<TrajectoryBuilt>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, Or<(With<TrajectoryTrace>, With<PlaybackMarker>)>>,
    config: Res<SimulationConfig>,
) {
    let Some(TrajectoryBuilt(trajectory)) = built.read().last() else {
        return;
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let rendering = &config.rendering;
    let scale = rendering.scene_scale;
    let generation = trajectory.generation();
    let trace = ScatterTrace::lines(trajectory);

    commands.spawn((
        Name::new("Trajectory Trace"),
        Mesh3d(meshes.add(trace.to_mesh(scale))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: rendering.trace_color(),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        TrajectoryTrace { generation },
    ));

    let start = trajectory.position(0).map_or(Vec3::ZERO, |p| to_scene(p, scale));
    commands.spawn((
        Name::new("Playback Marker"),
        Mesh3d(meshes.add(Sphere::new(rendering.marker_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: rendering.marker_color(),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(if start.is_finite() { start } else { Vec3::ZERO }),
        PlaybackMarker { generation },
    ));

    debug!("Drew trace #{} with {} points", generation, trace.len());
}

/// Moves the marker; positions from an older trajectory are ignored
pub fn draw_marker_frame(
    mut moved: EventReader<MarkerMoved>,
    mut markers: Query<(&PlaybackMarker, &mut Transform)>,
    config: Res<SimulationConfig>,
) {
    let scale = config.rendering.scene_scale;

    for event in moved.read() {
        let translation = to_scene(event.position, scale);
        if !translation.is_finite() {
            continue;
        }

        for (marker, mut transform) in &mut markers {
            if marker.generation == event.generation {
                transform.translation = translation;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::test_utils::create_test_app;

    fn app_with(steps: i64, stride: usize) -> App {
        let mut config = SimulationConfig::default();
        config.mirror.step_count = steps;
        config.playback.stride = stride;

        let mut app = create_test_app();
        app.add_plugins((SimulationPlugin::with_config(config), TracePlugin));
        app.update();
        app
    }

    fn marker_translation(app: &mut App) -> Vec3 {
        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<PlaybackMarker>>();
        query.single(app.world()).unwrap().translation
    }

    fn count<T: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<Entity, With<T>>();
        query.iter(app.world()).count()
    }

    #[test]
    fn test_scatter_trace_columns() {
        let trace = ScatterTrace::marker(Vector::new(1.0, 2.0, 3.0));
        assert_eq!(trace.mode, TraceMode::Markers);
        assert_eq!((trace.x[0], trace.y[0], trace.z[0]), (1.0, 2.0, 3.0));
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_scene_mapping_puts_axis_up() {
        assert_eq!(to_scene(Vector::Z, 2.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(to_scene(Vector::Y, 1.0), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_mesh_skips_non_finite_points() {
        let trace = ScatterTrace {
            x: vec![0.0, f32::NAN, 1.0],
            y: vec![0.0, 0.0, 0.0],
            z: vec![0.0, 0.0, 1.0],
            mode: TraceMode::Lines,
        };
        let mesh = trace.to_mesh(1.0);

        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineStrip);
        assert_eq!(mesh.count_vertices(), 2);
    }

    #[test]
    fn test_generate_draws_trace_and_marker_once() {
        let mut app = app_with(40, 4);
        app.world_mut()
            .send_event(SimulationCommand::GenerateTrajectory);
        app.update();

        assert_eq!(count::<TrajectoryTrace>(&mut app), 1);
        assert_eq!(count::<PlaybackMarker>(&mut app), 1);

        let scale = SimulationConfig::default().rendering.scene_scale;
        let start = app.world().resource::<PlaybackController>().trajectory().unwrap().position(0);
        let expected = to_scene(start.unwrap(), scale);
        assert!(marker_translation(&mut app).distance(expected) < 1e-5);

        app.world_mut()
            .send_event(SimulationCommand::GenerateTrajectory);
        app.update();
        assert_eq!(count::<TrajectoryTrace>(&mut app), 1);
        assert_eq!(count::<PlaybackMarker>(&mut app), 1);
    }

    #[test]
    fn test_running_moves_only_the_marker() {
        let mut app = app_with(40, 4);
        app.world_mut()
            .send_event(SimulationCommand::GenerateTrajectory);
        app.world_mut().send_event(SimulationCommand::Run);
        app.update();

        let trace_mesh = {
            let mut query = app.world_mut().query::<(&TrajectoryTrace, &Mesh3d)>();
            query.single(app.world()).unwrap().1.0.clone()
        };

        app.update();
        app.update();

        let scale = SimulationConfig::default().rendering.scene_scale;
        let expected = {
            let controller = app.world().resource::<PlaybackController>();
            let trajectory = controller.trajectory().unwrap();
            to_scene(trajectory.position(4).unwrap(), scale)
        };
        assert!(marker_translation(&mut app).distance(expected) < 1e-5);

        let mut query = app.world_mut().query::<(&TrajectoryTrace, &Mesh3d)>();
        assert_eq!(query.single(app.world()).unwrap().1.0, trace_mesh);
    }

    #[test]
    fn test_marker_snaps_back_when_finished() {
        let mut app = app_with(8, 3);
        app.world_mut()
            .send_event(SimulationCommand::GenerateTrajectory);
        app.world_mut().send_event(SimulationCommand::Run);
        for _ in 0..6 {
            app.update();
        }

        let scale = SimulationConfig::default().rendering.scene_scale;
        let expected = {
            let controller = app.world().resource::<PlaybackController>();
            to_scene(controller.trajectory().unwrap().position(0).unwrap(), scale)
        };
        assert!(marker_translation(&mut app).distance(expected) < 1e-5);
    }
}
