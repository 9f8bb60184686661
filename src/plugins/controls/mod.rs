//! Controls plugin - Self-contained plugin pattern
//!
//! This plugin handles all user input (keyboard and UI buttons) and translates
//! them into SimulationCommand events. It provides a unified interface for
//! controlling playback, regardless of input method.

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::window::SystemCursorIcon;
use bevy::winit::cursor::CursorIcon;

mod builder;
mod buttons;
pub(crate) mod constants;

pub use builder::ButtonWithLabel;
use builder::ControlsCommandsExt;
pub use buttons::*;
use constants::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_controls_ui);

        app.add_systems(
            Update,
            (
                keyboard_input_handler,
                button_interaction_handler::<GenerateTrajectoryButton>,
                button_interaction_handler::<RunButton>,
                button_interaction_handler::<StopButton>,
                #[cfg(not(target_arch = "wasm32"))]
                button_interaction_handler::<QuitButton>,
                #[cfg(not(target_arch = "wasm32"))]
                quit_on_escape,
            )
                .in_set(SimulationSet::Input),
        );

        app.add_systems(
            Startup,
            run::sync_run_button_text.after(setup_controls_ui),
        );

        for phase in [
            PlaybackPhase::Idle,
            PlaybackPhase::Ready,
            PlaybackPhase::Running,
            PlaybackPhase::Stopped,
        ] {
            app.add_systems(OnEnter(phase), run::sync_run_button_text);
        }
    }
}

fn keyboard_input_handler(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut commands: EventWriter<SimulationCommand>,
    focus: Res<ParameterFocus>,
    controller: Res<PlaybackController>,
) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed || focus.is_active() {
            continue;
        }

        match &event.logical_key {
            Key::Character(c) => {
                let ch = c.to_lowercase();
                match ch.as_str() {
                    "g" => {
                        commands.write(SimulationCommand::GenerateTrajectory);
                    }
                    "r" => {
                        commands.write(SimulationCommand::Run);
                    }
                    "s" => {
                        commands.write(SimulationCommand::Stop);
                    }
                    _ => {}
                }
            }
            Key::Space => {
                if controller.is_running() {
                    commands.write(SimulationCommand::Stop);
                } else {
                    commands.write(SimulationCommand::Run);
                }
            }
            _ => {}
        }
    }
}

pub(crate) fn button_interaction_handler<T: ButtonWithLabel>(
    mut commands: Commands,
    windows: Query<Entity, With<Window>>,
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<T>),
    >,
    mut command_writer: EventWriter<SimulationCommand>,
) {
    for (interaction, mut color) in &mut interaction_query {
        let cursor = match *interaction {
            Interaction::Pressed => {
                *color = BackgroundColor(BUTTON_COLOR_PRESSED);
                command_writer.write(T::command());
                SystemCursorIcon::Pointer
            }
            Interaction::Hovered => {
                *color = BackgroundColor(BUTTON_COLOR_HOVERED);
                SystemCursorIcon::Pointer
            }
            Interaction::None => {
                *color = BackgroundColor(BUTTON_COLOR_NORMAL);
                SystemCursorIcon::Default
            }
        };

        if let Ok(window) = windows.single() {
            commands
                .entity(window)
                .insert(CursorIcon::System(cursor));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn quit_on_escape(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut commands: EventWriter<SimulationCommand>,
    focus: Res<ParameterFocus>,
) {
    for event in keyboard_events.read() {
        if event.state == ButtonState::Pressed
            && event.logical_key == Key::Escape
            && !focus.is_active()
        {
            commands.write(SimulationCommand::Quit);
        }
    }
}

#[derive(Component)]
pub struct UIRoot;

fn setup_controls_ui(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Controls"),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(BUTTON_MARGIN_PX),
                left: Val::Px(BUTTON_MARGIN_PX),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                row_gap: Val::Px(BUTTON_GAP_PX),
                ..default()
            },
            UIRoot,
        ))
        .with_children(|parent| {
            parent.spawn_control_button::<GenerateTrajectoryButton>();
            parent.spawn_control_button::<RunButton>();
            parent.spawn_control_button::<StopButton>();
            #[cfg(not(target_arch = "wasm32"))]
            parent.spawn_control_button::<QuitButton>();
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::test_utils::{create_test_app, send_key};

    fn app() -> App {
        let mut config = SimulationConfig::default();
        config.mirror.step_count = 50;
        config.playback.stride = 5;

        let mut app = create_test_app();
        app.add_plugins((SimulationPlugin::with_config(config), ControlsPlugin));
        app.update();
        app
    }

    fn run_button_text(app: &mut App) -> String {
        let mut buttons = app
            .world_mut()
            .query_filtered::<&Children, With<RunButton>>();
        let children = buttons.single(app.world()).unwrap();
        let child = children[0];
        app.world().get::<Text>(child).unwrap().0.clone()
    }

    #[test]
    fn test_controls_ui_spawns_buttons() {
        let mut app = app();
        let mut query = app.world_mut().query::<&Button>();
        let expected = if cfg!(target_arch = "wasm32") { 3 } else { 4 };
        assert_eq!(query.iter(app.world()).count(), expected);
        assert_eq!(run_button_text(&mut app), "Run (R)");
    }

    #[test]
    fn test_keyboard_shortcuts_drive_playback() {
        let mut app = app();

        send_key(&mut app, Key::Character("g".into()));
        app.update();
        assert_eq!(
            app.world().resource::<PlaybackController>().phase(),
            PlaybackPhase::Ready
        );

        send_key(&mut app, Key::Character("R".into()));
        app.update();
        assert!(app.world().resource::<PlaybackController>().is_running());

        send_key(&mut app, Key::Space);
        app.update();
        assert!(!app.world().resource::<PlaybackController>().is_running());
    }

    #[test]
    fn test_shortcuts_ignored_while_editing() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ParameterFocus>()
            .focus(EditTarget::Stride);

        send_key(&mut app, Key::Character("g".into()));
        app.update();

        assert_eq!(
            app.world().resource::<PlaybackController>().phase(),
            PlaybackPhase::Idle
        );
    }

    #[test]
    fn test_run_label_follows_phase() {
        let mut app = app();
        app.world_mut()
            .send_event(SimulationCommand::GenerateTrajectory);
        app.world_mut().send_event(SimulationCommand::Run);
        app.update();
        app.update();
        app.update();

        app.world_mut().send_event(SimulationCommand::Stop);
        app.update();
        app.update();
        app.update();
        assert_eq!(run_button_text(&mut app), "Resume (R)");

        app.world_mut().send_event(SimulationCommand::Run);
        for _ in 0..15 {
            app.update();
        }
        assert_eq!(run_button_text(&mut app), "Replay (R)");
    }

    #[test]
    fn test_stop_before_first_frame_offers_resume() {
        let mut app = app();
        app.world_mut()
            .send_event(SimulationCommand::GenerateTrajectory);
        app.update();

        app.world_mut().send_event(SimulationCommand::Run);
        app.world_mut().send_event(SimulationCommand::Stop);
        app.update();
        app.update();
        app.update();

        let controller = app.world().resource::<PlaybackController>();
        assert_eq!(controller.phase(), PlaybackPhase::Stopped);
        assert_eq!(controller.cursor(), 0);
        assert_eq!(run_button_text(&mut app), "Resume (R)");

        app.world_mut().send_event(SimulationCommand::Run);
        for _ in 0..15 {
            app.update();
        }
        assert_eq!(run_button_text(&mut app), "Replay (R)");
    }
}
