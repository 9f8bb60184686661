//! Parameter panel
//!
//! One row per editable field. Clicking a value focuses it; typed text replaces
//! the value when Enter is pressed and is discarded on Escape. Committed text
//! goes out as a [`ParameterEdit`] so the simulation plugin stays the only
//! writer of the configuration store.

use crate::plugins::controls::constants::*;
use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};

/// Longest text an input field accepts
const MAX_FIELD_CHARS: usize = 24;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterField(pub EditTarget);

#[derive(Component)]
struct ParameterPanel;

pub struct ParametersPlugin;

impl Plugin for ParametersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_parameter_panel);
        app.add_systems(
            Update,
            (
                focus_parameter_field,
                type_into_focused_field,
                sync_parameter_fields,
            )
                .chain()
                .in_set(SimulationSet::UI),
        );
    }
}

fn spawn_parameter_panel(mut commands: Commands) {
    let text_font = TextFont {
        font_size: BUTTON_FONT_SIZE_PX,
        ..default()
    };

    commands
        .spawn((
            Name::new("Parameters"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(BUTTON_MARGIN_PX),
                left: Val::Px(BUTTON_MARGIN_PX),
                padding: UiRect::all(Val::Px(BUTTON_PADDING_PX)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(BUTTON_GAP_PX),
                ..default()
            },
            BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
            BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.7)),
            ParameterPanel,
        ))
        .with_children(|panel| {
            for target in EditTarget::ALL {
                panel
                    .spawn(Node {
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(BUTTON_GAP_PX),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            Node {
                                width: Val::Px(FIELD_LABEL_WIDTH_PX),
                                ..default()
                            },
                            Text::new(target.label()),
                            text_font.clone(),
                            TextColor(Color::WHITE),
                        ));
                        row.spawn((
                            Button,
                            Node {
                                width: Val::Px(FIELD_WIDTH_PX),
                                padding: UiRect::horizontal(Val::Px(BUTTON_PADDING_PX)),
                                ..default()
                            },
                            BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
                            BackgroundColor(BUTTON_COLOR_NORMAL),
                            ParameterField(target),
                            children![(
                                Text::new(""),
                                text_font.clone(),
                                TextColor(Color::WHITE)
                            )],
                        ));
                    });
            }
        });
}

fn focus_parameter_field(
    fields: Query<(&Interaction, &ParameterField), Changed<Interaction>>,
    mut focus: ResMut<ParameterFocus>,
) {
    for (interaction, field) in &fields {
        if *interaction == Interaction::Pressed && focus.target != Some(field.0) {
            debug!("Editing {}", field.0.label());
            focus.focus(field.0);
        }
    }
}

fn type_into_focused_field(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut focus: ResMut<ParameterFocus>,
    mut edits: EventWriter<ParameterEdit>,
) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed || !focus.is_active() {
            continue;
        }

        match &event.logical_key {
            Key::Enter => {
                if let Some((target, raw)) = focus.take() {
                    edits.write(ParameterEdit { target, raw });
                }
            }
            Key::Escape => focus.cancel(),
            Key::Backspace => {
                focus.buffer.pop();
            }
            Key::Character(c) => {
                for ch in c.chars().filter(|ch| !ch.is_control()) {
                    if focus.buffer.chars().count() < MAX_FIELD_CHARS {
                        focus.buffer.push(ch);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Text shown in a field: the live buffer while focused, otherwise the stored value
pub fn field_text(
    target: EditTarget,
    focus: &ParameterFocus,
    store: &ConfigurationStore,
    controller: &PlaybackController,
) -> String {
    if focus.target == Some(target) {
        return format!("{}_", focus.buffer);
    }

    match target {
        EditTarget::Mirror(parameter) => parameter.display_value(&store.get()),
        EditTarget::Stride => controller.stride().to_string(),
    }
}

fn sync_parameter_fields(
    focus: Res<ParameterFocus>,
    store: Res<ConfigurationStore>,
    controller: Res<PlaybackController>,
    mut fields: Query<(&ParameterField, &Children, &Interaction, &mut BackgroundColor)>,
    mut text_query: Query<&mut Text>,
) {
    for (field, children, interaction, mut color) in &mut fields {
        let focused = focus.target == Some(field.0);
        let background = match (focused, interaction) {
            (true, _) => FIELD_COLOR_FOCUSED,
            (false, Interaction::Hovered) => BUTTON_COLOR_HOVERED,
            (false, _) => BUTTON_COLOR_NORMAL,
        };
        if color.0 != background {
            *color = BackgroundColor(background);
        }

        let text_str = field_text(field.0, &focus, &store, &controller);
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                if text.0 != text_str {
                    text.0 = text_str;
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::test_utils::{create_test_app, send_key, type_text};

    fn app() -> App {
        let mut app = create_test_app();
        app.add_plugins((
            SimulationPlugin::with_config(SimulationConfig::default()),
            ParametersPlugin,
        ));
        app.update();
        app
    }

    fn field_entity(app: &mut App, target: EditTarget) -> Entity {
        let mut query = app.world_mut().query::<(Entity, &ParameterField)>();
        query
            .iter(app.world())
            .find(|(_, field)| field.0 == target)
            .map(|(entity, _)| entity)
            .unwrap()
    }

    fn click(app: &mut App, target: EditTarget) {
        let entity = field_entity(app, target);
        app.world_mut()
            .entity_mut(entity)
            .insert(Interaction::Pressed);
        app.update();
    }

    fn shown(app: &mut App, target: EditTarget) -> String {
        let entity = field_entity(app, target);
        let child = app.world().get::<Children>(entity).unwrap()[0];
        app.world().get::<Text>(child).unwrap().0.clone()
    }

    #[test]
    fn test_panel_shows_current_values() {
        let mut app = app();
        app.update();

        assert_eq!(
            shown(&mut app, EditTarget::Mirror(MirrorParameter::StepCount)),
            "1000"
        );
        assert_eq!(shown(&mut app, EditTarget::Stride), "10");
        assert_eq!(
            shown(&mut app, EditTarget::Mirror(MirrorParameter::FieldStrength)),
            "1"
        );
    }

    #[test]
    fn test_enter_commits_typed_value() {
        let mut app = app();
        let target = EditTarget::Mirror(MirrorParameter::LengthScale);
        click(&mut app, target);
        assert_eq!(app.world().resource::<ParameterFocus>().target, Some(target));

        type_text(&mut app, "2.5");
        app.update();
        assert_eq!(shown(&mut app, target), "2.5_");

        send_key(&mut app, Key::Enter);
        app.update();
        app.update();

        assert_eq!(app.world().resource::<ConfigurationStore>().length_scale, 2.5);
        assert!(!app.world().resource::<ParameterFocus>().is_active());
        assert_eq!(shown(&mut app, target), "2.5");
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = app();
        click(&mut app, EditTarget::Stride);
        type_text(&mut app, "3");
        app.update();

        send_key(&mut app, Key::Escape);
        app.update();
        app.update();

        assert!(!app.world().resource::<ParameterFocus>().is_active());
        assert_eq!(app.world().resource::<PlaybackController>().stride(), 10);
    }

    #[test]
    fn test_backspace_and_stride_commit() {
        let mut app = app();
        click(&mut app, EditTarget::Stride);
        type_text(&mut app, "25");
        app.update();
        send_key(&mut app, Key::Backspace);
        app.update();
        send_key(&mut app, Key::Enter);
        app.update();
        app.update();

        assert_eq!(app.world().resource::<PlaybackController>().stride(), 2);
    }

    #[test]
    fn test_malformed_real_shows_nan() {
        let mut app = app();
        let target = EditTarget::Mirror(MirrorParameter::PerpendicularVelocity);
        click(&mut app, target);
        type_text(&mut app, "oops");
        app.update();
        send_key(&mut app, Key::Enter);
        app.update();
        app.update();

        assert_eq!(shown(&mut app, target), "NaN");
    }
}
