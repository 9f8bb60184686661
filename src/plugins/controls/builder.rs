//! Spawning for the playback buttons
//!
//! Generate, Run, Stop and Quit share one look. Each implements
//! [`ButtonWithLabel`] to supply the [`SimulationCommand`] it sends and its
//! "Text (Key)" label; [`ControlsCommandsExt::spawn_control_button`] builds the
//! node and label child for any of them.

use crate::plugins::controls::constants::*;
use crate::prelude::*;
use bevy::ecs::hierarchy::ChildSpawnerCommands;

pub trait ControlsCommandsExt {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self) -> Entity;
}

impl ControlsCommandsExt for ChildSpawnerCommands<'_> {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self) -> Entity {
        self.spawn((
            Button,
            Node {
                width: Val::Px(BUTTON_WIDTH_PX),
                height: Val::Auto,
                padding: UiRect::all(Val::Px(BUTTON_PADDING_PX)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
            BackgroundColor(BUTTON_COLOR_NORMAL),
            T::marker(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(T::label()),
                TextColor(Color::WHITE),
                TextFont {
                    font_size: BUTTON_FONT_SIZE_PX,
                    ..default()
                },
            ));
        })
        .id()
    }
}

pub trait ButtonWithLabel: Component + 'static {
    /// Sent when the button is pressed
    fn command() -> SimulationCommand;

    fn marker() -> Self;

    /// Label without the shortcut suffix
    fn base_text() -> &'static str;

    /// Key that sends the same command
    fn shortcut() -> &'static str;

    /// Initial label, e.g. "Stop (S)"
    fn label() -> String {
        format!("{} ({})", Self::base_text(), Self::shortcut())
    }
}
