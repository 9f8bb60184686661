//! Test utilities for plugin testing

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput, NativeKeyCode};

use crate::prelude::*;

/// Creates a minimal test app with core Bevy plugins needed for testing
pub fn create_test_app() -> App {
    let mut app = App::new();

    // Add minimal plugins needed for testing
    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::input::InputPlugin,
        bevy::state::app::StatesPlugin,
        bevy::transform::TransformPlugin,
    ));

    // Initialize assets needed by the rendering and UI plugins
    app.init_asset::<bevy::text::Font>();
    app.init_asset::<bevy::render::mesh::Mesh>();
    app.init_asset::<bevy::render::prelude::Shader>();
    app.init_asset::<bevy::pbr::StandardMaterial>();

    app
}

/// Helper to simulate a single logical key press
pub fn send_key(app: &mut App, key: Key) {
    app.world_mut().send_event(KeyboardInput {
        key_code: KeyCode::Unidentified(NativeKeyCode::Unidentified),
        logical_key: key,
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
}

/// Helper to simulate typing text, one key press per character
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        send_key(app, Key::Character(ch.to_string().into()));
    }
}
