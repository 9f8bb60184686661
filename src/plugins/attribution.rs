//! Attribution plugin - Displays program name and version
//!
//! Shows the version and build date in the lower right corner of the screen.

use crate::prelude::*;

#[derive(Component)]
pub struct AttributionText;

pub struct AttributionPlugin;

impl Plugin for AttributionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_attribution);
    }
}

pub fn attribution_text() -> String {
    format!(
        "Mirrorscope v{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    )
}

fn setup_attribution(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(5.0),
            right: Val::Px(5.0),
            padding: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        Text::new(attribution_text()),
        TextFont {
            font_size: 10.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.3)),
        AttributionText,
    ));
}
