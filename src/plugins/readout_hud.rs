//! Readout HUD (Heads-Up Display) module.
//!
//! Overlay in the top-right corner listing the derived quantities of the
//! sample most recently published by playback:
//!
//! - **Time**: simulation time of the sample
//! - **Magnetic moment**: first adiabatic invariant
//! - **Energy**: kinetic energy per unit mass
//! - **v perp**: squared speed across the mirror axis
//! - **|B|**: field magnitude at the sample
//! - **Psi**: flux-surface label, the slowly varying invariant
//!
//! Every value reads `-` until playback publishes its first sample, and after
//! each rebuild. Non-finite values are shown as they are (`NaN`, `inf`).

use crate::plugins::simulation::SimulationSet;
use crate::playback::SampleQuantities;
use crate::prelude::*;

/// One value cell of the HUD
#[derive(Component, Copy, Clone, PartialEq, Eq, Debug)]
pub enum ReadoutField {
    Sample,
    Time,
    MagneticMoment,
    Energy,
    PerpendicularVelocity,
    FieldMagnitude,
    AdiabaticInvariant,
}

impl ReadoutField {
    pub const ALL: [ReadoutField; 7] = [
        ReadoutField::Sample,
        ReadoutField::Time,
        ReadoutField::MagneticMoment,
        ReadoutField::Energy,
        ReadoutField::PerpendicularVelocity,
        ReadoutField::FieldMagnitude,
        ReadoutField::AdiabaticInvariant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReadoutField::Sample => "Sample",
            ReadoutField::Time => "Time",
            ReadoutField::MagneticMoment => "Magnetic moment",
            ReadoutField::Energy => "Energy",
            ReadoutField::PerpendicularVelocity => "v perp",
            ReadoutField::FieldMagnitude => "|B|",
            ReadoutField::AdiabaticInvariant => "Psi",
        }
    }

    pub fn format(self, quantities: Option<&SampleQuantities>) -> String {
        let Some(q) = quantities else {
            return "-".to_string();
        };

        match self {
            ReadoutField::Sample => q.index.to_string(),
            ReadoutField::Time => format!("{:.3}", q.time),
            ReadoutField::MagneticMoment => format!("{:.6}", q.magnetic_moment),
            ReadoutField::Energy => format!("{:.6}", q.energy),
            ReadoutField::PerpendicularVelocity => format!("{:.6}", q.perpendicular_velocity),
            ReadoutField::FieldMagnitude => format!("{:.6}", q.field_magnitude),
            ReadoutField::AdiabaticInvariant => format!("{:.6}", q.adiabatic_invariant),
        }
    }
}

pub struct ReadoutHudPlugin;

impl ReadoutHudPlugin {
    fn spawn_readout_hud(mut commands: Commands) {
        let text_font = TextFont {
            font_size: 12.0,
            ..default()
        };

        let hud_row_node = Node {
            display: Display::Flex,
            justify_content: JustifyContent::SpaceBetween,
            column_gap: Val::Px(20.0),
            ..default()
        };

        commands
            .spawn((
                Name::new("Readout"),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(5.0),
                    right: Val::Px(5.0),
                    padding: UiRect::all(Val::Px(5.0)),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(1.0),
                    ..default()
                },
                BorderRadius::all(Val::Px(5.0)),
                BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.7)),
            ))
            .with_children(|hud| {
                for field in ReadoutField::ALL {
                    hud.spawn((
                        hud_row_node.clone(),
                        children![
                            (
                                Text::new(field.label()),
                                text_font.clone(),
                                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                            ),
                            (
                                field,
                                Text::new(field.format(None)),
                                text_font.clone(),
                                TextLayout::new_with_justify(JustifyText::Right),
                            ),
                        ],
                    ));
                }
            });
    }

    fn update_readout_text(
        readout: Res<SampleReadout>,
        mut values: Query<(&ReadoutField, &mut Text)>,
    ) {
        if !readout.is_changed() {
            return;
        }

        for (field, mut text) in &mut values {
            text.0 = field.format(readout.0.as_ref());
        }
    }
}

impl Plugin for ReadoutHudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::spawn_readout_hud);
        app.add_systems(
            Update,
            Self::update_readout_text.in_set(SimulationSet::UI),
        );
    }
}
