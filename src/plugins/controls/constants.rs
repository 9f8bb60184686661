//! Shared styling constants for the control and parameter panels

use bevy::prelude::Color;

pub const BUTTON_BORDER_RADIUS_PX: f32 = 4.0;
pub const BUTTON_FONT_SIZE_PX: f32 = 13.0;
pub const BUTTON_GAP_PX: f32 = 4.0;
pub const BUTTON_MARGIN_PX: f32 = 6.0;
pub const BUTTON_PADDING_PX: f32 = 5.0;
pub const BUTTON_WIDTH_PX: f32 = 180.0;

pub const BUTTON_COLOR_NORMAL: Color = Color::srgba(1.0, 1.0, 1.0, 0.02);
pub const BUTTON_COLOR_HOVERED: Color = Color::srgba(1.0, 1.0, 1.0, 0.1);
pub const BUTTON_COLOR_PRESSED: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);

/// Background of an input field that is receiving keystrokes
pub const FIELD_COLOR_FOCUSED: Color = Color::srgba(0.3, 0.55, 1.0, 0.25);
pub const FIELD_LABEL_WIDTH_PX: f32 = 60.0;
pub const FIELD_WIDTH_PX: f32 = 110.0;
