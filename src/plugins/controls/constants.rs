//! Shared styling constants for controls UI

use bevy::prelude::Color;

pub const BUTTON_BORDER_RADIUS_PX: f32 = 4.0;
pub const BUTTON_GAP_PX: f32 = 4.0;
pub const BUTTON_MARGIN_PX: f32 = 12.0;
pub const BUTTON_PADDING_PX: f32 = 6.0;
pub const BUTTON_WIDTH_PX: f32 = 190.0;

pub const BUTTON_COLOR_NORMAL: Color = Color::srgba(0.06, 0.09, 0.16, 0.8);
pub const BUTTON_COLOR_HOVERED: Color = Color::srgba(0.15, 0.2, 0.3, 0.9);
pub const BUTTON_COLOR_PRESSED: Color = Color::srgba(0.25, 0.35, 0.55, 0.9);
pub const BUTTON_COLOR_DISABLED: Color = Color::srgba(0.06, 0.09, 0.16, 0.35);
