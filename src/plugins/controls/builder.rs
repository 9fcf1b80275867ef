//! Builder pattern utilities for controls UI
//!
//! This module provides a CommandsExt trait and the ButtonWithLabel trait
//! so every control button is spawned and labelled the same way.

use crate::plugins::controls::constants::*;
use crate::prelude::*;
use bevy::ecs::hierarchy::ChildSpawnerCommands;

pub trait ControlsCommandsExt {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self, font_size: f32) -> Entity;
}

impl ControlsCommandsExt for ChildSpawnerCommands<'_> {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self, font_size: f32) -> Entity {
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
            children![(
                Text::new(T::label()),
                TextColor(Color::WHITE),
                TextFont {
                    font_size,
                    ..default()
                },
            )],
        ))
        .id()
    }
}

pub trait ButtonWithLabel: Component + 'static {
    /// The command this button triggers, or `None` for buttons handled elsewhere
    fn command() -> Option<SimulationCommand>;

    /// The marker component instance
    fn marker() -> Self;

    /// The base text for the button (without shortcut)
    fn base_text() -> &'static str;

    /// The keyboard shortcut for this button
    fn shortcut() -> &'static str;

    /// The base text with shortcut appended
    fn label() -> String {
        labelled(Self::base_text(), Self::shortcut())
    }
}

pub fn labelled(text: &str, shortcut: &str) -> String {
    format!("{text} ({shortcut})")
}

/// Rewrites the first text child of every button marked `T`
pub fn set_button_text<T: Component>(
    buttons: &Query<&Children, With<T>>,
    text_query: &mut Query<&mut Text>,
    text: &str,
) {
    for children in buttons {
        for &child in &**children {
            if let Ok(mut button_text) = text_query.get_mut(child) {
                **button_text = text.to_string();
                break;
            }
        }
    }
}
