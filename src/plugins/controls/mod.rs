//! Controls plugin - Self-contained plugin pattern
//!
//! This plugin handles all user input (keyboard and UI buttons) and translates
//! them into SimulationCommand events. Range limits are applied when the
//! simulation plugin resolves the commands.

use crate::prelude::*;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::window::SystemCursorIcon;
use bevy::winit::cursor::CursorIcon;

mod builder;
mod buttons;
mod constants;

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
                button_interaction_handler::<OrbitToggleButton>,
                button_interaction_handler::<RestartButton>,
                button_interaction_handler::<LearningModeButton>,
                button_interaction_handler::<MathModeButton>,
                button_interaction_handler::<OrbitRingButton>,
                quit_button_handler,
                quit_on_escape,
            )
                .before(SimulationSet::Input),
        );

        app.add_systems(
            Update,
            (
                sync_orbit_button_text,
                sync_learning_button_text,
                sync_math_button_text,
                sync_orbit_ring_button_text,
                sync_button_lock::<OrbitToggleButton>,
                sync_button_lock::<RestartButton>,
                sync_button_lock::<LearningModeButton>,
                sync_button_lock::<MathModeButton>,
                sync_button_lock::<OrbitRingButton>,
            )
                .after(SimulationSet::Input),
        );
    }
}

/// Maps a pressed logical key to the command it triggers
pub fn command_for_key(key: &Key) -> Option<SimulationCommand> {
    match key {
        Key::Space => Some(SimulationCommand::ToggleOrbiting),
        Key::ArrowUp => Some(SimulationCommand::AdjustPrimaryMass(1)),
        Key::ArrowDown => Some(SimulationCommand::AdjustPrimaryMass(-1)),
        Key::ArrowRight => Some(SimulationCommand::AdjustSecondaryMass(1)),
        Key::ArrowLeft => Some(SimulationCommand::AdjustSecondaryMass(-1)),
        Key::Character(c) => match c.to_lowercase().as_str() {
            "=" | "+" => Some(SimulationCommand::AdjustOrbitRadius(1)),
            "-" | "_" => Some(SimulationCommand::AdjustOrbitRadius(-1)),
            "r" => Some(SimulationCommand::Restart),
            "l" => Some(SimulationCommand::ToggleLearningMode),
            "]" => Some(SimulationCommand::NextLearningStep),
            "[" => Some(SimulationCommand::PreviousLearningStep),
            "m" => Some(SimulationCommand::ToggleMathMode),
            "g" => Some(SimulationCommand::ToggleOrbitRing),
            _ => None,
        },
        _ => None,
    }
}

fn keyboard_input_handler(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }

        if let Some(command) = command_for_key(&event.logical_key) {
            commands.write(command);
        }
    }
}

fn is_locked<T: ButtonWithLabel>(learning: &LearningMode) -> bool {
    learning.inputs_locked()
        && T::command().is_some_and(|command| command.is_locked_while_learning())
}

fn idle_color(interaction: Interaction) -> Color {
    match interaction {
        Interaction::Pressed => BUTTON_COLOR_PRESSED,
        Interaction::Hovered => BUTTON_COLOR_HOVERED,
        Interaction::None => BUTTON_COLOR_NORMAL,
    }
}

/// Dims or restores buttons as soon as learning mode changes, without
/// waiting for the pointer to touch them
fn sync_button_lock<T: ButtonWithLabel>(
    learning: Res<LearningMode>,
    mut buttons: Query<(Option<&Interaction>, &mut BackgroundColor), With<T>>,
) {
    if !learning.is_changed() {
        return;
    }

    let locked = is_locked::<T>(&learning);
    for (interaction, mut color) in &mut buttons {
        color.0 = if locked {
            BUTTON_COLOR_DISABLED
        } else {
            idle_color(interaction.copied().unwrap_or_default())
        };
    }
}

#[allow(clippy::type_complexity)]
fn button_interaction_handler<T: ButtonWithLabel>(
    mut commands: Commands,
    window: Single<Entity, With<Window>>,
    learning: Res<LearningMode>,
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<T>),
    >,
    mut command_writer: EventWriter<SimulationCommand>,
) {
    let locked = is_locked::<T>(&learning);

    for (interaction, mut color) in &mut interaction_query {
        if locked {
            *color = BackgroundColor(BUTTON_COLOR_DISABLED);
            continue;
        }

        match *interaction {
            Interaction::Pressed => {
                commands
                    .entity(*window)
                    .insert(CursorIcon::System(SystemCursorIcon::Pointer));

                *color = BackgroundColor(BUTTON_COLOR_PRESSED);
                if let Some(command) = T::command() {
                    command_writer.write(command);
                }
            }
            Interaction::Hovered => {
                commands
                    .entity(*window)
                    .insert(CursorIcon::System(SystemCursorIcon::Pointer));

                *color = BackgroundColor(BUTTON_COLOR_HOVERED);
            }
            Interaction::None => {
                commands
                    .entity(*window)
                    .insert(CursorIcon::System(SystemCursorIcon::Default));

                *color = BackgroundColor(BUTTON_COLOR_NORMAL);
            }
        }
    }
}

#[allow(clippy::type_complexity)]
fn quit_button_handler(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<QuitButton>)>,
    mut exit: EventWriter<AppExit>,
) {
    for interaction in &interaction_query {
        if *interaction == Interaction::Pressed {
            exit.write_default();
        }
    }
}

fn quit_on_escape(mut keyboard_events: EventReader<KeyboardInput>, mut exit: EventWriter<AppExit>) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }

        match &event.logical_key {
            Key::Escape => {
                exit.write_default();
            }
            Key::Character(c) if c.to_lowercase() == "q" => {
                exit.write_default();
            }
            _ => {}
        }
    }
}

#[derive(Component)]
pub struct UIRoot;

fn setup_controls_ui(mut commands: Commands, config: Res<NewtonLabConfig>) {
    let font_size = config.ui.font_size - 2.0;

    commands
        .spawn((
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
            parent.spawn_control_button::<OrbitToggleButton>(font_size);
            parent.spawn_control_button::<RestartButton>(font_size);
            parent.spawn_control_button::<LearningModeButton>(font_size);
            parent.spawn_control_button::<MathModeButton>(font_size);
            parent.spawn_control_button::<OrbitRingButton>(font_size);
            parent.spawn_control_button::<QuitButton>(font_size);
        });
}
