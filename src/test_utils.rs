//! Test utilities for plugin testing

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use core::time::Duration;

use crate::prelude::*;

/// Frame duration used by headless test apps
pub const TEST_FRAME: Duration = Duration::from_millis(16);

/// Creates a minimal test app with core Bevy plugins needed for testing
pub fn create_test_app() -> App {
    let mut app = App::new();

    // Add minimal plugins needed for testing
    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::input::InputPlugin,
        bevy::transform::TransformPlugin,
    ));

    // Deterministic frame times
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));

    // Initialize assets needed by the scene plugin
    app.init_asset::<bevy::render::mesh::Mesh>();
    app.init_asset::<bevy::pbr::StandardMaterial>();

    app
}

/// Queues a simulation command for the next update
pub fn send_command(app: &mut App, command: SimulationCommand) {
    app.world_mut().send_event(command);
}

/// Helper to simulate a logical key press, as delivered by the window backend
pub fn press_key(app: &mut App, key_code: KeyCode, logical_key: Key) {
    let window = Entity::PLACEHOLDER;
    app.world_mut().send_event(KeyboardInput {
        key_code,
        logical_key,
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window,
    });
}

/// Helper to simulate a character key press
pub fn press_character(app: &mut App, character: &str) {
    press_key(
        app,
        KeyCode::Unidentified(bevy::input::keyboard::NativeKeyCode::Unidentified),
        Key::Character(character.into()),
    );
}
