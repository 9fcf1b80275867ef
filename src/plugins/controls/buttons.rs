//! Control button components
//!
//! Toggle buttons keep their label in sync with the state they toggle.

use super::builder::{ButtonWithLabel, labelled, set_button_text};
use crate::plugins::scene::SceneSettings;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct OrbitToggleButton;

impl ButtonWithLabel for OrbitToggleButton {
    fn command() -> Option<SimulationCommand> {
        Some(SimulationCommand::ToggleOrbiting)
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Pause Orbit"
    }

    fn shortcut() -> &'static str {
        "Space"
    }
}

#[derive(Component, Default)]
pub struct RestartButton;

impl ButtonWithLabel for RestartButton {
    fn command() -> Option<SimulationCommand> {
        Some(SimulationCommand::Restart)
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Restart"
    }

    fn shortcut() -> &'static str {
        "R"
    }
}

#[derive(Component, Default)]
pub struct LearningModeButton;

impl ButtonWithLabel for LearningModeButton {
    fn command() -> Option<SimulationCommand> {
        Some(SimulationCommand::ToggleLearningMode)
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Start Learning"
    }

    fn shortcut() -> &'static str {
        "L"
    }
}

#[derive(Component, Default)]
pub struct MathModeButton;

impl ButtonWithLabel for MathModeButton {
    fn command() -> Option<SimulationCommand> {
        Some(SimulationCommand::ToggleMathMode)
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Show Math"
    }

    fn shortcut() -> &'static str {
        "M"
    }
}

#[derive(Component, Default)]
pub struct OrbitRingButton;

impl ButtonWithLabel for OrbitRingButton {
    fn command() -> Option<SimulationCommand> {
        Some(SimulationCommand::ToggleOrbitRing)
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Hide Orbit Ring"
    }

    fn shortcut() -> &'static str {
        "G"
    }
}

#[derive(Component, Default)]
pub struct QuitButton;

impl ButtonWithLabel for QuitButton {
    fn command() -> Option<SimulationCommand> {
        None
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Quit"
    }

    fn shortcut() -> &'static str {
        "Esc"
    }
}

pub fn sync_orbit_button_text(
    state: Res<SimulationState>,
    mut shown: Local<Option<bool>>,
    buttons: Query<&Children, With<OrbitToggleButton>>,
    mut text_query: Query<&mut Text>,
) {
    let is_orbiting = state.orbit().is_orbiting;
    if *shown == Some(is_orbiting) {
        return;
    }
    *shown = Some(is_orbiting);

    let text = if is_orbiting {
        "Pause Orbit"
    } else {
        "Resume Orbit"
    };
    set_button_text(
        &buttons,
        &mut text_query,
        &labelled(text, OrbitToggleButton::shortcut()),
    );
}

pub fn sync_learning_button_text(
    learning: Res<LearningMode>,
    mut initialized: Local<bool>,
    buttons: Query<&Children, With<LearningModeButton>>,
    mut text_query: Query<&mut Text>,
) {
    if !*initialized || learning.is_changed() {
        *initialized = true;

        let text = if learning.is_enabled() {
            "Exit Learning"
        } else {
            "Start Learning"
        };
        set_button_text(
            &buttons,
            &mut text_query,
            &labelled(text, LearningModeButton::shortcut()),
        );
    }
}

pub fn sync_math_button_text(
    learning: Res<LearningMode>,
    mut initialized: Local<bool>,
    buttons: Query<&Children, With<MathModeButton>>,
    mut text_query: Query<&mut Text>,
) {
    if !*initialized || learning.is_changed() {
        *initialized = true;

        let text = if learning.is_math_mode() {
            "Hide Math"
        } else {
            "Show Math"
        };
        set_button_text(
            &buttons,
            &mut text_query,
            &labelled(text, MathModeButton::shortcut()),
        );
    }
}

pub fn sync_orbit_ring_button_text(
    settings: Res<SceneSettings>,
    mut initialized: Local<bool>,
    buttons: Query<&Children, With<OrbitRingButton>>,
    mut text_query: Query<&mut Text>,
) {
    if !*initialized || settings.is_changed() {
        *initialized = true;

        let text = if settings.show_orbit_ring {
            "Hide Orbit Ring"
        } else {
            "Show Orbit Ring"
        };
        set_button_text(
            &buttons,
            &mut text_query,
            &labelled(text, OrbitRingButton::shortcut()),
        );
    }
}
