//! Simulation plugin - Self-contained plugin pattern
//!
//! This plugin owns the [`SimulationState`] resource, applies
//! [`SimulationCommand`]s to it and ticks it once per frame. The resulting
//! [`Frame`] is published through [`LatestFrame`] for the scene and HUD.

use crate::prelude::*;

mod actions;

use actions::{apply_simulation_commands, advance_simulation, teardown_on_exit};
use bevy::ecs::schedule::{LogLevel, ScheduleBuildSettings};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Tick,
    Publish,
}

/// The frame produced by the most recent tick
#[derive(Resource, Debug, Default, Clone)]
pub struct LatestFrame(pub Option<Frame>);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = match app.world().get_resource::<NewtonLabConfig>() {
            Some(config) => config.clone(),
            None => NewtonLabConfig::load_from_user_config(),
        };

        match config.to_toml() {
            Ok(toml_string) => {
                info!("=== Current Configuration (TOML) ===\n{}", toml_string);
                info!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        app.insert_resource(SimulationState::new(&config));
        app.insert_resource(config);
        app.init_resource::<LatestFrame>();
        app.init_resource::<LearningMode>();

        app.add_event::<SimulationCommand>();
        app.add_event::<ForceChanged>();

        app.edit_schedule(Update, |schedule| {
            schedule.set_build_settings(ScheduleBuildSettings {
                ambiguity_detection: LogLevel::Warn,
                ..default()
            });
        });

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Tick,
                SimulationSet::Publish,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                apply_simulation_commands.in_set(SimulationSet::Input),
                advance_simulation.in_set(SimulationSet::Tick),
            ),
        );
        app.add_systems(Last, teardown_on_exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{ChangeDirection, Cooldown};
    use crate::test_utils::{create_test_app, send_command};

    fn simulation_app() -> App {
        let mut app = create_test_app();
        app.insert_resource(NewtonLabConfig::default());
        app.add_plugins(SimulationPlugin);
        app
    }

    #[test]
    fn test_plugin_publishes_frames() {
        let mut app = simulation_app();
        app.update();
        app.update();

        let frame = app
            .world()
            .resource::<LatestFrame>()
            .0
            .clone()
            .expect("a frame is published every update");
        assert_eq!(frame.frame, 2);
        assert_eq!(frame.force_text(), "7.11");
        assert!(frame.is_orbiting);
    }

    #[test]
    fn test_mass_command_emits_force_changed() {
        let mut app = simulation_app();
        app.update();

        send_command(&mut app, SimulationCommand::SetPrimaryMass(4.0));
        app.update();

        let events = app.world().resource::<Events<ForceChanged>>();
        let mut cursor = events.get_cursor();
        let changes: Vec<_> = cursor.read(events).collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0.direction, ChangeDirection::Decreased);

        let state = app.world().resource::<SimulationState>();
        assert_eq!(state.primary().mass(), 4.0);
    }

    #[test]
    fn test_commands_are_clamped_to_limits() {
        let mut app = simulation_app();

        send_command(&mut app, SimulationCommand::SetSecondaryMass(50.0));
        send_command(&mut app, SimulationCommand::SetOrbitRadius(2.0));
        app.update();

        let state = app.world().resource::<SimulationState>();
        assert_eq!(state.secondary().mass(), 10.0);
        assert_eq!(state.orbit().radius, 8.0);
    }

    #[test]
    fn test_adjust_commands_step_the_current_value() {
        let mut app = simulation_app();

        send_command(&mut app, SimulationCommand::AdjustPrimaryMass(3));
        send_command(&mut app, SimulationCommand::AdjustOrbitRadius(-2));
        app.update();

        let state = app.world().resource::<SimulationState>();
        assert_eq!(state.primary().mass(), 8.3);
        assert_eq!(state.orbit().radius, 14.0);
    }

    #[test]
    fn test_toggle_orbiting_freezes_phase() {
        let mut app = simulation_app();
        app.update();

        send_command(&mut app, SimulationCommand::ToggleOrbiting);
        app.update();
        let paused_phase = app.world().resource::<SimulationState>().orbit().phase_angle;

        app.update();
        app.update();
        let state = app.world().resource::<SimulationState>();
        assert!(!state.orbit().is_orbiting);
        assert_eq!(state.orbit().phase_angle, paused_phase);
    }

    #[test]
    fn test_learning_mode_locks_parameter_edits() {
        let mut app = simulation_app();

        send_command(&mut app, SimulationCommand::ToggleLearningMode);
        app.update();
        send_command(&mut app, SimulationCommand::SetPrimaryMass(3.0));
        send_command(&mut app, SimulationCommand::ToggleOrbiting);
        send_command(&mut app, SimulationCommand::NextLearningStep);
        app.update();

        let state = app.world().resource::<SimulationState>();
        assert_eq!(state.primary().mass(), 8.0);
        assert!(state.orbit().is_orbiting);
        let learning = app.world().resource::<LearningMode>();
        assert!(learning.is_enabled());
        assert_eq!(learning.step_index(), 1);

        send_command(&mut app, SimulationCommand::ToggleLearningMode);
        app.update();
        send_command(&mut app, SimulationCommand::SetPrimaryMass(3.0));
        app.update();

        assert_eq!(app.world().resource::<SimulationState>().primary().mass(), 3.0);
        assert_eq!(app.world().resource::<LearningMode>().step_index(), 0);
    }

    #[test]
    fn test_reentering_learning_mode_starts_at_first_step() {
        let mut app = simulation_app();

        send_command(&mut app, SimulationCommand::ToggleLearningMode);
        send_command(&mut app, SimulationCommand::NextLearningStep);
        send_command(&mut app, SimulationCommand::NextLearningStep);
        app.update();
        assert_eq!(app.world().resource::<LearningMode>().step_index(), 2);

        send_command(&mut app, SimulationCommand::ToggleLearningMode);
        send_command(&mut app, SimulationCommand::ToggleLearningMode);
        app.update();

        let learning = app.world().resource::<LearningMode>();
        assert!(learning.is_enabled());
        assert_eq!(learning.step_index(), 0);
        assert_eq!(learning.current_step().title, "Step 1: Variables");
    }

    #[test]
    fn test_restart_restores_configured_values() {
        let mut app = simulation_app();

        send_command(&mut app, SimulationCommand::SetPrimaryMass(2.0));
        send_command(&mut app, SimulationCommand::SetOrbitRadius(30.0));
        app.update();
        send_command(&mut app, SimulationCommand::Restart);
        app.update();

        let state = app.world().resource::<SimulationState>();
        assert_eq!(state.primary().mass(), 8.0);
        assert_eq!(state.orbit().radius, 15.0);
        assert_eq!(state.detector().cooldown(), Cooldown::Idle);
    }

    #[test]
    fn test_app_exit_tears_down_cooldown() {
        let mut app = simulation_app();

        send_command(&mut app, SimulationCommand::SetPrimaryMass(2.0));
        app.update();
        assert!(matches!(
            app.world().resource::<SimulationState>().detector().cooldown(),
            Cooldown::Active { .. }
        ));

        app.world_mut().send_event(AppExit::Success);
        app.update();

        let state = app.world().resource::<SimulationState>();
        assert_eq!(state.detector().cooldown(), Cooldown::Idle);
    }
}
