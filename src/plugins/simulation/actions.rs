//! Action handlers for simulation commands
//!
//! This module applies SimulationCommand events to the simulation and
//! learning state, ticks the simulation and tears it down on exit.

use crate::prelude::*;

pub fn apply_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut state: ResMut<SimulationState>,
    mut learning: ResMut<LearningMode>,
    config: Res<NewtonLabConfig>,
) {
    let limits = &config.limits;

    for command in commands_reader.read() {
        if command.is_locked_while_learning() && learning.inputs_locked() {
            debug!("Ignoring {:?} while learning mode is active", command);
            continue;
        }

        let input = match *command {
            SimulationCommand::SetPrimaryMass(mass) => {
                Some(SimulationInput::SetPrimaryMass(limits.clamp_mass(mass)))
            }
            SimulationCommand::SetSecondaryMass(mass) => {
                Some(SimulationInput::SetSecondaryMass(limits.clamp_mass(mass)))
            }
            SimulationCommand::SetOrbitRadius(radius) => Some(SimulationInput::SetOrbitRadius(
                limits.clamp_orbit_radius(radius),
            )),
            SimulationCommand::AdjustPrimaryMass(steps) => {
                let mass = state.primary().mass() + steps as Scalar * limits.mass_step;
                Some(SimulationInput::SetPrimaryMass(limits.clamp_mass(mass)))
            }
            SimulationCommand::AdjustSecondaryMass(steps) => {
                let mass = state.secondary().mass() + steps as Scalar * limits.mass_step;
                Some(SimulationInput::SetSecondaryMass(limits.clamp_mass(mass)))
            }
            SimulationCommand::AdjustOrbitRadius(steps) => {
                let radius = state.orbit().radius + steps as Scalar * limits.orbit_radius_step;
                Some(SimulationInput::SetOrbitRadius(
                    limits.clamp_orbit_radius(radius),
                ))
            }
            SimulationCommand::ToggleOrbiting => {
                Some(SimulationInput::SetOrbiting(!state.orbit().is_orbiting))
            }
            SimulationCommand::Restart => {
                state.restart(&config);
                info!("Simulation restarted");
                None
            }
            SimulationCommand::ToggleLearningMode => {
                learning.toggle();
                info!(
                    "Learning mode {}",
                    if learning.is_enabled() { "on" } else { "off" }
                );
                Some(SimulationInput::ResetLearningStep)
            }
            SimulationCommand::NextLearningStep => {
                if learning.is_enabled() && learning.next() {
                    debug!("Learning step {}", learning.progress_label());
                }
                None
            }
            SimulationCommand::PreviousLearningStep => {
                if learning.is_enabled() && learning.previous() {
                    debug!("Learning step {}", learning.progress_label());
                }
                None
            }
            SimulationCommand::ToggleMathMode => {
                learning.toggle_math_mode();
                None
            }
            // Handled by the scene plugin
            SimulationCommand::ToggleOrbitRing => None,
        };

        if let Some(input) = input {
            if matches!(input, SimulationInput::ResetLearningStep) {
                learning.reset_step();
            }
            if let Err(e) = state.apply(input) {
                warn!("Rejected {:?}: {}", input, e);
            }
        }
    }
}

pub fn advance_simulation(
    time: Res<Time>,
    mut state: ResMut<SimulationState>,
    mut latest_frame: ResMut<LatestFrame>,
    mut force_changed: EventWriter<ForceChanged>,
) {
    let frame = state.tick(time.delta());

    if let Some(change) = frame.change {
        debug!(
            "Force {:?}: {:.3} -> {:.3} at {:?}",
            change.direction, change.from, change.to, change.at
        );
        force_changed.write(ForceChanged(change));
    }

    latest_frame.0 = Some(frame);
}

pub fn teardown_on_exit(mut exit_events: EventReader<AppExit>, mut state: ResMut<SimulationState>) {
    if exit_events.read().count() > 0 {
        state.teardown();
        info!("Simulation torn down");
    }
}
