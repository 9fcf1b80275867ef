//! Centralized event definitions
//!
//! All events in newtonlab are defined in this module to maintain clear
//! boundaries between systems. Events are organized by category:
//! - Simulation commands (keyboard and buttons → simulation)
//! - Simulation notifications (simulation → scene and HUD)

use crate::feedback::ForceChange;
use crate::physics::math::Scalar;
use bevy::prelude::*;

// Unified simulation command pattern
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimulationCommand {
    /// Absolute values are clamped and snapped to the configured limits
    SetPrimaryMass(Scalar),
    SetSecondaryMass(Scalar),
    SetOrbitRadius(Scalar),
    /// Relative edits, in slider steps
    AdjustPrimaryMass(i32),
    AdjustSecondaryMass(i32),
    AdjustOrbitRadius(i32),
    ToggleOrbiting,
    Restart,
    ToggleLearningMode,
    NextLearningStep,
    PreviousLearningStep,
    ToggleMathMode,
    ToggleOrbitRing,
}

impl SimulationCommand {
    /// Edits the controls lock out while learning mode is on
    pub fn is_locked_while_learning(&self) -> bool {
        matches!(
            self,
            SimulationCommand::ToggleOrbiting
                | SimulationCommand::ToggleMathMode
                | SimulationCommand::SetPrimaryMass(_)
                | SimulationCommand::SetSecondaryMass(_)
                | SimulationCommand::SetOrbitRadius(_)
                | SimulationCommand::AdjustPrimaryMass(_)
                | SimulationCommand::AdjustSecondaryMass(_)
                | SimulationCommand::AdjustOrbitRadius(_)
        )
    }
}

/// Written on every tick that reports a force change
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ForceChanged(pub ForceChange);
