//! NewtonLab prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the NewtonLab application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::NewtonLabConfig;

// Internal re-exports - Events
pub use crate::events::{ForceChanged, SimulationCommand};

// Internal re-exports - Physics
pub use crate::physics::components::BodyRole;
pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Simulation
pub use crate::learning::LearningMode;
pub use crate::plugins::simulation::{LatestFrame, SimulationSet};
pub use crate::simulation::{Frame, SimulationInput, SimulationState};
