//! NewtonLab library
//!
//! This provides the core functionality of newtonlab as a library
//! to enable integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod format;
pub mod learning;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod simulation;
pub mod visuals;

// Test utilities are public for integration tests
pub mod test_utils;

// Re-export commonly used items
pub use config::NewtonLabConfig;
pub use error::{ConfigError, InputError};
pub use events::*;
pub use learning::LearningMode;
pub use physics::math::{Scalar, Vector};
pub use plugins::{
    camera::CameraPlugin, controls::ControlsPlugin, hud::HudPlugin, scene::ScenePlugin,
    simulation::SimulationPlugin,
};
pub use simulation::{Frame, SimulationInput, SimulationState};
