//! Bevy presentation layer
//!
//! The simulation plugin owns the core state; the others only read the
//! published frame or write commands.

pub mod camera;
pub mod controls;
pub mod hud;
pub mod scene;
pub mod simulation;
