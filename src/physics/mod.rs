//! Physics for the two-body model: force kernel, kinematic orbit and body state

pub mod components;
pub mod math;
pub mod orbit;
