//! Body state for the two-body simulation

use crate::physics::math::{Scalar, Vector};
use bevy::prelude::*;

/// Which of the two bodies a value belongs to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRole {
    /// Central body, fixed at the reference origin
    Primary,
    /// Body carried around the primary by the orbit
    Secondary,
}

impl BodyRole {
    pub fn name(self) -> &'static str {
        match self {
            BodyRole::Primary => "Earth",
            BodyRole::Secondary => "Moon",
        }
    }
}

/// Mass in simulation units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass(pub Scalar);

impl Mass {
    pub fn new(mass: Scalar) -> Self {
        Self(mass)
    }

    #[inline]
    pub fn value(&self) -> Scalar {
        self.0
    }
}

/// One of the two simulated masses
///
/// The visual radius is not stored; it is derived from the mass every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub role: BodyRole,
    pub mass: Mass,
    pub position: Vector,
}

impl CelestialBody {
    pub fn new(role: BodyRole, mass: Scalar, position: Vector) -> Self {
        Self {
            role,
            mass: Mass::new(mass),
            position,
        }
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass.value()
    }
}
