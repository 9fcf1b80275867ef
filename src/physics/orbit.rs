//! Kinematic circular orbit
//!
//! The orbiting body is placed by angle alone. Force never feeds back into
//! motion, so the orbit stays stable for any mass values.

use crate::physics::math::{Scalar, Vector};

/// Angular rate of the orbit in radians per second
pub const DEFAULT_ANGULAR_RATE: Scalar = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Orbit radius around the primary
    pub radius: Scalar,
    /// Phase angle in radians; grows without bound while orbiting
    pub phase_angle: Scalar,
    /// Gate on phase advancement
    pub is_orbiting: bool,
    pub angular_rate: Scalar,
}

impl OrbitState {
    pub fn new(radius: Scalar, is_orbiting: bool) -> Self {
        Self {
            radius,
            phase_angle: 0.0,
            is_orbiting,
            angular_rate: DEFAULT_ANGULAR_RATE,
        }
    }

    pub fn with_angular_rate(mut self, angular_rate: Scalar) -> Self {
        self.angular_rate = angular_rate;
        self
    }

    /// Advance the phase by `delta_seconds * angular_rate` when orbiting
    pub fn advance(&mut self, delta_seconds: Scalar) {
        if !self.is_orbiting || !delta_seconds.is_finite() {
            return;
        }

        self.phase_angle += delta_seconds * self.angular_rate;
    }

    /// Position on the circle around `center`, in the center's XZ plane
    pub fn position_around(&self, center: Vector) -> Vector {
        center
            + Vector::new(
                libm::cos(self.phase_angle) * self.radius,
                0.0,
                libm::sin(self.phase_angle) * self.radius,
            )
    }

    pub fn reset_phase(&mut self) {
        self.phase_angle = 0.0;
    }
}
