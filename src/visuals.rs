//! Presentation parameters derived from force and mass
//!
//! Every function here is pure and clamps its output, so pathological force
//! values (huge, tiny, infinite or NaN) still produce finite, non-negative
//! geometry. The clamp bounds are part of the visual contract.

use crate::physics::components::CelestialBody;
use crate::physics::math::{Scalar, Vector};
use core::time::Duration;

/// Cone length at the tip of a force arrow
pub const ARROW_HEAD_LENGTH: Scalar = 1.5;

/// Gap between a body's surface and the root of its force arrow
pub const SURFACE_OFFSET: Scalar = 0.2;

pub const MIN_SHAFT_LENGTH: Scalar = 0.1;

/// Mass normalization for a body's rendered radius
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BodyScale {
    pub mass_divisor: Scalar,
    pub scale_factor: Scalar,
}

impl BodyScale {
    pub const PRIMARY: Self = Self {
        mass_divisor: 8.0,
        scale_factor: 3.5,
    };

    pub const SECONDARY: Self = Self {
        mass_divisor: 2.0,
        scale_factor: 1.5,
    };

    pub fn radius_for(&self, mass: Scalar) -> Scalar {
        body_visual_radius(mass, self.mass_divisor, self.scale_factor)
    }
}

/// Like [`f64::clamp`], but maps NaN to `min` instead of propagating it
#[inline]
fn clamp_finite(value: Scalar, min: Scalar, max: Scalar) -> Scalar {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// `(mass / divisor)^0.4 * scale`, or zero when that is not a finite
/// non-negative number
pub fn body_visual_radius(mass: Scalar, mass_divisor: Scalar, scale_factor: Scalar) -> Scalar {
    let radius = libm::pow(mass / mass_divisor, 0.4) * scale_factor;

    if radius.is_finite() && radius >= 0.0 {
        radius
    } else {
        0.0
    }
}

/// Force scaled into `[0.5, 5]`
pub fn normalized_magnitude(force: Scalar) -> Scalar {
    clamp_finite(force / 5.0, 0.5, 5.0)
}

pub fn arrow_thickness(normalized_magnitude: Scalar) -> Scalar {
    0.2 + normalized_magnitude * 0.08
}

pub fn glow_intensity(normalized_magnitude: Scalar) -> Scalar {
    (normalized_magnitude * 0.4).min(2.0)
}

/// Total arrow length in `[5, 25]`
pub fn arrow_total_length(force: Scalar) -> Scalar {
    clamp_finite(force * 0.4, 5.0, 25.0)
}

pub fn shaft_length(total_length: Scalar, head_length: Scalar) -> Scalar {
    (total_length - head_length).max(MIN_SHAFT_LENGTH)
}

/// Scale factor applied across an arrow's width for its "pull" pulse
pub fn arrow_pulse(elapsed: Duration) -> Scalar {
    1.0 + libm::sin(elapsed.as_secs_f64() * 1_000.0 * 0.005) * 0.03
}

/// Size and emphasis of a force arrow, shared by both arrows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub total_length: Scalar,
    pub shaft_length: Scalar,
    pub head_length: Scalar,
    pub thickness: Scalar,
    pub glow_intensity: Scalar,
}

impl ArrowGeometry {
    pub fn from_force(force: Scalar, head_length: Scalar) -> Self {
        let normalized = normalized_magnitude(force);
        let total_length = arrow_total_length(force);

        Self {
            total_length,
            shaft_length: shaft_length(total_length, head_length),
            head_length,
            thickness: arrow_thickness(normalized),
            glow_intensity: glow_intensity(normalized),
        }
    }

    /// Radius of the cone at the arrow tip
    pub fn head_radius(&self) -> Scalar {
        self.thickness * 2.5
    }
}

/// Where an arrow is rooted and which way it points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPlacement {
    pub origin: Vector,
    /// Unit vector; +Y when the two bodies coincide
    pub direction: Vector,
}

/// Roots an arrow just outside the body at `base`, pointing toward `target`
pub fn arrow_orientation(
    base: Vector,
    target: Vector,
    body_radius: Scalar,
    surface_offset: Scalar,
) -> ArrowPlacement {
    let direction = (target - base).try_normalize().unwrap_or(Vector::Y);

    ArrowPlacement {
        origin: base + direction * (body_radius + surface_offset),
        direction,
    }
}

/// Everything the renderer needs for one frame, besides positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedVisualParams {
    pub primary_radius: Scalar,
    pub secondary_radius: Scalar,
    pub arrow: ArrowGeometry,
    /// Arrow for the force acting on the primary, pointing at the secondary
    pub on_primary: ArrowPlacement,
    /// Arrow for the force acting on the secondary, pointing at the primary
    pub on_secondary: ArrowPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualMapper {
    pub primary_scale: BodyScale,
    pub secondary_scale: BodyScale,
    pub head_length: Scalar,
    pub surface_offset: Scalar,
}

impl Default for VisualMapper {
    fn default() -> Self {
        Self {
            primary_scale: BodyScale::PRIMARY,
            secondary_scale: BodyScale::SECONDARY,
            head_length: ARROW_HEAD_LENGTH,
            surface_offset: SURFACE_OFFSET,
        }
    }
}

impl VisualMapper {
    pub fn map(
        &self,
        force: Scalar,
        primary: &CelestialBody,
        secondary: &CelestialBody,
    ) -> DerivedVisualParams {
        let primary_radius = self.primary_scale.radius_for(primary.mass());
        let secondary_radius = self.secondary_scale.radius_for(secondary.mass());

        DerivedVisualParams {
            primary_radius,
            secondary_radius,
            arrow: ArrowGeometry::from_force(force, self.head_length),
            on_primary: arrow_orientation(
                primary.position,
                secondary.position,
                primary_radius,
                self.surface_offset,
            ),
            on_secondary: arrow_orientation(
                secondary.position,
                primary.position,
                secondary_radius,
                self.surface_offset,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::components::BodyRole;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reference_body_radii() {
        assert_eq!(body_visual_radius(8.0, 8.0, 3.5), 3.5);
        assert_eq!(BodyScale::SECONDARY.radius_for(2.0), 1.5);
    }

    #[test]
    fn test_body_radius_is_sublinear_and_monotonic() {
        let mut previous = 0.0;
        for mass in 1..=10 {
            let radius = BodyScale::PRIMARY.radius_for(mass as Scalar);
            assert!(radius > previous);
            previous = radius;
        }

        let ratio = BodyScale::PRIMARY.radius_for(10.0) / BodyScale::PRIMARY.radius_for(1.0);
        assert!(ratio < 10.0, "growth should be sub-linear, got ratio {ratio}");
    }

    #[test]
    fn test_body_radius_never_nan() {
        assert_eq!(body_visual_radius(-4.0, 8.0, 3.5), 0.0);
        assert_eq!(body_visual_radius(Scalar::NAN, 8.0, 3.5), 0.0);
        assert_eq!(body_visual_radius(1.0, 0.0, 3.5), 0.0);
        assert_eq!(body_visual_radius(0.0, 8.0, 3.5), 0.0);
    }

    #[test]
    fn test_normalized_magnitude_bounds() {
        assert_eq!(normalized_magnitude(0.0), 0.5);
        assert_eq!(normalized_magnitude(10.0), 2.0);
        assert_eq!(normalized_magnitude(1_000.0), 5.0);
        assert_eq!(normalized_magnitude(Scalar::INFINITY), 5.0);
        assert_eq!(normalized_magnitude(Scalar::NAN), 0.5);
    }

    #[test]
    fn test_thickness_and_glow() {
        assert_eq!(arrow_thickness(2.0), 0.2 + 2.0 * 0.08);
        assert_eq!(glow_intensity(2.0), 2.0 * 0.4);
        assert_eq!(glow_intensity(5.0), 2.0);
    }

    #[test]
    fn test_arrow_length_clamps() {
        assert_eq!(arrow_total_length(1_000.0), 25.0);
        assert_eq!(arrow_total_length(0.0), 5.0);
        assert_eq!(arrow_total_length(20.0), 8.0);
        assert_eq!(arrow_total_length(Scalar::NAN), 5.0);
    }

    #[test]
    fn test_shaft_length_floor() {
        assert_eq!(shaft_length(25.0, 1.5), 23.5);
        assert_eq!(shaft_length(1.0, 1.5), MIN_SHAFT_LENGTH);
    }

    #[test]
    fn test_geometry_stays_finite_for_any_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut forces: Vec<Scalar> = (0..1_000)
            .map(|_| rng.random_range(-1e12..1e12))
            .collect();
        forces.extend([
            0.0,
            Scalar::MIN_POSITIVE,
            Scalar::MAX,
            Scalar::INFINITY,
            Scalar::NEG_INFINITY,
            Scalar::NAN,
        ]);

        for force in forces {
            let geometry = ArrowGeometry::from_force(force, ARROW_HEAD_LENGTH);
            for value in [
                geometry.total_length,
                geometry.shaft_length,
                geometry.thickness,
                geometry.glow_intensity,
            ] {
                assert!(value.is_finite() && value > 0.0, "force {force} gave {geometry:?}");
            }
            assert!((5.0..=25.0).contains(&geometry.total_length));
        }
    }

    #[test]
    fn test_extreme_force_uses_upper_clamps() {
        let geometry = ArrowGeometry::from_force(1_000.0, ARROW_HEAD_LENGTH);
        assert_eq!(geometry.total_length, 25.0);
        assert_eq!(geometry.shaft_length, 23.5);
        assert_eq!(geometry.thickness, 0.2 + 5.0 * 0.08);
        assert_eq!(geometry.glow_intensity, 2.0);
        assert_eq!(geometry.head_radius(), geometry.thickness * 2.5);
    }

    #[test]
    fn test_arrow_orientation_roots_on_surface() {
        let placement = arrow_orientation(
            Vector::ZERO,
            Vector::new(15.0, 0.0, 0.0),
            3.5,
            SURFACE_OFFSET,
        );
        assert_eq!(placement.direction, Vector::X);
        assert_eq!(placement.origin, Vector::new(3.7, 0.0, 0.0));
    }

    #[test]
    fn test_arrow_orientation_with_coincident_bodies() {
        let placement = arrow_orientation(Vector::ONE, Vector::ONE, 1.0, 0.2);
        assert_eq!(placement.direction, Vector::Y);
        assert!(placement.origin.is_finite());
    }

    #[test]
    fn test_arrows_are_equal_and_opposite() {
        let primary = CelestialBody::new(BodyRole::Primary, 8.0, Vector::ZERO);
        let secondary = CelestialBody::new(BodyRole::Secondary, 2.0, Vector::new(0.0, 0.0, 15.0));
        let params = VisualMapper::default().map(7.11, &primary, &secondary);

        assert_eq!(params.on_primary.direction, -params.on_secondary.direction);
        assert_eq!(params.on_primary.origin, Vector::new(0.0, 0.0, 3.7));
        assert_eq!(params.on_secondary.origin, Vector::new(0.0, 0.0, 15.0 - 1.7));
        assert_eq!(params.primary_radius, 3.5);
        assert_eq!(params.secondary_radius, 1.5);
    }

    #[test]
    fn test_pulse_stays_within_three_percent() {
        for millis in (0..10_000).step_by(37) {
            let pulse = arrow_pulse(Duration::from_millis(millis));
            assert!((0.97..=1.03).contains(&pulse));
        }
        assert_eq!(arrow_pulse(Duration::ZERO), 1.0);
    }
}
