//! Gravitational force kernel
//!
//! Stateless functions for separation and force magnitude between the two
//! simulated bodies. Values are in simulation units, not SI.

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions and directions
pub type Vector = bevy::math::DVec3;

/// Simulation gravitational constant, sized so that masses in the 1-10
/// range produce legible force magnitudes.
pub const GRAVITATIONAL_CONSTANT: Scalar = 100.0;

/// Separations below this are treated as merged bodies exerting no force.
pub const MERGE_DISTANCE: Scalar = 1.0;

/// Euclidean distance between two points
#[inline]
pub fn distance_3d(a: Vector, b: Vector) -> Scalar {
    let delta = b - a;
    libm::sqrt(delta.x * delta.x + delta.y * delta.y + delta.z * delta.z)
}

/// Newtonian force magnitude with the default constant and merge distance
#[inline]
pub fn gravitational_force(m1: Scalar, m2: Scalar, distance: Scalar) -> Scalar {
    GravityModel::default().force(m1, m2, distance)
}

/// Parameters of the inverse-square law used by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityModel {
    pub gravitational_constant: Scalar,
    pub merge_distance: Scalar,
}

impl Default for GravityModel {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            merge_distance: MERGE_DISTANCE,
        }
    }
}

impl GravityModel {
    pub fn new(gravitational_constant: Scalar, merge_distance: Scalar) -> Self {
        Self {
            gravitational_constant,
            merge_distance,
        }
    }

    /// `G * m1 * m2 / d²`, or exactly zero when `d` is below the merge
    /// distance. A NaN distance also yields zero.
    pub fn force(&self, m1: Scalar, m2: Scalar, distance: Scalar) -> Scalar {
        if !(distance >= self.merge_distance) {
            return 0.0;
        }

        self.gravitational_constant * m1 * m2 / (distance * distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_distance_3d_pythagorean() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 6.0, 3.0);
        assert_eq!(distance_3d(a, b), 5.0);
        assert_eq!(distance_3d(b, a), 5.0);
        assert_eq!(distance_3d(a, a), 0.0);
    }

    #[test]
    fn test_force_matches_inverse_square_law() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1_000 {
            let m1 = rng.random_range(0.1..50.0);
            let m2 = rng.random_range(0.1..50.0);
            let d = rng.random_range(1.0..1_000.0);

            let force = gravitational_force(m1, m2, d);
            assert_eq!(force, GRAVITATIONAL_CONSTANT * m1 * m2 / (d * d));
            assert!(force > 0.0, "force must be positive for m1={m1}, m2={m2}, d={d}");
        }
    }

    #[test]
    fn test_force_is_zero_inside_merge_distance() {
        for d in [0.999_999, 0.5, 0.0, -0.0, -1.0, -250.0, Scalar::NAN] {
            assert_eq!(gravitational_force(8.0, 2.0, d), 0.0, "distance {d}");
        }
    }

    #[test]
    fn test_force_at_exact_merge_distance() {
        assert_eq!(gravitational_force(8.0, 2.0, 1.0), 1_600.0);
    }

    #[test]
    fn test_force_is_symmetric_in_masses() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..1_000 {
            let m1 = rng.random_range(1.0..10.0);
            let m2 = rng.random_range(1.0..10.0);
            let d = rng.random_range(0.0..40.0);
            let forward = gravitational_force(m1, m2, d);
            let swapped = gravitational_force(m2, m1, d);
            assert!((forward - swapped).abs() <= forward * 1e-12);
        }
    }

    #[test]
    fn test_force_strictly_decreases_with_distance() {
        let mut previous = gravitational_force(8.0, 2.0, 1.0);
        let mut d = 1.0;

        while d < 100.0 {
            d += 0.25;
            let current = gravitational_force(8.0, 2.0, d);
            assert!(
                current < previous,
                "force should decrease: {previous} -> {current} at d={d}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_earth_moon_reference_configuration() {
        let force = gravitational_force(8.0, 2.0, 15.0);
        assert_eq!(force, 100.0 * 8.0 * 2.0 / 225.0);
        assert!((force - 7.11).abs() < 0.01);
    }

    #[test]
    fn test_custom_gravity_model() {
        let model = GravityModel::new(1.0, 5.0);
        assert_eq!(model.force(2.0, 3.0, 4.9), 0.0);
        assert_eq!(model.force(2.0, 3.0, 10.0), 0.06);
    }
}
