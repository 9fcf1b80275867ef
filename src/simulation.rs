//! The simulation core: one mutable state record advanced once per frame
//!
//! [`SimulationState::tick`] runs the fixed per-frame pipeline and returns a
//! [`Frame`] with everything the presentation layer draws. Discrete user
//! edits go through [`SimulationState::apply`] between ticks.

use crate::config::NewtonLabConfig;
use crate::error::InputError;
use crate::feedback::{BannerMessage, ChangeDirection, FeedbackBanner, ForceChange, ForceChangeDetector};
use crate::format::format_scientific;
use crate::physics::components::{BodyRole, CelestialBody};
use crate::physics::math::{GravityModel, Scalar, Vector, distance_3d};
use crate::physics::orbit::OrbitState;
use crate::visuals::{DerivedVisualParams, VisualMapper};
use bevy::prelude::*;
use core::time::Duration;

/// Simulation time, advanced only by ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationClock {
    elapsed: Duration,
    frame: u64,
}

impl SimulationClock {
    /// Advances by `delta` and returns the new simulation time
    pub fn tick(&mut self, delta: Duration) -> Duration {
        self.elapsed += delta;
        self.frame += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

/// Inbound edit from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationInput {
    SetPrimaryMass(Scalar),
    SetSecondaryMass(Scalar),
    SetOrbitRadius(Scalar),
    SetOrbiting(bool),
    /// Tutorial navigation; no effect on the physics state
    ResetLearningStep,
}

/// Instantaneous force and the detector's view of it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceReading {
    pub magnitude: Scalar,
    pub last_reported_magnitude: Scalar,
    /// Whether a change banner is currently showing
    pub change_event_active: bool,
    pub change_direction: Option<ChangeDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub role: BodyRole,
    pub mass: Scalar,
    pub position: Vector,
    pub visual_radius: Scalar,
}

/// Values published to the presentation layer once per tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub frame: u64,
    pub elapsed: Duration,
    pub primary: BodySnapshot,
    pub secondary: BodySnapshot,
    pub orbit_radius: Scalar,
    pub phase_angle: Scalar,
    pub is_orbiting: bool,
    pub distance: Scalar,
    pub force: ForceReading,
    pub visuals: DerivedVisualParams,
    /// Change reported on this tick, if any
    pub change: Option<ForceChange>,
    /// Banner still on screen, possibly from an earlier tick
    pub banner: Option<BannerMessage>,
}

impl Frame {
    pub fn force_text(&self) -> String {
        format_scientific(self.force.magnitude)
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationState {
    gravity: GravityModel,
    mapper: VisualMapper,
    clock: SimulationClock,
    primary: CelestialBody,
    secondary: CelestialBody,
    orbit: OrbitState,
    detector: ForceChangeDetector,
    banner: FeedbackBanner,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(&NewtonLabConfig::default())
    }
}

impl SimulationState {
    pub fn new(config: &NewtonLabConfig) -> Self {
        let physics = &config.physics;
        let gravity = GravityModel::new(physics.gravitational_constant, physics.merge_distance);
        let orbit = OrbitState::new(physics.initial_orbit_radius, physics.start_orbiting)
            .with_angular_rate(physics.angular_rate);
        let primary = CelestialBody::new(BodyRole::Primary, physics.initial_primary_mass, Vector::ZERO);
        let secondary = CelestialBody::new(
            BodyRole::Secondary,
            physics.initial_secondary_mass,
            orbit.position_around(primary.position),
        );

        let initial_force = gravity.force(
            primary.mass(),
            secondary.mass(),
            distance_3d(primary.position, secondary.position),
        );

        Self {
            gravity,
            mapper: VisualMapper {
                primary_scale: config.visuals.primary_scale,
                secondary_scale: config.visuals.secondary_scale,
                head_length: config.visuals.arrow_head_length,
                surface_offset: config.visuals.surface_offset,
            },
            clock: SimulationClock::default(),
            primary,
            secondary,
            orbit,
            detector: ForceChangeDetector::with_settings(
                initial_force,
                config.feedback.threshold,
                config.feedback.cooldown(),
            ),
            banner: FeedbackBanner::new(config.feedback.display_duration()),
        }
    }

    /// Applies one user edit atomically. Range limits are the caller's job;
    /// only values that would poison the state are refused.
    pub fn apply(&mut self, input: SimulationInput) -> Result<(), InputError> {
        match input {
            SimulationInput::SetPrimaryMass(mass) => {
                self.primary.mass.0 = validate_positive("primary mass", mass)?;
            }
            SimulationInput::SetSecondaryMass(mass) => {
                self.secondary.mass.0 = validate_positive("secondary mass", mass)?;
            }
            SimulationInput::SetOrbitRadius(radius) => {
                self.orbit.radius = validate_positive("orbit radius", radius)?;
            }
            SimulationInput::SetOrbiting(is_orbiting) => {
                self.orbit.is_orbiting = is_orbiting;
            }
            SimulationInput::ResetLearningStep => {}
        }

        Ok(())
    }

    /// Runs one frame: orbit, position, force, change detection, visuals
    pub fn tick(&mut self, delta: Duration) -> Frame {
        let now = self.clock.tick(delta);

        self.orbit.advance(delta.as_secs_f64());
        self.secondary.position = self.orbit.position_around(self.primary.position);

        let distance = distance_3d(self.primary.position, self.secondary.position);
        let force = self
            .gravity
            .force(self.primary.mass(), self.secondary.mass(), distance);

        self.banner.expire(now);
        let change = self.detector.evaluate(force, now);
        if let Some(change) = &change {
            self.banner.show(change);
        }

        let visuals = self.mapper.map(force, &self.primary, &self.secondary);
        let banner = self.banner.visible(now).cloned();

        Frame {
            frame: self.clock.frame_count(),
            elapsed: now,
            primary: snapshot(&self.primary, visuals.primary_radius),
            secondary: snapshot(&self.secondary, visuals.secondary_radius),
            orbit_radius: self.orbit.radius,
            phase_angle: self.orbit.phase_angle,
            is_orbiting: self.orbit.is_orbiting,
            distance,
            force: ForceReading {
                magnitude: force,
                last_reported_magnitude: self.detector.last_force(),
                change_event_active: banner.is_some(),
                change_direction: banner.as_ref().map(|message| message.direction),
            },
            visuals,
            change,
            banner,
        }
    }

    /// Cancels the pending cooldown and hides the banner; called on shutdown
    pub fn teardown(&mut self) {
        self.detector.cancel();
        self.banner.clear();
    }

    /// Returns to the configured initial values, keeping simulation time
    pub fn restart(&mut self, config: &NewtonLabConfig) {
        let clock = self.clock;
        *self = Self::new(config);
        self.clock = clock;
    }

    /// Force for the current masses at the configured orbit radius,
    /// as shown by the formula panel
    pub fn formula_force(&self) -> Scalar {
        self.gravity
            .force(self.primary.mass(), self.secondary.mass(), self.orbit.radius)
    }

    pub fn gravity(&self) -> &GravityModel {
        &self.gravity
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn primary(&self) -> &CelestialBody {
        &self.primary
    }

    pub fn secondary(&self) -> &CelestialBody {
        &self.secondary
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn detector(&self) -> &ForceChangeDetector {
        &self.detector
    }
}

fn validate_positive(field: &'static str, value: Scalar) -> Result<Scalar, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field, value });
    }
    if value <= 0.0 {
        return Err(InputError::NonPositive { field, value });
    }
    Ok(value)
}

fn snapshot(body: &CelestialBody, visual_radius: Scalar) -> BodySnapshot {
    BodySnapshot {
        role: body.role,
        mass: body.mass(),
        position: body.position,
        visual_radius,
    }
}
