use crate::error::ConfigError;
use crate::physics::math::{GRAVITATIONAL_CONSTANT, MERGE_DISTANCE, Scalar};
use crate::physics::orbit::DEFAULT_ANGULAR_RATE;
use crate::visuals::{ARROW_HEAD_LENGTH, BodyScale, SURFACE_OFFSET};
use bevy::prelude::*;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENVIRONMENT_PREFIX: &str = "NEWTONLAB";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct NewtonLabConfig {
    pub physics: PhysicsConfig,
    pub limits: LimitsConfig,
    pub feedback: FeedbackConfig,
    pub visuals: VisualsConfig,
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    pub merge_distance: Scalar,
    pub angular_rate: Scalar,
    pub initial_primary_mass: Scalar,
    pub initial_secondary_mass: Scalar,
    pub initial_orbit_radius: Scalar,
    pub start_orbiting: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            merge_distance: MERGE_DISTANCE,
            angular_rate: DEFAULT_ANGULAR_RATE,
            initial_primary_mass: 8.0,
            initial_secondary_mass: 2.0,
            initial_orbit_radius: 15.0,
            start_orbiting: true,
        }
    }
}

/// Ranges enforced by the input layer before edits reach the simulation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub min_mass: Scalar,
    pub max_mass: Scalar,
    pub mass_step: Scalar,
    pub min_orbit_radius: Scalar,
    pub max_orbit_radius: Scalar,
    pub orbit_radius_step: Scalar,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_mass: 1.0,
            max_mass: 10.0,
            mass_step: 0.1,
            min_orbit_radius: 8.0,
            max_orbit_radius: 35.0,
            orbit_radius_step: 0.5,
        }
    }
}

impl LimitsConfig {
    pub fn clamp_mass(&self, mass: Scalar) -> Scalar {
        snap_to_step(mass, self.min_mass, self.max_mass, self.mass_step)
    }

    pub fn clamp_orbit_radius(&self, radius: Scalar) -> Scalar {
        snap_to_step(
            radius,
            self.min_orbit_radius,
            self.max_orbit_radius,
            self.orbit_radius_step,
        )
    }
}

/// Clamps `value` into `[min, max]` on the grid `min + k * step`, the way a
/// stepped slider would. NaN falls back to `min`.
pub fn snap_to_step(value: Scalar, min: Scalar, max: Scalar, step: Scalar) -> Scalar {
    if value.is_nan() {
        return min;
    }

    let clamped = value.clamp(min, max);
    if !(step > 0.0) {
        return clamped;
    }

    let steps = ((clamped - min) / step).round();
    // Re-round to shed representation noise such as 8.100000000000001
    let snapped = (min + steps * step) * 1e9;
    (snapped.round() / 1e9).clamp(min, max)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub threshold: Scalar,
    pub cooldown_ms: u64,
    pub display_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            threshold: crate::feedback::CHANGE_THRESHOLD,
            cooldown_ms: crate::feedback::COOLDOWN_DURATION.as_millis() as u64,
            display_ms: crate::feedback::BANNER_DURATION.as_millis() as u64,
        }
    }
}

impl FeedbackConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct VisualsConfig {
    pub primary_scale: BodyScale,
    pub secondary_scale: BodyScale,
    pub arrow_head_length: Scalar,
    pub surface_offset: Scalar,
    pub primary_spin_rate: f32,
    pub secondary_spin_rate: f32,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            primary_scale: BodyScale::PRIMARY,
            secondary_scale: BodyScale::SECONDARY,
            arrow_head_length: ARROW_HEAD_LENGTH,
            surface_offset: SURFACE_OFFSET,
            primary_spin_rate: 0.1,
            secondary_spin_rate: 0.15,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub font_size: f32,
    pub panel_padding: f32,
    pub panel_border_radius: f32,
    pub show_orbit_ring: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            panel_padding: 12.0,
            panel_border_radius: 8.0,
            show_orbit_ring: true,
        }
    }
}

impl NewtonLabConfig {
    /// Path of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "newtonlab", "NewtonLab")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Layers defaults, the user config file, `explicit_path` and
    /// `NEWTONLAB_*` environment variables, in that order of precedence
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(user_path) = Self::user_config_path() {
            builder = builder.add_source(
                config::File::from(user_path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = explicit_path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Loads the layered configuration, falling back to defaults on error
    pub fn load_from_user_config() -> Self {
        match Self::load(None) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
