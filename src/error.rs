//! Error types at the boundaries of the simulation core

use crate::physics::math::Scalar;
use std::fmt;

/// Rejected inbound edit; the simulation state is left unchanged
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    NonFinite { field: &'static str, value: Scalar },
    NonPositive { field: &'static str, value: Scalar },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonFinite { field, value } => {
                write!(f, "{field} must be a finite number, got {value}")
            }
            InputError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Configuration loading and saving errors
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(config::ConfigError),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "configuration file I/O failed: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid configuration: {e}"),
            ConfigError::Serialize(e) => write!(f, "could not serialize configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        let error = InputError::NonFinite {
            field: "primary mass",
            value: Scalar::NAN,
        };
        assert_eq!(error.to_string(), "primary mass must be a finite number, got NaN");

        let error = InputError::NonPositive {
            field: "orbit radius",
            value: -2.0,
        };
        assert_eq!(error.to_string(), "orbit radius must be positive, got -2");
    }
}
