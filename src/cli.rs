//! Command line interface for newtonlab

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::NewtonLabConfig;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// NewtonLab 3D - gravitational attraction between two orbiting bodies
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None, long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mass of the central body (clamped to the configured range)
    #[arg(long, value_name = "MASS")]
    pub primary_mass: Option<f64>,

    /// Mass of the orbiting body (clamped to the configured range)
    #[arg(long, value_name = "MASS")]
    pub secondary_mass: Option<f64>,

    /// Orbit radius (clamped to the configured range)
    #[arg(short = 'r', long, value_name = "RADIUS")]
    pub orbit_radius: Option<f64>,

    /// Start with the orbit paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Start in the guided tutorial
    #[arg(short = 'l', long)]
    pub learning: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<NewtonLabConfig, CliError> {
    let mut config = match &args.config {
        Some(config_path) => {
            println!("Loading configuration from: {}", config_path.display());
            NewtonLabConfig::load(Some(config_path))
                .map_err(|e| CliError::ConfigLoad(e.to_string()))?
        }
        None => NewtonLabConfig::load_from_user_config(),
    };

    let limits = config.limits.clone();

    if let Some(mass) = args.primary_mass {
        let mass = limits.clamp_mass(mass);
        println!("Overriding primary mass to: {mass}");
        config.physics.initial_primary_mass = mass;
    }

    if let Some(mass) = args.secondary_mass {
        let mass = limits.clamp_mass(mass);
        println!("Overriding secondary mass to: {mass}");
        config.physics.initial_secondary_mass = mass;
    }

    if let Some(radius) = args.orbit_radius {
        let radius = limits.clamp_orbit_radius(radius);
        println!("Overriding orbit radius to: {radius}");
        config.physics.initial_orbit_radius = radius;
    }

    if args.paused {
        config.physics.start_orbiting = false;
    }

    Ok(config)
}

/// Log filter for `LogPlugin`
pub fn log_filter(args: &Args) -> String {
    if args.verbose {
        "wgpu=error,naga=warn,newtonlab=debug".to_string()
    } else {
        "wgpu=error,naga=warn".to_string()
    }
}
