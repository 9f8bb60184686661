//! Command line interface for Mirrorscope

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::{ConfigError, SimulationConfig, clamp_step_count};
use crate::resources::parse_stride;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(PathBuf, ConfigError),
    /// Stride must be a positive integer
    InvalidStride(usize),
    /// Effective configuration could not be rendered as TOML
    Serialize(toml::ser::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(path, e) => {
                write!(f, "Failed to load configuration from {}: {e}", path.display())
            }
            CliError::InvalidStride(stride) => {
                write!(f, "Invalid stride {stride}: must be at least 1")
            }
            CliError::Serialize(e) => write!(f, "Failed to serialize configuration: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigLoad(_, e) => Some(e),
            CliError::InvalidStride(_) => None,
            CliError::Serialize(e) => Some(e),
        }
    }
}

/// Mirrorscope - charged particle playback in a magnetic mirror
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field strength at the mirror midplane (overrides config file)
    #[arg(short = 'b', long, value_name = "B0")]
    pub field_strength: Option<f64>,

    /// Mirror length scale (overrides config file)
    #[arg(short = 'l', long, value_name = "L")]
    pub length_scale: Option<f64>,

    /// Initial velocity across the field
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub vel_perp: Option<f64>,

    /// Initial velocity along the field
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub vel_par: Option<f64>,

    /// Number of integration steps
    #[arg(short = 'n', long, value_name = "COUNT", allow_negative_numbers = true)]
    pub steps: Option<i64>,

    /// Samples advanced per rendered frame
    #[arg(short = 's', long, value_name = "SAMPLES")]
    pub stride: Option<usize>,

    /// Generate the trajectory and start playback on launch
    #[arg(short = 'a', long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Loads configuration from file or user defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            println!("Loading configuration from: {}", path.display());
            SimulationConfig::load(path).map_err(|e| CliError::ConfigLoad(path.clone(), e))?
        }
        None => SimulationConfig::load_from_user_config(),
    };

    if let Some(field_strength) = args.field_strength {
        println!("Overriding field strength to: {field_strength}");
        config.mirror.field_strength = field_strength;
    }

    if let Some(length_scale) = args.length_scale {
        println!("Overriding length scale to: {length_scale}");
        config.mirror.length_scale = length_scale;
    }

    if let Some(vel_perp) = args.vel_perp {
        println!("Overriding perpendicular velocity to: {vel_perp}");
        config.mirror.perpendicular_velocity = vel_perp;
    }

    if let Some(vel_par) = args.vel_par {
        println!("Overriding parallel velocity to: {vel_par}");
        config.mirror.parallel_velocity = vel_par;
    }

    if let Some(steps) = args.steps {
        let steps = clamp_step_count(steps);
        println!("Overriding step count to: {steps}");
        config.mirror.step_count = steps;
    }

    if let Some(stride) = args.stride {
        let stride = parse_stride(&stride.to_string()).ok_or(CliError::InvalidStride(stride))?;
        println!("Overriding stride to: {stride}");
        config.playback.stride = stride;
    }

    if args.autostart {
        config.playback.autostart = true;
    }

    Ok(config)
}

/// Renders the configuration for `--print-config`
pub fn render_config(config: &SimulationConfig) -> Result<String, CliError> {
    toml::to_string_pretty(config).map_err(CliError::Serialize)
}
