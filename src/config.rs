use crate::physics::math::Scalar;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const USER_CONFIG_FILE_NAME: &str = "config.toml";
const ENVIRONMENT_PREFIX: &str = "MIRRORSCOPE";

/// Largest step count a trajectory is built with; larger requests are clamped
pub const MAX_STEP_COUNT: i64 = 1_000_000;

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub mirror: MirrorConfig,
    pub playback: PlaybackConfig,
    pub rendering: RenderingConfig,
}

/// Parameters of one trajectory computation
///
/// Copied by value whenever a trajectory is built, so edits made afterwards
/// never reach an existing trajectory.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    /// Field strength at the mirror midplane (b0)
    pub field_strength: Scalar,
    /// Distance over which the field doubles along the axis (l)
    pub length_scale: Scalar,
    pub perpendicular_velocity: Scalar,
    pub parallel_velocity: Scalar,
    /// Number of integration steps; values at or below zero give a single sample
    pub step_count: i64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            field_strength: 1.0,
            length_scale: 1.0,
            perpendicular_velocity: 0.5,
            parallel_velocity: 0.5,
            step_count: 1000,
        }
    }
}

impl MirrorConfig {
    /// Steps actually integrated: negative counts give none, huge ones stop
    /// at [`MAX_STEP_COUNT`]
    pub fn bounded_step_count(&self) -> usize {
        self.step_count.clamp(0, MAX_STEP_COUNT) as usize
    }

    /// Number of samples a trajectory built from this configuration holds
    pub fn sample_count(&self) -> usize {
        self.bounded_step_count() + 1
    }
}

/// Editable fields of [`MirrorConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorParameter {
    FieldStrength,
    LengthScale,
    PerpendicularVelocity,
    ParallelVelocity,
    StepCount,
}

impl MirrorParameter {
    pub const ALL: [MirrorParameter; 5] = [
        MirrorParameter::FieldStrength,
        MirrorParameter::LengthScale,
        MirrorParameter::PerpendicularVelocity,
        MirrorParameter::ParallelVelocity,
        MirrorParameter::StepCount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MirrorParameter::FieldStrength => "B0",
            MirrorParameter::LengthScale => "L",
            MirrorParameter::PerpendicularVelocity => "v perp",
            MirrorParameter::ParallelVelocity => "v par",
            MirrorParameter::StepCount => "Steps",
        }
    }

    /// Writes `raw` into the matching field of `config`
    ///
    /// Real fields take `NaN` when the text does not parse. The step count
    /// accepts integers, truncates finite reals, and falls back to zero.
    pub fn apply(self, config: &mut MirrorConfig, raw: &str) {
        let raw = raw.trim();
        match self {
            MirrorParameter::FieldStrength => config.field_strength = parse_real(raw),
            MirrorParameter::LengthScale => config.length_scale = parse_real(raw),
            MirrorParameter::PerpendicularVelocity => {
                config.perpendicular_velocity = parse_real(raw)
            }
            MirrorParameter::ParallelVelocity => config.parallel_velocity = parse_real(raw),
            MirrorParameter::StepCount => config.step_count = parse_step_count(raw),
        }
    }

    pub fn display_value(self, config: &MirrorConfig) -> String {
        match self {
            MirrorParameter::FieldStrength => config.field_strength.to_string(),
            MirrorParameter::LengthScale => config.length_scale.to_string(),
            MirrorParameter::PerpendicularVelocity => config.perpendicular_velocity.to_string(),
            MirrorParameter::ParallelVelocity => config.parallel_velocity.to_string(),
            MirrorParameter::StepCount => config.step_count.to_string(),
        }
    }
}

fn parse_real(raw: &str) -> Scalar {
    raw.trim().parse::<Scalar>().unwrap_or(Scalar::NAN)
}

fn parse_step_count(raw: &str) -> i64 {
    let raw = raw.trim();
    let steps = match raw.parse::<i64>() {
        Ok(steps) => steps,
        Err(_) => match raw.parse::<Scalar>() {
            Ok(steps) if steps.is_finite() => steps.trunc() as i64,
            _ => 0,
        },
    };
    clamp_step_count(steps)
}

/// Caps `steps` at [`MAX_STEP_COUNT`], logging when it had to
pub fn clamp_step_count(steps: i64) -> i64 {
    if steps > MAX_STEP_COUNT {
        warn!("Step count {steps} exceeds the limit; using {MAX_STEP_COUNT}");
        MAX_STEP_COUNT
    } else {
        steps
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Samples advanced per rendered frame
    pub stride: usize,
    /// Generate and run the trajectory as soon as the app starts
    pub autostart: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            stride: 10,
            autostart: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    /// World units per simulation length unit
    pub scene_scale: f32,
    pub trace_color: [f32; 3],
    pub marker_color: [f32; 3],
    pub marker_radius: f32,
    pub camera_radius_multiplier: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            scene_scale: 4.0,
            trace_color: [0.2, 0.55, 1.0],
            marker_color: [1.0, 0.45, 0.1],
            marker_radius: 0.08,
            camera_radius_multiplier: 2.5,
        }
    }
}

impl RenderingConfig {
    pub fn trace_color(&self) -> Color {
        let [r, g, b] = self.trace_color;
        Color::srgb(r, g, b)
    }

    pub fn marker_color(&self) -> Color {
        let [r, g, b] = self.marker_color;
        Color::srgb(r, g, b)
    }
}

/// Errors raised while reading configuration sources
#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(toml::de::Error),
    Layered(::config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "could not read configuration: {e}"),
            ConfigError::Parse(e) => write!(f, "could not parse configuration: {e}"),
            ConfigError::Layered(e) => write!(f, "could not merge configuration sources: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Layered(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Read(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(e: ::config::ConfigError) -> Self {
        ConfigError::Layered(e)
    }
}

impl SimulationConfig {
    /// Parse a configuration file, failing on unreadable or malformed input
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Read(_)) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{} ({}). Using defaults.", e, path.display());
                Self::default()
            }
        }
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mirrorscope")
            .map(|dirs| dirs.config_dir().join(USER_CONFIG_FILE_NAME))
    }

    /// Merge the user configuration file with `MIRRORSCOPE_*` environment overrides
    ///
    /// Nested keys use a double underscore, e.g. `MIRRORSCOPE_MIRROR__STEP_COUNT`.
    pub fn load_layered(user_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = user_file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path();
        match Self::load_layered(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("mirrorscope-{}-{}", std::process::id(), name))
            .join("config.toml")
    }

    #[test]
    fn test_default_mirror_config_matches_reference_scenario() {
        let mirror = MirrorConfig::default();
        assert_eq!(mirror.field_strength, 1.0);
        assert_eq!(mirror.length_scale, 1.0);
        assert_eq!(mirror.perpendicular_velocity, 0.5);
        assert_eq!(mirror.parallel_velocity, 0.5);
        assert_eq!(mirror.step_count, 1000);
        assert_eq!(mirror.sample_count(), 1001);
    }

    #[test]
    fn test_sample_count_for_degenerate_step_counts() {
        let mut mirror = MirrorConfig::default();
        mirror.step_count = 0;
        assert_eq!(mirror.sample_count(), 1);
        mirror.step_count = -25;
        assert_eq!(mirror.sample_count(), 1);
    }

    #[test]
    fn test_apply_real_parameter() {
        let mut mirror = MirrorConfig::default();
        MirrorParameter::FieldStrength.apply(&mut mirror, " 2.5 ");
        assert_eq!(mirror.field_strength, 2.5);
    }

    #[test]
    fn test_apply_malformed_real_becomes_nan() {
        let mut mirror = MirrorConfig::default();
        MirrorParameter::ParallelVelocity.apply(&mut mirror, "fast");
        assert!(mirror.parallel_velocity.is_nan());
        assert_eq!(mirror.perpendicular_velocity, 0.5);
    }

    #[test]
    fn test_apply_step_count_variants() {
        let mut mirror = MirrorConfig::default();

        MirrorParameter::StepCount.apply(&mut mirror, "250");
        assert_eq!(mirror.step_count, 250);

        MirrorParameter::StepCount.apply(&mut mirror, "12.9");
        assert_eq!(mirror.step_count, 12);

        MirrorParameter::StepCount.apply(&mut mirror, "-3");
        assert_eq!(mirror.step_count, -3);

        MirrorParameter::StepCount.apply(&mut mirror, "lots");
        assert_eq!(mirror.step_count, 0);
    }

    #[test]
    fn test_apply_trims_whitespace() {
        let mut mirror = MirrorConfig::default();
        MirrorParameter::LengthScale.apply(&mut mirror, "\t2\n");
        assert_eq!(mirror.length_scale, 2.0);
        assert_eq!(parse_real(" 2 "), 2.0);
        assert_eq!(parse_step_count(" 12 "), 12);
    }

    #[test]
    fn test_oversized_step_count_is_clamped() {
        let mut mirror = MirrorConfig::default();

        MirrorParameter::StepCount.apply(&mut mirror, "1e300");
        assert_eq!(mirror.step_count, MAX_STEP_COUNT);

        MirrorParameter::StepCount.apply(&mut mirror, &i64::MAX.to_string());
        assert_eq!(mirror.step_count, MAX_STEP_COUNT);

        mirror.step_count = i64::MAX;
        assert_eq!(mirror.sample_count(), MAX_STEP_COUNT as usize + 1);
    }

    #[test]
    fn test_oversized_step_count_from_toml_is_bounded() {
        let config: SimulationConfig =
            toml::from_str("[mirror]\nstep_count = 9223372036854775807\n").unwrap();
        assert_eq!(config.mirror.step_count, i64::MAX);
        assert_eq!(config.mirror.sample_count(), MAX_STEP_COUNT as usize + 1);
    }

    #[test]
    fn test_display_value_round_trips_through_apply() {
        let source = MirrorConfig {
            field_strength: 0.75,
            length_scale: 2.0,
            perpendicular_velocity: 0.1,
            parallel_velocity: -0.3,
            step_count: 42,
        };
        let mut target = MirrorConfig::default();
        for parameter in MirrorParameter::ALL {
            parameter.apply(&mut target, &parameter.display_value(&source));
        }
        assert_eq!(source, target);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            [mirror]
            step_count = 50

            [playback]
            stride = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.mirror.step_count, 50);
        assert_eq!(config.mirror.field_strength, 1.0);
        assert_eq!(config.playback.stride, 3);
        assert!(!config.playback.autostart);
        assert_eq!(config.rendering, RenderingConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("save");
        let mut config = SimulationConfig::default();
        config.mirror.length_scale = 3.0;
        config.playback.autostart = true;

        config.save(&path).unwrap();
        let loaded = SimulationConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SimulationConfig::load_or_default(scratch_path("missing"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = scratch_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[mirror\nstep_count = ").unwrap();

        assert!(matches!(
            SimulationConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            SimulationConfig::load_or_default(&path),
            SimulationConfig::default()
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_layered_reads_user_file() {
        let path = scratch_path("layered");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[mirror]\nfield_strength = 2.0\nstep_count = 64\n").unwrap();

        let config = SimulationConfig::load_layered(Some(&path)).unwrap();
        assert_eq!(config.mirror.field_strength, 2.0);
        assert_eq!(config.mirror.step_count, 64);
        assert_eq!(config.playback, PlaybackConfig::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
