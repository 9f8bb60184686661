//! Trajectory engines
//!
//! An engine turns a [`MirrorConfig`] snapshot into the full sequence of
//! samples the playback controller steps through. The trait is the seam
//! between the physics and everything downstream of it.

use crate::config::{MAX_STEP_COUNT, MirrorConfig};
use crate::physics::boris;
use crate::physics::field::{flux_label, mirror_field};
use crate::physics::math::{Q_M, Scalar, Vector, magnitude};
use crate::physics::sample::Sample;
use bevy::prelude::*;
use std::any::Any;

pub trait TrajectoryEngine: Send + Sync {
    /// Compute `config.sample_count()` samples, starting with the initial state
    fn build(&self, config: &MirrorConfig) -> Vec<Sample>;

    /// Slowly varying quantity reported next to the magnetic moment
    fn adiabatic_invariant(&self, sample: &Sample, config: &MirrorConfig) -> Scalar;

    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Samples reserved up front; longer runs grow the buffer as they go
const PREALLOCATED_SAMPLES: usize = 65_536;

/// Resource holding the engine used for trajectory builds
#[derive(Resource)]
pub struct CurrentEngine(pub Box<dyn TrajectoryEngine>);

impl Default for CurrentEngine {
    fn default() -> Self {
        Self(Box::new(MirrorEngine::default()))
    }
}

/// Boris pusher in the paraxial mirror field
///
/// The step starts at `dt = initial_step_factor * b0 * (q/m)`, one
/// gyro-period-ish fraction for the midplane field. Whenever the particle
/// reaches a region where `resolution / |B|` drops below `dt` the whole run is
/// restarted with half the step, up to `max_refinements` times.
#[derive(Debug, Clone)]
pub struct MirrorEngine {
    pub initial_step_factor: Scalar,
    pub resolution: Scalar,
    pub max_refinements: u32,
}

impl Default for MirrorEngine {
    fn default() -> Self {
        Self {
            initial_step_factor: 0.08,
            resolution: 0.1,
            max_refinements: 24,
        }
    }
}

impl MirrorEngine {
    pub fn initial_step(&self, config: &MirrorConfig) -> Scalar {
        self.initial_step_factor * config.field_strength * Q_M
    }

    /// State at t = 0: on the gyro-orbit around the axis, moving along +y
    pub fn initial_sample(config: &MirrorConfig) -> Sample {
        let gyro_radius = config.perpendicular_velocity / Q_M / config.field_strength;
        Sample::new(
            Vector::new(-gyro_radius, 0.0, 0.0),
            Vector::new(0.0, config.perpendicular_velocity, config.parallel_velocity),
            0.0,
            0.0,
        )
    }

    fn step(sample: &Sample, dt: Scalar, config: &MirrorConfig) -> Sample {
        let field = mirror_field(
            sample.position(),
            config.field_strength,
            config.length_scale,
        );
        let (position, velocity) = boris::push(sample.position(), sample.velocity(), field, Q_M, dt);

        Sample::new(position, velocity, sample.time + dt, magnitude(field))
    }

    /// Integrates the full run, or gives up with `None` as soon as a step
    /// violates `resolution / |B| >= dt`
    fn integrate(
        &self,
        config: &MirrorConfig,
        dt: Scalar,
        resolution: Option<Scalar>,
    ) -> Option<Vec<Sample>> {
        let steps = config.bounded_step_count();
        let mut samples = Vec::with_capacity(steps.min(PREALLOCATED_SAMPLES) + 1);
        let mut current = Self::initial_sample(config);
        samples.push(current);

        for _ in 0..steps {
            current = Self::step(&current, dt, config);
            if let Some(resolution) = resolution
                && resolution / current.field_magnitude * Q_M < dt
            {
                return None;
            }
            samples.push(current);
        }

        Some(samples)
    }
}

impl TrajectoryEngine for MirrorEngine {
    fn build(&self, config: &MirrorConfig) -> Vec<Sample> {
        if config.step_count > MAX_STEP_COUNT {
            warn!(
                "Step count {} exceeds the limit; building {} steps",
                config.step_count, MAX_STEP_COUNT
            );
        }

        let mut dt = self.initial_step(config);

        for refinement in 0..self.max_refinements {
            match self.integrate(config, dt, Some(self.resolution)) {
                Some(samples) => {
                    debug!(
                        "Built {} samples with dt = {} after {} refinement(s)",
                        samples.len(),
                        dt,
                        refinement
                    );
                    return samples;
                }
                None => dt /= 2.0,
            }
        }

        warn!(
            "Step refinement limit of {} reached; continuing with dt = {}",
            self.max_refinements, dt
        );
        self.integrate(config, dt, None)
            .unwrap_or_else(|| vec![Self::initial_sample(config)])
    }

    fn adiabatic_invariant(&self, sample: &Sample, config: &MirrorConfig) -> Scalar {
        flux_label(sample.position(), config.field_strength, config.length_scale)
    }

    fn name(&self) -> &str {
        "Boris mirror"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
