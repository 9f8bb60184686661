//! Built trajectories and the cache that owns them

use crate::config::MirrorConfig;
use crate::physics::math::{Scalar, Vector};
use crate::physics::{Sample, TrajectoryEngine};
use bevy::prelude::*;
use std::sync::Arc;

/// Fixed, ordered sequence of samples produced for one configuration
///
/// Never edited after construction. A configuration change always produces a
/// new `Trajectory`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Box<[Sample]>,
    config: MirrorConfig,
    generation: u64,
}

/// Quantities shown in the readout for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleQuantities {
    pub index: usize,
    pub time: Scalar,
    pub magnetic_moment: Scalar,
    pub energy: Scalar,
    pub perpendicular_velocity: Scalar,
    pub field_magnitude: Scalar,
    pub adiabatic_invariant: Scalar,
}

impl Trajectory {
    /// Returns `None` for an empty sample sequence, which has no valid cursor
    pub fn new(samples: Vec<Sample>, config: MirrorConfig, generation: u64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        Some(Self {
            samples: samples.into_boxed_slice(),
            config,
            generation,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn position(&self, index: usize) -> Option<Vector> {
        self.get(index).map(Sample::position)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector> + '_ {
        self.samples.iter().map(Sample::position)
    }

    /// Configuration snapshot the samples were computed from
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Build counter value assigned by the cache
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn quantities(
        &self,
        index: usize,
        engine: &dyn TrajectoryEngine,
    ) -> Option<SampleQuantities> {
        let sample = self.get(index)?;
        Some(SampleQuantities {
            index,
            time: sample.time,
            magnetic_moment: sample.magnetic_moment(),
            energy: sample.energy(),
            perpendicular_velocity: sample.perpendicular_velocity(),
            field_magnitude: sample.field_magnitude,
            adiabatic_invariant: engine.adiabatic_invariant(sample, &self.config),
        })
    }

    /// Axis-aligned bounds of the finite positions, if there are any
    pub fn bounds(&self) -> Option<(Vector, Vector)> {
        self.positions()
            .filter(|p| p.is_finite())
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
    }
}

/// Owner of the most recently built trajectory
#[derive(Resource, Debug, Default)]
pub struct TrajectoryCache {
    current: Option<Arc<Trajectory>>,
    generation: u64,
}

impl TrajectoryCache {
    /// Computes a fresh trajectory from a configuration snapshot
    ///
    /// Blocks until the engine returns. The previous trajectory is dropped from
    /// the cache even if the engine produces nothing usable.
    pub fn build(
        &mut self,
        engine: &dyn TrajectoryEngine,
        config: MirrorConfig,
    ) -> Option<Arc<Trajectory>> {
        self.generation += 1;

        if config.step_count <= 0 {
            warn!(
                "Step count {} is not positive; trajectory holds only the initial state",
                config.step_count
            );
        }

        let samples = engine.build(&config);
        match Trajectory::new(samples, config, self.generation) {
            Some(trajectory) => {
                info!(
                    "Built trajectory #{} with {} samples using {}",
                    self.generation,
                    trajectory.len(),
                    engine.name()
                );
                let trajectory = Arc::new(trajectory);
                self.current = Some(trajectory.clone());
                Some(trajectory)
            }
            None => {
                warn!("Engine {} returned no samples", engine.name());
                self.current = None;
                None
            }
        }
    }

    pub fn current(&self) -> Option<&Arc<Trajectory>> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn invalidate(&mut self) {
        self.current = None;
    }
}
