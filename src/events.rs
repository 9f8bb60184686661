//! Centralized event definitions
//!
//! Events are the only way input handlers talk to the playback systems, so
//! buttons, keyboard shortcuts, and startup automation all go through the same
//! command path.

use crate::config::MirrorParameter;
use crate::physics::math::Vector;
use crate::playback::Trajectory;
use bevy::prelude::*;
use std::sync::Arc;

// Unified simulation command pattern
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    GenerateTrajectory,
    Run,
    Stop,
    #[cfg(not(target_arch = "wasm32"))]
    Quit,
}

/// Field a committed text edit is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Mirror(MirrorParameter),
    Stride,
}

impl EditTarget {
    pub const ALL: [EditTarget; 6] = [
        EditTarget::Mirror(MirrorParameter::FieldStrength),
        EditTarget::Mirror(MirrorParameter::LengthScale),
        EditTarget::Mirror(MirrorParameter::PerpendicularVelocity),
        EditTarget::Mirror(MirrorParameter::ParallelVelocity),
        EditTarget::Mirror(MirrorParameter::StepCount),
        EditTarget::Stride,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditTarget::Mirror(parameter) => parameter.label(),
            EditTarget::Stride => "Stride",
        }
    }
}

/// Raw text committed to an input field
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ParameterEdit {
    pub target: EditTarget,
    pub raw: String,
}

impl ParameterEdit {
    pub fn new(target: EditTarget, raw: impl Into<String>) -> Self {
        Self {
            target,
            raw: raw.into(),
        }
    }
}

/// A new trajectory replaced the previous one
#[derive(Event, Debug, Clone)]
pub struct TrajectoryBuilt(pub Arc<Trajectory>);

/// The playback marker should be drawn at a new position
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MarkerMoved {
    /// Trajectory the position belongs to
    pub generation: u64,
    pub position: Vector,
}
