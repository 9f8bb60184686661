//! Mirrorscope prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Math
pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Config
pub use crate::config::{MirrorConfig, MirrorParameter, SimulationConfig};

// Internal re-exports - States
pub use crate::states::PlaybackPhase;

// Internal re-exports - Resources
pub use crate::resources::{ConfigurationStore, ParameterFocus, SampleReadout};

// Internal re-exports - Physics
pub use crate::physics::{CurrentEngine, TrajectoryEngine};

// Internal re-exports - Playback
pub use crate::playback::{FrameStep, PlaybackController, Trajectory, TrajectoryCache};

// Internal re-exports - Events
pub use crate::events::{EditTarget, MarkerMoved, ParameterEdit, SimulationCommand, TrajectoryBuilt};
