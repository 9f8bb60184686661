//! Magnetic mirror physics: field model, particle pusher, and trajectory engines

pub mod boris;
pub mod engine;
pub mod field;
pub mod math;
pub mod sample;

pub use engine::{CurrentEngine, MirrorEngine, TrajectoryEngine};
pub use sample::Sample;
