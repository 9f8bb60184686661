//! Trajectory storage and stride-based playback

pub mod controller;
pub mod trajectory;

pub use controller::{FrameStep, PlaybackController};
pub use trajectory::{SampleQuantities, Trajectory, TrajectoryCache};
