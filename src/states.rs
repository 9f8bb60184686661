use bevy::prelude::*;

/// Playback phase mirrored from the controller for UI run conditions
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackPhase {
    /// No trajectory has been generated yet
    #[default]
    Idle,
    /// Trajectory generated, cursor at the first sample, never started
    Ready,
    Running,
    /// Not running; cursor kept where playback stopped
    Stopped,
}
