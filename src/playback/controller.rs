//! Stride-based trajectory playback
//!
//! The controller is a small state machine driven by two kinds of calls:
//! user commands (`load`, `start`, `stop`, `set_stride`) and `advance`, which
//! the frame loop calls exactly once per rendered frame. A frame-step only does
//! work when the previous one (or `start`) left a frame pending, which is how
//! the self-rescheduling animation chain is expressed without callbacks.
//!
//! ```text
//!            load                start                 cursor + stride >= len
//!   Idle ----------> Ready ----------------> Running --------------------------+
//!                      ^                     |    ^                            |
//!                 load |                stop |    | start                      v
//!                      |                     v    |                          Stopped
//!                      +---------------- Stopped -+            (cursor rewound to 0)
//! ```

use crate::physics::math::Vector;
use crate::playback::trajectory::Trajectory;
use crate::states::PlaybackPhase;
use bevy::prelude::*;
use std::sync::Arc;

/// What one executed frame-step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Marker drawn at `index`, whose quantities are published; the cursor
    /// moved on by one stride and another frame is pending
    Advanced { index: usize, marker: Vector },
    /// Marker drawn at `index`; a stop request ended the chain here
    Halted { index: usize, marker: Vector },
    /// Marker drawn at `index`, the end of the sequence was reached, and the
    /// marker snapped back to the first sample at `rewind`
    Finished {
        index: usize,
        marker: Vector,
        rewind: Vector,
    },
}

impl FrameStep {
    /// Cursor value drawn by this step
    pub fn drawn(&self) -> usize {
        match *self {
            FrameStep::Advanced { index, .. }
            | FrameStep::Halted { index, .. }
            | FrameStep::Finished { index, .. } => index,
        }
    }

    /// Index whose derived quantities should be shown, if any
    pub fn published(&self) -> Option<usize> {
        match *self {
            FrameStep::Advanced { index, .. } => Some(index),
            FrameStep::Halted { .. } | FrameStep::Finished { .. } => None,
        }
    }

    /// Where the marker rests once the step is complete
    pub fn resting_marker(&self) -> Vector {
        match *self {
            FrameStep::Advanced { marker, .. } | FrameStep::Halted { marker, .. } => marker,
            FrameStep::Finished { rewind, .. } => rewind,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct PlaybackController {
    trajectory: Option<Arc<Trajectory>>,
    cursor: usize,
    stride: usize,
    running: bool,
    frame_pending: bool,
    started: bool,
    finished: bool,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PlaybackController {
    pub fn new(stride: usize) -> Self {
        Self {
            trajectory: None,
            cursor: 0,
            stride: stride.max(1),
            running: false,
            frame_pending: false,
            started: false,
            finished: false,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.trajectory.is_none() {
            PlaybackPhase::Idle
        } else if self.running {
            PlaybackPhase::Running
        } else if self.started {
            PlaybackPhase::Stopped
        } else {
            PlaybackPhase::Ready
        }
    }

    pub fn trajectory(&self) -> Option<&Arc<Trajectory>> {
        self.trajectory.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_pending
    }

    /// Whether the last episode ran to the end of the trajectory
    pub fn has_finished(&self) -> bool {
        self.finished
    }

    /// Takes over a freshly built trajectory
    ///
    /// Any pending frame from the previous trajectory is dropped, so no step
    /// of the old chain can run against the new samples.
    pub fn load(&mut self, trajectory: Arc<Trajectory>) {
        debug!(
            "Loading trajectory #{} ({} samples), was {:?}",
            trajectory.generation(),
            trajectory.len(),
            self.phase()
        );
        self.trajectory = Some(trajectory);
        self.cursor = 0;
        self.running = false;
        self.frame_pending = false;
        self.started = false;
        self.finished = false;
    }

    /// Returns to Idle, dropping the trajectory and any pending frame
    pub fn unload(&mut self) {
        self.trajectory = None;
        self.cursor = 0;
        self.running = false;
        self.frame_pending = false;
        self.started = false;
        self.finished = false;
    }

    /// Begins or resumes playback; returns whether the phase changed
    ///
    /// Never schedules a second frame while one is pending, so repeated calls
    /// cannot double the advance rate.
    pub fn start(&mut self) -> bool {
        if self.trajectory.is_none() || self.running {
            return false;
        }

        self.running = true;
        self.started = true;
        self.finished = false;
        self.frame_pending = true;
        true
    }

    /// Requests a stop at the next frame boundary; returns whether it was running
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.running = false;
        true
    }

    /// Sets samples per frame, clamped to at least one
    pub fn set_stride(&mut self, stride: usize) -> usize {
        self.stride = stride.max(1);
        self.stride
    }

    /// Executes the pending frame-step, if there is one
    pub fn advance(&mut self) -> Option<FrameStep> {
        if !self.frame_pending {
            return None;
        }
        self.frame_pending = false;

        let trajectory = self.trajectory.as_ref()?;
        let index = self.cursor;
        let marker = trajectory.position(index)?;

        if !self.running {
            return Some(FrameStep::Halted { index, marker });
        }

        match index.checked_add(self.stride) {
            Some(next) if next < trajectory.len() => {
                self.cursor = next;
                self.frame_pending = true;
                Some(FrameStep::Advanced { index, marker })
            }
            _ => {
                let rewind = trajectory.position(0)?;
                self.running = false;
                self.finished = true;
                self.cursor = 0;
                Some(FrameStep::Finished {
                    index,
                    marker,
                    rewind,
                })
            }
        }
    }
}
