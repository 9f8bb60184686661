//! Per-frame playback stepping

use crate::prelude::*;

/// Consumes the pending frame-step, if any
///
/// Emits one marker event for the drawn sample and, when playback reaches the
/// end, a second one for the rewound marker.
pub fn advance_playback(
    mut controller: ResMut<PlaybackController>,
    engine: Res<CurrentEngine>,
    mut readout: ResMut<SampleReadout>,
    mut markers: EventWriter<MarkerMoved>,
) {
    if !controller.has_pending_frame() {
        return;
    }

    let Some(step) = controller.advance() else {
        return;
    };
    let Some(trajectory) = controller.trajectory() else {
        return;
    };
    let generation = trajectory.generation();

    if let Some(index) = step.published() {
        **readout = trajectory.quantities(index, engine.0.as_ref());
    }

    match step {
        FrameStep::Advanced { marker, .. } => {
            markers.write(MarkerMoved {
                generation,
                position: marker,
            });
        }
        FrameStep::Halted { index, marker } => {
            markers.write(MarkerMoved {
                generation,
                position: marker,
            });
            info!("Playback stopped at sample {}", index);
        }
        FrameStep::Finished {
            index,
            marker,
            rewind,
        } => {
            markers.write(MarkerMoved {
                generation,
                position: marker,
            });
            markers.write(MarkerMoved {
                generation,
                position: rewind,
            });
            info!(
                "Playback finished at sample {} of {}",
                index,
                trajectory.last_index()
            );
        }
    }
}

/// Mirrors the controller phase into the [`PlaybackPhase`] state
pub fn sync_playback_phase(
    controller: Res<PlaybackController>,
    state: Res<State<PlaybackPhase>>,
    mut next_state: ResMut<NextState<PlaybackPhase>>,
) {
    let phase = controller.phase();
    if phase != *state.get() {
        debug!("Playback phase {:?} -> {:?}", state.get(), phase);
        next_state.set(phase);
    }
}
