//! Run/resume/replay button component

use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct RunButton;

impl ButtonWithLabel for RunButton {
    fn command() -> SimulationCommand {
        SimulationCommand::Run
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Run"
    }

    fn shortcut() -> &'static str {
        "R"
    }
}

/// Label for the run button in a given phase
///
/// Stopping partway offers to resume; stopping because the episode reached
/// the end offers a replay from the first sample.
pub fn run_button_text(phase: PlaybackPhase, finished: bool) -> String {
    let base = match phase {
        PlaybackPhase::Stopped if finished => "Replay",
        PlaybackPhase::Stopped => "Resume",
        PlaybackPhase::Idle | PlaybackPhase::Ready | PlaybackPhase::Running => {
            RunButton::base_text()
        }
    };
    format!("{} ({})", base, RunButton::shortcut())
}

pub fn sync_run_button_text(
    state: Res<State<PlaybackPhase>>,
    controller: Res<PlaybackController>,
    button_children_query: Query<&Children, With<RunButton>>,
    mut text_query: Query<&mut Text>,
) {
    let text_str = run_button_text(*state.get(), controller.has_finished());

    for children in button_children_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                if text.0 != text_str {
                    *text = Text::new(text_str.clone());
                }
                break;
            }
        }
    }
}
