//! Trajectory generation button component

use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct GenerateTrajectoryButton;

impl ButtonWithLabel for GenerateTrajectoryButton {
    fn command() -> SimulationCommand {
        SimulationCommand::GenerateTrajectory
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Generate Trajectory"
    }

    fn shortcut() -> &'static str {
        "G"
    }
}
