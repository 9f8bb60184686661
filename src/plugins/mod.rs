pub mod attribution;
pub mod camera;
pub mod controls;
pub mod parameters;
pub mod readout_hud;
pub mod simulation;
pub mod trace;
