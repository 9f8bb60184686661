mod generate;
#[cfg(not(target_arch = "wasm32"))]
mod quit;
pub mod run;
mod stop;

pub use generate::GenerateTrajectoryButton;
#[cfg(not(target_arch = "wasm32"))]
pub use quit::QuitButton;
pub use run::RunButton;
pub use stop::StopButton;
