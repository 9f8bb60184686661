//! Mirrorscope library
//!
//! This provides the core functionality of mirrorscope as a library
//! to enable integration testing and benchmarking.

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod playback;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;
