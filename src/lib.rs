//! Mapshot library
//!
//! Bevy plugin that composites the current tile map into PNG files on a
//! key press, plus the pieces it is built from so hosts and tests can use
//! them directly.

pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod events;
pub mod map;
pub mod plugins;
pub mod prelude;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;

pub use config::MapshotConfig;
pub use error::MapshotError;
pub use plugins::MapshotPlugin;
