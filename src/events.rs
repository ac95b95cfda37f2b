//! Centralized event definitions
//!
//! Events are the only link between the input trigger and the shot
//! dispatcher, so hosts can also request a mapshot from their own systems.

use bevy::prelude::*;

/// Ask for the current map to be exported
#[derive(Event, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapshotRequest;
