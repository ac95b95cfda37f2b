//! Mapshot prelude module
//!
//! Re-exports the types a host needs to install and feed the plugin.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::{MapshotConfig, PluginDeclaration, PluginRegistry};

// Internal re-exports - Map data
pub use crate::map::{CurrentMap, MapData, MapInfo, MapInfos, TileGrid, TileSize, TilesetFlags};

// Internal re-exports - Compositor
pub use crate::compositor::{Mapshot, SwatchPainter, TilePainter, TileRect, TileRules};

// Internal re-exports - Plugin
pub use crate::events::MapshotRequest;
pub use crate::plugins::mapshot::{HostEnvironment, MapshotPlugin, MapshotSet, TileCapabilities};
pub use crate::states::HostScene;
