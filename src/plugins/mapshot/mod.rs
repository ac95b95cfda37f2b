//! Mapshot plugin
//!
//! Exports the current map to PNG files when the configured key is released
//! on the map scene. The host supplies its scene state type, its map through
//! the [`CurrentMap`](crate::map::CurrentMap) resource, and its tile rules
//! and painter.

use crate::compositor::{TilePainter, TileRules};
use crate::config::{MapshotConfig, PluginRegistry};
use crate::error::Result;
use crate::events::MapshotRequest;
use bevy::prelude::*;

pub mod dispatch;
pub mod keys;
pub mod trigger;

pub use dispatch::{HostEnvironment, TileCapabilities, take_shot};
pub use trigger::MapScene;

use dispatch::dispatch_mapshot_requests;
use trigger::request_mapshot_on_key_release;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapshotSet;

pub struct MapshotPlugin<S: States> {
    pub config: MapshotConfig,
    pub map_scene: S,
    pub capabilities: TileCapabilities,
}

impl<S: States> MapshotPlugin<S> {
    pub fn new(
        config: MapshotConfig,
        map_scene: S,
        rules: impl TileRules + 'static,
        painter: impl TilePainter + 'static,
    ) -> Self {
        Self {
            config,
            map_scene,
            capabilities: TileCapabilities::new(rules, painter),
        }
    }

    /// Read the settings from the host's plugin registry, failing when they
    /// are missing
    pub fn from_registry(
        registry: &PluginRegistry,
        map_scene: S,
        rules: impl TileRules + 'static,
        painter: impl TilePainter + 'static,
    ) -> Result<Self> {
        let config = MapshotConfig::from_registry(registry)?;
        Ok(Self::new(config, map_scene, rules, painter))
    }
}

impl<S: States> Plugin for MapshotPlugin<S> {
    fn build(&self, app: &mut App) {
        app.add_event::<MapshotRequest>();

        app.insert_resource(self.config.clone());
        app.insert_resource(MapScene(self.map_scene.clone()));
        app.insert_resource(self.capabilities.clone());
        app.init_resource::<HostEnvironment>();

        app.add_systems(
            Update,
            (
                request_mapshot_on_key_release::<S>,
                dispatch_mapshot_requests,
            )
                .chain()
                .in_set(MapshotSet),
        );

        match self.config.key_code {
            Some(code) => info!(
                "Mapshot ready: key {} saves to {}",
                code,
                self.config.output_dir.display()
            ),
            None => info!("Mapshot loaded without a usable key"),
        }
    }
}
