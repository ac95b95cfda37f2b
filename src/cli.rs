//! Command line interface for the demo host

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::{MapshotConfig, PluginRegistry};
use crate::error::MapshotError;
use crate::map::{CurrentMap, MapData, MapInfo, MapInfos, TileSize, TilesetFlags};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No plugin registry file was found
    RegistryNotFound,
    /// Plugin settings could not be loaded
    ConfigLoad(MapshotError),
    /// Map, map info or tileset files could not be loaded
    MapLoad(MapshotError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::RegistryNotFound => write!(
                f,
                "Failed to load configuration: no plugins.toml found, pass one with --plugins"
            ),
            CliError::ConfigLoad(e) => write!(f, "Failed to load configuration: {e}"),
            CliError::MapLoad(e) => write!(f, "Failed to load map: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Mapshot demo host - press the configured key on the map to export it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Plugin declarations (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub plugins: Option<PathBuf>,

    /// Map data (JSON format)
    #[arg(short, long, value_name = "FILE")]
    pub map: PathBuf,

    /// Map info table used for map names (JSON format)
    #[arg(long, value_name = "FILE")]
    pub map_infos: Option<PathBuf>,

    /// Id of the map being shown
    #[arg(long, value_name = "ID", default_value_t = 1)]
    pub map_id: u32,

    /// Tileset table providing tile flags (JSON format)
    #[arg(long, value_name = "FILE")]
    pub tilesets: Option<PathBuf>,

    /// Tile width in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 48)]
    pub tile_width: u32,

    /// Tile height in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 48)]
    pub tile_height: u32,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    pub fn load_config(&self) -> Result<MapshotConfig, CliError> {
        let path = PluginRegistry::locate(self.plugins.as_deref()).ok_or(CliError::RegistryNotFound)?;
        let registry = PluginRegistry::load(&path).map_err(CliError::ConfigLoad)?;
        MapshotConfig::from_registry(&registry).map_err(CliError::ConfigLoad)
    }

    pub fn load_map(&self) -> Result<CurrentMap, CliError> {
        let data = MapData::load(&self.map).map_err(CliError::MapLoad)?;

        let infos = match &self.map_infos {
            Some(path) => MapInfos::load(path).map_err(CliError::MapLoad)?,
            None => MapInfos::default(),
        };
        let info = infos.get(self.map_id).cloned().unwrap_or_else(|| MapInfo {
            id: self.map_id,
            name: format!("MAP{:03}", self.map_id),
        });

        Ok(CurrentMap {
            info,
            data,
            tile_size: TileSize::new(self.tile_width, self.tile_height),
        })
    }

    pub fn load_rules(&self, tileset_id: u32) -> Result<TilesetFlags, CliError> {
        match &self.tilesets {
            Some(path) => TilesetFlags::load(path, tileset_id).map_err(CliError::MapLoad),
            None => Ok(TilesetFlags::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["mapshot", "--map", "Map001.json"]).unwrap();
        assert_eq!(args.map, PathBuf::from("Map001.json"));
        assert_eq!(args.map_id, 1);
        assert_eq!((args.tile_width, args.tile_height), (48, 48));
        assert!(!args.verbose);
    }

    #[test]
    fn test_map_is_required() {
        assert!(Args::try_parse_from(["mapshot"]).is_err());
    }

    #[test]
    fn test_load_map_falls_back_to_numbered_name() {
        let dir = tempfile::tempdir().unwrap();
        let map_path = dir.path().join("Map007.json");
        std::fs::write(
            &map_path,
            r#"{"width": 1, "height": 1, "data": [1, 0, 0, 0, 0, 0]}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "mapshot",
            "--map",
            map_path.to_str().unwrap(),
            "--map-id",
            "7",
        ])
        .unwrap();

        let map = args.load_map().unwrap();
        assert_eq!(map.info.id, 7);
        assert_eq!(map.info.name, "MAP007");
        assert_eq!(map.tile_size, TileSize::default());
    }

    #[test]
    fn test_missing_registry_file() {
        let args = Args::try_parse_from([
            "mapshot",
            "--map",
            "Map001.json",
            "--plugins",
            "/nonexistent/plugins.toml",
        ])
        .unwrap();

        assert!(matches!(args.load_config(), Err(CliError::ConfigLoad(_))));
    }
}
