//! Host map data
//!
//! Read-only views over the tables the host keeps for the current map: the
//! flat tile array, the map metadata and the tile pixel size.

pub mod tile_id;
pub mod tileset;

pub use tileset::TilesetFlags;

use crate::error::{MapshotError, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layers stored per cell: four tile layers, shadow bits, region id
pub const LAYER_COUNT: usize = 6;
pub const SHADOW_LAYER: usize = 4;

/// Random access to a map's tile ids.
///
/// Coordinates outside the map read as 0 unless the map loops on that axis.
pub trait TileGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn read(&self, x: i32, y: i32, layer: usize) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: 48,
            height: 48,
        }
    }
}

impl TileSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// How a map wraps around its edges
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "u8", into = "u8")]
pub enum ScrollType {
    #[default]
    None,
    LoopVertical,
    LoopHorizontal,
    LoopBoth,
}

impl From<u8> for ScrollType {
    fn from(value: u8) -> Self {
        match value {
            1 => ScrollType::LoopVertical,
            2 => ScrollType::LoopHorizontal,
            3 => ScrollType::LoopBoth,
            _ => ScrollType::None,
        }
    }
}

impl From<ScrollType> for u8 {
    fn from(value: ScrollType) -> Self {
        match value {
            ScrollType::None => 0,
            ScrollType::LoopVertical => 1,
            ScrollType::LoopHorizontal => 2,
            ScrollType::LoopBoth => 3,
        }
    }
}

impl ScrollType {
    pub fn wraps_horizontally(self) -> bool {
        matches!(self, ScrollType::LoopHorizontal | ScrollType::LoopBoth)
    }

    pub fn wraps_vertically(self) -> bool {
        matches!(self, ScrollType::LoopVertical | ScrollType::LoopBoth)
    }
}

/// The host's map table, laid out as `data[(layer * height + y) * width + x]`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub scroll_type: ScrollType,
    #[serde(default)]
    pub tileset_id: u32,
    pub data: Vec<u32>,
}

impl MapData {
    /// An empty map with every layer zeroed
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * LAYER_COUNT],
            ..default()
        }
    }

    pub fn with_scroll_type(mut self, scroll_type: ScrollType) -> Self {
        self.scroll_type = scroll_type;
        self
    }

    fn index(&self, x: u32, y: u32, layer: usize) -> usize {
        (layer * self.height as usize + y as usize) * self.width as usize + x as usize
    }

    /// Write a value; writes outside the map are ignored
    pub fn set(&mut self, x: u32, y: u32, layer: usize, value: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y, layer);
        if let Some(slot) = self.data.get_mut(index) {
            *slot = value;
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| MapshotError::MapParse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MapshotError::MapParse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }
}

impl TileGrid for MapData {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn read(&self, x: i32, y: i32, layer: usize) -> u32 {
        let width = self.width as i32;
        let height = self.height as i32;
        if width == 0 || height == 0 {
            return 0;
        }

        let x = if self.scroll_type.wraps_horizontally() {
            x.rem_euclid(width)
        } else {
            x
        };
        let y = if self.scroll_type.wraps_vertically() {
            y.rem_euclid(height)
        } else {
            y
        };

        if x < 0 || x >= width || y < 0 || y >= height {
            return 0;
        }

        self.data
            .get(self.index(x as u32, y as u32, layer))
            .copied()
            .unwrap_or(0)
    }
}

/// Editor-side metadata for one map
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MapInfo {
    pub id: u32,
    pub name: String,
}

/// The host's map info table, indexed by map id with holes for deleted maps
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MapInfos(pub Vec<Option<MapInfo>>);

impl MapInfos {
    pub fn get(&self, id: u32) -> Option<&MapInfo> {
        self.0.get(id as usize).and_then(Option::as_ref)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| MapshotError::MapParse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MapshotError::MapParse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }
}

/// The map the host currently shows. Inserted and replaced by the host.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CurrentMap {
    pub info: MapInfo,
    pub data: MapData,
    pub tile_size: TileSize,
}
