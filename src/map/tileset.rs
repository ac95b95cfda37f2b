//! Tile classification from a tileset flag table

use super::tile_id;
use crate::compositor::TileRules;
use crate::error::{MapshotError, Result};
use serde::Deserialize;
use std::path::Path;

/// Star passage: drawn above characters
pub const FLAG_HIGHER: u32 = 0x10;
/// Counter: raised furniture with an edge drawn on the cell below
pub const FLAG_TABLE: u32 = 0x80;

/// Classification rules backed by the host's per-tile flag table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TilesetFlags {
    flags: Vec<u32>,
}

#[derive(Deserialize)]
struct TilesetEntry {
    id: u32,
    #[serde(default)]
    flags: Vec<u32>,
}

impl TilesetFlags {
    pub fn new(flags: Vec<u32>) -> Self {
        Self { flags }
    }

    pub fn flag(&self, tile_id: u32) -> u32 {
        self.flags.get(tile_id as usize).copied().unwrap_or(0)
    }

    /// Pick one tileset out of the host's tileset table JSON
    pub fn from_tilesets_json(content: &str, tileset_id: u32) -> Result<Self> {
        let tilesets: Vec<Option<TilesetEntry>> =
            serde_json::from_str(content).map_err(|e| MapshotError::MapParse(e.to_string()))?;

        tilesets
            .into_iter()
            .flatten()
            .find(|tileset| tileset.id == tileset_id)
            .map(|tileset| Self::new(tileset.flags))
            .ok_or_else(|| MapshotError::MapParse(format!("tileset {tileset_id} not found")))
    }

    pub fn load(path: &Path, tileset_id: u32) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MapshotError::MapParse(format!("{}: {e}", path.display())))?;
        Self::from_tilesets_json(&content, tileset_id)
    }
}

impl TileRules for TilesetFlags {
    fn is_higher_tile(&self, tile_id: u32) -> bool {
        self.flag(tile_id) & FLAG_HIGHER != 0
    }

    fn is_table_tile(&self, tile_id: u32) -> bool {
        tile_id::is_tile_a2(tile_id) && self.flag(tile_id) & FLAG_TABLE != 0
    }

    fn is_shadowing_tile(&self, tile_id: u32) -> bool {
        tile_id::is_shadowing_tile(tile_id)
    }
}
