//! Tile id ranges of the host's tilesets
//!
//! Ids below `TILE_ID_A5` index the plain B-E sheets, ids from `TILE_ID_A1`
//! up are autotiles grouped 48 shapes per kind.

pub const TILE_ID_B: u32 = 0;
pub const TILE_ID_C: u32 = 256;
pub const TILE_ID_D: u32 = 512;
pub const TILE_ID_E: u32 = 768;
pub const TILE_ID_A5: u32 = 1536;
pub const TILE_ID_A1: u32 = 2048;
pub const TILE_ID_A2: u32 = 2816;
pub const TILE_ID_A3: u32 = 4352;
pub const TILE_ID_A4: u32 = 5888;
pub const TILE_ID_MAX: u32 = 8192;

pub fn is_visible_tile(tile_id: u32) -> bool {
    tile_id > 0 && tile_id < TILE_ID_MAX
}

pub fn is_tile_a2(tile_id: u32) -> bool {
    (TILE_ID_A2..TILE_ID_A3).contains(&tile_id)
}

pub fn is_tile_a3(tile_id: u32) -> bool {
    (TILE_ID_A3..TILE_ID_A4).contains(&tile_id)
}

pub fn is_tile_a4(tile_id: u32) -> bool {
    (TILE_ID_A4..TILE_ID_MAX).contains(&tile_id)
}

/// Roofs and walls cast the automatic shadow, so no table edge is drawn on them
pub fn is_shadowing_tile(tile_id: u32) -> bool {
    is_tile_a3(tile_id) || is_tile_a4(tile_id)
}
