//! Per-tile draw primitives

use super::TileRect;
use crate::map::tile_id;
use image::{Pixel, Rgba, RgbaImage};

/// Black at half opacity, one quarter of the tile per shadow bit
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 128]);

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Draws single tiles into a target image.
///
/// Every call composites over what is already in `rect`; callers decide
/// the order.
pub trait TilePainter: Send + Sync {
    fn draw_tile(&self, target: &mut RgbaImage, tile_id: u32, rect: TileRect);

    /// Edge strip of the table tile `tile_id`, drawn on the cell below it
    fn draw_table_edge(&self, target: &mut RgbaImage, tile_id: u32, rect: TileRect);

    fn draw_shadow(&self, target: &mut RgbaImage, shadow_bits: u32, rect: TileRect) {
        if shadow_bits & 0x0f == 0 {
            return;
        }

        let half_width = rect.width / 2;
        let half_height = rect.height / 2;
        for i in 0..4 {
            if shadow_bits & (1 << i) != 0 {
                let quadrant = TileRect {
                    x: rect.x + (i % 2) * half_width,
                    y: rect.y + (i / 2) * half_height,
                    width: half_width,
                    height: half_height,
                };
                fill_rect(target, quadrant, SHADOW_COLOR);
            }
        }
    }
}

/// Source-over fill, clipped to the image
pub fn fill_rect(target: &mut RgbaImage, rect: TileRect, color: Rgba<u8>) {
    let x_end = (rect.x + rect.width).min(target.width());
    let y_end = (rect.y + rect.height).min(target.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            target.get_pixel_mut(x, y).blend(&color);
        }
    }
}

pub fn clear_rect(target: &mut RgbaImage, rect: TileRect) {
    let x_end = (rect.x + rect.width).min(target.width());
    let y_end = (rect.y + rect.height).min(target.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            target.put_pixel(x, y, TRANSPARENT);
        }
    }
}

/// Paints every tile as a flat color derived from its id.
///
/// Good enough to check a map's layering without the tileset sheets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwatchPainter;

impl SwatchPainter {
    pub fn swatch(tile_id: u32) -> Rgba<u8> {
        let hash = tile_id.wrapping_mul(0x9E37_79B1);
        Rgba([(hash >> 24) as u8, (hash >> 16) as u8, (hash >> 8) as u8, 255])
    }

    fn edge(tile_id: u32) -> Rgba<u8> {
        let Rgba([r, g, b, a]) = Self::swatch(tile_id);
        Rgba([r / 2, g / 2, b / 2, a])
    }
}

impl TilePainter for SwatchPainter {
    fn draw_tile(&self, target: &mut RgbaImage, tile_id: u32, rect: TileRect) {
        if tile_id::is_visible_tile(tile_id) {
            fill_rect(target, rect, Self::swatch(tile_id));
        }
    }

    fn draw_table_edge(&self, target: &mut RgbaImage, tile_id: u32, rect: TileRect) {
        if !tile_id::is_tile_a2(tile_id) {
            return;
        }

        let strip = TileRect {
            height: rect.height / 4,
            ..rect
        };
        fill_rect(target, strip, Self::edge(tile_id));
    }
}
