//! Tile compositor
//!
//! Re-derives the map's picture from its tile table. Each cell's four tile
//! layers are sorted into a lower pass (below characters) and an upper pass
//! (above characters), then painted cell by cell with the host's draw
//! primitives. Shadows and table edges only ever go to the lower pass.

pub mod painter;

pub use painter::{SwatchPainter, TilePainter};

use crate::config::MapshotConfig;
use crate::map::{SHADOW_LAYER, TileGrid, TileSize};
use image::RgbaImage;
use painter::clear_rect;

/// Host predicates over tile ids and cells
pub trait TileRules: Send + Sync {
    /// Drawn above characters
    fn is_higher_tile(&self, tile_id: u32) -> bool;

    /// Raised furniture that draws an edge on the cell below
    fn is_table_tile(&self, tile_id: u32) -> bool;

    fn is_shadowing_tile(&self, tile_id: u32) -> bool;

    /// Cells characters can walk both over and under
    fn is_overpass_position(&self, _x: u32, _y: u32) -> bool {
        false
    }
}

/// Pixel rectangle of one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn for_cell(x: u32, y: u32, tile_size: TileSize) -> Self {
        Self {
            x: x * tile_size.width,
            y: y * tile_size.height,
            width: tile_size.width,
            height: tile_size.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LowerEntry {
    Tile(u32),
    /// Shadow overlay from the cell's shadow bits
    Shadow(u32),
    /// Edge of the table tile standing on the cell above
    TableEdge(u32),
}

/// Paint order for one cell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellPlan {
    pub lower: Vec<LowerEntry>,
    pub upper: Vec<u32>,
}

impl CellPlan {
    fn sort<R: TileRules + ?Sized>(&mut self, rules: &R, tile_id: u32) {
        if rules.is_higher_tile(tile_id) {
            self.upper.push(tile_id);
        } else {
            self.lower.push(LowerEntry::Tile(tile_id));
        }
    }
}

/// Decide which pass each layer of cell `(x, y)` belongs to
pub fn classify_cell<G, R>(grid: &G, rules: &R, x: u32, y: u32) -> CellPlan
where
    G: TileGrid + ?Sized,
    R: TileRules + ?Sized,
{
    let (mx, my) = (x as i32, y as i32);
    let t0 = grid.read(mx, my, 0);
    let t1 = grid.read(mx, my, 1);
    let t2 = grid.read(mx, my, 2);
    let t3 = grid.read(mx, my, 3);
    let shadow_bits = grid.read(mx, my, SHADOW_LAYER);
    let upper_t1 = grid.read(mx, my - 1, 1);

    let mut plan = CellPlan::default();
    plan.sort(rules, t0);
    plan.sort(rules, t1);

    plan.lower.push(LowerEntry::Shadow(shadow_bits));

    if rules.is_table_tile(upper_t1)
        && !rules.is_table_tile(t1)
        && !rules.is_shadowing_tile(t0)
    {
        plan.lower.push(LowerEntry::TableEdge(upper_t1));
    }

    if rules.is_overpass_position(x, y) {
        plan.upper.push(t2);
        plan.upper.push(t3);
    } else {
        plan.sort(rules, t2);
        plan.sort(rules, t3);
    }

    plan
}

/// Result of a composite: one shared image or one image per pass
#[derive(Clone, Debug, PartialEq)]
pub enum Mapshot {
    Combined(RgbaImage),
    Separate { lower: RgbaImage, upper: RgbaImage },
}

impl Mapshot {
    pub fn lower(&self) -> &RgbaImage {
        match self {
            Mapshot::Combined(image) => image,
            Mapshot::Separate { lower, .. } => lower,
        }
    }

    /// Same image as [`Mapshot::lower`] when combined
    pub fn upper(&self) -> &RgbaImage {
        match self {
            Mapshot::Combined(image) => image,
            Mapshot::Separate { upper, .. } => upper,
        }
    }

    /// Images in output order, lower first
    pub fn into_images(self) -> Vec<RgbaImage> {
        match self {
            Mapshot::Combined(image) => vec![image],
            Mapshot::Separate { lower, upper } => vec![lower, upper],
        }
    }
}

/// Paint the whole map.
///
/// With `separate_layers` off both passes land in one image, upper content
/// painted over lower content cell by cell.
pub fn composite<G, R, P>(
    grid: &G,
    tile_size: TileSize,
    rules: &R,
    painter: &P,
    separate_layers: bool,
) -> Mapshot
where
    G: TileGrid + ?Sized,
    R: TileRules + ?Sized,
    P: TilePainter + ?Sized,
{
    let width = grid.width() * tile_size.width;
    let height = grid.height() * tile_size.height;

    let mut lower = RgbaImage::new(width, height);
    let mut upper = separate_layers.then(|| RgbaImage::new(width, height));

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let plan = classify_cell(grid, rules, x, y);
            let rect = TileRect::for_cell(x, y, tile_size);
            paint_cell(&plan, rect, painter, &mut lower, upper.as_mut());
        }
    }

    match upper {
        Some(upper) => Mapshot::Separate { lower, upper },
        None => Mapshot::Combined(lower),
    }
}

pub fn composite_map<G, R, P>(
    grid: &G,
    tile_size: TileSize,
    rules: &R,
    painter: &P,
    config: &MapshotConfig,
) -> Mapshot
where
    G: TileGrid + ?Sized,
    R: TileRules + ?Sized,
    P: TilePainter + ?Sized,
{
    composite(grid, tile_size, rules, painter, config.separate_layers)
}

fn paint_cell<P: TilePainter + ?Sized>(
    plan: &CellPlan,
    rect: TileRect,
    painter: &P,
    lower: &mut RgbaImage,
    upper: Option<&mut RgbaImage>,
) {
    clear_rect(lower, rect);
    let upper = upper.map(|upper| {
        clear_rect(upper, rect);
        upper
    });

    for entry in &plan.lower {
        match *entry {
            LowerEntry::Shadow(bits) => painter.draw_shadow(lower, bits, rect),
            LowerEntry::TableEdge(tile_id) => painter.draw_table_edge(lower, tile_id, rect),
            LowerEntry::Tile(tile_id) => painter.draw_tile(lower, tile_id, rect),
        }
    }

    let upper = match upper {
        Some(upper) => upper,
        None => lower,
    };
    for &tile_id in &plan.upper {
        painter.draw_tile(upper, tile_id, rect);
    }
}
