/// Tile kinds and the level's tile grid.
///
/// The grid stores, per cell, the raw tile (what gets drawn) and a separate
/// solid flag. Solidity starts out as the tile kind's default but is mutable
/// at runtime: doors, lifts, expanding floors and crumbling floors toggle it
/// while the level runs.
///
/// Coordinates are cell indices (`cx`, `cy`); pixel helpers convert with
/// `TILE_WIDTH` / `TILE_HEIGHT`. Out-of-bounds cells are treated as solid,
/// so nothing ever leaves the level through its border.

use super::geometry::Rect;

pub const TILE_WIDTH: i32 = 16;
pub const TILE_HEIGHT: i32 = 16;
pub const HALFTILE_WIDTH: i32 = TILE_WIDTH / 2;
pub const HALFTILE_HEIGHT: i32 = TILE_HEIGHT / 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Backdrop,     // decorative, passable
    Wall,
    Girder,
    Conveyor,     // solid; a conveyor actor drives it
    Crumbly,      // solid until an unstable-floor actor breaks it
    Bridge,       // laid by an expanding floor
}

impl Tile {
    /// Default solidity of the tile kind when a level is built.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            Tile::Wall | Tile::Girder | Tile::Conveyor | Tile::Crumbly | Tile::Bridge
        )
    }
}

#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    solid: Vec<bool>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        TileGrid {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
            solid: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> i32 {
        self.width as i32 * TILE_WIDTH
    }

    pub fn pixel_height(&self) -> i32 {
        self.height as i32 * TILE_HEIGHT
    }

    fn index(&self, cx: i32, cy: i32) -> Option<usize> {
        if cx < 0 || cy < 0 { return None; }
        let (x, y) = (cx as usize, cy as usize);
        if x >= self.width || y >= self.height { return None; }
        Some(y * self.width + x)
    }

    pub fn in_bounds(&self, cx: i32, cy: i32) -> bool {
        self.index(cx, cy).is_some()
    }

    // ── Solidity ──

    pub fn is_solid(&self, cx: i32, cy: i32) -> bool {
        self.index(cx, cy).map_or(true, |i| self.solid[i])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_solid(&mut self, cx: i32, cy: i32, solid: bool) {
        if let Some(i) = self.index(cx, cy) {
            self.solid[i] = solid;
        }
    }

    /// Solidity of the cell containing pixel (px, py).
    pub fn is_solid_at(&self, px: i32, py: i32) -> bool {
        self.is_solid(px.div_euclid(TILE_WIDTH), py.div_euclid(TILE_HEIGHT))
    }

    /// Does any solid cell overlap `rect`?
    pub fn rect_is_blocked(&self, rect: &Rect) -> bool {
        if rect.is_empty() { return false; }
        let cx0 = rect.x.div_euclid(TILE_WIDTH);
        let cx1 = (rect.right() - 1).div_euclid(TILE_WIDTH);
        let cy0 = rect.y.div_euclid(TILE_HEIGHT);
        let cy1 = (rect.bottom() - 1).div_euclid(TILE_HEIGHT);
        (cy0..=cy1).any(|cy| (cx0..=cx1).any(|cx| self.is_solid(cx, cy)))
    }

    // ── Raw tiles ──

    pub fn tile(&self, cx: i32, cy: i32) -> Option<Tile> {
        self.index(cx, cy).map(|i| self.tiles[i])
    }

    /// Replace the raw tile and reset the cell's solidity to the kind's default.
    pub fn set_tile(&mut self, cx: i32, cy: i32, tile: Tile) {
        if let Some(i) = self.index(cx, cy) {
            self.tiles[i] = tile;
            self.solid[i] = tile.is_solid();
        }
    }

    /// Pixel rectangle of a cell.
    pub fn cell_rect(cx: i32, cy: i32) -> Rect {
        Rect::new(cx * TILE_WIDTH, cy * TILE_HEIGHT, TILE_WIDTH, TILE_HEIGHT)
    }

    /// Number of consecutive cells starting at (cx, cy) and running right
    /// that carry the same raw tile as (cx, cy).
    pub fn run_length(&self, cx: i32, cy: i32) -> i32 {
        let Some(first) = self.tile(cx, cy) else { return 0 };
        let mut n = 0;
        while self.tile(cx + n, cy) == Some(first) {
            n += 1;
        }
        n
    }
}

/// Build a grid from a text diagram: `#` = wall, anything else empty.
#[cfg(test)]
pub fn grid_from(rows: &[&str]) -> TileGrid {
    let height = rows.len();
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut grid = TileGrid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == '#' {
                grid.set_tile(x as i32, y as i32, Tile::Wall);
            }
        }
    }
    grid
}
