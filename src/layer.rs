use crate::error::RenderError;
use crate::tileset::{Tile, TileCatalog};
use macroquad::math::{vec2, Vec2};

pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits (bit 28 is free)

/// Raw Tiled global id, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    #[inline] pub fn raw(self) -> u32 { self.0 }
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }
}

/// Counter-clockwise rotation of a cell's texture in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    #[inline]
    pub fn quadrant(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Rotate90 => 1,
            Rotation::Rotate180 => 2,
            Rotation::Rotate270 => 3,
        }
    }

    pub fn from_quadrant(q: u8) -> Option<Self> {
        match q {
            0 => Some(Rotation::None),
            1 => Some(Rotation::Rotate90),
            2 => Some(Rotation::Rotate180),
            3 => Some(Rotation::Rotate270),
            _ => None,
        }
    }

    /// Only exact multiples of 90 below 360 are accepted.
    pub fn from_degrees(deg: u32) -> Option<Self> {
        if deg % 90 != 0 {
            return None;
        }
        u8::try_from(deg / 90).ok().and_then(Self::from_quadrant)
    }
}

/// One grid slot: an optional tile plus mirroring and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pub tile: Option<Tile>,
    pub flip_horizontally: bool,
    pub flip_vertically: bool,
    pub rotation: Rotation,
}

impl Cell {
    pub fn new(tile: Tile) -> Self {
        Cell {
            tile: Some(tile),
            ..Default::default()
        }
    }

    pub fn flipped(mut self, horizontally: bool, vertically: bool) -> Self {
        self.flip_horizontally = horizontally;
        self.flip_vertically = vertically;
        self
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Folds Tiled's three flip bits into two flips and a quarter-turn count.
    /// The anti-diagonal flip has no direct counterpart, so it becomes a
    /// rotation combined with at most one mirror.
    pub fn from_tiled_flags(tile: Tile, flip_h: bool, flip_v: bool, flip_d: bool) -> Self {
        let cell = Cell::new(tile);
        if !flip_d {
            return cell.flipped(flip_h, flip_v);
        }
        match (flip_h, flip_v) {
            (true, true) => cell.flipped(true, false).rotated(Rotation::Rotate270),
            (true, false) => cell.rotated(Rotation::Rotate270),
            (false, true) => cell.rotated(Rotation::Rotate90),
            (false, false) => cell.flipped(false, true).rotated(Rotation::Rotate270),
        }
    }
}

/// A rectangular grid of cells; row 0 is the bottom row on screen.
#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    width: usize,
    height: usize,
    pub tile_w: f32,
    pub tile_h: f32,
    /// Render offset in map units, y pointing down as Tiled stores it.
    pub offset: Vec2,
    opacity: f32,
    pub visible: bool,
    cells: Vec<Option<Cell>>,
}

impl TileLayer {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        tile_w: f32,
        tile_h: f32,
    ) -> Self {
        TileLayer {
            name: name.into(),
            width,
            height,
            tile_w,
            tile_h,
            offset: Vec2::ZERO,
            opacity: 1.0,
            visible: true,
            cells: vec![None; width * height],
        }
    }

    /// Builds a layer from Tiled's row-major, top-row-first gid array.
    pub fn from_gids(
        name: impl Into<String>,
        width: usize,
        height: usize,
        tile_w: f32,
        tile_h: f32,
        data: &[u32],
        catalog: &TileCatalog,
    ) -> Result<Self, RenderError> {
        let name = name.into();
        if data.len() != width * height {
            return Err(RenderError::InvalidLayerSize {
                name,
                expected: width * height,
                actual: data.len(),
            });
        }

        let mut layer = TileLayer::new(name, width, height, tile_w, tile_h);
        for (idx, &raw) in data.iter().enumerate() {
            let gid = TileId(raw);
            if gid.clean() == 0 {
                continue;
            }
            let col = idx % width;
            let row = height - 1 - idx / width;
            match catalog.cell_for_gid(gid) {
                Some(cell) => layer.set_cell(col, row, Some(cell)),
                None => log::warn!(
                    "layer '{}': gid {} at ({}, {}) has no tile, leaving cell empty",
                    layer.name,
                    gid.clean(),
                    col,
                    row
                ),
            }
        }
        Ok(layer)
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = vec2(x, y);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    #[inline] pub fn width(&self) -> usize { self.width }
    #[inline] pub fn height(&self) -> usize { self.height }
    #[inline] pub fn opacity(&self) -> f32 { self.opacity }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Cell at `(col, row)`; anything outside the grid reads as empty.
    #[inline]
    pub fn cell(&self, col: i32, row: i32) -> Option<&Cell> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        self.cells[row as usize * self.width + col as usize].as_ref()
    }

    /// Writes outside the grid are ignored.
    pub fn set_cell(&mut self, col: usize, row: usize, cell: Option<Cell>) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::{AtlasTileset, TextureId, TextureRegion};

    fn tile() -> Tile {
        Tile::new(TextureRegion::from_pixels(TextureId(0), 32, 32, 0, 0, 16, 16))
    }

    fn catalog() -> TileCatalog {
        TileCatalog::new(vec![AtlasTileset {
            first_gid: 1,
            tilecount: 4,
            cols: 2,
            texture: TextureId(0),
            atlas_w: 32,
            atlas_h: 32,
            tile_w: 16,
            tile_h: 16,
            spacing: 0,
            margin: 0,
        }])
    }

    #[test]
    fn rotation_from_degrees_rejects_off_axis_values() {
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Rotate270));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(360), None);
        assert_eq!(Rotation::from_quadrant(4), None);
    }

    #[test]
    fn diagonal_flag_table() {
        let c = |h, v| Cell::from_tiled_flags(tile(), h, v, true);
        let hv = c(true, true);
        assert_eq!((hv.flip_horizontally, hv.rotation), (true, Rotation::Rotate270));
        assert_eq!(c(true, false).rotation, Rotation::Rotate270);
        assert!(!c(true, false).flip_horizontally);
        assert_eq!(c(false, true).rotation, Rotation::Rotate90);
        let none = c(false, false);
        assert_eq!((none.flip_vertically, none.rotation), (true, Rotation::Rotate270));

        let plain = Cell::from_tiled_flags(tile(), true, true, false);
        assert!(plain.flip_horizontally && plain.flip_vertically);
        assert_eq!(plain.rotation, Rotation::None);
    }

    #[test]
    fn out_of_range_cells_read_as_empty() {
        let mut layer = TileLayer::new("l", 2, 2, 16.0, 16.0);
        layer.set_cell(1, 1, Some(Cell::new(tile())));
        layer.set_cell(5, 5, Some(Cell::new(tile())));
        assert!(layer.cell(1, 1).is_some());
        assert!(layer.cell(-1, 0).is_none());
        assert!(layer.cell(0, 2).is_none());
        assert!(layer.cell(2, 0).is_none());
    }

    #[test]
    fn from_gids_puts_first_data_row_on_top() {
        let layer = TileLayer::from_gids("ground", 2, 2, 16.0, 16.0, &[1, 0, 0, 4], &catalog())
            .expect("layer");
        assert!(layer.cell(0, 1).is_some());
        assert!(layer.cell(1, 0).is_some());
        assert!(layer.cell(0, 0).is_none());
        assert!(layer.cell(1, 1).is_none());
    }

    #[test]
    fn from_gids_rejects_mismatched_length() {
        let err = TileLayer::from_gids("oops", 2, 2, 8.0, 8.0, &[1, 2, 3], &catalog()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidLayerSize { ref name, expected: 4, actual: 3 } if name == "oops"
        ));
    }

    #[test]
    fn unknown_gid_becomes_empty_cell() {
        let layer = TileLayer::from_gids("l", 1, 1, 8.0, 8.0, &[42], &catalog()).expect("layer");
        assert!(layer.cell(0, 0).is_none());
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(TileLayer::new("l", 1, 1, 1.0, 1.0).with_opacity(1.5).opacity(), 1.0);
        assert_eq!(TileLayer::new("l", 1, 1, 1.0, 1.0).with_opacity(-0.5).opacity(), 0.0);
    }
}
