use crate::layer::{Cell, TileId, GID_MASK};
use macroquad::math::{vec2, Vec2};

/// Index of an atlas texture registered with the batching consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u16);

/// A rectangular sub-image of an atlas.
///
/// `v` is the atlas row of the image's top edge and `v2` that of its bottom
/// edge; the quad builder maps `v` to the visually top corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub texture: TextureId,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
}

impl TextureRegion {
    /// Region covering pixels `(x, y, w, h)` of an `atlas_w` x `atlas_h` texture.
    pub fn from_pixels(
        texture: TextureId,
        atlas_w: u32,
        atlas_h: u32,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    ) -> Self {
        let tw = atlas_w.max(1) as f32;
        let th = atlas_h.max(1) as f32;
        TextureRegion {
            texture,
            width: w,
            height: h,
            u: x as f32 / tw,
            v: y as f32 / th,
            u2: (x + w) as f32 / tw,
            v2: (y + h) as f32 / th,
        }
    }
}

/// Drawable unit: an atlas region plus a draw offset in map units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub region: TextureRegion,
    pub offset: Vec2,
}

impl Tile {
    pub fn new(region: TextureRegion) -> Self {
        Tile {
            region,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = vec2(x, y);
        self
    }
}

/// One atlas image cut into a regular grid.
#[derive(Debug, Clone)]
pub struct AtlasTileset {
    pub first_gid: u32,
    pub tilecount: u32,
    pub cols: u32,
    pub texture: TextureId,
    pub atlas_w: u32,
    pub atlas_h: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    pub spacing: u32,
    pub margin: u32,
}

impl AtlasTileset {
    /// Tile for a tileset-local id, or `None` past `tilecount`.
    pub fn tile(&self, local: u32) -> Option<Tile> {
        if local >= self.tilecount || self.cols == 0 {
            return None;
        }
        let col = local % self.cols;
        let row = local / self.cols;
        let sx = self.margin + col * (self.tile_w + self.spacing);
        let sy = self.margin + row * (self.tile_h + self.spacing);

        Some(Tile::new(TextureRegion::from_pixels(
            self.texture,
            self.atlas_w,
            self.atlas_h,
            sx,
            sy,
            self.tile_w,
            self.tile_h,
        )))
    }
}

/// Resolves Tiled global ids to tiles across several tilesets.
pub struct TileCatalog {
    /// Sorted by `first_gid`; every range lies within `1..=GID_MASK`.
    tilesets: Vec<AtlasTileset>,
}

impl TileCatalog {
    pub fn new(mut tilesets: Vec<AtlasTileset>) -> Self {
        tilesets.retain(|t| {
            let end = t.first_gid.checked_add(t.tilecount);
            let ok = t.first_gid > 0 && end.is_some_and(|end| end <= GID_MASK + 1);
            if !ok {
                log::warn!(
                    "skipping tileset: gids {}+{} fall outside 1..={GID_MASK:#x}",
                    t.first_gid,
                    t.tilecount
                );
            }
            ok
        });
        tilesets.sort_by_key(|t| t.first_gid);
        TileCatalog { tilesets }
    }

    pub fn tilesets(&self) -> &[AtlasTileset] {
        &self.tilesets
    }

    /// Tileset owning `gid` and the tile's local id within it.
    pub fn ts_for_gid(&self, gid: TileId) -> Option<(&AtlasTileset, u32)> {
        let clean = gid.clean();
        let idx = self.tilesets.partition_point(|t| t.first_gid <= clean);
        let ts = self.tilesets.get(idx.checked_sub(1)?)?;
        let local = clean - ts.first_gid;
        (local < ts.tilecount).then_some((ts, local))
    }

    pub fn tile_for_gid(&self, gid: TileId) -> Option<Tile> {
        let (ts, local) = self.ts_for_gid(gid)?;
        ts.tile(local)
    }

    /// Cell for a raw gid, flip bits folded into flips and rotation.
    /// Gid 0 and unknown gids give `None`.
    pub fn cell_for_gid(&self, gid: TileId) -> Option<Cell> {
        let tile = self.tile_for_gid(gid)?;
        Some(Cell::from_tiled_flags(
            tile,
            gid.flip_h(),
            gid.flip_v(),
            gid.flip_d(),
        ))
    }
}
