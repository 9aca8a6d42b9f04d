#![allow(dead_code)]

use macroquad_tiled_render::{
    AtlasTileset, Cell, SubmittedQuad, TextureId, TextureRegion, Tile, TileCatalog,
};

pub const EPS: f32 = 1e-4;

pub fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < EPS, "{a} != {b}");
}

pub fn full_uv_tile() -> Tile {
    Tile::new(TextureRegion {
        texture: TextureId(0),
        width: 32,
        height: 32,
        u: 0.0,
        v: 0.0,
        u2: 1.0,
        v2: 1.0,
    })
}

pub fn cell() -> Cell {
    Cell::new(full_uv_tile())
}

/// 2x2 atlas of 32px tiles, gids 1..=4.
pub fn catalog() -> TileCatalog {
    TileCatalog::new(vec![AtlasTileset {
        first_gid: 1,
        tilecount: 4,
        cols: 2,
        texture: TextureId(0),
        atlas_w: 64,
        atlas_h: 64,
        tile_w: 32,
        tile_h: 32,
        spacing: 0,
        margin: 0,
    }])
}

/// `(x, y)` of every vertex of a submitted quad.
pub fn positions(q: &SubmittedQuad) -> [(f32, f32); 4] {
    let v = &q.vertices;
    [(v[0], v[1]), (v[5], v[6]), (v[10], v[11]), (v[15], v[16])]
}

/// `(u, v)` of every vertex of a submitted quad.
pub fn uvs(q: &SubmittedQuad) -> [(f32, f32); 4] {
    let v = &q.vertices;
    [(v[3], v[4]), (v[8], v[9]), (v[13], v[14]), (v[18], v[19])]
}
