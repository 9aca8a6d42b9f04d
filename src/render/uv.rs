//! Texture coordinates for the four quad slots.
//!
//! Slots are always bottom-left, top-left, top-right, bottom-right. Mirroring
//! and quarter turns only move UV pairs between slots; positions stay put.

use crate::layer::{Cell, Rotation};
use crate::tileset::TextureRegion;
use macroquad::math::{vec2, Vec2};

pub const BOTTOM_LEFT: usize = 0;
pub const TOP_LEFT: usize = 1;
pub const TOP_RIGHT: usize = 2;
pub const BOTTOM_RIGHT: usize = 3;

/// `ROTATION_PERMUTATIONS[quadrant][slot]` is the slot whose UV moves into
/// `slot` after that many counter-clockwise quarter turns.
pub const ROTATION_PERMUTATIONS: [[usize; 4]; 4] = [
    [0, 1, 2, 3],
    [1, 2, 3, 0],
    [2, 3, 0, 1],
    [3, 0, 1, 2],
];

/// Unmodified UVs of `region`. The region's `v` is the top edge of the
/// image, so it goes to the top slots and `v2` to the bottom ones.
#[inline]
pub fn base_uvs(region: &TextureRegion) -> [Vec2; 4] {
    [
        vec2(region.u, region.v2),
        vec2(region.u, region.v),
        vec2(region.u2, region.v),
        vec2(region.u2, region.v2),
    ]
}

/// Swaps U between diagonal slots (0<->2, 1<->3).
#[inline]
pub fn flip_horizontal(uvs: &mut [Vec2; 4]) {
    let tmp = uvs[BOTTOM_LEFT].x;
    uvs[BOTTOM_LEFT].x = uvs[TOP_RIGHT].x;
    uvs[TOP_RIGHT].x = tmp;
    let tmp = uvs[TOP_LEFT].x;
    uvs[TOP_LEFT].x = uvs[BOTTOM_RIGHT].x;
    uvs[BOTTOM_RIGHT].x = tmp;
}

/// Swaps V between diagonal slots (0<->2, 1<->3).
#[inline]
pub fn flip_vertical(uvs: &mut [Vec2; 4]) {
    let tmp = uvs[BOTTOM_LEFT].y;
    uvs[BOTTOM_LEFT].y = uvs[TOP_RIGHT].y;
    uvs[TOP_RIGHT].y = tmp;
    let tmp = uvs[TOP_LEFT].y;
    uvs[TOP_LEFT].y = uvs[BOTTOM_RIGHT].y;
    uvs[BOTTOM_RIGHT].y = tmp;
}

#[inline]
pub fn rotate_quadrants(uvs: &[Vec2; 4], rotation: Rotation) -> [Vec2; 4] {
    let perm = &ROTATION_PERMUTATIONS[rotation.quadrant() as usize];
    [uvs[perm[0]], uvs[perm[1]], uvs[perm[2]], uvs[perm[3]]]
}

/// UVs for `cell`: atlas mapping, then horizontal flip, vertical flip and,
/// when `apply_rotation` is set, the cell's quarter turns.
pub fn cell_uvs(cell: &Cell, region: &TextureRegion, apply_rotation: bool) -> [Vec2; 4] {
    let mut uvs = base_uvs(region);
    if cell.flip_horizontally {
        flip_horizontal(&mut uvs);
    }
    if cell.flip_vertically {
        flip_vertical(&mut uvs);
    }
    if apply_rotation && cell.rotation != Rotation::None {
        uvs = rotate_quadrants(&uvs, cell.rotation);
    }
    uvs
}
