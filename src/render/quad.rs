use super::uv::cell_uvs;
use crate::color::PackedColor;
use crate::geom::{complete_parallelogram, quadrant_radians, rotate};
use crate::layer::Cell;
use crate::tileset::TextureId;
use macroquad::math::{vec2, DVec2, Vec2};

pub const QUAD_VERTEX_COUNT: usize = 4;
/// x, y, color, u, v
pub const VERTEX_FLOATS: usize = 5;
pub const QUAD_FLOATS: usize = QUAD_VERTEX_COUNT * VERTEX_FLOATS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub position: Vec2,
    pub color: PackedColor,
    pub uv: Vec2,
}

/// Four vertices in the order bottom-left, top-left, top-right, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub texture: TextureId,
    pub vertices: [QuadVertex; QUAD_VERTEX_COUNT],
}

impl Quad {
    fn assemble(
        texture: TextureId,
        positions: [Vec2; 4],
        uvs: [Vec2; 4],
        color: PackedColor,
    ) -> Self {
        let v = |i: usize| QuadVertex {
            position: positions[i],
            color,
            uv: uvs[i],
        };
        Quad {
            texture,
            vertices: [v(0), v(1), v(2), v(3)],
        }
    }

    pub fn positions(&self) -> [Vec2; 4] {
        self.vertices.map(|v| v.position)
    }

    pub fn uvs(&self) -> [Vec2; 4] {
        self.vertices.map(|v| v.uv)
    }

    /// Interleaved `(x, y, color, u, v)` per vertex.
    pub fn vertex_data(&self) -> [f32; QUAD_FLOATS] {
        let mut out = [0.0; QUAD_FLOATS];
        for (chunk, v) in out.chunks_exact_mut(VERTEX_FLOATS).zip(&self.vertices) {
            chunk.copy_from_slice(&[v.position.x, v.position.y, v.color.to_f32(), v.uv.x, v.uv.y]);
        }
        out
    }
}

/// Turns cells into world-space quads at a fixed unit scale.
#[derive(Debug, Clone, Copy)]
pub struct QuadBuilder {
    pub unit_scale: f32,
}

impl QuadBuilder {
    pub fn new(unit_scale: f32) -> Self {
        QuadBuilder { unit_scale }
    }

    /// Axis-aligned quad with its bottom-left corner at `(x, y)` plus the
    /// tile offset. Quarter-turn rotation only reorders UVs.
    /// Returns `None` for a cell without a tile.
    pub fn build(&self, cell: &Cell, x: f32, y: f32, color: PackedColor) -> Option<Quad> {
        let tile = cell.tile.as_ref()?;
        let region = &tile.region;
        let scale = self.unit_scale;

        let x1 = x + tile.offset.x * scale;
        let y1 = y + tile.offset.y * scale;
        let x2 = x1 + region.width as f32 * scale;
        let y2 = y1 + region.height as f32 * scale;

        let positions = [vec2(x1, y1), vec2(x1, y2), vec2(x2, y2), vec2(x2, y1)];
        let uvs = cell_uvs(cell, region, true);
        Some(Quad::assemble(region.texture, positions, uvs, color))
    }

    /// Quad rotated by `rotation` radians (plus the cell's own quarter turns)
    /// around `pivot`, given relative to the tile's bottom-left corner.
    ///
    /// The bottom-right corner is derived from the other three instead of
    /// being rotated on its own.
    pub fn build_rotated(
        &self,
        cell: &Cell,
        x: f32,
        y: f32,
        color: PackedColor,
        rotation: f64,
        pivot: Vec2,
    ) -> Option<Quad> {
        let tile = cell.tile.as_ref()?;
        let region = &tile.region;
        let scale = self.unit_scale;

        let rotation = rotation + quadrant_radians(cell.rotation.quadrant());

        let width = region.width as f32 * scale;
        let height = region.height as f32 * scale;
        let origin = DVec2::new(
            (x + tile.offset.x * scale + pivot.x) as f64,
            (y + tile.offset.y * scale + pivot.y) as f64,
        );

        let lo = DVec2::new(-pivot.x as f64, -pivot.y as f64);
        let hi = DVec2::new((width - pivot.x) as f64, (height - pivot.y) as f64);
        let mut p1 = lo;
        let mut p2 = DVec2::new(lo.x, hi.y);
        let mut p3 = hi;
        let mut p4 = DVec2::new(hi.x, lo.y);

        if rotation != 0.0 {
            let (sin, cos) = rotation.sin_cos();
            p1 = rotate(p1, cos, sin);
            p2 = rotate(p2, cos, sin);
            p3 = rotate(p3, cos, sin);
            p4 = complete_parallelogram(p1, p2, p3);
        }

        let positions = [p1, p2, p3, p4].map(|p| {
            let w = p + origin;
            vec2(w.x as f32, w.y as f32)
        });
        let uvs = cell_uvs(cell, region, false);
        Some(Quad::assemble(region.texture, positions, uvs, color))
    }
}
