use super::cull::visible_cells;
use super::quad::{Quad, QuadBuilder};
use super::{QuadSink, TileLayerRenderer};
use crate::color::PackedColor;
use crate::config::RendererConfig;
use crate::error::RenderError;
use crate::layer::{Cell, TileLayer};
use macroquad::color::{Color, WHITE};
use macroquad::math::{vec2, Rect, Vec2};

/// Renderer for axis-aligned rectangular layers, y pointing up.
#[derive(Debug, Clone)]
pub struct OrthogonalRenderer {
    builder: QuadBuilder,
    /// Tint multiplied into every layer; its alpha is scaled by layer opacity.
    pub batch_color: Color,
}

impl OrthogonalRenderer {
    pub fn new(unit_scale: f32) -> Self {
        OrthogonalRenderer {
            builder: QuadBuilder::new(unit_scale),
            batch_color: WHITE,
        }
    }

    pub fn from_config(cfg: &RendererConfig) -> Result<Self, RenderError> {
        cfg.validate()?;
        log::debug!(
            "orthogonal renderer: unit_scale={} batch_color={:?}",
            cfg.unit_scale,
            cfg.batch_color
        );
        Ok(OrthogonalRenderer {
            builder: QuadBuilder::new(cfg.unit_scale),
            batch_color: cfg.color(),
        })
    }

    #[inline]
    pub fn unit_scale(&self) -> f32 {
        self.builder.unit_scale
    }

    /// Color every cell of `layer` is drawn with this frame.
    #[inline]
    pub fn layer_color(&self, layer: &TileLayer) -> PackedColor {
        PackedColor::for_layer(self.batch_color, layer.opacity())
    }

    /// World-space size of one grid step of `layer`.
    #[inline]
    fn layer_tile(&self, layer: &TileLayer) -> Vec2 {
        vec2(layer.tile_w, layer.tile_h) * self.unit_scale()
    }

    /// Render offset of `layer` in world space; the stored offset is y-down.
    #[inline]
    fn layer_offset(&self, layer: &TileLayer) -> Vec2 {
        vec2(layer.offset.x, -layer.offset.y) * self.unit_scale()
    }

    /// Draws one cell at a known world position without culling.
    pub fn render_cell(
        &self,
        cell: &Cell,
        x: f32,
        y: f32,
        layer: &TileLayer,
        sink: &mut dyn QuadSink,
    ) {
        self.render_cell_with_color(cell, x, y, self.layer_color(layer), sink);
    }

    pub fn render_cell_with_color(
        &self,
        cell: &Cell,
        x: f32,
        y: f32,
        color: PackedColor,
        sink: &mut dyn QuadSink,
    ) {
        if let Some(quad) = self.builder.build(cell, x, y, color) {
            submit(&quad, sink);
        }
    }

    /// Draws one cell rotated by `rotation` radians around `pivot`, measured
    /// in world units from the tile's bottom-left corner.
    pub fn render_cell_rotated(
        &self,
        cell: &Cell,
        x: f32,
        y: f32,
        layer: &TileLayer,
        rotation: f64,
        pivot: Vec2,
        sink: &mut dyn QuadSink,
    ) {
        let color = self.layer_color(layer);
        if let Some(quad) = self.builder.build_rotated(cell, x, y, color, rotation, pivot) {
            submit(&quad, sink);
        }
    }
}

#[inline]
fn submit(quad: &Quad, sink: &mut dyn QuadSink) {
    sink.submit_quad(quad.texture, &quad.vertex_data());
}

impl TileLayerRenderer for OrthogonalRenderer {
    fn render_layer(&self, layer: &TileLayer, view: &Rect, sink: &mut dyn QuadSink) {
        let color = self.layer_color(layer);
        let tile = self.layer_tile(layer);
        let offset = self.layer_offset(layer);

        let bounds = visible_cells(layer.width(), layer.height(), tile, offset, view);
        log::trace!(
            "layer '{}': cols {}..{} rows {}..={}",
            layer.name,
            bounds.col_start,
            bounds.col_end,
            bounds.row_start,
            bounds.row_end
        );
        if bounds.is_empty() {
            return;
        }

        let mut y = bounds.row_end as f32 * tile.y + offset.y;
        let x_start = bounds.col_start as f32 * tile.x + offset.x;

        for row in bounds.rows() {
            let mut x = x_start;
            for col in bounds.cols() {
                if let Some(cell) = layer.cell(col, row) {
                    self.render_cell_with_color(cell, x, y, color, sink);
                }
                x += tile.x;
            }
            y -= tile.y;
        }
    }
}
