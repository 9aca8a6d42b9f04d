pub mod batch;
pub mod cull;
pub mod orthogonal;
pub mod quad;
pub mod uv;

use crate::layer::TileLayer;
use crate::tileset::TextureId;
use macroquad::math::Rect;
use quad::QUAD_FLOATS;

/// Receives finished quads. A quad must be consumed before `submit_quad`
/// returns; the slice is not valid afterwards.
pub trait QuadSink {
    /// `vertices` holds `QUAD_VERTEX_COUNT` vertices of `(x, y, color, u, v)`.
    fn submit_quad(&mut self, texture: TextureId, vertices: &[f32; QUAD_FLOATS]);
}

/// A quad captured by the recording sink.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedQuad {
    pub texture: TextureId,
    pub vertices: [f32; QUAD_FLOATS],
}

impl QuadSink for Vec<SubmittedQuad> {
    fn submit_quad(&mut self, texture: TextureId, vertices: &[f32; QUAD_FLOATS]) {
        self.push(SubmittedQuad {
            texture,
            vertices: *vertices,
        });
    }
}

/// Draws one tile layer for a given visible region.
///
/// Implemented once per grid shape.
pub trait TileLayerRenderer {
    fn render_layer(&self, layer: &TileLayer, view: &Rect, sink: &mut dyn QuadSink);

    /// Draws `layers` in order, skipping hidden ones.
    fn render_layers(&self, layers: &[TileLayer], view: &Rect, sink: &mut dyn QuadSink) {
        for layer in layers.iter().filter(|l| l.visible) {
            self.render_layer(layer, view, sink);
        }
    }
}
