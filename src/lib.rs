//! Orthogonal Tiled layer renderer for Macroquad.
//!
//! Culls a tile layer against the visible rectangle, turns every visible cell
//! into a textured quad (mirroring, quarter turns or free rotation included)
//! and hands the quads to a batching consumer.

mod color;
mod config;
mod error;
mod geom;
mod layer;
pub mod render;
mod tileset;

pub use color::PackedColor;
pub use config::RendererConfig;
pub use error::RenderError;
pub use layer::{Cell, Rotation, TileId, TileLayer, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use render::batch::{MeshBatch, QuadMesh};
pub use render::cull::{view_rect, visible_cells, CellBounds};
pub use render::orthogonal::OrthogonalRenderer;
pub use render::quad::{Quad, QuadBuilder, QuadVertex, QUAD_FLOATS, QUAD_VERTEX_COUNT};
pub use render::{QuadSink, SubmittedQuad, TileLayerRenderer};
pub use tileset::{AtlasTileset, TextureId, TextureRegion, Tile, TileCatalog};
