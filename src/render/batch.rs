use super::quad::{QUAD_FLOATS, QUAD_VERTEX_COUNT, VERTEX_FLOATS};
use super::QuadSink;
use crate::color::PackedColor;
use crate::tileset::TextureId;
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::texture::Texture2D;

/// Macroquad's default `Conf::draw_call_vertex_capacity`.
pub const DEFAULT_VERTEX_CAPACITY: usize = 10000;
/// Macroquad's default `Conf::draw_call_index_capacity`.
pub const DEFAULT_INDEX_CAPACITY: usize = 5000;

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Quads that fit in one draw call with the given capacities. Macroquad
/// truncates anything past them, and indices must stay within u16.
pub fn quads_per_draw_call(vertex_capacity: usize, index_capacity: usize) -> usize {
    let u16_limit = (u16::MAX as usize + 1) / QUAD_VERTEX_COUNT;
    (vertex_capacity / QUAD_VERTEX_COUNT)
        .min(index_capacity / QUAD_INDICES.len())
        .min(u16_limit)
        .max(1)
}

/// Quads sharing one texture, laid out as a triangle list.
pub struct QuadMesh {
    texture: Option<TextureId>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    max_quads: usize,
}

impl Default for QuadMesh {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_VERTEX_CAPACITY, DEFAULT_INDEX_CAPACITY)
    }
}

impl QuadMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mesh sized for a window whose `Conf` uses these draw call capacities.
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        let max_quads = quads_per_draw_call(vertex_capacity, index_capacity);
        QuadMesh {
            texture: None,
            vertices: Vec::with_capacity(max_quads * QUAD_VERTEX_COUNT),
            indices: Vec::with_capacity(max_quads * QUAD_INDICES.len()),
            max_quads,
        }
    }

    #[inline]
    pub fn max_quads(&self) -> usize {
        self.max_quads
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / QUAD_VERTEX_COUNT
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// True when a quad for `texture` cannot join the current contents.
    pub fn needs_flush(&self, texture: TextureId) -> bool {
        !self.is_empty()
            && (self.texture != Some(texture) || self.quad_count() >= self.max_quads)
    }

    /// Appends a quad; the caller checks `needs_flush` first.
    pub fn push(&mut self, texture: TextureId, data: &[f32; QUAD_FLOATS]) {
        let base = self.vertices.len() as u16;
        self.texture = Some(texture);
        for v in data.chunks_exact(VERTEX_FLOATS) {
            let color = PackedColor::from_f32(v[2]).to_color();
            self.vertices.push(Vertex::new(v[0], v[1], 0.0, v[3], v[4], color));
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    pub fn clear(&mut self) {
        self.texture = None;
        self.vertices.clear();
        self.indices.clear();
    }
}

/// Batching consumer that draws quads with macroquad meshes.
///
/// Consecutive quads on the same texture go out in one draw call; call
/// [`MeshBatch::flush`] at the end of the frame.
#[derive(Default)]
pub struct MeshBatch {
    textures: Vec<Texture2D>,
    mesh: QuadMesh,
    draw_calls: usize,
}

impl MeshBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch for a window configured with non-default
    /// `draw_call_vertex_capacity` / `draw_call_index_capacity`.
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        MeshBatch {
            textures: Vec::new(),
            mesh: QuadMesh::with_capacity(vertex_capacity, index_capacity),
            draw_calls: 0,
        }
    }

    pub fn add_texture(&mut self, tex: Texture2D) -> TextureId {
        self.textures.push(tex);
        TextureId((self.textures.len() - 1) as u16)
    }

    pub fn pending(&self) -> &QuadMesh {
        &self.mesh
    }

    /// Draw calls issued since the last [`MeshBatch::reset_stats`].
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn reset_stats(&mut self) {
        self.draw_calls = 0;
    }

    pub fn flush(&mut self) {
        let Some(id) = self.mesh.texture else {
            return;
        };
        if self.mesh.is_empty() {
            return;
        }
        let mesh = Mesh {
            vertices: std::mem::take(&mut self.mesh.vertices),
            indices: std::mem::take(&mut self.mesh.indices),
            texture: self.textures.get(id.0 as usize).cloned(),
        };
        draw_mesh(&mesh);
        self.draw_calls += 1;

        // keep the allocations for the next batch
        self.mesh.vertices = mesh.vertices;
        self.mesh.indices = mesh.indices;
        self.mesh.clear();
    }
}

impl QuadSink for MeshBatch {
    fn submit_quad(&mut self, texture: TextureId, vertices: &[f32; QUAD_FLOATS]) {
        if texture.0 as usize >= self.textures.len() {
            log::warn!("dropping quad for unregistered texture {}", texture.0);
            return;
        }
        if self.mesh.needs_flush(texture) {
            self.flush();
        }
        self.mesh.push(texture, vertices);
    }
}
