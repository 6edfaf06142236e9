//! Quad mesh generation.
//!
//! Every quad is four vertices and six indices (two triangles, 0-1-2 and
//! 2-3-0). Quads never share vertices, so the mesh for N quads always has
//! 4N vertices and 6N indices.

use crate::glyph::{GlyphAtlasLayout, TextLayout, UvRect};

/// Interleaved vertex: position (x, y, z) then texture coordinates (u, v).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Floats per vertex.
    pub const COMPONENTS: usize = 5;
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            uv: [u, v],
        }
    }
}

/// CPU-side geometry ready for upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Pixel rectangle in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

const FULL_UV: UvRect = UvRect {
    u0: 0.0,
    v0: 0.0,
    u1: 1.0,
    v1: 1.0,
};

#[derive(Debug, Default)]
pub struct QuadMeshBuilder {
    mesh: MeshData,
}

impl QuadMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(quads: usize) -> Self {
        Self {
            mesh: MeshData {
                vertices: Vec::with_capacity(quads * 4),
                indices: Vec::with_capacity(quads * 6),
            },
        }
    }

    /// Appends one quad: top-left, top-right, bottom-right, bottom-left.
    pub fn push_quad(&mut self, rect: Rect, uv: UvRect) -> &mut Self {
        let base = self.mesh.vertices.len() as u32;
        let Rect { x, y, w, h } = rect;

        self.mesh.vertices.extend_from_slice(&[
            Vertex::new(x, y, uv.u0, uv.v0),
            Vertex::new(x + w, y, uv.u1, uv.v0),
            Vertex::new(x + w, y + h, uv.u1, uv.v1),
            Vertex::new(x, y + h, uv.u0, uv.v1),
        ]);
        self.mesh
            .indices
            .extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
        self
    }

    pub fn build(self) -> MeshData {
        self.mesh
    }

    /// A single `width × height` quad at the origin with the full UV range.
    pub fn image_quad(width: f32, height: f32) -> MeshData {
        let mut builder = Self::with_capacity(1);
        builder.push_quad(
            Rect {
                x: 0.0,
                y: 0.0,
                w: width,
                h: height,
            },
            FULL_UV,
        );
        builder.build()
    }

    /// One quad per glyph, laid out left to right from the origin.
    pub fn text(layout: &TextLayout, atlas: &GlyphAtlasLayout) -> MeshData {
        let cell = atlas.cell_size() as f32;
        let mut builder = Self::with_capacity(layout.glyphs.len());

        for (glyph, pen) in layout.glyphs.iter().zip(layout.offsets()) {
            let rect = Rect {
                x: pen as f32,
                y: 0.0,
                w: glyph.advance as f32,
                h: cell,
            };
            builder.push_quad(rect, atlas.uv_rect(glyph));
        }
        builder.build()
    }
}
