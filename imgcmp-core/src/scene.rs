//! Drawable scene objects: the image quad, the font and text strings.
//!
//! Each object owns its GPU resources and releases them in `destroy`.
//! Meshes are built explicitly through `ensure_mesh` before first use.

use crate::error::CoreError;
use crate::glyph::{GlyphAtlasLayout, TextLayout};
use crate::gpu::{FilterMode, GpuBackend, MeshBuffer, Program, Texture, UniformValue};
use crate::mesh::QuadMeshBuilder;
use crate::pixels::{PixelBuffer, PixelFormat};
use crate::shaders;
use crate::transform::Affine2;

// ════════════════════════════════════════════════════════════════════
// Image Quad
// ════════════════════════════════════════════════════════════════════

/// A single quad covering the image in texture-space pixels.
#[derive(Debug)]
pub struct ImageQuad {
    width: u32,
    height: u32,
    mesh: Option<MeshBuffer>,
}

impl ImageQuad {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mesh: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn ensure_mesh(&mut self, backend: &mut dyn GpuBackend) -> Result<&MeshBuffer, CoreError> {
        let mesh = match self.mesh.take() {
            Some(mesh) => mesh,
            None => {
                let data = QuadMeshBuilder::image_quad(self.width as f32, self.height as f32);
                MeshBuffer::upload(backend, &data)?
            }
        };
        let mesh: &MeshBuffer = self.mesh.insert(mesh);
        Ok(mesh)
    }

    pub fn mesh(&self) -> Option<&MeshBuffer> {
        self.mesh.as_ref()
    }

    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        if let Some(mut mesh) = self.mesh.take() {
            mesh.destroy(backend);
        }
    }
}

// ════════════════════════════════════════════════════════════════════
// Font
// ════════════════════════════════════════════════════════════════════

/// How a string is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: [f32; 4],
    /// Premultiplied; composited under the glyphs.
    pub background: [f32; 4],
    pub scale: f32,
}

/// Glyph atlas texture, the text program and the atlas layout.
#[derive(Debug)]
pub struct Font {
    texture: Texture,
    program: Program,
    layout: GlyphAtlasLayout,
}

impl Font {
    /// Uploads a gray glyph atlas and compiles the text program.
    pub fn load(
        backend: &mut dyn GpuBackend,
        atlas: &PixelBuffer,
        glyphs_per_row: u32,
    ) -> Result<Self, CoreError> {
        if atlas.format() != PixelFormat::Gray8 {
            return Err(CoreError::InvalidAtlas("glyph atlas must be single channel".into()));
        }
        let layout = GlyphAtlasLayout::new(atlas.width(), atlas.height(), glyphs_per_row)?;

        let mut program = Program::compile(backend, &shaders::text())?;
        let texture = match Texture::upload(backend, atlas, FilterMode::Linear) {
            Ok(texture) => texture,
            Err(e) => {
                program.destroy(backend);
                return Err(e.into());
            }
        };

        tracing::debug!(
            cell = layout.cell_size(),
            rows = layout.rows(),
            "font atlas loaded"
        );
        Ok(Self {
            texture,
            program,
            layout,
        })
    }

    pub fn layout(&self) -> &GlyphAtlasLayout {
        &self.layout
    }

    pub fn line_height(&self) -> u32 {
        self.layout.cell_size()
    }

    /// Lays out `text` for this font. The mesh is created on `ensure_mesh`.
    pub fn text(&self, text: &str) -> Result<TextString, CoreError> {
        Ok(TextString {
            text: text.to_string(),
            layout: self.layout.layout(text)?,
            mesh: None,
        })
    }

    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        self.texture.destroy(backend);
        self.program.destroy(backend);
    }
}

// ════════════════════════════════════════════════════════════════════
// Text String
// ════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct TextString {
    text: String,
    layout: TextLayout,
    mesh: Option<MeshBuffer>,
}

impl TextString {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn glyph_layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn ensure_mesh(&mut self, backend: &mut dyn GpuBackend, font: &Font) -> Result<&MeshBuffer, CoreError> {
        let mesh = match self.mesh.take() {
            Some(mesh) => mesh,
            None => MeshBuffer::upload(backend, &QuadMeshBuilder::text(&self.layout, &font.layout))?,
        };
        let mesh: &MeshBuffer = self.mesh.insert(mesh);
        Ok(mesh)
    }

    /// Draws the string with its top-left corner at `(x, y)` in the scaled
    /// space of `viewport`.
    pub fn draw(
        &mut self,
        backend: &mut dyn GpuBackend,
        font: &mut Font,
        style: &TextStyle,
        viewport: &Affine2,
        x: f32,
        y: f32,
    ) -> Result<(), CoreError> {
        if self.layout.glyphs.is_empty() {
            return Ok(());
        }
        let transform = viewport.scale(style.scale, style.scale).translate(x, y);

        let mesh = self.ensure_mesh(backend, font)?;
        mesh.bind(backend);
        font.texture.bind(backend, 0);

        let program = &mut font.program;
        program.bind(backend);
        program.set_matrix(backend, shaders::MODELVIEW, &transform);
        program.set(backend, shaders::COLOR, UniformValue::Vec4(style.color));
        program.set(backend, shaders::BACKGROUND, UniformValue::Vec4(style.background));
        program.set(backend, shaders::GLYPHS, UniformValue::Int(0));
        program.validate(backend)?;

        mesh.draw(backend)?;

        program.unbind(backend);
        font.texture.unbind(backend, 0);
        mesh.unbind(backend);
        Ok(())
    }

    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        if let Some(mut mesh) = self.mesh.take() {
            mesh.destroy(backend);
        }
    }
}
