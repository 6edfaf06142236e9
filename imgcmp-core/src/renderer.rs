//! Per-frame orchestration.
//!
//! Frame order: clear → checkerboard grid → image (single or diff) → help
//! text. All GPU access goes through [`GpuBackend`]; the renderer owns
//! every resource it creates and releases them in `destroy`.

use crate::blend::{self, DiffVariant};
use crate::config::{GridConfig, HelpConfig, ViewerConfig};
use crate::error::CoreError;
use crate::gpu::{FilterMode, GpuBackend, Program, Texture, UniformValue};
use crate::pixels::{ImagePair, PixelBuffer};
use crate::scene::{Font, ImageQuad, TextString, TextStyle};
use crate::shaders;
use crate::transform::Affine2;
use crate::view::ViewState;

pub const HELP_LINES: [&str; 8] = [
    "h: toggle this help",
    "1: show only A",
    "2: show only B",
    "3: show diff A&B",
    "<up>,<down>: go from A to B",
    "[]: zoom in/out (also mouse wheel)",
    "Z: reset zoom/view",
    "ESC: quit",
];

// ════════════════════════════════════════════════════════════════════
// Program table
// ════════════════════════════════════════════════════════════════════

/// One slot per program the renderer compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Grid,
    Single,
    Diff(DiffVariant),
}

impl Pass {
    pub const ALL: [Pass; 6] = [
        Pass::Grid,
        Pass::Single,
        Pass::Diff(DiffVariant::HighlightA),
        Pass::Diff(DiffVariant::AToDistance),
        Pass::Diff(DiffVariant::DistanceToB),
        Pass::Diff(DiffVariant::HighlightB),
    ];

    fn slot(self) -> usize {
        match self {
            Pass::Grid => 0,
            Pass::Single => 1,
            Pass::Diff(variant) => 2 + variant.index(),
        }
    }
}

/// Style values the renderer reads each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub clear_color: [f32; 4],
    pub grid: GridConfig,
    pub help: HelpConfig,
    pub glyphs_per_row: u32,
}

impl From<&ViewerConfig> for RenderStyle {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            clear_color: config.clear_color,
            grid: config.grid.clone(),
            help: config.help.clone(),
            glyphs_per_row: config.font.glyphs_per_row,
        }
    }
}

#[derive(Debug)]
struct HelpOverlay {
    font: Font,
    lines: Vec<TextString>,
}

// ════════════════════════════════════════════════════════════════════
// Frame Renderer
// ════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct FrameRenderer {
    /// Indexed by `Pass::slot`.
    programs: Vec<Program>,
    /// Image A, then image B in diff mode.
    textures: Vec<Texture>,
    overlay: Option<HelpOverlay>,
    quad: ImageQuad,
    style: RenderStyle,
    diff: bool,
}

impl FrameRenderer {
    /// Compiles every program and uploads the images, the optional glyph
    /// atlas and the image quad. On failure, whatever was created is
    /// released before the error is returned.
    pub fn new(
        backend: &mut dyn GpuBackend,
        images: &ImagePair,
        font_atlas: Option<&PixelBuffer>,
        style: RenderStyle,
    ) -> Result<Self, CoreError> {
        let (width, height) = images.a.dimensions();
        let mut renderer = Self {
            programs: Vec::with_capacity(Pass::ALL.len()),
            textures: Vec::with_capacity(2),
            overlay: None,
            quad: ImageQuad::new(width, height),
            style,
            diff: images.is_diff(),
        };

        if let Err(e) = renderer.acquire(backend, images, font_atlas) {
            renderer.destroy(backend);
            return Err(e);
        }
        Ok(renderer)
    }

    fn acquire(
        &mut self,
        backend: &mut dyn GpuBackend,
        images: &ImagePair,
        font_atlas: Option<&PixelBuffer>,
    ) -> Result<(), CoreError> {
        for pass in Pass::ALL {
            let source = match pass {
                Pass::Grid => shaders::grid(),
                Pass::Single => shaders::single(),
                Pass::Diff(variant) => shaders::diff(variant),
            };
            self.programs.push(Program::compile(backend, &source)?);
        }

        self.textures
            .push(Texture::upload(backend, &images.a, FilterMode::Nearest)?);
        if let Some(b) = &images.b {
            self.textures
                .push(Texture::upload(backend, b, FilterMode::Nearest)?);
        }

        if let Some(atlas) = font_atlas {
            let font = Font::load(backend, atlas, self.style.glyphs_per_row)?;
            let overlay = self.overlay.insert(HelpOverlay {
                font,
                lines: Vec::with_capacity(HELP_LINES.len()),
            });
            for line in HELP_LINES {
                let mut text = overlay.font.text(line)?;
                text.ensure_mesh(backend, &overlay.font)?;
                overlay.lines.push(text);
            }
        }

        self.quad.ensure_mesh(backend)?;
        tracing::info!(
            programs = self.programs.len(),
            textures = self.textures.len(),
            help = self.overlay.is_some(),
            "renderer ready"
        );
        Ok(())
    }

    pub fn is_diff(&self) -> bool {
        self.diff
    }

    pub fn has_help(&self) -> bool {
        self.overlay.is_some()
    }

    /// Which program the image pass uses for this view.
    pub fn image_pass(&self, view: &ViewState) -> Pass {
        if self.diff {
            Pass::Diff(blend::select(view.blend).variant)
        } else {
            Pass::Single
        }
    }

    /// Draws one frame into a `width × height` framebuffer.
    pub fn render(
        &mut self,
        backend: &mut dyn GpuBackend,
        view: &ViewState,
        show_help: bool,
        framebuffer: (u32, u32),
    ) -> Result<(), CoreError> {
        let (fb_width, fb_height) = framebuffer;
        if fb_width == 0 || fb_height == 0 {
            return Ok(());
        }

        backend.clear(self.style.clear_color);

        let viewport = Affine2::viewport(fb_width as f32, fb_height as f32);
        let model_view = view.model_view(&viewport);
        let (tex_width, tex_height) = self.quad.size();
        let image_pass = self.image_pass(view);

        let mesh = self.quad.ensure_mesh(backend)?;
        mesh.bind(backend);

        // ── Checkerboard ──
        let grid = &mut self.programs[Pass::Grid.slot()];
        grid.bind(backend);
        grid.set_matrix(backend, shaders::MODELVIEW, &model_view);
        grid.set(backend, shaders::COLOR, UniformValue::Vec4(self.style.grid.dark));
        grid.set(backend, shaders::BACKGROUND, UniformValue::Vec4(self.style.grid.light));
        grid.set(
            backend,
            shaders::GRID,
            UniformValue::Vec3([
                tex_width as f32,
                tex_height as f32,
                self.style.grid.block_size / view.zoom,
            ]),
        );
        grid.validate(backend)?;
        mesh.draw(backend)?;

        // ── Image ──
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(backend, unit as u32);
        }
        let program = &mut self.programs[image_pass.slot()];
        program.bind(backend);
        program.set_matrix(backend, shaders::MODELVIEW, &model_view);
        program.set(backend, shaders::IMAGE_A, UniformValue::Int(0));
        match image_pass {
            Pass::Diff(_) => {
                program.set(backend, shaders::IMAGE_B, UniformValue::Int(1));
                let selection = blend::select(view.blend);
                program.set(backend, shaders::BLEND, UniformValue::Float(selection.value));
            }
            _ => program.set(backend, shaders::BLEND, UniformValue::Float(view.blend)),
        }
        program.validate(backend)?;
        mesh.draw(backend)?;

        program.unbind(backend);
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.unbind(backend, unit as u32);
        }
        mesh.unbind(backend);

        // ── Help ──
        if show_help {
            if let Some(overlay) = &mut self.overlay {
                let help = &self.style.help;
                let style = TextStyle {
                    color: help.color,
                    background: help.background,
                    scale: help.scale,
                };
                for (i, line) in overlay.lines.iter_mut().enumerate() {
                    let y = help.top + i as f32 * help.line_spacing;
                    line.draw(backend, &mut overlay.font, &style, &viewport, help.left, y)?;
                }
            }
        }
        Ok(())
    }

    /// Releases everything: help strings, font, image textures, programs,
    /// then the image quad. Safe to call more than once.
    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        if let Some(mut overlay) = self.overlay.take() {
            for line in &mut overlay.lines {
                line.destroy(backend);
            }
            overlay.font.destroy(backend);
        }
        for texture in &mut self.textures {
            texture.destroy(backend);
        }
        for program in &mut self.programs {
            program.destroy(backend);
        }
        self.quad.destroy(backend);
    }
}
