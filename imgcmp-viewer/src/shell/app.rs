//! Application state and winit event loop.

use std::sync::Arc;

use imgcmp_core::renderer::RenderStyle;
use imgcmp_core::{FrameRenderer, ImagePair, InputState, PixelBuffer, ViewState, ViewerConfig};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::gfx::WgpuBackend;

// ════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════

/// The viewer. Owns the images, the view and every GPU object.
pub struct ViewerApp {
    // ── Inputs ──
    pub images: ImagePair,
    pub font_atlas: Option<PixelBuffer>,
    pub config: ViewerConfig,

    // ── Window + GPU ──
    pub window: Option<Arc<Window>>,
    pub backend: Option<WgpuBackend>,
    pub renderer: Option<FrameRenderer>,

    // ── Interaction ──
    pub view: ViewState,
    pub input: InputState,

    /// First fatal error; the loop exits once it is set.
    pub fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    pub fn new(images: ImagePair, font_atlas: Option<PixelBuffer>, config: ViewerConfig) -> Self {
        let input = InputState::new(config.help.visible, config.blend_step);
        Self {
            images,
            font_atlas,
            config,
            window: None,
            backend: None,
            renderer: None,
            view: ViewState::new(),
            input,
            fatal: None,
        }
    }

    pub fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Records the error and stops the loop. Later errors are logged only.
    pub fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        if self.fatal.is_some() {
            tracing::error!("{:#}", error);
        } else {
            self.fatal = Some(error);
        }
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let mut backend = WgpuBackend::new(window.clone())?;
        let renderer = FrameRenderer::new(
            &mut backend,
            &self.images,
            self.font_atlas.as_ref(),
            RenderStyle::from(&self.config),
        )?;
        if !renderer.has_help() {
            self.input.show_help = false;
        }

        self.view
            .set_device_pixel_scale(window.scale_factor() as f32);
        tracing::info!("window and GPU initialized");

        window.request_redraw();
        self.window = Some(window);
        self.backend = Some(backend);
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Draws and presents one frame.
    pub fn redraw(&mut self) -> anyhow::Result<()> {
        let (Some(backend), Some(renderer)) = (&mut self.backend, &mut self.renderer) else {
            return Ok(());
        };
        if let Some(window) = &self.window {
            self.view.set_device_pixel_scale(window.scale_factor() as f32);
        }

        let framebuffer = backend.framebuffer_size();
        if let Err(e) = renderer.render(backend, &self.view, self.input.show_help, framebuffer) {
            backend.discard_frame();
            return Err(e.into());
        }
        backend.present()?;
        Ok(())
    }

    /// Logs the pixel under the cursor.
    pub fn probe(&self, framebuffer: (f32, f32)) {
        let (tex_x, tex_y) = self.view.framebuffer_to_texture(framebuffer.0, framebuffer.1);
        let probe = self.images.probe(tex_x, tex_y, self.view.blend);
        match probe.rgba {
            Some([r, g, b, a]) => tracing::info!(
                "X,Y: {:.2} {:.2} ({}) RGBA: 0x{:02x} 0x{:02x} 0x{:02x} 0x{:02x}",
                tex_x,
                tex_y,
                probe.source,
                r,
                g,
                b,
                a
            ),
            None => tracing::info!(
                "X,Y: {:.2} {:.2} ({}) outside the image",
                tex_x,
                tex_y,
                probe.source
            ),
        }
    }

    fn release(&mut self) {
        if let (Some(renderer), Some(backend)) = (&mut self.renderer, &mut self.backend) {
            renderer.destroy(backend);
            tracing::debug!("GPU resources released");
        }
        self.renderer = None;
        self.backend = None;
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e.context("failed to initialize graphics"));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        super::events::handle_window_event(self, event_loop, event);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.release();
    }
}

// ════════════════════════════════════════════════════════════════════
// Entry Point
// ════════════════════════════════════════════════════════════════════

/// Opens the window and runs until it closes. Returns the first fatal error.
pub fn run(images: ImagePair, font_atlas: Option<PixelBuffer>, config: ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(images, font_atlas, config);
    event_loop.run_app(&mut app)?;

    // `exiting` is not guaranteed on every platform.
    app.release();

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
