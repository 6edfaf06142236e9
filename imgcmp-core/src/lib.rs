//! imgcmp core library.
//!
//! Everything the viewer needs that does not touch a window or a device:
//! the coordinate model, input commands, blend selection, glyph layout,
//! mesh generation, pixel buffers, configuration, and a frame renderer
//! that talks to the GPU only through the [`gpu::GpuBackend`] trait.

pub mod blend;
pub mod config;
pub mod error;
pub mod glyph;
pub mod gpu;
pub mod input;
pub mod mesh;
pub mod pixels;
pub mod renderer;
pub mod scene;
pub mod shaders;
pub mod transform;
pub mod view;

// Re-export the types the viewer touches every frame
pub use blend::{BlendSelection, DiffVariant};
pub use config::ViewerConfig;
pub use error::{CoreError, GpuError};
pub use input::{Command, InputState, Response};
pub use pixels::{ImagePair, PixelBuffer, PixelFormat};
pub use renderer::FrameRenderer;
pub use transform::Affine2;
pub use view::ViewState;
