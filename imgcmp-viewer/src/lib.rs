//! imgcmp viewer: window, GPU backend and command line for the image
//! comparison viewer. The interaction and rendering logic lives in
//! `imgcmp-core`; this crate connects it to winit and wgpu.

pub mod cli;
pub mod gfx;
pub mod keyboard;
pub mod shell;
pub mod source;
pub mod util;
