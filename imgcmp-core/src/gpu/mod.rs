//! GPU resource layer.
//!
//! Sub-modules:
//!   backend     : the `GpuBackend` trait and raw handle types
//!   program     : compiled program + uniform location cache
//!   texture     : uploaded texture
//!   mesh_buffer : vertex + index buffer pair
//!   null        : recording backend with no device behind it

mod backend;
mod mesh_buffer;
pub mod null;
mod program;
mod texture;

pub use backend::{
    FilterMode, GpuBackend, MeshHandle, ProgramHandle, ProgramSource, TextureHandle,
    UniformLocation, UniformValue,
};
pub use mesh_buffer::MeshBuffer;
pub use null::{BackendCall, NullBackend};
pub use program::Program;
pub use texture::Texture;
