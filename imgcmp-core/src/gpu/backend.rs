use crate::error::GpuError;
use crate::mesh::Vertex;
use crate::pixels::PixelBuffer;

macro_rules! handle_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// The "no resource" sentinel.
            pub const NULL: Self = Self(0);

            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u32 {
                self.0
            }

            pub const fn is_null(self) -> bool {
                self.0 == 0
            }
        }
    };
}

handle_type!(
    /// Backend program id. 0 is never a live program.
    ProgramHandle
);
handle_type!(
    /// Backend texture id. 0 is never a live texture.
    TextureHandle
);
handle_type!(
    /// Backend vertex/index buffer pair id. 0 is never a live mesh.
    MeshHandle
);

/// Backend-defined uniform slot inside one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    /// Sampler uniforms take the texture unit.
    Int(i32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([f32; 16]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Shader text plus the names the program binds.
///
/// `attributes` are bound to vertex locations in order. `samplers` list the
/// program's textures in binding order; each is a uniform that takes a unit.
#[derive(Debug, Clone, Copy)]
pub struct ProgramSource<'a> {
    pub label: &'a str,
    pub vertex: &'a str,
    pub fragment: &'a str,
    pub attributes: &'a [&'a str],
    pub samplers: &'a [&'a str],
}

/// The operations the renderer needs from a GPU.
///
/// Handles returned here are owned by the caller's resource wrappers, which
/// delete each handle exactly once. Binding `NULL` unbinds.
pub trait GpuBackend {
    // ── Programs ──
    fn compile_program(&mut self, source: &ProgramSource<'_>) -> Result<ProgramHandle, GpuError>;
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;
    fn set_uniform(&mut self, program: ProgramHandle, location: UniformLocation, value: UniformValue);
    fn use_program(&mut self, program: ProgramHandle);
    /// Checks the program can draw with the current bindings.
    fn validate_program(&mut self, program: ProgramHandle) -> Result<(), GpuError>;
    fn delete_program(&mut self, program: ProgramHandle);

    // ── Textures ──
    fn create_texture(&mut self, pixels: &PixelBuffer, filter: FilterMode) -> Result<TextureHandle, GpuError>;
    fn bind_texture(&mut self, unit: u32, texture: TextureHandle);
    fn delete_texture(&mut self, texture: TextureHandle);

    // ── Meshes ──
    fn create_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<MeshHandle, GpuError>;
    fn bind_mesh(&mut self, mesh: MeshHandle);
    fn draw_indexed(&mut self, index_count: u32) -> Result<(), GpuError>;
    fn delete_mesh(&mut self, mesh: MeshHandle);

    // ── Frame ──
    fn clear(&mut self, color: [f32; 4]);
}
