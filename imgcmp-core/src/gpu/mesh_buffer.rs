use super::backend::{GpuBackend, MeshHandle};
use crate::error::GpuError;
use crate::mesh::MeshData;

/// An owned vertex + index buffer pair.
#[derive(Debug)]
pub struct MeshBuffer {
    handle: MeshHandle,
    index_count: u32,
}

impl MeshBuffer {
    pub fn upload(backend: &mut dyn GpuBackend, mesh: &MeshData) -> Result<Self, GpuError> {
        let index_count = u32::try_from(mesh.indices.len())
            .map_err(|_| GpuError::Buffer(format!("{} indices exceed u32", mesh.indices.len())))?;
        let handle = backend.create_mesh(&mesh.vertices, &mesh.indices)?;
        Ok(Self {
            handle,
            index_count,
        })
    }

    pub fn handle(&self) -> MeshHandle {
        self.handle
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_live(&self) -> bool {
        !self.handle.is_null()
    }

    pub fn bind(&self, backend: &mut dyn GpuBackend) {
        backend.bind_mesh(self.handle);
    }

    pub fn unbind(&self, backend: &mut dyn GpuBackend) {
        backend.bind_mesh(MeshHandle::NULL);
    }

    /// Draws every triangle in the buffer. The mesh must be bound.
    pub fn draw(&self, backend: &mut dyn GpuBackend) -> Result<(), GpuError> {
        backend.draw_indexed(self.index_count)
    }

    /// Releases both buffers. Safe to call more than once.
    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        if self.handle.is_null() {
            return;
        }
        backend.delete_mesh(self.handle);
        self.handle = MeshHandle::NULL;
    }
}

impl Drop for MeshBuffer {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            tracing::warn!(id = self.handle.raw(), "mesh dropped without destroy");
        }
    }
}
