use super::backend::{FilterMode, GpuBackend, TextureHandle};
use crate::error::GpuError;
use crate::pixels::PixelBuffer;

/// An owned 2D texture.
#[derive(Debug)]
pub struct Texture {
    handle: TextureHandle,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn upload(
        backend: &mut dyn GpuBackend,
        pixels: &PixelBuffer,
        filter: FilterMode,
    ) -> Result<Self, GpuError> {
        let handle = backend.create_texture(pixels, filter)?;
        tracing::debug!(
            id = handle.raw(),
            width = pixels.width(),
            height = pixels.height(),
            ?filter,
            "texture uploaded"
        );
        Ok(Self {
            handle,
            width: pixels.width(),
            height: pixels.height(),
        })
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_live(&self) -> bool {
        !self.handle.is_null()
    }

    pub fn bind(&self, backend: &mut dyn GpuBackend, unit: u32) {
        backend.bind_texture(unit, self.handle);
    }

    pub fn unbind(&self, backend: &mut dyn GpuBackend, unit: u32) {
        backend.bind_texture(unit, TextureHandle::NULL);
    }

    /// Releases the texture. Safe to call more than once.
    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        if self.handle.is_null() {
            return;
        }
        backend.delete_texture(self.handle);
        self.handle = TextureHandle::NULL;
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            tracing::warn!(id = self.handle.raw(), "texture dropped without destroy");
        }
    }
}
