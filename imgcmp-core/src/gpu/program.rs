use std::collections::HashMap;

use super::backend::{GpuBackend, ProgramHandle, ProgramSource, UniformLocation, UniformValue};
use crate::error::GpuError;
use crate::transform::Affine2;

/// An owned, compiled program.
///
/// Uniform locations are resolved on first use and cached by name,
/// including names the program does not have.
#[derive(Debug)]
pub struct Program {
    handle: ProgramHandle,
    label: String,
    uniforms: HashMap<String, Option<UniformLocation>>,
}

impl Program {
    pub fn compile(backend: &mut dyn GpuBackend, source: &ProgramSource<'_>) -> Result<Self, GpuError> {
        let handle = backend.compile_program(source)?;
        tracing::debug!(label = source.label, id = handle.raw(), "program compiled");
        Ok(Self {
            handle,
            label: source.label.to_string(),
            uniforms: HashMap::new(),
        })
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_live(&self) -> bool {
        !self.handle.is_null()
    }

    pub fn bind(&self, backend: &mut dyn GpuBackend) {
        backend.use_program(self.handle);
    }

    pub fn unbind(&self, backend: &mut dyn GpuBackend) {
        backend.use_program(ProgramHandle::NULL);
    }

    /// Cached uniform lookup. Only the first call per name reaches the backend.
    pub fn location(&mut self, backend: &mut dyn GpuBackend, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniforms.get(name) {
            return *cached;
        }
        let location = backend.uniform_location(self.handle, name);
        if location.is_none() {
            tracing::debug!(program = %self.label, uniform = name, "uniform not found");
        }
        self.uniforms.insert(name.to_string(), location);
        location
    }

    /// Sets a uniform by name. Unknown names are ignored.
    pub fn set(&mut self, backend: &mut dyn GpuBackend, name: &str, value: UniformValue) {
        if let Some(location) = self.location(backend, name) {
            backend.set_uniform(self.handle, location, value);
        }
    }

    pub fn set_matrix(&mut self, backend: &mut dyn GpuBackend, name: &str, transform: &Affine2) {
        self.set(backend, name, UniformValue::Mat4(transform.to_upload_matrix()));
    }

    pub fn validate(&self, backend: &mut dyn GpuBackend) -> Result<(), GpuError> {
        backend.validate_program(self.handle)
    }

    /// Releases the program. Safe to call more than once.
    pub fn destroy(&mut self, backend: &mut dyn GpuBackend) {
        if self.handle.is_null() {
            return;
        }
        backend.delete_program(self.handle);
        self.handle = ProgramHandle::NULL;
        self.uniforms.clear();
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            tracing::warn!(program = %self.label, id = self.handle.raw(), "program dropped without destroy");
        }
    }
}
