//! A GPU backend with no device behind it.
//!
//! Every call is appended to [`NullBackend::calls`] and the backend keeps
//! just enough state (live handles, bindings, uniform values) to check
//! draws the way a real driver would. Used by the tests and by headless
//! runs.

use std::collections::{HashMap, HashSet};

use super::backend::{
    FilterMode, GpuBackend, MeshHandle, ProgramHandle, ProgramSource, TextureHandle,
    UniformLocation, UniformValue,
};
use crate::error::GpuError;
use crate::mesh::Vertex;
use crate::pixels::{PixelBuffer, PixelFormat};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CompileProgram { label: String, id: u32 },
    UniformLocation { program: u32, name: String },
    SetUniform { program: u32, location: u32, value: UniformValue },
    UseProgram(u32),
    ValidateProgram(u32),
    DeleteProgram(u32),
    CreateTexture { id: u32, width: u32, height: u32, format: PixelFormat, filter: FilterMode },
    BindTexture { unit: u32, texture: u32 },
    DeleteTexture(u32),
    CreateMesh { id: u32, vertices: usize, indices: usize },
    BindMesh(u32),
    DrawIndexed { program: u32, mesh: u32, index_count: u32 },
    DeleteMesh(u32),
    Clear([f32; 4]),
}

#[derive(Debug, Clone)]
struct ProgramRecord {
    label: String,
    samplers: Vec<String>,
    locations: HashMap<String, u32>,
    values: HashMap<u32, UniformValue>,
}

#[derive(Debug, Clone)]
struct MeshRecord {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

#[derive(Debug, Default)]
pub struct NullBackend {
    pub calls: Vec<BackendCall>,
    next_id: u32,
    programs: HashMap<u32, ProgramRecord>,
    textures: HashSet<u32>,
    meshes: HashMap<u32, MeshRecord>,
    bound_program: u32,
    bound_mesh: u32,
    bound_textures: HashMap<u32, u32>,
    fail_compile: HashSet<String>,
    fail_validation: HashSet<String>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `compile_program` fail for the given program label.
    pub fn fail_compile(mut self, label: &str) -> Self {
        self.fail_compile.insert(label.to_string());
        self
    }

    /// Makes `validate_program` fail for the given program label.
    pub fn fail_validation(&mut self, label: &str) {
        self.fail_validation.insert(label.to_string());
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    // ── Inspection ──

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn program_label(&self, id: u32) -> Option<&str> {
        self.programs.get(&id).map(|p| p.label.as_str())
    }

    /// Current value of a uniform, by program label and uniform name.
    pub fn uniform(&self, label: &str, name: &str) -> Option<UniformValue> {
        let program = self.programs.values().find(|p| p.label == label)?;
        let location = program.locations.get(name)?;
        program.values.get(location).copied()
    }

    pub fn mesh_data(&self, id: u32) -> Option<(&[Vertex], &[u32])> {
        self.meshes
            .get(&id)
            .map(|m| (m.vertices.as_slice(), m.indices.as_slice()))
    }

    /// Labels of the programs drawn with, in draw order.
    pub fn drawn_programs(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawIndexed { program, .. } => {
                    Some(self.program_label(*program).unwrap_or("<deleted>").to_string())
                }
                _ => None,
            })
            .collect()
    }

    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn label_of(&self, program: u32) -> String {
        self.program_label(program).unwrap_or("<unknown>").to_string()
    }
}

impl GpuBackend for NullBackend {
    fn compile_program(&mut self, source: &ProgramSource<'_>) -> Result<ProgramHandle, GpuError> {
        if self.fail_compile.contains(source.label) {
            return Err(GpuError::Compile {
                label: source.label.to_string(),
                stage: "fragment",
                log: "0:1: syntax error (injected)".to_string(),
            });
        }
        let id = self.allocate();
        self.programs.insert(
            id,
            ProgramRecord {
                label: source.label.to_string(),
                samplers: source.samplers.iter().map(|s| s.to_string()).collect(),
                locations: HashMap::new(),
                values: HashMap::new(),
            },
        );
        self.calls.push(BackendCall::CompileProgram {
            label: source.label.to_string(),
            id,
        });
        Ok(ProgramHandle::new(id))
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.calls.push(BackendCall::UniformLocation {
            program: program.raw(),
            name: name.to_string(),
        });
        let record = self.programs.get_mut(&program.raw())?;
        let next = record.locations.len() as u32;
        let location = *record.locations.entry(name.to_string()).or_insert(next);
        Some(UniformLocation(location))
    }

    fn set_uniform(&mut self, program: ProgramHandle, location: UniformLocation, value: UniformValue) {
        self.calls.push(BackendCall::SetUniform {
            program: program.raw(),
            location: location.0,
            value,
        });
        if let Some(record) = self.programs.get_mut(&program.raw()) {
            record.values.insert(location.0, value);
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(BackendCall::UseProgram(program.raw()));
        self.bound_program = program.raw();
    }

    fn validate_program(&mut self, program: ProgramHandle) -> Result<(), GpuError> {
        let id = program.raw();
        self.calls.push(BackendCall::ValidateProgram(id));

        let label = self.label_of(id);
        let fail = |reason: String| GpuError::Validation {
            label: label.clone(),
            reason,
        };

        let Some(record) = self.programs.get(&id) else {
            return Err(fail("program does not exist".into()));
        };
        if self.bound_program != id {
            return Err(fail("program is not current".into()));
        }
        if !self.meshes.contains_key(&self.bound_mesh) {
            return Err(fail("no vertex buffer bound".into()));
        }
        for name in &record.samplers {
            let unit = record
                .locations
                .get(name)
                .and_then(|l| record.values.get(l))
                .map(|v| match v {
                    UniformValue::Int(unit) => *unit as u32,
                    _ => 0,
                })
                .unwrap_or(0);
            let bound = self.bound_textures.get(&unit).copied().unwrap_or(0);
            if !self.textures.contains(&bound) {
                return Err(fail(format!("sampler `{name}` has no texture on unit {unit}")));
            }
        }
        if self.fail_validation.contains(&record.label) {
            return Err(fail("validation failure (injected)".into()));
        }
        Ok(())
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.calls.push(BackendCall::DeleteProgram(program.raw()));
        self.programs.remove(&program.raw());
        if self.bound_program == program.raw() {
            self.bound_program = 0;
        }
    }

    fn create_texture(&mut self, pixels: &PixelBuffer, filter: FilterMode) -> Result<TextureHandle, GpuError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(GpuError::Texture(format!(
                "empty {}x{} texture",
                pixels.width(),
                pixels.height()
            )));
        }
        let id = self.allocate();
        self.textures.insert(id);
        self.calls.push(BackendCall::CreateTexture {
            id,
            width: pixels.width(),
            height: pixels.height(),
            format: pixels.format(),
            filter,
        });
        Ok(TextureHandle::new(id))
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        self.calls.push(BackendCall::BindTexture {
            unit,
            texture: texture.raw(),
        });
        self.bound_textures.insert(unit, texture.raw());
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.calls.push(BackendCall::DeleteTexture(texture.raw()));
        self.textures.remove(&texture.raw());
    }

    fn create_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<MeshHandle, GpuError> {
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(GpuError::Buffer(format!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }
        let id = self.allocate();
        self.meshes.insert(
            id,
            MeshRecord {
                vertices: vertices.to_vec(),
                indices: indices.to_vec(),
            },
        );
        self.calls.push(BackendCall::CreateMesh {
            id,
            vertices: vertices.len(),
            indices: indices.len(),
        });
        Ok(MeshHandle::new(id))
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) {
        self.calls.push(BackendCall::BindMesh(mesh.raw()));
        self.bound_mesh = mesh.raw();
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), GpuError> {
        let Some(mesh) = self.meshes.get(&self.bound_mesh) else {
            return Err(GpuError::Draw("no mesh bound".into()));
        };
        if index_count as usize > mesh.indices.len() {
            return Err(GpuError::Draw(format!(
                "{index_count} indices requested, mesh has {}",
                mesh.indices.len()
            )));
        }
        if !self.programs.contains_key(&self.bound_program) {
            return Err(GpuError::Draw("no program bound".into()));
        }
        self.calls.push(BackendCall::DrawIndexed {
            program: self.bound_program,
            mesh: self.bound_mesh,
            index_count,
        });
        Ok(())
    }

    fn delete_mesh(&mut self, mesh: MeshHandle) {
        self.calls.push(BackendCall::DeleteMesh(mesh.raw()));
        self.meshes.remove(&mesh.raw());
        if self.bound_mesh == mesh.raw() {
            self.bound_mesh = 0;
        }
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.calls.push(BackendCall::Clear(color));
    }
}
