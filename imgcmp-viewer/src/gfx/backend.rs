//! `GpuBackend` on wgpu.
//!
//! Programs are render pipelines plus a CPU copy of their uniform block.
//! Draw calls are recorded during the frame; each one snapshots the bound
//! program's block into a per-frame arena. `present()` uploads the arena
//! once and replays every draw in a single render pass, using dynamic
//! offsets into the arena.

use std::collections::HashMap;
use std::sync::Arc;

use imgcmp_core::gpu::{
    FilterMode, GpuBackend, MeshHandle, ProgramHandle, ProgramSource, TextureHandle,
    UniformLocation, UniformValue,
};
use imgcmp_core::mesh::Vertex;
use imgcmp_core::{GpuError, PixelBuffer, PixelFormat};
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::pipeline::{self, PipelineSpec, UNIFORM_BLOCK_SIZE};
use super::state::GpuState;

// ════════════════════════════════════════════════════════════════════
// Uniform block layout
// ════════════════════════════════════════════════════════════════════

/// Locations with this bit set name a sampler (low bits: sampler index).
const SAMPLER_BIT: u32 = 0x8000_0000;

/// (offset, size) of each named field in the uniform block.
fn block_field(name: &str) -> Option<(usize, usize)> {
    match name {
        "modelview" => Some((0, 64)),
        "color" => Some((64, 16)),
        "background" => Some((80, 16)),
        "grid" => Some((96, 16)),
        "blend" => Some((112, 4)),
        _ => None,
    }
}

fn field_size_at(offset: usize) -> Option<usize> {
    ["modelview", "color", "background", "grid", "blend"]
        .into_iter()
        .filter_map(block_field)
        .find(|(o, _)| *o == offset)
        .map(|(_, size)| size)
}

fn align_up(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

// ════════════════════════════════════════════════════════════════════
// Resource tables
// ════════════════════════════════════════════════════════════════════

struct ProgramEntry {
    label: String,
    pipeline: wgpu::RenderPipeline,
    samplers: Vec<String>,
    /// Texture unit per sampler, set through sampler uniforms.
    sampler_units: Vec<u32>,
    block: [u8; UNIFORM_BLOCK_SIZE],
}

struct TextureEntry {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

struct MeshEntry {
    vertices: Buffer,
    indices: Buffer,
    index_count: u32,
}

struct DrawCommand {
    program: u32,
    mesh: u32,
    textures: Vec<u32>,
    uniform_offset: u32,
    index_count: u32,
}

#[derive(Default)]
struct FrameRecording {
    clear: Option<[f32; 4]>,
    draws: Vec<DrawCommand>,
    uniforms: Vec<u8>,
}

/// Uniform buffer that grows to fit the largest frame seen so far.
struct UniformArena {
    buffer: Buffer,
    bind_group: BindGroup,
    capacity: u64,
}

impl UniformArena {
    fn new(device: &Device, layout: &BindGroupLayout, capacity: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform-arena"),
            size: capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform-arena-bg"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: std::num::NonZeroU64::new(UNIFORM_BLOCK_SIZE as u64),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            capacity,
        }
    }

    fn ensure(&mut self, device: &Device, layout: &BindGroupLayout, needed: u64) {
        if needed > self.capacity {
            let capacity = needed.next_power_of_two();
            tracing::debug!(capacity, "growing uniform arena");
            *self = Self::new(device, layout, capacity);
        }
    }
}

// ════════════════════════════════════════════════════════════════════
// Backend
// ════════════════════════════════════════════════════════════════════

pub struct WgpuBackend {
    gpu: GpuState,
    uniform_layout: BindGroupLayout,
    /// Keyed by sampler count.
    texture_layouts: HashMap<usize, BindGroupLayout>,
    arena: UniformArena,
    /// Distance between two draws' uniform blocks in the arena.
    uniform_stride: u64,

    next_id: u32,
    programs: HashMap<u32, ProgramEntry>,
    textures: HashMap<u32, TextureEntry>,
    meshes: HashMap<u32, MeshEntry>,

    bound_program: u32,
    bound_mesh: u32,
    bound_textures: HashMap<u32, u32>,

    frame: FrameRecording,
}

impl WgpuBackend {
    pub fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gpu = GpuState::new(window)?;
        let uniform_layout = pipeline::uniform_layout(&gpu.device);
        let alignment = u64::from(gpu.device.limits().min_uniform_buffer_offset_alignment);
        let uniform_stride = align_up(UNIFORM_BLOCK_SIZE as u64, alignment);
        let arena = UniformArena::new(&gpu.device, &uniform_layout, uniform_stride * 16);

        Ok(Self {
            gpu,
            uniform_layout,
            texture_layouts: HashMap::new(),
            arena,
            uniform_stride,
            next_id: 0,
            programs: HashMap::new(),
            textures: HashMap::new(),
            meshes: HashMap::new(),
            bound_program: 0,
            bound_mesh: 0,
            bound_textures: HashMap::new(),
            frame: FrameRecording::default(),
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.gpu.framebuffer_size()
    }

    /// Drops everything recorded since the last `present`.
    pub fn discard_frame(&mut self) {
        self.frame = FrameRecording::default();
    }

    /// Submits the recorded frame. Returns false when the frame was skipped.
    pub fn present(&mut self) -> anyhow::Result<bool> {
        let frame = std::mem::take(&mut self.frame);
        let Some(output) = self.gpu.acquire()? else {
            return Ok(false);
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.arena
            .ensure(&self.gpu.device, &self.uniform_layout, frame.uniforms.len() as u64);
        if !frame.uniforms.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.arena.buffer, 0, &frame.uniforms);
        }

        let mut texture_groups: HashMap<Vec<u32>, BindGroup> = HashMap::new();
        for draw in &frame.draws {
            if !draw.textures.is_empty() && !texture_groups.contains_key(&draw.textures) {
                let group = self.texture_bind_group(&draw.textures)?;
                texture_groups.insert(draw.textures.clone(), group);
            }
        }

        let [r, g, b, a] = frame.clear.unwrap_or([0.0, 0.0, 0.0, 1.0]);
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for draw in &frame.draws {
                let (Some(program), Some(mesh)) =
                    (self.programs.get(&draw.program), self.meshes.get(&draw.mesh))
                else {
                    tracing::warn!(program = draw.program, mesh = draw.mesh, "draw skipped: resource deleted mid-frame");
                    continue;
                };
                pass.set_pipeline(&program.pipeline);
                pass.set_bind_group(0, &self.arena.bind_group, &[draw.uniform_offset]);
                if let Some(group) = texture_groups.get(&draw.textures) {
                    pass.set_bind_group(1, group, &[]);
                }
                pass.set_vertex_buffer(0, mesh.vertices.slice(..));
                pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        tracing::trace!(draws = frame.draws.len(), "frame presented");
        Ok(true)
    }

    fn texture_bind_group(&self, textures: &[u32]) -> anyhow::Result<BindGroup> {
        let layout = self
            .texture_layouts
            .get(&textures.len())
            .ok_or_else(|| anyhow::anyhow!("no layout for {} textures", textures.len()))?;

        let mut entries = Vec::with_capacity(textures.len() * 2);
        for (i, id) in textures.iter().enumerate() {
            let entry = self
                .textures
                .get(id)
                .ok_or(GpuError::UnknownHandle { kind: "texture", id: *id })?;
            entries.push(wgpu::BindGroupEntry {
                binding: 2 * i as u32,
                resource: wgpu::BindingResource::TextureView(&entry.view),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: 2 * i as u32 + 1,
                resource: wgpu::BindingResource::Sampler(&entry.sampler),
            });
        }

        Ok(self.gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("textures-bg"),
            layout,
            entries: &entries,
        }))
    }

    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Texture ids for each of the program's samplers, in binding order.
    fn sampler_textures(&self, program: &ProgramEntry) -> Result<Vec<u32>, String> {
        program
            .samplers
            .iter()
            .zip(&program.sampler_units)
            .map(|(name, unit)| {
                self.bound_textures
                    .get(unit)
                    .copied()
                    .filter(|id| self.textures.contains_key(id))
                    .ok_or_else(|| format!("sampler `{name}` has no texture on unit {unit}"))
            })
            .collect()
    }
}

impl GpuBackend for WgpuBackend {
    // ── Programs ──

    fn compile_program(&mut self, source: &ProgramSource<'_>) -> Result<ProgramHandle, GpuError> {
        let sampler_count = source.samplers.len();
        if sampler_count > 0 && !self.texture_layouts.contains_key(&sampler_count) {
            let layout = pipeline::texture_layout(&self.gpu.device, sampler_count);
            self.texture_layouts.insert(sampler_count, layout);
        }

        let pipeline = pipeline::build_pipeline(
            &self.gpu.device,
            &PipelineSpec {
                label: source.label,
                vertex: source.vertex,
                fragment: source.fragment,
                attributes: source.attributes,
                uniforms: &self.uniform_layout,
                textures: self.texture_layouts.get(&sampler_count),
                format: self.gpu.format,
            },
        )?;

        let id = self.allocate();
        self.programs.insert(
            id,
            ProgramEntry {
                label: source.label.to_string(),
                pipeline,
                samplers: source.samplers.iter().map(|s| s.to_string()).collect(),
                sampler_units: (0..sampler_count as u32).collect(),
                block: [0; UNIFORM_BLOCK_SIZE],
            },
        );
        Ok(ProgramHandle::new(id))
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let entry = self.programs.get(&program.raw())?;
        if let Some(index) = entry.samplers.iter().position(|s| s == name) {
            return Some(UniformLocation(SAMPLER_BIT | index as u32));
        }
        block_field(name).map(|(offset, _)| UniformLocation(offset as u32))
    }

    fn set_uniform(&mut self, program: ProgramHandle, location: UniformLocation, value: UniformValue) {
        let Some(entry) = self.programs.get_mut(&program.raw()) else {
            return;
        };

        if location.0 & SAMPLER_BIT != 0 {
            let index = (location.0 & !SAMPLER_BIT) as usize;
            match (value, entry.sampler_units.get_mut(index)) {
                (UniformValue::Int(unit), Some(slot)) if unit >= 0 => *slot = unit as u32,
                _ => tracing::warn!(program = %entry.label, ?value, "bad sampler uniform"),
            }
            return;
        }

        let offset = location.0 as usize;
        let bytes: &[u8] = match &value {
            UniformValue::Float(v) => bytemuck::bytes_of(v),
            UniformValue::Int(v) => bytemuck::bytes_of(v),
            UniformValue::Vec3(v) => bytemuck::cast_slice(v),
            UniformValue::Vec4(v) => bytemuck::cast_slice(v),
            UniformValue::Mat4(v) => bytemuck::cast_slice(v),
        };
        match field_size_at(offset) {
            Some(size) if bytes.len() <= size => {
                entry.block[offset..offset + bytes.len()].copy_from_slice(bytes);
            }
            _ => tracing::warn!(program = %entry.label, offset, ?value, "uniform type mismatch"),
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.bound_program = program.raw();
    }

    fn validate_program(&mut self, program: ProgramHandle) -> Result<(), GpuError> {
        let id = program.raw();
        let Some(entry) = self.programs.get(&id) else {
            return Err(GpuError::UnknownHandle { kind: "program", id });
        };
        let fail = |reason: String| GpuError::Validation {
            label: entry.label.clone(),
            reason,
        };

        if self.bound_program != id {
            return Err(fail("program is not current".into()));
        }
        if !self.meshes.contains_key(&self.bound_mesh) {
            return Err(fail("no vertex buffer bound".into()));
        }
        self.sampler_textures(entry).map_err(fail)?;
        Ok(())
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.programs.remove(&program.raw());
        if self.bound_program == program.raw() {
            self.bound_program = 0;
        }
    }

    // ── Textures ──

    fn create_texture(&mut self, pixels: &PixelBuffer, filter: FilterMode) -> Result<TextureHandle, GpuError> {
        let (width, height) = pixels.dimensions();
        let max = self.gpu.device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(GpuError::Texture(format!(
                "{width}x{height} is outside the supported 1..={max} range"
            )));
        }

        let format = match pixels.format() {
            PixelFormat::Rgba8 => wgpu::TextureFormat::Rgba8Unorm,
            PixelFormat::Gray8 => wgpu::TextureFormat::R8Unorm,
        };
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("image-texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pixels.stride() as u32),
                rows_per_image: Some(height),
            },
            size,
        );

        let filter = match filter {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        };
        let sampler = self.gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let id = self.allocate();
        self.textures.insert(
            id,
            TextureEntry {
                _texture: texture,
                view,
                sampler,
            },
        );
        Ok(TextureHandle::new(id))
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        if texture.is_null() {
            self.bound_textures.remove(&unit);
        } else {
            self.bound_textures.insert(unit, texture.raw());
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.textures.remove(&texture.raw());
    }

    // ── Meshes ──

    fn create_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<MeshHandle, GpuError> {
        if indices.is_empty() {
            return Err(GpuError::Buffer("mesh has no indices".into()));
        }
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(GpuError::Buffer(format!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }

        let device = &self.gpu.device;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh-vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh-indices"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let id = self.allocate();
        self.meshes.insert(
            id,
            MeshEntry {
                vertices: vertex_buffer,
                indices: index_buffer,
                index_count: indices.len() as u32,
            },
        );
        Ok(MeshHandle::new(id))
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) {
        self.bound_mesh = mesh.raw();
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), GpuError> {
        let mesh = self
            .meshes
            .get(&self.bound_mesh)
            .ok_or_else(|| GpuError::Draw("no mesh bound".into()))?;
        if index_count > mesh.index_count {
            return Err(GpuError::Draw(format!(
                "{index_count} indices requested, mesh has {}",
                mesh.index_count
            )));
        }
        let program = self
            .programs
            .get(&self.bound_program)
            .ok_or_else(|| GpuError::Draw("no program bound".into()))?;
        let textures = self.sampler_textures(program).map_err(GpuError::Draw)?;

        let offset = self.frame.uniforms.len();
        self.frame.uniforms.extend_from_slice(&program.block);
        self.frame
            .uniforms
            .resize(offset + self.uniform_stride as usize, 0);

        self.frame.draws.push(DrawCommand {
            program: self.bound_program,
            mesh: self.bound_mesh,
            textures,
            uniform_offset: offset as u32,
            index_count,
        });
        Ok(())
    }

    fn delete_mesh(&mut self, mesh: MeshHandle) {
        self.meshes.remove(&mesh.raw());
        if self.bound_mesh == mesh.raw() {
            self.bound_mesh = 0;
        }
    }

    // ── Frame ──

    fn clear(&mut self, color: [f32; 4]) {
        self.frame.clear = Some(color);
    }
}
