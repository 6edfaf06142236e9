//! Render pipeline construction.
//!
//! WGSL goes through naga before wgpu sees it, so a bad shader becomes a
//! `GpuError::Compile` with a readable diagnostic instead of a device error.

use std::num::NonZeroU64;

use imgcmp_core::GpuError;
use imgcmp_core::mesh::Vertex;
use naga::valid::{Capabilities, ValidationFlags, Validator};
use wgpu::{BindGroupLayout, Device, RenderPipeline, TextureFormat};

/// Size of the per-program uniform block (see `common.wgsl`).
pub const UNIFORM_BLOCK_SIZE: usize = 128;

/// Parses and validates one WGSL stage.
pub fn check_wgsl(label: &str, stage: &'static str, source: &str) -> Result<(), GpuError> {
    let compile_error = |log: String| GpuError::Compile {
        label: label.to_string(),
        stage,
        log,
    };

    let module =
        naga::front::wgsl::parse_str(source).map_err(|e| compile_error(e.emit_to_string(source)))?;
    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| compile_error(e.emit_to_string(source)))?;
    Ok(())
}

/// Vertex attribute for a named shader input. Locations follow list order.
fn vertex_attributes(label: &str, names: &[&str]) -> Result<Vec<wgpu::VertexAttribute>, GpuError> {
    names
        .iter()
        .enumerate()
        .map(|(location, name)| {
            let (format, offset) = match *name {
                "position" => (wgpu::VertexFormat::Float32x3, 0),
                "uvs" => (wgpu::VertexFormat::Float32x2, 12),
                other => {
                    return Err(GpuError::Link {
                        label: label.to_string(),
                        reason: format!("unknown vertex attribute `{other}`"),
                    });
                }
            };
            Ok(wgpu::VertexAttribute {
                format,
                offset,
                shader_location: location as u32,
            })
        })
        .collect()
}

/// Group 0: the uniform block, read at a dynamic offset per draw.
pub fn uniform_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("uniforms-bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: NonZeroU64::new(UNIFORM_BLOCK_SIZE as u64),
            },
            count: None,
        }],
    })
}

/// Group 1: `count` texture + sampler pairs at bindings (2i, 2i + 1).
pub fn texture_layout(device: &Device, count: usize) -> BindGroupLayout {
    let entries: Vec<_> = (0..count as u32)
        .flat_map(|i| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * i,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * i + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        })
        .collect();

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("textures-bgl"),
        entries: &entries,
    })
}

/// Everything needed to build one program's pipeline.
pub struct PipelineSpec<'a> {
    pub label: &'a str,
    pub vertex: &'a str,
    pub fragment: &'a str,
    pub attributes: &'a [&'a str],
    pub uniforms: &'a BindGroupLayout,
    pub textures: Option<&'a BindGroupLayout>,
    pub format: TextureFormat,
}

pub fn build_pipeline(device: &Device, spec: &PipelineSpec<'_>) -> Result<RenderPipeline, GpuError> {
    check_wgsl(spec.label, "vertex", spec.vertex)?;
    check_wgsl(spec.label, "fragment", spec.fragment)?;
    let attributes = vertex_attributes(spec.label, spec.attributes)?;

    let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(spec.label),
        source: wgpu::ShaderSource::Wgsl(spec.vertex.into()),
    });
    let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(spec.label),
        source: wgpu::ShaderSource::Wgsl(spec.fragment.into()),
    });

    let mut groups = vec![spec.uniforms];
    groups.extend(spec.textures);

    // wgpu 28: push_constant_ranges removed, use immediate_size instead
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(spec.label),
        bind_group_layouts: &groups,
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: Vertex::STRIDE as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attributes,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: spec.format,
                // Porter-Duff over with premultiplied sources: ONE, ONE_MINUS_SRC_ALPHA
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });
    Ok(pipeline)
}
