use wgpu::util::DeviceExt;

use crate::compile::{compile_blur_fragment, compile_dot_fragment, compile_vertex_shader};
use crate::types::RendererError;

/// Bind group layouts shared across program builds and target recreation.
///
/// Both programs take their uniform block at set 0 through the same layout;
/// the blur program additionally samples its source target through set 1.
pub(crate) struct PipelineLayouts {
    pub uniform_layout: wgpu::BindGroupLayout,
    pub blur_source_layout: wgpu::BindGroupLayout,
}

impl PipelineLayouts {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let blur_source_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blur source layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            uniform_layout,
            blur_source_layout,
        }
    }
}

/// A linked program: the render pipeline for one full-screen pass.
pub(crate) struct ShaderProgram {
    pub pipeline: wgpu::RenderPipeline,
}

/// The two programs built at mount and reused every frame.
pub(crate) struct Programs {
    pub dot: ShaderProgram,
    pub blur: ShaderProgram,
}

/// Compiles both fragment stages and the shared vertex stage, then links the
/// two pipelines. The stage modules drop at the end of this function; the
/// linked pipelines stand alone.
pub(crate) fn build_programs(
    device: &wgpu::Device,
    layouts: &PipelineLayouts,
    surface_format: wgpu::TextureFormat,
) -> Result<Programs, RendererError> {
    let vertex = compile_vertex_shader(device)?;
    let dot_fragment = compile_dot_fragment(device)?;
    let blur_fragment = compile_blur_fragment(device)?;

    let dot = ShaderProgram::build(
        device,
        "dot field program",
        &[&layouts.uniform_layout],
        &vertex,
        &dot_fragment,
        surface_format,
    )?;
    let blur = ShaderProgram::build(
        device,
        "separable blur program",
        &[&layouts.uniform_layout, &layouts.blur_source_layout],
        &vertex,
        &blur_fragment,
        surface_format,
    )?;

    Ok(Programs { dot, blur })
}

/// Clip-space corners of the shared full-screen quad, drawn as a two-triangle
/// strip. The position attribute sits at shader location 0 in every program,
/// so this single buffer serves all draws without rebinding per program.
pub(crate) const QUAD_VERTICES: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];

pub(crate) fn create_quad_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("fullscreen quad"),
        contents: bytemuck::cast_slice(&QUAD_VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

fn quad_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    }];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

impl ShaderProgram {
    /// Assembles a full-screen pass pipeline, verifying the link under a
    /// validation scope so a mismatch between stages and layouts surfaces as
    /// [`RendererError::ProgramLink`] with the driver diagnostic attached.
    fn build(
        device: &wgpu::Device,
        label: &'static str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_module: &wgpu::ShaderModule,
        fragment_module: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, RendererError> {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: vertex_module,
                entry_point: Some("main"),
                buffers: &[quad_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RendererError::ProgramLink {
                label,
                message: error.to_string(),
            });
        }

        Ok(Self { pipeline })
    }
}
