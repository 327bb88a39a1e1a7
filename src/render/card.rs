use card_core::{CardFrame, Camera, CARD_HEIGHT, CARD_WIDTH};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CardGpuUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) time: f32,
    pub(crate) hover: f32,
    pub(crate) _pad: [f32; 2],
}

impl CardGpuUniforms {
    pub(crate) fn new(frame: &CardFrame, camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: frame.model_matrix().to_cols_array_2d(),
            time: frame.uniforms.time,
            hover: frame.uniforms.hover,
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CardVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

const CARD_VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

// Plane centered on the origin, facing +z. v grows upward.
fn card_vertices() -> [CardVertex; 4] {
    let hw = CARD_WIDTH * 0.5;
    let hh = CARD_HEIGHT * 0.5;
    [
        CardVertex {
            position: [-hw, -hh, 0.0],
            uv: [0.0, 0.0],
        },
        CardVertex {
            position: [hw, -hh, 0.0],
            uv: [1.0, 0.0],
        },
        CardVertex {
            position: [hw, hh, 0.0],
            uv: [1.0, 1.0],
        },
        CardVertex {
            position: [-hw, hh, 0.0],
            uv: [0.0, 1.0],
        },
    ]
}

const CARD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub(crate) struct CardResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) sampler: wgpu::Sampler,
}

impl CardResources {
    pub(crate) fn bind_group(
        &self,
        device: &wgpu::Device,
        texture_view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("card_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

pub(crate) fn create_card_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> CardResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("card_shader"),
        source: wgpu::ShaderSource::Wgsl(card_core::CARD_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("card_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("card_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("card_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_card"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<CardVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &CARD_VERTEX_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Both faces stay visible while the card tilts.
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_card"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("card_uniforms"),
        size: std::mem::size_of::<CardGpuUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("card_vertices"),
        contents: bytemuck::cast_slice(&card_vertices()),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("card_indices"),
        contents: bytemuck::cast_slice(&CARD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("card_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    CardResources {
        pipeline,
        bgl,
        uniform_buffer,
        vertex_buffer,
        index_buffer,
        index_count: CARD_INDICES.len() as u32,
        sampler,
    }
}
