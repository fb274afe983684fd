//! Offscreen Multi-Pass Cube Convolution
//!
//! [`CubeFilter`] drives one convolution bake: for every (mip, face) slot it
//! renders the environment through the filter-cube vertex stage and the
//! kind-specific fragment stage into a dedicated single-mip, single-layer
//! view of a transient offscreen array, then assembles the final cube with
//! one region copy per mip.
//!
//! Pass traversal, viewport schedule and both index linearizations come from
//! [`MipChain`]; the encoder here only consumes them. Render-before-copy
//! ordering is guaranteed by recording everything into one command buffer.
//! All transient GPU objects (offscreen texture and views, parameter
//! buffers, bind group) drop at the end of [`CubeFilter::bake`] on every exit
//! path.

use std::borrow::Cow;

use crate::cube::CubeFace;
use crate::errors::Result;
use crate::mesh::SkyboxMesh;
use crate::mips::MipChain;
use crate::params::{self, FilterKind, VsParams};
use crate::target::{BAKE_FORMAT, BakedTexture};

/// Clear color of every offscreen slot pass.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.2,
    a: 0.0,
};

/// Render-pass convolution pipeline for one [`FilterKind`].
pub struct CubeFilter {
    kind: FilterKind,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl CubeFilter {
    #[must_use]
    pub fn new(device: &wgpu::Device, kind: FilterKind) -> Self {
        let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Filter Cube Vertex Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!(
                "shaders/filter_cube.wgsl"
            ))),
        });

        let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(match kind {
                FilterKind::Irradiance => "Irradiance Convolution Shader",
                FilterKind::Specular => "Prefilter Env Shader",
            }),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(match kind {
                FilterKind::Irradiance => include_str!("shaders/irradiance.wgsl"),
                FilterKind::Specular => include_str!("shaders/prefilter_env.wgsl"),
            })),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube Filter Layout"),
            entries: &[
                // Binding 0: per-slot MVP, addressed with a dynamic offset
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(size_of::<VsParams>() as u64),
                    },
                    count: None,
                },
                // Binding 1: per-slot filter scalars, same offset as binding 0
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(kind.fs_payload_size() as u64),
                    },
                    count: None,
                },
                // Binding 2: source environment cube
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                // Binding 3: environment sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Filter Pipeline Layout"),
            bind_group_layouts: &[Some(&bind_group_layout)],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(match kind {
                FilterKind::Irradiance => "Irradiance Cube Pipeline",
                FilterKind::Specular => "Prefiltered Cube Pipeline",
            }),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some("vs_main"),
                buffers: &[SkyboxMesh::VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: BAKE_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            kind,
            pipeline,
            bind_group_layout,
        }
    }

    #[must_use]
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Runs the full convolution and returns the assembled cube.
    ///
    /// Records all `mip_count * 6` slot passes followed by the per-mip region
    /// copies into a single command buffer and submits it once.
    pub fn bake(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        skybox: &SkyboxMesh,
        environment: &BakedTexture,
    ) -> Result<BakedTexture> {
        let chain = MipChain::new(self.kind.base_dim())?;

        let result = BakedTexture::cube(device, chain, self.kind.label());

        // Transient render target: same (mip count, layers, format) as the
        // result so every copy is same-size, same-format.
        let offscreen = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Cube Filter Offscreen Texture"),
            size: wgpu::Extent3d {
                width: chain.base_dim(),
                height: chain.base_dim(),
                depth_or_array_layers: 6,
            },
            mip_level_count: chain.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BAKE_FORMAT,
            usage: wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        // One attachment view per slot, stored at view_index (face-major).
        let mut slot_views = Vec::with_capacity(chain.slot_count() as usize);
        for face in CubeFace::ALL {
            for mip in 0..chain.mip_count() {
                debug_assert_eq!(slot_views.len() as u32, chain.view_index(mip, face));
                slot_views.push(offscreen.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("Cube Filter Offscreen View"),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    base_mip_level: mip,
                    mip_level_count: Some(1),
                    base_array_layer: face.index(),
                    array_layer_count: Some(1),
                    ..Default::default()
                }));
            }
        }

        let vs_buffer = create_uniform_buffer(
            device,
            "Cube Filter VS Params",
            &params::pack_vs_params(chain),
        );
        let fs_buffer = create_uniform_buffer(
            device,
            "Cube Filter FS Params",
            &params::pack_fs_params(self.kind, chain),
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Filter BindGroup"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &vs_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(size_of::<VsParams>() as u64),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &fs_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(self.kind.fs_payload_size() as u64),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&environment.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&environment.sampler),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Cube Filter Encoder"),
        });

        for slot in chain.render_slots() {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Filter Slot Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &slot_views[slot.view_index as usize],
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            // Must match this slot's mip extent, not the base dimension.
            pass.set_viewport(0.0, 0.0, slot.extent as f32, slot.extent as f32, 0.0, 1.0);
            pass.set_scissor_rect(0, 0, slot.extent, slot.extent);
            pass.set_pipeline(&self.pipeline);
            // Both uniform blocks are packed with the same stride, so one
            // offset value serves both dynamic bindings.
            pass.set_bind_group(0, &bind_group, &[slot.dynamic_offset, slot.dynamic_offset]);
            skybox.draw(&mut pass);
        }

        for region in chain.copy_regions() {
            encoder.copy_texture_to_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &offscreen,
                    mip_level: region.mip,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::TexelCopyTextureInfo {
                    texture: &result.texture,
                    mip_level: region.mip,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::Extent3d {
                    width: region.width,
                    height: region.height,
                    depth_or_array_layers: region.layers,
                },
            );
        }

        queue.submit(std::iter::once(encoder.finish()));

        log::info!(
            "{} baked: {} mips, {} render slots",
            self.kind.label(),
            chain.mip_count(),
            chain.slot_count()
        );

        Ok(result)
    }
}

fn create_uniform_buffer(device: &wgpu::Device, label: &str, data: &[u8]) -> wgpu::Buffer {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: data.len() as u64,
        usage: wgpu::BufferUsages::UNIFORM,
        mapped_at_creation: true,
    });
    {
        let mut view = buffer.slice(..).get_mapped_range_mut();
        view.copy_from_slice(data);
    }
    buffer.unmap();
    buffer
}
