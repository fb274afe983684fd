//! BRDF Integration LUT
//!
//! The single-pass half of the split-sum approximation: one fixed-size 2D
//! target, one full-screen triangle, no bindings. Independent of the cube
//! convolution machinery — no mip chain, no per-slot parameters, no
//! offscreen indirection (the destination itself is render-attachable).

use std::borrow::Cow;

use crate::errors::Result;
use crate::target::{BAKE_FORMAT, BakedTexture};

/// Edge length of the BRDF LUT.
pub const BRDF_LUT_DIM: u32 = 512;

/// Pipeline producing the 2D BRDF integration lookup table.
pub struct BrdfLutGenerator {
    pipeline: wgpu::RenderPipeline,
}

impl BrdfLutGenerator {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("BRDF LUT Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("shaders/brdf_lut.wgsl"))),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("BRDF LUT Pipeline Layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("BRDF LUT Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
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

        Self { pipeline }
    }

    /// Renders the LUT in one pass and returns it.
    pub fn bake(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<BakedTexture> {
        let lut = BakedTexture::lut_2d(device, BRDF_LUT_DIM, "BRDF LUT");

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("BRDF LUT Encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("BRDF LUT Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &lut.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            pass.set_viewport(0.0, 0.0, BRDF_LUT_DIM as f32, BRDF_LUT_DIM as f32, 0.0, 1.0);
            pass.set_scissor_rect(0, 0, BRDF_LUT_DIM, BRDF_LUT_DIM);
            pass.set_pipeline(&self.pipeline);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));

        log::info!("BRDF LUT baked: {BRDF_LUT_DIM}x{BRDF_LUT_DIM}");

        Ok(lut)
    }
}
