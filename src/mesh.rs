//! Skybox Cube Mesh
//!
//! The reference unit cube rasterized once per (mip, face) pass. Only a
//! position attribute: the filter-cube vertex stage forwards the object-space
//! position as the sampling direction.

use crate::cube::FACE_COUNT;

/// Position-only unit cube with a draw entry point.
pub struct SkyboxMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl SkyboxMesh {
    /// Vertex layout of the filter-cube pipelines (location 0: position).
    pub const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    };

    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let h = 0.5f32;

        // 4 vertices per face, CCW winding
        let positions: [[f32; 3]; 24] = [
            // Front face (+Z)
            [-h, -h, h],
            [h, -h, h],
            [h, h, h],
            [-h, h, h],
            // Back face (-Z)
            [-h, -h, -h],
            [-h, h, -h],
            [h, h, -h],
            [h, -h, -h],
            // Top face (+Y)
            [-h, h, -h],
            [-h, h, h],
            [h, h, h],
            [h, h, -h],
            // Bottom face (-Y)
            [-h, -h, -h],
            [h, -h, -h],
            [h, -h, h],
            [-h, -h, h],
            // Right face (+X)
            [h, -h, -h],
            [h, h, -h],
            [h, h, h],
            [h, -h, h],
            // Left face (-X)
            [-h, -h, -h],
            [-h, -h, h],
            [-h, h, h],
            [-h, h, -h],
        ];

        let indices: Vec<u16> = (0..FACE_COUNT as u16)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base, base + 2, base + 3]
            })
            .collect();

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Skybox Vertex Buffer"),
            size: std::mem::size_of_val(&positions) as u64,
            usage: wgpu::BufferUsages::VERTEX,
            mapped_at_creation: true,
        });
        {
            let mut view = vertex_buffer.slice(..).get_mapped_range_mut();
            view.copy_from_slice(bytemuck::cast_slice(&positions));
        }
        vertex_buffer.unmap();

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Skybox Index Buffer"),
            size: (indices.len() * size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX,
            mapped_at_creation: true,
        });
        {
            let mut view = index_buffer.slice(..).get_mapped_range_mut();
            view.copy_from_slice(bytemuck::cast_slice(&indices));
        }
        index_buffer.unmap();

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Issues the one cube draw of a render slot. Pipeline and bind groups
    /// must already be set on the pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
