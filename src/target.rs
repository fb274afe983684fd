//! Baked Texture Outputs
//!
//! [`BakedTexture`] is the opaque (texture, view, sampler) triple handed to
//! the caller for each precomputed asset. Ownership transfers fully on
//! return; the bake pipelines keep no reference.

use crate::mips::MipChain;

/// Pixel format of every baked asset. The offscreen array and the result
/// cube must share it so region copies are same-size, same-format.
pub const BAKE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// A precomputed GPU texture with its default view and sampler.
pub struct BakedTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl BakedTexture {
    /// Creates the mip-mapped result cube for a convolution bake. It is only
    /// ever written through region copies, never as a render attachment.
    #[must_use]
    pub fn cube(device: &wgpu::Device, chain: MipChain, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: chain.base_dim(),
                height: chain.base_dim(),
                depth_or_array_layers: 6,
            },
            mip_level_count: chain.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BAKE_FORMAT,
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let sampler = Self::create_sampler(device, label, chain.mip_count() as f32);

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates a single-mip 2D render target that doubles as the final
    /// output (the BRDF LUT needs no offscreen indirection).
    #[must_use]
    pub fn lut_2d(device: &wgpu::Device, dim: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: dim,
                height: dim,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BAKE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::D2),
            ..Default::default()
        });

        let sampler = Self::create_sampler(device, label, 1.0);

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Uploads a single-mip environment cube with one flat color per face.
    /// Good enough as a bake source for demos and device tests.
    #[must_use]
    pub fn environment_cube(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dim: u32,
        face_colors: [[u8; 4]; 6],
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Environment Cube"),
            size: wgpu::Extent3d {
                width: dim,
                height: dim,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BAKE_FORMAT,
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let texel_count = (dim * dim) as usize;
        for (layer, color) in face_colors.iter().enumerate() {
            let mut pixels = Vec::with_capacity(texel_count * 4);
            for _ in 0..texel_count {
                pixels.extend_from_slice(color);
            }
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(dim * 4),
                    rows_per_image: Some(dim),
                },
                wgpu::Extent3d {
                    width: dim,
                    height: dim,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Environment Cube View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let sampler = Self::create_sampler(device, "Environment Cube", 1.0);

        Self {
            texture,
            view,
            sampler,
        }
    }

    fn create_sampler(device: &wgpu::Device, label: &str, lod_max_clamp: f32) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            lod_min_clamp: 0.0,
            lod_max_clamp,
            ..Default::default()
        })
    }
}
