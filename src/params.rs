//! Parameter Block Packer
//!
//! Builds the two flat uniform-buffer images consumed by the offscreen loop:
//! one vertex-stage record (MVP matrix) and one fragment-stage record
//! (filter-specific scalars) per render slot, each padded to
//! [`UNIFORM_STRIDE`] and ordered by `param_index`.
//!
//! Both blocks are packed with the same stride on purpose: it lets a single
//! dynamic-offset value per slot serve both bindings. The `const` assertions
//! below make that coupling explicit instead of an accident of the chosen
//! payload sizes.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

use crate::cube::{face_matrices, face_projection};
use crate::mips::MipChain;

/// Record stride in both parameter buffers. Equals the minimum
/// uniform-buffer dynamic-offset alignment guaranteed by WebGPU.
pub const UNIFORM_STRIDE: usize = 256;

/// Azimuthal sampling step of the irradiance convolution.
pub const DELTA_PHI: f32 = (2.0 * PI) / 180.0;

/// Polar sampling step of the irradiance convolution.
pub const DELTA_THETA: f32 = (0.5 * PI) / 64.0;

/// Importance samples per texel of the specular prefilter.
pub const SPECULAR_SAMPLE_COUNT: u32 = 32;

/// Base face resolution of the irradiance cube (7 mips).
pub const IRRADIANCE_CUBE_DIM: u32 = 64;

/// Base face resolution of the prefiltered specular cube (10 mips).
pub const PREFILTERED_CUBE_DIM: u32 = 512;

/// Vertex-stage record: the per-slot MVP.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct VsParams {
    pub mvp: [[f32; 4]; 4],
}

/// Fragment-stage record of the irradiance convolution; identical for every
/// slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct IrradianceParams {
    pub delta_phi: f32,
    pub delta_theta: f32,
}

/// Fragment-stage record of the specular prefilter; varies by mip only.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SpecularParams {
    pub roughness: f32,
    pub sample_count: u32,
}

// Every payload must fit the shared stride, or the one-offset-per-slot
// addressing breaks.
const _: () = assert!(size_of::<VsParams>() <= UNIFORM_STRIDE);
const _: () = assert!(size_of::<IrradianceParams>() <= UNIFORM_STRIDE);
const _: () = assert!(size_of::<SpecularParams>() <= UNIFORM_STRIDE);

/// Which convolution a [`crate::CubeFilter`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Diffuse irradiance convolution (hemispherical integration grid).
    Irradiance,
    /// GGX specular prefilter (one roughness level per mip).
    Specular,
}

impl FilterKind {
    /// Base cube-face resolution for this filter.
    #[must_use]
    pub fn base_dim(self) -> u32 {
        match self {
            FilterKind::Irradiance => IRRADIANCE_CUBE_DIM,
            FilterKind::Specular => PREFILTERED_CUBE_DIM,
        }
    }

    /// Byte size of this filter's fragment payload (the bound range of the
    /// fragment uniform, before padding).
    #[must_use]
    pub fn fs_payload_size(self) -> usize {
        match self {
            FilterKind::Irradiance => size_of::<IrradianceParams>(),
            FilterKind::Specular => size_of::<SpecularParams>(),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Irradiance => "Irradiance Cube",
            FilterKind::Specular => "Prefiltered Cube",
        }
    }
}

/// Roughness assigned to a specular mip: 0 at mip 0, 1 at the last mip,
/// shared by all 6 faces of that mip. A one-mip chain has no roughness ramp
/// and gets 0.
#[must_use]
pub fn roughness_for_mip(chain: MipChain, mip: u32) -> f32 {
    if chain.mip_count() <= 1 {
        return 0.0;
    }
    mip as f32 / (chain.mip_count() - 1) as f32
}

fn write_record<T: Pod>(data: &mut [u8], param_index: u32, record: &T) {
    let start = param_index as usize * UNIFORM_STRIDE;
    data[start..start + size_of::<T>()].copy_from_slice(bytemuck::bytes_of(record));
}

/// Packs the vertex-stage buffer: one padded MVP per slot, ordered by
/// `param_index`. The returned length is a multiple of [`UNIFORM_STRIDE`].
#[must_use]
pub fn pack_vs_params(chain: MipChain) -> Vec<u8> {
    let projection = face_projection();
    let views = face_matrices();
    let mut data = vec![0u8; chain.slot_count() as usize * UNIFORM_STRIDE];
    for slot in chain.render_slots() {
        let mvp = projection * views[slot.face.index() as usize];
        let record = VsParams {
            mvp: mvp.to_cols_array_2d(),
        };
        write_record(&mut data, slot.param_index, &record);
    }
    data
}

/// Packs the fragment-stage buffer for `kind`, same stride and ordering as
/// the vertex buffer.
#[must_use]
pub fn pack_fs_params(kind: FilterKind, chain: MipChain) -> Vec<u8> {
    let mut data = vec![0u8; chain.slot_count() as usize * UNIFORM_STRIDE];
    for slot in chain.render_slots() {
        match kind {
            FilterKind::Irradiance => {
                let record = IrradianceParams {
                    delta_phi: DELTA_PHI,
                    delta_theta: DELTA_THETA,
                };
                write_record(&mut data, slot.param_index, &record);
            }
            FilterKind::Specular => {
                let record = SpecularParams {
                    roughness: roughness_for_mip(chain, slot.mip),
                    sample_count: SPECULAR_SAMPLE_COUNT,
                };
                write_record(&mut data, slot.param_index, &record);
            }
        }
    }
    data
}
