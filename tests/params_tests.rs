//! Parameter Block Packer Tests
//!
//! Tests for:
//! - Record alignment and payload-vs-stride guarantees
//! - The irradiance constant sampling deltas
//! - The specular per-mip roughness schedule
//! - MVP packing against the face transforms

use glam::Mat4;

use ibl_bake::cube::{face_matrices, face_projection};
use ibl_bake::params::{
    self, DELTA_PHI, DELTA_THETA, IRRADIANCE_CUBE_DIM, IrradianceParams, PREFILTERED_CUBE_DIM,
    SPECULAR_SAMPLE_COUNT, SpecularParams, UNIFORM_STRIDE, VsParams,
};
use ibl_bake::{CubeFace, FilterKind, MipChain};

const EPSILON: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn read_record<T: bytemuck::Pod>(data: &[u8], param_index: u32) -> T {
    let start = param_index as usize * UNIFORM_STRIDE;
    *bytemuck::from_bytes(&data[start..start + size_of::<T>()])
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn buffers_hold_one_stride_per_slot() {
    for kind in [FilterKind::Irradiance, FilterKind::Specular] {
        let chain = MipChain::new(kind.base_dim()).unwrap();
        let vs = params::pack_vs_params(chain);
        let fs = params::pack_fs_params(kind, chain);
        assert_eq!(vs.len(), chain.slot_count() as usize * UNIFORM_STRIDE);
        assert_eq!(fs.len(), vs.len());
        // total size is already a multiple of the alignment granularity
        assert_eq!(vs.len() % UNIFORM_STRIDE, 0);
    }
}

#[test]
fn every_record_offset_is_alignment_multiple() {
    let chain = MipChain::new(PREFILTERED_CUBE_DIM).unwrap();
    for slot in chain.render_slots() {
        assert_eq!(slot.dynamic_offset as usize % UNIFORM_STRIDE, 0);
        assert_eq!(
            slot.dynamic_offset as usize,
            slot.param_index as usize * UNIFORM_STRIDE
        );
    }
}

#[test]
fn payloads_fit_the_shared_stride() {
    assert!(size_of::<VsParams>() <= UNIFORM_STRIDE);
    assert!(size_of::<IrradianceParams>() <= UNIFORM_STRIDE);
    assert!(size_of::<SpecularParams>() <= UNIFORM_STRIDE);
}

// ============================================================================
// Irradiance payload
// ============================================================================

#[test]
fn irradiance_deltas_constant_across_all_slots() {
    let chain = MipChain::new(IRRADIANCE_CUBE_DIM).unwrap();
    let fs = params::pack_fs_params(FilterKind::Irradiance, chain);
    for slot in chain.render_slots() {
        let record: IrradianceParams = read_record(&fs, slot.param_index);
        assert!(approx(record.delta_phi, DELTA_PHI));
        assert!(approx(record.delta_theta, DELTA_THETA));
    }
}

#[test]
fn irradiance_delta_values() {
    use std::f32::consts::PI;
    assert!(approx(DELTA_PHI, 2.0 * PI / 180.0));
    assert!(approx(DELTA_THETA, 0.5 * PI / 64.0));
}

// ============================================================================
// Specular payload
// ============================================================================

#[test]
fn specular_roughness_varies_by_mip_not_face() {
    let chain = MipChain::new(PREFILTERED_CUBE_DIM).unwrap();
    let fs = params::pack_fs_params(FilterKind::Specular, chain);
    for mip in 0..chain.mip_count() {
        let expected = mip as f32 / (chain.mip_count() - 1) as f32;
        for face in CubeFace::ALL {
            let record: SpecularParams = read_record(&fs, chain.param_index(mip, face));
            assert!(approx(record.roughness, expected));
            assert_eq!(record.sample_count, SPECULAR_SAMPLE_COUNT);
        }
    }
}

#[test]
fn specular_roughness_endpoints() {
    let chain = MipChain::new(PREFILTERED_CUBE_DIM).unwrap();
    assert!(approx(params::roughness_for_mip(chain, 0), 0.0));
    assert!(approx(
        params::roughness_for_mip(chain, chain.mip_count() - 1),
        1.0
    ));
}

#[test]
fn one_mip_chain_packs_zero_roughness() {
    // A 1x1 chain has no roughness ramp; the single record must hold a
    // finite 0, not the 0/0 of the general formula.
    let chain = MipChain::new(1).unwrap();
    assert!(approx(params::roughness_for_mip(chain, 0), 0.0));

    let fs = params::pack_fs_params(FilterKind::Specular, chain);
    for slot in chain.render_slots() {
        let record: SpecularParams = read_record(&fs, slot.param_index);
        assert!(record.roughness.is_finite());
        assert!(approx(record.roughness, 0.0));
    }
}

// ============================================================================
// MVP packing
// ============================================================================

#[test]
fn vs_records_hold_projection_times_face_view() {
    let chain = MipChain::new(IRRADIANCE_CUBE_DIM).unwrap();
    let vs = params::pack_vs_params(chain);
    let projection = face_projection();
    let views = face_matrices();

    for slot in chain.render_slots() {
        let record: VsParams = read_record(&vs, slot.param_index);
        let expected = projection * views[slot.face.index() as usize];
        let got = Mat4::from_cols_array_2d(&record.mvp);
        assert!(got.abs_diff_eq(expected, EPSILON));
    }
}

#[test]
fn vs_records_share_mvp_across_mips_of_one_face() {
    // The MVP depends on the face only; mips differ in viewport, not camera.
    let chain = MipChain::new(IRRADIANCE_CUBE_DIM).unwrap();
    let vs = params::pack_vs_params(chain);
    for face in CubeFace::ALL {
        let mip0: VsParams = read_record(&vs, chain.param_index(0, face));
        for mip in 1..chain.mip_count() {
            let other: VsParams = read_record(&vs, chain.param_index(mip, face));
            assert_eq!(mip0.mvp, other.mvp);
        }
    }
}
