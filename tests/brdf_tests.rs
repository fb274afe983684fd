//! BRDF Integration LUT Tests
//!
//! Tests for:
//! - The fixed LUT resolution
//! - Independence from the cube-convolution machinery
//! - The end-to-end single-pass bake (needs a GPU adapter, run with
//!   `cargo test -- --ignored`)

use ibl_bake::brdf::BRDF_LUT_DIM;
use ibl_bake::params::{IRRADIANCE_CUBE_DIM, PREFILTERED_CUBE_DIM};

// ============================================================================
// Sizing
// ============================================================================

#[test]
fn lut_resolution_is_512() {
    assert_eq!(BRDF_LUT_DIM, 512);
}

#[test]
fn lut_shares_the_specular_base_dimension() {
    // The LUT happens to match the specular cube's base resolution, but it
    // owns its own constant so the two can diverge independently.
    assert_eq!(BRDF_LUT_DIM, PREFILTERED_CUBE_DIM);
    assert_ne!(BRDF_LUT_DIM, IRRADIANCE_CUBE_DIM);
}

// ============================================================================
// Device-gated end-to-end bake
// ============================================================================

#[test]
#[ignore = "needs a GPU adapter"]
fn bake_produces_a_single_mip_512_square() {
    use ibl_bake::{BrdfLutGenerator, GpuContext};

    let ctx = pollster::block_on(GpuContext::new()).unwrap();
    let lut = BrdfLutGenerator::new(&ctx.device)
        .bake(&ctx.device, &ctx.queue)
        .unwrap();
    ctx.device.poll(wgpu::PollType::wait_indefinitely()).ok();

    // One flat 2D target: no mip chain, no cube layers.
    assert_eq!(lut.texture.width(), BRDF_LUT_DIM);
    assert_eq!(lut.texture.height(), BRDF_LUT_DIM);
    assert_eq!(lut.texture.mip_level_count(), 1);
    assert_eq!(lut.texture.depth_or_array_layers(), 1);
    assert_eq!(lut.texture.dimension(), wgpu::TextureDimension::D2);
}
