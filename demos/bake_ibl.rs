//! Full IBL bake against a procedural environment cube map.
//!
//! Run with `RUST_LOG=info cargo run --example bake_ibl`.

use ibl_bake::{BakedTexture, BrdfLutGenerator, CubeFilter, FilterKind, GpuContext, SkyboxMesh};

fn main() -> ibl_bake::Result<()> {
    env_logger::init();

    let ctx = pollster::block_on(GpuContext::new())?;

    // A six-color test environment: one flat color per face.
    let environment = BakedTexture::environment_cube(
        &ctx.device,
        &ctx.queue,
        256,
        [
            [200, 60, 60, 255],  // +X
            [60, 200, 60, 255],  // -X
            [60, 60, 200, 255],  // +Y
            [200, 200, 60, 255], // -Y
            [60, 200, 200, 255], // +Z
            [200, 60, 200, 255], // -Z
        ],
    );

    let skybox = SkyboxMesh::new(&ctx.device);

    let brdf_lut = BrdfLutGenerator::new(&ctx.device).bake(&ctx.device, &ctx.queue)?;
    let irradiance = CubeFilter::new(&ctx.device, FilterKind::Irradiance).bake(
        &ctx.device,
        &ctx.queue,
        &skybox,
        &environment,
    )?;
    let prefiltered = CubeFilter::new(&ctx.device, FilterKind::Specular).bake(
        &ctx.device,
        &ctx.queue,
        &skybox,
        &environment,
    )?;

    // Block until the GPU has finished all three bakes.
    ctx.device.poll(wgpu::PollType::wait_indefinitely()).ok();

    println!(
        "BRDF LUT: {}x{}",
        brdf_lut.texture.width(),
        brdf_lut.texture.height()
    );
    println!(
        "Irradiance cube: {} base, {} mips",
        irradiance.texture.width(),
        irradiance.texture.mip_level_count()
    );
    println!(
        "Prefiltered cube: {} base, {} mips",
        prefiltered.texture.width(),
        prefiltered.texture.mip_level_count()
    );

    Ok(())
}
