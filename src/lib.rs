#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Offline image-based-lighting precomputation.
//!
//! Bakes the three assets of the split-sum approximation so a PBR shader can
//! replace per-pixel Monte-Carlo integration with cheap texture lookups:
//!
//! - a BRDF integration lookup table ([`BrdfLutGenerator`]),
//! - a diffuse irradiance convolution cube map,
//! - a roughness-prefiltered specular cube map with a full mip chain
//!   (both via [`CubeFilter`]).
//!
//! The cube convolutions render the environment once per (mip, face) into an
//! offscreen texture array and assemble the result with region copies; all
//! per-slot parameters live in two uniform buffers addressed with dynamic
//! offsets. [`MipChain`] owns the sizing and index arithmetic for that loop.

pub mod brdf;
pub mod context;
pub mod cube;
pub mod errors;
pub mod filter;
pub mod mesh;
pub mod meshes;
pub mod mips;
pub mod params;
pub mod target;

pub use brdf::BrdfLutGenerator;
pub use context::GpuContext;
pub use cube::CubeFace;
pub use errors::{BakeError, Result};
pub use filter::CubeFilter;
pub use mesh::SkyboxMesh;
pub use mips::MipChain;
pub use params::FilterKind;
pub use target::BakedTexture;
