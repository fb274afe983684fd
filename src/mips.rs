//! Mip Chain Planner
//!
//! Given a base cube-face resolution, computes the mip count, per-mip
//! viewport extents, and the two index linearizations shared by the
//! multi-pass renderer:
//!
//! - `param_index(mip, face) = mip * 6 + face` — ordering of records in the
//!   dynamic-offset parameter buffers;
//! - `view_index(mip, face) = face * mip_count + mip` — ordering of the
//!   offscreen attachment views.
//!
//! The two schemes are computed independently at their call sites in the
//! render loop, so both live here as named, tested functions instead of ad
//! hoc arithmetic. [`MipChain::render_slots`] yields the fixed pass traversal
//! (outer mip ascending, inner face canonical order) and
//! [`MipChain::copy_regions`] the ascending per-mip copy schedule that
//! assembles the final cube.

use crate::cube::{CubeFace, FACE_COUNT};
use crate::errors::{BakeError, Result};
use crate::params::UNIFORM_STRIDE;

/// Mip-chain sizing for one cube bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipChain {
    base_dim: u32,
    mip_count: u32,
}

/// One (mip, face) render pass of the offscreen loop, with everything the
/// encoder needs: viewport extent, both linear indices, and the byte offset
/// into the packed parameter buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSlot {
    pub mip: u32,
    pub face: CubeFace,
    /// Viewport/scissor size of this slot (square).
    pub extent: u32,
    /// Index into the parameter buffers (`mip * 6 + face`).
    pub param_index: u32,
    /// Index into the offscreen view array (`face * mip_count + mip`).
    pub view_index: u32,
    /// Dynamic offset shared by the vertex and fragment uniform bindings.
    pub dynamic_offset: u32,
}

/// One per-mip region copy from the offscreen array into the result cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRegion {
    pub mip: u32,
    pub width: u32,
    pub height: u32,
    /// Always the full 6 cube layers.
    pub layers: u32,
}

impl MipChain {
    /// Plans the chain for a base dimension.
    ///
    /// Fails on a zero or non-power-of-two dimension. All callers in this
    /// crate pass compile-time constants, so a failure here is a programming
    /// error; debug builds assert before returning it.
    pub fn new(base_dim: u32) -> Result<Self> {
        debug_assert!(
            base_dim.is_power_of_two(),
            "cube base dimension must be a non-zero power of two, got {base_dim}"
        );
        if !base_dim.is_power_of_two() {
            return Err(BakeError::InvalidDimension { dim: base_dim });
        }
        Ok(Self {
            base_dim,
            mip_count: base_dim.ilog2() + 1,
        })
    }

    #[must_use]
    pub fn base_dim(self) -> u32 {
        self.base_dim
    }

    /// `floor(log2(base_dim)) + 1`.
    #[must_use]
    pub fn mip_count(self) -> u32 {
        self.mip_count
    }

    /// Total number of render slots (`mip_count * 6`).
    #[must_use]
    pub fn slot_count(self) -> u32 {
        self.mip_count * FACE_COUNT as u32
    }

    /// Viewport size at `mip`: `max(1, base_dim >> mip)`.
    #[must_use]
    pub fn extent(self, mip: u32) -> u32 {
        debug_assert!(mip < self.mip_count);
        (self.base_dim >> mip).max(1)
    }

    /// Linear index of a slot's record in the parameter buffers.
    #[must_use]
    pub fn param_index(self, mip: u32, face: CubeFace) -> u32 {
        debug_assert!(mip < self.mip_count);
        mip * FACE_COUNT as u32 + face.index()
    }

    /// Linear index of a slot's attachment in the offscreen view array.
    #[must_use]
    pub fn view_index(self, mip: u32, face: CubeFace) -> u32 {
        debug_assert!(mip < self.mip_count);
        face.index() * self.mip_count + mip
    }

    /// Byte offset of a slot's records, valid for both uniform bindings
    /// because both blocks are packed with [`UNIFORM_STRIDE`].
    #[must_use]
    pub fn dynamic_offset(self, mip: u32, face: CubeFace) -> u32 {
        self.param_index(mip, face) * UNIFORM_STRIDE as u32
    }

    /// The fixed pass traversal: outer loop mip ascending from 0, inner loop
    /// faces in canonical order. The viewport schedule and the copy regions
    /// both depend on this order.
    pub fn render_slots(self) -> impl Iterator<Item = RenderSlot> {
        (0..self.mip_count).flat_map(move |mip| {
            CubeFace::ALL.into_iter().map(move |face| RenderSlot {
                mip,
                face,
                extent: self.extent(mip),
                param_index: self.param_index(mip, face),
                view_index: self.view_index(mip, face),
                dynamic_offset: self.dynamic_offset(mip, face),
            })
        })
    }

    /// Per-mip copies (all 6 layers at once) in ascending mip order. Covers
    /// every texel of the result cube exactly once.
    pub fn copy_regions(self) -> impl Iterator<Item = CopyRegion> {
        (0..self.mip_count).map(move |mip| CopyRegion {
            mip,
            width: self.extent(mip),
            height: self.extent(mip),
            layers: FACE_COUNT as u32,
        })
    }
}
