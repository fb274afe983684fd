//! Error Types
//!
//! The main error type [`BakeError`] covers the failure modes of offline IBL
//! baking: GPU initialization failures, invariant violations in the mip-chain
//! planner, and mesh-asset decoding errors.
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, BakeError>`. Device-level resource creation is
//! treated as infallible once a device exists; any validation error raised by
//! wgpu aborts the bake through the device's error handling rather than a
//! recoverable path.

use thiserror::Error;

/// The main error type for IBL baking.
#[derive(Error, Debug)]
pub enum BakeError {
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// A cube base dimension that is zero or not a power of two.
    ///
    /// This is a programming error, not a runtime condition: all bake
    /// dimensions are compile-time constants. Debug builds also assert.
    #[error("Invalid cube dimension {dim}: must be a non-zero power of two")]
    InvalidDimension {
        /// The rejected dimension
        dim: u32,
    },

    /// Malformed or incomplete mesh data (PLY decoding).
    #[error("Mesh data error: {0}")]
    MeshError(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias used by all public APIs in this crate.
pub type Result<T> = std::result::Result<T, BakeError>;
